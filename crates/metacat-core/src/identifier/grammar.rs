//! The grammar table: every recognized prefix and its segment constraints.
//!
//! Prefixes come in two delimiter families:
//!
//! - **Dot family**: a two-token prefix followed by `.`-separated segments,
//!   e.g. `db.rec.afenda.public.invoices`.
//! - **Colon family**: the literal `metric:` token immediately followed by
//!   `.`-joined segments, e.g. `metric:revenue.monthly`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::asset_type::AssetType;

/// Separates segments (and the two prefix tokens of the dot family).
pub const PRIMARY_DELIMITER: char = '.';

/// Terminates the colon-family prefix. Reserved everywhere else.
pub const SECONDARY_DELIMITER: char = ':';

/// Characters allowed in a segment besides `a-z` and `0-9`.
pub const SEGMENT_EXTRA_CHARS: &[char] = &['_', '-', '/', '{', '}'];

/// Delimiter family a prefix belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterFamily {
    /// `prefix.seg.seg`
    Dot,
    /// `prefix:seg.seg`
    Colon,
}

/// Segment-count bounds for one prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConstraint {
    /// Minimum number of segments (always >= 1).
    pub min_segments: usize,
    /// Maximum number of segments, `None` when unbounded.
    pub max_segments: Option<usize>,
}

impl GrammarConstraint {
    const fn exact(n: usize) -> Self {
        Self {
            min_segments: n,
            max_segments: Some(n),
        }
    }

    const fn range(min: usize, max: usize) -> Self {
        Self {
            min_segments: min,
            max_segments: Some(max),
        }
    }

    const fn at_least(min: usize) -> Self {
        Self {
            min_segments: min,
            max_segments: None,
        }
    }

    /// Check whether `count` segments satisfy this constraint.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_segments && self.max_segments.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for GrammarConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_segments {
            Some(max) if max == self.min_segments => write!(f, "exactly {}", max),
            Some(max) => write!(f, "{}..={}", self.min_segments, max),
            None => write!(f, "at least {}", self.min_segments),
        }
    }
}

/// A recognized identifier prefix.
///
/// The set is closed: adding a prefix means adding a variant here, and every
/// `match` over `Prefix` in the crate must then handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prefix {
    /// `db.rec` - a physical table.
    #[serde(rename = "db.rec")]
    Table,
    /// `db.col` - a column of a physical table.
    #[serde(rename = "db.col")]
    Column,
    /// `biz.obj` - a business object.
    #[serde(rename = "biz.obj")]
    BusinessObject,
    /// `db.view` - a database view.
    #[serde(rename = "db.view")]
    View,
    /// `etl.job` - a data pipeline.
    #[serde(rename = "etl.job")]
    Pipeline,
    /// `ui.report` - a report surface.
    #[serde(rename = "ui.report")]
    Report,
    /// `api.route` - an API endpoint.
    #[serde(rename = "api.route")]
    Api,
    /// `sec.policy` - an access or governance policy.
    #[serde(rename = "sec.policy")]
    Policy,
    /// `metric:` - a metric (colon family, unbounded segments).
    #[serde(rename = "metric:")]
    Metric,
}

impl Prefix {
    /// Every prefix, in grammar-table order.
    pub const ALL: [Prefix; 9] = [
        Prefix::Table,
        Prefix::Column,
        Prefix::BusinessObject,
        Prefix::View,
        Prefix::Pipeline,
        Prefix::Report,
        Prefix::Api,
        Prefix::Policy,
        Prefix::Metric,
    ];

    /// The literal token an identifier starts with.
    ///
    /// Dot-family tokens do not include the trailing `.`; the colon-family
    /// token includes its `:`.
    pub const fn token(self) -> &'static str {
        match self {
            Prefix::Table => "db.rec",
            Prefix::Column => "db.col",
            Prefix::BusinessObject => "biz.obj",
            Prefix::View => "db.view",
            Prefix::Pipeline => "etl.job",
            Prefix::Report => "ui.report",
            Prefix::Api => "api.route",
            Prefix::Policy => "sec.policy",
            Prefix::Metric => "metric:",
        }
    }

    pub const fn family(self) -> DelimiterFamily {
        match self {
            Prefix::Metric => DelimiterFamily::Colon,
            _ => DelimiterFamily::Dot,
        }
    }

    /// Segment-count constraint for this prefix.
    pub const fn constraint(self) -> GrammarConstraint {
        match self {
            Prefix::Table => GrammarConstraint::exact(3),
            Prefix::Column => GrammarConstraint::exact(4),
            Prefix::BusinessObject => GrammarConstraint::range(2, 3),
            Prefix::View => GrammarConstraint::exact(3),
            Prefix::Pipeline => GrammarConstraint::range(2, 4),
            Prefix::Report => GrammarConstraint::range(2, 4),
            Prefix::Api => GrammarConstraint::range(2, 5),
            Prefix::Policy => GrammarConstraint::range(2, 3),
            Prefix::Metric => GrammarConstraint::at_least(1),
        }
    }

    /// Human-readable description of the segment layout.
    pub const fn description(self) -> &'static str {
        match self {
            Prefix::Table => "physical table: tenant.schema.table",
            Prefix::Column => "table column: tenant.schema.table.column",
            Prefix::BusinessObject => "business object: domain.entity[.variant]",
            Prefix::View => "database view: tenant.schema.view",
            Prefix::Pipeline => "pipeline: system.job[.stage[.step]]",
            Prefix::Report => "report: module.report[.section[.widget]]",
            Prefix::Api => "api endpoint: service.path[.path...] (paths may use / and {})",
            Prefix::Policy => "policy: domain.policy[.rule]",
            Prefix::Metric => "metric: name[.qualifier...] (colon prefix, unbounded)",
        }
    }

    /// The semantic asset type every identifier with this prefix derives.
    pub const fn asset_type(self) -> AssetType {
        match self {
            Prefix::Table => AssetType::Table,
            Prefix::Column => AssetType::Column,
            Prefix::BusinessObject => AssetType::BusinessObject,
            Prefix::View => AssetType::View,
            Prefix::Pipeline => AssetType::Pipeline,
            Prefix::Report => AssetType::Report,
            Prefix::Api => AssetType::Api,
            Prefix::Policy => AssetType::Policy,
            Prefix::Metric => AssetType::Metric,
        }
    }

    /// Look up a prefix by its exact token.
    ///
    /// Accepts `metric` as well as `metric:` for the colon family, so callers
    /// naming the prefix on a command line do not need the delimiter.
    pub fn from_token(token: &str) -> Option<Prefix> {
        if token == "metric" {
            return Some(Prefix::Metric);
        }
        Prefix::ALL.into_iter().find(|p| p.token() == token)
    }

    /// The dot-family prefix whose token is `head.tail`, if any.
    pub(crate) fn from_dot_tokens(head: &str, tail: &str) -> Option<Prefix> {
        Prefix::ALL.into_iter().find(|p| {
            p.family() == DelimiterFamily::Dot
                && p.token()
                    .split_once(PRIMARY_DELIMITER)
                    .is_some_and(|(h, t)| h == head && t == tail)
        })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}

/// Whether `c` belongs to the segment alphabet.
pub fn is_segment_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || SEGMENT_EXTRA_CHARS.contains(&c)
}

/// Whether `segment` is non-empty and drawn entirely from the segment alphabet.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(is_segment_char)
}

/// One row of the grammar table, for display and introspection.
#[derive(Debug, Clone, Serialize)]
pub struct GrammarRow {
    pub prefix: Prefix,
    #[serde(skip)]
    pub token: &'static str,
    pub family: DelimiterFamily,
    pub constraint: GrammarConstraint,
    pub asset_type: AssetType,
    pub description: &'static str,
}

/// The full grammar table, one row per prefix.
pub fn grammar_table() -> Vec<GrammarRow> {
    Prefix::ALL
        .into_iter()
        .map(|prefix| GrammarRow {
            prefix,
            token: prefix.token(),
            family: prefix.family(),
            constraint: prefix.constraint(),
            asset_type: prefix.asset_type(),
            description: prefix.description(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prefix_has_min_at_least_one() {
        for prefix in Prefix::ALL {
            let c = prefix.constraint();
            assert!(c.min_segments >= 1, "{prefix} has min 0");
            if let Some(max) = c.max_segments {
                assert!(max >= c.min_segments, "{prefix} has max < min");
            }
        }
    }

    #[test]
    fn test_only_metric_is_unbounded() {
        for prefix in Prefix::ALL {
            let unbounded = prefix.constraint().max_segments.is_none();
            assert_eq!(unbounded, prefix == Prefix::Metric);
        }
    }

    #[test]
    fn test_tokens_are_unique_and_round_trip() {
        for prefix in Prefix::ALL {
            assert_eq!(Prefix::from_token(prefix.token()), Some(prefix));
        }
        let mut tokens: Vec<_> = Prefix::ALL.iter().map(|p| p.token()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), Prefix::ALL.len());
    }

    #[test]
    fn test_dot_tokens_have_two_parts() {
        for prefix in Prefix::ALL {
            if prefix.family() == DelimiterFamily::Dot {
                let parts: Vec<_> = prefix.token().split(PRIMARY_DELIMITER).collect();
                assert_eq!(parts.len(), 2, "{prefix}");
                assert_eq!(Prefix::from_dot_tokens(parts[0], parts[1]), Some(prefix));
            }
        }
    }

    #[test]
    fn test_constraint_accepts() {
        let table = Prefix::Table.constraint();
        assert!(!table.accepts(2));
        assert!(table.accepts(3));
        assert!(!table.accepts(4));

        let metric = Prefix::Metric.constraint();
        assert!(!metric.accepts(0));
        assert!(metric.accepts(1));
        assert!(metric.accepts(50));
    }

    #[test]
    fn test_segment_alphabet() {
        assert!(is_valid_segment("year_{yyyy}"));
        assert!(is_valid_segment("v1/invoices/{id}"));
        assert!(is_valid_segment("snake_case-and-dash"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment("Upper"));
        assert!(!is_valid_segment("has space"));
        assert!(!is_valid_segment("dot.inside"));
        assert!(!is_valid_segment("colon:inside"));
    }
}
