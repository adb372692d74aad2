//! Semantic asset types and the write-time consistency gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConsistencyError;
use super::parser::parse;

/// Semantic type of a catalog artifact.
///
/// Each [`Prefix`](super::Prefix) maps to exactly one asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Table,
    Column,
    BusinessObject,
    View,
    Pipeline,
    Report,
    Api,
    Policy,
    Metric,
}

impl AssetType {
    /// Stable snake_case name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Column => "column",
            Self::BusinessObject => "business_object",
            Self::View => "view",
            Self::Pipeline => "pipeline",
            Self::Report => "report",
            Self::Api => "api",
            Self::Policy => "policy",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "column" => Ok(Self::Column),
            "business_object" => Ok(Self::BusinessObject),
            "view" => Ok(Self::View),
            "pipeline" => Ok(Self::Pipeline),
            "report" => Ok(Self::Report),
            "api" => Ok(Self::Api),
            "policy" => Ok(Self::Policy),
            "metric" => Ok(Self::Metric),
            other => Err(format!("unknown asset type: {}", other)),
        }
    }
}

/// Derive the asset type of an identifier.
///
/// Returns `None` when the identifier does not parse as valid.
pub fn derive_asset_type(identifier: &str) -> Option<AssetType> {
    parse(identifier).key().map(|key| key.prefix().asset_type())
}

/// Check that `claimed` is the type `identifier` derives.
///
/// Call this before persisting an `(identifier, asset type)` pair. Returns the
/// derived type on success.
pub fn assert_type_matches(
    identifier: &str,
    claimed: AssetType,
) -> Result<AssetType, ConsistencyError> {
    match derive_asset_type(identifier) {
        Some(derived) if derived == claimed => Ok(derived),
        Some(derived) => Err(ConsistencyError::TypeMismatch {
            identifier: identifier.to_string(),
            claimed,
            derived,
        }),
        None => Err(ConsistencyError::Underivable {
            identifier: identifier.to_string(),
            claimed,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Prefix;

    #[test]
    fn test_mapping_is_one_to_one() {
        let mut types: Vec<_> = Prefix::ALL.iter().map(|p| p.asset_type()).collect();
        types.sort();
        types.dedup();
        assert_eq!(types.len(), Prefix::ALL.len());
    }

    #[test]
    fn test_as_str_round_trips() {
        for prefix in Prefix::ALL {
            let t = prefix.asset_type();
            assert_eq!(t.as_str().parse::<AssetType>(), Ok(t));
        }
        assert!("invoice".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&AssetType::BusinessObject).unwrap();
        assert_eq!(json, "\"business_object\"");
    }

    #[test]
    fn test_derive_and_assert() {
        assert_eq!(derive_asset_type("db.rec.afenda.public.invoices"), Some(AssetType::Table));
        assert_eq!(derive_asset_type("db.rec.afenda.public"), None);

        assert!(assert_type_matches("metric:revenue", AssetType::Metric).is_ok());
        assert!(matches!(
            assert_type_matches("metric:revenue", AssetType::Table),
            Err(ConsistencyError::TypeMismatch { derived: AssetType::Metric, .. })
        ));
        assert!(matches!(
            assert_type_matches("nope", AssetType::Table),
            Err(ConsistencyError::Underivable { .. })
        ));
    }
}
