//! Catalog identifier grammar.
//!
//! Every catalog artifact is named by one canonical identifier:
//!
//! ```text
//! db.rec.afenda.public.invoices      table
//! db.col.afenda.public.invoices.id   column
//! api.route.billing.v1/invoices/{id} api endpoint
//! metric:revenue.monthly             metric (colon family)
//! ```
//!
//! ## Entry points
//!
//! - [`canonicalize`] - strict trim/lowercase plus structural checks; fails fast
//! - [`parse`] - total; always returns a [`ParseOutcome`]
//! - [`build`] - inverse of `parse` for known parts; fails fast
//! - [`derive_asset_type`] / [`assert_type_matches`] - semantic type and write gate
//!
//! `build(p, s)` parses back to `(p, s)`, and rendering a parsed
//! [`AssetKey`] reproduces the built string byte for byte.

mod asset_type;
mod builder;
mod canonical;
mod error;
mod grammar;
mod parser;

pub use asset_type::{assert_type_matches, derive_asset_type, AssetType};
pub use builder::build;
pub use canonical::canonicalize;
pub use error::{ConsistencyError, StructuralError, ValidationError};
pub use grammar::{
    grammar_table, is_segment_char, is_valid_segment, DelimiterFamily, GrammarConstraint,
    GrammarRow, Prefix, PRIMARY_DELIMITER, SECONDARY_DELIMITER,
};
pub use parser::{parse, AssetKey, ParseFailure, ParseOutcome, UNKNOWN_PREFIX};
