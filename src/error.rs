//! Error types for the optimizer and its callers.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Mode;

/// Hard failures of an optimization call.
///
/// These never escape the engine as `Err`; their display text becomes
/// `OptimizationResult::error`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("No cuts provided")]
    NoCuts,

    #[error("No stock provided")]
    NoStock,

    #[error("Largest cut ({cut}\") is larger than largest stock ({stock}\")")]
    CutTooLong { cut: f64, stock: f64 },

    #[error(
        "Largest cut ({cut_length}\"x{cut_width}\") exceeds largest stock ({stock_length}\"x{stock_width}\")"
    )]
    SheetTooSmall {
        cut_length: f64,
        cut_width: f64,
        stock_length: f64,
        stock_width: f64,
    },
}

/// Errors raised while building or checking a request, before the engine runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid dimensions '{0}', expected L or LxW")]
    InvalidDimensions(String),

    #[error("invalid entry '{0}', expected [label=]LxW:qty[:grain]")]
    InvalidEntry(String),

    #[error("invalid quantity in '{0}'")]
    InvalidQuantity(String),

    #[error("invalid kerf '{0}', expected a non-negative number, fraction, or preset")]
    InvalidKerf(String),

    #[error("{kind} '{id}' must have a positive length")]
    NonPositiveLength { kind: &'static str, id: String },

    #[error("{kind} '{id}' needs a positive width in {mode} mode")]
    MissingWidth {
        kind: &'static str,
        id: String,
        mode: Mode,
    },

    #[error("{kind} '{id}' must have a quantity of at least 1")]
    ZeroQuantity { kind: &'static str, id: String },

    #[error("request expands to {count} {kind} units, limit is {limit}")]
    TooManyUnits {
        kind: &'static str,
        count: u64,
        limit: u64,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_both_sizes() {
        let msg = OptimizeError::CutTooLong {
            cut: 100.0,
            stock: 96.0,
        }
        .to_string();
        assert_eq!(
            msg,
            "Largest cut (100\") is larger than largest stock (96\")"
        );

        let msg = OptimizeError::SheetTooSmall {
            cut_length: 100.0,
            cut_width: 50.0,
            stock_length: 96.0,
            stock_width: 48.0,
        }
        .to_string();
        assert_eq!(
            msg,
            "Largest cut (100\"x50\") exceeds largest stock (96\"x48\")"
        );
    }

    #[test]
    fn test_missing_width_mentions_mode() {
        let err = InputError::MissingWidth {
            kind: "cut",
            id: "shelf".into(),
            mode: Mode::Sheet,
        };
        assert_eq!(
            err.to_string(),
            "cut 'shelf' needs a positive width in sheet mode"
        );
    }
}
