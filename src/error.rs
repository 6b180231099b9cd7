//! Error types for structure compilation.

use thiserror::Error;

/// Errors raised while decoding floors or compiling a structure.
///
/// Compilation is all-or-nothing: when any of these is returned no instructions are.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode floor image{}: {reason}", floor_label(.floor))]
    Decode {
        /// Position of the offending image in the floor sequence, when known.
        floor: Option<usize>,
        reason: String,
    },

    #[error("no floor images supplied")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            floor: None,
            reason: reason.into(),
        }
    }

    /// Tags a decode error with the floor it came from. Other errors pass through.
    pub(crate) fn at_floor(self, index: usize) -> Self {
        match self {
            Self::Decode { reason, .. } => Self::Decode {
                floor: Some(index),
                reason,
            },
            other => other,
        }
    }
}

fn floor_label(floor: &Option<usize>) -> String {
    floor.map(|f| format!(" for floor {f}")).unwrap_or_default()
}
