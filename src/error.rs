// error.rs - Error taxonomy for loading, configuration and inference

use thiserror::Error;

/// Top-level error type for heredity.
///
/// Input problems (`Io`, `Csv`, `Input`, `Config`) are detected before any
/// enumeration starts. `Normalization` is the only error inference itself
/// can raise: it means no enumerated world was consistent with the evidence.
#[derive(Debug, Error)]
pub enum HeredityError {
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Normalization failed for '{person}' ({field} distribution has zero total mass); evidence is contradictory")]
    Normalization { person: String, field: &'static str },

    #[error("Output error: {0}")]
    Output(String),
}

impl HeredityError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HeredityError::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors raised before inference ran.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HeredityError::Io { .. }
                | HeredityError::Csv { .. }
                | HeredityError::Input(_)
                | HeredityError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HeredityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_classification() {
        assert!(HeredityError::Input("x".into()).is_input_error());
        assert!(HeredityError::Config("x".into()).is_input_error());
        let norm = HeredityError::Normalization {
            person: "Harry".into(),
            field: "gene",
        };
        assert!(!norm.is_input_error());
        assert!(norm.to_string().contains("Harry"));
    }
}
