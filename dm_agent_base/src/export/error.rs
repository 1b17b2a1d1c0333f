use crate::command::CommandError;
use crate::netdev::NetdevError;
use std::fmt;

/// Attribute resolution errors.
///
/// `NotExported` is distinguishable from a legitimately absent live value
/// by kind: absence is the non-error `Export::Absent`, never an error and
/// never a sentinel to compare against.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Parameter '{name}' is not exported by this binding")]
    NotExported { name: String },

    #[error("Parameter '{name}' is not declared by this object")]
    UnknownParameter { name: String },

    #[error("Command invocation failed: {0}")]
    Command(#[from] CommandError),

    #[error("Interface statistics source failed: {0}")]
    Netdev(#[from] NetdevError),

    #[error("Live source for '{name}' failed: {reason}")]
    Source { name: String, reason: String },
}

impl ExportError {
    pub fn source_failure(name: &str, reason: impl Into<String>) -> Self {
        Self::Source {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Raised once at the end of a `validate_exports` pass, aggregating every
/// declared, non-withdrawn attribute that could not be resolved. Fatal to
/// construction: callers must not proceed with a half-validated instance.
#[derive(Debug)]
pub struct ValidationError {
    pub failures: Vec<(String, ExportError)>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exported parameter(s) failed to resolve:",
            self.failures.len()
        )?;
        for (name, error) in &self.failures {
            write!(f, "\n  - {}: {}", name, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
