
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FhirDateError {
    #[error("Expecting {expected} when initializing FhirDate, but got {received}")]
    TypeKind { expected: &'static str, received: &'static str },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FhirDateError>;

impl FhirDateError {
    pub(crate) fn type_kind(received: &'static str) -> Self {
        Self::TypeKind { expected: "string or datetime", received }
    }
}

// Helper conversions
impl From<config::ConfigError> for FhirDateError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
