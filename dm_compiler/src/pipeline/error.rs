use crate::schema::SchemaError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Schema loading failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Artifact emission failed: {0}")]
    Emit(#[from] std::io::Error),
}
