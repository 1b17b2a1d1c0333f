// Internal modules
pub mod emitter;
pub mod mangle;
pub mod pipeline;
pub mod schema;

// Re-export key types for library consumers
pub use emitter::{Emitter, EmitterConfig};
pub use pipeline::{PipelineError, PipelineResult};
pub use schema::{Document, SchemaError};
