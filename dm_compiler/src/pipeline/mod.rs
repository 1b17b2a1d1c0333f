//! Compilation pipeline: schema file -> parsed tree -> emitted artifact.
//!
//! Compilation either fully succeeds (artifact written, summary returned)
//! or fails loudly on the first malformed input.

mod error;

pub use error::PipelineError;

use crate::emitter::{Emitter, EmitterConfig};
use crate::schema;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Summary of one compilation run.
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub models: usize,
    pub objects_emitted: usize,
    pub parameters_emitted: usize,
    pub duration_ms: u64,
}

/// Process a single schema file through the complete pipeline
/// (read -> deserialize -> walk -> emit).
pub fn process_file<W: Write>(
    schema_path: &Path,
    config: EmitterConfig,
    out: W,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    log::info!("compiling schema '{}'", schema_path.display());

    let document = schema::load_from_path(schema_path)?;

    let mut emitter = Emitter::new(out, config);
    emitter.emit_document(&document)?;

    let result = PipelineResult {
        models: document.model.len(),
        objects_emitted: emitter.objects_emitted(),
        parameters_emitted: emitter.parameters_emitted(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    log::info!(
        "emitted {} objects / {} parameters from {} model(s)",
        result.objects_emitted,
        result.parameters_emitted,
        result.models
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<document>
  <model name="Device:2.0">
    <object name="Device.Test.">
      <parameter name="Enable">
        <syntax><boolean/><default value="true"/></syntax>
      </parameter>
      <parameter name="Label">
        <syntax><string/><default value="hi"/></syntax>
      </parameter>
    </object>
  </model>
</document>"#;

    #[test]
    fn test_end_to_end_single_object() {
        let mut schema_file = NamedTempFile::new().unwrap();
        schema_file.write_all(SAMPLE.as_bytes()).unwrap();

        let mut artifact = Vec::new();
        let result =
            process_file(schema_file.path(), EmitterConfig::emit_all(), &mut artifact).unwrap();

        assert_eq!(result.models, 1);
        assert_eq!(result.objects_emitted, 1);
        assert_eq!(result.parameters_emitted, 2);

        let text = String::from_utf8(artifact).unwrap();
        assert_eq!(text.matches("pub struct ").count(), 1);
        assert!(text.contains("pub struct Device_Test_"));
        assert!(text.contains("p_Enable: ParamValue::Bool(true)"));
        assert!(text.contains("p_Label: ParamValue::Str(\"hi\".to_string())"));
    }

    #[test]
    fn test_malformed_document_fails_loudly() {
        let mut schema_file = NamedTempFile::new().unwrap();
        schema_file
            .write_all(b"<document><model name='M'><object></model></document>")
            .unwrap();

        let result = process_file(schema_file.path(), EmitterConfig::emit_all(), Vec::new());
        assert_matches!(result, Err(PipelineError::Schema(_)));
    }

    #[test]
    fn test_missing_file_maps_to_schema_read_error() {
        let result = process_file(
            Path::new("/nonexistent/schema.xml"),
            EmitterConfig::emit_all(),
            Vec::new(),
        );
        assert_matches!(result, Err(PipelineError::Schema(_)));
    }
}
