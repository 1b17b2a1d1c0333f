use quick_xml::errors::serialize::DeError;

/// Schema loading and parsing errors
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize schema document: {0}")]
    Xml(#[from] DeError),

    #[error("Schema document contains no <model> elements")]
    NoModels,
}
