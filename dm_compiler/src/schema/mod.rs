//! Serde data structures that map directly to the TR-106 device-model XML
//! shape, plus loaders that produce the read-only tree the emitter walks.
//!
//! Component/`object-ref` inclusion resolution happens upstream of this
//! crate; the loader consumes an already-flattened `<document>`.

mod error;

pub use error::SchemaError;

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root element of a TR-106 device-model file.
#[derive(Debug, Deserialize)]
#[serde(rename = "document")]
pub struct Document {
    #[serde(rename = "model", default)]
    pub model: Vec<Model>,
}

/// A `<model>` element holding objects specific to one device model.
#[derive(Debug, Deserialize)]
pub struct Model {
    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "object", default)]
    pub object: Vec<SchemaObject>,
}

/// A named node in the device-model tree, e.g. `Device.Routing.RIP.`
///
/// Owned by the document; immutable once parsed.
#[derive(Debug, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "parameter", default)]
    pub parameter: Vec<SchemaParameter>,
}

/// A named, typed, optionally defaulted leaf declared on an object.
#[derive(Debug, Deserialize)]
pub struct SchemaParameter {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "syntax", default)]
    pub syntax: Syntax,
}

/// The `<syntax>` element. The parameter kind is indicated by which
/// marker child element is present.
#[derive(Debug, Default, Deserialize)]
pub struct Syntax {
    #[serde(rename = "boolean", default)]
    pub boolean: Option<KindMarker>,

    #[serde(rename = "string", default)]
    pub string: Option<KindMarker>,

    #[serde(rename = "unsignedInt", default)]
    pub unsigned_int: Option<KindMarker>,

    #[serde(rename = "int", default)]
    pub int: Option<KindMarker>,

    #[serde(rename = "dateTime", default)]
    pub date_time: Option<KindMarker>,

    #[serde(rename = "default", default)]
    pub default: Option<DefaultValue>,
}

/// Empty marker element such as `<boolean/>` or `<string/>`.
#[derive(Debug, Default, Deserialize)]
pub struct KindMarker {}

/// A `<default value="..."/>` element.
#[derive(Debug, Deserialize)]
pub struct DefaultValue {
    #[serde(rename = "@value")]
    pub value: String,
}

/// Parameter kind as the emitter classifies it.
///
/// Numeric kinds and anything unrecognized fold into `Other`; their
/// default literals are emitted unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Boolean,
    String,
    Other,
}

impl Syntax {
    pub fn kind(&self) -> SyntaxKind {
        if self.boolean.is_some() {
            SyntaxKind::Boolean
        } else if self.string.is_some() {
            SyntaxKind::String
        } else {
            SyntaxKind::Other
        }
    }

    /// The schema-declared default literal, if a `<default>` node exists.
    pub fn default_literal(&self) -> Option<&str> {
        self.default.as_ref().map(|d| d.value.as_str())
    }
}

/// Deserialize a schema document from an XML string.
pub fn load_from_str(xml: &str) -> Result<Document, SchemaError> {
    let document: Document = quick_xml::de::from_str(xml)?;
    Ok(document)
}

/// Read and deserialize a schema document from a file.
pub fn load_from_path(path: &Path) -> Result<Document, SchemaError> {
    let xml = fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document>
  <model name="Device:2.0">
    <object name="Device.Test." access="readOnly" minEntries="1" maxEntries="1">
      <parameter name="Enable" access="readWrite">
        <syntax><boolean/><default type="object" value="true"/></syntax>
      </parameter>
      <parameter name="Label" access="readWrite">
        <syntax><string/><default type="object" value="hi"/></syntax>
      </parameter>
      <parameter name="Order" access="readWrite">
        <syntax><unsignedInt/></syntax>
      </parameter>
    </object>
  </model>
</document>"#;

    #[test]
    fn test_parse_sample_document() {
        let doc = load_from_str(SAMPLE).expect("sample should parse");
        assert_eq!(doc.model.len(), 1);
        assert_eq!(doc.model[0].name, "Device:2.0");

        let obj = &doc.model[0].object[0];
        assert_eq!(obj.name, "Device.Test.");
        assert_eq!(obj.parameter.len(), 3);
    }

    #[test]
    fn test_syntax_kind_classification() {
        let doc = load_from_str(SAMPLE).unwrap();
        let params = &doc.model[0].object[0].parameter;

        assert_eq!(params[0].syntax.kind(), SyntaxKind::Boolean);
        assert_eq!(params[0].syntax.default_literal(), Some("true"));
        assert_eq!(params[1].syntax.kind(), SyntaxKind::String);
        assert_eq!(params[2].syntax.kind(), SyntaxKind::Other);
        assert_eq!(params[2].syntax.default_literal(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_from_path(Path::new("/nonexistent/tr-181.xml")).unwrap_err();
        match err {
            SchemaError::Read { path, .. } => assert!(path.contains("tr-181.xml")),
            other => panic!("expected Read error, got {other:?}"),
        }
    }
}
