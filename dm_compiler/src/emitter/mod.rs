//! Schema walker / emitter.
//!
//! Walks an already-parsed schema tree in document order and emits one
//! data-holder type declaration per selected object: a struct with one
//! `p_<parameter>` field per parameter and a `Default` impl that assigns
//! the schema-declared default (or the unset sentinel).

use crate::mangle::mangle;
use crate::schema::{Document, SchemaObject, SchemaParameter, SyntaxKind};
use std::collections::HashSet;
use std::io::{self, Write};

/// Object selection configuration for an emitter run.
///
/// An empty allow-list means "emit all objects". Selection is a pure
/// membership test; it never reorders or deduplicates the document.
#[derive(Debug, Clone, Default)]
pub struct EmitterConfig {
    pub allow: HashSet<String>,
}

impl EmitterConfig {
    /// Emit every object in the document.
    pub fn emit_all() -> Self {
        Self::default()
    }

    /// Restrict emission to the named objects.
    pub fn with_allow_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn selects(&self, object_name: &str) -> bool {
        self.allow.is_empty() || self.allow.contains(object_name)
    }
}

/// Append-only text producer for generated type declarations.
///
/// Performs no validation of parameter uniqueness within an object:
/// duplicate parameter names in a malformed schema pass through as
/// duplicate field declarations.
pub struct Emitter<W: Write> {
    out: W,
    config: EmitterConfig,
    objects_emitted: usize,
    parameters_emitted: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, config: EmitterConfig) -> Self {
        Self {
            out,
            config,
            objects_emitted: 0,
            parameters_emitted: 0,
        }
    }

    /// Emit the prologue plus one type per selected object, walking every
    /// model in document order.
    pub fn emit_document(&mut self, document: &Document) -> io::Result<()> {
        self.emit_prologue()?;
        for model in &document.model {
            log::debug!("walking model '{}' ({} objects)", model.name, model.object.len());
            for object in &model.object {
                if !self.config.selects(&object.name) {
                    continue;
                }
                self.emit_object(object)?;
            }
        }
        Ok(())
    }

    pub fn objects_emitted(&self) -> usize {
        self.objects_emitted
    }

    pub fn parameters_emitted(&self) -> usize {
        self.parameters_emitted
    }

    fn emit_prologue(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "// GENERATED BY dm-codegen. DO NOT EDIT; CHANGES WILL BE OVERWRITTEN."
        )?;
        writeln!(self.out, "//")?;
        writeln!(
            self.out,
            "// Data-holder types for device-model objects defined in TR-106 schemas."
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "use dm_agent_base::export::ParamValue;")?;
        writeln!(self.out)
    }

    fn emit_object(&mut self, object: &SchemaObject) -> io::Result<()> {
        let type_name = mangle(&object.name);

        writeln!(self.out, "/// Data holder for `{}`.", object.name)?;
        writeln!(self.out, "#[allow(non_camel_case_types, non_snake_case)]")?;
        writeln!(self.out, "#[derive(Debug, Clone)]")?;
        writeln!(self.out, "pub struct {} {{", type_name)?;
        for param in &object.parameter {
            writeln!(self.out, "    pub p_{}: ParamValue,", param.name)?;
        }
        writeln!(self.out, "}}")?;
        writeln!(self.out)?;

        writeln!(self.out, "impl Default for {} {{", type_name)?;
        writeln!(self.out, "    fn default() -> Self {{")?;
        writeln!(self.out, "        Self {{")?;
        for param in &object.parameter {
            writeln!(
                self.out,
                "            p_{}: {},",
                param.name,
                default_expr(param)
            )?;
            self.parameters_emitted += 1;
        }
        writeln!(self.out, "        }}")?;
        writeln!(self.out, "    }}")?;
        writeln!(self.out, "}}")?;
        writeln!(self.out)?;

        self.objects_emitted += 1;
        Ok(())
    }
}

/// Default-value expression for one parameter.
///
/// Precedence: no `<default>` node emits the unset sentinel; otherwise the
/// syntax kind decides the conversion. String literals land between the
/// quotes verbatim, embedded quote characters included (see DESIGN.md);
/// non-boolean, non-string literals are pasted unconverted, so a literal a
/// malformed schema declares as numeric flows through into malformed output.
fn default_expr(param: &SchemaParameter) -> String {
    let Some(literal) = param.syntax.default_literal() else {
        return "ParamValue::Unset".to_string();
    };

    match param.syntax.kind() {
        SyntaxKind::Boolean => format!("ParamValue::Bool({})", literal == "true"),
        SyntaxKind::String => format!("ParamValue::Str(\"{}\".to_string())", literal),
        SyntaxKind::Other => format!("ParamValue::Num({})", literal),
    }
}
