//! Parameter-export contract.
//!
//! Every live data-holder type represents each schema-declared parameter
//! as a named attribute. Attributes a binding deliberately does not
//! implement on this hardware/firmware are withdrawn from the export set
//! at construction time; withdrawal is one-way for the instance lifetime.
//! Reading a withdrawn attribute fails with `ExportError::NotExported`,
//! which callers can tell apart from `Export::Absent` — the normal,
//! non-error outcome for a value the live source legitimately does not
//! report.
//!
//! Computed attributes are resolved lazily: every read re-invokes the
//! underlying query. A per-read caching layer is a separately documented
//! future concern, not silently introduced here.

mod error;

pub use error::{ExportError, ValidationError};

use serde::Serialize;
use std::collections::HashSet;

/// A typed parameter value, the currency shared between generated
/// data-holder defaults and live attribute reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// No schema default and no live value assigned yet.
    Unset,
    Bool(bool),
    Str(String),
    Num(i64),
}

impl ParamValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }
}

/// Outcome of resolving a live attribute.
///
/// `Absent` means "this hardware has nothing to say about X" and is a
/// normal result; it is not an error and carries no sentinel value.
#[derive(Debug, Clone, PartialEq)]
pub enum Export<T> {
    Value(T),
    Absent,
}

impl<T> Export<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Export<U> {
        match self {
            Export::Value(v) => Export::Value(f(v)),
            Export::Absent => Export::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Export::Absent)
    }

    pub fn value(self) -> Option<T> {
        match self {
            Export::Value(v) => Some(v),
            Export::Absent => None,
        }
    }
}

/// The set of attribute names currently considered live and declared on
/// one instance.
///
/// Declared names come from the schema object; withdrawal removes a name
/// the binding never implements. There is deliberately no re-add
/// operation.
#[derive(Debug, Clone)]
pub struct ExportSet {
    declared: Vec<&'static str>,
    withdrawn: HashSet<&'static str>,
}

impl ExportSet {
    pub fn new(declared: &[&'static str]) -> Self {
        Self {
            declared: declared.to_vec(),
            withdrawn: HashSet::new(),
        }
    }

    /// Withdraw a declared attribute this binding does not implement.
    /// One-way per instance lifetime.
    pub fn withdraw(&mut self, name: &'static str) {
        self.withdrawn.insert(name);
    }

    pub fn is_withdrawn(&self, name: &str) -> bool {
        self.withdrawn.contains(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.iter().any(|d| *d == name)
    }

    /// Gate an attribute read. Withdrawn names fail with `NotExported`,
    /// undeclared names with `UnknownParameter`.
    pub fn check(&self, name: &str) -> Result<(), ExportError> {
        if self.is_withdrawn(name) {
            return Err(ExportError::NotExported {
                name: name.to_string(),
            });
        }
        if !self.is_declared(name) {
            return Err(ExportError::UnknownParameter {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Declared-minus-withdrawn, in declaration order.
    pub fn exported(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declared
            .iter()
            .copied()
            .filter(move |name| !self.withdrawn.contains(name))
    }
}

/// The behavioral contract every live data-holder type satisfies.
///
/// Attribute reads on the same instance are independent and idempotent
/// with respect to each other; two reads may observe different live-system
/// snapshots, which is accepted staleness rather than a race to guard.
pub trait ParameterExports {
    fn exports(&self) -> &ExportSet;

    /// Resolve one attribute by name. Implementations are expected to call
    /// `self.exports().check(name)` before dispatching.
    fn param(&self, name: &str) -> Result<Export<ParamValue>, ExportError>;

    /// Self-check, invoked once per instance after construction: resolve
    /// every attribute currently in the export set and fail loudly if any
    /// declared, non-withdrawn attribute cannot be resolved.
    fn validate_exports(&self) -> Result<(), ValidationError> {
        let mut failures = Vec::new();
        for name in self.exports().exported() {
            if let Err(error) = self.param(name) {
                failures.push((name.to_string(), error));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { failures })
        }
    }
}
