//! Heterogeneous counter-line parsing.
//!
//! Vendor diagnostic tools mix three line shapes for statistics in one
//! dump:
//!
//! ```text
//! rxuflo: 1 2 3 4 5 6     (label, colon, number sequence)
//! rxfilter 1              (label, single number, no colon)
//! d11_txretrie            (bare label, no numbers)
//! ```
//!
//! The grammar first isolates candidate `label(:)? (numbers)*` groups,
//! then classifies each group against the three shapes in order, first
//! match wins. Text matching none of the shapes is silently dropped.
//! The mapping is rebuilt on every query; nothing is cached across calls.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Classified value for one counter label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterValue {
    /// `label: v1 v2 ...` - the sequence of number-strings.
    List(Vec<String>),
    /// `label N` - the single number-string.
    Scalar(String),
    /// Bare label; renders as the sentinel `"0"`.
    Zero,
}

impl CounterValue {
    /// Numeric view of the counter: a scalar parses directly, a list
    /// contributes its first element, the zero sentinel is 0.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            CounterValue::Scalar(s) => s.parse().ok(),
            CounterValue::List(values) => values.first()?.parse().ok(),
            CounterValue::Zero => Some(0),
        }
    }
}

impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterValue::List(values) => write!(f, "{}", values.join(" ")),
            CounterValue::Scalar(s) => write!(f, "{}", s),
            CounterValue::Zero => write!(f, "0"),
        }
    }
}

fn group_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+:?(?: \d+)*").expect("hard-coded pattern"))
}

fn list_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+): (.+)$").expect("hard-coded pattern"))
}

fn scalar_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+) (\d+)$").expect("hard-coded pattern"))
}

fn bare_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)$").expect("hard-coded pattern"))
}

/// Fold a raw statistics dump into a label -> value mapping.
///
/// Labels are lowercased before insertion; a later occurrence of a label
/// overwrites an earlier one.
pub fn parse_counters(text: &str) -> HashMap<String, CounterValue> {
    let mut counters = HashMap::new();

    for group in group_pattern().find_iter(text) {
        let group = group.as_str();

        if let Some(caps) = list_pattern().captures(group) {
            let values = caps[2].split_whitespace().map(str::to_string).collect();
            counters.insert(caps[1].to_lowercase(), CounterValue::List(values));
        } else if let Some(caps) = scalar_pattern().captures(group) {
            counters.insert(caps[1].to_lowercase(), CounterValue::Scalar(caps[2].to_string()));
        } else if let Some(caps) = bare_pattern().captures(group) {
            counters.insert(caps[1].to_lowercase(), CounterValue::Zero);
        }
    }

    counters
}
