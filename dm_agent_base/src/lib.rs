//! # dm_agent_base
//!
//! Runtime machinery for device-model data holders: the parameter-export
//! contract (declared vs. withdrawn attributes, two-tier absence,
//! construction-time self-validation) plus the collection primitives live
//! bindings are built from (whitelisted command invocation, counter-line
//! parsing, contiguous range formatting, interface state queries).

// Module declarations
pub mod command;
pub mod counters;
pub mod export;
pub mod netdev;
pub mod netif;
pub mod ranges;

// Re-export key types for binding crates
pub use command::{CommandError, CommandRunner};
pub use counters::{parse_counters, CounterValue};
pub use export::{Export, ExportError, ExportSet, ParamValue, ParameterExports, ValidationError};
pub use netdev::{NetdevCounters, NetdevError, NetdevSource};
pub use netif::{IfStatus, LinkInfo, NetInterface, SysfsInterface};
pub use ranges::contiguous_ranges;
