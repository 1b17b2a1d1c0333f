//! # dm_agent_brcm
//!
//! Broadcom-hardware bindings for the parameter-export contract: a
//! wireless radio driven by the `wl` diagnostic tool, a MoCA interface
//! driven by `mocactl`, and interface statistics read from the kernel's
//! netdev counters.

// Module declarations
pub mod ifstats;
pub mod moca;
pub mod wifi;

// Re-export key types
pub use ifstats::MocaInterfaceStats;
pub use moca::{MocaConfig, MocaInterface};
pub use wifi::{WlRadio, WlRadioConfig};
