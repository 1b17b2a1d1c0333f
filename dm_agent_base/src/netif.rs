//! Per-interface state queries and status derivation.
//!
//! Network-stack configuration primitives are an external collaborator;
//! bindings consume them through the `NetInterface` trait. A sysfs-backed
//! implementation is provided for Linux hosts, with the root directory
//! injected so tests can point it at a fixture tree.

use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Link-layer facts for one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkInfo {
    pub speed_mbps: u32,
    pub full_duplex: bool,
    pub autoneg: bool,
    pub carrier: bool,
}

/// Opaque per-interface query object.
pub trait NetInterface {
    /// Administrative up/down state.
    fn is_up(&self) -> bool;

    /// Hardware address, `aa:bb:cc:dd:ee:ff`.
    fn mac(&self) -> String;

    fn link_info(&self) -> LinkInfo;
}

/// Externally visible interface status, derived from the administrative
/// state and link carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfStatus {
    Up,
    Dormant,
    Down,
}

impl IfStatus {
    /// Up iff administratively up with carrier; Dormant iff
    /// administratively up without carrier; Down otherwise.
    pub fn derive(admin_up: bool, carrier: bool) -> Self {
        match (admin_up, carrier) {
            (true, true) => IfStatus::Up,
            (true, false) => IfStatus::Dormant,
            (false, _) => IfStatus::Down,
        }
    }
}

impl fmt::Display for IfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IfStatus::Up => "Up",
            IfStatus::Dormant => "Dormant",
            IfStatus::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// `NetInterface` over `/sys/class/net/<ifname>/`.
///
/// Reads re-query sysfs on every call; unreadable attributes degrade to
/// down/zeroed values rather than failing the read.
#[derive(Debug, Clone)]
pub struct SysfsInterface {
    root: PathBuf,
    ifname: String,
}

impl SysfsInterface {
    pub fn new(ifname: impl Into<String>) -> Self {
        Self::with_root(PathBuf::from("/sys/class/net"), ifname)
    }

    pub fn with_root(root: PathBuf, ifname: impl Into<String>) -> Self {
        Self {
            root,
            ifname: ifname.into(),
        }
    }

    fn read_attr(&self, attr: &str) -> Option<String> {
        let path = self.root.join(&self.ifname).join(attr);
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
    }
}

impl NetInterface for SysfsInterface {
    fn is_up(&self) -> bool {
        // operstate is "up", "down", "dormant", "unknown", ...
        matches!(self.read_attr("operstate").as_deref(), Some("up") | Some("dormant"))
    }

    fn mac(&self) -> String {
        self.read_attr("address").unwrap_or_default()
    }

    fn link_info(&self) -> LinkInfo {
        let speed_mbps = self
            .read_attr("speed")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let full_duplex = self.read_attr("duplex").as_deref() == Some("full");
        let carrier = self.read_attr("carrier").as_deref() == Some("1");
        LinkInfo {
            speed_mbps,
            full_duplex,
            // sysfs does not expose autonegotiation; assume on for
            // anything that reports a link speed.
            autoneg: speed_mbps > 0,
            carrier,
        }
    }
}
