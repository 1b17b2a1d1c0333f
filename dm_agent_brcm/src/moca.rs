//! MoCA interface binding over `mocactl` and an interface query object.
//!
//! Status derives from the administrative state and link carrier; node
//! facts come from `mocactl show --status`. The firmware version degrades
//! to `"0"` when the tool fails; node id and network-coordinator reads
//! have no sane fallback and propagate the failure.

use dm_agent_base::command::CommandRunner;
use dm_agent_base::export::{Export, ExportError, ExportSet, ParamValue, ParameterExports};
use dm_agent_base::netif::{IfStatus, NetInterface};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// MoCA interface parameters this binding implements.
const MOCA_PARAMETERS: &[&str] = &[
    "Name",
    "Upstream",
    "LowerLayers",
    "MACAddress",
    "Status",
    "FirmwareVersion",
    "NetworkCoordinator",
    "NodeID",
    "PrivacyEnabled",
    "QAM256Capable",
];

#[derive(Debug, Clone)]
pub struct MocaConfig {
    pub mocactl: PathBuf,
    pub timeout: Duration,
}

impl Default for MocaConfig {
    fn default() -> Self {
        Self {
            mocactl: PathBuf::from("/usr/bin/mocactl"),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Live data holder for one MoCA interface.
pub struct MocaInterface<N: NetInterface> {
    ifname: String,
    upstream: bool,
    netif: N,
    tool: String,
    runner: CommandRunner,
    exports: ExportSet,
}

fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SW Version\s*:\s*(\S+)").expect("hard-coded pattern"))
}

fn coordinator_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Network Coordinator\s*:\s*(\d+)").expect("hard-coded pattern"))
}

fn node_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Node ID\s*:\s*(\d+)").expect("hard-coded pattern"))
}

impl<N: NetInterface> MocaInterface<N> {
    pub fn new(config: MocaConfig, ifname: impl Into<String>, upstream: bool, netif: N) -> Self {
        let tool = config.mocactl.display().to_string();
        let mut runner = CommandRunner::with_timeout(config.timeout);
        runner.allow_command(&tool);

        // This firmware reports neither privacy state nor QAM capability.
        let mut exports = ExportSet::new(MOCA_PARAMETERS);
        exports.withdraw("PrivacyEnabled");
        exports.withdraw("QAM256Capable");

        Self {
            ifname: ifname.into(),
            upstream,
            netif,
            tool,
            runner,
            exports,
        }
    }

    pub fn name(&self) -> &str {
        &self.ifname
    }

    pub fn upstream(&self) -> bool {
        self.upstream
    }

    pub fn mac_address(&self) -> String {
        self.netif.mac()
    }

    pub fn status(&self) -> IfStatus {
        IfStatus::derive(self.netif.is_up(), self.netif.link_info().carrier)
    }

    fn node_status(&self) -> Result<String, ExportError> {
        Ok(self.runner.run(&self.tool, &["show", "--status"])?)
    }

    /// Node firmware version; `"0"` when the tool fails or reports none.
    pub fn firmware_version(&self) -> String {
        let out = match self.node_status() {
            Ok(out) => out,
            Err(error) => {
                log::warn!("firmware version unavailable: {}", error);
                return "0".to_string();
            }
        };
        match version_pattern().captures(&out) {
            Some(caps) => caps[1].to_string(),
            None => "0".to_string(),
        }
    }

    /// Node id of the current network coordinator. No sane fallback, so
    /// tool failure propagates.
    pub fn network_coordinator(&self) -> Result<i64, ExportError> {
        let out = self.node_status()?;
        coordinator_pattern()
            .captures(&out)
            .and_then(|caps| caps[1].parse().ok())
            .ok_or_else(|| {
                ExportError::source_failure("NetworkCoordinator", "not present in node status")
            })
    }

    /// This node's id on the MoCA network. Propagates tool failure.
    pub fn node_id(&self) -> Result<i64, ExportError> {
        let out = self.node_status()?;
        node_id_pattern()
            .captures(&out)
            .and_then(|caps| caps[1].parse().ok())
            .ok_or_else(|| ExportError::source_failure("NodeID", "not present in node status"))
    }
}

impl<N: NetInterface> ParameterExports for MocaInterface<N> {
    fn exports(&self) -> &ExportSet {
        &self.exports
    }

    fn param(&self, name: &str) -> Result<Export<ParamValue>, ExportError> {
        self.exports.check(name)?;
        let value = match name {
            "Name" => Export::Value(ParamValue::str(self.name())),
            "Upstream" => Export::Value(ParamValue::Bool(self.upstream())),
            "LowerLayers" => Export::Value(ParamValue::str("")),
            "MACAddress" => Export::Value(ParamValue::str(self.mac_address())),
            "Status" => Export::Value(ParamValue::str(self.status().to_string())),
            "FirmwareVersion" => Export::Value(ParamValue::str(self.firmware_version())),
            "NetworkCoordinator" => Export::Value(ParamValue::Num(self.network_coordinator()?)),
            "NodeID" => Export::Value(ParamValue::Num(self.node_id()?)),
            other => {
                return Err(ExportError::UnknownParameter {
                    name: other.to_string(),
                })
            }
        };
        Ok(value)
    }
}
