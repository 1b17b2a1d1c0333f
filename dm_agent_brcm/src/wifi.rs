//! Wireless radio binding over the Broadcom `wl` diagnostic tool.
//!
//! Every accessor re-invokes `wl` with a fixed argument vector and
//! matches its output; nothing is cached between reads. Attributes with a
//! sane fallback degrade on command failure (channel 0, empty SSID,
//! zero BSSID) instead of propagating it.

use dm_agent_base::command::CommandRunner;
use dm_agent_base::counters::{parse_counters, CounterValue};
use dm_agent_base::export::{Export, ExportError, ExportSet, ParamValue, ParameterExports};
use dm_agent_base::ranges::contiguous_ranges;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

const ZERO_BSSID: &str = "00:00:00:00:00:00";

/// WLANConfiguration parameters this binding implements.
const WL_PARAMETERS: &[&str] = &[
    "Channel",
    "SSID",
    "BSSID",
    "PossibleChannels",
    "Standard",
    "TotalBytesReceived",
    "TotalBytesSent",
    "TotalPacketsReceived",
    "TotalPacketsSent",
    "UAPSDSupported",
    "WMMSupported",
    "UAPSDEnable",
    "WMMEnable",
];

/// Radio tool configuration, injected at construction so tests can point
/// the binding at a stub executable.
#[derive(Debug, Clone)]
pub struct WlRadioConfig {
    pub tool: PathBuf,
    pub timeout: Duration,
}

impl Default for WlRadioConfig {
    fn default() -> Self {
        Self {
            tool: PathBuf::from("/usr/bin/wl"),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Live data holder for one Broadcom wireless radio.
pub struct WlRadio {
    tool: String,
    runner: CommandRunner,
    exports: ExportSet,
}

fn channel_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"current mac channel\s+(\d+)").expect("hard-coded pattern"))
}

fn ssid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^Current SSID: "(.*)""#).expect("hard-coded pattern"))
}

fn bssid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^((?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2})").expect("hard-coded pattern")
    })
}

impl WlRadio {
    pub fn new(config: WlRadioConfig) -> Self {
        let tool = config.tool.display().to_string();
        let mut runner = CommandRunner::with_timeout(config.timeout);
        runner.allow_command(&tool);

        // This chipset reports UAPSD/WMM as unsupported; the Enable knobs
        // are never implemented here.
        let mut exports = ExportSet::new(WL_PARAMETERS);
        exports.withdraw("UAPSDEnable");
        exports.withdraw("WMMEnable");

        Self {
            tool,
            runner,
            exports,
        }
    }

    fn invoke(&self, args: &[&str]) -> Option<String> {
        match self.runner.run(&self.tool, args) {
            Ok(out) => Some(out),
            Err(error) => {
                log::warn!("'{}' {:?} failed: {}", self.tool, args, error);
                None
            }
        }
    }

    /// Current radio channel; 0 when the tool fails or reports none.
    pub fn channel(&self) -> i64 {
        let Some(out) = self.invoke(&["channel"]) else {
            return 0;
        };
        for line in out.lines() {
            if let Some(caps) = channel_pattern().captures(line) {
                if let Ok(channel) = caps[1].parse() {
                    return channel;
                }
            }
        }
        0
    }

    /// Current SSID; empty when the tool fails or reports none.
    pub fn ssid(&self) -> String {
        let Some(out) = self.invoke(&["ssid"]) else {
            return String::new();
        };
        for line in out.lines() {
            if let Some(caps) = ssid_pattern().captures(line) {
                return caps[1].to_string();
            }
        }
        String::new()
    }

    /// Current BSSID; the all-zero MAC when the tool fails or reports none.
    pub fn bssid(&self) -> String {
        let Some(out) = self.invoke(&["bssid"]) else {
            return ZERO_BSSID.to_string();
        };
        for line in out.lines() {
            if let Some(caps) = bssid_pattern().captures(line) {
                return caps[1].to_string();
            }
        }
        ZERO_BSSID.to_string()
    }

    /// Supported channels as a contiguous-range string.
    ///
    /// An empty channel list (tool failure included) is the explicit
    /// "unsupported" outcome, guarding the range formatter's non-empty
    /// precondition.
    pub fn possible_channels(&self) -> Export<String> {
        let Some(out) = self.invoke(&["channels"]) else {
            return Export::Absent;
        };
        let channels: Vec<u32> = out
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        if channels.is_empty() {
            Export::Absent
        } else {
            Export::Value(contiguous_ranges(&channels))
        }
    }

    fn counters(&self) -> HashMap<String, CounterValue> {
        match self.invoke(&["counters"]) {
            Some(out) => parse_counters(&out),
            None => HashMap::new(),
        }
    }

    fn counter(&self, key: &str) -> i64 {
        self.counters()
            .get(key)
            .and_then(CounterValue::as_number)
            .unwrap_or(0)
    }

    pub fn total_bytes_received(&self) -> i64 {
        self.counter("rxbyte")
    }

    pub fn total_bytes_sent(&self) -> i64 {
        self.counter("txbyte")
    }

    pub fn total_packets_received(&self) -> i64 {
        self.counter("rxframe")
    }

    pub fn total_packets_sent(&self) -> i64 {
        self.counter("txframe")
    }
}

impl ParameterExports for WlRadio {
    fn exports(&self) -> &ExportSet {
        &self.exports
    }

    fn param(&self, name: &str) -> Result<Export<ParamValue>, ExportError> {
        self.exports.check(name)?;
        let value = match name {
            "Channel" => Export::Value(ParamValue::Num(self.channel())),
            "SSID" => Export::Value(ParamValue::str(self.ssid())),
            "BSSID" => Export::Value(ParamValue::str(self.bssid())),
            "PossibleChannels" => self.possible_channels().map(ParamValue::Str),
            "Standard" => Export::Value(ParamValue::str("n")),
            "TotalBytesReceived" => Export::Value(ParamValue::Num(self.total_bytes_received())),
            "TotalBytesSent" => Export::Value(ParamValue::Num(self.total_bytes_sent())),
            "TotalPacketsReceived" => {
                Export::Value(ParamValue::Num(self.total_packets_received()))
            }
            "TotalPacketsSent" => Export::Value(ParamValue::Num(self.total_packets_sent())),
            "UAPSDSupported" | "WMMSupported" => Export::Value(ParamValue::Bool(false)),
            other => {
                return Err(ExportError::UnknownParameter {
                    name: other.to_string(),
                })
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    const WL_STUB: &str = r#"#!/bin/sh
case "$1" in
  channel)  echo "current mac channel 11" ;;
  ssid)     echo 'Current SSID: "MyNetwork"' ;;
  bssid)    echo "01:23:45:67:89:ab" ;;
  channels) echo "1 2 3 4 5 11" ;;
  counters) printf 'rxbyte 123\ntxbyte 456\nrxframe 12\ntxframe 34\ntxqfull\n' ;;
esac
"#;

    fn write_stub(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn stub_radio(dir: &TempDir, body: &str) -> WlRadio {
        let tool = write_stub(dir, "wl", body);
        WlRadio::new(WlRadioConfig {
            tool,
            timeout: Duration::from_secs(5),
        })
    }

    #[test]
    fn test_channel_ssid_bssid_from_tool_output() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, WL_STUB);

        assert_eq!(radio.channel(), 11);
        assert_eq!(radio.ssid(), "MyNetwork");
        assert_eq!(radio.bssid(), "01:23:45:67:89:ab");
    }

    #[test]
    fn test_possible_channels_compressed() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, WL_STUB);
        assert_eq!(
            radio.possible_channels(),
            Export::Value("1-5,11".to_string())
        );
    }

    #[test]
    fn test_counter_totals() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, WL_STUB);

        assert_eq!(radio.total_bytes_received(), 123);
        assert_eq!(radio.total_bytes_sent(), 456);
        assert_eq!(radio.total_packets_received(), 12);
        assert_eq!(radio.total_packets_sent(), 34);
    }

    #[test]
    fn test_tool_failure_falls_back_per_attribute() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, "#!/bin/sh\nexit 1\n");

        assert_eq!(radio.channel(), 0);
        assert_eq!(radio.ssid(), "");
        assert_eq!(radio.bssid(), ZERO_BSSID);
        assert_eq!(radio.possible_channels(), Export::Absent);
        assert_eq!(radio.total_bytes_received(), 0);
    }

    #[test]
    fn test_withdrawn_attributes_fail_with_not_exported() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, WL_STUB);

        for name in ["UAPSDEnable", "WMMEnable"] {
            match radio.param(name) {
                Err(ExportError::NotExported { .. }) => {}
                other => panic!("expected NotExported for {name}, got {other:?}"),
            }
        }
        assert_eq!(
            radio.param("WMMSupported").unwrap(),
            Export::Value(ParamValue::Bool(false))
        );
    }

    #[test]
    fn test_validate_exports_with_healthy_tool() {
        let dir = TempDir::new().unwrap();
        let radio = stub_radio(&dir, WL_STUB);
        radio.validate_exports().unwrap();
    }

    #[test]
    fn test_each_read_reinvokes_the_tool() {
        let dir = TempDir::new().unwrap();
        // The stub appends to a side file on every invocation.
        let marker = dir.path().join("calls");
        let body = format!(
            "#!/bin/sh\necho x >> {}\necho \"current mac channel 3\"\n",
            marker.display()
        );
        let radio = stub_radio(&dir, &body);

        assert_eq!(radio.channel(), 3);
        assert_eq!(radio.channel(), 3);
        let calls = fs::read_to_string(&marker).unwrap();
        assert_eq!(calls.lines().count(), 2);
    }
}
