//! TR-181 interface statistics over the kernel netdev counters.
//!
//! One exported attribute per Stats parameter. The kernel file never
//! carries broadcast or transmit-multicast columns, so those attributes
//! resolve to the absent marker; they are declared, implemented, and have
//! nothing to report, which is different from being withdrawn.

use dm_agent_base::export::{Export, ExportError, ExportSet, ParamValue, ParameterExports};
use dm_agent_base::netdev::{NetdevCounters, NetdevSource};

const STATS_PARAMETERS: &[&str] = &[
    "BroadcastPacketsReceived",
    "BroadcastPacketsSent",
    "BytesReceived",
    "BytesSent",
    "DiscardPacketsReceived",
    "DiscardPacketsSent",
    "ErrorsReceived",
    "ErrorsSent",
    "MulticastPacketsReceived",
    "MulticastPacketsSent",
    "PacketsReceived",
    "PacketsSent",
    "UnicastPacketsReceived",
    "UnicastPacketsSent",
    "UnknownProtoPacketsReceived",
];

/// Live statistics holder for one interface.
pub struct MocaInterfaceStats {
    ifname: String,
    source: NetdevSource,
    exports: ExportSet,
}

impl MocaInterfaceStats {
    pub fn new(ifname: impl Into<String>, source: NetdevSource) -> Self {
        Self {
            ifname: ifname.into(),
            source,
            exports: ExportSet::new(STATS_PARAMETERS),
        }
    }

    fn counters(&self) -> Result<NetdevCounters, ExportError> {
        Ok(self.source.counters_for(&self.ifname)?)
    }
}

impl ParameterExports for MocaInterfaceStats {
    fn exports(&self) -> &ExportSet {
        &self.exports
    }

    fn param(&self, name: &str) -> Result<Export<ParamValue>, ExportError> {
        self.exports.check(name)?;

        // Columns /proc/net/dev never reports.
        if matches!(
            name,
            "BroadcastPacketsReceived"
                | "BroadcastPacketsSent"
                | "MulticastPacketsSent"
                | "UnknownProtoPacketsReceived"
        ) {
            return Ok(Export::Absent);
        }

        let c = self.counters()?;
        let value = match name {
            "BytesReceived" => c.rx_bytes,
            "BytesSent" => c.tx_bytes,
            "DiscardPacketsReceived" => c.rx_drop,
            "DiscardPacketsSent" => c.tx_drop,
            "ErrorsReceived" => c.rx_errs,
            "ErrorsSent" => c.tx_errs,
            "MulticastPacketsReceived" => c.rx_multicast,
            "PacketsReceived" => c.rx_packets,
            "PacketsSent" => c.tx_packets,
            "UnicastPacketsReceived" => c.rx_packets.saturating_sub(c.rx_multicast),
            "UnicastPacketsSent" => c.tx_packets,
            other => {
                return Err(ExportError::UnknownParameter {
                    name: other.to_string(),
                })
            }
        };
        Ok(Export::Value(ParamValue::Num(value as i64)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIXTURE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  foo0:       1     100    9    4    0    0    0    8        9      10   12   11    0     0       0          0
";

    fn fixture_stats(ifname: &str) -> (NamedTempFile, MocaInterfaceStats) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let stats =
            MocaInterfaceStats::new(ifname, NetdevSource::with_path(file.path().to_path_buf()));
        (file, stats)
    }

    fn num(stats: &MocaInterfaceStats, name: &str) -> Export<ParamValue> {
        stats.param(name).unwrap()
    }

    #[test]
    fn test_stats_resolve_from_fixture() {
        let (_file, stats) = fixture_stats("foo0");
        stats.validate_exports().unwrap();

        assert_eq!(num(&stats, "BytesReceived"), Export::Value(ParamValue::Num(1)));
        assert_eq!(num(&stats, "BytesSent"), Export::Value(ParamValue::Num(9)));
        assert_eq!(
            num(&stats, "DiscardPacketsReceived"),
            Export::Value(ParamValue::Num(4))
        );
        assert_eq!(
            num(&stats, "DiscardPacketsSent"),
            Export::Value(ParamValue::Num(11))
        );
        assert_eq!(num(&stats, "ErrorsReceived"), Export::Value(ParamValue::Num(9)));
        assert_eq!(num(&stats, "ErrorsSent"), Export::Value(ParamValue::Num(12)));
        assert_eq!(
            num(&stats, "MulticastPacketsReceived"),
            Export::Value(ParamValue::Num(8))
        );
        assert_eq!(
            num(&stats, "PacketsReceived"),
            Export::Value(ParamValue::Num(100))
        );
        assert_eq!(num(&stats, "PacketsSent"), Export::Value(ParamValue::Num(10)));
        assert_eq!(
            num(&stats, "UnicastPacketsReceived"),
            Export::Value(ParamValue::Num(92))
        );
        assert_eq!(
            num(&stats, "UnicastPacketsSent"),
            Export::Value(ParamValue::Num(10))
        );
    }

    #[test]
    fn test_unreported_columns_are_absent_not_errors() {
        let (_file, stats) = fixture_stats("foo0");
        for name in [
            "BroadcastPacketsReceived",
            "BroadcastPacketsSent",
            "MulticastPacketsSent",
            "UnknownProtoPacketsReceived",
        ] {
            assert_eq!(stats.param(name).unwrap(), Export::Absent, "{name}");
        }
    }

    #[test]
    fn test_nonexistent_interface_fails_validation() {
        let (_file, stats) = fixture_stats("doesnotexist0");

        match stats.param("ErrorsReceived") {
            Err(ExportError::Netdev(_)) => {}
            other => panic!("expected Netdev error, got {other:?}"),
        }

        let err = stats.validate_exports().unwrap_err();
        // Every counter-backed attribute fails; the absent ones still resolve.
        assert_eq!(err.failures.len(), 11);
    }
}
