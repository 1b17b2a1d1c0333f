//! `/proc/net/dev` counter source.
//!
//! The kernel's network-device statistics file carries sixteen columns
//! per interface: eight receive (bytes, packets, errs, drop, fifo, frame,
//! compressed, multicast) and eight transmit (bytes, packets, errs, drop,
//! fifo, colls, carrier, compressed). The file is re-read on every query;
//! staleness is bounded by the caller's query cycle, not by a cache here.

use std::fs;
use std::path::PathBuf;

/// One interface's receive/transmit columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetdevCounters {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errs: u64,
    pub rx_drop: u64,
    pub rx_fifo: u64,
    pub rx_frame: u64,
    pub rx_compressed: u64,
    pub rx_multicast: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errs: u64,
    pub tx_drop: u64,
    pub tx_fifo: u64,
    pub tx_colls: u64,
    pub tx_carrier: u64,
    pub tx_compressed: u64,
}

/// Counter source with a constructor-injected file path, so tests can
/// point it at a fixture instead of the live kernel file.
#[derive(Debug, Clone)]
pub struct NetdevSource {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum NetdevError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interface '{ifname}' not present in netdev statistics")]
    InterfaceNotFound { ifname: String },

    #[error("Malformed netdev line for '{ifname}': expected 16 columns, found {columns}")]
    Malformed { ifname: String, columns: usize },
}

impl NetdevSource {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from("/proc/net/dev"))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the statistics file and return the columns for one interface.
    pub fn counters_for(&self, ifname: &str) -> Result<NetdevCounters, NetdevError> {
        let text = fs::read_to_string(&self.path).map_err(|source| NetdevError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        for line in text.lines() {
            let Some((name, columns)) = line.split_once(':') else {
                continue; // header lines carry no colon-delimited iface
            };
            if name.trim() != ifname {
                continue;
            }

            let fields: Vec<u64> = columns
                .split_whitespace()
                .map(|f| f.parse().unwrap_or(0))
                .collect();
            if fields.len() != 16 {
                return Err(NetdevError::Malformed {
                    ifname: ifname.to_string(),
                    columns: fields.len(),
                });
            }

            return Ok(NetdevCounters {
                rx_bytes: fields[0],
                rx_packets: fields[1],
                rx_errs: fields[2],
                rx_drop: fields[3],
                rx_fifo: fields[4],
                rx_frame: fields[5],
                rx_compressed: fields[6],
                rx_multicast: fields[7],
                tx_bytes: fields[8],
                tx_packets: fields[9],
                tx_errs: fields[10],
                tx_drop: fields[11],
                tx_fifo: fields[12],
                tx_colls: fields[13],
                tx_carrier: fields[14],
                tx_compressed: fields[15],
            });
        }

        Err(NetdevError::InterfaceNotFound {
            ifname: ifname.to_string(),
        })
    }
}

impl Default for NetdevSource {
    fn default() -> Self {
        Self::new()
    }
}
