//! # dm-report
//!
//! Constructs the Broadcom bindings for one interface, runs the
//! construction-time export self-check, and prints every resolved
//! parameter as JSON. Absent values render as `null`; withdrawn
//! parameters do not appear at all.

use clap::Parser;
use dm_agent_base::export::{Export, ParameterExports};
use dm_agent_base::netdev::NetdevSource;
use dm_agent_base::netif::SysfsInterface;
use dm_agent_brcm::{MocaConfig, MocaInterface, MocaInterfaceStats, WlRadio, WlRadioConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "dm-report",
    version,
    about = "Resolve and print device-model parameters for one interface"
)]
struct Args {
    /// Interface to report on (e.g. moca0)
    #[arg(long)]
    iface: String,

    /// Whether the interface faces the operator network
    #[arg(long)]
    upstream: bool,

    /// Netdev statistics file
    #[arg(long, default_value = "/proc/net/dev")]
    netdev: PathBuf,

    /// Wireless diagnostic tool
    #[arg(long, default_value = "/usr/bin/wl")]
    wl: PathBuf,

    /// MoCA diagnostic tool
    #[arg(long, default_value = "/usr/bin/mocactl")]
    mocactl: PathBuf,

    /// Command timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let timeout = Duration::from_secs(args.timeout);

    let netif = SysfsInterface::new(&args.iface);
    let moca = MocaInterface::new(
        MocaConfig {
            mocactl: args.mocactl,
            timeout,
        },
        args.iface.clone(),
        args.upstream,
        netif,
    );
    let stats = MocaInterfaceStats::new(&args.iface, NetdevSource::with_path(args.netdev));
    let radio = WlRadio::new(WlRadioConfig {
        tool: args.wl,
        timeout,
    });

    let bindings: [(&str, &dyn ParameterExports); 3] =
        [("Interface", &moca), ("Stats", &stats), ("Radio", &radio)];

    let mut validation_failed = false;
    let mut report = serde_json::Map::new();

    for (label, binding) in bindings {
        if let Err(error) = binding.validate_exports() {
            eprintln!("dm-report: {} export validation failed: {}", label, error);
            validation_failed = true;
            continue;
        }

        let mut section = serde_json::Map::new();
        for name in binding.exports().exported() {
            let value = match binding.param(name) {
                Ok(Export::Value(v)) => serde_json::to_value(v)?,
                Ok(Export::Absent) => serde_json::Value::Null,
                // validate_exports passed, but live state may have moved
                // between the check and this read.
                Err(error) => {
                    eprintln!("dm-report: {}.{}: {}", label, name, error);
                    serde_json::Value::Null
                }
            };
            section.insert(name.to_string(), value);
        }
        report.insert(label.to_string(), serde_json::Value::Object(section));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    if validation_failed {
        std::process::exit(1);
    }
    Ok(())
}
