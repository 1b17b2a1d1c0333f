//! Hierarchical object names to identifier-safe type names.

/// Convert a schema object name to a valid Rust type identifier.
///
/// Every `.` becomes `_`; every `{` and `}` becomes `0`. No other
/// characters are altered, so two well-formed object names that differ
/// outside those characters never collide.
///
/// Objects conventionally end with `.`, so the output carries a trailing
/// `_`. That is intentional: it keeps instance tables
/// (`Device.Ethernet.Link.{i}.`) distinct from their parents.
///
/// Examples:
///   `Device.Routing.RIP.` => `Device_Routing_RIP_`
///   `Device.Ethernet.Link.{i}.Stats.` => `Device_Ethernet_Link_0i0_Stats_`
pub fn mangle(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' => '_',
            '{' | '}' => '0',
            other => other,
        })
        .collect()
}
