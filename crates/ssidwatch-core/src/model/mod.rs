// ── Domain model ──
//
// Wireless events as the listener sees them, the network records the
// subsystem reports, and the verdict handed back to the controller.

pub mod event;
pub mod network;
pub mod verdict;

// ── Re-exports ──────────────────────────────────────────────────────

pub use event::{EventKind, NetworkInfo, NetworkState, RadioState, WirelessEvent};
pub use network::{ConfiguredNetwork, ScanResult};
pub use verdict::Verdict;
