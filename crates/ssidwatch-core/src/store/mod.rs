// ── Tracked network store ──
//
// Memory-only state shared by the event path and the query path.

mod tracker;

pub use tracker::{TrackedNetworkSet, VisibilityTracker};
