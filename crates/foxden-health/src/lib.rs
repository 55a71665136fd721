//! foxden-health — concurrent liveness probing of storage providers.
//!
//! One probe task per provider, each bounded by its own timeout; a
//! provider that fails or hangs never blocks, cancels, or aborts its
//! siblings, and the scan always completes with a full classification
//! table.
//!
//! ```text
//! check_all(providers)
//!   ├── task per provider: GET endpoint, 5s deadline
//!   │     2xx            → Ok      (elapsed recorded)
//!   │     non-2xx / transport error → Error (elapsed recorded)
//!   │     deadline hit   → Timeout (probe abandoned)
//!   └── fan-in → ProbeReport { healthy, errored, timed_out, results }
//! ```

pub mod probe;
pub mod report;

pub use probe::{
    check_all, check_all_with_timeout, ProbeOutcome, ProbeReport, ProbeStatus, ProviderEndpoint,
    PROBE_TIMEOUT,
};
pub use report::render_summary;
