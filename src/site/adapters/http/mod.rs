//! Outbound HTTP adapters.

mod prober;

pub use prober::{HttpProber, PROBE_USER_AGENT};
