/// Relay configuration constants.
///
/// This module defines parameters for the waiting queue, such as the stale-entry
/// timeout and the sweep interval.

/// Time (in seconds) a connection may sit unmatched in the waiting queue before
/// its entry is swept as abandoned.
pub const WAITING_TIMEOUT_SECS: u64 = 300;

/// Interval (in seconds) between two stale-entry sweeps of the waiting queue.
pub const SWEEP_INTERVAL_SECS: u64 = 60;
