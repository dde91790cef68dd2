//! Utility functions for monitoring and debugging.

use std::time::Instant;
use tracing::{debug, info};

use crate::store::SeriesStore;

/// Log the table's shape and estimated in-memory size, with values in MB.
pub fn log_memory_breakdown(store: &SeriesStore) {
    let frame = store.frame();
    let (rows, cols) = frame.shape();
    let size_mb = frame.estimated_size() as f64 / (1024.0 * 1024.0);
    info!(rows, cols, "Dataset loaded: {:.2} MB in memory", size_mb);
}

/// Measure the execution time of a closure and log it with a label.
/// Returns the value returned by the closure.
pub fn measure_time<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    debug!("{} took: {:.2} ms", label, elapsed.as_secs_f64() * 1000.0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_time_passes_result_through() {
        assert_eq!(measure_time("sum", || 2 + 2), 4);
    }
}
