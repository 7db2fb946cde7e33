//! Tracing utilities for mapping observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event marking a mapping pass.
///
/// ```ignore
/// unjoin_trace_pass!("group", rows.len());
/// ```
#[macro_export]
macro_rules! unjoin_trace_pass {
    ($pass:literal, $count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(pass = $pass, count = $count, "unjoin.pass");
    };
}

/// Emit a trace-level event for one table inside a pass.
///
/// ```ignore
/// unjoin_trace_table!("nest", table.alias(), set.len());
/// ```
#[macro_export]
macro_rules! unjoin_trace_table {
    ($pass:literal, $table:expr, $records:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(pass = $pass, table = %$table, records = $records, "unjoin.table");
    };
}
