//! Process-wide logging setup shared by the client binaries.

/// Tracing subscriber installation (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Install the default subscriber: JSON lines on stderr, filtered by
/// `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}

/// Same as [`init`] with an explicit output format.
pub fn init_with(format: LogFormat) {
    if !tracing::init(format) {
        ::tracing::debug!("global subscriber already installed; keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_tolerate_repeated_calls() {
        init();
        init_with(LogFormat::Compact);
        init();
        ::tracing::info!("subscriber still usable");
    }
}
