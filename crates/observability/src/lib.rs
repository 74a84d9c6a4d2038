//! `trackhub-observability`: process-wide log setup shared by binaries and tests.

pub mod tracing;

pub use self::tracing::LogFormat;

/// Install the global subscriber in `format`. Later calls keep the first one.
pub fn init(format: LogFormat) {
    self::tracing::init(format);
}
