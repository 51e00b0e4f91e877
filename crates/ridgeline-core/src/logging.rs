//! Logging facilities for Ridgeline.
//!
//! Ridgeline uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! The [`targets`] module holds the target names used throughout the
//! toolkit so logs can be filtered per subsystem, e.g.
//! `RUST_LOG=ridgeline_prefs::list=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "ridgeline_core::signal";
    /// Preference control state machine target.
    pub const CONTROL: &str = "ridgeline_prefs::control";
    /// Preference list controller target.
    pub const LIST: &str = "ridgeline_prefs::list";
}
