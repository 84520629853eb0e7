pub mod client;
pub mod registry;
pub mod session;

pub use client::{
    ChangedFile, ClientError, Commit, CommitOutcome, RestoreOutcome, VcsApi, VcsClient,
    DEFAULT_BASE_URL,
};
pub use registry::ProjectRegistry;
pub use session::{Session, SessionState, POLL_INTERVAL};

/// Install the default `tracing` subscriber. Call once from the
/// embedding application's entry point.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}
