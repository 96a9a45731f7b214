// Library exports for testing and potential library use
//
// # Mutex Usage Policy
//
//   - `parking_lot::Mutex`: sync-only state (file store load/save cycles, the
//     log file handle). Never held across `.await`.
//
//   - `tokio::sync::mpsc`: store completions travelling from runtime tasks back
//     to the UI thread (see `StoreDriver`).

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod file_store;
pub mod headless;

pub use file_store::FileStore;
pub use headless::{HeadlessSession, Outcome};
