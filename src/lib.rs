// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod driver;
pub mod error;
pub mod feedback;
pub mod guidance;
pub mod level;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod tutor;
pub mod word_source;
