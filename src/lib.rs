//! Titleforge Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod generation;
pub mod llm;
pub mod optimizer;
pub mod server;
pub mod user;

// Re-export commonly used types for convenience
pub use generation::{GenerationGate, GenerationService};
pub use optimizer::Platform;
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{JwtKeys, SqliteUserStore, UserStore};
