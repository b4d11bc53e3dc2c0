//! Shared end-to-end test infrastructure.
#![allow(dead_code)] // Not every test binary uses every helper

mod client;
mod constants;
mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use server::TestServer;
