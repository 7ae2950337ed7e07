//! # Shepherd Server
//!
//! The sidecar service and its REST front end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shepherd_server::run_server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Default config (working directory, XDG paths + environment)
//!     run_server(None).await
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`server`] | [`SidecarServer`], the process's `ServerHandle` |
//! | [`jobs`] | Peer refresh and snapshot jobs |
//! | [`peers`] | Shared peer listing |
//! | [`rest`] | REST mounts, dispatcher and resources on Rocket |
//! | [`module`] | Server bindings |
//! | [`init`] | Process startup |

// Allow Rust 2024 compatibility issues from Rocket's macros
#![allow(rust_2024_compatibility)]

pub mod constants;
pub mod init;
pub mod jobs;
pub mod module;
pub mod peers;
pub mod rest;
pub mod server;

pub use init::{run_server, shutdown, sidecar_modules};
pub use module::ServerModule;
pub use peers::{PeerCache, PeerSnapshot};
pub use rest::{DispatcherConfig, RestDispatcher, RestModule};
pub use server::{ServerStatus, SidecarServer};
