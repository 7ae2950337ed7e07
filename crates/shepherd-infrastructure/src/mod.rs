// Clippy allows for nested conditionals in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Composition root and cross-cutting technical concerns of the sidecar.
//!
//! ## Module Categories
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/environment configuration |
//! | [`di`] | Capability registry, assembler, container and startup sequencer |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Collaborators
//! | Module | Description |
//! |--------|-------------|
//! | [`infrastructure`] | Default implementations of the domain ports |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Error context helpers and cause-chain rendering |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used types
pub use error_ext::{ErrorContext, error_chain};
