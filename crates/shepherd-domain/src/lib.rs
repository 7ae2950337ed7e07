//! # Shepherd Domain
//!
//! Contracts and value types shared by every Shepherd layer.
//!
//! The sidecar's composition root binds each port defined here to a concrete
//! implementation; the server only ever talks to collaborators through these
//! traits.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and result alias |
//! | [`ports`] | Collaborator contracts |
//! | [`value_objects`] | Identities, credentials, peers, repository registrations |
//! | [`constants`] | Shared constants |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
