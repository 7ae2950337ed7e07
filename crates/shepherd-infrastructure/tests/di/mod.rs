//! DI Layer Tests
//!
//! - Binding declaration and resolution
//! - Container assembly and validation
//! - Late lookup through `Deferred`
//! - Startup sequencing
//! - The sidecar's core bindings
//! - End-to-end composition with fake collaborators

mod assembler_tests;
mod deferred_tests;
