//! Binding modules provided by the infrastructure layer

pub mod sidecar;

pub use sidecar::SidecarModule;
