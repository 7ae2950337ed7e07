//! Built-in REST resources
//!
//! | Resource | Base path | Scope |
//! |----------|-----------|-------|
//! | [`StatusResource`] | `v1/status` | transient |
//! | [`ClusterResource`] | `v1/cluster` | singleton |
//!
//! Both live in the `shepherd.resources` package.

pub mod cluster;
pub mod status;

pub use cluster::{ClusterResource, ClusterSummary};
pub use status::{StatusReport, StatusResource};
