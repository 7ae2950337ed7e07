//! Module declarations

use super::registry::CapabilityRegistry;

/// A named group of binding and mount declarations
///
/// Modules only declare; the assembler validates and constructs.
pub trait Module: Send + Sync {
    /// Name reported in logs and duplicate-binding errors
    fn name(&self) -> &'static str;

    /// Declare bindings and mount points
    fn configure(&self, registry: &mut CapabilityRegistry);
}
