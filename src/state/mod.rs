// ============================================================================
// STATE MODULE - Propiedades declaradas y diff de cambios
// ============================================================================

pub mod properties;

pub use properties::*;
