// ============================================================================
// SERVICES - Carga del SDK de mapas
// ============================================================================

pub mod bootstrap;

#[cfg(target_arch = "wasm32")]
pub mod script_loader;

pub use bootstrap::{BootstrapState, LoaderRequest, SdkEnvironment, ServiceBootstrapper};
