// Módulo de mapas con implementaciones específicas por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

// Traits comunes para todas las plataformas
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::*;
