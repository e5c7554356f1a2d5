// Utils compartidos

pub mod constants;

#[cfg(target_arch = "wasm32")]
pub mod google_maps_ffi;

pub use constants::*;
