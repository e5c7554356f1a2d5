pub mod map_viewmodel;
pub mod overlay_sync;

pub use map_viewmodel::{MapViewModel, OverlaySlots};
