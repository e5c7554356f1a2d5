pub mod geo;
pub mod event;

pub use geo::{BoxBounds, LatLng, TileCoord};
pub use event::{ClickPayload, EventEmitter, MapEvent};
