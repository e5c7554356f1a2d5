pub mod google_map;

pub use google_map::{GoogleMap, GoogleMapProps};
