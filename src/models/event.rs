use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::LatLng;

/// Payload del evento de click: `{lat, lng}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClickPayload {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for ClickPayload {
    fn from(position: LatLng) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
        }
    }
}

/// Evento estructurado emitido hacia el host
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent {
    /// Nombre exacto configurado en `clickEvent`
    pub name: String,
    pub payload: ClickPayload,
}

/// Capacidad de emisión de eventos que recibe el componente
pub type EventEmitter = Rc<dyn Fn(MapEvent)>;
