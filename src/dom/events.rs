// ============================================================================
// EVENT HANDLING - Eventos salientes del componente
// ============================================================================
// Los clicks del mapa salen como CustomEvent (bubbles + composed) sobre el
// elemento host, con `detail = {lat, lng}`.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, EventTarget};

use crate::models::{EventEmitter, MapEvent};

/// Despachar un CustomEvent con `detail`
pub fn dispatch_custom_event(target: &EventTarget, name: &str, detail: &JsValue) -> Result<bool, JsValue> {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_detail(detail);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    target.dispatch_event(&event)
}

/// Emisor que despacha los eventos del mapa sobre `target`
pub fn custom_event_emitter(target: EventTarget) -> EventEmitter {
    Rc::new(move |event: MapEvent| {
        let detail = match serde_wasm_bindgen::to_value(&event.payload) {
            Ok(detail) => detail,
            Err(e) => {
                log::error!("❌ Error serializando payload de '{}': {}", event.name, e);
                return;
            }
        };
        if let Err(e) = dispatch_custom_event(&target, &event.name, &detail) {
            log::error!("❌ Error despachando '{}': {:?}", event.name, e);
        }
    })
}
