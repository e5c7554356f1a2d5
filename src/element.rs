// ============================================================================
// MAP ELEMENT - Export WASM para hosts que no son Yew (custom elements)
// ============================================================================
// El host escribe propiedades con los setters y llama a `commit()` para
// entregar el batch. Los clicks salen como CustomEvent sobre el host.
// ============================================================================

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::component::MapComponent;
use crate::config::CONFIG;
use crate::dom::{append_child, create_element, custom_event_emitter, detach};
use crate::maps::web::{binding_error, WebMapsSdk};
use crate::maps::MapError;
use crate::services::script_loader::WebSdkEnvironment;
use crate::state::DeclaredProperties;

fn to_js_error(e: MapError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Contenedor del mapa: un <div> que ocupa todo el host
fn create_map_container(host: &Element) -> Result<Element, MapError> {
    let container = create_element("div")?;
    container
        .set_attribute("class", "map")
        .and_then(|_| container.set_attribute("style", "height: 100%; width: 100%;"))
        .map_err(binding_error)?;
    append_child(host, &container)?;
    Ok(container)
}

/// `null`/`undefined` -> `None`; cualquier otro valor debe tener la forma esperada
fn optional_from_js<T: DeserializeOwned>(name: &str, value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| to_js_error(MapError::InvalidProperty(format!("{}: {}", name, e))))
}

#[wasm_bindgen]
pub struct MapElement {
    host: Element,
    container: Element,
    component: MapComponent<WebMapsSdk, WebSdkEnvironment>,
    pending: DeclaredProperties,
}

#[wasm_bindgen]
impl MapElement {
    #[wasm_bindgen(constructor)]
    pub fn new(host: Element) -> Result<MapElement, JsValue> {
        let container = create_map_container(&host).map_err(to_js_error)?;
        let emitter = custom_event_emitter(host.clone().into());
        let component = MapComponent::new(
            WebMapsSdk::new(container.clone()),
            WebSdkEnvironment,
            &CONFIG,
            emitter,
        );
        log::info!("🧩 MapElement creado ({})", component.instance_id());
        Ok(Self {
            host,
            container,
            component,
            pending: DeclaredProperties::default(),
        })
    }

    #[wasm_bindgen(js_name = setApiKey)]
    pub fn set_api_key(&mut self, value: String) {
        self.pending.api_key = value;
    }

    #[wasm_bindgen(js_name = setClickEvent)]
    pub fn set_click_event(&mut self, value: String) {
        self.pending.click_event = value;
    }

    /// `{lat, lng}` o `null`
    #[wasm_bindgen(js_name = setMarker)]
    pub fn set_marker(&mut self, value: JsValue) -> Result<(), JsValue> {
        self.pending.marker = optional_from_js("marker", value)?;
        Ok(())
    }

    /// `{north, south, east, west}` o `null`
    #[wasm_bindgen(js_name = setBox)]
    pub fn set_box(&mut self, value: JsValue) -> Result<(), JsValue> {
        self.pending.box_bounds = optional_from_js("box", value)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setMapId)]
    pub fn set_map_id(&mut self, value: String) {
        self.pending.map_id = value;
    }

    #[wasm_bindgen(js_name = setShowLayer)]
    pub fn set_show_layer(&mut self, value: bool) {
        self.pending.show_layer = value;
    }

    #[wasm_bindgen(js_name = setLayerOpacity)]
    pub fn set_layer_opacity(&mut self, value: f64) {
        self.pending.layer_opacity = value;
    }

    /// Reemplazar todas las propiedades desde un objeto JS (`{api_key, clickEvent, marker, box, ...}`)
    #[wasm_bindgen(js_name = setProperties)]
    pub fn set_properties(&mut self, value: JsValue) -> Result<(), JsValue> {
        self.pending = serde_wasm_bindgen::from_value(value)
            .map_err(|e| to_js_error(MapError::InvalidProperty(e.to_string())))?;
        Ok(())
    }

    /// Entregar el batch de propiedades pendiente
    pub fn commit(&self) {
        self.component.update(self.pending.clone());
    }

    pub fn disconnect(&self) {
        self.component.disconnect();
        if let Err(e) = detach(&self.host, &self.container) {
            log::warn!("⚠️ No se pudo quitar el contenedor del mapa: {}", e);
        }
    }
}
