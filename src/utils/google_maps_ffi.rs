// ============================================================================
// GOOGLE MAPS FFI - Bindings mínimos a `google.maps.*`
// ============================================================================
// Solo wrappers para el SDK JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    // google.maps.Map
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &Element, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &GoogleMap, event: &str, handler: &js_sys::Function) -> MapsEventListener;

    #[wasm_bindgen(method, getter, js_name = overlayMapTypes)]
    pub fn overlay_map_types(this: &GoogleMap) -> MvcArray;

    // google.maps.MVCArray
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = MVCArray)]
    pub type MvcArray;

    #[wasm_bindgen(method, js_name = insertAt)]
    pub fn insert_at(this: &MvcArray, index: u32, element: &JsValue);

    #[wasm_bindgen(method, js_name = removeAt)]
    pub fn remove_at(this: &MvcArray, index: u32) -> JsValue;

    #[wasm_bindgen(method, js_name = getLength)]
    pub fn get_length(this: &MvcArray) -> u32;

    // google.maps.Marker
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Marker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: &JsValue);

    // google.maps.Rectangle
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Rectangle;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> Result<Rectangle, JsValue>;

    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Rectangle, map: &JsValue);

    // google.maps.ImageMapType
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type ImageMapType;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> Result<ImageMapType, JsValue>;

    #[wasm_bindgen(method, js_name = setOpacity)]
    pub fn set_opacity(this: &ImageMapType, opacity: f64);

    // google.maps.Size
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type Size;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new(width: f64, height: f64) -> Size;

    // google.maps.MapsEventListener
    pub type MapsEventListener;

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapsEventListener);

    // google.maps.MapMouseEvent / LatLng
    pub type MapMouseEvent;

    #[wasm_bindgen(method, getter, js_name = latLng)]
    pub fn lat_lng(this: &MapMouseEvent) -> Option<MapsLatLng>;

    pub type MapsLatLng;

    #[wasm_bindgen(method)]
    pub fn lat(this: &MapsLatLng) -> f64;

    #[wasm_bindgen(method)]
    pub fn lng(this: &MapsLatLng) -> f64;
}

/// Namespace `google.maps` si el SDK ya está cargado
pub fn maps_namespace() -> Option<JsValue> {
    let google = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("google")).ok()?;
    if google.is_undefined() || google.is_null() {
        return None;
    }
    let maps = js_sys::Reflect::get(&google, &JsValue::from_str("maps")).ok()?;
    if maps.is_undefined() || maps.is_null() {
        return None;
    }
    Some(maps)
}

/// Valor de una constante de enum del SDK, p.ej. `ControlPosition.LEFT_TOP`
pub fn sdk_constant(enum_name: &str, key: &str) -> Option<JsValue> {
    let maps = maps_namespace()?;
    let enum_obj = js_sys::Reflect::get(&maps, &JsValue::from_str(enum_name)).ok()?;
    let value = js_sys::Reflect::get(&enum_obj, &JsValue::from_str(key)).ok()?;
    (!value.is_undefined()).then_some(value)
}
