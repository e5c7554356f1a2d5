use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::{ClickHandler, MapError, MapOptions, MapSession, MapsSdk, RectangleStyle, TileSource};
use crate::models::{BoxBounds, LatLng, TileCoord};
use crate::utils::google_maps_ffi::{self as ffi, GoogleMap};

pub(crate) fn binding_error(e: JsValue) -> MapError {
    MapError::Binding(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Binding(e.to_string()))
}

fn set_prop(target: &JsValue, key: &str, value: &JsValue) -> Result<(), MapError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(binding_error)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptionsJs {
    center: LatLng,
    zoom: f64,
    street_view_control: bool,
    map_type_control: bool,
    fullscreen_control: bool,
    map_type_id: &'static str,
    clickable_icons: bool,
    camera_control: bool,
    zoom_control: bool,
    tilt: f64,
    rotate_control: bool,
}

impl From<&MapOptions> for MapOptionsJs {
    fn from(options: &MapOptions) -> Self {
        Self {
            center: options.center,
            zoom: options.zoom,
            street_view_control: options.street_view_control,
            map_type_control: options.map_type_control,
            fullscreen_control: options.fullscreen_control,
            map_type_id: options.map_type_id,
            clickable_icons: options.clickable_icons,
            camera_control: options.camera_control,
            zoom_control: options.zoom_control,
            tilt: options.tilt,
            rotate_control: options.rotate_control,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RectangleOptionsJs<'a> {
    stroke_color: &'a str,
    stroke_opacity: f64,
    stroke_weight: u32,
    fill_color: &'a str,
    fill_opacity: f64,
    bounds: BoxBounds,
}

/// SDK web: crea sesiones sobre un contenedor del DOM
pub struct WebMapsSdk {
    container: Element,
}

impl WebMapsSdk {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl MapsSdk for WebMapsSdk {
    type Session = WebMapSession;

    fn create_session(&self, options: &MapOptions) -> Result<WebMapSession, MapError> {
        if ffi::maps_namespace().is_none() {
            return Err(MapError::SdkUnavailable);
        }

        let js_options = to_js(&MapOptionsJs::from(options))?;
        if let Some(position) = ffi::sdk_constant("ControlPosition", options.zoom_control_position) {
            let zoom_control_options = js_sys::Object::new();
            set_prop(&zoom_control_options, "position", &position)?;
            set_prop(&js_options, "zoomControlOptions", &zoom_control_options)?;
        }

        let map = GoogleMap::new(&self.container, &js_options).map_err(binding_error)?;
        Ok(WebMapSession { map })
    }
}

/// Sesión sobre un `google.maps.Map`
pub struct WebMapSession {
    map: GoogleMap,
}

pub struct WebOverlay {
    layer: ffi::ImageMapType,
    _get_tile_url: Closure<dyn FnMut(JsValue, f64) -> String>,
}

pub struct WebListener {
    handle: ffi::MapsEventListener,
    _callback: Closure<dyn FnMut(JsValue)>,
}

impl MapSession for WebMapSession {
    type Marker = ffi::Marker;
    type Rectangle = ffi::Rectangle;
    type Overlay = WebOverlay;
    type Listener = WebListener;

    fn add_marker(&mut self, position: LatLng) -> Result<ffi::Marker, MapError> {
        let options = js_sys::Object::new();
        set_prop(&options, "position", &to_js(&position)?)?;
        set_prop(&options, "map", &self.map)?;
        ffi::Marker::new(&options).map_err(binding_error)
    }

    fn remove_marker(&mut self, marker: ffi::Marker) {
        marker.set_map(&JsValue::NULL);
    }

    fn add_rectangle(
        &mut self,
        bounds: BoxBounds,
        style: &RectangleStyle,
    ) -> Result<ffi::Rectangle, MapError> {
        let options = to_js(&RectangleOptionsJs {
            stroke_color: &style.stroke_color,
            stroke_opacity: style.stroke_opacity,
            stroke_weight: style.stroke_weight,
            fill_color: &style.fill_color,
            fill_opacity: style.fill_opacity,
            bounds,
        })?;
        set_prop(&options, "map", &self.map)?;
        ffi::Rectangle::new(&options).map_err(binding_error)
    }

    fn remove_rectangle(&mut self, rectangle: ffi::Rectangle) {
        rectangle.set_map(&JsValue::NULL);
    }

    fn insert_overlay(&mut self, index: usize, source: TileSource) -> Result<WebOverlay, MapError> {
        let tile_size = source.tile_size as f64;
        let get_tile_url = Closure::wrap(Box::new(move |coord: JsValue, zoom: f64| {
            let axis = |name: &str| {
                js_sys::Reflect::get(&coord, &JsValue::from_str(name))
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0) as i64
            };
            source.tile_url(TileCoord::new(zoom as u32, axis("x"), axis("y")))
        }) as Box<dyn FnMut(JsValue, f64) -> String>);

        let options = js_sys::Object::new();
        set_prop(&options, "getTileUrl", get_tile_url.as_ref())?;
        set_prop(&options, "tileSize", &ffi::Size::new(tile_size, tile_size))?;
        let layer = ffi::ImageMapType::new(&options).map_err(binding_error)?;

        self.map.overlay_map_types().insert_at(index as u32, &layer);
        Ok(WebOverlay {
            layer,
            _get_tile_url: get_tile_url,
        })
    }

    fn set_overlay_opacity(&mut self, overlay: &WebOverlay, opacity: f64) {
        overlay.layer.set_opacity(opacity);
    }

    fn remove_overlay_at(&mut self, index: usize) {
        let overlays = self.map.overlay_map_types();
        if (index as u32) < overlays.get_length() {
            overlays.remove_at(index as u32);
        }
    }

    fn add_click_listener(&mut self, mut handler: ClickHandler) -> Result<WebListener, MapError> {
        let callback = Closure::wrap(Box::new(move |event: JsValue| {
            let event: ffi::MapMouseEvent = event.unchecked_into();
            if let Some(position) = event.lat_lng() {
                handler(LatLng::new(position.lat(), position.lng()));
            }
        }) as Box<dyn FnMut(JsValue)>);

        let handle = self.map.add_listener("click", callback.as_ref().unchecked_ref());
        Ok(WebListener {
            handle,
            _callback: callback,
        })
    }

    fn remove_listener(&mut self, listener: WebListener) {
        // El closure se libera al soltar el listener
        listener.handle.remove();
    }
}
