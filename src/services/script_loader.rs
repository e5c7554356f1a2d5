// ============================================================================
// SCRIPT LOADER - Inyección del script del SDK en el navegador
// ============================================================================
// El SDK sólo acepta un callback global (`initMap`). Ese callback se registra
// UNA VEZ por página y despacha a todas las instancias que esperan. El estado
// de la página vive en un `LoaderRegistry` por hilo.
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use super::bootstrap::{LoaderRegistry, LoaderRequest, SdkEnvironment};
use crate::dom::{append_child, create_element, document, window};
use crate::maps::web::binding_error;
use crate::maps::MapError;
use crate::utils::google_maps_ffi::maps_namespace;

thread_local! {
    static LOADER: RefCell<LoaderRegistry> = RefCell::new(LoaderRegistry::default());
}

/// Entorno del navegador (window/document reales)
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSdkEnvironment;

impl SdkEnvironment for WebSdkEnvironment {
    fn sdk_present(&self) -> bool {
        LOADER.with(|cell| cell.borrow().sdk_present(maps_namespace().is_some()))
    }

    fn inject_loader(
        &self,
        request: &LoaderRequest,
        on_loaded: Box<dyn FnOnce()>,
    ) -> Result<(), MapError> {
        let first = LOADER.with(|cell| cell.borrow_mut().register(on_loaded));
        if !first {
            log::debug!("⏳ Script del SDK ya inyectado por otra instancia, esperando");
            return Ok(());
        }

        let window = window()?;

        // Callback global: se registra una sola vez por página
        let callback = Closure::wrap(Box::new(move || {
            let waiters = LOADER.with(|cell| cell.borrow_mut().mark_loaded());
            log::info!("✅ SDK de Google Maps cargado ({} instancias)", waiters.len());
            for notify in waiters {
                notify();
            }
        }) as Box<dyn FnMut()>);
        js_sys::Reflect::set(
            &window,
            &JsValue::from_str(&request.callback_name),
            callback.as_ref(),
        )
        .map_err(binding_error)?;
        // Nota: el callback global vive toda la vida de la página
        callback.forget();

        let script: HtmlScriptElement = create_element("script")?
            .dyn_into()
            .map_err(|_| MapError::Binding("script element".to_string()))?;
        script.set_src(&request.script_url());
        script.set_defer(true);
        script.set_async(true);

        // Sin reintento: sólo dejamos rastro en consola
        let on_error = Closure::once_into_js(move || {
            log::error!("❌ No se pudo cargar el SDK de Google Maps (red o API key inválida)");
        });
        script.set_onerror(Some(on_error.unchecked_ref()));

        let head = document()?
            .head()
            .ok_or_else(|| MapError::Binding("document sin <head>".to_string()))?;
        append_child(&head, &script)?;
        log::info!("📥 Script del SDK inyectado");
        Ok(())
    }
}
