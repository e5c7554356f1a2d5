// ============================================================================
// ELEMENT HELPERS - Acceso al DOM con errores del mapa
// ============================================================================
// Todo devuelve `MapError` para que los llamadores usen `?` sin convertir
// `JsValue` a mano.
// ============================================================================

use web_sys::{Document, Element, Node, Window};

use crate::maps::web::binding_error;
use crate::maps::MapError;

pub fn window() -> Result<Window, MapError> {
    web_sys::window().ok_or_else(|| MapError::Binding("sin window global".to_string()))
}

pub fn document() -> Result<Document, MapError> {
    window()?
        .document()
        .ok_or_else(|| MapError::Binding("window sin document".to_string()))
}

pub fn create_element(tag: &str) -> Result<Element, MapError> {
    document()?.create_element(tag).map_err(binding_error)
}

pub fn append_child(parent: &Node, child: &Node) -> Result<(), MapError> {
    parent.append_child(child).map(|_| ()).map_err(binding_error)
}

/// Quitar `child` de `parent` (no-op si ya no es hijo)
pub fn detach(parent: &Node, child: &Node) -> Result<(), MapError> {
    if !parent.contains(Some(child)) {
        return Ok(());
    }
    parent.remove_child(child).map(|_| ()).map_err(binding_error)
}
