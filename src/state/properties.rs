// ============================================================================
// PROPERTIES - Propiedades declaradas + diff explícito por campo
// ============================================================================
// El host escribe las propiedades; el componente sólo calcula qué cambió
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{BoxBounds, LatLng};

/// Propiedades declaradas por el host (mismos nombres que los atributos JS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclaredProperties {
    pub api_key: String,
    #[serde(rename = "clickEvent")]
    pub click_event: String,
    pub marker: Option<LatLng>,
    #[serde(rename = "box")]
    pub box_bounds: Option<BoxBounds>,
    pub map_id: String,
    pub show_layer: bool,
    pub layer_opacity: f64,
}

impl Default for DeclaredProperties {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            click_event: String::new(),
            marker: None,
            box_bounds: None,
            map_id: String::new(),
            show_layer: true,
            layer_opacity: 1.0,
        }
    }
}

/// Flags de cambio de un batch de propiedades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub api_key: bool,
    pub click_event: bool,
    pub marker: bool,
    pub box_bounds: bool,
    pub map_id: bool,
    pub show_layer: bool,
    pub layer_opacity: bool,
}

impl ChangeSet {
    /// Diff campo a campo. Sin estado previo (primer render) todo cuenta como cambiado.
    pub fn between(previous: Option<&DeclaredProperties>, next: &DeclaredProperties) -> Self {
        match previous {
            None => Self::all(),
            Some(prev) => Self {
                api_key: prev.api_key != next.api_key,
                click_event: prev.click_event != next.click_event,
                marker: prev.marker != next.marker,
                box_bounds: prev.box_bounds != next.box_bounds,
                map_id: prev.map_id != next.map_id,
                show_layer: prev.show_layer != next.show_layer,
                // NaN != NaN: se trata como cambio, igual que una comparación estricta en JS
                layer_opacity: prev.layer_opacity != next.layer_opacity,
            },
        }
    }

    pub fn all() -> Self {
        Self {
            api_key: true,
            click_event: true,
            marker: true,
            box_bounds: true,
            map_id: true,
            show_layer: true,
            layer_opacity: true,
        }
    }

    /// El overlay se re-sincroniza con cambios de visibilidad u opacidad
    pub fn overlay(&self) -> bool {
        self.show_layer || self.layer_opacity
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_batch_marks_everything() {
        let changes = ChangeSet::between(None, &DeclaredProperties::default());
        assert_eq!(changes, ChangeSet::all());
        assert!(changes.overlay());
    }

    #[test]
    fn test_identical_batch_is_empty() {
        let props = DeclaredProperties {
            marker: Some(LatLng::new(1.0, 2.0)),
            ..Default::default()
        };
        assert!(ChangeSet::between(Some(&props), &props.clone()).is_empty());
    }

    #[test]
    fn test_only_changed_fields_flagged() {
        let prev = DeclaredProperties::default();
        let next = DeclaredProperties {
            layer_opacity: 0.5,
            marker: Some(LatLng::new(1.0, 1.0)),
            ..prev.clone()
        };
        let changes = ChangeSet::between(Some(&prev), &next);
        assert!(changes.marker);
        assert!(changes.layer_opacity);
        assert!(changes.overlay());
        assert!(!changes.box_bounds);
        assert!(!changes.show_layer);
        assert!(!changes.map_id);
    }

    #[test]
    fn test_map_id_alone_does_not_trigger_overlay() {
        let prev = DeclaredProperties::default();
        let next = DeclaredProperties {
            map_id: "abc".to_string(),
            ..prev.clone()
        };
        let changes = ChangeSet::between(Some(&prev), &next);
        assert!(changes.map_id);
        assert!(!changes.overlay());
    }

    #[test]
    fn test_deserialize_host_attribute_names() {
        let json = r#"{
            "api_key": "k",
            "clickEvent": "mapClicked",
            "marker": {"lat": 1.0, "lng": 2.0},
            "box": null,
            "map_id": "abc"
        }"#;
        let props: DeclaredProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.click_event, "mapClicked");
        assert_eq!(props.marker, Some(LatLng::new(1.0, 2.0)));
        assert_eq!(props.box_bounds, None);
        assert!(props.show_layer);
        assert_eq!(props.layer_opacity, 1.0);
    }
}
