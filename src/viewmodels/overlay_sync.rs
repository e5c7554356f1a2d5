// ============================================================================
// OVERLAY SYNC - Sincroniza propiedades declaradas -> objetos imperativos
// ============================================================================
// Cada rutina corre sólo si su entrada cambió en el batch y no hace nada
// sin sesión. Patrón reemplazar-o-limpiar: el handle viejo se quita del mapa
// antes de instalar el nuevo.
// ============================================================================

use crate::maps::{MapSession, TileSource};
use crate::models::{BoxBounds, LatLng};
use crate::state::{ChangeSet, DeclaredProperties};
use crate::utils::constants::OVERLAY_INDEX;

use super::map_viewmodel::MapViewModel;

impl<S: MapSession> MapViewModel<S> {
    /// Copiar los valores que se leen en diferido (click, tiles, overlay)
    pub fn mirror(&mut self, props: &DeclaredProperties) {
        *self.click_event.borrow_mut() = props.click_event.clone();
        *self.map_id.borrow_mut() = props.map_id.clone();
        self.show_layer = props.show_layer;
        self.layer_opacity = props.layer_opacity;
    }

    /// Aplicar un batch de cambios
    pub fn apply(&mut self, changes: &ChangeSet, props: &DeclaredProperties) {
        self.mirror(props);

        if changes.marker {
            self.update_marker(props.marker);
        }
        if changes.box_bounds {
            self.update_box(props.box_bounds);
        }
        if changes.overlay() {
            self.update_overlay();
        }
    }

    /// `None` no borra el marker existente (comportamiento conocido, pendiente de producto)
    pub fn update_marker(&mut self, target: Option<LatLng>) {
        let (Some(session), Some(position)) = (self.session.as_mut(), target) else {
            return;
        };

        if let Some(old) = self.slots.marker.take() {
            session.remove_marker(old);
        }
        match session.add_marker(position) {
            Ok(marker) => {
                log::debug!("📍 Marker en ({}, {})", position.lat, position.lng);
                self.slots.marker = Some(marker);
            }
            Err(e) => log::warn!("⚠️ No se pudo crear el marker: {}", e),
        }
    }

    /// Mismo patrón que el marker, con un rectángulo de estilo fijo
    pub fn update_box(&mut self, target: Option<BoxBounds>) {
        let (Some(session), Some(bounds)) = (self.session.as_mut(), target) else {
            return;
        };

        if let Some(old) = self.slots.rectangle.take() {
            session.remove_rectangle(old);
        }
        match session.add_rectangle(bounds, &self.rectangle_style) {
            Ok(rectangle) => {
                log::debug!(
                    "🟥 Box N{} S{} E{} O{}",
                    bounds.north,
                    bounds.south,
                    bounds.east,
                    bounds.west
                );
                self.slots.rectangle = Some(rectangle);
            }
            Err(e) => log::warn!("⚠️ No se pudo crear el rectángulo: {}", e),
        }
    }

    /// Overlay de tiles: existe sii show_layer y hay map_id; opacidad siempre al día
    pub fn update_overlay(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let wants_overlay = self.show_layer && !self.map_id.borrow().is_empty();
        if wants_overlay {
            if self.slots.overlay.is_none() {
                let source = TileSource::new(self.tile_host.clone(), self.map_id.clone());
                match session.insert_overlay(OVERLAY_INDEX, source) {
                    Ok(overlay) => {
                        log::info!("🛰️ Overlay de tiles insertado ({})", self.map_id.borrow());
                        self.slots.overlay = Some(overlay);
                    }
                    Err(e) => {
                        log::warn!("⚠️ No se pudo crear el overlay: {}", e);
                        return;
                    }
                }
            }
            if let Some(overlay) = self.slots.overlay.as_ref() {
                session.set_overlay_opacity(overlay, self.layer_opacity);
            }
        } else if self.slots.overlay.take().is_some() {
            session.remove_overlay_at(OVERLAY_INDEX);
            log::info!("🛰️ Overlay de tiles retirado");
        }
    }
}
