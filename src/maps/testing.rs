// ============================================================================
// TESTING - SDK en memoria que registra cada operación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use super::traits::*;
use crate::models::{BoxBounds, LatLng, TileCoord};
use crate::services::bootstrap::{LoaderRegistry, LoaderRequest, SdkEnvironment};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOverlay {
    pub id: u32,
    pub opacity: Option<f64>,
    pub tile_size: u32,
}

/// Lo que "ve" el SDK: objetos vivos en el mapa y contadores
#[derive(Default)]
pub struct SdkLog {
    next_id: u32,
    pub sessions_created: u32,
    pub last_options: Option<MapOptions>,
    pub markers: Vec<(u32, LatLng)>,
    pub rectangles: Vec<(u32, BoxBounds, RectangleStyle)>,
    pub overlays: Vec<RecordedOverlay>,
    pub overlays_created: u32,
    pub overlay_sources: Vec<(u32, TileSource)>,
    pub opacity_calls: u32,
    pub listeners: Vec<(u32, Rc<RefCell<ClickHandler>>)>,
    pub fail_next_marker: bool,
}

impl SdkLog {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedLog = Rc<RefCell<SdkLog>>;

pub struct FakeSdk {
    pub log: SharedLog,
}

impl FakeSdk {
    pub fn new() -> (Self, SharedLog) {
        let log = SharedLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl MapsSdk for FakeSdk {
    type Session = FakeSession;

    fn create_session(&self, options: &MapOptions) -> Result<FakeSession, MapError> {
        let mut log = self.log.borrow_mut();
        log.sessions_created += 1;
        log.last_options = Some(options.clone());
        Ok(FakeSession {
            log: self.log.clone(),
        })
    }
}

pub struct FakeSession {
    log: SharedLog,
}

/// Simula un click del usuario sobre el mapa
pub fn click(log: &SharedLog, position: LatLng) {
    let handlers: Vec<_> = log
        .borrow()
        .listeners
        .iter()
        .map(|(_, handler)| handler.clone())
        .collect();
    for handler in handlers {
        (*handler.borrow_mut())(position);
    }
}

/// Simula la petición de un tile al overlay en la posición `index`
pub fn request_tile(log: &SharedLog, index: usize, coord: TileCoord) -> Option<String> {
    let log = log.borrow();
    let id = log.overlays.get(index)?.id;
    log.overlay_sources
        .iter()
        .find(|(created, _)| *created == id)
        .map(|(_, source)| source.tile_url(coord))
}

impl MapSession for FakeSession {
    type Marker = u32;
    type Rectangle = u32;
    type Overlay = u32;
    type Listener = u32;

    fn add_marker(&mut self, position: LatLng) -> Result<u32, MapError> {
        let mut log = self.log.borrow_mut();
        if log.fail_next_marker {
            log.fail_next_marker = false;
            return Err(MapError::Binding("marker rejected".to_string()));
        }
        let id = log.next_id();
        log.markers.push((id, position));
        Ok(id)
    }

    fn remove_marker(&mut self, marker: u32) {
        self.log.borrow_mut().markers.retain(|(id, _)| *id != marker);
    }

    fn add_rectangle(&mut self, bounds: BoxBounds, style: &RectangleStyle) -> Result<u32, MapError> {
        let mut log = self.log.borrow_mut();
        let id = log.next_id();
        log.rectangles.push((id, bounds, style.clone()));
        Ok(id)
    }

    fn remove_rectangle(&mut self, rectangle: u32) {
        self.log
            .borrow_mut()
            .rectangles
            .retain(|(id, _, _)| *id != rectangle);
    }

    fn insert_overlay(&mut self, index: usize, source: TileSource) -> Result<u32, MapError> {
        let mut log = self.log.borrow_mut();
        let id = log.next_id();
        log.overlays_created += 1;
        let overlay = RecordedOverlay {
            id,
            opacity: None,
            tile_size: source.tile_size,
        };
        let index = index.min(log.overlays.len());
        log.overlays.insert(index, overlay);
        log.overlay_sources.push((id, source));
        Ok(id)
    }

    fn set_overlay_opacity(&mut self, overlay: &u32, opacity: f64) {
        let mut log = self.log.borrow_mut();
        log.opacity_calls += 1;
        if let Some(o) = log.overlays.iter_mut().find(|o| o.id == *overlay) {
            o.opacity = Some(opacity);
        }
    }

    fn remove_overlay_at(&mut self, index: usize) {
        let mut log = self.log.borrow_mut();
        if index < log.overlays.len() {
            log.overlays.remove(index);
        }
    }

    fn add_click_listener(&mut self, handler: ClickHandler) -> Result<u32, MapError> {
        let mut log = self.log.borrow_mut();
        let id = log.next_id();
        log.listeners.push((id, Rc::new(RefCell::new(handler))));
        Ok(id)
    }

    fn remove_listener(&mut self, listener: u32) {
        self.log.borrow_mut().listeners.retain(|(id, _)| *id != listener);
    }
}

/// Página simulada: el script "termina" cuando el test llama a `finish_load`.
/// Varios componentes que comparten un `FakeEnvironment` comparten la página.
#[derive(Default)]
pub struct LoaderLog {
    /// `google.maps` definido en el runtime
    pub namespace_present: bool,
    pub injected: Vec<String>,
    pub registry: LoaderRegistry,
}

pub type SharedLoaderLog = Rc<RefCell<LoaderLog>>;

#[derive(Clone, Default)]
pub struct FakeEnvironment {
    pub log: SharedLoaderLog,
}

impl FakeEnvironment {
    pub fn with_sdk_present(present: bool) -> Self {
        let env = Self::default();
        env.log.borrow_mut().namespace_present = present;
        env
    }

    /// El script se evaluó (`google.maps` existe) pero `initMap` todavía no llegó
    pub fn evaluate_script(&self) {
        self.log.borrow_mut().namespace_present = true;
    }

    /// Dispara el callback global del loader
    pub fn finish_load(&self) {
        let waiters = {
            let mut log = self.log.borrow_mut();
            log.namespace_present = true;
            log.registry.mark_loaded()
        };
        for notify in waiters {
            notify();
        }
    }
}

impl SdkEnvironment for FakeEnvironment {
    fn sdk_present(&self) -> bool {
        let log = self.log.borrow();
        log.registry.sdk_present(log.namespace_present)
    }

    fn inject_loader(
        &self,
        request: &LoaderRequest,
        on_loaded: Box<dyn FnOnce()>,
    ) -> Result<(), MapError> {
        let mut log = self.log.borrow_mut();
        if log.registry.register(on_loaded) {
            log.injected.push(request.script_url());
        }
        Ok(())
    }
}
