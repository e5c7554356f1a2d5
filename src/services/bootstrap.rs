// ============================================================================
// BOOTSTRAP - Carga única del SDK de Google Maps por componente
// ============================================================================
// - SDK ya presente: notificación síncrona (mismo turno)
// - SDK ausente: un único script + callback de un solo uso
// - Sin reintentos ni timeout: si la carga falla, el componente queda inerte
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::maps::MapError;
use crate::utils::constants::{LOADER_CALLBACK_NAME, MAPS_SCRIPT_BASE_URL};

/// Parámetros del script de carga del SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderRequest {
    pub api_key: String,
    pub callback_name: String,
}

impl LoaderRequest {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            callback_name: LOADER_CALLBACK_NAME.to_string(),
        }
    }

    pub fn script_url(&self) -> String {
        format!(
            "{}?key={}&callback={}&loading=async",
            MAPS_SCRIPT_BASE_URL, self.api_key, self.callback_name
        )
    }
}

/// Entorno de ejecución donde vive el SDK (navegador en wasm32, fake en tests)
pub trait SdkEnvironment {
    /// ¿Se pueden crear mapas ya? (`google.maps` cargado y no hay un script propio en vuelo)
    fn sdk_present(&self) -> bool;

    /// Inyectar el script de carga; `on_loaded` se invoca una vez cuando el SDK está listo
    fn inject_loader(
        &self,
        request: &LoaderRequest,
        on_loaded: Box<dyn FnOnce()>,
    ) -> Result<(), MapError>;
}

type ReadyCallback = Box<dyn FnOnce()>;

/// Registro de la página: un único script y un único callback global para
/// todas las instancias. Mientras el script está en vuelo el namespace puede
/// existir ya, pero el SDK sólo cuenta como listo cuando llega `initMap`.
#[derive(Default)]
pub struct LoaderRegistry {
    injected: bool,
    loaded: bool,
    waiters: Vec<ReadyCallback>,
}

impl LoaderRegistry {
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// `namespace_present`: si `google.maps` existe en el runtime
    pub fn sdk_present(&self, namespace_present: bool) -> bool {
        self.loaded || (!self.injected && namespace_present)
    }

    /// Encolar un waiter. Devuelve `true` sólo para el primero (quien inyecta el script).
    pub fn register(&mut self, on_loaded: ReadyCallback) -> bool {
        if self.loaded {
            log::warn!("⚠️ Loader: registro tras la carga, se ignora");
            return false;
        }
        self.waiters.push(on_loaded);
        !std::mem::replace(&mut self.injected, true)
    }

    /// Marcar el SDK como cargado y devolver los waiters para notificarlos
    /// fuera del borrow del registro
    pub fn mark_loaded(&mut self) -> Vec<ReadyCallback> {
        self.loaded = true;
        std::mem::take(&mut self.waiters)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Idle,
    Loading,
    Ready,
}

pub struct ServiceBootstrapper<E: SdkEnvironment> {
    env: E,
    state: Rc<RefCell<BootstrapState>>,
    waiters: Rc<RefCell<Vec<ReadyCallback>>>,
}

impl<E: SdkEnvironment> ServiceBootstrapper<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            state: Rc::new(RefCell::new(BootstrapState::Idle)),
            waiters: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn state(&self) -> BootstrapState {
        *self.state.borrow()
    }

    /// Asegura que el SDK está disponible y notifica a `on_ready` una sola vez.
    /// Llamadas durante la carga se encolan; nunca se inyecta un segundo script.
    pub fn ensure_ready<F>(&self, api_key: &str, on_ready: F)
    where
        F: FnOnce() + 'static,
    {
        let current = self.state();
        match current {
            BootstrapState::Ready => on_ready(),
            BootstrapState::Loading => {
                log::debug!("⏳ Bootstrap: SDK cargando, encolando notificación");
                self.waiters.borrow_mut().push(Box::new(on_ready));
            }
            BootstrapState::Idle => {
                if self.env.sdk_present() {
                    log::info!("🗺️ Bootstrap: SDK ya presente, inicializando en el mismo turno");
                    *self.state.borrow_mut() = BootstrapState::Ready;
                    on_ready();
                    return;
                }

                *self.state.borrow_mut() = BootstrapState::Loading;
                self.waiters.borrow_mut().push(Box::new(on_ready));

                let state = self.state.clone();
                let waiters = self.waiters.clone();
                let on_loaded: ReadyCallback = Box::new(move || {
                    *state.borrow_mut() = BootstrapState::Ready;
                    let pending = std::mem::take(&mut *waiters.borrow_mut());
                    log::info!("✅ Bootstrap: SDK cargado ({} notificaciones)", pending.len());
                    for notify in pending {
                        notify();
                    }
                });

                let request = LoaderRequest::new(api_key);
                log::info!("📥 Bootstrap: inyectando script del SDK");
                if let Err(e) = self.env.inject_loader(&request, on_loaded) {
                    // Sin reintento: el componente queda inerte
                    log::error!("❌ Bootstrap: no se pudo inyectar el script: {}", e);
                }
            }
        }
    }
}
