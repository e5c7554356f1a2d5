// ============================================================================
// MAP COMPONENT - Ciclo de vida del componente de mapa
// ============================================================================
// - Primer batch de propiedades: arranca el bootstrap del SDK
// - Cada batch: diff explícito -> rutinas de sincronización
// - disconnect()/drop: libera listener y objetos del mapa
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::MapsConfig;
use crate::maps::MapsSdk;
use crate::models::EventEmitter;
use crate::services::bootstrap::{BootstrapState, SdkEnvironment, ServiceBootstrapper};
use crate::state::{ChangeSet, DeclaredProperties};
use crate::viewmodels::MapViewModel;

struct ComponentInner<Sdk: MapsSdk> {
    sdk: Sdk,
    props: Option<DeclaredProperties>,
    viewmodel: MapViewModel<Sdk::Session>,
}

/// Componente de mapa: una instancia por elemento del host
pub struct MapComponent<Sdk: MapsSdk + 'static, E: SdkEnvironment> {
    inner: Rc<RefCell<ComponentInner<Sdk>>>,
    bootstrapper: ServiceBootstrapper<E>,
    default_api_key: String,
    instance_id: String,
}

impl<Sdk: MapsSdk + 'static, E: SdkEnvironment> MapComponent<Sdk, E> {
    pub fn new(sdk: Sdk, env: E, config: &MapsConfig, emitter: EventEmitter) -> Self {
        let instance_id = uuid::Uuid::new_v4().to_string();
        log::debug!("🧩 Componente de mapa creado ({})", instance_id);
        Self {
            inner: Rc::new(RefCell::new(ComponentInner {
                sdk,
                props: None,
                viewmodel: MapViewModel::new(config, emitter),
            })),
            bootstrapper: ServiceBootstrapper::new(env),
            default_api_key: config.default_api_key.clone(),
            instance_id,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Propiedades vigentes (valores por defecto antes del primer batch)
    pub fn properties(&self) -> DeclaredProperties {
        self.inner.borrow().props.clone().unwrap_or_default()
    }

    pub fn has_session(&self) -> bool {
        self.inner.borrow().viewmodel.has_session()
    }

    pub fn bootstrap_state(&self) -> BootstrapState {
        self.bootstrapper.state()
    }

    /// Entregar un batch de propiedades (equivale a un ciclo de render del host)
    pub fn update(&self, next: DeclaredProperties) {
        let (changes, first_update) = {
            let mut inner = self.inner.borrow_mut();
            let changes = ChangeSet::between(inner.props.as_ref(), &next);
            let first_update = inner.props.is_none();
            inner.props = Some(next.clone());
            inner.viewmodel.mirror(&next);
            (changes, first_update)
        };

        if changes.is_empty() {
            return;
        }

        // Sin borrow activo: si el SDK ya está presente la sesión se crea aquí mismo
        if first_update {
            self.first_updated(&next.api_key);
        }

        log::debug!("🔄 [{}] Batch de cambios: {:?}", self.instance_id, changes);
        self.inner.borrow_mut().viewmodel.apply(&changes, &next);
    }

    /// Modificar las propiedades vigentes y entregar el batch resultante
    pub fn update_with<F>(&self, edit: F)
    where
        F: FnOnce(&mut DeclaredProperties),
    {
        let mut next = self.properties();
        edit(&mut next);
        self.update(next);
    }

    fn first_updated(&self, api_key: &str) {
        let api_key = if api_key.is_empty() {
            self.default_api_key.as_str()
        } else {
            api_key
        };

        let weak = Rc::downgrade(&self.inner);
        let instance_id = self.instance_id.clone();
        self.bootstrapper.ensure_ready(api_key, move || {
            // El componente pudo destruirse mientras cargaba el SDK
            let Some(inner) = weak.upgrade() else {
                log::debug!("🔌 [{}] SDK listo pero el componente ya no existe", instance_id);
                return;
            };
            let mut guard = inner.borrow_mut();
            let ComponentInner { sdk, viewmodel, .. } = &mut *guard;
            viewmodel.initialize_session(&*sdk);
        });
    }

    /// Teardown explícito (el host desconecta el elemento)
    pub fn disconnect(&self) {
        log::info!("🔌 [{}] Componente desconectado", self.instance_id);
        self.inner.borrow_mut().viewmodel.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::testing::{self, FakeEnvironment, FakeSdk, SharedLog};
    use crate::models::{LatLng, MapEvent, TileCoord};

    type TestComponent = MapComponent<FakeSdk, FakeEnvironment>;

    fn component(sdk_present: bool) -> (TestComponent, SharedLog, FakeEnvironment, Rc<RefCell<Vec<MapEvent>>>) {
        let (sdk, log) = FakeSdk::new();
        let env = FakeEnvironment::with_sdk_present(sdk_present);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let emitter: EventEmitter = Rc::new(move |event: MapEvent| sink.borrow_mut().push(event));
        let component = MapComponent::new(sdk, env.clone(), &MapsConfig::default(), emitter);
        (component, log, env, events)
    }

    #[test]
    fn test_sdk_present_initializes_on_first_update() {
        let (component, log, env, _) = component(true);
        component.update(DeclaredProperties {
            api_key: "k".to_string(),
            ..Default::default()
        });

        assert!(component.has_session());
        assert_eq!(component.bootstrap_state(), BootstrapState::Ready);
        assert!(env.log.borrow().injected.is_empty());
        assert_eq!(log.borrow().sessions_created, 1);
    }

    #[test]
    fn test_sdk_loaded_later_initializes_once() {
        let (component, log, env, _) = component(false);
        component.update(DeclaredProperties {
            api_key: "KEY".to_string(),
            map_id: "abc".to_string(),
            ..Default::default()
        });
        assert!(!component.has_session());
        assert_eq!(
            env.log.borrow().injected,
            vec!["https://maps.googleapis.com/maps/api/js?key=KEY&callback=initMap&loading=async".to_string()]
        );

        // Más batches mientras carga: ningún script nuevo
        component.update_with(|p| p.layer_opacity = 0.3);
        assert_eq!(env.log.borrow().injected.len(), 1);

        env.finish_load();
        assert!(component.has_session());
        assert_eq!(log.borrow().sessions_created, 1);
        // El overlay declarado se aplica al crear la sesión
        assert_eq!(log.borrow().overlays.len(), 1);
        assert_eq!(log.borrow().overlays[0].opacity, Some(0.3));
    }

    #[test]
    fn test_marker_before_async_load_waits_for_next_change() {
        let (component, log, env, _) = component(false);
        component.update(DeclaredProperties {
            marker: Some(LatLng::new(5.0, 5.0)),
            ..Default::default()
        });
        env.finish_load();
        assert!(log.borrow().markers.is_empty());

        component.update_with(|p| p.marker = Some(LatLng::new(6.0, 6.0)));
        assert_eq!(log.borrow().markers.len(), 1);
    }

    #[test]
    fn test_marker_applied_in_first_batch_when_sdk_present() {
        let (component, log, _, _) = component(true);
        component.update(DeclaredProperties {
            marker: Some(LatLng::new(5.0, 5.0)),
            ..Default::default()
        });
        assert_eq!(log.borrow().markers.len(), 1);
    }

    #[test]
    fn test_overlay_scenario() {
        let (component, log, _, _) = component(true);
        component.update(DeclaredProperties {
            map_id: "abc".to_string(),
            show_layer: true,
            layer_opacity: 0.5,
            ..Default::default()
        });

        assert_eq!(log.borrow().overlays_created, 1);
        assert_eq!(log.borrow().overlays[0].opacity, Some(0.5));
        assert_eq!(
            testing::request_tile(&log, 0, TileCoord::new(3, 1, 2)).as_deref(),
            Some("https://earthengine.googleapis.com/v1/abc/tiles/3/1/2")
        );
    }

    #[test]
    fn test_click_scenarios() {
        let (component, log, _, events) = component(true);
        component.update(DeclaredProperties {
            click_event: "mapClicked".to_string(),
            ..Default::default()
        });

        testing::click(&log, LatLng::new(10.0, 20.0));
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].name, "mapClicked");
        assert_eq!(events.borrow()[0].payload.lat, 10.0);
        assert_eq!(events.borrow()[0].payload.lng, 20.0);

        component.update_with(|p| p.click_event.clear());
        testing::click(&log, LatLng::new(10.0, 20.0));
        assert_eq!(events.borrow().len(), 1);
        // Un único listener durante toda la sesión
        assert_eq!(log.borrow().listeners.len(), 1);
    }

    #[test]
    fn test_marker_then_null_keeps_marker() {
        let (component, log, _, _) = component(true);
        component.update(DeclaredProperties::default());
        component.update_with(|p| p.marker = Some(LatLng::new(1.0, 1.0)));
        component.update_with(|p| p.marker = None);

        assert_eq!(log.borrow().markers.len(), 1);
        assert_eq!(log.borrow().markers[0].1, LatLng::new(1.0, 1.0));
    }

    #[test]
    fn test_disconnect_releases_resources() {
        let (component, log, _, _) = component(true);
        component.update(DeclaredProperties {
            map_id: "abc".to_string(),
            marker: Some(LatLng::new(1.0, 1.0)),
            ..Default::default()
        });

        component.disconnect();
        {
            let log = log.borrow();
            assert!(log.listeners.is_empty());
            assert!(log.markers.is_empty());
            assert!(log.overlays.is_empty());
        }
        assert!(!component.has_session());

        // Batches posteriores no hacen nada
        component.update_with(|p| p.marker = Some(LatLng::new(2.0, 2.0)));
        assert!(log.borrow().markers.is_empty());
    }

    #[test]
    fn test_dropped_before_load_is_inert() {
        let (component, log, env, _) = component(false);
        component.update(DeclaredProperties::default());
        drop(component);

        env.finish_load();
        assert_eq!(log.borrow().sessions_created, 0);
    }

    #[test]
    fn test_empty_api_key_uses_configured_default() {
        let (sdk, _) = FakeSdk::new();
        let env = FakeEnvironment::default();
        let config = MapsConfig {
            default_api_key: "FROM_ENV".to_string(),
            ..Default::default()
        };
        let component = MapComponent::new(sdk, env.clone(), &config, Rc::new(|_: MapEvent| {}));
        component.update(DeclaredProperties::default());

        assert!(env.log.borrow().injected[0].contains("key=FROM_ENV&"));
    }

    fn on_page(env: &FakeEnvironment) -> (TestComponent, SharedLog) {
        let (sdk, log) = FakeSdk::new();
        let component = MapComponent::new(sdk, env.clone(), &MapsConfig::default(), Rc::new(|_: MapEvent| {}));
        (component, log)
    }

    #[test]
    fn test_two_components_share_one_script() {
        let page = FakeEnvironment::default();
        let (first, first_log) = on_page(&page);
        let (second, second_log) = on_page(&page);

        first.update(DeclaredProperties::default());
        second.update(DeclaredProperties::default());
        assert_eq!(page.log.borrow().injected.len(), 1);

        page.finish_load();
        assert!(first.has_session());
        assert!(second.has_session());
        assert_eq!(first_log.borrow().sessions_created, 1);
        assert_eq!(second_log.borrow().sessions_created, 1);
    }

    #[test]
    fn test_component_arriving_mid_load_waits_for_callback() {
        let page = FakeEnvironment::default();
        let (first, _) = on_page(&page);
        first.update(DeclaredProperties::default());

        // `google.maps` ya existe pero `initMap` aún no se ejecutó
        page.evaluate_script();
        let (second, second_log) = on_page(&page);
        second.update(DeclaredProperties::default());

        assert!(!second.has_session());
        assert_eq!(second.bootstrap_state(), BootstrapState::Loading);
        assert_eq!(second_log.borrow().sessions_created, 0);
        assert_eq!(page.log.borrow().injected.len(), 1);

        page.finish_load();
        assert!(first.has_session());
        assert!(second.has_session());

        // Tras la carga, una instancia nueva inicializa en el mismo turno
        let (third, _) = on_page(&page);
        third.update(DeclaredProperties::default());
        assert!(third.has_session());
        assert_eq!(page.log.borrow().injected.len(), 1);
    }
}
