// ============================================================================
// GOOGLE MAP COMPONENT - Wrapper Yew del componente de mapa
// ============================================================================
// Montaje: crea el MapComponent sobre el <div> del mapa
// Cambio de props: un batch de propiedades
// Desmontaje: teardown explícito
// ============================================================================

use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use crate::component::MapComponent;
use crate::config::CONFIG;
use crate::maps::web::WebMapsSdk;
use crate::models::{BoxBounds, EventEmitter, LatLng, MapEvent};
use crate::services::script_loader::WebSdkEnvironment;
use crate::state::DeclaredProperties;

pub type WebMapComponent = MapComponent<WebMapsSdk, WebSdkEnvironment>;

#[derive(Properties, PartialEq)]
pub struct GoogleMapProps {
    #[prop_or_default]
    pub api_key: AttrValue,
    /// Nombre del evento emitido al hacer click (vacío = no se emite)
    #[prop_or_default]
    pub click_event: AttrValue,
    #[prop_or_default]
    pub marker: Option<LatLng>,
    #[prop_or_default]
    pub box_bounds: Option<BoxBounds>,
    #[prop_or_default]
    pub map_id: AttrValue,
    #[prop_or(true)]
    pub show_layer: bool,
    #[prop_or(1.0)]
    pub layer_opacity: f64,
    #[prop_or_default]
    pub on_event: Callback<MapEvent>,
}

impl From<&GoogleMapProps> for DeclaredProperties {
    fn from(props: &GoogleMapProps) -> Self {
        Self {
            api_key: props.api_key.to_string(),
            click_event: props.click_event.to_string(),
            marker: props.marker,
            box_bounds: props.box_bounds,
            map_id: props.map_id.to_string(),
            show_layer: props.show_layer,
            layer_opacity: props.layer_opacity,
        }
    }
}

#[function_component(GoogleMap)]
pub fn google_map(props: &GoogleMapProps) -> Html {
    let container = use_node_ref();
    let component = use_mut_ref(|| None::<WebMapComponent>);

    // Último callback recibido del padre
    let on_event = use_mut_ref(|| props.on_event.clone());
    *on_event.borrow_mut() = props.on_event.clone();

    // Montaje / desmontaje
    {
        let container = container.clone();
        let component = component.clone();
        let on_event = on_event.clone();
        use_effect_with((), move |_| {
            match container.cast::<Element>() {
                Some(element) => {
                    let emitter: EventEmitter = Rc::new(move |event: MapEvent| {
                        let callback = on_event.borrow().clone();
                        callback.emit(event);
                    });
                    log::info!("🗺️ GoogleMap montado");
                    *component.borrow_mut() = Some(MapComponent::new(
                        WebMapsSdk::new(element),
                        WebSdkEnvironment,
                        &CONFIG,
                        emitter,
                    ));
                }
                None => log::warn!("⚠️ GoogleMap: contenedor no disponible"),
            }

            move || {
                if let Some(map) = component.borrow_mut().take() {
                    map.disconnect();
                }
            }
        });
    }

    // Cada cambio de props = un batch
    {
        let component = component.clone();
        let declared = DeclaredProperties::from(props);
        use_effect_with(declared, move |declared| {
            if let Some(map) = component.borrow().as_ref() {
                map.update(declared.clone());
            }
            || ()
        });
    }

    html! {
        <div ref={container} class="google-map" style="height: 100%; width: 100%;"></div>
    }
}
