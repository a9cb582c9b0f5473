//! UI systems

use bevy::prelude::*;
use bevy_feathers::controls::ButtonVariant;
use bevy_ui_widgets::Activate;

use crate::camera::{CameraRig, NavigationRequest, NavigationTarget};
use crate::catalog::{Catalog, PlanetDescriptor};
use crate::ui::panels::{InfoField, InfoPanel, NavButton};
use crate::ui::state::{InfoPanelState, active_route};

/// Queue the navigation of an activated navigation button
pub fn activate_nav_button(
    activate: On<Activate>,
    buttons: Query<&NavButton>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    if let Ok(NavButton(target)) = buttons.get(activate.entity) {
        requests.write(NavigationRequest(target.clone()));
    }
}

fn route_variant(target: &NavigationTarget, route: &str) -> ButtonVariant {
    if target.id() == route {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Normal
    }
}

/// Highlight the button of the current route
pub fn style_nav_buttons(rig: Option<Res<CameraRig>>, mut buttons: Query<(&NavButton, &mut ButtonVariant)>) {
    let focus = rig.as_ref().and_then(|rig| rig.focus_body());
    let route = active_route(focus);
    for (NavButton(target), mut variant) in buttons.iter_mut() {
        let wanted = route_variant(target, route);
        if *variant != wanted {
            *variant = wanted;
        }
    }
}

/// Hide the card until the next navigation
pub fn close_info_panel(_activate: On<Activate>, rig: Option<Res<CameraRig>>, mut state: ResMut<InfoPanelState>) {
    state.dismissed = rig.and_then(|rig| rig.focus_body().map(str::to_string));
}

/// Any new navigation brings the card back
pub fn reset_dismissal(mut requests: MessageReader<NavigationRequest>, mut state: ResMut<InfoPanelState>) {
    if requests.read().count() > 0 && state.dismissed.is_some() {
        state.dismissed = None;
    }
}

fn field_text(planet: &PlanetDescriptor, field: InfoField) -> String {
    match field {
        InfoField::Name => planet.name.to_string(),
        InfoField::Category => planet.category.label().to_string(),
        InfoField::Description => planet.description.to_string(),
        InfoField::Size => format!("Size: {} units", planet.size),
        InfoField::Distance => format!("Distance: {} units", planet.distance),
        InfoField::Speed => format!("Speed: {} rad/frame", planet.angular_speed),
    }
}

/// Show the card of the body the camera is bound to
pub fn update_info_panel(
    rig: Option<Res<CameraRig>>,
    state: Res<InfoPanelState>,
    catalog: Res<Catalog>,
    mut shown: Local<Option<String>>,
    mut panel: Query<&mut Node, With<InfoPanel>>,
    mut fields: Query<(&InfoField, &mut Text, &mut TextColor)>,
) {
    let focus = rig.as_ref().and_then(|rig| rig.focus_body());
    let planet = state.shown(focus).and_then(|id| catalog.get(id));
    let id = planet.map(|p| p.id.to_string());
    if *shown == id {
        return;
    }
    *shown = id;

    let Ok(mut node) = panel.single_mut() else {
        warn!("update_info_panel: info panel not found");
        return;
    };
    let Some(planet) = planet else {
        node.display = Display::None;
        return;
    };
    node.display = Display::Flex;
    for (field, mut text, mut color) in fields.iter_mut() {
        **text = field_text(planet, *field);
        if *field == InfoField::Name {
            color.0 = planet.color.to_color();
        }
    }
}
