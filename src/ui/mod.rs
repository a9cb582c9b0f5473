//! User interface module
//!
//! Navigation buttons along the top edge and an info card for the body the
//! camera travels to. The buttons are feathers widgets whose `Activate`
//! observers talk to the camera through [`NavigationRequest`] messages, the
//! same path the console uses.
//!
//! [`NavigationRequest`]: crate::camera::NavigationRequest

use bevy::prelude::*;

pub mod panels;
pub mod state;
pub mod systems;

pub use state::InfoPanelState;

use crate::camera::CameraSet;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanelState>()
            .add_systems(
                Startup,
                (panels::spawn_navigation_bar, panels::spawn_info_panel),
            )
            .add_systems(
                Update,
                (
                    systems::reset_dismissal,
                    systems::style_nav_buttons,
                    systems::update_info_panel,
                )
                    .chain()
                    .after(CameraSet),
            );
    }
}
