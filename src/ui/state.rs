//! UI state management

use bevy::prelude::*;

use crate::catalog::OVERVIEW_ID;

pub const PANEL_BG: Color = Color::srgba(0.0, 0.02, 0.08, 0.8);

/// Info panel visibility
#[derive(Resource, Default, Debug)]
pub struct InfoPanelState {
    /// Body whose card the user closed; it stays hidden until the next navigation
    pub dismissed: Option<String>,
}

impl InfoPanelState {
    /// Body the panel should describe, given the body the camera is bound to
    pub fn shown<'a>(&self, focus: Option<&'a str>) -> Option<&'a str> {
        focus.filter(|id| self.dismissed.as_deref() != Some(*id))
    }
}

/// Route a navigation button stands for
pub fn active_route(focus: Option<&str>) -> &str {
    focus.unwrap_or(OVERVIEW_ID)
}
