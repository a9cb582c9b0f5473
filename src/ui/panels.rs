//! UI layout: navigation bar and body info card

use bevy::prelude::*;
use bevy_feathers::controls::{ButtonProps, button};
use bevy_feathers::theme::ThemedText;
use bevy_ui_widgets::observe;

use crate::camera::NavigationTarget;
use crate::catalog::Catalog;
use crate::ui::state::PANEL_BG;
use crate::ui::systems::{activate_nav_button, close_info_panel};

/// Button that queues a navigation when activated
#[derive(Component, Clone, Debug)]
pub struct NavButton(pub NavigationTarget);

#[derive(Component)]
pub struct InfoPanel;

#[derive(Component)]
pub struct InfoClose;

/// Field of the info card a text node displays
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoField {
    Name,
    Category,
    Description,
    Size,
    Distance,
    Speed,
}

fn nav_button(label: String, target: NavigationTarget) -> impl Bundle {
    (
        button(
            ButtonProps::default(),
            NavButton(target),
            Spawn((Text::new(label), ThemedText)),
        ),
        observe(activate_nav_button),
    )
}

pub fn spawn_navigation_bar(mut commands: Commands, catalog: Res<Catalog>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                right: Val::Px(12.0),
                justify_content: JustifyContent::Center,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(6.0),
                row_gap: Val::Px(6.0),
                ..default()
            },
            Name::new("Navigation Bar"),
        ))
        .with_children(|bar| {
            bar.spawn(nav_button("Solar System".to_string(), NavigationTarget::Overview));
            for planet in catalog.iter() {
                bar.spawn(nav_button(planet.name.to_string(), NavigationTarget::Body(planet.id.to_string())));
            }
        });
}

pub fn spawn_info_panel(mut commands: Commands) {
    let body_font = TextFont {
        font_size: 13.0,
        ..default()
    };
    let row = |field: InfoField| (field, Text::new(""), body_font.clone(), TextColor(Color::WHITE));

    commands
        .spawn((
            InfoPanel,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(64.0),
                right: Val::Px(12.0),
                width: Val::Px(300.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(4.0),
                display: Display::None,
                ..default()
            },
            BackgroundColor(PANEL_BG),
            Name::new("Info Panel"),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|header| {
                    header.spawn((
                        InfoField::Name,
                        Text::new(""),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    // Fixed slot; feathers buttons grow to fill their parent
                    header
                        .spawn(Node {
                            width: Val::Px(28.0),
                            ..default()
                        })
                        .with_child((
                            button(ButtonProps::default(), InfoClose, Spawn((Text::new("x"), ThemedText))),
                            observe(close_info_panel),
                        ));
                });
            panel.spawn(row(InfoField::Category));
            panel.spawn(row(InfoField::Description));
            panel.spawn(row(InfoField::Size));
            panel.spawn(row(InfoField::Distance));
            panel.spawn(row(InfoField::Speed));
        });
}
