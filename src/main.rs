use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod animation;
mod camera;
mod catalog;
mod config;
mod console;
mod loading;
mod scene;
mod texture;
mod ui;

// Import plugins
use animation::AnimationPlugin;
use camera::CameraPlugin;
use catalog::CatalogPlugin;
use config::ConfigPlugin;
use console::ConsolePlugin;
use loading::LoadingPlugin;
use scene::ScenePlugin;
use ui::UiPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Solar Explorer".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Feathers initializes `UiTheme` empty; unset tokens render in the fallback colour
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", palette::LIGHT_GRAY_1);
    theme.set_color("feathers.text.dim", palette::LIGHT_GRAY_2);
    theme.set_color("feathers.focus", palette::ACCENT);
    theme.set_color("feathers.button.bg", Color::srgba(0.06, 0.12, 0.16, 0.9));
    theme.set_color("feathers.button.bg.hover", Color::srgba(0.1, 0.22, 0.28, 0.95));
    theme.set_color("feathers.button.bg.pressed", Color::srgba(0.12, 0.3, 0.36, 0.95));
    theme.set_color("feathers.button.txt", Color::srgba(0.6, 1.0, 1.0, 1.0));
    // Primary marks the active route
    theme.set_color("feathers.button.primary.bg", Color::srgba(0.18, 0.55, 0.65, 0.95));
    theme.set_color("feathers.button.primary.bg.hover", Color::srgba(0.2, 0.6, 0.7, 0.98));
    theme.set_color("feathers.button.primary.bg.pressed", Color::srgba(0.22, 0.64, 0.74, 0.98));
    theme.set_color("feathers.button.primary.txt", Color::WHITE);
    app.insert_resource(theme);

    app.add_plugins(FeathersPlugins);
    app.add_plugins(PanOrbitCameraPlugin);

    // Config and catalog first: the scene and camera read them at startup
    app.add_plugins(ConfigPlugin);
    app.add_plugins(CatalogPlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(AnimationPlugin);
    app.add_plugins(CameraPlugin);
    app.add_plugins(ConsolePlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(LoadingPlugin);

    app.run();
}
