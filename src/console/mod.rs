//! Command console overlay
//!
//! The interpreter state lives in the [`Console`] resource; this module only
//! feeds it keystrokes, forwards the navigation it asks for, and mirrors its
//! scrollback into a fixed set of text rows.
//!
//! Keystrokes reach the interpreter only while the console panel holds
//! [`InputFocus`]. Clicking the panel focuses it; clicking anywhere else
//! releases it.

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy_feathers::controls::{ButtonProps, button};
use bevy_feathers::theme::ThemedText;
use bevy_input_focus::InputFocus;
use bevy_input_focus::tab_navigation::TabIndex;
use bevy_ui_widgets::{Activate, observe};

pub mod interpreter;

pub use interpreter::{Console, LineKind, OutputLine};

use crate::camera::{CameraSet, NavigationRejected, NavigationRequest};
use crate::catalog::Catalog;

/// Scrollback rows shown on screen
const VISIBLE_LINES: usize = 12;
const FONT_SIZE: f32 = 13.0;
const PROMPT_IDLE: Color = Color::srgb(0.55, 0.55, 0.6);

/// Console panel; the focus target for typing
#[derive(Component)]
struct ConsoleRoot;

#[derive(Component)]
struct ConsoleBody;

/// Text row showing the n-th most recent visible line, counted from the top
#[derive(Component)]
struct ConsoleLine(usize);

#[derive(Component)]
struct ConsolePrompt;

#[derive(Component)]
struct ConsoleToggle;

/// Plugin for the command console
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Console>()
            .init_resource::<InputFocus>()
            .add_systems(Startup, (greet, spawn_console))
            .add_systems(Update, read_keyboard.before(CameraSet))
            .add_systems(
                Update,
                (report_rejections, redraw_console).chain().after(read_keyboard),
            );
    }
}

fn line_color(kind: LineKind) -> Color {
    match kind {
        LineKind::Echo => Color::srgb(0.55, 0.85, 1.0),
        LineKind::Info => Color::srgb(0.85, 0.85, 0.85),
        LineKind::Error => Color::srgb(1.0, 0.45, 0.4),
    }
}

fn greet(mut console: ResMut<Console>) {
    console.print("Solar Explorer console. Type \"help\" for commands.");
}

fn spawn_console(mut commands: Commands) {
    let font = TextFont {
        font_size: FONT_SIZE,
        ..default()
    };

    commands
        .spawn((
            ConsoleRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                bottom: Val::Px(12.0),
                width: Val::Px(480.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.02, 0.08, 0.75)),
            // Pointer presses bubble up to the nearest TabIndex and focus it
            TabIndex(0),
            Name::new("Console"),
        ))
        .with_children(|root| {
            root.spawn(Node {
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|header| {
                header.spawn((Text::new("Console"), font.clone(), TextColor(Color::WHITE)));
                header
                    .spawn(Node {
                        width: Val::Px(28.0),
                        ..default()
                    })
                    .with_child((
                        button(
                            ButtonProps::default(),
                            ConsoleToggle,
                            Spawn((Text::new("_"), ThemedText)),
                        ),
                        observe(toggle_console),
                    ));
            });

            root.spawn((
                ConsoleBody,
                Node {
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
            ))
            .with_children(|body| {
                for row in 0..VISIBLE_LINES {
                    body.spawn((ConsoleLine(row), Text::new(""), font.clone(), TextColor(Color::NONE)));
                }
                body.spawn((ConsolePrompt, Text::new("> "), font.clone(), TextColor(PROMPT_IDLE)));
            });
        });
}

/// Feed keystrokes to the interpreter and queue the navigation it produces
fn read_keyboard(
    mut keys: MessageReader<KeyboardInput>,
    focus: Res<InputFocus>,
    root: Query<Entity, With<ConsoleRoot>>,
    mut console: ResMut<Console>,
    catalog: Res<Catalog>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    let focused = root.single().is_ok_and(|root| focus.get() == Some(root));
    if !focused {
        // Keys typed elsewhere must not reach the console later
        keys.clear();
        return;
    }
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Enter => {
                if let Some(target) = console.submit(&catalog) {
                    requests.write(NavigationRequest(target));
                }
            }
            Key::Backspace => console.backspace(),
            Key::ArrowUp => console.history_prev(),
            Key::ArrowDown => console.history_next(),
            Key::Escape => console.clear_input(),
            Key::Space => console.push_str(" "),
            Key::Character(text) => console.push_str(text.as_str()),
            _ => {}
        }
    }
}

fn toggle_console(
    activate: On<Activate>,
    buttons: Query<&Children, With<ConsoleToggle>>,
    mut labels: Query<&mut Text>,
    mut console: ResMut<Console>,
) {
    let Ok(children) = buttons.get(activate.entity) else {
        return;
    };
    console.toggle_minimized();
    let label = if console.is_minimized() { "+" } else { "_" };
    for child in children.iter() {
        if let Ok(mut text) = labels.get_mut(child) {
            **text = label.to_string();
        }
    }
}

fn report_rejections(mut rejected: MessageReader<NavigationRejected>, mut console: ResMut<Console>) {
    for NavigationRejected(err) in rejected.read() {
        console.error(format!("Navigation failed: {err}"));
    }
}

fn redraw_console(
    console: Res<Console>,
    focus: Res<InputFocus>,
    root: Query<Entity, With<ConsoleRoot>>,
    mut body: Query<&mut Node, With<ConsoleBody>>,
    mut rows: Query<(&ConsoleLine, &mut Text, &mut TextColor), Without<ConsolePrompt>>,
    mut prompt: Query<(&mut Text, &mut TextColor), (With<ConsolePrompt>, Without<ConsoleLine>)>,
) {
    if !console.is_changed() && !focus.is_changed() {
        return;
    }
    let focused = root.single().is_ok_and(|root| focus.get() == Some(root));

    if let Ok(mut node) = body.single_mut() {
        node.display = if console.is_minimized() {
            Display::None
        } else {
            Display::Flex
        };
    }

    let visible: Vec<&OutputLine> = console.output().rev().take(VISIBLE_LINES).collect();
    // Newest line sits on the bottom row
    let offset = VISIBLE_LINES - visible.len();
    for (row, mut text, mut color) in rows.iter_mut() {
        match row.0.checked_sub(offset).and_then(|i| visible.get(visible.len() - 1 - i)) {
            Some(line) => {
                **text = line.render();
                color.0 = line_color(line.kind);
            }
            None => {
                text.clear();
                color.0 = Color::NONE;
            }
        }
    }

    if let Ok((mut text, mut color)) = prompt.single_mut() {
        if focused {
            **text = format!("> {}_", console.input());
            color.0 = Color::WHITE;
        } else if console.input().is_empty() {
            **text = "> (click here to type)".to_string();
            color.0 = PROMPT_IDLE;
        } else {
            **text = format!("> {}", console.input());
            color.0 = PROMPT_IDLE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::input::keyboard::KeyCode;

    use crate::camera::NavigationTarget;

    fn key(code: KeyCode, logical: Key) -> KeyboardInput {
        KeyboardInput {
            key_code: code,
            logical_key: logical,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        }
    }

    fn console_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Console>()
            .init_resource::<InputFocus>()
            .insert_resource(Catalog::solar_system())
            .add_message::<KeyboardInput>()
            .add_message::<NavigationRequest>()
            .add_systems(Update, read_keyboard);
        let root = app.world_mut().spawn(ConsoleRoot).id();
        (app, root)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            let logical = if c == ' ' {
                Key::Space
            } else {
                Key::Character(c.to_string().into())
            };
            app.world_mut().write_message(key(KeyCode::KeyA, logical));
        }
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let (mut app, _) = console_app();
        type_text(&mut app, "help");
        app.update();
        assert_eq!(app.world().resource::<Console>().input(), "");
    }

    #[test]
    fn test_keys_typed_elsewhere_are_dropped() {
        let (mut app, root) = console_app();
        type_text(&mut app, "abc");
        app.update();

        app.world_mut().insert_resource(InputFocus::from_entity(root));
        type_text(&mut app, "ir");
        app.update();
        assert_eq!(app.world().resource::<Console>().input(), "ir");
    }

    #[test]
    fn test_focused_console_runs_commands() {
        let (mut app, root) = console_app();
        app.world_mut().insert_resource(InputFocus::from_entity(root));
        type_text(&mut app, "ir marte");
        app.world_mut().write_message(key(KeyCode::Enter, Key::Enter));
        app.update();

        let console = app.world().resource::<Console>();
        assert_eq!(console.input(), "");
        assert_eq!(console.history().collect::<Vec<_>>(), vec!["ir marte"]);

        let targets: Vec<NavigationTarget> = app
            .world_mut()
            .resource_mut::<Messages<NavigationRequest>>()
            .drain()
            .map(|NavigationRequest(target)| target)
            .collect();
        assert_eq!(targets, vec![NavigationTarget::Body("mars".into())]);
    }

    #[test]
    fn test_focus_on_another_widget_blocks_keys() {
        let (mut app, _) = console_app();
        let other = app.world_mut().spawn_empty().id();
        app.world_mut().insert_resource(InputFocus::from_entity(other));
        type_text(&mut app, "x");
        app.update();
        assert_eq!(app.world().resource::<Console>().input(), "");
    }
}
