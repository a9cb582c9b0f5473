//! Startup loading overlay
//!
//! Purely cosmetic: the bar fills in random steps, holds at 100%, fades out
//! and the overlay is removed. It does not track any real asset loading.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

/// Interval between progress steps
pub const STEP_INTERVAL: Duration = Duration::from_millis(50);
pub const HOLD: Duration = Duration::from_millis(500);
pub const FADE: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadingPhase {
    Filling,
    Holding(Duration),
    Fading(Duration),
    Done,
}

/// Progress value in percent and the phase of the overlay
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct LoadingProgress {
    value: f32,
    phase: LoadingPhase,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self {
            value: 0.0,
            phase: LoadingPhase::Filling,
        }
    }
}

impl LoadingProgress {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == LoadingPhase::Done
    }

    /// Add one random step; no effect once the bar is full
    pub fn step(&mut self, increment: f32) {
        if self.phase != LoadingPhase::Filling {
            return;
        }
        self.value = (self.value + increment).min(100.0);
        if self.value >= 100.0 {
            self.phase = LoadingPhase::Holding(Duration::ZERO);
        }
    }

    /// Advance the hold and fade clocks
    pub fn advance(&mut self, delta: Duration) {
        self.phase = match self.phase {
            LoadingPhase::Holding(elapsed) => {
                let elapsed = elapsed + delta;
                if elapsed >= HOLD {
                    LoadingPhase::Fading(elapsed - HOLD)
                } else {
                    LoadingPhase::Holding(elapsed)
                }
            }
            LoadingPhase::Fading(elapsed) => {
                let elapsed = elapsed + delta;
                if elapsed >= FADE {
                    LoadingPhase::Done
                } else {
                    LoadingPhase::Fading(elapsed)
                }
            }
            phase => phase,
        };
    }

    pub fn opacity(&self) -> f32 {
        match self.phase {
            LoadingPhase::Filling | LoadingPhase::Holding(_) => 1.0,
            LoadingPhase::Fading(elapsed) => 1.0 - elapsed.as_secs_f32() / FADE.as_secs_f32(),
            LoadingPhase::Done => 0.0,
        }
    }
}

/// Random step size in `[2, 5)` percent
pub fn random_increment<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    2.0 + 3.0 * rng.random::<f32>()
}

#[derive(Resource)]
struct StepTimer(Timer);

#[derive(Component)]
struct LoadingOverlay;

#[derive(Component)]
struct LoadingBar;

#[derive(Component)]
struct LoadingLabel;

const OVERLAY_COLOR: Color = Color::srgb_u8(0x00, 0x00, 0x22);
const BAR_COLOR: Color = Color::srgb(0.18, 0.7, 0.8);

/// Plugin for the loading overlay
pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingProgress>()
            .insert_resource(StepTimer(Timer::new(STEP_INTERVAL, TimerMode::Repeating)))
            .add_systems(Startup, spawn_overlay)
            .add_systems(
                Update,
                (tick_progress, draw_overlay)
                    .chain()
                    .run_if(not(resource_exists::<LoadingFinished>)),
            );
    }
}

/// Inserted once the overlay is gone
#[derive(Resource)]
pub struct LoadingFinished;

fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        LoadingOverlay,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            ..default()
        },
        BackgroundColor(OVERLAY_COLOR),
        GlobalZIndex(100),
        Name::new("Loading Overlay"),
        children![
            (
                LoadingLabel,
                Text::new("Loading solar system... 0%"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ),
            (
                Node {
                    width: Val::Px(320.0),
                    height: Val::Px(8.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.15)),
                children![(
                    LoadingBar,
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(BAR_COLOR),
                )],
            ),
        ],
    ));
}

fn tick_progress(time: Res<Time<Real>>, mut timer: ResMut<StepTimer>, mut progress: ResMut<LoadingProgress>) {
    timer.0.tick(time.delta());
    let steps = timer.0.times_finished_this_tick();
    if progress.phase() == LoadingPhase::Filling && steps > 0 {
        let mut rng = rand::rng();
        for _ in 0..steps {
            progress.step(random_increment(&mut rng));
        }
        if progress.phase() != LoadingPhase::Filling {
            debug!("Loading bar full");
        }
        return;
    }
    if progress.phase() != LoadingPhase::Filling {
        progress.advance(time.delta());
    }
}

fn draw_overlay(
    mut commands: Commands,
    progress: Res<LoadingProgress>,
    overlay: Query<Entity, With<LoadingOverlay>>,
    mut backgrounds: Query<&mut BackgroundColor>,
    mut bar: Query<(Entity, &mut Node), With<LoadingBar>>,
    mut label: Query<(&mut Text, &mut TextColor), With<LoadingLabel>>,
) {
    if !progress.is_changed() {
        return;
    }
    let Ok(root) = overlay.single() else {
        return;
    };

    if progress.is_done() {
        commands.entity(root).despawn();
        commands.insert_resource(LoadingFinished);
        info!("Loading overlay dismissed");
        return;
    }

    let opacity = progress.opacity();
    if let Ok(mut background) = backgrounds.get_mut(root) {
        background.0 = OVERLAY_COLOR.with_alpha(opacity);
    }
    if let Ok((bar, mut node)) = bar.single_mut() {
        node.width = Val::Percent(progress.value());
        if let Ok(mut background) = backgrounds.get_mut(bar) {
            background.0 = BAR_COLOR.with_alpha(opacity);
        }
    }
    if let Ok((mut text, mut color)) = label.single_mut() {
        **text = format!("Loading solar system... {}%", progress.value().floor());
        color.0 = Color::WHITE.with_alpha(opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_increment_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..1000 {
            let step = random_increment(&mut rng);
            assert!((2.0..5.0).contains(&step));
        }
    }

    #[test]
    fn test_progress_lifecycle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut progress = LoadingProgress::default();
        let mut steps = 0;
        let mut last = 0.0;
        while progress.phase() == LoadingPhase::Filling {
            progress.step(random_increment(&mut rng));
            assert!(progress.value() > last);
            last = progress.value();
            steps += 1;
        }
        // 100% in 20 to 50 steps of 50ms
        assert!((20..=50).contains(&steps));
        assert_eq!(progress.value(), 100.0);
        assert_eq!(progress.opacity(), 1.0);

        progress.step(5.0);
        assert_eq!(progress.value(), 100.0);

        progress.advance(Duration::from_millis(400));
        assert_eq!(progress.phase(), LoadingPhase::Holding(Duration::from_millis(400)));
        progress.advance(Duration::from_millis(600));
        assert_eq!(progress.phase(), LoadingPhase::Fading(Duration::from_millis(500)));
        assert!((progress.opacity() - 0.5).abs() < 1e-6);

        progress.advance(Duration::from_millis(500));
        assert!(progress.is_done());
        assert_eq!(progress.opacity(), 0.0);
    }

    #[test]
    fn test_filling_ignores_clock() {
        let mut progress = LoadingProgress::default();
        progress.advance(Duration::from_secs(10));
        assert_eq!(progress, LoadingProgress::default());
    }
}
