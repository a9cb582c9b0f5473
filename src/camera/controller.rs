//! Camera state machine
//!
//! The controller owns the camera pose whenever it is not in free orbit. A
//! navigation request starts a timed linear transition; when the transition
//! lands on a body the controller keeps following it at a fixed offset.

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::catalog::{Catalog, OVERVIEW_ID};
use crate::config::SceneConfig;

/// Camera position and the point it looks at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn lerp(self, other: CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Where the camera should go
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// The whole system seen from the home pose
    Overview,
    Body(String),
}

impl NavigationTarget {
    /// Parse a navigation id; `solar-system` addresses the overview
    pub fn parse(id: &str) -> Self {
        if id == OVERVIEW_ID {
            NavigationTarget::Overview
        } else {
            NavigationTarget::Body(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NavigationTarget::Overview => OVERVIEW_ID,
            NavigationTarget::Body(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown navigation target `{0}`")]
    UnknownTarget(String),
    #[error("body `{0}` is not in the scene")]
    Untracked(String),
}

/// Time boxed interpolation between two poses
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub start: Duration,
    pub duration: Duration,
    pub from: CameraPose,
    pub to: CameraPose,
    /// Body to follow, and the camera offset from it, once the transition lands
    pub follow: Option<(String, Vec3)>,
}

impl Transition {
    /// Elapsed fraction in `[0, 1]`
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CameraMode {
    Free,
    Transitioning(Transition),
    Following { body: String, offset: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    Free,
    Transitioning,
    Following,
}

#[derive(Clone, Debug)]
pub struct CameraController {
    mode: CameraMode,
    pose: CameraPose,
    home: CameraPose,
    duration: Duration,
    smoothing: f32,
    config: SceneConfig,
}

impl CameraController {
    pub fn new(config: &SceneConfig) -> Self {
        let home = CameraPose::new(config.home_position(), Vec3::ZERO);
        Self {
            mode: CameraMode::Free,
            pose: home,
            home,
            duration: Duration::from_millis(config.transition_ms),
            smoothing: config.follow_smoothing,
            config: config.clone(),
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn home(&self) -> CameraPose {
        self.home
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn state(&self) -> CameraState {
        match self.mode {
            CameraMode::Free => CameraState::Free,
            CameraMode::Transitioning(_) => CameraState::Transitioning,
            CameraMode::Following { .. } => CameraState::Following,
        }
    }

    /// Body the camera is heading to or tracking
    pub fn focus_body(&self) -> Option<&str> {
        match &self.mode {
            CameraMode::Free => None,
            CameraMode::Transitioning(transition) => {
                transition.follow.as_ref().map(|(body, _)| body.as_str())
            }
            CameraMode::Following { body, .. } => Some(body),
        }
    }

    /// Adopt the live camera pose. Only honoured in free orbit.
    pub fn sync_pose(&mut self, pose: CameraPose) {
        if self.mode == CameraMode::Free {
            self.pose = pose;
        }
    }

    /// Pose framing a body at `position` with the given size
    pub fn body_pose(&self, position: Vec3, size: f32) -> CameraPose {
        let d = self.config.framing_distance(size);
        CameraPose::new(position + Vec3::new(0.0, 0.5 * d, d), position)
    }

    /// Start a transition to `target`, replacing whatever drove the camera before
    ///
    /// `locate` returns the current world position of a body by id.
    pub fn navigate(
        &mut self,
        target: &NavigationTarget,
        now: Duration,
        catalog: &Catalog,
        locate: impl Fn(&str) -> Option<Vec3>,
    ) -> Result<(), NavigationError> {
        let (to, follow) = match target {
            NavigationTarget::Overview => (self.home, None),
            NavigationTarget::Body(id) => {
                let planet = catalog
                    .get(id)
                    .ok_or_else(|| NavigationError::UnknownTarget(id.clone()))?;
                let position = locate(planet.id)
                    .ok_or_else(|| NavigationError::Untracked(id.clone()))?;
                let to = self.body_pose(position, planet.size);
                (to, Some((planet.id.to_string(), to.position - position)))
            }
        };

        self.mode = CameraMode::Transitioning(Transition {
            start: now,
            duration: self.duration,
            from: self.pose,
            to,
            follow,
        });
        Ok(())
    }

    /// Advance one frame. Returns the pose to apply when the controller drives the camera.
    pub fn update(
        &mut self,
        now: Duration,
        locate: impl Fn(&str) -> Option<Vec3>,
    ) -> Option<CameraPose> {
        match &self.mode {
            CameraMode::Free => None,
            CameraMode::Following { body, offset } => {
                let Some(position) = locate(body) else {
                    warn!("Followed body `{body}` is gone; releasing the camera");
                    self.mode = CameraMode::Free;
                    return None;
                };
                let destination = CameraPose::new(position + *offset, position);
                self.pose.position += (destination.position - self.pose.position) * self.smoothing;
                self.pose.target += (destination.target - self.pose.target) * self.smoothing;
                Some(self.pose)
            }
            CameraMode::Transitioning(transition) => {
                let t = transition.progress(now);
                if t < 1.0 {
                    self.pose = transition.from.lerp(transition.to, t);
                    return Some(self.pose);
                }

                self.pose = transition.to;
                self.mode = match &transition.follow {
                    Some((body, offset)) => {
                        info!("Arrived at `{body}`, following");
                        CameraMode::Following {
                            body: body.clone(),
                            offset: *offset,
                        }
                    }
                    None => {
                        info!("Arrived at overview");
                        CameraMode::Free
                    }
                };
                Some(self.pose)
            }
        }
    }
}
