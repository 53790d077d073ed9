//! Scroll-driven scene targets for the 3D experience page.
//!
//! The page is split into sections. Scroll progress selects the active
//! section; each section has a camera and avatar target, and the displayed
//! scene state is tweened toward the active target. The browser renders the
//! scene; this module owns the section table and the interpolation rules so
//! they can be served to the client and tested.

use serde::Serialize;

/// Seconds a retarget tween takes to settle.
pub const TWEEN_DURATION_SECS: f32 = 1.2;

pub type Vec3 = [f32; 3];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarTarget {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

/// Camera and avatar transform for one section, or the current displayed state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneState {
    pub camera: CameraTarget,
    pub avatar: AvatarTarget,
}

/// Targets for each section, in scroll order.
pub const SECTION_TARGETS: [SceneState; 4] = [
    // Intro
    SceneState {
        camera: CameraTarget { position: [0.0, 1.5, 6.0], look_at: [0.0, 1.0, 0.0], fov: 42.0 },
        avatar: AvatarTarget { position: [0.0, 0.0, 0.0], rotation: [0.0, 0.0, 0.0], scale: 1.0 },
    },
    // Skills
    SceneState {
        camera: CameraTarget { position: [2.5, 1.8, 5.0], look_at: [0.5, 1.0, 0.0], fov: 38.0 },
        avatar: AvatarTarget { position: [-1.2, 0.0, 0.5], rotation: [0.0, 0.6, 0.0], scale: 0.9 },
    },
    // Projects
    SceneState {
        camera: CameraTarget { position: [-3.0, 2.2, 4.5], look_at: [-0.5, 1.2, 0.0], fov: 45.0 },
        avatar: AvatarTarget { position: [1.5, 0.0, -0.5], rotation: [0.0, -0.8, 0.0], scale: 0.8 },
    },
    // Contact
    SceneState {
        camera: CameraTarget { position: [0.0, 1.2, 3.5], look_at: [0.0, 1.4, 0.0], fov: 35.0 },
        avatar: AvatarTarget { position: [0.0, 0.0, 1.0], rotation: [0.0, 0.0, 0.0], scale: 1.1 },
    },
];

/// Active section for a scroll progress in `0..=1` over `pages` sections.
pub fn section_index(progress: f32, pages: usize) -> usize {
    if pages == 0 || !progress.is_finite() {
        return 0;
    }
    let raw = (progress.clamp(0.0, 1.0) * pages as f32).floor() as usize;
    raw.min(pages - 1)
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

impl SceneState {
    pub fn lerp(&self, to: &SceneState, t: f32) -> SceneState {
        SceneState {
            camera: CameraTarget {
                position: lerp3(self.camera.position, to.camera.position, t),
                look_at: lerp3(self.camera.look_at, to.camera.look_at, t),
                fov: lerp(self.camera.fov, to.camera.fov, t),
            },
            avatar: AvatarTarget {
                position: lerp3(self.avatar.position, to.avatar.position, t),
                rotation: lerp3(self.avatar.rotation, to.avatar.rotation, t),
                scale: lerp(self.avatar.scale, to.avatar.scale, t),
            },
        }
    }
}

/// An in-flight interpolation between two scene states.
#[derive(Debug, Clone)]
pub struct Tween {
    from: SceneState,
    to: SceneState,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    pub fn new(from: SceneState, to: SceneState, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    /// Advance by `dt` seconds and return the interpolated state.
    pub fn advance(&mut self, dt: f32) -> SceneState {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.is_finished() {
            return self.to;
        }
        let t = ease_in_out_cubic(self.elapsed / self.duration);
        self.from.lerp(&self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Tracks the active section and drives the displayed scene toward its target.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    sections: Vec<SceneState>,
    active: usize,
    current: SceneState,
    tween: Option<Tween>,
}

impl Orchestrator {
    pub fn new(sections: Vec<SceneState>) -> Self {
        let current = sections.first().copied().unwrap_or(SECTION_TARGETS[0]);
        Self {
            sections,
            active: 0,
            current,
            tween: None,
        }
    }

    /// Start settled at section `index`, or `None` if there is no such section.
    pub fn with_section(sections: Vec<SceneState>, index: usize) -> Option<Self> {
        let current = *sections.get(index)?;
        Some(Self {
            sections,
            active: index,
            current,
            tween: None,
        })
    }

    pub fn active_section(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> &SceneState {
        &self.current
    }

    pub fn target(&self) -> Option<&SceneState> {
        self.sections.get(self.active)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Update scroll progress; starts a new tween when the section changes.
    pub fn on_scroll(&mut self, progress: f32) {
        let index = section_index(progress, self.sections.len());
        if index == self.active {
            return;
        }
        self.active = index;
        if let Some(target) = self.sections.get(index) {
            // Retarget from wherever the scene is now, not from the old target.
            self.tween = Some(Tween::new(self.current, *target, TWEEN_DURATION_SECS));
        }
    }

    /// Advance the running tween by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> &SceneState {
        if let Some(tween) = self.tween.as_mut() {
            self.current = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }
        &self.current
    }

    /// Cancel the running tween, leaving the scene where it is.
    pub fn stop(&mut self) {
        self.tween = None;
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(SECTION_TARGETS.to_vec())
    }
}
