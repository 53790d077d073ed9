//! Scene configuration for the 3D experience page.

use axum::extract::Query;
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::experience::{Orchestrator, SceneState, SECTION_TARGETS, TWEEN_DURATION_SECS};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceConfig {
    pub pages: usize,
    pub tween_duration_secs: f32,
    pub sections: Vec<SceneState>,
}

/// GET /api/experience - Section targets the client animates between.
pub async fn get_experience() -> ApiResult<ExperienceConfig> {
    success(ExperienceConfig {
        pages: SECTION_TARGETS.len(),
        tween_duration_secs: TWEEN_DURATION_SECS,
        sections: SECTION_TARGETS.to_vec(),
    })
}

/// Scroll state reported by the client.
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    /// Scroll progress in `0..=1`
    pub progress: f32,
    /// Section the scene was settled at
    #[serde(default)]
    pub from: usize,
    /// Seconds since the scroll event
    #[serde(default)]
    pub elapsed: f32,
    /// Animation halted, e.g. the page was hidden
    #[serde(default)]
    pub paused: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame {
    pub active_section: usize,
    pub animating: bool,
    pub scene: SceneState,
    pub target: SceneState,
}

/// GET /api/experience/scene - Scene state after scrolling to `progress`.
pub async fn get_scene(Query(params): Query<SceneQuery>) -> ApiResult<SceneFrame> {
    let mut orchestrator = Orchestrator::with_section(SECTION_TARGETS.to_vec(), params.from)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Section {} out of range (0-{})",
                params.from,
                SECTION_TARGETS.len() - 1
            ))
        })?;

    orchestrator.on_scroll(params.progress);
    if params.paused {
        orchestrator.stop();
    }
    orchestrator.tick(params.elapsed);

    let target = orchestrator
        .target()
        .copied()
        .unwrap_or(*orchestrator.current());
    success(SceneFrame {
        active_section: orchestrator.active_section(),
        animating: orchestrator.is_animating(),
        scene: *orchestrator.current(),
        target,
    })
}
