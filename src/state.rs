//! Application state shared by the HTTP handlers.

use std::sync::Arc;
use tokio::time::Instant;

use crate::config::Config;
use crate::mapper::{map_frame, RenderParams};
use crate::sampler::Sampler;
use crate::visualization::LatestFrame;

/// The state every handler sees
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Sampler feeding the visualization
    pub sampler: Sampler,
    /// Most recent frame drawn by the frame loop
    pub frames: LatestFrame,
    /// When the host started; fallback frames are timed from here
    pub started: Instant,
}

impl AppState {
    pub fn new(config: Config, sampler: Sampler, frames: LatestFrame) -> Self {
        Self {
            config,
            sampler,
            frames,
            started: Instant::now(),
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, sampler: Sampler, frames: LatestFrame) -> Arc<Self> {
        Arc::new(Self::new(config, sampler, frames))
    }

    /// Share the frame loop's clock, so frames mapped on demand match the
    /// ones the surface receives
    pub fn with_started(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    /// The latest drawn frame, or one mapped now when the frame loop has not
    /// drawn yet
    pub fn current_params(&self) -> RenderParams {
        self.frames.get().unwrap_or_else(|| {
            let reading = self.sampler.current();
            map_frame(reading.as_ref(), self.started.elapsed())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Mode;
    use std::time::Duration;

    #[test]
    fn test_current_params_without_frames() {
        let state = AppState::new(Config::default(), Sampler::new(), LatestFrame::new());
        assert!(state.current_params().fallback);

        state.sampler.set_mode(Mode::Manual);
        let params = state.current_params();
        assert!(!params.fallback);
        assert_eq!(params.temperature, 20.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_demand_frame_matches_visualization_clock() {
        use crate::sampler::SamplerHandle;
        use crate::visualization::Visualization;

        let sampler = Sampler::new();
        let frames = LatestFrame::new();
        let vis = Visualization::new(SamplerHandle::detached(sampler.clone()), frames.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let state = AppState::new(Config::default(), sampler, frames).with_started(vis.started());

        let served = state.current_params();
        let drawn = vis.render_frame().unwrap();
        assert!(served.fallback);
        assert_eq!(served.time, drawn.time);
        assert_eq!(served.temperature, drawn.temperature);
    }
}
