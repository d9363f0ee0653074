//! The visualization instance: one sampler, one rendering surface, one
//! frame loop.
//!
//! The host owns a single [`Visualization`] and drives updates through the
//! sampler it exposes. Teardown stops the frame loop, cancels the weather
//! poll and releases the surface.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::mapper::{map_frame, RenderParams};
use crate::sampler::{Sampler, SamplerHandle};

/// Shortest frame period; `tokio::time::interval` rejects zero
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// A renderer that consumes one parameter set per frame
pub trait RenderSurface: Send + 'static {
    /// Draw one frame
    fn draw(&mut self, params: &RenderParams);

    /// Free whatever the surface holds. Called once, on teardown.
    fn release(&mut self);
}

/// Surface that keeps the most recent frame for other readers (the HTTP
/// host serves it from `/params`)
#[derive(Debug, Clone, Default)]
pub struct LatestFrame {
    inner: Arc<RwLock<Option<RenderParams>>>,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last drawn frame, if any
    pub fn get(&self) -> Option<RenderParams> {
        *self.inner.read()
    }
}

impl RenderSurface for LatestFrame {
    fn draw(&mut self, params: &RenderParams) {
        *self.inner.write() = Some(*params);
    }

    fn release(&mut self) {
        *self.inner.write() = None;
    }
}

type SharedSurface<S> = Arc<Mutex<Option<S>>>;

fn draw_frame<S: RenderSurface>(
    sampler: &Sampler,
    surface: &SharedSurface<S>,
    started: Instant,
) -> Option<RenderParams> {
    let reading = sampler.current();
    let params = map_frame(reading.as_ref(), started.elapsed());

    let mut guard = surface.lock();
    let surface = guard.as_mut()?;
    surface.draw(&params);
    Some(params)
}

/// A running visualization
pub struct Visualization<S: RenderSurface> {
    sampler: SamplerHandle,
    surface: SharedSurface<S>,
    started: Instant,
    frame_task: Option<JoinHandle<()>>,
}

impl<S: RenderSurface> Visualization<S> {
    pub fn new(sampler: SamplerHandle, surface: S) -> Self {
        Self {
            sampler,
            surface: Arc::new(Mutex::new(Some(surface))),
            started: Instant::now(),
            frame_task: None,
        }
    }

    /// The sampler feeding this visualization; the host's update entry point
    pub fn sampler(&self) -> &Sampler {
        self.sampler.sampler()
    }

    /// When the visualization was created; frame `time` counts from here
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Time since the visualization was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Map and draw one frame. Returns `None` once the surface is released.
    pub fn render_frame(&self) -> Option<RenderParams> {
        draw_frame(self.sampler.sampler(), &self.surface, self.started)
    }

    /// Draw a frame every `frame_interval` until teardown.
    ///
    /// Intervals shorter than 1 ms are raised to 1 ms. Must be called from
    /// within a tokio runtime. Calling it again replaces the previous loop.
    pub fn start_frames(&mut self, frame_interval: Duration) {
        let frame_interval = frame_interval.max(MIN_FRAME_INTERVAL);
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }

        let sampler = self.sampler.sampler().clone();
        let surface = self.surface.clone();
        let started = self.started;

        info!(
            frame_interval_ms = frame_interval.as_millis() as u64,
            "Starting frame loop"
        );
        self.frame_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if draw_frame(&sampler, &surface, started).is_none() {
                    debug!("Surface released; frame loop exiting");
                    break;
                }
            }
        }));
    }

    pub fn is_torn_down(&self) -> bool {
        self.surface.lock().is_none()
    }

    /// Stop the frame loop, cancel the weather poll and release the surface.
    /// Idempotent.
    pub fn teardown(&mut self) {
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }
        self.sampler.teardown();

        if let Some(mut surface) = self.surface.lock().take() {
            surface.release();
            info!("Visualization torn down");
        }
    }
}

impl<S: RenderSurface> Drop for Visualization<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
