//! Viewer loop: drains input, moves the camera, composes and submits frames.
//!
//! Single-threaded. Events are applied strictly in arrival order between
//! frames, so every frame sees a consistent camera.

use std::time::{Duration, Instant};

use relief_core::constants::DEFAULT_FRAME_RATE;
use relief_core::error::ReliefResult;
use relief_view::FrameSink;

use crate::input::{EventSource, ViewerCommand};
use crate::scene::{EventOutcome, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOptions {
    /// Stop after this many frames; `None` runs until shutdown.
    pub max_frames: Option<u64>,
    pub frame_rate: u32,
    /// Sleep to hold `frame_rate`. Off for scripted or test runs.
    pub pace: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_frames: None,
            frame_rate: DEFAULT_FRAME_RATE,
            pace: true,
        }
    }
}

impl LoopOptions {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.frame_rate.max(1) as u64)
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub events: u64,
    pub camera_updates: u64,
    pub camera_rejections: u64,
}

/// Run until `max_frames` or a shutdown command. Sink errors end the run.
pub fn run_viewer_loop(
    scene: &mut Scene,
    events: &mut dyn EventSource,
    sink: &mut dyn FrameSink,
    options: &LoopOptions,
) -> ReliefResult<LoopSummary> {
    sink.upload(scene.mesh(), scene.draw_call(), scene.textures())?;

    let frame_duration = options.frame_duration();
    let mut summary = LoopSummary::default();
    let start = Instant::now();
    let mut next_frame_time = start;

    loop {
        if options.max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }

        // 1. Apply pending input
        let mut shutdown = false;
        for command in events.poll(summary.frames) {
            match command {
                ViewerCommand::Input(event) => {
                    summary.events += 1;
                    match scene.apply(event) {
                        EventOutcome::CameraMoved => summary.camera_updates += 1,
                        EventOutcome::CameraRejected => summary.camera_rejections += 1,
                        EventOutcome::ViewportChanged => {}
                    }
                }
                ViewerCommand::Shutdown => {
                    shutdown = true;
                    break;
                }
            }
        }
        if shutdown {
            log::info!("Shutdown requested after {} frame(s)", summary.frames);
            break;
        }

        // 2. Compose and submit. Paced runs use wall time, unpaced ones the nominal frame time.
        let time_secs = if options.pace {
            start.elapsed().as_secs_f32()
        } else {
            summary.frames as f32 * frame_duration.as_secs_f32()
        };
        let frame = scene.compose(summary.frames, time_secs);
        sink.submit(&frame)?;
        summary.frames += 1;

        // 3. Sleep until the next frame
        if options.pace {
            next_frame_time += frame_duration;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > frame_duration * 2 {
                // Too far behind, drop the backlog
                next_frame_time = now;
            }
        }
    }

    log::info!(
        "Viewer stopped: {} frame(s), {} event(s), {} camera update(s), {} rejected",
        summary.frames,
        summary.events,
        summary.camera_updates,
        summary.camera_rejections
    );
    Ok(summary)
}
