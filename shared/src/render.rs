use std::mem;

use crate::{Dimensions, FrameHandle, Host, Particle, ParticleField, SparklesConfig, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame scheduled.
    Idle,
    /// A frame is scheduled under the given handle.
    Running(FrameHandle),
}

/// The self-rescheduling per-frame update/draw cycle.
///
/// Exactly one frame is scheduled while [`LoopState::Running`]. Stopping the loop cancels
/// it through the [`Host`], so no callback outlives the loop; a callback that still
/// arrives with any other handle is treated as stale and ignored.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    dimensions: Dimensions,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        RenderLoop::new()
    }
}

impl RenderLoop {
    pub fn new() -> RenderLoop {
        RenderLoop {
            state: LoopState::Idle,
            dimensions: Dimensions::default(),
            frames: 0,
        }
    }

    /// Idle → Running. Requires non-zero `dimensions` and an available surface, whose
    /// backing buffer is resized before the first frame is requested. Returns whether the
    /// loop is running afterwards.
    pub fn start<H: Host>(&mut self, host: &mut H, dimensions: Dimensions) -> bool {
        if self.is_running() {
            return true;
        }

        if dimensions.is_empty() {
            return false;
        }

        let Some(surface) = host.surface() else {
            return false;
        };

        if let Err(error) = surface.resize(dimensions) {
            log::warn!("could not resize surface: {error:?}");
            return false;
        }

        match host.request_frame() {
            Some(handle) => {
                self.state = LoopState::Running(handle);
                self.dimensions = dimensions;

                log::debug!(
                    "render loop started at {}x{}",
                    dimensions.width,
                    dimensions.height
                );

                true
            }
            None => false,
        }
    }

    /// Running → Idle, cancelling the scheduled frame.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if let LoopState::Running(handle) = mem::replace(&mut self.state, LoopState::Idle) {
            host.cancel_frame(handle);

            log::debug!("render loop stopped after {} frames", self.frames);
        }
    }

    /// Runs the frame scheduled under `handle` and schedules the next one. Returns `false`
    /// without painting if the handle is stale. A missing surface drops the loop to idle.
    pub fn advance<H: Host>(
        &mut self,
        host: &mut H,
        handle: FrameHandle,
        field: &mut ParticleField,
        config: &SparklesConfig,
        pointer: Option<(f64, f64)>,
    ) -> bool {
        if self.state != LoopState::Running(handle) {
            return false;
        }

        self.state = LoopState::Idle;

        let Some(surface) = host.surface() else {
            log::debug!("surface went away, render loop idle");
            return false;
        };

        if let Err(error) = draw_frame(
            surface,
            self.dimensions,
            field.particles_mut(),
            config,
            pointer,
        ) {
            log::warn!("frame {} failed to paint: {error:?}", self.frames);
        }

        self.frames += 1;

        if let Some(next) = host.request_frame() {
            self.state = LoopState::Running(next);
        }

        true
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Dimensions the loop was last started with.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Paints one frame: background first, then every particle after moving, wrapping and
/// (if the pointer is known) repelling it.
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    dimensions: Dimensions,
    particles: &mut [Particle],
    config: &SparklesConfig,
    pointer: Option<(f64, f64)>,
) -> Result<(), S::Error> {
    surface.paint_background(dimensions, &config.background)?;

    for particle in particles.iter_mut() {
        particle.tick(dimensions);

        if let Some(pointer) = pointer {
            particle.repel(pointer);
        }

        paint_particle(surface, particle, config)?;
    }

    Ok(())
}

fn paint_particle<S: Surface>(
    surface: &mut S,
    particle: &Particle,
    config: &SparklesConfig,
) -> Result<(), S::Error> {
    if config.particle_blur > 0.0 {
        surface.set_blur(config.particle_blur)?;
        let painted = surface.fill_circle(particle.position, particle.size, &config.particle_color);
        surface.reset_filter()?;

        painted
    } else {
        surface.fill_circle(particle.position, particle.size, &config.particle_color)
    }
}
