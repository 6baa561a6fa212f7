use crate::{
    DimensionTracker, Dimensions, FrameHandle, Host, LoopState, Particle, ParticleField,
    PointerSlot, RenderLoop, SparklesConfig,
};

/// [`Sparkles`] is one mounted instance of the particle-field background. It wires the
/// [`DimensionTracker`], the [`ParticleField`] and the [`RenderLoop`] to a [`Host`].
///
/// Lifecycle: [`Sparkles::mount()`] → any number of [`Sparkles::on_resize()`],
/// [`Sparkles::on_frame()`] and [`Sparkles::set_config()`] → [`Sparkles::unmount()`]
/// (also run on drop).
pub struct Sparkles<H: Host> {
    host: H,
    config: SparklesConfig,
    tracker: DimensionTracker,
    field: ParticleField,
    render_loop: RenderLoop,
    pointer: PointerSlot,
    mounted: bool,
}

impl<H: Host> Sparkles<H> {
    /// Instantiates the [`Sparkles`] `struct`. The population is seeded from
    /// [`SparklesConfig::seed`] if present, `seed` otherwise.
    pub fn new(host: H, config: SparklesConfig, pointer: PointerSlot, seed: u64) -> Sparkles<H> {
        let field = ParticleField::new(config.seed.unwrap_or(seed));

        Sparkles {
            host,
            config,
            tracker: DimensionTracker::new(),
            field,
            render_loop: RenderLoop::new(),
            pointer,
            mounted: false,
        }
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }

        self.mounted = true;
        self.tracker.attach(&mut self.host);
        self.refresh();
    }

    /// Viewport resize notification.
    pub fn on_resize(&mut self) {
        if !self.mounted {
            return;
        }

        if self.tracker.measure(&self.host).is_some() {
            self.refresh();
        }
    }

    /// Display refresh notification for the frame scheduled under `handle`. Returns whether
    /// a frame was painted.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.mounted {
            return false;
        }

        let pointer = self.pointer.latest();

        self.render_loop.advance(
            &mut self.host,
            handle,
            &mut self.field,
            &self.config,
            pointer,
        )
    }

    /// Replaces the configuration. The population is regenerated only if one of its inputs
    /// changed; paint settings apply from the next frame.
    pub fn set_config(&mut self, config: SparklesConfig) {
        self.config = config;

        if self.mounted {
            self.refresh();
        }
    }

    /// Cancels the scheduled frame and removes the resize subscription.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }

        self.render_loop.stop(&mut self.host);
        self.tracker.detach(&mut self.host);
        self.mounted = false;
    }

    /// Brings population and loop in line with the current dimensions and configuration.
    /// A size change stops the loop, regenerates, then resumes at the new size. Also
    /// retries an idle loop whose surface was not ready before.
    fn refresh(&mut self) {
        let dimensions = self.tracker.current().unwrap_or_default();

        if self.render_loop.is_running() && self.render_loop.dimensions() != dimensions {
            self.render_loop.stop(&mut self.host);
        }

        self.field.sync(self.config.field_params(dimensions));
        self.render_loop.start(&mut self.host, dimensions);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &SparklesConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.tracker.current()
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_subscribed(&self) -> bool {
        self.tracker.is_subscribed()
    }
}

impl<H: Host> Drop for Sparkles<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessHost;

    fn sparkles(dimensions: Dimensions) -> Sparkles<HeadlessHost> {
        Sparkles::new(
            HeadlessHost::new(dimensions),
            SparklesConfig::default(),
            PointerSlot::new(),
            11,
        )
    }

    #[test]
    fn nothing_happens_before_mount() {
        let mut sparkles = sparkles(Dimensions::new(400, 400));

        sparkles.on_resize();

        assert_eq!(sparkles.particle_count(), 0);
        assert_eq!(sparkles.loop_state(), LoopState::Idle);
        assert!(!sparkles.on_frame(FrameHandle(1)));
    }

    #[test]
    fn mount_generates_and_starts() {
        let mut sparkles = sparkles(Dimensions::new(400, 400));

        sparkles.mount();

        assert_eq!(sparkles.particle_count(), 16);
        assert!(sparkles.is_subscribed());
        assert!(matches!(sparkles.loop_state(), LoopState::Running(_)));
    }

    #[test]
    fn paint_settings_do_not_regenerate() {
        let mut sparkles = sparkles(Dimensions::new(400, 400));
        sparkles.mount();
        let before = sparkles.particles().to_vec();

        sparkles.set_config(SparklesConfig {
            particle_color: "#8c6dfd".to_string(),
            background: "transparent".to_string(),
            particle_blur: 1.0,
            ..SparklesConfig::default()
        });

        assert_eq!(sparkles.particles(), before.as_slice());
        assert_eq!(sparkles.config().background, "transparent");
    }

    #[test]
    fn density_change_regenerates() {
        let mut sparkles = sparkles(Dimensions::new(1000, 1000));
        sparkles.mount();
        assert_eq!(sparkles.particle_count(), 100);

        sparkles.set_config(SparklesConfig {
            particle_density: 70.0,
            ..SparklesConfig::default()
        });

        assert_eq!(sparkles.particle_count(), 70);
        assert!(matches!(sparkles.loop_state(), LoopState::Running(_)));
    }

    #[test]
    fn configured_seed_wins() {
        let config = SparklesConfig {
            seed: Some(5),
            ..SparklesConfig::default()
        };
        let mut a = Sparkles::new(
            HeadlessHost::new(Dimensions::new(500, 500)),
            config.clone(),
            PointerSlot::new(),
            1,
        );
        let mut b = Sparkles::new(
            HeadlessHost::new(Dimensions::new(500, 500)),
            config,
            PointerSlot::new(),
            2,
        );

        a.mount();
        b.mount();

        assert_eq!(a.particles(), b.particles());
    }
}
