use crate::Dimensions;

/// Distance from the pointer, in surface pixels, within which particles are pushed away.
pub const REPULSION_RADIUS: f64 = 100.0;

/// A single point of the field. `size` and `velocity` are fixed at creation; only
/// `position` changes from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: (f64, f64),
    pub size: f64,
    pub velocity: (f64, f64),
}

impl Particle {
    pub fn new(position: (f64, f64), size: f64, velocity: (f64, f64)) -> Particle {
        Particle {
            position,
            size,
            velocity,
        }
    }

    /// Moves by one frame's worth of velocity, then wraps around the surface edges.
    pub fn tick(&mut self, dimensions: Dimensions) {
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
        self.wrap(dimensions);
    }

    /// Toroidal wrap: leaving through one edge re-enters through the opposite one.
    /// Afterwards `0 <= x < width` and `0 <= y < height`.
    pub fn wrap(&mut self, dimensions: Dimensions) {
        self.position.0 = wrap_axis(self.position.0, dimensions.width as f64);
        self.position.1 = wrap_axis(self.position.1, dimensions.height as f64);
    }

    /// Nudges the particle away from `pointer` for this frame only. The velocity is left
    /// untouched, so a particle resting near the pointer is pushed again every frame.
    pub fn repel(&mut self, pointer: (f64, f64)) {
        let dx = self.position.0 - pointer.0;
        let dy = self.position.1 - pointer.1;
        let distance = dx.hypot(dy);

        if distance < REPULSION_RADIUS {
            let angle = dy.atan2(dx);
            let force = repulsion_force(distance);

            self.position.0 += angle.cos() * force;
            self.position.1 += angle.sin() * force;
        }
    }
}

/// Linear falloff: `1.0` at the pointer, `0.0` at [`REPULSION_RADIUS`] and beyond.
pub fn repulsion_force(distance: f64) -> f64 {
    ((REPULSION_RADIUS - distance) / REPULSION_RADIUS).max(0.0)
}

fn wrap_axis(value: f64, extent: f64) -> f64 {
    let wrapped = if value < 0.0 { value + extent } else { value };

    if wrapped >= extent || wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}
