use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{FieldParams, Particle};

/// Surface area, in square pixels, that yields one particle at 100% density.
pub const AREA_PER_PARTICLE: f64 = 10000.0;

/// Number of particles for a surface of `width * height` at `density` percent, rounded
/// toward zero. Negative or non-finite inputs yield an empty population.
pub fn population_count(width: f64, height: f64, density: f64) -> usize {
    let cells = (width * height / AREA_PER_PARTICLE).floor();
    let count = (cells * density / 100.0).floor();

    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Generates a fresh population. Sizes are uniform in `[min_size, max_size]` and velocity
/// components uniform in `[-speed / 2, speed / 2]`.
pub fn generate<R: Rng>(params: &FieldParams, rng: &mut R) -> Vec<Particle> {
    let width = params.dimensions.width as f64;
    let height = params.dimensions.height as f64;
    let count = population_count(width, height, params.density);

    (0..count)
        .map(|_| {
            let position = (rng.gen::<f64>() * width, rng.gen::<f64>() * height);
            let size = rng.gen::<f64>() * (params.max_size - params.min_size) + params.min_size;
            let velocity = (
                (rng.gen::<f64>() - 0.5) * params.speed,
                (rng.gen::<f64>() - 0.5) * params.speed,
            );

            Particle::new(position, size, velocity)
        })
        .collect()
}

/// [`ParticleField`] owns the population of one instance and regenerates it wholesale
/// whenever its [`FieldParams`] change.
pub struct ParticleField {
    params: Option<FieldParams>,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl ParticleField {
    pub fn new(seed: u64) -> ParticleField {
        ParticleField {
            params: None,
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Regenerates the population if `params` differ from those it was last generated
    /// from. Returns whether a regeneration took place.
    pub fn sync(&mut self, params: FieldParams) -> bool {
        if self.params == Some(params) {
            return false;
        }

        self.regenerate(params);

        true
    }

    /// Discards the current population and generates a new one.
    pub fn regenerate(&mut self, params: FieldParams) {
        self.particles = generate(&params, &mut self.rng);
        self.params = Some(params);

        log::debug!(
            "regenerated {} particles for {}x{}",
            self.particles.len(),
            params.dimensions.width,
            params.dimensions.height
        );
    }

    pub fn params(&self) -> Option<&FieldParams> {
        self.params.as_ref()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dimensions, SparklesConfig};

    fn params(width: u32, height: u32, density: f64) -> FieldParams {
        SparklesConfig {
            particle_density: density,
            ..SparklesConfig::default()
        }
        .field_params(Dimensions::new(width, height))
    }

    #[test]
    fn count_follows_area_and_density() {
        assert_eq!(population_count(1000.0, 1000.0, 70.0), 70);
        assert_eq!(population_count(1000.0, 1000.0, 100.0), 100);
        assert_eq!(population_count(200.0, 200.0, 100.0), 4);
        assert_eq!(population_count(400.0, 400.0, 100.0), 16);
        assert_eq!(population_count(1920.0, 1080.0, 70.0), 144);
        assert_eq!(population_count(399.0, 399.0, 100.0), 15);
        // floor(3 * 0.5) = 1
        assert_eq!(population_count(300.0, 100.0, 50.0), 1);
    }

    #[test]
    fn degenerate_inputs_yield_empty_population() {
        assert_eq!(population_count(0.0, 1080.0, 100.0), 0);
        assert_eq!(population_count(99.0, 99.0, 100.0), 0);
        assert_eq!(population_count(1000.0, 1000.0, -50.0), 0);
        assert_eq!(population_count(1000.0, 1000.0, f64::NAN), 0);
    }

    #[test]
    fn generated_particles_respect_ranges() {
        let params = FieldParams {
            speed: 3.0,
            ..params(800, 600, 100.0)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let particles = generate(&params, &mut rng);

        assert_eq!(particles.len(), 48);

        for particle in &particles {
            assert!((0.0..800.0).contains(&particle.position.0));
            assert!((0.0..600.0).contains(&particle.position.1));
            assert!((0.6..=1.4).contains(&particle.size));
            assert!((-1.5..=1.5).contains(&particle.velocity.0));
            assert!((-1.5..=1.5).contains(&particle.velocity.1));
        }
    }

    #[test]
    fn inverted_size_bounds_do_not_panic() {
        let params = FieldParams {
            min_size: 2.0,
            max_size: 1.0,
            ..params(500, 500, 100.0)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(generate(&params, &mut rng).len(), 25);
    }

    #[test]
    fn sync_regenerates_only_on_change() {
        let mut field = ParticleField::new(42);

        assert!(field.sync(params(1000, 1000, 70.0)));
        let first = field.particles().to_vec();

        assert!(!field.sync(params(1000, 1000, 70.0)));
        assert_eq!(field.particles(), first.as_slice());

        assert!(field.sync(params(1000, 1000, 100.0)));
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn regeneration_with_same_inputs_keeps_count_not_positions() {
        let mut field = ParticleField::new(42);

        field.regenerate(params(1000, 1000, 70.0));
        let first = field.particles().to_vec();
        field.regenerate(params(1000, 1000, 70.0));

        assert_eq!(field.len(), first.len());
        assert_ne!(field.particles(), first.as_slice());
    }

    #[test]
    fn same_seed_reproduces_population() {
        let mut a = ParticleField::new(9);
        let mut b = ParticleField::new(9);

        a.sync(params(640, 480, 100.0));
        b.sync(params(640, 480, 100.0));

        assert_eq!(a.particles(), b.particles());
    }
}
