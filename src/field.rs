// Pointer-reactive particle field. Particles are seeded on a jittered grid,
// pushed away from the pointer, and pulled back to their anchors by a spring.

use rand::Rng;
use vecmath::Vector2;

use crate::color::Color;
use crate::particle::Particle;
use crate::surface::Surface;

pub const ACCENTS: [Color; 5] = [
    Color::from_u32(0x34d399ff),
    Color::from_u32(0xf472b6ff),
    Color::from_u32(0xfb7185ff),
    Color::from_u32(0x4ade80ff),
    Color::from_u32(0xa78bfaff),
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub interaction_radius: f64,
    pub repulsion: f64,
    pub spring: f64,
    pub friction: f64,
    pub connection_distance: f64,
    pub connection_alpha: f64,
    pub line_width: f64,
    /// Amplitude of the scroll-linked vertical wobble, 0 disables it.
    pub scroll_wave: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 250,
            interaction_radius: 300.0,
            repulsion: 0.5,
            spring: 0.01,
            friction: 0.95,
            connection_distance: 100.0,
            connection_alpha: 0.2,
            line_width: 2.0,
            scroll_wave: 0.2,
        }
    }
}

pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<Vector2<f64>>,
    scroll_y: f64,
}

impl ParticleField {
    const MIN_SIZE: f64 = 2.5;
    const SIZE_RANGE: f64 = 4.0;
    const MIN_OPACITY: f64 = 0.55;
    const OPACITY_RANGE: f64 = 0.3;
    const MAX_INITIAL_SPEED: f64 = 0.25;

    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
            scroll_y: 0.0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Throws away every particle and reseeds the grid for the new dimensions.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.seed(rng);
    }

    pub fn set_pointer(&mut self, pointer: Option<Vector2<f64>>) {
        self.pointer = pointer;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.particles.clear();
        let count = self.config.particle_count;
        if count == 0 || !(self.width > 0.0) || !(self.height > 0.0) {
            return;
        }

        let cols = ((count as f64 * (self.width / self.height)).sqrt().ceil() as usize)
            .max(1)
            .min(count);
        let rows = (count + cols - 1) / cols;
        let cell_w = self.width / cols as f64;
        let cell_h = self.height / rows as f64;

        self.particles.reserve(count);
        'grid: for row in 0..rows {
            for col in 0..cols {
                if self.particles.len() == count {
                    break 'grid;
                }
                let base = [
                    col as f64 * cell_w + rng.gen::<f64>() * cell_w,
                    row as f64 * cell_h + rng.gen::<f64>() * cell_h,
                ];
                let vel = [
                    (rng.gen::<f64>() * 2.0 - 1.0) * ParticleField::MAX_INITIAL_SPEED,
                    (rng.gen::<f64>() * 2.0 - 1.0) * ParticleField::MAX_INITIAL_SPEED,
                ];
                let size = ParticleField::MIN_SIZE + rng.gen::<f64>() * ParticleField::SIZE_RANGE;
                let opacity =
                    ParticleField::MIN_OPACITY + rng.gen::<f64>() * ParticleField::OPACITY_RANGE;
                let color = ACCENTS[rng.gen_range(0, ACCENTS.len())];
                self.particles
                    .push(Particle::new(base, vel, size, opacity, color));
            }
        }
    }

    /// Advances every particle by one frame.
    pub fn step(&mut self) {
        let config = self.config;
        let pointer = self.pointer;
        let scroll_y = self.scroll_y;
        let radius = config.interaction_radius;

        for particle in &mut self.particles {
            if let Some(pointer) = pointer {
                let to_pointer = vecmath::vec2_sub(pointer, particle.pos);
                let distance = vecmath::vec2_len(to_pointer);
                if distance < radius {
                    let force = (radius - distance) / radius;
                    let dir = if distance > 0.0 {
                        vecmath::vec2_normalized(to_pointer)
                    } else {
                        [1.0, 0.0]
                    };
                    particle.vel =
                        vecmath::vec2_sub(particle.vel, vecmath::vec2_scale(dir, force * config.repulsion));
                }
            }

            let to_base = vecmath::vec2_sub(particle.base, particle.pos);
            particle.vel = vecmath::vec2_add(particle.vel, vecmath::vec2_scale(to_base, config.spring));
            particle.vel = vecmath::vec2_scale(particle.vel, config.friction);
            particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

            if config.scroll_wave != 0.0 {
                let phase = scroll_y * 0.01 + particle.base[0] * 0.01;
                particle.pos[1] += phase.sin() * config.scroll_wave;
            }
        }
    }

    /// Pairs of particles close enough to be joined, with their distance.
    pub fn connections(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let max = self.config.connection_distance;
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |i| {
            (i + 1..particles.len()).filter_map(move |j| {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(particles[i].pos, particles[j].pos));
                if distance < max {
                    Some((i, j, distance))
                } else {
                    None
                }
            })
        })
    }

    /// Draws dots, then the faint lines between neighbors. Does not clear.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        for p in &self.particles {
            surface.fill_circle(p.pos[0], p.pos[1], p.size(), p.color(), p.opacity())?;
        }

        let max = self.config.connection_distance;
        for (i, j, distance) in self.connections() {
            let from = &self.particles[i];
            let alpha = (1.0 - distance / max) * self.config.connection_alpha;
            surface.stroke_line(
                from.pos,
                self.particles[j].pos,
                from.color(),
                alpha,
                self.config.line_width,
            )?;
        }
        Ok(())
    }
}
