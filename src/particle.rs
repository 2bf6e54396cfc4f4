// Simple particle struct to keep track of position, rest (anchor) position,
// velocity, and the look it was given at creation

use crate::color::Color;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub base: Vector2<f64>,
    pub vel: Vector2<f64>,
    size: f64,
    opacity: f64,
    color: Color,
}

impl Particle {
    pub fn new(base: Vector2<f64>, vel: Vector2<f64>, size: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            pos: base,
            base,
            vel,
            size,
            opacity,
            color,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn displacement(&self) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, self.base))
    }
}
