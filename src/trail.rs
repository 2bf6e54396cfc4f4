// Small bubbles left behind a fast-moving pointer

use std::collections::VecDeque;

use rand::Rng;
use nalgebra_glm as glm;

use crate::color::Color;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrailBubble {
    pub pos: [f64; 2],
    pub size: f64,
    pub born_at: f64,
}

pub struct CursorTrail {
    bubbles: VecDeque<TrailBubble>,
    last_spawn: [f64; 2],
}

impl CursorTrail {
    pub const MIN_TRAVEL: f64 = 15.0;
    pub const MAX_BUBBLES: usize = 16;
    pub const LIFETIME_MS: f64 = 800.0;
    const JITTER: f64 = 20.0;
    const RISE: f64 = 20.0;
    const TINT: Color = Color::from_u32(0x9fc5e8ff);

    pub fn new() -> Self {
        CursorTrail {
            bubbles: VecDeque::with_capacity(CursorTrail::MAX_BUBBLES),
            last_spawn: [0.0, 0.0],
        }
    }

    pub fn bubbles(&self) -> &VecDeque<TrailBubble> {
        &self.bubbles
    }

    /// Spawns a bubble once the pointer has travelled far enough since the last one.
    pub fn pointer_moved<R: Rng + ?Sized>(&mut self, pos: [f64; 2], now_ms: f64, rng: &mut R) {
        let travelled = glm::length(&glm::vec2(
            pos[0] - self.last_spawn[0],
            pos[1] - self.last_spawn[1],
        ));
        if travelled <= CursorTrail::MIN_TRAVEL {
            return;
        }
        self.last_spawn = pos;

        if self.bubbles.len() == CursorTrail::MAX_BUBBLES {
            self.bubbles.pop_front();
        }
        self.bubbles.push_back(TrailBubble {
            pos: [
                pos[0] + (rng.gen::<f64>() - 0.5) * CursorTrail::JITTER,
                pos[1] + (rng.gen::<f64>() - 0.5) * CursorTrail::JITTER,
            ],
            size: rng.gen::<f64>() * 8.0 + 4.0,
            born_at: now_ms,
        });
    }

    pub fn prune(&mut self, now_ms: f64) {
        while let Some(oldest) = self.bubbles.front() {
            if now_ms - oldest.born_at >= CursorTrail::LIFETIME_MS {
                self.bubbles.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, now_ms: f64) -> Result<(), S::Error> {
        for bubble in &self.bubbles {
            let t = ((now_ms - bubble.born_at) / CursorTrail::LIFETIME_MS)
                .max(0.0)
                .min(1.0);
            let radius = bubble.size / 2.0 * (1.0 + 0.5 * t);
            let alpha = 0.7 * (1.0 - t);
            let y = bubble.pos[1] - CursorTrail::RISE * t;
            surface.fill_circle(bubble.pos[0], y, radius, CursorTrail::TINT, alpha * 0.5)?;
            surface.fill_circle(bubble.pos[0], y, radius * 0.5, Color::WHITE, alpha)?;
        }
        Ok(())
    }
}

impl Default for CursorTrail {
    fn default() -> Self {
        CursorTrail::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn slow_moves_spawn_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut trail = CursorTrail::new();
        trail.pointer_moved([10.0, 10.0], 0.0, &mut rng);
        assert!(trail.bubbles().is_empty());
        trail.pointer_moved([30.0, 0.0], 0.0, &mut rng);
        assert_eq!(trail.bubbles().len(), 1);
        trail.pointer_moved([40.0, 5.0], 0.0, &mut rng);
        assert_eq!(trail.bubbles().len(), 1);
    }

    #[test]
    fn keeps_the_newest_sixteen() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut trail = CursorTrail::new();
        for i in 1..=40 {
            trail.pointer_moved([i as f64 * 20.0, 0.0], i as f64, &mut rng);
        }
        assert_eq!(trail.bubbles().len(), CursorTrail::MAX_BUBBLES);
        assert_eq!(trail.bubbles().front().map(|b| b.born_at), Some(25.0));
        for b in trail.bubbles() {
            assert!(b.size >= 4.0 && b.size < 12.0);
        }
    }

    #[test]
    fn bubbles_expire() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut trail = CursorTrail::new();
        trail.pointer_moved([100.0, 100.0], 0.0, &mut rng);
        trail.pointer_moved([200.0, 100.0], 500.0, &mut rng);
        trail.prune(799.0);
        assert_eq!(trail.bubbles().len(), 2);
        trail.prune(800.0);
        assert_eq!(trail.bubbles().len(), 1);
        trail.prune(1300.0);
        assert!(trail.bubbles().is_empty());
    }
}
