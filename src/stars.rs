// Twinkling stars for the night sky, generated once per mount

use std::f64::consts::PI;

use rand::Rng;

use crate::color::Color;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Star {
    /// Percent of viewport height.
    pub top: f64,
    /// Percent of viewport width.
    pub left: f64,
    pub size: f64,
    pub opacity: f64,
    /// Seconds per twinkle.
    pub period: f64,
    pub delay: f64,
}

impl Star {
    // Lowest brightness a twinkle dips to, as a fraction of full
    const TWINKLE_FLOOR: f64 = 0.3;

    pub fn twinkle(&self, seconds: f64) -> f64 {
        let phase = ((seconds - self.delay) / self.period) * 2.0 * PI;
        let wave = 0.5 + 0.5 * phase.cos();
        Star::TWINKLE_FLOOR + (1.0 - Star::TWINKLE_FLOOR) * wave
    }
}

pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> StarField {
        let stars = (0..count)
            .map(|_| Star {
                top: rng.gen::<f64>() * 100.0,
                left: rng.gen::<f64>() * 100.0,
                size: rng.gen::<f64>() * 2.0 + 1.0,
                opacity: rng.gen::<f64>() * 0.6 + 0.4,
                period: rng.gen::<f64>() * 3.0 + 2.0,
                delay: rng.gen::<f64>() * 5.0,
            })
            .collect();
        StarField { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// `layer_opacity` comes from the sky theme and is 0 outside the night.
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        width: f64,
        height: f64,
        layer_opacity: f64,
        now_ms: f64,
    ) -> Result<(), S::Error> {
        if layer_opacity <= 0.0 {
            return Ok(());
        }
        let seconds = now_ms / 1000.0;
        for star in &self.stars {
            let alpha = layer_opacity * star.opacity * star.twinkle(seconds);
            surface.fill_circle(
                star.left / 100.0 * width,
                star.top / 100.0 * height,
                star.size / 2.0,
                Color::WHITE,
                alpha,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Call, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn hidden_by_day() {
        let field = StarField::new(50, &mut StdRng::seed_from_u64(1));
        let mut surface = RecordingSurface::default();
        field.draw(&mut surface, 800.0, 600.0, 0.0, 0.0).unwrap();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn night_draws_every_star_within_its_brightness() {
        let field = StarField::new(50, &mut StdRng::seed_from_u64(1));
        let mut surface = RecordingSurface::default();
        field.draw(&mut surface, 800.0, 600.0, 1.0, 1234.0).unwrap();
        assert_eq!(surface.circles(), 50);
        for (call, star) in surface.calls.iter().zip(field.stars()) {
            match call {
                Call::Circle { alpha, .. } => {
                    assert!(*alpha <= star.opacity + 1e-12);
                    assert!(*alpha >= star.opacity * 0.3 - 1e-12);
                }
                _ => panic!("unexpected call {:?}", call),
            }
        }
    }

    #[test]
    fn twinkle_peaks_at_its_delay() {
        let star = Star {
            top: 0.0,
            left: 0.0,
            size: 2.0,
            opacity: 1.0,
            period: 4.0,
            delay: 1.0,
        };
        assert!((star.twinkle(1.0) - 1.0).abs() < 1e-12);
        assert!((star.twinkle(3.0) - 0.3).abs() < 1e-12);
        assert!((star.twinkle(5.0) - 1.0).abs() < 1e-12);
    }
}
