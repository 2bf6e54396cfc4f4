// Bubble surge: a full-screen wave of soap bubbles with a navy curtain behind
// it, played once when the reader scrolls out of the hero section. While it
// plays the page treats scroll as locked.

use rand::Rng;

use crate::color::Color;
use crate::nav::BUBBLES_SECTION;
use crate::sky::Palette;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bubble {
    /// Percent of viewport width.
    pub left: f64,
    pub size: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub delay: f64,
    pub hue: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurgeEvent {
    Started,
    Finished,
    Cancelled,
}

pub struct BubbleSurge {
    bubbles: Vec<Bubble>,
    triggered: bool,
    started_at: Option<f64>,
    jumping: bool,
    last_progress: f64,
}

impl BubbleSurge {
    pub const TRIGGER_PROGRESS: f64 = 0.16;
    pub const REARM_MARGIN: f64 = 0.05;
    pub const DURATION_MS: f64 = 2500.0;
    pub const BUBBLE_COUNT: usize = 100;
    const COLUMNS: usize = 10;
    const JUMP_DELTA: f64 = 0.1;
    const SETTLED_DELTA: f64 = 0.01;
    // Bubbles start and end this far outside the viewport
    const OVERSCAN: f64 = 200.0;

    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> BubbleSurge {
        let bubbles = (0..BubbleSurge::BUBBLE_COUNT)
            .map(|i| {
                let column = (i % BubbleSurge::COLUMNS) as f64;
                let left = column * 10.0 + rng.gen::<f64>() * 8.0;
                Bubble {
                    left: left.min(98.0),
                    size: 72.0 + rng.gen::<f64>() * 120.0,
                    duration: 0.6 + rng.gen::<f64>() * 0.9,
                    delay: rng.gen::<f64>() * 0.5,
                    hue: ((i * 37) % 360) as f64,
                }
            })
            .collect();
        BubbleSurge {
            bubbles,
            triggered: false,
            started_at: None,
            jumping: false,
            last_progress: 0.0,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn is_animating(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Feeds a new scroll progress. `target` is the section a programmatic
    /// navigation is heading to, if any.
    pub fn update(
        &mut self,
        progress: f64,
        navigating: bool,
        target: Option<usize>,
        now_ms: f64,
    ) -> Option<SurgeEvent> {
        let delta = (progress - self.last_progress).abs();
        self.last_progress = progress;

        let heading_elsewhere = target.map_or(false, |t| t != BUBBLES_SECTION);
        if heading_elsewhere || delta > BubbleSurge::JUMP_DELTA {
            self.jumping = true;
            // Skipping past the bubbles must not fire the surge when the scroll lands
            if target.map_or(false, |t| t > BUBBLES_SECTION)
                && progress > BubbleSurge::TRIGGER_PROGRESS
            {
                self.triggered = true;
            }
        }
        if delta < BubbleSurge::SETTLED_DELTA && !navigating {
            self.jumping = false;
        }

        if progress < BubbleSurge::TRIGGER_PROGRESS - BubbleSurge::REARM_MARGIN && self.triggered {
            self.triggered = false;
            if self.started_at.take().is_some() {
                return Some(SurgeEvent::Cancelled);
            }
            return None;
        }

        let suppressed = navigating || self.jumping || heading_elsewhere;
        if progress >= BubbleSurge::TRIGGER_PROGRESS
            && !self.triggered
            && !self.is_animating()
            && !suppressed
        {
            self.triggered = true;
            self.started_at = Some(now_ms);
            return Some(SurgeEvent::Started);
        }
        None
    }

    pub fn tick(&mut self, now_ms: f64) -> Option<SurgeEvent> {
        let started = self.started_at?;
        if now_ms - started >= BubbleSurge::DURATION_MS {
            self.started_at = None;
            Some(SurgeEvent::Finished)
        } else {
            None
        }
    }

    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        width: f64,
        height: f64,
        now_ms: f64,
    ) -> Result<(), S::Error> {
        let started = match self.started_at {
            Some(started) => started,
            None => return Ok(()),
        };
        let elapsed = (now_ms - started).max(0.0);

        let t = (elapsed / BubbleSurge::DURATION_MS).min(1.0);
        let curtain_top = height * (1.0 - 1.2 * ease_in_out(t));
        surface.fill_rect(0.0, curtain_top, width, height * 1.2, Palette::DEEP.middle, 1.0)?;

        let seconds = elapsed / 1000.0;
        let travel = height + 2.0 * BubbleSurge::OVERSCAN;
        for bubble in &self.bubbles {
            let local = (seconds - bubble.delay) / bubble.duration;
            if local < 0.0 || local > 1.0 {
                continue;
            }
            let radius = bubble.size / 2.0;
            let x = bubble.left / 100.0 * width + radius;
            let y = height + BubbleSurge::OVERSCAN - local * travel;
            surface.fill_circle(x, y, radius, Color::from_hsl(bubble.hue, 0.6, 0.8), 0.15)?;
            surface.fill_circle(
                x - radius * 0.4,
                y - radius * 0.4,
                radius * 0.2,
                Color::WHITE,
                0.5,
            )?;
            surface.stroke_circle(
                x,
                y,
                radius,
                Color::from_hsl(bubble.hue, 0.5, 0.65),
                0.6,
                2.0,
            )?;
        }
        Ok(())
    }
}

fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn surge() -> BubbleSurge {
        BubbleSurge::new(&mut StdRng::seed_from_u64(5))
    }

    // Scrolls in small steps so nothing looks like a jump
    fn creep(s: &mut BubbleSurge, from: f64, to: f64, now_ms: f64) -> Vec<SurgeEvent> {
        let steps = ((to - from).abs() / 0.005).ceil() as usize;
        (1..=steps)
            .filter_map(|i| {
                let p = from + (to - from) * i as f64 / steps as f64;
                s.update(p, false, None, now_ms)
            })
            .collect()
    }

    #[test]
    fn bubbles_are_spread_over_columns() {
        let s = surge();
        assert_eq!(s.bubbles().len(), BubbleSurge::BUBBLE_COUNT);
        for (i, b) in s.bubbles().iter().enumerate() {
            let column = (i % 10) as f64 * 10.0;
            assert!(b.left >= column && b.left <= (column + 8.0).min(98.0));
            assert!(b.size >= 72.0 && b.size < 192.0);
            assert!(b.duration >= 0.6 && b.duration < 1.5);
            assert!(b.delay >= 0.0 && b.delay < 0.5);
            assert_eq!(b.hue, ((i * 37) % 360) as f64);
        }
    }

    #[test]
    fn plays_once_at_threshold() {
        let mut s = surge();
        assert!(creep(&mut s, 0.0, 0.15, 0.0).is_empty());
        assert_eq!(creep(&mut s, 0.15, 0.17, 100.0), vec![SurgeEvent::Started]);
        assert!(s.is_animating());

        assert_eq!(s.tick(2599.0), None);
        assert_eq!(s.tick(2600.0), Some(SurgeEvent::Finished));
        assert!(!s.is_animating());

        assert!(creep(&mut s, 0.17, 0.4, 3000.0).is_empty());
    }

    #[test]
    fn rearms_after_scrolling_back_up() {
        let mut s = surge();
        creep(&mut s, 0.0, 0.2, 0.0);
        s.tick(5000.0);
        assert!(creep(&mut s, 0.2, 0.12, 6000.0).is_empty());
        assert!(s.is_triggered());
        creep(&mut s, 0.12, 0.10, 6000.0);
        assert!(!s.is_triggered());
        assert_eq!(creep(&mut s, 0.10, 0.18, 7000.0), vec![SurgeEvent::Started]);
    }

    #[test]
    fn scrolling_back_mid_play_cancels() {
        let mut s = surge();
        creep(&mut s, 0.0, 0.17, 0.0);
        assert!(s.is_animating());
        assert_eq!(creep(&mut s, 0.17, 0.05, 500.0), vec![SurgeEvent::Cancelled]);
        assert!(!s.is_animating());
    }

    #[test]
    fn navigation_past_bubbles_skips_the_surge() {
        let mut s = surge();
        assert_eq!(s.update(0.8, true, Some(3), 0.0), None);
        assert!(s.is_triggered());
        // Landing and settling must not fire it afterwards
        assert_eq!(s.update(0.8, false, None, 900.0), None);
        assert_eq!(s.update(0.801, false, None, 950.0), None);
        assert!(!s.is_animating());
    }

    #[test]
    fn navigation_to_bubbles_plays_after_settling() {
        let mut s = surge();
        assert_eq!(s.update(0.2, true, Some(BUBBLES_SECTION), 0.0), None);
        assert_eq!(s.update(0.2, true, Some(BUBBLES_SECTION), 16.0), None);
        assert_eq!(
            s.update(0.2, false, None, 32.0),
            Some(SurgeEvent::Started)
        );
    }

    #[test]
    fn raw_jump_waits_for_scroll_to_settle() {
        let mut s = surge();
        assert_eq!(s.update(0.3, false, None, 0.0), None);
        assert_eq!(s.update(0.35, false, None, 16.0), None);
        assert_eq!(s.update(0.351, false, None, 32.0), Some(SurgeEvent::Started));
    }

    #[test]
    fn draws_only_while_animating() {
        let mut s = surge();
        let mut idle = RecordingSurface::default();
        s.draw(&mut idle, 1280.0, 720.0, 0.0).unwrap();
        assert!(idle.calls.is_empty());

        creep(&mut s, 0.0, 0.17, 0.0);
        let mut surface = RecordingSurface::default();
        // Every bubble has started by 0.5s and none has finished before 0.6s
        s.draw(&mut surface, 1280.0, 720.0, 550.0).unwrap();
        assert_eq!(surface.rings(), BubbleSurge::BUBBLE_COUNT);
    }
}
