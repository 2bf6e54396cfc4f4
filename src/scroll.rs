// Scroll progress: how far through the page the viewport is, as a fraction in [0, 1]

/// Raw viewport measurements captured by the scroll listener.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    pub fn progress(&self) -> f64 {
        scroll_progress(self.scroll_y, self.document_height, self.viewport_height)
    }
}

/// `scroll_y / (document_height - viewport_height)` clamped to [0, 1].
/// Pages that can't scroll, and garbage input, report 0.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || !scroll_y.is_finite() || scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).max(0.0).min(1.0)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f64,
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub is_jump: bool,
}

// Keeps only the latest sample between frames so a burst of scroll events
// costs one progress computation
pub struct ScrollTracker {
    pending: Option<ScrollSample>,
    last_progress: f64,
}

impl ScrollTracker {
    pub const JUMP_DELTA: f64 = 0.1;

    pub fn new() -> Self {
        ScrollTracker {
            pending: None,
            last_progress: 0.0,
        }
    }

    pub fn record(&mut self, sample: ScrollSample) {
        self.pending = Some(sample);
    }

    pub fn progress(&self) -> f64 {
        self.last_progress
    }

    /// Consumes the latest recorded sample, if any, once per frame.
    pub fn sample(&mut self) -> Option<ProgressUpdate> {
        let sample = self.pending.take()?;
        let progress = sample.progress();
        let is_jump = (progress - self.last_progress).abs() > ScrollTracker::JUMP_DELTA;
        self.last_progress = progress;
        Some(ProgressUpdate {
            progress,
            scroll_y: sample.scroll_y,
            viewport_height: sample.viewport_height,
            is_jump,
        })
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        ScrollTracker::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_stays_in_unit_range() {
        for &scroll_y in &[0.0, 1.0, 250.0, 999.0, 1000.0, 5000.0, 1.0e12] {
            let p = scroll_progress(scroll_y, 1800.0, 800.0);
            assert!(p >= 0.0 && p <= 1.0, "{} out of range for {}", p, scroll_y);
        }
        assert_eq!(scroll_progress(500.0, 1800.0, 800.0), 0.5);
        assert_eq!(scroll_progress(-40.0, 1800.0, 800.0), 0.0);
    }

    #[test]
    fn short_pages_do_not_divide_by_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(120.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_progress(f64::NAN, 1800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, f64::INFINITY, 800.0), 0.0);
    }

    #[test]
    fn tracker_computes_once_per_frame() {
        let mut tracker = ScrollTracker::new();
        assert_eq!(tracker.sample(), None);

        for y in (0..10).map(|i| i as f64 * 10.0) {
            tracker.record(ScrollSample {
                scroll_y: y,
                document_height: 1100.0,
                viewport_height: 100.0,
            });
        }
        let update = tracker.sample().unwrap();
        assert!((update.progress - 0.09).abs() < 1e-12);
        assert!(!update.is_jump);
        assert_eq!(tracker.sample(), None);
    }

    #[test]
    fn large_moves_are_jumps() {
        let mut tracker = ScrollTracker::new();
        tracker.record(ScrollSample {
            scroll_y: 600.0,
            document_height: 1100.0,
            viewport_height: 100.0,
        });
        assert!(tracker.sample().unwrap().is_jump);
        assert_eq!(tracker.progress(), 0.6);
    }
}
