// Tracks which page section the navigation bar should highlight

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: [Section; 4] = [
    Section { id: "who-n-what", label: "Who 'n What" },
    Section { id: "bubbles", label: "Bubbles" },
    Section { id: "social", label: "Social" },
    Section { id: "events", label: "Events" },
];

pub const BUBBLES_SECTION: usize = 1;

pub struct SectionTracker {
    offsets: Vec<f64>,
    active: usize,
    target: Option<usize>,
    navigating_until: Option<f64>,
    settling_until: Option<f64>,
    surge_complete: bool,
}

impl SectionTracker {
    /// Fallback for browsers that never fire `scrollend`. Outlasts the bubble surge.
    pub const NAV_TIMEOUT_MS: f64 = 2800.0;
    /// Once the surge has played, anything past this counts as the bubbles section.
    pub const SURGE_SECTION_PROGRESS: f64 = 0.06;

    pub fn new() -> Self {
        SectionTracker {
            offsets: vec![0.0; SECTIONS.len()],
            active: 0,
            target: None,
            navigating_until: None,
            settling_until: None,
            surge_complete: false,
        }
    }

    /// Top offsets of each section in document coordinates, in page order.
    pub fn set_offsets(&mut self, offsets: Vec<f64>) {
        self.offsets = offsets;
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating_until.is_some()
    }

    /// True while a navigation or a raw scroll jump is still in flight.
    pub fn is_settling(&self) -> bool {
        self.is_navigating() || self.settling_until.is_some()
    }

    pub fn surge_complete(&self) -> bool {
        self.surge_complete
    }

    /// Highlights `index` immediately and ignores scroll-driven updates until
    /// the scroll settles or the fallback deadline passes.
    pub fn navigate_to(&mut self, index: usize, now_ms: f64) -> Option<f64> {
        let offset = *self.offsets.get(index)?;
        self.active = index;
        self.target = Some(index);
        self.navigating_until = Some(now_ms + SectionTracker::NAV_TIMEOUT_MS);
        Some(offset)
    }

    // A jump holds back the surge until the scroll settles but leaves the highlight live
    pub fn jumped(&mut self, now_ms: f64) {
        self.settling_until = Some(now_ms + SectionTracker::NAV_TIMEOUT_MS);
    }

    pub fn scroll_ended(&mut self) {
        self.target = None;
        self.navigating_until = None;
        self.settling_until = None;
    }

    pub fn tick(&mut self, now_ms: f64) {
        if self.navigating_until.map_or(false, |deadline| now_ms >= deadline) {
            self.target = None;
            self.navigating_until = None;
        }
        if self.settling_until.map_or(false, |deadline| now_ms >= deadline) {
            self.settling_until = None;
        }
    }

    pub fn force_active(&mut self, index: usize) {
        self.active = index;
    }

    pub fn mark_surge_complete(&mut self) {
        self.surge_complete = true;
        self.active = BUBBLES_SECTION;
    }

    /// Recomputes the highlighted section from scroll position. The section
    /// whose top sits above the upper third of the viewport wins.
    pub fn on_scroll(&mut self, progress: f64, scroll_y: f64, viewport_height: f64, locked: bool) {
        if locked || self.is_navigating() {
            return;
        }
        let marker = scroll_y + viewport_height / 3.0;
        let mut found = self
            .offsets
            .iter()
            .rposition(|&top| top <= marker)
            .unwrap_or(0);
        if self.surge_complete && progress >= SectionTracker::SURGE_SECTION_PROGRESS && found == 0 {
            found = BUBBLES_SECTION;
        }
        self.active = found;
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        SectionTracker::new()
    }
}
