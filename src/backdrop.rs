// Per-frame orchestration of the page backdrop.
//
// `Backdrop` owns every animated layer and advances them from the inputs the
// event listeners recorded since the previous frame. Drawing goes through the
// `Surface` trait so the whole frame can run without a browser.
//
// Layers, back to front: sky gradient, sun, stars, particle field, bubble
// surge, cursor trail.

use log::{debug, info};
use rand::rngs::StdRng;

use crate::config::BackdropConfig;
use crate::field::ParticleField;
use crate::nav::{SectionTracker, BUBBLES_SECTION};
use crate::scroll::ScrollTracker;
use crate::sky::SkyTheme;
use crate::stars::StarField;
use crate::state::FrameInputs;
use crate::surface::Surface;
use crate::surge::{BubbleSurge, SurgeEvent};
use crate::trail::CursorTrail;

pub struct Backdrop {
    rng: StdRng,
    width: f64,
    height: f64,
    scroll: ScrollTracker,
    sky: SkyTheme,
    field: ParticleField,
    sections: SectionTracker,
    surge: BubbleSurge,
    stars: StarField,
    trail: Option<CursorTrail>,
}

impl Backdrop {
    const SUN_RADIUS: f64 = 40.0;
    const SUN_GLOW_RADIUS: f64 = 90.0;

    pub fn new(config: &BackdropConfig, mut rng: StdRng) -> Backdrop {
        let surge = BubbleSurge::new(&mut rng);
        let stars = StarField::new(config.star_count, &mut rng);
        Backdrop {
            rng,
            width: 0.0,
            height: 0.0,
            scroll: ScrollTracker::new(),
            sky: SkyTheme::at(0.0),
            field: ParticleField::new(config.field),
            sections: SectionTracker::new(),
            surge,
            stars,
            trail: if config.trail {
                Some(CursorTrail::new())
            } else {
                None
            },
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        info!("backdrop resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.field.resize(width, height, &mut self.rng);
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn sky(&self) -> &SkyTheme {
        &self.sky
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn active_section(&self) -> usize {
        self.sections.active()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.surge.is_animating()
    }

    pub fn set_section_offsets(&mut self, offsets: Vec<f64>) {
        self.sections.set_offsets(offsets);
    }

    /// Starts a programmatic navigation and returns the document offset to
    /// scroll to, or `None` for an unknown section.
    pub fn navigate_to(&mut self, index: usize, now_ms: f64) -> Option<f64> {
        let offset = self.sections.navigate_to(index, now_ms)?;
        debug!("navigating to section {} at {}px", index, offset);
        Some(offset)
    }

    /// Advances every layer by one frame.
    pub fn update(&mut self, inputs: FrameInputs, now_ms: f64) {
        self.field.set_pointer(inputs.pointer);
        if let (true, Some(pos), Some(trail)) =
            (inputs.pointer_moved, inputs.pointer, self.trail.as_mut())
        {
            trail.pointer_moved(pos, now_ms, &mut self.rng);
        }

        let was_settling = self.sections.is_settling();
        if inputs.scroll_ended {
            self.sections.scroll_ended();
        }
        self.sections.tick(now_ms);
        let settled = was_settling && !self.sections.is_settling();

        if let Some(sample) = inputs.scroll {
            self.scroll.record(sample);
        }
        match self.scroll.sample() {
            Some(update) => {
                if update.is_jump {
                    self.sections.jumped(now_ms);
                }
                self.field.set_scroll_y(update.scroll_y);
                self.sky = SkyTheme::at(update.progress);
                self.check_surge(update.progress, now_ms);
                self.sections.on_scroll(
                    update.progress,
                    update.scroll_y,
                    update.viewport_height,
                    self.surge.is_animating(),
                );
            }
            // The surge waits on the scroll settling, so re-check it at the resting position
            None if settled => self.check_surge(self.scroll.progress(), now_ms),
            None => {}
        }

        if let Some(event) = self.surge.tick(now_ms) {
            self.on_surge(event);
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.prune(now_ms);
        }
        self.field.step();
    }

    fn check_surge(&mut self, progress: f64, now_ms: f64) {
        let event = self.surge.update(
            progress,
            self.sections.is_settling(),
            self.sections.target(),
            now_ms,
        );
        if let Some(event) = event {
            self.on_surge(event);
        }
    }

    fn on_surge(&mut self, event: SurgeEvent) {
        debug!("bubble surge {:?}", event);
        match event {
            SurgeEvent::Started => {
                if self.sections.target().is_none() {
                    self.sections.force_active(BUBBLES_SECTION);
                }
            }
            SurgeEvent::Finished => self.sections.mark_surge_complete(),
            SurgeEvent::Cancelled => {}
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, now_ms: f64) -> Result<(), S::Error> {
        let (w, h) = (self.width, self.height);
        let sky = &self.sky;

        surface.clear(w, h)?;
        surface.fill_vertical_gradient(w, h, &[(0.0, sky.top), (0.5, sky.middle), (1.0, sky.bottom)])?;

        if sky.sun_opacity > 0.0 {
            let x = sky.sun_x / 100.0 * w;
            let y = sky.sun_y / 100.0 * h;
            surface.fill_circle(x, y, Backdrop::SUN_GLOW_RADIUS, sky.sun_color, 0.25 * sky.sun_opacity)?;
            surface.fill_circle(x, y, Backdrop::SUN_RADIUS, sky.sun_color, sky.sun_opacity)?;
        }

        self.stars.draw(surface, w, h, sky.star_opacity, now_ms)?;
        self.field.draw(surface)?;
        self.surge.draw(surface, w, h, now_ms)?;
        if let Some(trail) = &self.trail {
            trail.draw(surface, now_ms)?;
        }
        Ok(())
    }

    pub fn frame<S: Surface>(
        &mut self,
        inputs: FrameInputs,
        now_ms: f64,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        self.update(inputs, now_ms);
        self.draw(surface, now_ms)
    }
}
