// Latest values seen by the event listeners, waiting for the next frame.
// Listeners only write here, the frame callback is the only reader.

use std::cell::RefCell;
use std::rc::Rc;

use crate::scroll::ScrollSample;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInputs {
    /// Canvas-local pointer position. Sticks around between frames.
    pub pointer: Option<[f64; 2]>,
    pub pointer_moved: bool,
    pub scroll: Option<ScrollSample>,
    pub resized: bool,
    pub scroll_ended: bool,
}

pub type SharedInputs = Rc<RefCell<FrameInputs>>;

impl FrameInputs {
    pub fn shared() -> SharedInputs {
        Rc::new(RefCell::new(FrameInputs::default()))
    }

    pub fn record_pointer(&mut self, pos: [f64; 2]) {
        self.pointer = Some(pos);
        self.pointer_moved = true;
    }

    pub fn record_scroll(&mut self, sample: ScrollSample) {
        self.scroll = Some(sample);
    }

    pub fn record_resize(&mut self) {
        self.resized = true;
    }

    pub fn record_scroll_end(&mut self) {
        self.scroll_ended = true;
    }

    /// Hands everything recorded since the last frame to the caller and resets
    /// the one-shot flags.
    pub fn drain(&mut self) -> FrameInputs {
        let snapshot = self.clone();
        self.pointer_moved = false;
        self.scroll = None;
        self.resized = false;
        self.scroll_ended = false;
        snapshot
    }
}
