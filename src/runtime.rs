// Browser glue: sizing the canvas, wiring event listeners, and running the
// `requestAnimationFrame` loop that drives a `Backdrop`.
//
// Listeners never draw. They record into the shared `FrameInputs` and the
// single frame callback picks the values up. Unmounting (or dropping the
// handle from JS with `free()`) cancels the pending frame and removes every
// listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
    HtmlVideoElement, PointerEvent, ScrollBehavior, ScrollToOptions, WheelEvent, Window,
};

use crate::backdrop::Backdrop;
use crate::canvas::CanvasSurface;
use crate::config::{BackdropConfig, BackdropOptions};
use crate::nav::SECTIONS;
use crate::scroll::ScrollSample;
use crate::state::{FrameInputs, SharedInputs};
use crate::Timer;

// While the bubble surge plays, wheel scrolling moves the page at a tenth of its speed
const LOCKED_WHEEL_FACTOR: f64 = 0.1;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, JsValue> {
        let mut options = AddEventListenerOptions::new();
        #[allow(deprecated)]
        options.passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Listener {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to remove {} listener: {:?}", self.kind, err);
        }
    }
}

struct Mounted {
    window: Window,
    backdrop: Rc<RefCell<Backdrop>>,
    frame_cb: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    _listeners: Vec<Listener>,
}

impl Mounted {
    fn start(&self) -> Result<(), JsValue> {
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            self.frame_id.set(Some(id));
        }
        Ok(())
    }

    fn teardown(self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                warn!("failed to cancel animation frame: {:?}", err);
            }
        }
        // The frame closure holds a handle to its own slot, clearing the slot breaks the cycle
        self.frame_cb.borrow_mut().take();
    }
}

/// A running backdrop. Call `unmount` (or `free`) when the canvas goes away.
#[wasm_bindgen]
pub struct BackdropHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl BackdropHandle {
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.inner.take() {
            mounted.teardown();
            info!("backdrop unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.is_some()
    }

    /// Highlights a section right away and smooth-scrolls to it.
    /// Returns false for an unknown section or an unmounted backdrop.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        let mounted = match &self.inner {
            Some(mounted) => mounted,
            None => return false,
        };
        let now = now_ms(&mounted.window);
        let offset = match mounted.backdrop.borrow_mut().navigate_to(index, now) {
            Some(offset) => offset,
            None => return false,
        };
        let mut options = ScrollToOptions::new();
        #[allow(deprecated)]
        options.top(offset).behavior(ScrollBehavior::Smooth);
        mounted.window.scroll_to_with_scroll_to_options(&options);
        true
    }

    /// Document offsets of the page sections, in page order.
    pub fn set_section_offsets(&mut self, offsets: Vec<f64>) {
        if let Some(mounted) = &self.inner {
            mounted.backdrop.borrow_mut().set_section_offsets(offsets);
        }
    }

    pub fn scroll_progress(&self) -> f64 {
        self.read(|b| b.scroll_progress()).unwrap_or(0.0)
    }

    pub fn active_section(&self) -> usize {
        self.read(|b| b.active_section()).unwrap_or(0)
    }

    pub fn active_section_id(&self) -> Option<String> {
        let index = self.active_section();
        SECTIONS.get(index).map(|s| s.id.to_owned())
    }

    pub fn section_label(&self, index: usize) -> Option<String> {
        SECTIONS.get(index).map(|s| s.label.to_owned())
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.read(|b| b.is_scroll_locked()).unwrap_or(false)
    }

    /// The current sky as a CSS background, for page elements that sit outside the canvas.
    pub fn sky_gradient_css(&self) -> Option<String> {
        self.read(|b| {
            let sky = b.sky();
            format!(
                "linear-gradient(180deg, {} 0%, {} 50%, {} 100%)",
                sky.top.to_css(),
                sky.middle.to_css(),
                sky.bottom.to_css()
            )
        })
    }
}

impl BackdropHandle {
    fn read<T>(&self, f: impl FnOnce(&Backdrop) -> T) -> Option<T> {
        let mounted = self.inner.as_ref()?;
        let backdrop = mounted.backdrop.try_borrow().ok()?;
        Some(f(&backdrop))
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Takes over `canvas`: sizes it to its parent, starts listening to the
/// window, and begins drawing on the next animation frame.
#[wasm_bindgen]
pub fn mount(canvas: HtmlCanvasElement, options: &BackdropOptions) -> Result<BackdropHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let config = BackdropConfig::from(options);
    let backdrop = Rc::new(RefCell::new(Backdrop::new(&config, StdRng::from_entropy())));
    let (width, height) = fit_canvas(&window, &canvas, &ctx)?;
    backdrop.borrow_mut().resize(width, height);

    let inputs = FrameInputs::shared();
    match read_scroll(&window) {
        Ok(sample) => inputs.borrow_mut().record_scroll(sample),
        Err(err) => warn!("failed to read initial scroll position: {:?}", err),
    }
    let locked = Rc::new(Cell::new(false));

    let listeners = attach_listeners(&window, &canvas, &inputs, &locked)?;

    let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let (frame_inner, id_inner) = (frame_cb.clone(), frame_id.clone());
        let (backdrop, inputs, locked) = (backdrop.clone(), inputs.clone(), locked.clone());
        let window = window.clone();
        let profile = config.profile;
        *frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = now_ms(&window);
            let snapshot = inputs.borrow_mut().drain();
            {
                let _timer = if profile {
                    Some(Timer::new("Backdrop::frame"))
                } else {
                    None
                };
                let mut backdrop = backdrop.borrow_mut();
                if snapshot.resized {
                    match fit_canvas(&window, &canvas, &ctx) {
                        Ok((w, h)) => backdrop.resize(w, h),
                        Err(err) => warn!("failed to resize canvas: {:?}", err),
                    }
                }
                if let Err(err) = backdrop.frame(snapshot, now, &mut CanvasSurface::new(&ctx)) {
                    error!("frame failed: {:?}", err);
                }
                locked.set(backdrop.is_scroll_locked());
            }

            if let Some(cb) = frame_inner.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => id_inner.set(Some(id)),
                    Err(err) => {
                        id_inner.set(None);
                        error!("failed to schedule frame: {:?}", err);
                    }
                }
            }
        }) as Box<dyn FnMut()>));
    }

    let mounted = Mounted {
        window,
        backdrop,
        frame_cb,
        frame_id,
        _listeners: listeners,
    };
    let handle = BackdropHandle {
        inner: Some(mounted),
    };
    if let Some(mounted) = &handle.inner {
        mounted.start()?;
    }
    info!("backdrop mounted at {}x{}", width, height);
    Ok(handle)
}

fn attach_listeners(
    window: &Window,
    canvas: &HtmlCanvasElement,
    inputs: &SharedInputs,
    locked: &Rc<Cell<bool>>,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::with_capacity(6);

    let on_resize = {
        let inputs = inputs.clone();
        Closure::wrap(Box::new(move |_: Event| {
            inputs.borrow_mut().record_resize();
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "resize", true, on_resize)?);

    let on_pointer_move = {
        let (inputs, canvas) = (inputs.clone(), canvas.clone());
        Closure::wrap(Box::new(move |event: Event| {
            if let Some(event) = event.dyn_ref::<PointerEvent>() {
                let rect = canvas.get_bounding_client_rect();
                inputs.borrow_mut().record_pointer([
                    event.client_x() as f64 - rect.left(),
                    event.client_y() as f64 - rect.top(),
                ]);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "pointermove", true, on_pointer_move)?);

    let on_scroll = {
        let (inputs, window) = (inputs.clone(), window.clone());
        Closure::wrap(Box::new(move |_: Event| match read_scroll(&window) {
            Ok(sample) => inputs.borrow_mut().record_scroll(sample),
            Err(err) => warn!("failed to read scroll position: {:?}", err),
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "scroll", true, on_scroll)?);

    let on_scroll_end = {
        let inputs = inputs.clone();
        Closure::wrap(Box::new(move |_: Event| {
            inputs.borrow_mut().record_scroll_end();
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "scrollend", true, on_scroll_end)?);

    // Not passive: it has to be able to cancel the default scroll
    let on_wheel = {
        let (locked, window) = (locked.clone(), window.clone());
        Closure::wrap(Box::new(move |event: Event| {
            if !locked.get() {
                return;
            }
            if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                event.prevent_default();
                window.scroll_by_with_x_and_y(0.0, wheel.delta_y() * LOCKED_WHEEL_FACTOR);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "wheel", false, on_wheel)?);

    let on_touch_move = {
        let locked = locked.clone();
        Closure::wrap(Box::new(move |event: Event| {
            if locked.get() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>)
    };
    listeners.push(Listener::attach(window, "touchmove", false, on_touch_move)?);

    Ok(listeners)
}

// Sizes the backing store for the device pixel ratio and returns the CSS size
fn fit_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
) -> Result<(f64, f64), JsValue> {
    let (width, height) = match canvas.parent_element() {
        Some(parent) => {
            let rect = parent.get_bounding_client_rect();
            (rect.width(), rect.height())
        }
        None => (
            window.inner_width()?.as_f64().unwrap_or(0.0),
            window.inner_height()?.as_f64().unwrap_or(0.0),
        ),
    };
    let dpr = match window.device_pixel_ratio() {
        dpr if dpr > 0.0 => dpr,
        _ => 1.0,
    };

    canvas.set_width((width * dpr).round() as u32);
    canvas.set_height((height * dpr).round() as u32);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", width))?;
    style.set_property("height", &format!("{}px", height))?;
    // Absolute, so repeated resizes never stack scales
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    Ok((width, height))
}

fn read_scroll(window: &Window) -> Result<ScrollSample, JsValue> {
    let scroll_y = window.scroll_y()?;
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|doc| doc.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(viewport_height);
    Ok(ScrollSample {
        scroll_y,
        document_height,
        viewport_height,
    })
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Starts muted looping playback. Browsers may refuse autoplay, which is fine.
#[wasm_bindgen]
pub fn autoplay_muted(video: &HtmlVideoElement) {
    video.set_muted(true);
    video.set_loop(true);
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                debug!("video autoplay was blocked: {:?}", err);
            }
        }),
        Err(err) => debug!("video autoplay unavailable: {:?}", err),
    }
}
