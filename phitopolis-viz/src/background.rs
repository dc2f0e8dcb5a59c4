//! Network background: owns the field and the surface it is drawn on
//!
//! [`Background`] is the platform-neutral adapter (mount, resize, advance,
//! unmount). [`AnimationLoop`] drives it from `requestAnimationFrame` in the
//! browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::field::{Field, FieldConfig};
use crate::surface::Surface;

/// Particle field bound to a drawing surface
pub struct Background<S: Surface> {
    surface: S,
    field: Option<Field>,
    config: FieldConfig,
    rng: SmallRng,
    mounted: bool,
}

impl<S: Surface> Background<S> {
    /// Size the surface to the container and create the field.
    ///
    /// A zero-sized container leaves the field uninitialized until the first
    /// resize that reports a usable size.
    pub fn mount(width: f64, height: f64, mut surface: S, config: FieldConfig, rng: SmallRng) -> Self {
        surface.set_size(width, height);
        let mut background = Self {
            surface,
            field: None,
            config,
            rng,
            mounted: true,
        };
        background.field = Field::initialize(width, height, &background.config, &mut background.rng);
        background
    }

    /// React to a container size change.
    ///
    /// An existing field only has its bounds updated; its points stay put.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        if !self.mounted {
            return;
        }
        self.surface.set_size(width, height);
        match self.field.as_mut() {
            Some(field) => field.resize(width, height),
            None => {
                self.field = Field::initialize(width, height, &self.config, &mut self.rng);
            }
        }
    }

    /// Run one tick and redraw. Returns false when nothing was drawn.
    pub fn advance(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        field.tick();
        let frame = field.render();
        self.surface.draw_frame(&frame);
        true
    }

    /// Stop drawing and wipe the surface. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.field = None;
        self.surface.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The field, once the container has had a usable size
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that can be cancelled
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    /// Call `step` once per animation frame until cancelled
    pub fn start(mut step: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let running = Rc::new(Cell::new(true));
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let r = running.clone();
        let id = frame_id.clone();
        let next = callback.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !r.get() {
                return;
            }
            step();
            if let Some(f) = next.borrow().as_ref() {
                id.set(dom::request_animation_frame(f).ok());
            }
        }) as Box<dyn FnMut()>));

        if let Some(f) = callback.borrow().as_ref() {
            frame_id.set(Some(dom::request_animation_frame(f)?));
        }

        Ok(Self {
            running,
            frame_id,
            callback,
        })
    }

    /// Stop the loop; no further frames run after this returns
    pub fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.frame_id.take() {
            dom::window().cancel_animation_frame(id).ok();
        }
        // Breaks the closure's reference cycle
        self.callback.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}
