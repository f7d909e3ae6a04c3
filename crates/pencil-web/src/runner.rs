use js_sys::{Function, Object, Reflect};
use log::warn;
use pencil_engine::{AnimationContext, AnimationEvent, SequenceController, SequenceError};
use wasm_bindgen::JsValue;

use crate::svg::SvgSurface;

/// JS callbacks registered for the current run.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_complete: Option<Function>,
    pub on_pencil_move: Option<Function>,
}

impl Callbacks {
    /// Deliver events in order. Call this without holding the runner borrow,
    /// since a callback may re-enter the bridge.
    pub fn dispatch(&self, events: &[AnimationEvent]) {
        for event in events {
            let result = match (event, &self.on_pencil_move, &self.on_complete) {
                (AnimationEvent::PencilMoved { x, y }, Some(f), _) => {
                    pencil_position(*x, *y).and_then(|pos| f.call1(&JsValue::NULL, &pos))
                }
                (AnimationEvent::Complete, _, Some(f)) => f.call0(&JsValue::NULL),
                _ => continue,
            };
            if let Err(e) = result {
                warn!("animation callback failed: {e:?}");
            }
        }
    }
}

fn pencil_position(x: f32, y: f32) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"x".into(), &JsValue::from_f64(x as f64))?;
    Reflect::set(&obj, &"y".into(), &JsValue::from_f64(y as f64))?;
    Ok(obj.into())
}

/// Wires the sequence controller to an SVG surface.
///
/// wasm-bindgen cannot export this directly; `lib.rs` keeps one in a
/// `thread_local!` and exposes free functions.
pub struct AnimationRunner {
    controller: SequenceController,
    ctx: AnimationContext,
    surface: SvgSurface,
    callbacks: Callbacks,
}

impl AnimationRunner {
    pub fn new(controller: SequenceController, surface: SvgSurface) -> Self {
        Self {
            controller,
            ctx: AnimationContext::new(),
            surface,
            callbacks: Callbacks::default(),
        }
    }

    /// Start a run sized to the surface. Returns the events produced while
    /// preparing the canvas (none today, but callers dispatch uniformly).
    pub fn start(
        &mut self,
        name: &str,
        greeting: &str,
        callbacks: Callbacks,
    ) -> Result<Vec<AnimationEvent>, SequenceError> {
        let width = self.surface.width();
        self.controller.start(name, greeting, width, &mut self.ctx)?;
        self.callbacks = callbacks;
        Ok(self.flush())
    }

    /// Run one frame and return its events for dispatch.
    pub fn tick(&mut self, dt: f32) -> Vec<AnimationEvent> {
        self.controller.tick(dt, &mut self.ctx);
        self.flush()
    }

    pub fn cancel(&mut self) {
        self.controller.cancel();
        self.ctx.clear_frame_data();
        self.callbacks = Callbacks::default();
    }

    pub fn is_complete(&self) -> bool {
        self.controller.is_complete()
    }

    pub fn callbacks(&self) -> Callbacks {
        self.callbacks.clone()
    }

    fn flush(&mut self) -> Vec<AnimationEvent> {
        for command in self.ctx.drain_commands() {
            if let Err(e) = self.surface.apply(&command) {
                warn!("could not apply {:?}: {e:?}", command.target());
            }
        }
        self.ctx.drain_events()
    }
}
