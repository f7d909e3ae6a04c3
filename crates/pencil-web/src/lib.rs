//! Browser bridge: drives the name-writing animation on an `<svg>` element.
//!
//! JS owns the frame loop and calls `name_animation_tick` from
//! `requestAnimationFrame` with the elapsed milliseconds.

use std::cell::RefCell;
use std::sync::Arc;

use js_sys::Function;
use log::{error, info, warn};
use pencil_engine::{AnimationConfig, GlyphRegistry, SequenceController};
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub mod runner;
pub mod svg;

pub use runner::{AnimationRunner, Callbacks};
pub use svg::{SvgSurface, SvgTextMeasure};

thread_local! {
    static RUNNER: RefCell<Option<AnimationRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut AnimationRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            warn!("name animation is busy; call ignored");
            return None;
        };
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                warn!("name animation not initialized. Call name_animation_init() first.");
                None
            }
        }
    })
}

/// Load glyphs and config and bind to `svg`. Replaces (and cancels) any
/// previous runner. Returns false when the input is unusable.
#[wasm_bindgen]
pub fn name_animation_init(svg: Element, glyphs_json: &str, config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let registry = match GlyphRegistry::from_json(glyphs_json) {
        Ok(registry) => registry,
        Err(e) => {
            error!("name animation: {e}");
            return false;
        }
    };
    let config = match config_json.as_deref().map(AnimationConfig::from_json) {
        None => AnimationConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            error!("name animation: {e}");
            return false;
        }
    };
    let Some(surface) = SvgSurface::new(svg) else {
        error!("name animation: svg element is not in a document");
        return false;
    };

    let glyph_count = registry.len();
    let controller = SequenceController::new(Arc::new(registry), config)
        .with_text_metrics(Box::new(surface.text_metrics()));
    let runner = AnimationRunner::new(controller, surface);

    let installed = RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(old) = slot.as_mut() {
                old.cancel();
            }
            *slot = Some(runner);
            true
        }
        Err(_) => false,
    });
    if installed {
        info!("name animation: initialized with {glyph_count} glyphs");
    } else {
        warn!("name animation: init called from a callback; ignored");
    }
    installed
}

/// Begin writing `name`. Fails (returns false) while a run is in progress.
#[wasm_bindgen]
pub fn name_animation_start(
    name: &str,
    greeting: &str,
    on_complete: Option<Function>,
    on_pencil_move: Option<Function>,
) -> bool {
    let callbacks = Callbacks {
        on_complete,
        on_pencil_move,
    };
    let started = with_runner(|r| r.start(name, greeting, callbacks.clone()));
    match started {
        Some(Ok(events)) => {
            callbacks.dispatch(&events);
            true
        }
        Some(Err(e)) => {
            warn!("name animation: {e}");
            false
        }
        None => false,
    }
}

#[wasm_bindgen]
pub fn name_animation_tick(dt_ms: f32) {
    if let Some((events, callbacks)) = with_runner(|r| (r.tick(dt_ms), r.callbacks())) {
        callbacks.dispatch(&events);
    }
}

#[wasm_bindgen]
pub fn name_animation_cancel() {
    with_runner(|r| r.cancel());
}

#[wasm_bindgen]
pub fn name_animation_is_complete() -> bool {
    with_runner(|r| r.is_complete()).unwrap_or(false)
}
