//! Orchestrates a full run: startup delay, greeting, letters one by one
//! with a pause after each, optional flourish, completion.
//!
//! The controller owns no clock. The host calls [`SequenceController::tick`]
//! once per frame with the elapsed milliseconds and drains the context.

use std::sync::Arc;

use glam::Vec2;
use log::{debug, error, info};
use thiserror::Error;

use crate::api::config::{AnimationConfig, ConfigError};
use crate::api::context::AnimationContext;
use crate::api::types::{AnimationEvent, NodeIds};
use crate::assets::registry::GlyphRegistry;
use crate::core::cancel::CancelToken;
use crate::core::time::Delay;
use crate::geometry::helpers::{
    label, letter_node, pencil_marker, Alignment, EstimatedMetrics, TextMetrics,
};
use crate::geometry::transform::PencilPose;
use crate::scene::SceneCommand;
use crate::systems::letter::LetterReveal;
use crate::systems::pencil::Pencil;
use crate::systems::signature::{Flourish, Sparkle};
use crate::systems::spacing;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("an animation is already running")]
    AlreadyRunning,
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Observable run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    StartupDelay,
    GreetingDrawn,
    /// Revealing the letter at this index of the name.
    AnimatingLetter(usize),
    /// Pausing after the letter at this index.
    InterLetterPause(usize),
    Flourish,
    Complete,
    Cancelled,
}

enum Step {
    Idle,
    Startup(Delay),
    GreetingDrawn,
    Letter { index: usize, reveal: LetterReveal },
    Pause { index: usize, delay: Delay },
    Flourish(Flourish),
    Complete,
    Cancelled,
}

pub struct SequenceController {
    registry: Arc<GlyphRegistry>,
    config: AnimationConfig,
    metrics: Box<dyn TextMetrics>,
    ids: NodeIds,
    token: CancelToken,
    step: Step,
    name: Vec<char>,
    greeting: String,
    canvas_width: f32,
    cursor_x: f32,
    pencil: Option<Pencil>,
    greeting_length: Option<f32>,
    sparkle: Option<Sparkle>,
}

impl SequenceController {
    pub fn new(registry: Arc<GlyphRegistry>, config: AnimationConfig) -> Self {
        Self {
            registry,
            config,
            metrics: Box::new(EstimatedMetrics),
            ids: NodeIds::new(),
            token: CancelToken::new(),
            step: Step::Idle,
            name: Vec::new(),
            greeting: String::new(),
            canvas_width: 0.0,
            cursor_x: 0.0,
            pencil: None,
            greeting_length: None,
            sparkle: None,
        }
    }

    /// Use `metrics` to measure the greeting label.
    pub fn with_text_metrics(mut self, metrics: Box<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Begin writing `name` under `greeting` on a canvas `canvas_width`
    /// wide. Clears the canvas and places the pencil off to the left.
    ///
    /// Fails while a run is in progress; cancel it first.
    pub fn start(
        &mut self,
        name: &str,
        greeting: &str,
        canvas_width: f32,
        ctx: &mut AnimationContext,
    ) -> Result<(), SequenceError> {
        if self.is_running() {
            return Err(SequenceError::AlreadyRunning);
        }
        self.config.validate()?;

        // Anything still holding the previous token sees it dead.
        self.token.cancel();
        self.token = CancelToken::new();

        self.ids.reset();
        self.name = name.chars().collect();
        self.greeting = greeting.to_string();
        self.canvas_width = canvas_width;
        self.greeting_length = None;
        self.sparkle = None;

        // Approximate centering: every letter counted as standard width.
        let scale = self.config.scale_factor;
        let approx_width = self.name.len() as f32 * self.config.spacing.standard * scale;
        self.cursor_x = canvas_width / 2.0 - approx_width / 2.0;

        let layout = self.config.layout;
        ctx.emit(SceneCommand::Clear);
        ctx.emit(SceneCommand::Resize {
            width: canvas_width,
            height: layout.canvas_height,
        });

        let marker = pencil_marker(&mut self.ids);
        let rest = Vec2::new(layout.pencil_start_x, layout.name_y);
        let pose = PencilPose::new(rest, self.config.pencil_angle, self.config.pencil_scale);
        ctx.emit(SceneCommand::Attach(marker.node.with_transform(pose)));
        self.pencil = Some(Pencil::new(marker.id, rest));

        self.step = Step::Startup(Delay::new(layout.startup_delay_ms));
        info!(
            "writing {:?} ({} chars) on a {canvas_width}px canvas",
            name,
            self.name.len()
        );
        Ok(())
    }

    /// Replace the config and start. The config is only swapped in when it
    /// validates and no run is in progress.
    pub fn start_with_config(
        &mut self,
        config: AnimationConfig,
        name: &str,
        greeting: &str,
        canvas_width: f32,
        ctx: &mut AnimationContext,
    ) -> Result<(), SequenceError> {
        if self.is_running() {
            return Err(SequenceError::AlreadyRunning);
        }
        config.validate()?;
        self.config = config;
        self.start(name, greeting, canvas_width, ctx)
    }

    /// Advance by `dt` milliseconds.
    pub fn tick(&mut self, dt: f32, ctx: &mut AnimationContext) {
        if self.token.is_cancelled() {
            if self.is_running() {
                info!("run cancelled");
                self.step = Step::Cancelled;
            }
            self.sparkle = None;
            return;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let Some(pencil) = self.pencil.as_mut() else {
            return;
        };

        match &mut self.step {
            Step::Idle | Step::Cancelled => {}
            Step::Startup(delay) => {
                if delay.advance(dt) {
                    self.draw_greeting(ctx);
                }
            }
            Step::GreetingDrawn => self.begin_letter(0, ctx),
            Step::Letter { index, reveal } => {
                if reveal.advance(dt, pencil, &self.config, ctx) {
                    let index = *index;
                    let ch = self.name[index];
                    let next = self.name.get(index + 1).copied();
                    self.cursor_x += spacing::advance(ch, next, &self.config.spacing)
                        * self.config.scale_factor;
                    self.step = Step::Pause {
                        index,
                        delay: Delay::new(self.config.letter_pause),
                    };
                }
            }
            Step::Pause { index, delay } => {
                if delay.advance(dt) {
                    let next = *index + 1;
                    self.begin_letter(next, ctx);
                }
            }
            Step::Flourish(flourish) => {
                if flourish.advance(dt, pencil, &self.config, ctx) {
                    if let Some(sig) = self.config.signature {
                        self.sparkle =
                            Some(Sparkle::new(self.cursor_x, self.config.layout.name_y, &sig));
                    }
                    self.complete(ctx);
                }
            }
            Step::Complete => {
                if let Some(sparkle) = self.sparkle.as_mut() {
                    if sparkle.advance(dt, &mut self.ids, ctx) {
                        self.sparkle = None;
                    }
                }
            }
        }
    }

    /// Stop the current run. Pending frames become no-ops.
    pub fn cancel(&mut self) {
        self.token.cancel();
        if self.is_running() {
            info!("run cancelled");
            self.step = Step::Cancelled;
        }
        self.sparkle = None;
    }

    /// Handle that cancels the current run when triggered from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn phase(&self) -> Phase {
        match &self.step {
            Step::Idle => Phase::Idle,
            Step::Startup(_) => Phase::StartupDelay,
            Step::GreetingDrawn => Phase::GreetingDrawn,
            Step::Letter { index, .. } => Phase::AnimatingLetter(*index),
            Step::Pause { index, .. } => Phase::InterLetterPause(*index),
            Step::Flourish(_) => Phase::Flourish,
            Step::Complete => Phase::Complete,
            Step::Cancelled => Phase::Cancelled,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.step,
            Step::Startup(_)
                | Step::GreetingDrawn
                | Step::Letter { .. }
                | Step::Pause { .. }
                | Step::Flourish(_)
        )
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.step, Step::Complete)
    }

    /// Left edge of the next letter.
    pub fn cursor_x(&self) -> f32 {
        self.cursor_x
    }

    pub fn pencil(&self) -> Option<&Pencil> {
        self.pencil.as_ref()
    }

    /// Measured (or estimated) greeting width, once drawn.
    pub fn greeting_length(&self) -> Option<f32> {
        self.greeting_length
    }

    fn draw_greeting(&mut self, ctx: &mut AnimationContext) {
        let layout = self.config.layout;
        let greeting = label(
            &self.greeting,
            self.canvas_width / 2.0,
            layout.greeting_y,
            layout.greeting_font_size,
            Alignment::Center,
            self.metrics.as_ref(),
            &mut self.ids,
        );
        ctx.emit(SceneCommand::Attach(greeting.node));
        self.greeting_length = Some(greeting.length);
        debug!("greeting drawn, length {}", greeting.length);
        self.step = Step::GreetingDrawn;
    }

    /// Start the first drawable letter at or after `from`. Missing glyphs
    /// advance the cursor by one standard width; glyphs that measure zero
    /// are skipped in place. Neither costs a pause.
    fn begin_letter(&mut self, from: usize, ctx: &mut AnimationContext) {
        let scale = self.config.scale_factor;
        let name_y = self.config.layout.name_y;

        for index in from..self.name.len() {
            let ch = self.name[index];
            let Some(letter) = letter_node(
                ch,
                self.cursor_x,
                name_y,
                self.config.glyph_scale(),
                &self.registry,
                &mut self.ids,
            ) else {
                self.cursor_x += self.config.spacing.standard * scale;
                continue;
            };

            let length = letter.glyph.length();
            if !length.is_finite() || length <= 0.0 {
                error!("invalid path length {length} for {ch:?}, skipping");
                continue;
            }

            let reveal = LetterReveal::new(ch, &letter, length, &self.config);
            ctx.emit(SceneCommand::Attach(letter.node));
            reveal.begin(ctx);
            self.step = Step::Letter { index, reveal };
            return;
        }

        self.finish_letters(ctx);
    }

    fn finish_letters(&mut self, ctx: &mut AnimationContext) {
        let Some(sig) = self.config.signature else {
            self.complete(ctx);
            return;
        };
        let Some(pencil) = self.pencil.as_mut() else {
            self.complete(ctx);
            return;
        };

        let flourish = Flourish::start(
            self.cursor_x,
            self.config.layout.name_y,
            &sig,
            &self.config,
            pencil,
            &mut self.ids,
            ctx,
        );
        self.step = Step::Flourish(flourish);
    }

    fn complete(&mut self, ctx: &mut AnimationContext) {
        if let Some(pencil) = self.pencil.as_mut() {
            pencil.hide(ctx);
        }
        ctx.emit_event(AnimationEvent::Complete);
        self.step = Step::Complete;
        info!("finished writing {} chars", self.name.len());
    }
}
