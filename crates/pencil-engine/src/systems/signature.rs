//! Signature flourish drawn after the last letter, and the sparkle that
//! fades in once the run is complete.

use std::f32::consts::PI;

use glam::Vec2;
use log::error;

use crate::api::config::{AnimationConfig, SignatureConfig};
use crate::api::context::AnimationContext;
use crate::api::types::{NodeId, NodeIds};
use crate::core::time::{Delay, Stopwatch};
use crate::geometry::helpers::LABEL_FONT_FAMILY;
use crate::geometry::outline::{Outline, FLATTEN_TOLERANCE};
use crate::geometry::path_data::parse_path_data;
use crate::scene::{Node, SceneCommand, Shape, Style, TextAnchor};
use crate::systems::pencil::Pencil;

pub const FLOURISH_COLOR: &str = "var(--accent-alt)";
pub const SPARKLE: &str = "✨";

/// Flourish starts this far right of and below the cursor.
const FLOURISH_OFFSET: Vec2 = Vec2::new(10.0, 10.0);
/// Net travel of the flourish curve.
const FLOURISH_RUN: f32 = 30.0;
const FLOURISH_RISE: f32 = 15.0;
/// Extra pencil tilt, in degrees, reached at the end of the flourish.
const FLOURISH_TILT: f32 = 30.0;

/// Sparkle anchor relative to the cursor and name baseline.
const SPARKLE_OFFSET: Vec2 = Vec2::new(50.0, -10.0);
const SPARKLE_FONT_SIZE: f32 = 24.0;

fn flourish_data(origin: Vec2) -> String {
    format!("M {},{} c 10,-5 20,5 30,-15", origin.x, origin.y)
}

/// The underline-like curl after the name.
#[derive(Debug, Clone)]
pub struct Flourish {
    path: NodeId,
    origin: Vec2,
    length: f32,
    clock: Stopwatch,
}

impl Flourish {
    /// Attach the flourish (fully hidden) after `cursor_x` and move the
    /// pencil to its start.
    pub fn start(
        cursor_x: f32,
        name_y: f32,
        signature: &SignatureConfig,
        config: &AnimationConfig,
        pencil: &mut Pencil,
        ids: &mut NodeIds,
        ctx: &mut AnimationContext,
    ) -> Self {
        let origin = Vec2::new(cursor_x, name_y) + FLOURISH_OFFSET;
        let d = flourish_data(origin);
        let length = match parse_path_data(&d) {
            Ok(path) => Outline::from_path(path, FLATTEN_TOLERANCE).total_length(),
            Err(e) => {
                error!("flourish path {d:?}: {e}");
                0.0
            }
        };

        let path = ids.next_id();
        let mut style = Style::default().with_stroke(FLOURISH_COLOR, 2.0).rounded();
        style.fill = Some("none".to_string());
        ctx.emit(SceneCommand::Attach(Node::path(d).with_id(path).with_style(style)));
        ctx.emit(SceneCommand::SetStrokeDash { id: path, array: length, offset: length });

        pencil.track(origin, config.pencil_angle, config.pencil_scale, ctx);

        Self {
            path,
            origin,
            length,
            clock: Stopwatch::new(signature.duration_ms),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Pencil tip at `progress`: a straight run right with a sine hump up.
    pub fn tip_at(&self, progress: f32) -> Vec2 {
        self.origin
            + Vec2::new(
                progress * FLOURISH_RUN,
                -(progress * PI).sin() * FLOURISH_RISE,
            )
    }

    /// Advance one frame. Returns true when the flourish is drawn.
    pub fn advance(
        &mut self,
        dt: f32,
        pencil: &mut Pencil,
        config: &AnimationConfig,
        ctx: &mut AnimationContext,
    ) -> bool {
        let progress = self.clock.advance(dt);

        ctx.emit(SceneCommand::SetStrokeDash {
            id: self.path,
            array: self.length,
            offset: self.length * (1.0 - progress),
        });
        let angle = config.pencil_angle + FLOURISH_TILT * progress;
        pencil.track(self.tip_at(progress), angle, config.pencil_scale, ctx);

        progress >= 1.0
    }
}

/// Emoji that fades in a little after completion. Purely decorative: it
/// emits scene commands only, never events.
#[derive(Debug, Clone)]
pub struct Sparkle {
    anchor: Vec2,
    delay: Delay,
    fade: Stopwatch,
    node: Option<NodeId>,
    done: bool,
}

impl Sparkle {
    pub fn new(cursor_x: f32, name_y: f32, signature: &SignatureConfig) -> Self {
        Self {
            anchor: Vec2::new(cursor_x, name_y) + SPARKLE_OFFSET,
            delay: Delay::new(signature.sparkle_delay_ms),
            fade: Stopwatch::new(signature.sparkle_fade_ms),
            node: None,
            done: false,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame. Returns true once fully visible.
    pub fn advance(&mut self, dt: f32, ids: &mut NodeIds, ctx: &mut AnimationContext) -> bool {
        if self.done {
            return true;
        }

        let Some(id) = self.node else {
            if self.delay.advance(dt) {
                let id = ids.next_id();
                let text = Node::new(Shape::Text {
                    content: SPARKLE.to_string(),
                    x: self.anchor.x,
                    y: self.anchor.y,
                    font_size: SPARKLE_FONT_SIZE,
                    font_family: LABEL_FONT_FAMILY.to_string(),
                    anchor: TextAnchor::Start,
                })
                .with_id(id)
                .with_style(Style::default().with_opacity(0.0));
                ctx.emit(SceneCommand::Attach(text));
                self.node = Some(id);
            }
            return false;
        };

        let opacity = self.fade.advance(dt);
        ctx.emit(SceneCommand::SetOpacity { id, opacity });
        self.done = opacity >= 1.0;
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AnimationEvent;

    fn fixture() -> (AnimationConfig, SignatureConfig, Pencil, NodeIds) {
        let mut ids = NodeIds::new();
        let pencil = Pencil::new(ids.next_id(), Vec2::ZERO);
        (AnimationConfig::default(), SignatureConfig::default(), pencil, ids)
    }

    #[test]
    fn flourish_starts_hidden_below_the_cursor() {
        let (config, sig, mut pencil, mut ids) = fixture();
        let mut ctx = AnimationContext::new();

        let f = Flourish::start(200.0, 50.0, &sig, &config, &mut pencil, &mut ids, &mut ctx);

        assert_eq!(f.origin(), Vec2::new(210.0, 60.0));
        assert_eq!(pencil.position(), Vec2::new(210.0, 60.0));
        let attached = ctx.commands.iter().find_map(|c| match c {
            SceneCommand::Attach(n) => Some(n.clone()),
            _ => None,
        });
        let node = attached.unwrap();
        assert!(node
            .attributes()
            .contains(&("d", "M 210,60 c 10,-5 20,5 30,-15".to_string())));
        assert!(node.attributes().contains(&("fill", "none".to_string())));

        let dash = ctx.commands.iter().find_map(|c| match c {
            SceneCommand::SetStrokeDash { array, offset, .. } => Some((*array, *offset)),
            _ => None,
        });
        let (array, offset) = dash.unwrap();
        // Longer than the chord from (0,0) to (30,-15).
        assert!(array > 33.5);
        assert_eq!(array, offset);
        assert_eq!(ctx.events, vec![AnimationEvent::PencilMoved { x: 210.0, y: 60.0 }]);
    }

    #[test]
    fn flourish_pencil_path() {
        let (config, sig, mut pencil, mut ids) = fixture();
        let mut ctx = AnimationContext::new();
        let mut f = Flourish::start(0.0, 0.0, &sig, &config, &mut pencil, &mut ids, &mut ctx);
        ctx.clear_frame_data();

        assert!(!f.advance(200.0, &mut pencil, &config, &mut ctx));
        // Halfway: 15 right, at the top of the hump.
        let mid = pencil.position();
        assert!((mid.x - 25.0).abs() < 1e-4);
        assert!((mid.y - (10.0 - 15.0)).abs() < 1e-4);

        assert!(f.advance(200.0, &mut pencil, &config, &mut ctx));
        let end = pencil.position();
        assert!((end.x - 40.0).abs() < 1e-4);
        assert!((end.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn sparkle_waits_then_fades_in() {
        let sig = SignatureConfig::default();
        let mut ids = NodeIds::new();
        let mut ctx = AnimationContext::new();
        let mut s = Sparkle::new(100.0, 50.0, &sig);
        assert_eq!(s.anchor(), Vec2::new(150.0, 40.0));

        assert!(!s.advance(200.0, &mut ids, &mut ctx));
        assert!(ctx.commands.is_empty());

        assert!(!s.advance(100.0, &mut ids, &mut ctx));
        match &ctx.commands[0] {
            SceneCommand::Attach(node) => {
                assert_eq!(node.text_content(), Some(SPARKLE));
                assert_eq!(node.style.opacity, Some(0.0));
            }
            other => panic!("expected attach, got {other:?}"),
        }

        let mut frames = 0;
        while !s.advance(16.0, &mut ids, &mut ctx) {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(s.is_done());
        assert!(ctx.commands.contains(&SceneCommand::SetOpacity {
            id: NodeId(1),
            opacity: 1.0
        }));
        assert!(ctx.events.is_empty());
    }
}
