//! Reveal of a single letter: stroke draw-on, fill fade-in and pencil
//! tracking, driven one frame at a time.

use std::sync::Arc;

use log::error;

use crate::api::config::{AnimationConfig, PencilTracking};
use crate::api::context::AnimationContext;
use crate::api::types::NodeId;
use crate::assets::registry::GlyphPath;
use crate::core::time::Stopwatch;
use crate::geometry::helpers::LetterNode;
use crate::geometry::transform::Placement;
use crate::scene::SceneCommand;
use crate::systems::pencil::Pencil;

/// Fill stays hidden until the stroke is this far along.
pub const FILL_START: f32 = 0.2;

/// Fill opacity for a given reveal progress: 0 until [`FILL_START`], then a
/// linear ramp reaching 1 at progress 1.
#[inline]
pub fn fill_opacity(progress: f32) -> f32 {
    ((progress - FILL_START) * 1.25).clamp(0.0, 1.0)
}

/// One letter being written.
///
/// The caller validates `length` (finite, positive) before creating the
/// reveal. Consumed by the controller once `advance` reports completion.
#[derive(Debug, Clone)]
pub struct LetterReveal {
    ch: char,
    path: NodeId,
    glyph: Arc<GlyphPath>,
    placement: Placement,
    length: f32,
    clock: Stopwatch,
}

impl LetterReveal {
    pub fn new(ch: char, letter: &LetterNode, length: f32, config: &AnimationConfig) -> Self {
        Self {
            ch,
            path: letter.path,
            glyph: Arc::clone(&letter.glyph),
            placement: letter.placement,
            length,
            clock: Stopwatch::new(config.animation_duration),
        }
    }

    /// Hide the stroke behind a full-length dash offset and zero the fill.
    pub fn begin(&self, ctx: &mut AnimationContext) {
        ctx.emit(SceneCommand::SetStrokeDash {
            id: self.path,
            array: self.length,
            offset: self.length,
        });
        ctx.emit(SceneCommand::SetFillOpacity { id: self.path, opacity: 0.0 });
    }

    /// Advance by one frame. Returns true on the frame the reveal finishes.
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
        ctx.emit(SceneCommand::SetFillOpacity {
            id: self.path,
            opacity: fill_opacity(progress),
        });

        // A failed sample costs one pencil frame, never the letter.
        match self.glyph.outline().point_at_length(self.length * progress) {
            Ok(local) => {
                let tip = match config.pencil_tracking {
                    PencilTracking::Glyph => self.placement.apply(local),
                    PencilTracking::ScaleFactor => {
                        self.placement.offset + local * config.scale_factor
                    }
                };
                pencil.track(tip, config.pencil_angle, config.pencil_scale, ctx);
            }
            Err(e) => error!("letter {:?}: cannot position pencil: {e}", self.ch),
        }

        progress >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AnimationEvent, NodeIds};
    use crate::assets::registry::GlyphRegistry;
    use crate::geometry::helpers::letter_node;
    use glam::Vec2;

    fn setup(d: &str) -> (LetterNode, Pencil) {
        let reg: GlyphRegistry = [('a', d)].into_iter().collect();
        let mut ids = NodeIds::new();
        let letter = letter_node('a', 100.0, 50.0, 2.0, &reg, &mut ids).unwrap();
        let pencil = Pencil::new(ids.next_id(), Vec2::ZERO);
        (letter, pencil)
    }

    #[test]
    fn fill_ramp() {
        assert_eq!(fill_opacity(0.0), 0.0);
        assert_eq!(fill_opacity(0.2), 0.0);
        assert!((fill_opacity(0.6) - 0.5).abs() < 1e-6);
        assert_eq!(fill_opacity(1.0), 1.0);
    }

    #[test]
    fn begin_hides_everything() {
        let (letter, _) = setup("M0 0 L10 0");
        let config = AnimationConfig::default();
        let reveal = LetterReveal::new('a', &letter, 10.0, &config);
        let mut ctx = AnimationContext::new();

        reveal.begin(&mut ctx);

        assert_eq!(
            ctx.commands,
            vec![
                SceneCommand::SetStrokeDash { id: letter.path, array: 10.0, offset: 10.0 },
                SceneCommand::SetFillOpacity { id: letter.path, opacity: 0.0 },
            ]
        );
    }

    #[test]
    fn halfway_frame() {
        let (letter, mut pencil) = setup("M0 0 L10 0");
        let config = AnimationConfig::default();
        let mut reveal = LetterReveal::new('a', &letter, 10.0, &config);
        let mut ctx = AnimationContext::new();

        let done = reveal.advance(150.0, &mut pencil, &config, &mut ctx);

        assert!(!done);
        assert!(ctx.commands.contains(&SceneCommand::SetStrokeDash {
            id: letter.path,
            array: 10.0,
            offset: 5.0
        }));
        // Fill: (0.5 - 0.2) * 1.25
        let fill = ctx.commands.iter().find_map(|c| match c {
            SceneCommand::SetFillOpacity { opacity, .. } => Some(*opacity),
            _ => None,
        });
        assert!((fill.unwrap() - 0.375).abs() < 1e-6);
        // Tip at local (5, 0), scaled by 2 and moved to (100, 50).
        assert_eq!(ctx.events, vec![AnimationEvent::PencilMoved { x: 110.0, y: 50.0 }]);
    }

    #[test]
    fn completes_exactly_at_duration() {
        let (letter, mut pencil) = setup("M0 0 L10 0");
        let config = AnimationConfig::default();
        let mut reveal = LetterReveal::new('a', &letter, 10.0, &config);
        let mut ctx = AnimationContext::new();

        let mut frames = 0;
        while !reveal.advance(10.0, &mut pencil, &config, &mut ctx) {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(frames, 29);
        assert_eq!(pencil.position(), Vec2::new(120.0, 50.0));
        assert!(ctx.commands.contains(&SceneCommand::SetFillOpacity {
            id: letter.path,
            opacity: 1.0
        }));
    }

    #[test]
    fn scale_factor_tracking_ignores_letter_scale() {
        let (letter, mut pencil) = setup("M0 0 L10 0");
        let config = AnimationConfig {
            pencil_tracking: PencilTracking::ScaleFactor,
            ..Default::default()
        };
        let mut reveal = LetterReveal::new('a', &letter, 10.0, &config);
        let mut ctx = AnimationContext::new();

        reveal.advance(150.0, &mut pencil, &config, &mut ctx);
        // Local (5, 0) at scale_factor 1, not the letter's scale of 2.
        assert_eq!(ctx.events, vec![AnimationEvent::PencilMoved { x: 105.0, y: 50.0 }]);
        // The stroke itself is unaffected.
        assert!(ctx.commands.contains(&SceneCommand::SetStrokeDash {
            id: letter.path,
            array: 10.0,
            offset: 5.0
        }));
    }

    #[test]
    fn sample_failure_keeps_animating() {
        // Unparsable data measures as empty; a bogus length gets past the
        // caller so every sample fails.
        let (letter, mut pencil) = setup("L 1 1");
        let config = AnimationConfig::default();
        let mut reveal = LetterReveal::new('a', &letter, 10.0, &config);
        let mut ctx = AnimationContext::new();

        assert!(!reveal.advance(100.0, &mut pencil, &config, &mut ctx));
        assert!(reveal.advance(200.0, &mut pencil, &config, &mut ctx));
        assert!(ctx.events.is_empty());
        // Stroke and fill still updated each frame.
        assert_eq!(ctx.commands.len(), 4);
    }
}
