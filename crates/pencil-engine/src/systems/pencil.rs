use glam::Vec2;

use crate::api::context::AnimationContext;
use crate::api::types::{AnimationEvent, NodeId};
use crate::geometry::transform::PencilPose;
use crate::scene::SceneCommand;

/// The pencil marker's live state.
///
/// Exactly one writer at a time: the controller lends `&mut Pencil` to the
/// active letter reveal (or flourish) for the duration of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pencil {
    id: NodeId,
    position: Vec2,
    visible: bool,
}

impl Pencil {
    pub fn new(id: NodeId, position: Vec2) -> Self {
        Self {
            id,
            position,
            visible: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Move the marker without telling the embedding UI.
    pub fn place(&mut self, position: Vec2, angle: f32, scale: f32, ctx: &mut AnimationContext) {
        self.position = position;
        ctx.emit(SceneCommand::SetTransform {
            id: self.id,
            transform: PencilPose::new(position, angle, scale).into(),
        });
    }

    /// Move the marker and report the new tip position.
    pub fn track(&mut self, position: Vec2, angle: f32, scale: f32, ctx: &mut AnimationContext) {
        self.place(position, angle, scale, ctx);
        ctx.emit_event(AnimationEvent::PencilMoved {
            x: position.x,
            y: position.y,
        });
    }

    pub fn hide(&mut self, ctx: &mut AnimationContext) {
        self.visible = false;
        ctx.emit(SceneCommand::SetOpacity { id: self.id, opacity: 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::Transform;

    #[test]
    fn track_emits_transform_and_event() {
        let mut ctx = AnimationContext::new();
        let mut pencil = Pencil::new(NodeId(1), Vec2::ZERO);

        pencil.track(Vec2::new(3.0, 4.0), 30.0, 0.5, &mut ctx);

        assert_eq!(pencil.position(), Vec2::new(3.0, 4.0));
        assert_eq!(
            ctx.commands,
            vec![SceneCommand::SetTransform {
                id: NodeId(1),
                transform: Transform::Pose(PencilPose::new(Vec2::new(3.0, 4.0), 30.0, 0.5)),
            }]
        );
        assert_eq!(ctx.events, vec![AnimationEvent::PencilMoved { x: 3.0, y: 4.0 }]);
    }

    #[test]
    fn place_is_silent() {
        let mut ctx = AnimationContext::new();
        let mut pencil = Pencil::new(NodeId(1), Vec2::ZERO);
        pencil.place(Vec2::new(-50.0, 50.0), 30.0, 0.5, &mut ctx);
        assert_eq!(ctx.commands.len(), 1);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn hide_zeroes_opacity() {
        let mut ctx = AnimationContext::new();
        let mut pencil = Pencil::new(NodeId(2), Vec2::ZERO);
        pencil.hide(&mut ctx);
        assert!(!pencil.is_visible());
        assert_eq!(ctx.commands, vec![SceneCommand::SetOpacity { id: NodeId(2), opacity: 0.0 }]);
    }
}
