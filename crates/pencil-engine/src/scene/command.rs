use crate::api::types::NodeId;
use crate::geometry::transform::Transform;
use super::node::Node;

/// A single mutation of the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Remove everything previously attached.
    Clear,
    /// Size the canvas.
    Resize { width: f32, height: f32 },
    /// Append a node tree to the canvas root.
    Attach(Node),
    /// Replace a node's transform.
    SetTransform { id: NodeId, transform: Transform },
    /// Stroke dash pattern used for the draw-on effect: one dash of `array`
    /// length, shifted by `offset`. `offset == array` hides the whole stroke.
    SetStrokeDash { id: NodeId, array: f32, offset: f32 },
    /// Fill opacity in [0, 1].
    SetFillOpacity { id: NodeId, opacity: f32 },
    /// Whole-node opacity in [0, 1].
    SetOpacity { id: NodeId, opacity: f32 },
}

impl SceneCommand {
    /// The node this command targets, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            SceneCommand::Clear | SceneCommand::Resize { .. } => None,
            SceneCommand::Attach(node) => node.id,
            SceneCommand::SetTransform { id, .. }
            | SceneCommand::SetStrokeDash { id, .. }
            | SceneCommand::SetFillOpacity { id, .. }
            | SceneCommand::SetOpacity { id, .. } => Some(*id),
        }
    }
}
