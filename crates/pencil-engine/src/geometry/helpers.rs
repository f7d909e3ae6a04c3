//! Builders for the three kinds of drawable the animation attaches: the
//! pencil marker, static labels and per-letter path nodes.
//!
//! Each builder returns a detached [`Node`] tree; attaching it is the
//! caller's job.

use std::sync::Arc;

use glam::Vec2;
use log::debug;

use crate::api::types::{NodeId, NodeIds};
use crate::assets::registry::{GlyphPath, GlyphRegistry};
use crate::geometry::transform::Placement;
use crate::scene::{Node, Shape, Style, TextAnchor};

/// Ink colour shared by letters and labels. Resolved by the page theme.
pub const PENCIL_COLOR: &str = "var(--pencil-color)";
/// Font used for static labels.
pub const LABEL_FONT_FAMILY: &str = "Patrick Hand, cursive";

/// Measures rendered text. Surfaces that can lay out text implement this;
/// otherwise labels fall back to an estimate.
pub trait TextMetrics {
    fn text_length(&self, text: &str, font_size: f32) -> Option<f32>;
}

/// No measurement available; always falls back to the estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn text_length(&self, _text: &str, _font_size: f32) -> Option<f32> {
        None
    }
}

/// Horizontal alignment of a label relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    /// Centered on x.
    Center,
}

/// A built label and its rendered (or estimated) length.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub node: Node,
    pub length: f32,
}

/// A built pencil marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PencilMarker {
    pub node: Node,
    /// Id of the outer group, the node to reposition.
    pub id: NodeId,
}

/// A built letter: positioning group around the glyph path.
#[derive(Debug, Clone)]
pub struct LetterNode {
    pub node: Node,
    pub group: NodeId,
    /// The path that receives stroke-dash and fill updates.
    pub path: NodeId,
    pub glyph: Arc<GlyphPath>,
    pub placement: Placement,
}

/// Multi-part pencil drawn around the origin, lead point at (0, 0) and the
/// body extending upwards. Reposition it with a pose transform.
pub fn pencil_marker(ids: &mut NodeIds) -> PencilMarker {
    let id = ids.next_id();

    let shadow = Node::new(Shape::Ellipse { cx: 0.0, cy: 3.0, rx: 7.0, ry: 2.0 })
        .with_style(Style::fill("rgba(0,0,0,0.2)").with_filter("blur(2px)"));
    let body = Node::path("M-6,-60 L6,-60 L6,-6 L0,0 L-6,-6 Z")
        .with_style(Style::fill("#F9C74F"));
    let stripe_left = Node::path("M-2.5,-60 L-2.5,-6 L-1,-5 L-1,-60 Z")
        .with_style(Style::fill("#F3A712"));
    let stripe_right = Node::path("M2,-60 L2,-6 L3.5,-7 L3.5,-60 Z")
        .with_style(Style::fill("#F3A712"));
    let tip = Node::path("M-6,-6 L0,0 L6,-6 L6,-12 L-6,-12 Z")
        .with_style(Style::fill("#6C757D"));
    let lead = Node::path("M-1.5,-6 L0,0 L1.5,-6 Z").with_style(Style::fill("#343A40"));
    let band = Node::new(Shape::Rect { x: -5.0, y: -66.0, width: 10.0, height: 6.0, rx: 0.0 })
        .with_style(Style::fill("#CED4DA"));
    let eraser = Node::new(Shape::Rect { x: -4.5, y: -72.0, width: 9.0, height: 6.0, rx: 1.5 })
        .with_style(Style::fill("#FF6B6B"));

    let node = Node::group(vec![
        shadow,
        body,
        stripe_left,
        stripe_right,
        tip,
        lead,
        band,
        eraser,
    ])
    .with_id(id);

    PencilMarker { node, id }
}

/// Static text at (x, y). The returned length comes from `metrics` when it
/// can measure, else `chars * font_size / 2`.
pub fn label(
    text: &str,
    x: f32,
    y: f32,
    font_size: f32,
    alignment: Alignment,
    metrics: &dyn TextMetrics,
    ids: &mut NodeIds,
) -> Label {
    let anchor = match alignment {
        Alignment::Left => TextAnchor::Start,
        Alignment::Center => TextAnchor::Middle,
    };
    let text_node = Node::new(Shape::Text {
        content: text.to_string(),
        x,
        y,
        font_size,
        font_family: LABEL_FONT_FAMILY.to_string(),
        anchor,
    })
    .with_id(ids.next_id())
    .with_style(Style::fill(PENCIL_COLOR));

    let length = metrics
        .text_length(text, font_size)
        .filter(|l| l.is_finite())
        .unwrap_or_else(|| text.chars().count() as f32 * font_size / 2.0);

    Label {
        node: Node::group(vec![text_node]),
        length,
    }
}

/// Path node for `ch`, translated to (x, y) and scaled. Returns None when the
/// registry has no path for the character.
pub fn letter_node(
    ch: char,
    x: f32,
    y: f32,
    scale: f32,
    registry: &GlyphRegistry,
    ids: &mut NodeIds,
) -> Option<LetterNode> {
    let Some(glyph) = registry.get(ch) else {
        debug!("no path for character {ch:?}");
        return None;
    };

    let group = ids.next_id();
    let path = ids.next_id();
    let placement = Placement::new(Vec2::new(x, y), scale);

    let path_node = Node::path(glyph.source())
        .with_id(path)
        .with_style(Style::fill(PENCIL_COLOR).with_stroke(PENCIL_COLOR, 1.0).rounded());
    let node = Node::group(vec![path_node])
        .with_id(group)
        .with_transform(placement);

    Some(LetterNode {
        node,
        group,
        path,
        glyph: Arc::clone(glyph),
        placement,
    })
}
