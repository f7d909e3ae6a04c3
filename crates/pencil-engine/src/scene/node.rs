use crate::api::types::NodeId;
use crate::geometry::transform::Transform;

/// Horizontal anchoring of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

/// Geometry of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group(Vec<Node>),
    Path { d: String },
    Rect { x: f32, y: f32, width: f32, height: f32, rx: f32 },
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Text {
        content: String,
        x: f32,
        y: f32,
        font_size: f32,
        font_family: String,
        anchor: TextAnchor,
    },
}

/// Presentation attributes. Colours are CSS strings so theme variables pass
/// straight through to the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    /// Round line caps and joins.
    pub round: bool,
    pub filter: Option<String>,
    pub opacity: Option<f32>,
}

impl Style {
    pub fn fill(color: &str) -> Self {
        Self {
            fill: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn with_stroke(mut self, color: &str, width: f32) -> Self {
        self.stroke = Some(color.to_string());
        self.stroke_width = Some(width);
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// A node in the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Set on nodes the engine mutates after attaching them.
    pub id: Option<NodeId>,
    pub shape: Shape,
    pub style: Style,
    pub transform: Option<Transform>,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: None,
            shape,
            style: Style::default(),
            transform: None,
        }
    }

    pub fn group(children: Vec<Node>) -> Self {
        Self::new(Shape::Group(children))
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::new(Shape::Path { d: d.into() })
    }

    // -- Builder methods --

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// SVG element name for this node.
    pub fn tag(&self) -> &'static str {
        match self.shape {
            Shape::Group(_) => "g",
            Shape::Path { .. } => "path",
            Shape::Rect { .. } => "rect",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Text { .. } => "text",
        }
    }

    /// Child nodes (empty for leaves).
    pub fn children(&self) -> &[Node] {
        match &self.shape {
            Shape::Group(children) => children,
            _ => &[],
        }
    }

    /// Text content for text nodes.
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Element attributes as SVG name/value pairs, geometry first.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::with_capacity(8);

        match &self.shape {
            Shape::Group(_) => {}
            Shape::Path { d } => attrs.push(("d", d.clone())),
            Shape::Rect { x, y, width, height, rx } => {
                attrs.push(("x", x.to_string()));
                attrs.push(("y", y.to_string()));
                attrs.push(("width", width.to_string()));
                attrs.push(("height", height.to_string()));
                if *rx > 0.0 {
                    attrs.push(("rx", rx.to_string()));
                    attrs.push(("ry", rx.to_string()));
                }
            }
            Shape::Ellipse { cx, cy, rx, ry } => {
                attrs.push(("cx", cx.to_string()));
                attrs.push(("cy", cy.to_string()));
                attrs.push(("rx", rx.to_string()));
                attrs.push(("ry", ry.to_string()));
            }
            Shape::Text { x, y, font_size, font_family, anchor, .. } => {
                attrs.push(("x", x.to_string()));
                attrs.push(("y", y.to_string()));
                attrs.push(("font-family", font_family.clone()));
                attrs.push(("font-size", font_size.to_string()));
                if *anchor == TextAnchor::Middle {
                    attrs.push(("text-anchor", "middle".to_string()));
                }
            }
        }

        if let Some(transform) = &self.transform {
            attrs.push(("transform", transform.to_svg()));
        }

        let style = &self.style;
        if let Some(fill) = &style.fill {
            attrs.push(("fill", fill.clone()));
        }
        if let Some(stroke) = &style.stroke {
            attrs.push(("stroke", stroke.clone()));
        }
        if let Some(width) = style.stroke_width {
            attrs.push(("stroke-width", width.to_string()));
        }
        if style.round {
            attrs.push(("stroke-linecap", "round".to_string()));
            attrs.push(("stroke-linejoin", "round".to_string()));
        }
        if let Some(filter) = &style.filter {
            attrs.push(("filter", filter.clone()));
        }
        if let Some(opacity) = style.opacity {
            attrs.push(("opacity", opacity.to_string()));
        }

        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr<'a>(attrs: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn rect_attributes() {
        let node = Node::new(Shape::Rect { x: -4.5, y: -72.0, width: 9.0, height: 6.0, rx: 1.5 })
            .with_style(Style::fill("#FF6B6B"));
        let attrs = node.attributes();

        assert_eq!(node.tag(), "rect");
        assert_eq!(attr(&attrs, "x"), Some("-4.5"));
        assert_eq!(attr(&attrs, "ry"), Some("1.5"));
        assert_eq!(attr(&attrs, "fill"), Some("#FF6B6B"));
        assert_eq!(attr(&attrs, "stroke"), None);
    }

    #[test]
    fn centered_text_sets_anchor() {
        let node = Node::new(Shape::Text {
            content: "Hi".into(),
            x: 10.0,
            y: 70.0,
            font_size: 34.0,
            font_family: "serif".into(),
            anchor: TextAnchor::Middle,
        });
        let attrs = node.attributes();
        assert_eq!(attr(&attrs, "text-anchor"), Some("middle"));
        assert_eq!(node.text_content(), Some("Hi"));
    }

    #[test]
    fn find_walks_children() {
        let inner = Node::path("M0 0").with_id(NodeId(7));
        let group = Node::group(vec![inner]).with_id(NodeId(3));

        assert_eq!(group.find(NodeId(3)).map(|n| n.tag()), Some("g"));
        assert_eq!(group.find(NodeId(7)).map(|n| n.tag()), Some("path"));
        assert!(group.find(NodeId(9)).is_none());
    }
}
