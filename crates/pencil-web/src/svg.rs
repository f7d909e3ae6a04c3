use std::collections::HashMap;

use log::debug;
use pencil_engine::geometry::helpers::LABEL_FONT_FAMILY;
use pencil_engine::{Node, NodeId, SceneCommand, TextMetrics};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, SvgTextContentElement};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn create_svg_element(document: &Document, tag: &str) -> Result<Element, JsValue> {
    document.create_element_ns(Some(SVG_NS), tag)
}

fn clear_children(parent: &Element) {
    while let Some(child) = parent.first_child() {
        if let Err(e) = parent.remove_child(&child) {
            debug!("svg clear stopped early: {e:?}");
            break;
        }
    }
}

/// Applies scene commands to a live `<svg>` element.
pub struct SvgSurface {
    document: Document,
    root: Element,
    nodes: HashMap<NodeId, Element>,
}

impl SvgSurface {
    /// None when the element is not attached to a document.
    pub fn new(root: Element) -> Option<Self> {
        let document = root.owner_document()?;
        let _ = root.set_attribute("xmlns", SVG_NS);
        Some(Self {
            document,
            root,
            nodes: HashMap::new(),
        })
    }

    /// Width available to the drawing: the container's, falling back to the
    /// element's own.
    pub fn width(&self) -> f32 {
        let container = self
            .root
            .parent_element()
            .map(|p| p.client_width())
            .unwrap_or(0);
        let width = if container > 0 {
            container
        } else {
            self.root.client_width()
        };
        width.max(0) as f32
    }

    pub fn text_metrics(&self) -> SvgTextMeasure {
        SvgTextMeasure {
            document: self.document.clone(),
            root: self.root.clone(),
        }
    }

    pub fn apply(&mut self, command: &SceneCommand) -> Result<(), JsValue> {
        match command {
            SceneCommand::Clear => {
                clear_children(&self.root);
                self.nodes.clear();
            }
            SceneCommand::Resize { width, height } => {
                self.root.set_attribute("width", &width.to_string())?;
                self.root.set_attribute("height", &height.to_string())?;
            }
            SceneCommand::Attach(node) => {
                let el = self.build(node)?;
                self.root.append_child(&el)?;
            }
            SceneCommand::SetTransform { id, transform } => {
                self.set(*id, "transform", &transform.to_svg())?;
            }
            SceneCommand::SetStrokeDash { id, array, offset } => {
                self.set(*id, "stroke-dasharray", &array.to_string())?;
                self.set(*id, "stroke-dashoffset", &offset.to_string())?;
            }
            SceneCommand::SetFillOpacity { id, opacity } => {
                self.set(*id, "fill-opacity", &opacity.to_string())?;
            }
            SceneCommand::SetOpacity { id, opacity } => {
                self.set(*id, "opacity", &opacity.to_string())?;
            }
        }
        Ok(())
    }

    fn set(&self, id: NodeId, name: &str, value: &str) -> Result<(), JsValue> {
        match self.nodes.get(&id) {
            Some(el) => el.set_attribute(name, value),
            None => {
                debug!("no element for node {id:?}");
                Ok(())
            }
        }
    }

    fn build(&mut self, node: &Node) -> Result<Element, JsValue> {
        let el = create_svg_element(&self.document, node.tag())?;
        for (name, value) in node.attributes() {
            el.set_attribute(name, &value)?;
        }
        if let Some(text) = node.text_content() {
            el.set_text_content(Some(text));
        }
        for child in node.children() {
            let child_el = self.build(child)?;
            el.append_child(&child_el)?;
        }
        if let Some(id) = node.id {
            self.nodes.insert(id, el.clone());
        }
        Ok(el)
    }
}

/// Measures label text by laying out a throwaway `<text>` in the canvas.
pub struct SvgTextMeasure {
    document: Document,
    root: Element,
}

impl TextMetrics for SvgTextMeasure {
    fn text_length(&self, text: &str, font_size: f32) -> Option<f32> {
        let el = create_svg_element(&self.document, "text").ok()?;
        el.set_attribute("font-size", &font_size.to_string()).ok()?;
        el.set_attribute("font-family", LABEL_FONT_FAMILY).ok()?;
        el.set_attribute("visibility", "hidden").ok()?;
        el.set_text_content(Some(text));
        self.root.append_child(&el).ok()?;

        let length = el
            .dyn_ref::<SvgTextContentElement>()
            .map(|t| t.get_computed_text_length());
        let _ = self.root.remove_child(&el);

        // Zero means the text was not laid out (hidden container, no fonts).
        length.filter(|l| *l > 0.0)
    }
}
