//! Renderer-neutral scene description.
//!
//! The engine never talks to a concrete drawing API. It builds [`Node`] trees
//! and emits [`SceneCommand`]s; an adapter owned by the embedding UI (the SVG
//! DOM in `pencil-web`, a recording buffer in tests) applies them.

mod command;
mod node;

pub use command::SceneCommand;
pub use node::{Node, Shape, Style, TextAnchor};
