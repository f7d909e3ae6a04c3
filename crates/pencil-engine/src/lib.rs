pub mod api;
pub mod assets;
pub mod core;
pub mod geometry;
pub mod scene;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    AnimationConfig, ConfigError, LayoutConfig, PencilTracking, SignatureConfig, SpacingTable,
};
pub use api::context::AnimationContext;
pub use api::types::{AnimationEvent, NodeId, NodeIds};
pub use assets::registry::{GlyphManifest, GlyphPath, GlyphRegistry, RegistryError};
pub use core::cancel::CancelToken;
pub use core::time::{Delay, Stopwatch};
pub use geometry::helpers::{
    label, letter_node, pencil_marker, Alignment, EstimatedMetrics, Label, LetterNode,
    PencilMarker, TextMetrics,
};
pub use geometry::outline::{Outline, SampleError};
pub use geometry::path_data::{parse_path_data, PathDataError};
pub use geometry::transform::{PencilPose, Placement, Transform};
pub use scene::{Node, SceneCommand, Shape, Style, TextAnchor};
pub use systems::letter::LetterReveal;
pub use systems::pencil::Pencil;
pub use systems::sequence::{Phase, SequenceController, SequenceError};
