//! Path geometry: SVG path-data parsing, arc-length sampling, placement
//! transforms and the node builders the animation attaches.

pub mod helpers;
pub mod outline;
pub mod path_data;
pub mod transform;
