//! Arc-length parameterised outline.
//!
//! A glyph path is measured once with lyon's `PathMeasurements`, so the
//! animation can ask for the total length and for the point at any distance
//! along the stroke, the way a browser answers `getTotalLength()` /
//! `getPointAtLength()`. Gaps between subpaths do not count towards the
//! length; a closed subpath includes its closing edge.

use std::fmt;

use glam::Vec2;
use lyon::algorithms::measure::{PathMeasurements, SampleType};
use lyon::path::Path;
use thiserror::Error;

/// Flattening tolerance in glyph units.
pub const FLATTEN_TOLERANCE: f32 = 0.01;

/// Why a point could not be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("outline has no drawable segments")]
    Empty,
    #[error("sample distance {0} is not finite")]
    NonFiniteDistance(f32),
}

/// A path together with its cached arc-length measurements.
pub struct Outline {
    path: Path,
    measurements: PathMeasurements,
}

impl Outline {
    pub fn from_path(path: Path, tolerance: f32) -> Self {
        let measurements = PathMeasurements::from_path(&path, tolerance);
        Self { path, measurements }
    }

    /// Nothing to draw and no position.
    pub fn empty() -> Self {
        Self {
            path: Path::new(),
            measurements: PathMeasurements::empty(),
        }
    }

    /// Total stroke length.
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.measurements.length()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total_length() <= 0.0
    }

    /// Point at `distance` along the outline. Distances outside
    /// `[0, total_length]` are clamped to the ends. A bare moveto samples
    /// as its own position.
    pub fn point_at_length(&self, distance: f32) -> Result<Vec2, SampleError> {
        if !distance.is_finite() {
            return Err(SampleError::NonFiniteDistance(distance));
        }

        // The sampler's zero-distance shortcut can land on a moveto; stay
        // just past it so the lookup always resolves to a drawn segment.
        let distance = distance.max(f32::MIN_POSITIVE);
        let mut sampler = self
            .measurements
            .create_sampler(&self.path, SampleType::Distance);
        let p = sampler.sample(distance).position();

        if p.x.is_finite() && p.y.is_finite() {
            Ok(Vec2::new(p.x, p.y))
        } else {
            Err(SampleError::Empty)
        }
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outline")
            .field("length", &self.total_length())
            .finish_non_exhaustive()
    }
}
