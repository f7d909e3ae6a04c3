// geometry/transform.rs
//
// The two transforms the animation needs: letters are placed with
// translate + uniform scale, the pencil is posed with translate + rotate + scale.

use glam::Vec2;

/// Where a glyph's local outline lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Canvas position of the glyph's local origin.
    pub offset: Vec2,
    /// Uniform scale applied to local coordinates.
    pub scale: f32,
}

impl Placement {
    pub fn new(offset: Vec2, scale: f32) -> Self {
        Self { offset, scale }
    }

    /// Map a point in glyph space to canvas space.
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.offset + local * self.scale
    }

    pub fn to_svg(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Pose of the pencil marker: lead point at `position`, tilted by `angle`
/// degrees, drawn at `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PencilPose {
    pub position: Vec2,
    pub angle: f32,
    pub scale: f32,
}

impl PencilPose {
    pub fn new(position: Vec2, angle: f32, scale: f32) -> Self {
        Self { position, angle, scale }
    }

    pub fn to_svg(&self) -> String {
        format!(
            "translate({}, {}) rotate({}) scale({})",
            self.position.x, self.position.y, self.angle, self.scale
        )
    }
}

/// Any transform a scene node can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Place(Placement),
    Pose(PencilPose),
}

impl Transform {
    /// Render as an SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        match self {
            Transform::Place(p) => p.to_svg(),
            Transform::Pose(p) => p.to_svg(),
        }
    }
}

impl From<Placement> for Transform {
    fn from(p: Placement) -> Self {
        Transform::Place(p)
    }
}

impl From<PencilPose> for Transform {
    fn from(p: PencilPose) -> Self {
        Transform::Pose(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_scales_then_translates() {
        let p = Placement::new(Vec2::new(100.0, 50.0), 2.0);
        let out = p.apply(Vec2::new(3.0, -4.0));
        assert!((out.x - 106.0).abs() < 1e-5);
        assert!((out.y - 42.0).abs() < 1e-5);
    }

    #[test]
    fn svg_strings() {
        let place = Placement::new(Vec2::new(10.0, 20.5), 1.5);
        assert_eq!(place.to_svg(), "translate(10, 20.5) scale(1.5)");

        let pose = PencilPose::new(Vec2::new(-50.0, 50.0), 30.0, 0.5);
        assert_eq!(
            Transform::from(pose).to_svg(),
            "translate(-50, 50) rotate(30) scale(0.5)"
        );
    }
}
