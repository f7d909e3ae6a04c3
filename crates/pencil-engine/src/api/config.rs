use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Horizontal advance per width category, in unscaled canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingTable {
    pub narrow: f32,
    pub standard: f32,
    pub wide: f32,
    pub space: f32,
}

impl Default for SpacingTable {
    fn default() -> Self {
        Self {
            narrow: 18.0,
            standard: 30.0,
            wide: 40.0,
            space: 25.0,
        }
    }
}

/// Where things go on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Baseline of the greeting label.
    pub greeting_y: f32,
    /// Baseline of the written name.
    pub name_y: f32,
    pub greeting_font_size: f32,
    pub canvas_height: f32,
    /// Where the pencil waits before the first letter (off-canvas).
    pub pencil_start_x: f32,
    /// Pause before anything is drawn so surrounding layout can settle.
    pub startup_delay_ms: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            greeting_y: 70.0,
            name_y: 50.0,
            greeting_font_size: 34.0,
            canvas_height: 400.0,
            pencil_start_x: -50.0,
            startup_delay_ms: 300.0,
        }
    }
}

/// Optional flourish drawn after the last letter, followed by a sparkle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureConfig {
    pub duration_ms: f32,
    /// Delay between completion and the sparkle appearing.
    pub sparkle_delay_ms: f32,
    pub sparkle_fade_ms: f32,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            duration_ms: 400.0,
            sparkle_delay_ms: 300.0,
            sparkle_fade_ms: 333.0,
        }
    }
}

/// How pencil positions are mapped from glyph space onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PencilTracking {
    /// Through the letter's own placement, so the tip sits on the drawn
    /// stroke.
    #[default]
    Glyph,
    /// Glyph point scaled by `scale_factor` alone, ignoring `letter_scale`.
    ScaleFactor,
}

/// Configuration for one name-writing run. Every field has a default and
/// may be overridden from JSON with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Global scale applied to cursor advances and letters.
    pub scale_factor: f32,
    /// Reveal time per letter, in milliseconds.
    pub animation_duration: f32,
    /// Pause after each letter, in milliseconds.
    pub letter_pause: f32,
    pub pencil_scale: f32,
    /// Pencil tilt in degrees.
    pub pencil_angle: f32,
    pub spacing: SpacingTable,
    /// Extra scale applied to letter outlines on top of `scale_factor`.
    pub letter_scale: f32,
    pub pencil_tracking: PencilTracking,
    pub layout: LayoutConfig,
    /// Signature flourish. Off unless configured.
    pub signature: Option<SignatureConfig>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            animation_duration: 300.0,
            letter_pause: 50.0,
            pencil_scale: 0.5,
            pencil_angle: 30.0,
            spacing: SpacingTable::default(),
            letter_scale: 1.08,
            pencil_tracking: PencilTracking::Glyph,
            layout: LayoutConfig::default(),
            signature: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid animation config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be a finite, positive number (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

impl AnimationConfig {
    /// Parse and validate a config from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the animation relies on. Spacing must be
    /// non-negative so the cursor never moves backwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("scaleFactor", self.scale_factor)?;
        positive("letterScale", self.letter_scale)?;
        positive("pencilScale", self.pencil_scale)?;
        finite("pencilAngle", self.pencil_angle)?;
        non_negative("animationDuration", self.animation_duration)?;
        non_negative("letterPause", self.letter_pause)?;

        non_negative("spacing.narrow", self.spacing.narrow)?;
        non_negative("spacing.standard", self.spacing.standard)?;
        non_negative("spacing.wide", self.spacing.wide)?;
        non_negative("spacing.space", self.spacing.space)?;

        let layout = &self.layout;
        finite("layout.greetingY", layout.greeting_y)?;
        finite("layout.nameY", layout.name_y)?;
        finite("layout.pencilStartX", layout.pencil_start_x)?;
        positive("layout.greetingFontSize", layout.greeting_font_size)?;
        non_negative("layout.canvasHeight", layout.canvas_height)?;
        non_negative("layout.startupDelayMs", layout.startup_delay_ms)?;

        if let Some(sig) = &self.signature {
            non_negative("signature.durationMs", sig.duration_ms)?;
            non_negative("signature.sparkleDelayMs", sig.sparkle_delay_ms)?;
            non_negative("signature.sparkleFadeMs", sig.sparkle_fade_ms)?;
        }

        Ok(())
    }

    /// Scale the letter outlines are drawn at.
    #[inline]
    pub fn glyph_scale(&self) -> f32 {
        self.scale_factor * self.letter_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = AnimationConfig::default();
        assert_eq!(c.scale_factor, 1.0);
        assert_eq!(c.animation_duration, 300.0);
        assert_eq!(c.letter_pause, 50.0);
        assert_eq!(c.pencil_scale, 0.5);
        assert_eq!(c.pencil_angle, 30.0);
        assert_eq!(c.spacing, SpacingTable { narrow: 18.0, standard: 30.0, wide: 40.0, space: 25.0 });
        assert!(c.signature.is_none());
        assert_eq!(c.pencil_tracking, PencilTracking::Glyph);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = AnimationConfig::from_json(
            r#"{ "animationDuration": 500, "spacing": { "wide": 44 }, "pencilTracking": "scaleFactor" }"#,
        )
        .unwrap();
        assert_eq!(c.animation_duration, 500.0);
        assert_eq!(c.letter_pause, 50.0);
        assert_eq!(c.spacing.wide, 44.0);
        assert_eq!(c.spacing.standard, 30.0);
        assert_eq!(c.pencil_tracking, PencilTracking::ScaleFactor);
    }

    #[test]
    fn signature_enables_with_defaults() {
        let c = AnimationConfig::from_json(r#"{ "signature": {} }"#).unwrap();
        assert_eq!(c.signature, Some(SignatureConfig::default()));
    }

    #[test]
    fn rejects_negative_spacing() {
        let err = AnimationConfig::from_json(r#"{ "spacing": { "narrow": -1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "spacing.narrow", .. }));
    }

    #[test]
    fn rejects_zero_scale() {
        let c = AnimationConfig { scale_factor: 0.0, ..Default::default() };
        assert!(matches!(c.validate(), Err(ConfigError::NotPositive { field: "scaleFactor", .. })));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(AnimationConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn glyph_scale_combines_factors() {
        let c = AnimationConfig { scale_factor: 2.0, ..Default::default() };
        assert!((c.glyph_scale() - 2.16).abs() < 1e-6);
    }
}
