use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::outline::{Outline, FLATTEN_TOLERANCE};
use crate::geometry::path_data::{parse_path_data, PathDataError};

/// Glyph manifest describing the drawable letters.
/// Loaded from a JSON file at runtime: `{ "glyphs": { "S": "M…" } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphManifest {
    /// Character → SVG path data.
    #[serde(default)]
    pub glyphs: HashMap<String, String>,
}

impl GlyphManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid glyph manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glyph key {0:?} must be exactly one character")]
    InvalidKey(String),
}

/// One drawable character: its source path data and measured outline.
#[derive(Debug)]
pub struct GlyphPath {
    ch: char,
    source: String,
    outline: Outline,
}

impl GlyphPath {
    /// Parse and measure path data for `ch`.
    pub fn parse(ch: char, source: &str) -> Result<Self, PathDataError> {
        let path = parse_path_data(source)?;
        Ok(Self {
            ch,
            source: source.to_string(),
            outline: Outline::from_path(path, FLATTEN_TOLERANCE),
        })
    }

    /// A glyph whose data could not be parsed. Keeps the source for
    /// rendering but measures as zero length.
    fn unmeasurable(ch: char, source: &str) -> Self {
        Self {
            ch,
            source: source.to_string(),
            outline: Outline::empty(),
        }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    /// The `d` attribute as loaded.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Total stroke length in glyph units.
    pub fn length(&self) -> f32 {
        self.outline.total_length()
    }
}

/// Read-only character → glyph lookup, injected into the animation.
/// Absent characters are valid and simply have no drawable path.
#[derive(Debug, Clone, Default)]
pub struct GlyphRegistry {
    glyphs: HashMap<char, Arc<GlyphPath>>,
}

impl GlyphRegistry {
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    /// Build a registry from manifest JSON.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let manifest = GlyphManifest::from_json(json)?;
        Self::from_manifest(&manifest)
    }

    /// Build a registry from a parsed manifest.
    pub fn from_manifest(manifest: &GlyphManifest) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (key, source) in &manifest.glyphs {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => registry.insert(ch, source),
                _ => return Err(RegistryError::InvalidKey(key.clone())),
            }
        }
        Ok(registry)
    }

    /// Add or replace a glyph. Unparsable data is kept as a zero-length
    /// glyph so the animation skips it instead of failing the whole load.
    /// Blank data means "no glyph": the character is left out entirely.
    pub fn insert(&mut self, ch: char, source: &str) {
        if source.trim().is_empty() {
            debug!("glyph {ch:?}: blank path data, treated as missing");
            self.glyphs.remove(&ch);
            return;
        }
        let glyph = match GlyphPath::parse(ch, source) {
            Ok(glyph) => glyph,
            Err(e) => {
                warn!("glyph {ch:?}: unparsable path data ({e}), it will not be drawn");
                GlyphPath::unmeasurable(ch, source)
            }
        };
        self.glyphs.insert(ch, Arc::new(glyph));
    }

    /// Look up a glyph. Returns None if the character has no path.
    pub fn get(&self, ch: char) -> Option<&Arc<GlyphPath>> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(char, S)> for GlyphRegistry {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (ch, source) in iter {
            registry.insert(ch, source.as_ref());
        }
        registry
    }
}
