//! JSON scene descriptions.
//!
//! A description bundles everything the viewer needs to set up a render:
//! the camera, the miss-ray background, an optional bounce budget and the
//! primitive list. Vectors are written as `[x, y, z]` arrays.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 1, 2], "rotation": [-35, 0, 0] },
//!   "background": [0.5, 0.7, 1.0],
//!   "primitives": [
//!     { "type": "sphere", "center": [0, 0, 0], "radius": 0.5,
//!       "material": { "color": [0.7, 0.5, 0.5], "refraction": 1.0 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glint_core::{Color, Primitive, Scene};
use glint_renderer::{Camera, RenderConfig};
use serde::{Deserialize, Serialize};

/// Miss-ray color used when a description does not set one.
const DEFAULT_BACKGROUND: Color = Color::splat(0.01);

fn default_background() -> Color {
    DEFAULT_BACKGROUND
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub max_bounces: Option<u32>,
    pub primitives: Vec<Primitive>,
}

impl SceneDescription {
    pub fn new(camera: Camera, background: Color, primitives: Vec<Primitive>) -> Self {
        Self {
            camera,
            background,
            max_bounces: None,
            primitives,
        }
    }

    /// Read a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let description = Self::from_json(&text)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))?;

        log::info!(
            "Loaded {} primitives from {}",
            description.primitives.len(),
            path.display()
        );
        Ok(description)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let description: Self = serde_json::from_str(text)?;
        description.camera.validate().context("Invalid camera")?;
        Ok(description)
    }

    /// Validate the primitives into a renderable scene.
    pub fn build_scene(&self) -> Result<Scene> {
        Scene::new(self.primitives.iter().copied()).context("Invalid scene description")
    }

    /// Render settings: `base` with this description's overrides applied.
    pub fn render_config(&self, base: RenderConfig) -> RenderConfig {
        RenderConfig {
            background: self.background,
            max_bounces: self.max_bounces.unwrap_or(base.max_bounces),
            ..base
        }
    }
}
