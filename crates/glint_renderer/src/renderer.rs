//! Progressive frame driver.
//!
//! Implements the per-frame loop:
//! - One jittered camera ray per pixel per frame
//! - Rows evaluated in parallel, each pixel blended in place
//! - Running average of gamma-corrected frames, reset on any state change

use std::sync::Arc;
use std::time::Instant;

use glint_core::{Color, Scene};
use glint_math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accumulator::Accumulator;
use crate::camera::Camera;
use crate::integrator::radiance;
use crate::rng::{FrameSeeds, PixelRng};

/// Errors from invalid render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be at least 1x1, got {width}x{height}")]
    ZeroViewport { width: u32, height: u32 },

    #[error("viewport {width}x{height} has too many pixels")]
    ViewportTooLarge { width: u32, height: u32 },

    #[error("{0} must be at least 1")]
    ZeroBounces(&'static str),

    #[error("background color {0} must be finite and non-negative")]
    InvalidBackground(Color),

    #[error("connection tolerance {0} must be finite and non-negative")]
    InvalidTolerance(f32),

    #[error("camera {0} must be finite")]
    InvalidCamera(&'static str),

    #[error("focal length {0} must be finite and positive")]
    InvalidFocalLength(f32),
}

/// Result type for configuration changes.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color multiplied into paths that escape the scene
    pub background: Color,
    /// Camera subpath depth
    pub max_bounces: u32,
    /// Light subpath depth, the last bounce being the shadow connection
    pub light_max_bounces: u32,
    /// Largest distance between a shadow ray's hit and its target that still
    /// counts as a connection
    pub connection_tolerance: f32,
    /// Seed for the per-frame random scalars; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::splat(0.01),
            max_bounces: 5,
            light_max_bounces: 5,
            connection_tolerance: 1e-16,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.background.is_finite() || self.background.min_element() < 0.0 {
            return Err(ConfigError::InvalidBackground(self.background));
        }
        if self.max_bounces == 0 {
            return Err(ConfigError::ZeroBounces("max_bounces"));
        }
        if self.light_max_bounces == 0 {
            return Err(ConfigError::ZeroBounces("light_max_bounces"));
        }
        if !self.connection_tolerance.is_finite() || self.connection_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.connection_tolerance));
        }
        Ok(())
    }
}

fn validate_viewport(width: u32, height: u32) -> ConfigResult<()> {
    if width == 0 || height == 0 {
        return Err(ConfigError::ZeroViewport { width, height });
    }
    if width.checked_mul(height).is_none() {
        return Err(ConfigError::ViewportTooLarge { width, height });
    }
    Ok(())
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert an already gamma-corrected color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let texels: Vec<[u8; 4]> = self.pixels.iter().map(|c| color_to_rgba(*c)).collect();
        bytemuck::cast_slice(&texels).to_vec()
    }
}

/// Everything a pixel evaluation reads, fixed for one frame.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub config: &'a RenderConfig,
    pub width: u32,
    pub height: u32,
    pub seeds: FrameSeeds,
}

/// Screen coordinate of a pixel's center, measured from the bottom-left.
#[inline]
pub fn pixel_center(x: u32, y: u32, height: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, (height - 1 - y) as f32 + 0.5)
}

/// Compute one radiance estimate for pixel (x, y), y counted from the top.
pub fn render_pixel(frame: &Frame, x: u32, y: u32) -> Color {
    let pixel = pixel_center(x, y, frame.height);
    let mut rng = PixelRng::new(pixel, frame.seeds);
    let ray = frame
        .camera
        .generate_ray(pixel, frame.seeds.jitter(), frame.width, frame.height);
    radiance(frame.scene, ray, frame.config, &mut rng)
}

/// Evaluate one image row and blend it into the displayed values in place.
fn render_row(frame: &Frame, accumulator: Accumulator, y: u32, row: &mut [Color]) {
    for (x, pixel) in row.iter_mut().enumerate() {
        let estimate = render_pixel(frame, x as u32, y);
        *pixel = accumulator.blend(estimate, *pixel);
    }
}

/// Progressive renderer: owns the scene snapshot, camera, configuration and
/// the displayed image that successive frames are averaged into.
pub struct Renderer {
    scene: Arc<Scene>,
    camera: Camera,
    config: RenderConfig,
    width: u32,
    height: u32,
    displayed: ImageBuffer,
    accumulator: Accumulator,
    rng: StdRng,
}

impl Renderer {
    /// Create a renderer with an empty scene and a default camera.
    pub fn new(config: RenderConfig, width: u32, height: u32) -> ConfigResult<Self> {
        config.validate()?;
        validate_viewport(width, height)?;

        let rng = Self::frame_rng(config.seed);
        log::info!(
            "Renderer created: {}x{}, {} bounces, background {}",
            width,
            height,
            config.max_bounces,
            config.background
        );

        Ok(Self {
            scene: Arc::new(Scene::empty()),
            camera: Camera::default(),
            config,
            width,
            height,
            displayed: ImageBuffer::new(width, height),
            accumulator: Accumulator::new(),
            rng,
        })
    }

    fn frame_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Replace the whole scene. The next frame sees only the new scene.
    pub fn reset_scene(&mut self, scene: impl Into<Arc<Scene>>) {
        self.scene = scene.into();
        log::info!(
            "Scene replaced: {} spheres, {} planes, {} lasers, {} emissive",
            self.scene.spheres().len(),
            self.scene.planes().len(),
            self.scene.lasers().len(),
            self.scene.emissive_count()
        );
        self.restart("scene changed");
    }

    /// Discard accumulated frames; the next frame starts a new average.
    pub fn reset_render_chain(&mut self) {
        self.restart("requested");
    }

    fn restart(&mut self, reason: &str) {
        if self.accumulator.frame_index() > 0 {
            log::debug!(
                "Render chain reset after {} frames ({})",
                self.accumulator.frame_index(),
                reason
            );
        }
        self.accumulator.reset();
    }

    /// Set the miss-ray color.
    pub fn set_background(&mut self, background: Color) -> ConfigResult<()> {
        self.set_config(RenderConfig {
            background,
            ..self.config.clone()
        })
    }

    /// Set the camera subpath depth.
    pub fn set_max_bounces(&mut self, max_bounces: u32) -> ConfigResult<()> {
        self.set_config(RenderConfig {
            max_bounces,
            ..self.config.clone()
        })
    }

    /// Set the light subpath depth.
    pub fn set_light_max_bounces(&mut self, light_max_bounces: u32) -> ConfigResult<()> {
        self.set_config(RenderConfig {
            light_max_bounces,
            ..self.config.clone()
        })
    }

    /// Replace the whole configuration. Invalid configurations leave the
    /// renderer untouched.
    pub fn set_config(&mut self, config: RenderConfig) -> ConfigResult<()> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.rng = Self::frame_rng(config.seed);
        }
        log::info!("Render config changed: {:?}", config);
        self.config = config;
        self.restart("config changed");
        Ok(())
    }

    /// Change the viewport size. The displayed image is discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> ConfigResult<()> {
        validate_viewport(width, height)?;
        self.width = width;
        self.height = height;
        self.displayed = ImageBuffer::new(width, height);
        log::info!("Resized to {}x{}", width, height);
        self.restart("resized");
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera.
    ///
    /// This does not reset the render chain: call `reset_render_chain` after
    /// moving the camera, or frames from different viewpoints get averaged.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Replace the camera and reset the render chain. An invalid camera
    /// leaves the renderer untouched.
    pub fn set_camera(&mut self, camera: Camera) -> ConfigResult<()> {
        camera.validate()?;
        self.camera = camera;
        self.restart("camera changed");
        Ok(())
    }

    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Index of the next frame to render; 0 right after a reset.
    pub fn frame_index(&self) -> u32 {
        self.accumulator.frame_index()
    }

    /// The image as currently displayed.
    pub fn displayed(&self) -> &ImageBuffer {
        &self.displayed
    }

    /// Render one frame and blend it into the displayed image.
    pub fn render_frame(&mut self) -> &ImageBuffer {
        let start = Instant::now();
        let seeds = FrameSeeds::draw(&mut self.rng);

        let frame = Frame {
            scene: &self.scene,
            camera: &self.camera,
            config: &self.config,
            width: self.width,
            height: self.height,
            seeds,
        };

        let accumulator = self.accumulator;
        self.displayed
            .pixels
            .par_chunks_mut(self.width as usize)
            .enumerate()
            .for_each(|(y, row)| render_row(&frame, accumulator, y as u32, row));

        log::debug!(
            "Frame {} rendered in {:?}",
            self.accumulator.frame_index(),
            start.elapsed()
        );
        self.accumulator.advance();

        &self.displayed
    }
}
