//! Headless progressive viewer.
//!
//! ```text
//! glint_viewer <scene.json | kernel_box | basic | refraction> [frames] [output.png]
//! ```
//!
//! Renders the requested number of progressive frames and writes the
//! displayed image to a PNG.

mod demos;
mod description;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use glint_renderer::{RenderConfig, Renderer};

use description::SceneDescription;

const DEFAULT_FRAMES: u32 = 64;
const DEFAULT_OUTPUT: &str = "glint.png";
const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

struct Args {
    scene: String,
    frames: u32,
    output: PathBuf,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let Some(scene) = args.next() else {
            bail!(
                "usage: glint_viewer <scene.json | {}> [frames] [output.png]",
                demos::DEMO_NAMES.join(" | ")
            );
        };

        let frames = match args.next() {
            Some(frames) => frames
                .parse()
                .with_context(|| format!("Invalid frame count '{}'", frames))?,
            None => DEFAULT_FRAMES,
        };
        let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()).into();

        Ok(Self {
            scene,
            frames,
            output,
        })
    }
}

fn load_description(scene: &str) -> Result<SceneDescription> {
    match demos::by_name(scene) {
        Some(description) => {
            log::info!("Using built-in scene '{}'", scene);
            Ok(description)
        }
        None => SceneDescription::load(scene),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse()?;
    log::info!("Starting Glint Viewer");

    let description = load_description(&args.scene)?;
    let config = description.render_config(RenderConfig::default());

    let mut renderer = Renderer::new(config, WIDTH, HEIGHT)?;
    renderer.set_camera(description.camera)?;
    renderer.reset_scene(description.build_scene()?);

    let start = Instant::now();
    for _ in 0..args.frames {
        renderer.render_frame();
    }
    log::info!(
        "Rendered {} frames in {:.2}s",
        renderer.frame_index(),
        start.elapsed().as_secs_f32()
    );

    let image = renderer.displayed();
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Image buffer size does not match its dimensions")?;
    rgba.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Saved {}", args.output.display());
    Ok(())
}
