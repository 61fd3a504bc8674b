//! Glint Renderer - progressive CPU path tracing
//!
//! Renders analytic scenes one jittered sample per pixel per frame and
//! averages frames into a converging image:
//!
//! - `rng`: per-pixel, per-frame deterministic random stream
//! - `camera`: ray generation with sub-pixel jitter
//! - `intersect`: nearest hit plus reservoir-sampled emissive primitive
//! - `scatter`: diffuse/mirror/dielectric direction mixture
//! - `integrator`: camera subpath, light subpath and their combination
//! - `accumulator`: running average of gamma-corrected frames
//! - `renderer`: the frame driver tying it together

mod accumulator;
mod camera;
mod integrator;
mod intersect;
mod renderer;
mod rng;
mod scatter;

pub use accumulator::{blend, linear_to_gamma, Accumulator};
pub use camera::Camera;
pub use integrator::{
    radiance, trace_camera_path, trace_light_path, CameraPath, Termination, RELATIVE_IOR,
};
pub use intersect::{
    hit_infinite_plane, hit_laser, hit_plane, hit_sphere, intersect, Hit, Intersection,
    LightReservoir, LightSample, EPSILON, MAX_DISTANCE,
};
pub use renderer::{
    color_to_rgba, pixel_center, render_pixel, ConfigError, ConfigResult, Frame, ImageBuffer,
    RenderConfig, Renderer,
};
pub use rng::{FrameSeeds, PixelRng};
pub use scatter::{reflect, reflectance, refract, scatter};

/// Re-export the scene and math types the API is expressed in
pub use glint_core::{Color, Laser, Material, Plane, Primitive, Scene, SceneError, Sphere};
pub use glint_math::{Ray, Vec2, Vec3};
