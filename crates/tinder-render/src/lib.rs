//! Tinder Render - turns simulation state into pixels
//!
//! - `SceneRenderer` builds a back-to-front display list (`Frame`) from a
//!   platformer or runner without touching simulation state
//! - `SpritePool` maps runner arena entities to recyclable sprite handles
//! - `rasterize` fills a `Frame` into an `image::RgbaImage` on the CPU, used
//!   for the window texture and for PNG screenshots
//! - `RenderContext` owns the wgpu device and window surface

mod context;
mod frame;
mod raster;
mod scene;
mod sprites;

pub use context::RenderContext;
pub use frame::{DrawCommand, DrawItem, Frame, Layer};
pub use raster::{rasterize, rasterize_into, save_png};
pub use scene::SceneRenderer;
pub use sprites::{SpriteHandle, SpritePool};
