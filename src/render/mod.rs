//! Rendering-related modules
//! Contains mesh building and the presentation surface boundary.

pub mod mesh;
pub mod surface;

// Re-export commonly used types
pub use mesh::{add_box, add_quad, build_chunk_mesh, build_creature_model, build_water_quad};
pub use surface::{FrameView, HeadlessSurface, HealthBand, Hud, PresentationSurface, SurfaceStats};
