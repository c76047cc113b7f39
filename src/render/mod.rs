//! CPU render target and frame output.

/// Rendered frame buffer and PNG export.
pub mod frame;
/// Reduced-resolution raster surface.
pub mod surface;
