//! CPU pixel operations on premultiplied RGBA8 buffers.
//!
//! Sprites are drawn with [`composite::draw_sprite`]; the fixed post-processing chain lives in
//! [`stack::FilterStack`].

/// Separable Gaussian blur passes.
pub mod blur;
/// 4x5 color matrices applied in straight alpha.
pub mod color;
/// Premultiplied `over` and textured-quad drawing.
pub mod composite;
/// The fixed, ordered filter chain.
pub mod stack;
/// Radial twist distortion.
pub mod twist;
