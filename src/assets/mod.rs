//! Texture loading: sources, decoding and the session texture set.

pub(crate) mod decode;
/// Byte sources for texture hrefs.
pub mod source;
/// Loaded textures and the load pass.
pub mod texture;
