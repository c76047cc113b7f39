/// Time-based alpha crossfade between gallery textures.
pub mod crossfade;
/// The four rotating sprites and their per-tick motion.
pub mod layers;
/// Scroll-driven choice of the gallery index.
pub mod selector;
/// Sprite geometry and its screen transform.
pub mod sprite;
