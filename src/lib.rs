//! Backdrop renders a decorative, scroll-driven background for a photo gallery.
//!
//! Four textured sprites rotate and orbit at a capped update rate, a timed crossfade swaps their
//! texture when the gallery anchor nearest the viewport center changes, and a fixed CPU filter
//! chain (adjustment, twist, blur, saturation, tint) is applied to every frame.
//!
//! - Describe the page with a [`PageDef`] and tune it with a [`BackdropConfig`]
//! - Mount it with [`bootstrap`], which loads textures and returns a [`Backdrop`]
//! - Drive it with [`Host`], or call [`Backdrop::on_frame`] / [`Backdrop::on_scroll`] directly
#![forbid(unsafe_code)]

mod foundation;

/// Frame-rate capping, easing and throttling.
pub mod animation;
/// Texture sources, decoding and the loaded texture set.
pub mod assets;
/// Session configuration.
pub mod config;
/// CPU compositing and filters.
pub mod effects;
/// Render surface and frame output.
pub mod render;
/// Sprites, layer motion, crossfade and scroll selection.
pub mod scene;
/// The running backdrop and its host loop.
pub mod session;

pub use crate::foundation::core::{Affine, Point, Rect, Rgb8, Vec2, Viewport};
pub use crate::foundation::error::{BackdropError, BackdropResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::scheduler::FrameScheduler;
pub use crate::assets::source::{FsTextureSource, MemoryTextureSource, TextureSource};
pub use crate::assets::texture::{Texture, TextureId, TextureSet};
pub use crate::config::BackdropConfig;
pub use crate::render::frame::Frame;
pub use crate::render::surface::{PowerPreference, Surface};
pub use crate::scene::crossfade::{Crossfade, CrossfadeState, StartOutcome};
pub use crate::scene::layers::{LayerRole, LayerSet};
pub use crate::session::backdrop::Backdrop;
pub use crate::session::bootstrap::bootstrap;
pub use crate::session::host::Host;
pub use crate::session::page::PageDef;
