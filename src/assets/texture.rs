use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assets::decode::decode_texture_bytes;
use crate::assets::source::TextureSource;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Index of a texture inside a [`TextureSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(pub usize);

/// Loaded texture in premultiplied RGBA8 form.
#[derive(Debug)]
pub struct Texture {
    href: String,
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl Texture {
    /// Build a texture from already premultiplied pixels.
    pub fn from_premul_rgba8(
        href: impl Into<String>,
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> BackdropResult<Self> {
        let expected = crate::foundation::math::rgba8_len(width, height)
            .ok_or_else(|| BackdropError::asset("texture size overflow"))?;
        if width == 0 || height == 0 {
            return Err(BackdropError::asset("texture must be at least 1x1"));
        }
        if rgba8_premul.len() != expected {
            return Err(BackdropError::asset(
                "texture pixels must match width*height*4",
            ));
        }
        Ok(Self {
            href: href.into(),
            width,
            height,
            rgba8_premul,
        })
    }

    /// Fetch and decode `href` from `source`.
    pub fn load(source: &dyn TextureSource, href: &str) -> BackdropResult<Self> {
        let bytes = source.fetch(href)?;
        let img = decode_texture_bytes(href, &bytes)?;
        Self::from_premul_rgba8(href, img.width, img.height, img.rgba8_premul)
    }

    /// Href the texture was loaded from.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`, clamped to the edge.
    pub(crate) fn texel_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        [
            self.rgba8_premul[idx],
            self.rgba8_premul[idx + 1],
            self.rgba8_premul[idx + 2],
            self.rgba8_premul[idx + 3],
        ]
    }
}

/// Session-stable, non-empty list of textures.
///
/// Indices are assigned contiguously in document order over the textures that loaded; a failed
/// load does not leave a hole.
#[derive(Clone, Debug)]
pub struct TextureSet {
    textures: Vec<Arc<Texture>>,
    fallback_only: bool,
}

impl TextureSet {
    /// Wrap loaded textures. Fails when `textures` is empty.
    pub fn new(textures: Vec<Texture>) -> BackdropResult<Self> {
        if textures.is_empty() {
            return Err(BackdropError::asset("texture set must not be empty"));
        }
        Ok(Self {
            textures: textures.into_iter().map(Arc::new).collect(),
            fallback_only: false,
        })
    }

    /// Load every href in parallel, dropping the ones that fail.
    ///
    /// With no hrefs, or when every load fails, the fallback is loaded on the calling thread; only
    /// a failing fallback is an error.
    pub fn load(
        source: &dyn TextureSource,
        hrefs: &[String],
        fallback: &str,
    ) -> BackdropResult<Self> {
        if hrefs.is_empty() {
            debug!(fallback, "no gallery anchors, loading fallback texture only");
            return Self::load_fallback(source, fallback);
        }

        let results: Vec<BackdropResult<Texture>> = hrefs
            .par_iter()
            .map(|href| Texture::load(source, href))
            .collect();

        let mut loaded = Vec::with_capacity(results.len());
        for (href, res) in hrefs.iter().zip(results) {
            match res {
                Ok(tex) => loaded.push(tex),
                Err(err) => warn!(href = %href, error = %err, "texture failed to load, skipping"),
            }
        }

        if loaded.is_empty() {
            warn!(
                attempted = hrefs.len(),
                fallback, "no gallery textures loaded, falling back"
            );
            return Self::load_fallback(source, fallback);
        }

        info!(
            loaded = loaded.len(),
            attempted = hrefs.len(),
            "gallery textures loaded"
        );
        Self::new(loaded)
    }

    fn load_fallback(source: &dyn TextureSource, fallback: &str) -> BackdropResult<Self> {
        let tex = Texture::load(source, fallback).map_err(|e| {
            BackdropError::asset(format!("fallback texture '{fallback}' failed to load: {e}"))
        })?;
        let mut set = Self::new(vec![tex])?;
        set.fallback_only = true;
        Ok(set)
    }

    /// Number of textures; never zero.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture at `id`, if loaded.
    pub fn get(&self, id: TextureId) -> Option<&Arc<Texture>> {
        self.textures.get(id.0)
    }

    /// `true` when `id` refers to a loaded texture.
    pub fn contains(&self, id: TextureId) -> bool {
        id.0 < self.textures.len()
    }

    /// `true` when only the fallback texture could be used.
    pub fn is_fallback_only(&self) -> bool {
        self.fallback_only
    }

    /// Iterate textures in index order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &Arc<Texture>)> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (TextureId(i), t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
