use std::path::Path;

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::error::{BackdropError, BackdropResult};

/// A rendered RGBA8 frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl Frame {
    /// Convert to straight alpha in place; no-op if already straight.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }

    /// Straight-alpha `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> BackdropResult<image::RgbaImage> {
        let straight = self.clone().into_straight();
        image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
            .ok_or_else(|| BackdropError::render("frame buffer does not match its dimensions"))
    }

    /// Write as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> BackdropResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BackdropError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| BackdropError::render(format!("write png '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
