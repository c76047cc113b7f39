use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{BackdropError, BackdropResult};

/// Headless stand-in for the host page: which elements exist, where the gallery anchors sit, and a
/// scripted scroll timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDef {
    /// Identifier of the drawing surface element the bootstrap looks for.
    pub surface_id: String,
    /// Identifiers of the elements present on the page.
    #[serde(default)]
    pub element_ids: Vec<String>,
    pub viewport: Viewport,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    /// Image used when the gallery is empty or nothing in it loads.
    pub fallback: String,
    /// Gallery anchors in document order.
    #[serde(default)]
    pub anchors: Vec<AnchorDef>,
    #[serde(default)]
    pub scroll: Vec<ScrollEventDef>,
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

/// One gallery link: the image it points at and its box in document coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorDef {
    pub href: String,
    pub rect: RectDef,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectDef {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectDef {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Window scroll offset reached at `at_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollEventDef {
    pub at_ms: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl PageDef {
    /// Parse and validate a page from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> BackdropResult<Self> {
        let page: Self = serde_json::from_reader(r)
            .map_err(|e| BackdropError::serde(format!("parse page JSON: {e}")))?;
        page.validate()?;
        Ok(page)
    }

    /// Parse and validate a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BackdropResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BackdropError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> BackdropResult<()> {
        self.viewport.validate()?;
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(BackdropError::validation("device_pixel_ratio must be > 0"));
        }
        if self.fallback.trim().is_empty() {
            return Err(BackdropError::validation("fallback image path must be non-empty"));
        }
        for (i, a) in self.anchors.iter().enumerate() {
            let r = a.rect;
            let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
            if !finite || r.width < 0.0 || r.height < 0.0 {
                return Err(BackdropError::validation(format!(
                    "anchors[{i}].rect must be finite with non-negative size"
                )));
            }
        }
        for (i, ev) in self.scroll.iter().enumerate() {
            if !ev.at_ms.is_finite() || ev.at_ms < 0.0 || !ev.x.is_finite() || !ev.y.is_finite() {
                return Err(BackdropError::validation(format!(
                    "scroll[{i}] must have finite at_ms >= 0 and finite offsets"
                )));
            }
        }
        Ok(())
    }

    /// Whether the surface element is present.
    pub fn has_surface(&self) -> bool {
        self.element_ids.iter().any(|id| id == &self.surface_id)
    }

    /// Anchor hrefs in document order.
    pub fn hrefs(&self) -> Vec<String> {
        self.anchors.iter().map(|a| a.href.clone()).collect()
    }

    /// Anchor boxes in document coordinates.
    pub fn anchor_rects(&self) -> Vec<Rect> {
        self.anchors.iter().map(|a| a.rect.to_rect()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page.rs"]
mod tests;
