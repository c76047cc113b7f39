use tracing::info;

use crate::assets::source::TextureSource;
use crate::assets::texture::TextureSet;
use crate::config::BackdropConfig;
use crate::foundation::error::BackdropResult;
use crate::session::backdrop::Backdrop;
use crate::session::page::PageDef;

/// Mount a backdrop on `page`.
///
/// Returns `Ok(None)` when the page has no surface element. Otherwise every anchor texture is
/// loaded (falling back to `page.fallback` when the gallery is empty or nothing loads), the
/// backdrop is built and the initial selection runs once. Anchors are only wired to the selector
/// when the page has some.
pub fn bootstrap(
    page: &PageDef,
    source: &dyn TextureSource,
    cfg: &BackdropConfig,
) -> BackdropResult<Option<Backdrop>> {
    if !page.has_surface() {
        info!(surface_id = %page.surface_id, "surface element not found, backdrop disabled");
        return Ok(None);
    }

    let textures = TextureSet::load(source, &page.hrefs(), &page.fallback)?;
    let mut backdrop = Backdrop::new(
        cfg,
        page.viewport,
        page.device_pixel_ratio,
        textures,
        page.anchor_rects(),
    )?;
    backdrop.select_initial();
    Ok(Some(backdrop))
}
