//! Thumbnail output: render, encode to PNG, wrap as data URL, write to disk.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gcodethumb_geometry::GeometryModel;
use gcodethumb_render::{
    render_model, ColorPolicy, FrameRenderer, PixmapSurface, RenderError, RenderOutcome,
    SurfaceError,
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix of every data URL produced by [`to_data_url`]
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn report(outcome: RenderOutcome) {
    match outcome {
        RenderOutcome::Rendered(stats) => debug!(
            "Thumbnail rendered: {} drawn, {} suppressed, {} unknown",
            stats.drawn, stats.suppressed, stats.unknown
        ),
        RenderOutcome::NoColorPolicy => warn!("No color policy, thumbnail left blank"),
        RenderOutcome::DegenerateGeometry => {
            warn!("Toolpath has no X/Y extent, thumbnail left blank")
        }
    }
}

/// Render toolpath text onto a new `width` x `height` surface.
///
/// Without colors or with flat geometry the surface stays transparent.
pub fn render_thumbnail(
    toolpath: &str,
    colors: Option<&ColorPolicy>,
    width: u32,
    height: u32,
) -> Result<PixmapSurface, ThumbnailError> {
    let mut surface = PixmapSurface::new(width, height)?;
    let outcome = FrameRenderer::new().render(toolpath, colors, &mut surface)?;
    report(outcome);
    Ok(surface)
}

/// Render an already extracted model onto a new surface
pub fn render_geometry_thumbnail(
    model: &GeometryModel,
    colors: Option<&ColorPolicy>,
    width: u32,
    height: u32,
) -> Result<PixmapSurface, ThumbnailError> {
    let mut surface = PixmapSurface::new(width, height)?;
    report(render_model(model, colors, &mut surface));
    Ok(surface)
}

/// Encode the surface as PNG bytes
pub fn encode_png(surface: &PixmapSurface) -> Result<Vec<u8>, ThumbnailError> {
    let pixmap = surface.pixmap();
    let img = RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let c = surface
            .pixel(x, y)
            .unwrap_or(gcodethumb_render::Color::TRANSPARENT);
        Rgba([c.r, c.g, c.b, c.a])
    });

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// `data:image/png;base64,...` URL of the surface
pub fn to_data_url(surface: &PixmapSurface) -> Result<String, ThumbnailError> {
    let png = encode_png(surface)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}

/// Render and return the data URL in one step
pub fn thumbnail_data_url(
    toolpath: &str,
    colors: Option<&ColorPolicy>,
    width: u32,
    height: u32,
) -> Result<String, ThumbnailError> {
    to_data_url(&render_thumbnail(toolpath, colors, width, height)?)
}

/// Write the surface to `path` as PNG
pub fn write_png(path: impl AsRef<Path>, surface: &PixmapSurface) -> Result<(), ThumbnailError> {
    let png = encode_png(surface)?;
    std::fs::write(path.as_ref(), png)?;
    debug!("Wrote thumbnail to {}", path.as_ref().display());
    Ok(())
}

/// Async variant of [`write_png`]
pub async fn write_png_async(
    path: impl AsRef<Path>,
    surface: &PixmapSurface,
) -> Result<(), ThumbnailError> {
    let png = encode_png(surface)?;
    tokio::fs::write(path.as_ref(), png).await?;
    debug!("Wrote thumbnail to {}", path.as_ref().display());
    Ok(())
}

/// Render toolpath text and write it to `path` as PNG
pub fn generate_png(
    path: impl AsRef<Path>,
    toolpath: &str,
    colors: Option<&ColorPolicy>,
    width: u32,
    height: u32,
) -> Result<(), ThumbnailError> {
    let surface = render_thumbnail(toolpath, colors, width, height)?;
    write_png(path, &surface)
}

/// Render toolpath text, then write the PNG without blocking the runtime
pub async fn generate_png_async(
    path: impl AsRef<Path>,
    toolpath: &str,
    colors: Option<&ColorPolicy>,
    width: u32,
    height: u32,
) -> Result<(), ThumbnailError> {
    let surface = render_thumbnail(toolpath, colors, width, height)?;
    write_png_async(path, &surface).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcodethumb_render::{Category, Color};

    fn black() -> ColorPolicy {
        ColorPolicy::new()
            .with(Category::G1, Color::BLACK)
            .with(Category::G2G3, Color::BLACK)
    }

    #[test]
    fn test_png_signature() {
        let surface = render_thumbnail("G1 X1 Y1\n", Some(&black()), 16, 16).unwrap();
        let png = encode_png(&surface).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_data_url_prefix() {
        let url = thumbnail_data_url("G1 X1 Y1\n", Some(&black()), 8, 8).unwrap();
        assert!(url.starts_with(DATA_URL_PREFIX));
        assert!(url.len() > DATA_URL_PREFIX.len());
    }

    #[test]
    fn test_zero_size_is_surface_error() {
        let err = render_thumbnail("G1 X1\n", Some(&black()), 0, 8).unwrap_err();
        assert!(matches!(err, ThumbnailError::Surface(_)));
    }

    #[test]
    fn test_parse_error_is_render_error() {
        let err = render_thumbnail("G2 X1\n", Some(&black()), 8, 8).unwrap_err();
        assert!(matches!(err, ThumbnailError::Render(_)));
        assert!(err.to_string().contains("line 1"));
    }
}
