//! # gcodethumb
//!
//! Renders G-code toolpaths into small raster thumbnails.
//!
//! ## Architecture
//!
//! gcodethumb is organized as a workspace with multiple crates:
//!
//! 1. **gcodethumb-core** - Points, bounding boxes, units, G-code errors
//! 2. **gcodethumb-geometry** - G-code parsing into segments and bezier arcs
//! 3. **gcodethumb-render** - Fit-to-canvas scaling, color policy, surfaces
//! 4. **gcodethumb-settings** - Thumbnail size and colors from TOML/JSON
//! 5. **gcodethumb** - PNG / data URL output and the command line tool
//!
//! ## Example
//!
//! ```no_run
//! use gcodethumb::{render_thumbnail, to_data_url, ThumbnailConfig};
//!
//! let config = ThumbnailConfig::default();
//! let surface = render_thumbnail("G1 X2\nG1 X1 Y1.7\nG1 X0 Y0\n", Some(&config.colors), 250, 200)?;
//! println!("{}", to_data_url(&surface)?);
//! # Ok::<(), gcodethumb::ThumbnailError>(())
//! ```

pub mod thumbnail;

pub use gcodethumb_core::{BoundingBox, GcodeError, Point, Units};
pub use gcodethumb_geometry::{GeometryModel, GeometrySource, Segment, ToolpathParser};
pub use gcodethumb_render::{
    Category, Color, ColorPolicy, DrawingSurface, FrameRenderer, PixmapSurface, RenderOutcome,
    RenderStats,
};
pub use gcodethumb_settings::{SettingsError, ThumbnailConfig};
pub use thumbnail::{
    encode_png, generate_png, generate_png_async, render_geometry_thumbnail, render_thumbnail,
    thumbnail_data_url, to_data_url, write_png, write_png_async, ThumbnailError,
    DATA_URL_PREFIX,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so stdout stays free for data URLs.
/// - `RUST_LOG` overrides the level picked from `verbosity`
///   (0 = warn, 1 = info, 2 = debug, 3+ = trace)
/// - `json` switches to one JSON object per line
pub fn init_logging(verbosity: u8, json: bool) -> anyhow::Result<()> {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
