use anyhow::Context;
use clap::{ArgAction, Parser};
use gcodethumb::{
    init_logging, render_geometry_thumbnail, render_thumbnail, to_data_url, write_png_async,
    Category, Color, ColorPolicy, GeometryModel, ThumbnailConfig,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Render a G-code toolpath into a PNG thumbnail
#[derive(Parser, Debug)]
#[command(name = "gcodethumb", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// G-code file to render, or `-` for stdin
    input: PathBuf,

    /// Output PNG path (defaults to the input path with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Thumbnail width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Thumbnail height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Color for rapid (G0) moves
    #[arg(long, value_name = "COLOR")]
    g0: Option<Color>,

    /// Color for linear (G1) moves
    #[arg(long, value_name = "COLOR")]
    g1: Option<Color>,

    /// Color for arcs (G2/G3)
    #[arg(long, value_name = "COLOR")]
    g2g3: Option<Color>,

    /// Do not draw a category (G0, G1 or G2G3); may be repeated
    #[arg(long, value_name = "CATEGORY")]
    hide: Vec<Category>,

    /// Config file (.toml or .json); defaults to the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a data:image/png;base64 URL instead of writing a file
    #[arg(long)]
    data_url: bool,

    /// Input is a JSON geometry model instead of G-code
    #[arg(long)]
    geometry: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<ThumbnailConfig> {
        let mut config = match &self.config {
            Some(path) => ThumbnailConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => match ThumbnailConfig::default_path() {
                Some(path) => ThumbnailConfig::load_or_default(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ThumbnailConfig::default(),
            },
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut ThumbnailConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.colors.merge(&ColorPolicy {
            g0: self.g0,
            g1: self.g1,
            g2g3: self.g2g3,
        });
        for &category in &self.hide {
            config.colors.set(category, None);
        }
    }

    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None if self.input == Path::new("-") => PathBuf::from("thumbnail.png"),
            None => self.input.with_extension("png"),
        }
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read toolpath from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let config = cli.load_config()?;
    let text = read_input(&cli.input)?;
    info!(
        "Rendering {} at {}x{}",
        cli.input.display(),
        config.width,
        config.height
    );

    let surface = if cli.geometry {
        let model = GeometryModel::from_json(&text).context("Failed to read geometry JSON")?;
        render_geometry_thumbnail(&model, Some(&config.colors), config.width, config.height)?
    } else {
        render_thumbnail(&text, Some(&config.colors), config.width, config.height)
            .with_context(|| format!("Failed to render {}", cli.input.display()))?
    };

    if cli.data_url {
        println!("{}", to_data_url(&surface)?);
        return Ok(());
    }

    let output = cli.output_path();
    write_png_async(&output, &surface)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}
