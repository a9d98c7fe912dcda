use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use opentowork_badge::{
    BadgeConfig, BadgeOverrides, BadgeRenderer, Preset, encode_png, load_photo, rasterize,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// HTML fragment for a page that includes the badge stylesheet.
    Html,
    /// Standalone SVG document.
    Svg,
    /// PNG image.
    Png,
    /// Computed curve and styles as JSON.
    Layout,
}

/// otw-badge: render a circular profile-photo badge with curved text
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON badge configuration
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Photo URL, required when no configuration file is given
    #[clap(long)]
    image_src: Option<String>,

    /// Alternative text for the photo
    #[clap(long)]
    image_alt: Option<String>,

    /// Theme applied on top of the configuration
    #[clap(short, long, value_enum, default_value = "default")]
    preset: Preset,

    /// Badge diameter in pixels
    #[clap(short, long)]
    size: Option<f64>,

    /// Badge text
    #[clap(short, long)]
    text: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value = "svg")]
    format: Format,

    /// Photo file to draw under the overlay (png output only)
    #[clap(long)]
    photo: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<BadgeConfig> {
    let base = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            BadgeConfig::from_json(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            let Some(src) = &args.image_src else {
                bail!("either --config or --image-src is required");
            };
            BadgeConfig::new(src, args.image_alt.clone().unwrap_or_default())
        }
    };

    let mut config = args.preset.overrides().apply_to(base);
    let cli = BadgeOverrides {
        size: args.size,
        badge_text: args.text.clone(),
        ..BadgeOverrides::default()
    };
    config = cli.apply_to(config);
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    log::debug!("badge configuration: {config:?}");

    let badge = BadgeRenderer::new().render(&config);

    let bytes = match args.format {
        Format::Html => badge.html().as_bytes().to_vec(),
        Format::Svg => badge.svg_document().into_bytes(),
        Format::Layout => badge.layout_json()?.into_bytes(),
        Format::Png => {
            let photo = match &args.photo {
                Some(path) => {
                    let data = std::fs::read(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Some(load_photo(&data)?)
                }
                None => None,
            };
            let image = rasterize(&badge, photo.as_ref())?;
            encode_png(&image)?
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(&bytes)
            .context("failed to write to stdout")?,
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{err:#}");
        eprintln!("otw-badge: {err:#}");
        std::process::exit(1);
    }
}
