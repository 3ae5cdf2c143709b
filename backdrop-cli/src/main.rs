//! Backdrop CLI
//!
//! Paint one element's background and border from style strings, then print
//! the display list or write a PNG.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backdrop_css::{BackgroundCompositor, CompositorConfig, DisplayList, Edge, Rect};
use backdrop_render::{ImageStore, Renderer};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "backdrop")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Print the display list of a rounded, bordered box
    backdrop --background-color '#eee' --border-width 2px --border-radius 8px --dump

    # Render a gradient to PNG
    backdrop --background 'linear-gradient(45deg, red, blue)' -o gradient.png

    # Tile an image along the top edge
    backdrop --background-image tile.png --background-repeat repeat-x -o band.png

    # Scale design pixels to a 750px device
    backdrop --config device.json --border-width 1px -o hairline.png

LOGGING:
    Diagnostics go to stderr. Set RUST_LOG (e.g. RUST_LOG=debug) for more.")]
struct Cli {
    /// Element width in device pixels
    #[arg(long, default_value = "200")]
    width: u32,

    /// Element height in device pixels
    #[arg(long, default_value = "100")]
    height: u32,

    /// background-color, e.g. '#336699' or 'rgba(0,0,0,0.5)'
    #[arg(long, value_name = "COLOR")]
    background_color: Option<String>,

    /// Gradient layer, e.g. 'linear-gradient(to right, red, blue)'
    #[arg(long, value_name = "GRADIENT")]
    background: Option<String>,

    /// Image file painted as the image layer
    #[arg(long, value_name = "FILE")]
    background_image: Option<PathBuf>,

    /// background-size, e.g. 'cover' or '50% auto'
    #[arg(long, value_name = "SIZE")]
    background_size: Option<String>,

    /// background-position, e.g. 'right 10px bottom 20%'
    #[arg(long, value_name = "POSITION")]
    background_position: Option<String>,

    /// background-repeat: repeat, repeat-x, repeat-y or no-repeat
    #[arg(long, value_name = "REPEAT")]
    background_repeat: Option<String>,

    /// Width of every edge, e.g. '2px'
    #[arg(long, value_name = "WIDTH")]
    border_width: Option<String>,

    /// Color of every edge
    #[arg(long, value_name = "COLOR")]
    border_color: Option<String>,

    /// border-style: solid, dashed or dotted
    #[arg(long, value_name = "STYLE")]
    border_style: Option<String>,

    /// border-radius, one value or four (top-left top-right bottom-right bottom-left)
    #[arg(long, value_name = "RADIUS")]
    border_radius: Option<String>,

    /// Layer opacity from 0 to 255
    #[arg(long, value_name = "ALPHA")]
    opacity: Option<u8>,

    /// Compositor configuration as JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the display list and compositor state as JSON
    #[arg(long)]
    dump: bool,

    /// Render to a PNG file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mut compositor = BackgroundCompositor::new(config);
    let mut images = ImageStore::new();

    if let Some(ref path) = cli.background_image {
        let src = path.display().to_string();
        let image = images.load(&src, path)?;
        compositor.set_background_image(Some(image));
    }
    apply_styles(&mut compositor, &cli);

    let bounds = Rect::new(0.0, 0.0, cli.width as f32, cli.height as f32);
    let list = compositor.draw(bounds);
    tracing::debug!(commands = list.len(), "display list built");

    if cli.dump || cli.output.is_none() {
        dump(&compositor, &list)?;
    }

    if let Some(ref output) = cli.output {
        let mut renderer = Renderer::new(cli.width, cli.height)?;
        renderer.render(&list, &images);
        renderer
            .save_png(output)
            .with_context(|| format!("failed to render '{}'", output.display()))?;
        println!(
            "{} {}x{} to {}",
            "Saved".green().bold(),
            cli.width,
            cli.height,
            output.display()
        );
    }

    Ok(())
}

/// Read a [`CompositorConfig`] from JSON, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<CompositorConfig> {
    let Some(path) = path else {
        return Ok(CompositorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid config JSON in '{}'", path.display()))
}

/// Hand every style string given on the command line to the compositor.
fn apply_styles(compositor: &mut BackgroundCompositor, cli: &Cli) {
    if let Some(ref color) = cli.background_color {
        compositor.set_background_color(color);
    }
    if let Some(ref gradient) = cli.background {
        compositor.set_background_gradient(gradient);
    }
    if let Some(ref size) = cli.background_size {
        compositor.set_background_size(size);
    }
    if let Some(ref position) = cli.background_position {
        compositor.set_background_position(position);
    }
    if let Some(ref repeat) = cli.background_repeat {
        compositor.set_background_repeat(repeat);
    }
    if let Some(ref width) = cli.border_width {
        compositor.set_border_width(Edge::All, width);
    }
    if let Some(ref color) = cli.border_color {
        compositor.set_border_color(Edge::All, color);
    }
    if let Some(ref style) = cli.border_style {
        compositor.set_border_style(style);
    }
    if let Some(ref radius) = cli.border_radius {
        compositor.set_border_radius(radius);
    }
    if let Some(alpha) = cli.opacity {
        compositor.set_alpha(alpha);
    }
}

fn dump(compositor: &BackgroundCompositor, list: &DisplayList) -> Result<()> {
    println!("{}", "=== Compositor State ===".cyan().bold());
    println!("{}", serde_json::to_string_pretty(&compositor.state())?);

    println!("\n{}", format!("=== Display List ({} commands) ===", list.len()).cyan().bold());
    println!("{}", serde_json::to_string_pretty(list)?);
    Ok(())
}
