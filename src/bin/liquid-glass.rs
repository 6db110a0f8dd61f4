use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "liquid-glass", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the displacement field as a PNG.
    Displacement(TextureArgs),
    /// Write the edge-ring mask as a PNG.
    Mask(TextureArgs),
    /// Print the filter chains and surface style as JSON.
    Filters(ContainerArgs),
    /// Run the filter chains over a checkerboard backdrop and write the result as a PNG.
    Preview(TextureArgs),
}

#[derive(Args, Debug)]
struct ContainerArgs {
    /// Container width in pixels.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Container height in pixels.
    #[arg(long, default_value_t = 200.0)]
    height: f64,

    /// Corner radius as a CSS length (`24px`, `50%`, `24px 12px`).
    #[arg(long, default_value = "24px")]
    radius: String,

    /// Surface parameters JSON (kebab-case keys, missing keys take defaults).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TextureArgs {
    #[command(flatten)]
    container: ContainerArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Displacement(args) => cmd_displacement(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Filters(args) => cmd_filters(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<liquid_glass::GlassParams> {
    let Some(path) = path else {
        return Ok(liquid_glass::GlassParams::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    liquid_glass::GlassParams::from_json(&json)
        .with_context(|| format!("parse config '{}'", path.display()))
}

/// Run one controller cycle for the requested container and return the resulting resources.
fn compute_resources(
    args: &ContainerArgs,
    params: &liquid_glass::GlassParams,
) -> anyhow::Result<liquid_glass::ResourceSnapshot> {
    let backend = liquid_glass::create_backend(liquid_glass::BackendKind::PngDataUri)?;
    let measurement =
        liquid_glass::ContainerMeasurement::new(args.width, args.height, args.radius.clone());
    let mut ctl = liquid_glass::RecomputeController::new(
        backend,
        move || measurement.clone(),
        liquid_glass::ManualScheduler::new(),
        params.shape(),
        params.ring(),
    )?;
    ctl.observe(liquid_glass::Target::Container);
    ctl.tick();
    let snapshot = ctl.snapshot();
    if snapshot.degraded {
        eprintln!(
            "container exceeds the {} pixel budget; textures were not generated",
            liquid_glass::PIXEL_BUDGET
        );
    }
    Ok(snapshot)
}

fn write_png(path: &Path, raster: &liquid_glass::Raster) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &raster.data,
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_displacement(args: TextureArgs) -> anyhow::Result<()> {
    let params = read_params(args.container.config.as_deref())?;
    let snapshot = compute_resources(&args.container, &params)?;
    let field = snapshot
        .displacement
        .context("no displacement field was generated")?;
    write_png(&args.out, &field.raster)
}

fn cmd_mask(args: TextureArgs) -> anyhow::Result<()> {
    let params = read_params(args.container.config.as_deref())?;
    let snapshot = compute_resources(&args.container, &params)?;
    let mask = snapshot
        .mask
        .context("no edge mask was generated (edge width resolves to zero)")?;
    write_png(&args.out, &mask.raster)
}

fn cmd_filters(args: ContainerArgs) -> anyhow::Result<()> {
    let params = read_params(args.config.as_deref())?;
    let snapshot = compute_resources(&args, &params)?;
    let out = serde_json::json!({
        "filters": liquid_glass::map_filters(&params, &snapshot),
        "style": liquid_glass::SurfaceStyle::from_params(&params),
        "debug-overlay": liquid_glass::debug_overlay(&params, &snapshot).is_some(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_preview(args: TextureArgs) -> anyhow::Result<()> {
    let params = read_params(args.container.config.as_deref())?;
    let snapshot = compute_resources(&args.container, &params)?;
    let geom = snapshot
        .geometry
        .context("controller did not run a compute cycle")?;
    let source = checkerboard(geom.width(), geom.height(), 16);
    let set = liquid_glass::map_filters(&params, &snapshot);
    let out = liquid_glass::apply_filter_set(&set, &source, &snapshot)?;
    write_png(&args.out, &out)
}

fn checkerboard(width: u32, height: u32, cell: u32) -> liquid_glass::Raster {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let dark = ((x / cell) + (y / cell)) % 2 == 0;
            let px = if dark {
                [40, 52, 86, 255]
            } else {
                [232, 196, 120, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    liquid_glass::Raster { width, height, data }
}
