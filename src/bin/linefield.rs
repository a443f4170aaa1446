use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "linefield", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one mount pass as a PNG.
    Render(RenderArgs),
    /// Mount, then resize through a list of viewport sizes; write the final frame as a PNG.
    Replay(ReplayArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// Field configuration JSON. Missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed. Unseeded runs draw from the system clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Clear color (#RRGGBB or #RRGGBBAA). Overrides the config file.
    #[arg(long)]
    background: Option<linefield::ColorDef>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    #[command(flatten)]
    field: FieldArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Comma-separated viewport sizes, e.g. `800x600,1024x768`. The first one mounts.
    #[arg(long, value_delimiter = ',', required = true)]
    sizes: Vec<linefield::Viewport>,

    /// Collapse the resize burst to its last size.
    #[arg(long)]
    coalesce: bool,

    #[command(flatten)]
    field: FieldArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Configuration JSON to validate and print. Defaults are printed when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<linefield::FieldConfig> {
    match path {
        Some(p) => linefield::FieldConfig::from_path(p)
            .with_context(|| format!("load field config '{}'", p.display())),
        None => Ok(linefield::FieldConfig::default()),
    }
}

fn field_setup(args: &FieldArgs) -> anyhow::Result<(linefield::FieldConfig, linefield::Rng64)> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(bg) = args.background {
        cfg.background = Some(bg);
    }
    let rng = match args.seed {
        Some(seed) => linefield::Rng64::new(seed),
        None => linefield::Rng64::from_entropy(),
    };
    Ok((cfg, rng))
}

fn write_png(out: &Path, frame: &linefield::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (cfg, rng) = field_setup(&args.field)?;
    let viewport = linefield::Viewport::new(args.width, args.height);
    let (frame, report) = linefield::render_frame(viewport, cfg, rng)?;
    eprintln!("{report}");
    write_png(&args.out, &frame)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let (mut cfg, rng) = field_setup(&args.field)?;
    if args.coalesce {
        cfg.resize_policy = linefield::ResizePolicy::CoalesceBursts;
    }
    let (frame, reports) = linefield::replay(&args.sizes, cfg, rng)?;
    for report in &reports {
        eprintln!("{report}");
    }
    write_png(&args.out, &frame)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
