use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use backdrop::{Backdrop, BackdropConfig, FsTextureSource, Host, PageDef, bootstrap};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version, about = "Render a scroll-driven gallery backdrop")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Render(RenderArgs),
    /// Print the loaded textures and the initial selection.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Page JSON. Relative texture paths resolve against its directory.
    #[arg(long)]
    page: PathBuf,

    /// Optional config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Timestamp of the frame, in ms since the loop started.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Length of the sequence in ms.
    #[arg(long)]
    duration_ms: f64,

    /// Spacing between rendered frames in ms.
    #[arg(long, default_value_t = 250.0)]
    every_ms: f64,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    page: PageArgs,
}

fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("backdrop={level}")
            .parse()
            .context("build log filter")?,
    );
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

struct Loaded {
    page: PageDef,
    cfg: BackdropConfig,
    backdrop: Option<Backdrop>,
}

fn load(args: &PageArgs) -> anyhow::Result<Loaded> {
    let page = PageDef::from_path(&args.page)?;
    let cfg = match &args.config {
        Some(path) => BackdropConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BackdropConfig::default(),
    };
    let assets_root = args.page.parent().unwrap_or_else(|| Path::new("."));
    let source = FsTextureSource::new(assets_root);
    let backdrop = bootstrap(&page, &source, &cfg)
        .with_context(|| format!("mounting backdrop for '{}'", args.page.display()))?;
    Ok(Loaded {
        page,
        cfg,
        backdrop,
    })
}

fn host_for(loaded: Loaded) -> anyhow::Result<Option<Host>> {
    let Loaded {
        page,
        cfg,
        backdrop,
    } = loaded;
    let Some(backdrop) = backdrop else {
        eprintln!(
            "surface '{}' not present on page, nothing to render",
            page.surface_id
        );
        return Ok(None);
    };
    Ok(Some(Host::new(backdrop, cfg.host.refresh_hz, &page.scroll)?))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let Some(mut host) = host_for(load(&args.page)?)? else {
        return Ok(());
    };
    host.run_until(args.at_ms);
    let frame = host.render()?;
    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !args.every_ms.is_finite() || args.every_ms <= 0.0 {
        anyhow::bail!("--every-ms must be > 0");
    }
    if !args.duration_ms.is_finite() || args.duration_ms < 0.0 {
        anyhow::bail!("--duration-ms must be >= 0");
    }
    let Some(mut host) = host_for(load(&args.page)?)? else {
        return Ok(());
    };
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let count = (args.duration_ms / args.every_ms).floor() as u64 + 1;
    for i in 0..count {
        host.run_until(i as f64 * args.every_ms);
        let frame = host.render()?;
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        frame
            .save_png(&path)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }
    info!(frames = count, out_dir = %args.out_dir.display(), "sequence written");
    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let loaded = load(&args.page)?;
    let Some(backdrop) = loaded.backdrop.as_ref() else {
        println!(
            "surface '{}' not present on page",
            loaded.page.surface_id
        );
        return Ok(());
    };

    let textures = backdrop.textures();
    println!(
        "textures: {}{}",
        textures.len(),
        if textures.is_fallback_only() {
            " (fallback only)"
        } else {
            ""
        }
    );
    for (id, tex) in textures.iter() {
        println!("  [{}] {} {}x{}", id.0, tex.href(), tex.width(), tex.height());
    }
    match backdrop.selection() {
        Some(sel) => println!(
            "selection: active {} pending {}",
            sel.active(),
            sel.pending()
                .map_or_else(|| "-".to_string(), |p| p.to_string())
        ),
        None => println!("selection: none (no gallery anchors)"),
    }
    let surface = backdrop.surface();
    println!("surface: {}x{}", surface.width(), surface.height());
    Ok(())
}
