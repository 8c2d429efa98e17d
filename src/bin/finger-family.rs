use std::collections::BTreeSet;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use finger_family::{
    CompositionId, FrameIndex, LoadedComposition, SceneFingerprint, fingerprint_scene, registry,
};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "finger-family", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every registered composition with its schema and default props.
    List,
    /// Print the length and frame rate of a composition.
    Metadata(PropsArgs),
    /// Print the finger-family windows with their integer frame ranges.
    Timeline(PropsArgs),
    /// Print the draw ops and audio of one frame.
    Frame(FrameArgs),
    /// Render every frame in parallel and summarise the scene fingerprints.
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
struct PropsArgs {
    /// Composition id, e.g. `FingerFamily`.
    #[arg(default_value = "FingerFamily")]
    id: CompositionId,

    /// Props JSON; the registered defaults when omitted.
    #[arg(long)]
    props: Option<PathBuf>,

    /// Asset root for relative paths; defaults to the props file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    props: PropsArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    #[command(flatten)]
    props: PropsArgs,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Print the fingerprint of every frame instead of a summary.
    #[arg(long, default_value_t = false)]
    per_frame: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::List => print_json(&registry()),
        Command::Metadata(args) => cmd_metadata(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scan(args) => cmd_scan(args),
    }
}

fn load(args: &PropsArgs) -> anyhow::Result<LoadedComposition> {
    let props = match &args.props {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read props '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse props '{}'", path.display()))?
        }
        None => serde_json::Value::Null,
    };
    let assets = match (&args.assets, &args.props) {
        (Some(dir), _) => dir.clone(),
        (None, Some(path)) => path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
        (None, None) => PathBuf::from("."),
    };
    LoadedComposition::load(args.id, &props, &assets)
        .with_context(|| format!("load composition '{}'", args.id))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write json to stdout")?;
    writeln!(out).context("write json to stdout")?;
    Ok(())
}

fn cmd_metadata(args: PropsArgs) -> anyhow::Result<()> {
    print_json(&load(&args)?.metadata())
}

fn cmd_timeline(args: PropsArgs) -> anyhow::Result<()> {
    let loaded = load(&args)?;
    let family = loaded
        .finger_family()
        .with_context(|| format!("'{}' has no segment timeline", args.id))?;

    #[derive(serde::Serialize)]
    struct Row {
        #[serde(flatten)]
        window: finger_family::FrameWindow,
        from: u64,
        frames: u64,
    }
    let rows: Vec<Row> = family
        .sequences()
        .into_iter()
        .map(|(window, range)| Row {
            window,
            from: range.start.0,
            frames: range.len_frames(),
        })
        .collect();
    print_json(&rows)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let loaded = load(&args.props)?;
    let total = loaded.metadata().duration_in_frames;
    if args.frame >= total {
        tracing::warn!(frame = args.frame, total, "frame is past the end");
    }
    print_json(&loaded.render(FrameIndex(args.frame)))
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    if args.threads == Some(0) {
        anyhow::bail!("--threads must be >= 1 when set");
    }
    let loaded = load(&args.props)?;
    let total = loaded.metadata().duration_in_frames;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("build rayon thread pool")?;

    let started = std::time::Instant::now();
    let prints: Vec<SceneFingerprint> = pool.install(|| {
        (0..total)
            .into_par_iter()
            .map(|f| fingerprint_scene(&loaded.render(FrameIndex(f))))
            .collect()
    });
    tracing::info!(
        frames = total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan finished"
    );

    if args.per_frame {
        let rows: Vec<_> = prints
            .iter()
            .enumerate()
            .map(|(f, fp)| serde_json::json!({ "frame": f, "fingerprint": fp.to_string() }))
            .collect();
        return print_json(&rows);
    }

    let distinct: BTreeSet<String> = prints.iter().map(ToString::to_string).collect();
    print_json(&serde_json::json!({
        "id": args.props.id,
        "frames": total,
        "distinctScenes": distinct.len(),
        "first": prints.first().map(ToString::to_string),
        "last": prints.last().map(ToString::to_string),
    }))
}
