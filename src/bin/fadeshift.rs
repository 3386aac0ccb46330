use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fadeshift::{
    AnimationConfig, IngestFile, ManualScheduler, OutputTarget, Studio, blend_label,
    default_milestones, resolve_position, validate_config,
};

#[derive(Parser, Debug)]
#[command(name = "fadeshift", version)]
struct Cli {
    /// Log debug detail to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an embeddable snippet for a sequence of images.
    Export(ExportArgs),
    /// Print the blend state at given elapsed times.
    Preview(PreviewArgs),
    /// Print the resolved clock parameters and keyframe table as JSON.
    Keyframes(KeyframesArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Animation config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cycle length, e.g. `30s`, `2m`.
    #[arg(long)]
    duration: Option<String>,

    /// Comma-separated milestone percentages, one per image after the first.
    #[arg(long, value_delimiter = ',')]
    milestones: Option<Vec<String>>,

    /// Loop back to the first image.
    #[arg(long)]
    cycle: bool,

    /// Start offset: percent (`50%`) or duration (`30s`).
    #[arg(long)]
    start_at: Option<String>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Images in sequence order.
    #[arg(long, num_args = 1.., required = true)]
    images: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Snippet flavour.
    #[arg(long, value_enum)]
    target: Option<TargetChoice>,

    /// URL prefix for linked images.
    #[arg(long)]
    prefix: Option<String>,

    /// CSS class for the container.
    #[arg(long = "class")]
    class_name: Option<String>,

    /// Inline images as data URIs.
    #[arg(long)]
    embed: bool,

    /// Write the snippet here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Number of images in the sequence.
    #[arg(long)]
    count: usize,

    #[command(flatten)]
    config: ConfigArgs,

    /// Elapsed milliseconds since the first frame; repeatable.
    #[arg(long = "at", required = true)]
    at_ms: Vec<f64>,
}

#[derive(Parser, Debug)]
struct KeyframesArgs {
    /// Number of images in the sequence.
    #[arg(long)]
    count: usize,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetChoice {
    Script,
    React,
    Vue,
    Svelte,
}

impl From<TargetChoice> for OutputTarget {
    fn from(t: TargetChoice) -> Self {
        match t {
            TargetChoice::Script => Self::Script,
            TargetChoice::React => Self::React,
            TargetChoice::Vue => Self::Vue,
            TargetChoice::Svelte => Self::Svelte,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Keyframes(args) => cmd_keyframes(args),
    }
}

fn load_config(args: &ConfigArgs, image_count: usize) -> anyhow::Result<AnimationConfig> {
    let mut cfg = match &args.config {
        Some(path) => AnimationConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AnimationConfig::default(),
    };
    if let Some(d) = &args.duration {
        cfg.duration.clone_from(d);
    }
    if let Some(m) = &args.milestones {
        cfg.milestones.clone_from(m);
    } else if cfg.active_milestones().is_empty() {
        cfg.milestones = default_milestones(image_count);
    }
    if args.cycle {
        cfg.is_cycling = true;
    }
    if let Some(s) = &args.start_at {
        cfg.start_at.clone_from(s);
    }
    Ok(cfg)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let files = args
        .images
        .iter()
        .map(IngestFile::from_path)
        .collect::<Result<Vec<_>, _>>()?;

    let mut cfg = load_config(&args.config, files.len())?;
    if let Some(t) = args.target {
        cfg.output_target = t.into();
    }
    if let Some(p) = args.prefix {
        cfg.image_prefix = p;
    }
    if let Some(c) = args.class_name {
        cfg.class_name = c;
    }
    if args.embed {
        cfg.embed_images = true;
    }

    let mut studio = Studio::new(ManualScheduler::new());
    studio.add_images(&files)?;
    // add_images resets milestones; generate_code commits `cfg` as given.
    let code = studio.generate_code(cfg)?;

    match &args.out {
        Some(out) => {
            write_output(out, &code)?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{code}"),
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config, args.count)?;
    let normalized = validate_config(&cfg, args.count)?;
    let params = normalized.clock_params(args.count)?;

    for at in args.at_ms {
        let position = params.position_at(at + params.initial_offset_ms);
        let state = resolve_position(position, args.count, normalized.is_cycling);
        let line = serde_json::json!({
            "elapsedMs": at,
            "position": position,
            "state": state,
            "layers": state.layers(),
            "label": blend_label(position, args.count, normalized.is_cycling),
        });
        println!("{line}");
    }
    Ok(())
}

fn cmd_keyframes(args: KeyframesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config, args.count)?;
    let normalized = validate_config(&cfg, args.count)?;
    let params = normalized.clock_params(args.count)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&params).context("serialize clock params")?
    );
    Ok(())
}
