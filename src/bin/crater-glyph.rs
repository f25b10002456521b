use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use crater_glyph::{
    AnimationDriver, CraterRecord, DriverOpts, ExportOptions, PlanOptions, RenderOptions, Rgba8,
    SilhouetteLibrary, StillFormat, SvgDirectory, export_still, flatten_layers, plan_layers,
    save_still,
};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crater-glyph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the layer plan of a record as JSON.
    Plan(PlanArgs),
    /// Export static stills (one record, or a JSON array of records into a directory).
    Still(StillArgs),
    /// Render an animated PNG frame sequence for one record.
    Frames(FramesArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for StillFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Png => StillFormat::Png,
            FormatArg::Jpeg => StillFormat::Jpeg,
        }
    }
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Plan with dark-mode ground colors.
    #[arg(long, default_value_t = false)]
    dark: bool,
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Input record JSON (an object, or an array of objects).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path for one record, or output directory for an array.
    #[arg(long)]
    out: PathBuf,

    /// Square output edge in pixels.
    #[arg(long, default_value_t = 800)]
    size: u32,

    /// Background color (#RRGGBB).
    #[arg(long, default_value = "#1a1a1a")]
    background: Rgba8,

    /// Use dark-mode ground colors.
    #[arg(long, default_value_t = false)]
    dark: bool,

    /// Keep the noise overlays.
    #[arg(long, default_value_t = false)]
    wave: bool,

    /// Encoding when the output path has no image extension (and for directory output).
    #[arg(long, value_enum, default_value_t = FormatArg::Jpeg)]
    format: FormatArg,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 100)]
    quality: u8,

    /// Lattice seed salt.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory of `<kind>/<name>.svg` silhouettes overriding the built-ins.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Export array inputs in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = 60)]
    count: u32,

    /// Square output edge in pixels.
    #[arg(long, default_value_t = 512)]
    size: u32,

    /// Background color (#RRGGBB).
    #[arg(long, default_value = "#1a1a1a")]
    background: Rgba8,

    /// Use dark-mode ground colors.
    #[arg(long, default_value_t = false)]
    dark: bool,

    /// Lattice seed salt.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory of `<kind>/<name>.svg` silhouettes overriding the built-ins.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Synthesize layers in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Many(Vec<CraterRecord>),
    One(Box<CraterRecord>),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Still(args) => cmd_still(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn read_input(path: &Path) -> anyhow::Result<RecordInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read records '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse records '{}'", path.display()))
}

fn read_one(path: &Path) -> anyhow::Result<CraterRecord> {
    match read_input(path)? {
        RecordInput::One(record) => Ok(*record),
        RecordInput::Many(mut records) if records.len() == 1 => Ok(records.remove(0)),
        RecordInput::Many(records) => anyhow::bail!(
            "expected one record in '{}', found {}",
            path.display(),
            records.len()
        ),
    }
}

fn library(assets: Option<&Path>) -> anyhow::Result<SilhouetteLibrary> {
    let mut library = SilhouetteLibrary::builtin()?;
    if let Some(dir) = assets {
        let overlay = SvgDirectory::load(dir)?;
        tracing::info!(root = %dir.display(), silhouettes = overlay.len(), "loaded silhouettes");
        library = library.with_overlay(overlay);
    }
    Ok(library)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let record = read_one(&args.in_path)?;
    let plan = plan_layers(
        &record,
        PlanOptions {
            is_dark_mode: args.dark,
            ..PlanOptions::default()
        },
    );
    let report = serde_json::json!({
        "id": record.id,
        "layers": plan.layers,
        "recovered": plan.recovered.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Keep record ids from escaping the output directory.
fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let library = library(args.assets.as_deref())?;
    let opts = ExportOptions {
        size: args.size,
        background: args.background,
        is_dark_mode: args.dark,
        wave_effect: args.wave,
        seed: args.seed,
        format: args.format.into(),
        jpeg_quality: args.quality,
    };

    let export_one = |record: &CraterRecord, out: &Path| -> anyhow::Result<()> {
        let still = export_still(record, &library, &opts)?;
        for r in &still.recovered {
            tracing::warn!(id = %record.id, "{r}");
        }
        save_still(&still.frame, out, &opts)?;
        eprintln!("wrote {}", out.display());
        Ok(())
    };

    match read_input(&args.in_path)? {
        RecordInput::One(record) => export_one(&record, &args.out),
        RecordInput::Many(records) => {
            std::fs::create_dir_all(&args.out)
                .with_context(|| format!("create output dir '{}'", args.out.display()))?;
            let target = |r: &CraterRecord| {
                let name = format!("crater-{}.{}", file_stem(&r.id), opts.format.extension());
                args.out.join(name)
            };
            if args.parallel {
                records.par_iter().try_for_each(|r| export_one(r, &target(r)))
            } else {
                records.iter().try_for_each(|r| export_one(r, &target(r)))
            }
        }
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let record = read_one(&args.in_path)?;
    let mut driver = AnimationDriver::new(
        library(args.assets.as_deref())?,
        DriverOpts {
            parallel: args.parallel,
            threads: args.threads,
            seed: args.seed,
        },
    )?;
    let rendered = driver.render_layers(
        &record,
        RenderOptions {
            size: args.size,
            is_dark_mode: args.dark,
            ..RenderOptions::default()
        },
    )?;
    for r in &rendered.recovered {
        tracing::warn!(id = %record.id, "{r}");
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let export = ExportOptions::default();

    let mut layers = rendered.layers;
    for i in 0..args.count {
        if i > 0 {
            layers = driver
                .tick(rendered.handle)?
                .context("render handle disappeared mid-sequence")?;
        }
        let frame = flatten_layers(&layers, args.size, args.background)?;
        let out = args.out_dir.join(format!("frame_{i:04}.png"));
        save_still(&frame, &out, &export)?;
    }
    driver.dispose(rendered.handle);

    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}
