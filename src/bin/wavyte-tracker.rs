use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use wavyte_tracker::{
    FrameIndex, JsonTrackReader, OutlineRenderer, Renderer as _, TrackFileReader as _,
    TrackedBoxStore, TrackingEffect,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-tracker", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a track file.
    Inspect(InspectArgs),
    /// Print the region computed for one frame as JSON.
    Region(RegionArgs),
    /// Draw the region for one frame onto a PNG.
    Annotate(AnnotateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Track file (JSON).
    #[arg(long)]
    track: PathBuf,

    /// Rescale frame numbers by this factor before summarizing.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
}

#[derive(Parser, Debug)]
struct RegionArgs {
    /// Effect configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Timeline frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// Effect configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Timeline frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Stroke width in pixels.
    #[arg(long, default_value_t = 2)]
    thickness: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Region(args) => cmd_region(args),
        Command::Annotate(args) => cmd_annotate(args),
    }
}

/// Build an effect from a config file; relative `track_path` values resolve
/// against the config file's directory.
fn effect_from_config(path: &Path) -> anyhow::Result<TrackingEffect> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let mut doc: serde_json::Value =
        serde_json::from_str(&text).with_context(|| "parse config JSON")?;

    let track = doc
        .get("track_path")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .map(PathBuf::from);

    if let Some(track) = &track
        && track.is_relative()
    {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let resolved = base.join(track).to_string_lossy().into_owned();
        doc["track_path"] = serde_json::Value::String(resolved);
    }

    let effect = TrackingEffect::new();
    effect.configure(&doc)?;
    if track.is_some() && effect.track_path().is_none() {
        anyhow::bail!(
            "track data referenced by '{}' could not be loaded",
            path.display()
        );
    }
    Ok(effect)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let track = JsonTrackReader.read(&args.track)?;

    let (mut store, accepted, dropped) = TrackedBoxStore::from_track(&track);
    store.rescale(args.time_scale)?;

    let span = store.span();
    let summary = serde_json::json!({
        "records": track.records.len(),
        "accepted": accepted,
        "dropped": dropped,
        "samples": store.len(),
        "time_scale": store.time_scale(),
        "first_frame": span.map(|s| s.start.0),
        "last_frame": span.map(|s| s.end.0 - 1),
        "span_frames": span.map(|s| s.len_frames()),
        "last_updated": track.last_updated,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_region(args: RegionArgs) -> anyhow::Result<()> {
    let effect = effect_from_config(&args.config)?;
    let region = effect.compute(FrameIndex(args.frame));
    println!("{}", serde_json::to_string_pretty(&region)?);
    Ok(())
}

fn cmd_annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let effect = effect_from_config(&args.config)?;

    let mut img = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgba8();

    if let Some(region) = effect.compute(FrameIndex(args.frame)) {
        let mut renderer = OutlineRenderer {
            thickness: args.thickness,
            ..OutlineRenderer::default()
        };
        renderer.draw_region(&region, &mut img)?;
    } else {
        eprintln!("no tracked region at frame {}", args.frame);
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    Ok(())
}
