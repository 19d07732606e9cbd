use image::{Rgba, RgbaImage};
use wavyte_tracker::{
    AnnotatedFrame, CornerBox, FrameIndex, OutlineRenderer, TrackFile, TrackRecord,
    TrackingEffect, annotate_frames, write_track_file,
};

fn synthetic_track(frames: u64) -> TrackFile {
    let records = (0..frames)
        .map(|f| {
            let x = 0.1 + 0.5 * (f as f64 / frames as f64);
            TrackRecord {
                id: FrameIndex(f),
                rotation: 0.0,
                bounding_box: CornerBox {
                    x1: x,
                    y1: 0.3,
                    x2: x + 0.25,
                    y2: 0.6,
                },
            }
        })
        .collect();
    TrackFile {
        records,
        last_updated: None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let out_dir = std::path::Path::new("target").join("annotate_sequence");
    std::fs::create_dir_all(&out_dir)?;

    // Tracker ran at half the timeline rate.
    let track_path = out_dir.join("track.json");
    write_track_file(&track_path, &synthetic_track(12))?;

    let effect = TrackingEffect::new();
    effect.configure(&serde_json::json!({
        "track_path": track_path.to_string_lossy(),
        "time_scale": 2.0,
        "delta_y": [[0, 0.0], [23, 0.1]],
    }))?;

    let mut frames = (0..24u64)
        .map(|f| AnnotatedFrame {
            frame: FrameIndex(f),
            image: RgbaImage::from_pixel(320, 180, Rgba([18, 20, 28, 255])),
        })
        .collect::<Vec<_>>();

    let stats = annotate_frames(&effect, &mut frames, None, OutlineRenderer::default)?;
    println!(
        "annotated {}/{} frames",
        stats.frames_drawn, stats.frames_total
    );

    for item in &frames {
        let path = out_dir.join(format!("frame_{:03}.png", item.frame.0));
        item.image.save(&path)?;
    }
    println!("wrote {}", out_dir.display());
    Ok(())
}
