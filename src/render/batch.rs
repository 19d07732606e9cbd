use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    effect::region::RegionSource,
    foundation::core::FrameIndex,
    foundation::error::{TrackerError, TrackerResult},
    render::outline::Renderer,
};

#[derive(Clone, Debug)]
/// An image paired with the timeline frame it shows.
pub struct AnnotatedFrame {
    /// Timeline frame.
    pub frame: FrameIndex,
    /// Pixels; the region is drawn in place.
    pub image: RgbaImage,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters for a batch annotation run.
pub struct AnnotateStats {
    /// Frames processed.
    pub frames_total: u64,
    /// Frames that had a region drawn.
    pub frames_drawn: u64,
}

/// Draw the region for `frame` onto `image`; returns whether one was drawn.
pub fn annotate_frame(
    source: &dyn RegionSource,
    renderer: &mut dyn Renderer,
    frame: FrameIndex,
    image: &mut RgbaImage,
) -> TrackerResult<bool> {
    let Some(region) = source.region_at(frame) else {
        return Ok(false);
    };
    renderer.draw_region(&region, image)?;
    Ok(true)
}

/// Annotate many frames in parallel against one shared source.
///
/// Each worker thread gets its own renderer from `make_renderer`.
pub fn annotate_frames<R, F>(
    source: &dyn RegionSource,
    frames: &mut [AnnotatedFrame],
    threads: Option<usize>,
    make_renderer: F,
) -> TrackerResult<AnnotateStats>
where
    R: Renderer,
    F: Fn() -> R + Send + Sync,
{
    let pool = build_thread_pool(threads)?;
    let drawn = pool.install(|| {
        frames
            .par_iter_mut()
            .map_init(&make_renderer, |renderer, item| {
                annotate_frame(source, renderer, item.frame, &mut item.image)
            })
            .collect::<Vec<_>>()
    });

    let mut stats = AnnotateStats {
        frames_total: frames.len() as u64,
        frames_drawn: 0,
    };
    for item in drawn {
        if item? {
            stats.frames_drawn += 1;
        }
    }
    tracing::debug!(
        total = stats.frames_total,
        drawn = stats.frames_drawn,
        "annotated frame batch"
    );
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> TrackerResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TrackerError::validation(
            "annotate 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TrackerError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
