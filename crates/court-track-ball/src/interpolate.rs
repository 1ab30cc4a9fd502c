use court_track_core::{all_absent, BoundingBox, Detection};
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fill gaps in a numeric series.
///
/// Internal gaps are linearly interpolated between the nearest known
/// neighbours, a leading gap takes the first known value and a trailing gap
/// the last known value. Known samples are kept exactly. Returns `None` when
/// the series has no known sample at all.
pub fn fill_gaps(series: &[Option<f32>]) -> Option<Vec<f32>> {
    let known: Vec<(usize, f32)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let &(first_idx, first_val) = known.first()?;
    let &(last_idx, last_val) = known.last()?;

    let mut out = vec![0.0_f32; series.len()];
    out[..first_idx].fill(first_val);
    for pair in known.windows(2) {
        let (a, va) = pair[0];
        let (b, vb) = pair[1];
        let span = (b - a) as f32;
        for (i, slot) in out.iter_mut().enumerate().take(b).skip(a) {
            *slot = va + (vb - va) * (i - a) as f32 / span;
        }
    }
    out[last_idx..].fill(last_val);
    Some(out)
}

/// Fill missing ball boxes across a run.
///
/// Each box coordinate is gap-filled independently with [`fill_gaps`]. When
/// the detector found nothing during the whole run the result is all
/// [`Detection::Absent`], with the same length as the input.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(detections), fields(frames = detections.len()))
)]
pub fn interpolate_ball_track(detections: &[Detection]) -> Vec<Detection> {
    if all_absent(detections) {
        warn!(
            "no ball detections in {} frames, interpolation skipped",
            detections.len()
        );
        return vec![Detection::Absent; detections.len()];
    }

    match fill_box_columns(detections) {
        Some(boxes) => boxes,
        None => {
            warn!("ball boxes carry no finite coordinates, interpolation skipped");
            vec![Detection::Absent; detections.len()]
        }
    }
}

fn fill_box_columns(detections: &[Detection]) -> Option<Vec<Detection>> {
    let mut columns: [Vec<f32>; 4] = Default::default();
    for (c, column) in columns.iter_mut().enumerate() {
        let series: Vec<Option<f32>> = detections
            .iter()
            .map(|d| {
                d.as_box()
                    .map(|b| b.to_array()[c])
                    .filter(|v| v.is_finite())
            })
            .collect();
        *column = fill_gaps(&series)?;
    }

    let [x1, y1, x2, y2] = &columns;
    Some(
        (0..detections.len())
            .map(|i| Detection::Box(BoundingBox::new(x1[i], y1[i], x2[i], y2[i])))
            .collect(),
    )
}
