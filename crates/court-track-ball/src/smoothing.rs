//! Windowed aggregates over per-frame series with missing samples.

/// Trailing moving average.
///
/// Output `i` is the mean of the present samples in `[i + 1 - window, i]`
/// (clipped at the start), so it is defined from the very first frame.
/// A window with no present sample yields `None`. `window == 0` behaves
/// like `window == 1`.
pub fn rolling_mean(values: &[Option<f32>], window: usize) -> Vec<Option<f32>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0_f64, 0usize), |(s, c), &v| (s + v as f64, c + 1));
            (count > 0).then(|| (sum / count as f64) as f32)
        })
        .collect()
}

/// First difference `out[i] = values[i] - values[i - 1]`; `out[0]` is `None`,
/// as is any difference involving a missing sample.
pub fn first_difference(values: &[Option<f32>]) -> Vec<Option<f32>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|w| match (w[0], w[1]) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rolling_mean_is_defined_from_the_start() {
        let v = [Some(1.0), Some(3.0), Some(5.0), Some(7.0)];
        let m = rolling_mean(&v, 3);
        assert_eq!(m.len(), 4);
        assert_relative_eq!(m[0].unwrap(), 1.0);
        assert_relative_eq!(m[1].unwrap(), 2.0);
        assert_relative_eq!(m[2].unwrap(), 3.0);
        assert_relative_eq!(m[3].unwrap(), 5.0);
    }

    #[test]
    fn rolling_mean_skips_missing_samples() {
        let v = [None, Some(4.0), None, None, None];
        let m = rolling_mean(&v, 2);
        assert_eq!(m[0], None);
        assert_eq!(m[1], Some(4.0));
        assert_eq!(m[2], Some(4.0));
        assert_eq!(m[3], None);
    }

    #[test]
    fn first_difference_leads_with_none() {
        let d = first_difference(&[Some(1.0), Some(4.0), None, Some(2.0)]);
        assert_eq!(d, vec![None, Some(3.0), None, None]);
        assert!(first_difference(&[]).is_empty());
    }
}
