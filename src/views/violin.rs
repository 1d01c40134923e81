use crate::data::filter::{select, YearRange};
use crate::data::model::{EnrichedTable, Region};

/// Density evaluation points per violin.
pub const DENSITY_POINTS: usize = 100;

/// Distribution of known electric range for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinShape {
    pub region: Region,
    pub samples: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// `(range, density)` pairs with densities scaled so the widest point is
    /// 1.0. Empty when the sample has no spread.
    pub density: Vec<(f64, f64)>,
}

/// One violin per region present in `subset` within `years`. Statistics use
/// every value; the display window only clips what is drawn.
pub fn violins(table: &EnrichedTable, subset: &[usize], years: YearRange) -> Vec<ViolinShape> {
    let mut groups: [Vec<f64>; 3] = Default::default();
    for row in select(table, subset).filter(|r| years.contains(r.vehicle.model_year)) {
        if let Some(range) = row.vehicle.known_range() {
            groups[row.origin.index()].push(range as f64);
        }
    }

    table
        .observed_regions()
        .into_iter()
        .filter_map(|region| {
            let mut values = std::mem::take(&mut groups[region.index()]);
            if values.is_empty() {
                return None;
            }
            values.sort_by(f64::total_cmp);
            Some(ViolinShape {
                region,
                samples: values.len(),
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                density: kde(&values, DENSITY_POINTS),
            })
        })
        .collect()
}

/// Linear-interpolation quantile of sorted, non-empty data.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Gaussian kernel density over the span of `sorted`, bandwidth by Scott's
/// rule (`σ · n^(-1/5)`), normalised to a peak of 1.
pub fn kde(sorted: &[f64], points: usize) -> Vec<(f64, f64)> {
    let n = sorted.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = var.sqrt() * (n as f64).powf(-0.2);
    if !(bandwidth > 0.0) {
        return Vec::new();
    }

    let (min, max) = (sorted[0], sorted[n - 1]);
    let step = (max - min) / (points - 1) as f64;
    let mut curve: Vec<(f64, f64)> = (0..points)
        .map(|i| {
            let y = min + step * i as f64;
            let density: f64 = sorted
                .iter()
                .map(|v| {
                    let z = (y - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (y, density)
        })
        .collect();

    let peak = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    if peak > 0.0 {
        for (_, d) in &mut curve {
            *d /= peak;
        }
    }
    curve
}
