//! Plate-loading and one-rep-max calculators.
//!
//! Both calculators accept raw text as typed by the user. Bad input never
//! produces an error: plate loading reports `invalid` and the 1RM estimate
//! falls back to zero.

use std::fmt;

/// Standard Olympic bar weight in kilograms
pub const DEFAULT_BAR_KG: f64 = 20.0;

/// Plate denominations available per side, heaviest first
pub const DEFAULT_PLATES_KG: [f64; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

/// Targets needing more plates than this on one side are rejected
pub const MAX_PLATES_PER_SIDE: usize = 100;

/// Result of a plate-load calculation
#[derive(Clone, Debug, PartialEq)]
pub enum PlateLoad {
    /// The empty bar already meets the target
    BarOnly,
    /// Plates to load on each side, heaviest first
    Side(Vec<f64>),
    /// Input was not a number, or no bar could hold the plates
    Invalid,
}

impl fmt::Display for PlateLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateLoad::BarOnly => f.write_str("bar only"),
            PlateLoad::Invalid => f.write_str("invalid"),
            PlateLoad::Side(plates) => {
                let listed: Vec<String> = plates.iter().map(|p| p.to_string()).collect();
                write!(f, "side: {}", listed.join(", "))
            }
        }
    }
}

/// Greedy plate calculator for a barbell
#[derive(Clone, Debug, PartialEq)]
pub struct PlateCalculator {
    bar_kg: f64,
    plates_kg: Vec<f64>,
}

impl Default for PlateCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_KG, DEFAULT_PLATES_KG.to_vec())
    }
}

impl PlateCalculator {
    /// Denominations are sorted heaviest first; non-positive ones are ignored
    pub fn new(bar_kg: f64, mut plates_kg: Vec<f64>) -> Self {
        plates_kg.retain(|p| p.is_finite() && *p > 0.0);
        plates_kg.sort_by(|a, b| b.total_cmp(a));
        Self { bar_kg, plates_kg }
    }

    pub fn bar_kg(&self) -> f64 {
        self.bar_kg
    }

    /// Plates per side for a numeric target
    ///
    /// Whatever cannot be made with the smallest plate is dropped, so the
    /// loaded bar may come in slightly under the target.
    pub fn load(&self, target_kg: f64) -> PlateLoad {
        if !target_kg.is_finite() {
            return PlateLoad::Invalid;
        }
        if target_kg < self.bar_kg {
            return PlateLoad::BarOnly;
        }

        let mut remainder = (target_kg - self.bar_kg) / 2.0;
        if let Some(&smallest) = self.plates_kg.last() {
            if remainder / smallest > MAX_PLATES_PER_SIDE as f64 {
                tracing::debug!("{} kg needs more than {} plates per side", target_kg, MAX_PLATES_PER_SIDE);
                return PlateLoad::Invalid;
            }
        }
        let mut side = Vec::new();
        for &plate in &self.plates_kg {
            while remainder >= plate {
                side.push(plate);
                remainder -= plate;
            }
        }

        if side.is_empty() {
            PlateLoad::BarOnly
        } else {
            tracing::trace!("{} kg -> {:?} per side, {} kg dropped", target_kg, side, remainder * 2.0);
            PlateLoad::Side(side)
        }
    }

    /// Plates per side for a typed-in target
    pub fn load_text(&self, target: &str) -> PlateLoad {
        match parse_weight(target) {
            Some(kg) => self.load(kg),
            None => PlateLoad::Invalid,
        }
    }
}

/// Plates per side on a 20 kg bar with the standard plate set
pub fn plate_load(target_weight: &str) -> PlateLoad {
    PlateCalculator::default().load_text(target_weight)
}

/// Estimated one-rep max from typed-in weight and reps
///
/// Returns `0` when either field is not a number.
pub fn estimated_one_rep_max(weight: &str, reps: &str) -> i64 {
    match (parse_weight(weight), parse_reps(reps)) {
        (Some(w), Some(r)) => one_rep_max(w, r),
        _ => 0,
    }
}

/// Epley estimate: `weight * (1 + reps / 30)`, truncated
///
/// A single rep (or fewer) is already a max, so the weight is returned as-is.
/// Out-of-range results saturate at the `i64` bounds.
///
/// Rows written by the older app used `weight * (1 + reps / 30)` directly,
/// so their 1RM column can be one lower (60 x 20 logged as 99, not 100).
/// Existing rows are never recomputed.
pub fn one_rep_max(weight: f64, reps: i64) -> i64 {
    if reps <= 1 {
        return weight.trunc() as i64;
    }
    // Same as weight * (1 + reps/30) without the 1/30 rounding error
    (weight * (30.0 + reps as f64) / 30.0).floor() as i64
}

fn parse_weight(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

fn parse_reps(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}
