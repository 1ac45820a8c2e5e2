//! Playlist generation.
//!
//! Resolves a training mode into the concrete list of exercises for one
//! session:
//! - Warm-up and cool-down bookends unless the mode is exempt
//! - Pool slots drawn uniformly at random on every call
//! - Each exercise annotated with its most recent logged set

use crate::catalog::{cooldown_item, has_bookends, warmup_items, Catalog};
use crate::history::SetLog;
use crate::{Category, ExerciseRecord, HistorySummary, PlaylistItem};
use rand::Rng;

/// Cue shown when a catalog entry has none
pub const DEFAULT_CUE: &str = "Form focus.";

/// Switches for playlist generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Append the cool-down item to non-exempt modes
    pub cool_down: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { cool_down: true }
    }
}

/// Generate a playlist using the thread-local random source
///
/// Unknown modes are not an error: the result holds only the bookends.
pub fn generate<L: SetLog + ?Sized>(
    catalog: &Catalog,
    log: &L,
    mode: &str,
    options: &GenerateOptions,
) -> Vec<PlaylistItem> {
    generate_with_rng(catalog, log, mode, options, &mut rand::thread_rng())
}

/// Generate a playlist drawing pool slots from `rng`
pub fn generate_with_rng<L, R>(
    catalog: &Catalog,
    log: &L,
    mode: &str,
    options: &GenerateOptions,
    rng: &mut R,
) -> Vec<PlaylistItem>
where
    L: SetLog + ?Sized,
    R: Rng + ?Sized,
{
    let bookends = has_bookends(mode);
    let mut playlist = Vec::new();

    if bookends {
        playlist.extend(warmup_items().iter().map(bookend));
    }

    match catalog.get(mode) {
        Some(definition) => {
            for slot in &definition.slots {
                let record = slot.resolve(rng);
                let history = lookup_history(log, &record.name);
                playlist.push(annotate(record, history));
            }
        }
        None if bookends => {
            tracing::warn!("Unknown mode '{}', generating bookends only", mode);
        }
        None => {
            tracing::warn!("Unknown mode '{}', nothing to generate", mode);
        }
    }

    if bookends && options.cool_down {
        playlist.push(bookend(&cooldown_item()));
    }

    tracing::info!("Generated {} items for mode '{}'", playlist.len(), mode);
    playlist
}

/// History lookup that degrades to `New` when the log cannot be read
fn lookup_history<L: SetLog + ?Sized>(log: &L, exercise: &str) -> HistorySummary {
    match log.most_recent(exercise) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("History lookup for '{}' failed: {}", exercise, e);
            HistorySummary::New
        }
    }
}

fn annotate(record: &ExerciseRecord, history: HistorySummary) -> PlaylistItem {
    PlaylistItem {
        name: record.name.clone(),
        reps: record.reps.clone(),
        cue: record.cue.clone().unwrap_or_else(|| DEFAULT_CUE.to_string()),
        category: record.category.unwrap_or(Category::Workout),
        history,
        image: record.image.clone(),
    }
}

fn bookend(record: &ExerciseRecord) -> PlaylistItem {
    annotate(record, HistorySummary::NotTracked)
}
