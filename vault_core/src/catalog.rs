//! Default catalog of training modes.
//!
//! This module provides the built-in splits, the warm-up and cool-down
//! bookends, and the list of modes that skip them.

use crate::types::*;
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Conditioning, mobility and recovery modes run without warm-up or cool-down
pub const WARMUP_EXEMPT_MODES: [&str; 7] = [
    "Mobility",
    "Mobility Only",
    "Desk Undo",
    "Squat Primer",
    "HIIT",
    "Tabata (4 mins)",
    "EMOM (10 mins)",
];

/// True when `mode` gets the warm-up and cool-down bookends
pub fn has_bookends(mode: &str) -> bool {
    !WARMUP_EXEMPT_MODES.contains(&mode)
}

/// Fixed warm-up prepended to most modes
pub fn warmup_items() -> [ExerciseRecord; 2] {
    [
        ExerciseRecord::new("Arm Circles", "60s")
            .with_cue("Big circles, both directions.")
            .with_category(Category::Warmup),
        ExerciseRecord::new("Band Pulls", "20 reps")
            .with_cue("Squeeze the shoulder blades.")
            .with_category(Category::Warmup),
    ]
}

/// Fixed cool-down appended to most modes
pub fn cooldown_item() -> ExerciseRecord {
    ExerciseRecord::new("Cool Down Walk", "5 mins")
        .with_cue("Bring the heart rate down.")
        .with_category(Category::Cooldown)
}

/// The set of named training modes, in display order
#[derive(Clone, Debug)]
pub struct Catalog {
    pub modes: Vec<Mode>,
}

impl Catalog {
    /// Look up a mode by exact name
    pub fn get(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    /// Mode names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(|m| m.name.as_str())
    }

    /// Modes belonging to one family, in display order
    pub fn family(&self, family: ModeFamily) -> impl Iterator<Item = &Mode> {
        self.modes.iter().filter(move |m| m.family == family)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for mode in &self.modes {
            if mode.name.is_empty() {
                errors.push("Mode has empty name".to_string());
            }
            if !seen.insert(mode.name.as_str()) {
                errors.push(format!("Duplicate mode '{}'", mode.name));
            }
            if mode.slots.is_empty() {
                errors.push(format!("Mode '{}' has no slots", mode.name));
            }

            for (idx, slot) in mode.slots.iter().enumerate() {
                if let ExerciseSlot::Pool(pool) = slot {
                    if pool.members().len() < ExercisePool::MIN_MEMBERS {
                        errors.push(format!(
                            "Mode '{}' slot {} pool has fewer than {} members",
                            mode.name,
                            idx,
                            ExercisePool::MIN_MEMBERS
                        ));
                    }
                }
                for record in slot.candidates() {
                    if record.name.is_empty() {
                        errors.push(format!(
                            "Mode '{}' slot {} has an exercise with empty name",
                            mode.name, idx
                        ));
                    }
                    if record.reps.is_empty() {
                        errors.push(format!(
                            "Mode '{}': exercise '{}' has no rep target",
                            mode.name, record.name
                        ));
                    }
                    if matches!(record.category, Some(Category::Warmup | Category::Cooldown)) {
                        errors.push(format!(
                            "Mode '{}': exercise '{}' uses a bookend category",
                            mode.name, record.name
                        ));
                    }
                }
            }
        }

        for family in [
            ModeFamily::Phat,
            ModeFamily::Specialty,
            ModeFamily::Conditioning,
            ModeFamily::Mobility,
        ] {
            if self.family(family).next().is_none() {
                errors.push(format!("Catalog has no {} modes", family));
            }
        }

        errors
    }
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn fixed(name: &str, category: Option<Category>, reps: &str, cue: Option<&str>) -> ExerciseSlot {
    let mut record = ExerciseRecord::new(name, reps);
    record.category = category;
    record.cue = cue.map(String::from);
    ExerciseSlot::Fixed(record)
}

fn power(name: &str, reps: &str, cue: &str) -> ExerciseSlot {
    fixed(name, Some(Category::Power), reps, Some(cue))
}

fn hyper(name: &str, reps: &str, cue: &str) -> ExerciseSlot {
    fixed(name, Some(Category::Hyper), reps, Some(cue))
}

fn plain(name: &str, reps: &str, cue: &str) -> ExerciseSlot {
    fixed(name, None, reps, Some(cue))
}

fn pool(members: &[(&str, &str)]) -> Result<ExerciseSlot> {
    let records = members
        .iter()
        .map(|(name, reps)| ExerciseRecord::new(*name, *reps))
        .collect();
    Ok(ExerciseSlot::Pool(ExercisePool::new(records)?))
}

fn mode(name: &str, family: ModeFamily, slots: Vec<ExerciseSlot>) -> Mode {
    Mode {
        name: name.into(),
        family,
        slots,
    }
}

fn build_default_catalog_internal() -> Catalog {
    match build_modes() {
        Ok(modes) => Catalog { modes },
        Err(e) => {
            // Only reachable if a built-in pool is edited down to one member
            tracing::error!("Built-in catalog is malformed: {}", e);
            Catalog { modes: Vec::new() }
        }
    }
}

fn build_modes() -> Result<Vec<Mode>> {
    use ModeFamily::*;

    Ok(vec![
        // ====================================================================
        // PHAT split
        // ====================================================================
        mode(
            "Upper Power",
            Phat,
            vec![
                power("Bench Press", "3x5", "Leg Drive."),
                power("Bent Rows", "3x5", "Explosive."),
                power("Overhead Press", "3x6", "Head thru."),
                pool(&[("Weighted Pullups", "3x6"), ("Lat Pulldown", "3x10")])?,
                pool(&[("Skullcrushers", "3x10"), ("Barbell Curl", "3x10")])?,
            ],
        ),
        mode(
            "Lower Power",
            Phat,
            vec![
                power("Squat", "3x5", "Deep."),
                power("Deadlift", "3x5", "Hinge."),
                pool(&[("Leg Press", "3x10"), ("Hack Squat", "3x8")])?,
                pool(&[("Leg Curl", "3x12"), ("Calf Raise", "4x15")])?,
            ],
        ),
        mode(
            "Push Hyper",
            Phat,
            vec![
                hyper("Inc DB Press", "3x10", "Upper chest."),
                hyper("Seat Shoulder", "3x12", "Tension."),
                pool(&[("Cable Fly", "3x15"), ("Lat Raise", "4x15")])?,
                pool(&[("Pushdown", "3x15"), ("Dips", "Failure")])?,
            ],
        ),
        mode(
            "Pull Hyper",
            Phat,
            vec![
                hyper("BB Rows", "4x10", "Volume."),
                hyper("Lat Pulldown", "3x12", "Squeeze."),
                pool(&[("Face Pull", "4x15"), ("Shrugs", "3x15")])?,
                pool(&[("Hammer Curl", "3x12"), ("Preacher Curl", "3x12")])?,
            ],
        ),
        mode(
            "Legs Hyper",
            Phat,
            vec![
                hyper("Front Squat", "3x10", "Quads."),
                hyper("RDL", "3x12", "Stretch."),
                pool(&[("Leg Ext", "3x15"), ("Lunges", "3x20")])?,
            ],
        ),
        // ====================================================================
        // Specialty splits
        // ====================================================================
        mode(
            "Chest Focus",
            Specialty,
            vec![
                plain("Barbell Bench", "4x8", "Heavy."),
                plain("Inc DB Press", "3x10", "Upper."),
                plain("Weighted Dips", "3x10", "Lower."),
                plain("Cable Flys", "3x15", "Iso."),
                plain("Pushups", "2xFail", "Burn."),
            ],
        ),
        mode(
            "Back Focus",
            Specialty,
            vec![
                plain("Deadlift", "3x5", "Mass."),
                plain("Weighted Pullups", "3x8", "Width."),
                plain("T-Bar Row", "3x10", "Thick."),
                plain("Straight Arm Pulldown", "3x15", "Lats."),
            ],
        ),
        mode(
            "Shoulder Focus",
            Specialty,
            vec![
                plain("OHP", "4x8", "Mass."),
                plain("Arnold Press", "3x12", "Rotation."),
                plain("Lat Raises", "5x15", "Width."),
                plain("Face Pulls", "3x15", "Rear."),
            ],
        ),
        mode(
            "Leg Focus",
            Specialty,
            vec![
                plain("Squat", "4x8", "Mass."),
                plain("Leg Press", "3x12", "Load."),
                plain("Lunges", "3x20", "Uni."),
                plain("Leg Curl", "3x15", "Hams."),
            ],
        ),
        mode(
            "Bicep Blaster",
            Specialty,
            vec![
                plain("Barbell Curl", "4x8", "Heavy."),
                plain("Incline Curl", "3x10", "Long head."),
                plain("Hammer Curl", "3x12", "Brachialis."),
                plain("Cable 21s", "2 Sets", "Burn."),
            ],
        ),
        mode(
            "Tricep Torture",
            Specialty,
            vec![
                plain("Close Grip Bench", "4x8", "Mass."),
                plain("Skullcrushers", "3x10", "Medial."),
                plain("Rope Pushdown", "3x15", "Lateral."),
            ],
        ),
        // ====================================================================
        // Conditioning
        // ====================================================================
        mode(
            "HIIT",
            Conditioning,
            vec![
                fixed("Burpees", None, "45s", None),
                fixed("Box Jumps", None, "45s", None),
                fixed("Mtn Climbers", None, "45s", None),
            ],
        ),
        mode(
            "Tabata (4 mins)",
            Conditioning,
            vec![
                plain("Sprint", "20s/10s", "8 Rounds."),
                plain("Kettlebell Swing", "20s/10s", "8 Rounds."),
            ],
        ),
        mode(
            "EMOM (10 mins)",
            Conditioning,
            vec![
                plain("Thrusters", "10/min", "Pace it."),
                plain("Pullups", "5/min", "Strict."),
            ],
        ),
        // ====================================================================
        // Mobility
        // ====================================================================
        mode(
            "Desk Undo",
            Mobility,
            vec![
                plain("Chin Tucks", "20 reps", "Neck."),
                plain("Doorway Stretch", "60s", "Chest."),
                plain("Thoracic Ext", "60s", "Back."),
            ],
        ),
        mode(
            "Squat Primer",
            Mobility,
            vec![
                plain("90/90", "60s", "Hips."),
                plain("Ankle Rocks", "20 reps", "Ankles."),
                plain("Goblet Hold", "60s", "Depth."),
            ],
        ),
        mode(
            "Mobility Only",
            Mobility,
            vec![
                plain("Cat Cow", "60s", "Spine."),
                plain("World Greatest Stretch", "60s", "Full Body."),
                plain("Childs Pose", "60s", "Relax."),
            ],
        ),
    ])
}
