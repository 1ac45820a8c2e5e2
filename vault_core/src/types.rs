//! Core domain types for the Iron Vault system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise records and the slots that hold them
//! - Training modes and their families
//! - Playlist items handed to the front end
//! - Set records persisted to the log

use crate::{Error, Result};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Exercise Types
// ============================================================================

/// Category tag shown as the phase of a playlist item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Warmup,
    Power,
    Hyper,
    Workout,
    Cooldown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Warmup => "WARMUP",
            Category::Power => "POWER",
            Category::Hyper => "HYPER",
            Category::Workout => "WORKOUT",
            Category::Cooldown => "COOLDOWN",
        };
        f.write_str(label)
    }
}

/// A single exercise as written in the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub reps: String,
    pub cue: Option<String>,
    pub category: Option<Category>,
    pub image: Option<String>,
}

impl ExerciseRecord {
    /// Record with only a name and rep target
    pub fn new(name: impl Into<String>, reps: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reps: reps.into(),
            cue: None,
            category: None,
            image: None,
        }
    }

    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = Some(cue.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Random-choice slot holding two or more exercises
#[derive(Clone, Debug, PartialEq)]
pub struct ExercisePool {
    members: Vec<ExerciseRecord>,
}

impl ExercisePool {
    /// Minimum number of members a pool must offer
    pub const MIN_MEMBERS: usize = 2;

    pub fn new(members: Vec<ExerciseRecord>) -> Result<Self> {
        if members.len() < Self::MIN_MEMBERS {
            return Err(Error::CatalogValidation(format!(
                "pool needs at least {} members, got {}",
                Self::MIN_MEMBERS,
                members.len()
            )));
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[ExerciseRecord] {
        &self.members
    }

    /// Pick one member uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &ExerciseRecord {
        // `new` guarantees at least two members
        &self.members[rng.gen_range(0..self.members.len())]
    }
}

/// One position in a mode's plan
#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseSlot {
    Fixed(ExerciseRecord),
    Pool(ExercisePool),
}

impl ExerciseSlot {
    /// Resolve the slot to a concrete exercise
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> &ExerciseRecord {
        match self {
            ExerciseSlot::Fixed(record) => record,
            ExerciseSlot::Pool(pool) => pool.choose(rng),
        }
    }

    /// Every exercise this slot can resolve to
    pub fn candidates(&self) -> &[ExerciseRecord] {
        match self {
            ExerciseSlot::Fixed(record) => std::slice::from_ref(record),
            ExerciseSlot::Pool(pool) => pool.members(),
        }
    }
}

// ============================================================================
// Mode Types
// ============================================================================

/// Grouping used when listing modes
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModeFamily {
    Phat,
    Specialty,
    Conditioning,
    Mobility,
}

impl fmt::Display for ModeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModeFamily::Phat => "PHAT SYSTEM",
            ModeFamily::Specialty => "SPECIALTY",
            ModeFamily::Conditioning => "CONDITIONING",
            ModeFamily::Mobility => "MOBILITY",
        };
        f.write_str(label)
    }
}

/// A named training session template
#[derive(Clone, Debug)]
pub struct Mode {
    pub name: String,
    pub family: ModeFamily,
    pub slots: Vec<ExerciseSlot>,
}

// ============================================================================
// Playlist Types
// ============================================================================

/// Prior-performance context attached to a playlist item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistorySummary {
    /// Most recent logged set for this exercise
    Last { weight: String, reps: String },
    /// Never logged
    New,
    /// Warm-up and cool-down items are not logged against history
    NotTracked,
}

impl fmt::Display for HistorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistorySummary::Last { weight, reps } => write!(f, "last: {}kg x {}", weight, reps),
            HistorySummary::New => f.write_str("new"),
            HistorySummary::NotTracked => f.write_str("-"),
        }
    }
}

impl Serialize for HistorySummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolved, history-annotated exercise for one session
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlaylistItem {
    pub name: String,
    pub reps: String,
    pub cue: String,
    pub category: Category,
    pub history: HistorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ============================================================================
// Log Types
// ============================================================================

/// One completed set as persisted to the log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Exercise")]
    pub exercise: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Reps")]
    pub reps: String,
    #[serde(rename = "1RM")]
    pub one_rep_max: i64,
}

impl SetRecord {
    /// Summary shown next to this exercise in later playlists
    pub fn summary(&self) -> HistorySummary {
        HistorySummary::Last {
            weight: self.weight.clone(),
            reps: self.reps.clone(),
        }
    }

    /// weight x reps, when both fields are numeric
    pub fn volume(&self) -> Option<f64> {
        let weight: f64 = self.weight.trim().parse().ok()?;
        let reps: f64 = self.reps.trim().parse().ok()?;
        Some(weight * reps).filter(|v| v.is_finite())
    }
}
