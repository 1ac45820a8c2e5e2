//! Built-in training guide.
//!
//! Eight short chapters shown alongside the workouts: programming, warm-up,
//! lift mechanics, overload, recovery, fatigue, equipment and injuries.

use serde::Serialize;

/// One chapter of the guide
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Chapter {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: &'static str,
}

const CHAPTERS: [Chapter; 8] = [
    Chapter {
        title: "1. The Iron Philosophy",
        subtitle: "POWER HYPERTROPHY ADAPTIVE TRAINING",
        body: "The 'Hybrid Athlete' needs Strength and Size. PHAT combines them.\n\n\
• Days 1-2: Power (3-5 Reps). Builds density.\n\
• Days 4-6: Hypertrophy (8-15 Reps). Builds size.\n\n\
Heavy lifting builds the engine. Volume builds the fuel tank.",
    },
    Chapter {
        title: "2. The RAMP Warmup",
        subtitle: "STOP STRETCHING COLD MUSCLES",
        body: "Static stretching reduces power. Use RAMP:\n\n\
• R (Raise): Sweat before you lift.\n\
• A (Activate): Glute bridges, Band pulls.\n\
• M (Mobilize): Dynamic arm circles.\n\
• P (Potentiate): Warmup sets (Bar -> 50% -> 70% -> Work).",
    },
    Chapter {
        title: "3. Mechanics: The Big 3",
        subtitle: "TECHNICAL MASTERY",
        body: "SQUAT: Tripod foot. Break the bar across traps. Hip crease below knee.\n\n\
BENCH: Retract scapula. Leg drive backward. Bar path is a 'J' curve.\n\n\
DEADLIFT: Pull slack out of bar until it clicks. Push the earth away.",
    },
    Chapter {
        title: "4. Progressive Overload",
        subtitle: "THE LAW OF GROWTH",
        body: "You must do more than last time.\n\n\
1. Intensity: +2.5kg (The King).\n\
2. Volume: +1 Rep.\n\
3. Density: Less rest.\n\
4. Technique: Slower reps.\n\n\
If you aren't tracking, you're guessing.",
    },
    Chapter {
        title: "5. Nutrition & Recovery",
        subtitle: "FUEL & SLEEP",
        body: "CALORIES: Growth = Surplus (+300). Cutting = Deficit (-500).\n\n\
PROTEIN: 1g per lb of bodyweight.\n\n\
SLEEP: 7-9 hours. This is non-negotiable for testosterone production.",
    },
    Chapter {
        title: "6. CNS Fatigue",
        subtitle: "MANAGE THE SYSTEM",
        body: "Power days tax the Central Nervous System.\n\n\
SIGNS OF FATIGUE:\n\
- Weak grip strength.\n\
- Waking up tired.\n\n\
DELOAD: Every 6-8 weeks, reduce volume by 50%.",
    },
    Chapter {
        title: "7. Equipment Guide",
        subtitle: "CHOOSE YOUR WEAPON",
        body: "BARBELLS: Main lifts (1-6 reps). Max load.\n\n\
DUMBBELLS: Secondary lifts. Fixes imbalances.\n\n\
CABLES: Constant tension. Isolation.\n\n\
MACHINES: Failure training safely.",
    },
    Chapter {
        title: "8. Injury Protocol",
        subtitle: "GOOD PAIN VS BAD PAIN",
        body: "DOMS (Good): Dull ache in muscle belly. 24h later.\n\n\
INJURY (Bad): Sharp, shooting pain in joint. Instant.\n\n\
THE FIX:\n\
1. Check Form.\n\
2. Check Mobility.\n\
3. STOP immediately.",
    },
];

/// All chapters in reading order
pub fn chapters() -> &'static [Chapter] {
    &CHAPTERS
}
