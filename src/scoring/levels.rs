use serde::Serialize;

/// The NTRP level scale. Non-uniform: every step is 0.5 except 6.0 -> 7.0.
pub const LEVELS: [f64; 12] = [
    1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 7.0,
];

/// Highest level on the scale; the starting hard cap.
pub const MAX_LEVEL: f64 = LEVELS[LEVELS.len() - 1];

/// Level used when no answer carries any support.
pub const FALLBACK_LEVEL: f64 = LEVELS[LEVELS.len() / 2];

/// Default triangular spread shared by all questions.
pub const DEFAULT_SPREAD: f64 = 1.0;

/// True if `value` is exactly one of the scale ticks.
pub fn is_scale_level(value: f64) -> bool {
    LEVELS.iter().any(|&l| l == value)
}

/// Triangular membership of `level` in a fuzzy set peaked at `center`.
///
/// 1.0 at the center, falling linearly to 0.0 at `spread` distance and beyond.
pub fn membership(level: f64, center: f64, spread: f64) -> f64 {
    let diff = (level - center).abs();
    if diff >= spread {
        return 0.0;
    }
    1.0 - diff / spread
}

/// Round to the nearest multiple of 0.5, ties away from zero.
///
/// Arithmetic rounding only: 6.4 becomes 6.5 even though 6.5 is not a scale tick.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Six contiguous label bands, each inclusive on its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelBand {
    Beginner,
    Novice,
    Developing,
    Advanced,
    SemiPro,
    Professional,
}

impl LevelBand {
    pub fn for_level(level: f64) -> Self {
        if level <= 1.5 {
            LevelBand::Beginner
        } else if level <= 2.5 {
            LevelBand::Novice
        } else if level <= 3.5 {
            LevelBand::Developing
        } else if level <= 4.5 {
            LevelBand::Advanced
        } else if level <= 5.5 {
            LevelBand::SemiPro
        } else {
            LevelBand::Professional
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LevelBand::Beginner => "Beginner",
            LevelBand::Novice => "Recreational starter",
            LevelBand::Developing => "Developing club player",
            LevelBand::Advanced => "Advanced club player",
            LevelBand::SemiPro => "Semi-pro / elite amateur",
            LevelBand::Professional => "Professional / international",
        }
    }

    /// One-line description of a typical player in this band.
    pub fn description(&self) -> &'static str {
        match self {
            LevelBand::Beginner => {
                "Just starting out: rallies are short and the focus is on making contact and learning the basic strokes."
            }
            LevelBand::Novice => {
                "Can sustain slow rallies and knows where to stand, but stroke production and serve are still unreliable."
            }
            LevelBand::Developing => {
                "Consistent at moderate pace with some directional control; depth, variety and the second serve are still developing."
            }
            LevelBand::Advanced => {
                "Dependable strokes with pace and spin, uses tactics deliberately and is competitive in local league play."
            }
            LevelBand::SemiPro => {
                "Has weapons around which a game is built, varies strategy under pressure and competes at regional or college level."
            }
            LevelBand::Professional => {
                "Trained for high-level tournament play, typically holding a national or international ranking."
            }
        }
    }
}
