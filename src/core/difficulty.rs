//! Difficulty levels and their physics/spawn tuning profiles.

use serde::{Deserialize, Serialize};

/// Difficulty levels, selectable from the menu with 1/2/3.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Immutable bundle of tuning constants for one difficulty.
///
/// Speeds are in pixels per tick, gravity and jump strength in pixels per
/// tick squared (negative jump strength = upward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub name: &'static str,
    pub initial_speed: f64,
    pub max_speed: f64,
    pub speed_increment: f64,
    pub min_obstacle_gap: u32,
    pub gravity: f64,
    pub jump_strength: f64,
}

const EASY: DifficultyProfile = DifficultyProfile {
    name: "Easy",
    initial_speed: 7.0,
    max_speed: 12.0,
    speed_increment: 0.0008,
    min_obstacle_gap: 90,
    gravity: 0.7,
    jump_strength: -16.0,
};

const NORMAL: DifficultyProfile = DifficultyProfile {
    name: "Normal",
    initial_speed: 9.0,
    max_speed: 16.0,
    speed_increment: 0.0012,
    min_obstacle_gap: 70,
    gravity: 0.85,
    jump_strength: -17.0,
};

const HARD: DifficultyProfile = DifficultyProfile {
    name: "Hard",
    initial_speed: 12.0,
    max_speed: 22.0,
    speed_increment: 0.002,
    min_obstacle_gap: 50,
    gravity: 1.0,
    jump_strength: -18.0,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Menu index (0-based). Out-of-range indices fall back to Normal.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Normal)
    }

    /// Parse a CLI/config name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Storage key used in the high-score file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Normal => "NORMAL",
            Self::Hard => "HARD",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Self::Easy => EASY,
            Self::Normal => NORMAL,
            Self::Hard => HARD,
        }
    }
}

impl DifficultyProfile {
    /// Speed for a given score, clamped to `[initial_speed, max_speed]`.
    pub fn speed_for_score(&self, score: u64) -> f64 {
        (self.initial_speed + score as f64 * self.speed_increment)
            .clamp(self.initial_speed, self.max_speed)
    }

    /// How far the current speed has ramped, 0-100.
    pub fn speed_percent(&self, speed: f64) -> u32 {
        let span = self.max_speed - self.initial_speed;
        if span <= 0.0 {
            return 100;
        }
        (((speed - self.initial_speed) / span) * 100.0).clamp(0.0, 100.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_have_ordered_speed_bounds() {
        for d in Difficulty::ALL {
            let p = d.profile();
            assert!(p.initial_speed <= p.max_speed, "{} speed bounds", p.name);
            assert!(p.jump_strength < 0.0);
            assert!(p.gravity > 0.0);
        }
    }

    #[test]
    fn test_profile_values() {
        let p = Difficulty::Hard.profile();
        assert!((p.initial_speed - 12.0).abs() < f64::EPSILON);
        assert!((p.max_speed - 22.0).abs() < f64::EPSILON);
        assert!((p.gravity - 1.0).abs() < f64::EPSILON);
        assert!((p.jump_strength - (-18.0)).abs() < f64::EPSILON);
        assert_eq!(p.min_obstacle_gap, 50);

        let p = Difficulty::Easy.profile();
        assert!((p.speed_increment - 0.0008).abs() < f64::EPSILON);
        assert_eq!(p.min_obstacle_gap, 90);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(1), Difficulty::Normal);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_index(99), Difficulty::Normal);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Difficulty::from_name("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_name("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name("nightmare"), None);
    }

    #[test]
    fn test_speed_for_score_is_clamped() {
        let p = Difficulty::Normal.profile();
        assert!((p.speed_for_score(0) - p.initial_speed).abs() < f64::EPSILON);
        assert!((p.speed_for_score(1000) - 10.2).abs() < 1e-9);
        assert!((p.speed_for_score(10_000_000) - p.max_speed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_percent() {
        let p = Difficulty::Easy.profile();
        assert_eq!(p.speed_percent(p.initial_speed), 0);
        assert_eq!(p.speed_percent(9.5), 50);
        assert_eq!(p.speed_percent(p.max_speed), 100);
    }

    #[test]
    fn test_serializes_as_uppercase_key() {
        let json = serde_json::to_string(&Difficulty::Normal).unwrap();
        assert_eq!(json, "\"NORMAL\"");
    }
}
