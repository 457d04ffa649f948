//! Difficulty levels and the option/lives table they map to.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Difficulty selected before a session starts.
///
/// | Level  | Options | Lives |
/// |--------|---------|-------|
/// | Easy   | 2       | 5     |
/// | Medium | 4       | 3     |
/// | Hard   | 6       | 2     |
///
/// Parses from the level name (`"easy"`, case-insensitive) or from the
/// numbered labels shown on the settings screen (`"1"`, `"2"`, `"3"`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DifficultyLevel {
    #[strum(to_string = "easy", serialize = "1")]
    Easy,
    #[default]
    #[strum(to_string = "medium", serialize = "2")]
    Medium,
    #[strum(to_string = "hard", serialize = "3")]
    Hard,
}

impl DifficultyLevel {
    /// Number of options shown per round.
    pub const fn option_count(self) -> usize {
        match self {
            Self::Easy => 2,
            Self::Medium => 4,
            Self::Hard => 6,
        }
    }

    /// Lives granted at session start.
    pub const fn starting_lives(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 3,
            Self::Hard => 2,
        }
    }

    /// Hardest level whose option count fits a catalog of `catalog_len` entries.
    ///
    /// Hosts use this to fall back when the catalog is too small for the
    /// requested level.
    pub fn largest_fitting(catalog_len: usize) -> Option<Self> {
        use strum::IntoEnumIterator;

        Self::iter()
            .filter(|level| level.option_count() <= catalog_len)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_levels() {
        assert_eq!(
            (DifficultyLevel::Easy.option_count(), DifficultyLevel::Easy.starting_lives()),
            (2, 5)
        );
        assert_eq!(
            (DifficultyLevel::Medium.option_count(), DifficultyLevel::Medium.starting_lives()),
            (4, 3)
        );
        assert_eq!(
            (DifficultyLevel::Hard.option_count(), DifficultyLevel::Hard.starting_lives()),
            (6, 2)
        );
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("easy".parse::<DifficultyLevel>(), Ok(DifficultyLevel::Easy));
        assert_eq!("HARD".parse::<DifficultyLevel>(), Ok(DifficultyLevel::Hard));
        assert_eq!("2".parse::<DifficultyLevel>(), Ok(DifficultyLevel::Medium));
        assert!("impossible".parse::<DifficultyLevel>().is_err());
        assert_eq!(DifficultyLevel::Hard.to_string(), "hard");
    }

    #[test]
    fn largest_fitting_falls_back() {
        assert_eq!(DifficultyLevel::largest_fitting(10), Some(DifficultyLevel::Hard));
        assert_eq!(DifficultyLevel::largest_fitting(5), Some(DifficultyLevel::Medium));
        assert_eq!(DifficultyLevel::largest_fitting(3), Some(DifficultyLevel::Easy));
        assert_eq!(DifficultyLevel::largest_fitting(1), None);
    }
}
