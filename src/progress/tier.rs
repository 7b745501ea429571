use std::fmt::Display;

/// Amount of points needed to gain a single level.
pub const POINTS_PER_LEVEL: u32 = 100;

pub fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL
}

/// Named band of levels. Bands are contiguous and together cover every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LevelTier {
    #[default]
    Newcomer,
    Accomplished,
    Fluent,
    Masterful,
    Legend,
}

impl LevelTier {
    pub const ALL: [LevelTier; 5] = [
        LevelTier::Newcomer,
        LevelTier::Accomplished,
        LevelTier::Fluent,
        LevelTier::Masterful,
        LevelTier::Legend,
    ];

    pub fn from_level(level: u32) -> Self {
        match level {
            0..10 => LevelTier::Newcomer,
            10..30 => LevelTier::Accomplished,
            30..60 => LevelTier::Fluent,
            60..90 => LevelTier::Masterful,
            _ => LevelTier::Legend,
        }
    }

    /// First level that belongs to the band.
    pub fn min_level(self) -> u32 {
        match self {
            LevelTier::Newcomer => 0,
            LevelTier::Accomplished => 10,
            LevelTier::Fluent => 30,
            LevelTier::Masterful => 60,
            LevelTier::Legend => 90,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LevelTier::Newcomer => "🦌 Newbie",
            LevelTier::Accomplished => "Making Progress",
            LevelTier::Fluent => "Well Versed",
            LevelTier::Masterful => "Masterful",
            LevelTier::Legend => "🦌 Legend",
        }
    }

    /// `#RRGGBB` colour of the title text.
    pub fn title_color(self) -> &'static str {
        match self {
            LevelTier::Newcomer => "#E0E0E0",
            LevelTier::Accomplished => "#66FFCC",
            LevelTier::Fluent => "#33CCFF",
            LevelTier::Masterful => "#CC66FF",
            LevelTier::Legend => "#FFD700",
        }
    }

    /// `#AARRGGBB` colour of the glow drawn behind the title.
    pub fn glow_color(self) -> &'static str {
        match self {
            LevelTier::Newcomer => "#40FFFFFF",
            LevelTier::Accomplished => "#4066FFCC",
            LevelTier::Fluent => "#4033CCFF",
            LevelTier::Masterful => "#40CC66FF",
            LevelTier::Legend => "#60FFD700",
        }
    }
}

impl Display for LevelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{level_for, LevelTier};

    #[test]
    fn test_level_is_floor_of_hundreds() {
        assert_eq!(level_for(0), 0);
        assert_eq!(level_for(99), 0);
        assert_eq!(level_for(100), 1);
        assert_eq!(level_for(150), 1);
        assert_eq!(level_for(8500), 85);
        assert_eq!(level_for(u32::MAX), u32::MAX / 100);
    }

    #[test]
    fn test_band_boundaries() {
        let expected = [
            (0, LevelTier::Newcomer),
            (9, LevelTier::Newcomer),
            (10, LevelTier::Accomplished),
            (29, LevelTier::Accomplished),
            (30, LevelTier::Fluent),
            (59, LevelTier::Fluent),
            (60, LevelTier::Masterful),
            (89, LevelTier::Masterful),
            (90, LevelTier::Legend),
            (u32::MAX, LevelTier::Legend),
        ];
        for (level, tier) in expected {
            assert_eq!(LevelTier::from_level(level), tier, "level {level}");
        }
    }

    #[test]
    fn test_bands_are_contiguous() {
        // Each band starts right where the previous one ends.
        for pair in LevelTier::ALL.windows(2) {
            let start = pair[1].min_level();
            assert_eq!(LevelTier::from_level(start - 1), pair[0]);
            assert_eq!(LevelTier::from_level(start), pair[1]);
        }
        assert_eq!(LevelTier::from_level(0), LevelTier::ALL[0]);
    }

    #[test]
    fn test_every_band_has_distinct_colours() {
        for tier in LevelTier::ALL {
            assert_eq!(tier.title_color().len(), 7);
            assert_eq!(tier.glow_color().len(), 9);
        }
        let titles = LevelTier::ALL
            .map(|t| t.title())
            .into_iter()
            .collect::<BTreeSet<_>>();
        assert_eq!(titles.len(), LevelTier::ALL.len());
    }
}
