use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::time::date_key;

use super::tier::{level_for, LevelTier};

/// Points awarded for a single check-in before the multiplier is applied.
pub const BASE_REWARD: u32 = 100;
pub const SOLO_MULTIPLIER: f64 = 1.0;
pub const COOP_MULTIPLIER: f64 = 1.5;

pub const SLOT_COUNT: usize = 3;

const DEFAULT_NAME: &str = "Chihaya Anon";
const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/7.x/avataaars/png?seed=Felix";

/// Part of the day a check-in belongs to. Picked from the wall clock, never by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DaySlot {
    Morning,
    Afternoon,
    Evening,
}

impl DaySlot {
    pub const ALL: [DaySlot; SLOT_COUNT] = [DaySlot::Morning, DaySlot::Afternoon, DaySlot::Evening];

    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DaySlot::Morning
        } else if hour < 18 {
            DaySlot::Afternoon
        } else {
            DaySlot::Evening
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for DaySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaySlot::Morning => write!(f, "morning"),
            DaySlot::Afternoon => write!(f, "afternoon"),
            DaySlot::Evening => write!(f, "evening"),
        }
    }
}

/// Points a check-in is worth under the given multiplier. Flooring happens after the
/// multiplication, so 1.5 yields exactly 150.
pub fn reward_for(multiplier: f64) -> u32 {
    (BASE_REWARD as f64 * multiplier).floor().max(0.) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub slot: DaySlot,
    pub accepted: bool,
    pub points_awarded: u32,
}

/// Everything known about a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLookup {
    pub date: NaiveDate,
    pub note: Option<String>,
    pub checked_in: bool,
}

impl DayLookup {
    /// Text shown for the day: the note when there is one, otherwise the check-in status.
    pub fn describe(&self) -> String {
        match (&self.note, self.checked_in) {
            (Some(note), _) => note.clone(),
            (None, true) => format!("📅 {}\nChecked in, no thought recorded.", date_key(self.date)),
            (None, false) => format!("📅 {}\nNo check-in on this day.", date_key(self.date)),
        }
    }
}

/// Progress of the person using this installation. This is the only record that is ever written
/// to disk, peers are represented by [PeerSummary] which has no way of being saved.
///
/// Field names follow the save files written by earlier builds. Level and tier are derived from
/// points and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LocalProgress {
    pub name: String,
    pub avatar_url: String,
    points: u32,
    daily_check_in_status: [bool; SLOT_COUNT],
    #[serde(with = "date_key_ser")]
    last_check_in_date: Option<NaiveDate>,
    check_in_history: Vec<NaiveDate>,
    daily_thoughts: BTreeMap<NaiveDate, String>,
    #[serde(skip)]
    level: u32,
    #[serde(skip)]
    tier: LevelTier,
}

impl Default for LocalProgress {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            avatar_url: DEFAULT_AVATAR_URL.into(),
            points: 0,
            daily_check_in_status: [false; SLOT_COUNT],
            last_check_in_date: None,
            check_in_history: Vec::new(),
            daily_thoughts: BTreeMap::new(),
            level: 0,
            tier: LevelTier::default(),
        }
    }
}

impl LocalProgress {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            last_check_in_date: Some(today),
            ..Default::default()
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tier(&self) -> LevelTier {
        self.tier
    }

    pub fn title(&self) -> &'static str {
        self.tier.title()
    }

    pub fn title_color(&self) -> &'static str {
        self.tier.title_color()
    }

    pub fn glow_color(&self) -> &'static str {
        self.tier.glow_color()
    }

    pub fn daily_check_in_status(&self) -> [bool; SLOT_COUNT] {
        self.daily_check_in_status
    }

    pub fn is_checked_in(&self, slot: DaySlot) -> bool {
        self.daily_check_in_status[slot.index()]
    }

    pub fn last_check_in_date(&self) -> Option<NaiveDate> {
        self.last_check_in_date
    }

    /// Days with at least one check-in, in the order they happened.
    pub fn check_in_history(&self) -> &[NaiveDate] {
        &self.check_in_history
    }

    pub fn daily_thoughts(&self) -> &BTreeMap<NaiveDate, String> {
        &self.daily_thoughts
    }

    pub fn thought(&self, date: NaiveDate) -> Option<&str> {
        self.daily_thoughts.get(&date).map(String::as_str)
    }

    /// Recalculates level and tier from the current points. Everything that changes points goes
    /// through here.
    pub fn recompute_level(&mut self) {
        self.level = level_for(self.points);
        self.tier = LevelTier::from_level(self.level);
    }

    fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
        self.recompute_level();
    }

    /// Drops repeated history entries, keeping the first occurrence of each day. Returns whether
    /// anything was removed.
    pub fn dedupe_history(&mut self) -> bool {
        let before = self.check_in_history.len();
        let mut seen = BTreeSet::new();
        self.check_in_history.retain(|day| seen.insert(*day));
        before != self.check_in_history.len()
    }

    /// Clears the slot flags when `today` is not the day they were recorded for. Returns whether
    /// anything changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_check_in_date == Some(today) {
            return false;
        }
        self.last_check_in_date = Some(today);
        self.daily_check_in_status = [false; SLOT_COUNT];
        true
    }

    /// Applies a check-in without touching the disk. A slot can only be used once a day.
    pub fn check_in(&mut self, today: NaiveDate, slot: DaySlot, multiplier: f64) -> CheckInOutcome {
        self.roll_over(today);

        if self.is_checked_in(slot) {
            return CheckInOutcome {
                slot,
                accepted: false,
                points_awarded: 0,
            };
        }

        let points_awarded = reward_for(multiplier);
        self.add_points(points_awarded);
        self.daily_check_in_status[slot.index()] = true;
        if !self.check_in_history.contains(&today) {
            self.check_in_history.push(today);
        }

        CheckInOutcome {
            slot,
            accepted: true,
            points_awarded,
        }
    }

    /// Stores the note for `date`, replacing an older one. Blank text is ignored.
    pub fn write_thought(&mut self, date: NaiveDate, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.daily_thoughts.insert(date, text.to_owned());
        true
    }

    pub fn lookup_day(&self, date: NaiveDate) -> DayLookup {
        DayLookup {
            date,
            note: self.thought(date).map(str::to_owned),
            checked_in: self.check_in_history.contains(&date),
        }
    }

    /// Days of the given month that have a check-in, in calendar order.
    pub fn checked_in_days(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        let mut days = self
            .check_in_history
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .copied()
            .collect::<Vec<_>>();
        days.sort();
        days
    }
}

/// Read-only view of somebody else's progress, used for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSummary {
    pub name: String,
    pub points: u32,
    pub avatar_url: String,
}

impl PeerSummary {
    pub fn new(name: impl Into<String>, points: u32, avatar_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points,
            avatar_url: avatar_url.into(),
        }
    }

    pub fn level(&self) -> u32 {
        level_for(self.points)
    }

    pub fn tier(&self) -> LevelTier {
        LevelTier::from_level(self.level())
    }
}

/// The last check-in date is stored as a `YYYY-MM-DD` string, with an empty string standing for
/// "never". Anything unparseable is treated as "never" so that the slots get reset on load.
mod date_key_ser {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::utils::time::{date_key, parse_date_key};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date_key(*date)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().and_then(parse_date_key))
    }
}
