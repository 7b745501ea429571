use ansi_term::Colour;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use now::DateTimeNow;

use crate::{
    progress::{
        entities::{DaySlot, LocalProgress},
        tier::LevelTier,
    },
    session::Standing,
    utils::time::date_key,
};

/// Parses `#RRGGBB` or `#AARRGGBB`. Alpha is dropped since terminals can't blend.
pub fn hex_colour(code: &str) -> Option<Colour> {
    let hex = code.strip_prefix('#')?;
    let rgb = match hex.len() {
        6 => hex,
        8 => hex.get(2..)?,
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(rgb.get(i..i + 2)?, 16).ok();
    Some(Colour::RGB(channel(0)?, channel(2)?, channel(4)?))
}

fn paint_title(tier: LevelTier) -> String {
    match hex_colour(tier.title_color()) {
        Some(colour) => colour.bold().paint(tier.title()).to_string(),
        None => tier.title().to_string(),
    }
}

/// Slot flags for today. The slot a check-in would land in right now is marked with `>`.
pub fn render_status(
    progress: &LocalProgress,
    today: NaiveDate,
    current: DaySlot,
    coop: bool,
    multiplier: f64,
) -> String {
    let slots = DaySlot::ALL
        .iter()
        .map(|slot| {
            let active = if *slot == current { ">" } else { "" };
            let mark = if progress.is_checked_in(*slot) { '✓' } else { '·' };
            format!("{active}{slot} {mark}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    let mode = if coop { "coop" } else { "solo" };

    let mut lines = vec![
        format!(
            "{}  Lv.{}  {}",
            progress.name,
            progress.level(),
            paint_title(progress.tier())
        ),
        format!("Points: {}", progress.points()),
        format!("Today {}: {slots}", date_key(today)),
        format!("Mode: {mode} (x{multiplier})"),
    ];
    if let Some(thought) = progress.thought(today) {
        lines.push(format!("Thought: {thought}"));
    }
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Month grid starting on Monday. `✓` marks a check-in, `*` a stored thought.
pub fn render_calendar(progress: &LocalProgress, month: DateTime<Local>) -> String {
    let first = month.beginning_of_month().date_naive();
    let last = month.end_of_month().date_naive();
    let checked = progress.checked_in_days(first.year(), first.month());

    let padding = first.weekday().num_days_from_monday() as usize;
    let cells = std::iter::repeat(String::from("    "))
        .take(padding)
        .chain(first.iter_days().take_while(|d| *d <= last).map(|day| {
            let check = if checked.contains(&day) { '✓' } else { ' ' };
            let note = if progress.thought(day).is_some() { '*' } else { ' ' };
            format!("{:>2}{check}{note}", day.day())
        }))
        .collect::<Vec<_>>();

    let weeks = cells
        .chunks(7)
        .map(|week| week.join(" ").trim_end().to_string() + "\n")
        .collect::<String>();

    format!(
        "{}\nMo   Tu   We   Th   Fr   Sa   Su\n{weeks}{} check-ins this month. ✓ checked in, * thought\n",
        first.format("%B %Y"),
        checked.len()
    )
}

pub fn render_leaderboard(standings: &[Standing<'_>]) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(place, standing)| {
            let you = if matches!(standing, Standing::Local(_)) {
                " (you)"
            } else {
                ""
            };
            format!(
                "{:>2}. {}{you}\t{}\tLv.{}\t{}\n",
                place + 1,
                standing.name(),
                standing.points(),
                standing.level(),
                paint_title(standing.tier()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ansi_term::Colour;
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{hex_colour, render_calendar, render_leaderboard, render_status};
    use crate::{
        progress::entities::{DaySlot, LocalProgress, PeerSummary, SOLO_MULTIPLIER},
        session::Standing,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_hex_colour() {
        assert_eq!(hex_colour("#FFD700"), Some(Colour::RGB(255, 215, 0)));
        assert_eq!(hex_colour("#60FFD700"), Some(Colour::RGB(255, 215, 0)));
        assert_eq!(hex_colour("FFD700"), None);
        assert_eq!(hex_colour("#FFD70"), None);
        assert_eq!(hex_colour("#GGD700"), None);
    }

    #[test]
    fn test_calendar_marks_days() {
        let mut progress = LocalProgress::new(date(1));
        progress.check_in(date(3), DaySlot::Morning, SOLO_MULTIPLIER);
        progress.check_in(date(10), DaySlot::Morning, SOLO_MULTIPLIER);
        progress.write_thought(date(10), "note");
        progress.write_thought(date(11), "another");

        let calendar = render_calendar(
            &progress,
            Local.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap(),
        );
        let lines = calendar.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "March 2025");
        // 1 March 2025 is a Saturday.
        assert_eq!(lines[2], "                          1    2");
        assert_eq!(lines[3], " 3✓   4    5    6    7    8    9");
        assert!(lines[4].starts_with("10✓* 11 *"));
        assert!(calendar.contains("31"));
        assert!(calendar.ends_with("2 check-ins this month. ✓ checked in, * thought\n"));
    }

    #[test]
    fn test_status_lists_slots_and_thought() {
        let mut progress = LocalProgress::new(date(15));
        progress.check_in(date(15), DaySlot::Afternoon, SOLO_MULTIPLIER);
        progress.write_thought(date(15), "fine");

        let status = render_status(&progress, date(15), DaySlot::Evening, false, SOLO_MULTIPLIER);

        assert!(status.contains("Points: 100"));
        assert!(status.contains("Today 2025-03-15: morning ·  afternoon ✓  >evening ·"));
        assert!(status.contains("Mode: solo (x1)"));
        assert!(status.contains("Thought: fine"));
        assert!(status.ends_with("Thought: fine\n"));
    }

    #[test]
    fn test_status_without_thought() {
        let progress = LocalProgress::new(date(15));

        let status = render_status(&progress, date(15), DaySlot::Morning, true, 1.5);
        let lines = status.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Today 2025-03-15: >morning ·  afternoon ·  evening ·");
        assert_eq!(lines[3], "Mode: coop (x1.5)");
    }

    #[test]
    fn test_calendar_of_month_starting_on_monday() {
        let progress = LocalProgress::new(date(1));

        // 1 September 2025 is a Monday, the month ends on a Tuesday.
        let calendar = render_calendar(
            &progress,
            Local.with_ymd_and_hms(2025, 9, 10, 12, 0, 0).unwrap(),
        );
        let lines = calendar.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "September 2025");
        assert_eq!(lines[2], " 1    2    3    4    5    6    7");
        assert_eq!(lines[6], "29   30");
        assert_eq!(lines[7], "0 check-ins this month. ✓ checked in, * thought");
    }

    #[test]
    fn test_leaderboard_marks_local_user() {
        let progress = LocalProgress::new(date(15));
        let peer = PeerSummary::new("friend", 500, "avatar");

        let board = render_leaderboard(&[Standing::Peer(&peer), Standing::Local(&progress)]);
        let lines = board.lines().collect::<Vec<_>>();

        assert!(lines[0].starts_with(" 1. friend\t500\tLv.5"));
        assert!(lines[1].starts_with(&format!(" 2. {} (you)\t0\tLv.0", progress.name)));
    }
}
