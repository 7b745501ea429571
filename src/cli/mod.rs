pub mod day;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use day::{parse_day, DateStyle};
use output::{render_calendar, render_leaderboard, render_status};
use tracing::{debug, level_filters::LevelFilter, warn};

use crate::{
    progress::store::{JsonFileStorage, ProgressStore},
    session::{peers::StaticPeers, Session},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{application_default_path, create_application_dir},
        logging::{enable_logging, log_file_appender},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Luleme", version, long_about = None)]
#[command(about = "Check in up to three times a day, level up and keep a journal", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default saves into $XDG_DATA_HOME or $HOME/.local/share"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show points, level and today's check-ins")]
    Status,
    #[command(about = "Check in for the current part of the day")]
    CheckIn {
        #[arg(long, help = "Check in together with a friend for x1.5 points")]
        coop: bool,
    },
    #[command(about = "Save today's thought. Replaces the one already saved")]
    Thought {
        #[arg(required = true, num_args = 1.., help = "Text of the thought")]
        text: Vec<String>,
    },
    #[command(about = "Show the thought or check-in status of a day")]
    Day {
        #[arg(help = "Day to show. Examples are \"yesterday\", \"2025-03-15\", \"15/03/2025\"")]
        date: String,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
    },
    #[command(about = "Show a month with check-in days marked")]
    Calendar {
        #[arg(long, help = "Any day of the month to show. Defaults to the current month")]
        month: Option<String>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
    },
    #[command(about = "Compare points with friends")]
    Peers,
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args.dir.map_or_else(application_default_path, Ok)?;
    let dir_result = create_application_dir(&app_dir);

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let appender = log_file_appender(&app_dir)
        .inspect_err(|e| eprintln!("Logging to stderr only, log files are unavailable: {e:?}"))
        .ok();
    enable_logging(appender, logging_level, args.log);

    // Progress still works in memory when the directory is unusable, saves just get skipped.
    if let Err(e) = dir_result {
        warn!("Progress won't be saved this session: {e:?}");
    }

    let mut session = open_session(&app_dir, Box::new(DefaultClock));

    match args.commands.unwrap_or(Commands::Status) {
        Commands::Status => {
            print!(
                "{}",
                render_status(
                    session.progress(),
                    session.today(),
                    session.current_slot(),
                    session.is_coop(),
                    session.multiplier()
                )
            );
        }
        Commands::CheckIn { coop } => {
            if coop {
                session.toggle_coop();
                println!("{}", session.status());
            }
            session.check_in();
            println!("{}", session.status());
            print!(
                "{}",
                render_status(
                    session.progress(),
                    session.today(),
                    session.current_slot(),
                    session.is_coop(),
                    session.multiplier()
                )
            );
        }
        Commands::Thought { text } => {
            session.set_draft(text.join(" "));
            session.save_thought();
            println!("{}", session.status());
        }
        Commands::Day { date, date_style } => {
            let date = parse_day(&date, date_style, DefaultClock.now())?;
            session.select_day(date);
            println!("{}", session.selected_day_text());
        }
        Commands::Calendar { month, date_style } => {
            let month = match month {
                Some(month) => parse_day(&month, date_style, DefaultClock.now())?
                    .and_hms_opt(12, 0, 0)
                    .and_then(|v| v.and_local_timezone(Local).earliest())
                    .unwrap_or_else(|| DefaultClock.now()),
                None => DefaultClock.now(),
            };
            print!("{}", render_calendar(session.progress(), month));
        }
        Commands::Peers => {
            print!("{}", render_leaderboard(&session.leaderboard()));
        }
    }
    Ok(())
}

fn open_session(app_dir: &Path, clock: Box<dyn Clock>) -> Session<JsonFileStorage> {
    let store = ProgressStore::new(JsonFileStorage::in_dir(app_dir));
    let mut session = Session::new(store, clock, &StaticPeers);
    session.subscribe(|event| debug!("Session event {event:?}"));
    session
}
