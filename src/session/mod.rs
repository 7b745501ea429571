//! Mediates user actions against the [ProgressStore]. Every action runs to completion before
//! returning and leaves a status text behind for whatever is rendering the session.

pub mod peers;

use chrono::{NaiveDate, Timelike};
use peers::PeerSource;
use tracing::{debug, warn};

use crate::{
    progress::{
        entities::{
            CheckInOutcome, DayLookup, DaySlot, LocalProgress, PeerSummary, COOP_MULTIPLIER,
            SOLO_MULTIPLIER,
        },
        store::{ProgressStorage, ProgressStore},
        tier::LevelTier,
    },
    utils::clock::Clock,
};

const READY_STATUS: &str = "Ready";
const SELECTED_DAY_PLACEHOLDER: &str = "Pick a day to see its thought...";

/// Tells listeners which part of the session changed. Listeners read the new values back from
/// the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ProgressChanged,
    StatusChanged,
    SelectedDayChanged,
    CoopChanged,
}

/// Entry of the leaderboard.
#[derive(Debug, Clone, Copy)]
pub enum Standing<'a> {
    Local(&'a LocalProgress),
    Peer(&'a PeerSummary),
}

impl Standing<'_> {
    pub fn name(&self) -> &str {
        match self {
            Standing::Local(progress) => &progress.name,
            Standing::Peer(peer) => &peer.name,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Standing::Local(progress) => progress.points(),
            Standing::Peer(peer) => peer.points,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Standing::Local(progress) => progress.level(),
            Standing::Peer(peer) => peer.level(),
        }
    }

    pub fn tier(&self) -> LevelTier {
        match self {
            Standing::Local(progress) => progress.tier(),
            Standing::Peer(peer) => peer.tier(),
        }
    }
}

pub struct Session<S: ProgressStorage> {
    store: ProgressStore<S>,
    clock: Box<dyn Clock>,
    progress: LocalProgress,
    peers: Vec<PeerSummary>,
    draft: String,
    coop: bool,
    status: String,
    selected_day: String,
    listeners: Vec<Box<dyn FnMut(SessionEvent)>>,
}

impl<S: ProgressStorage> Session<S> {
    /// Loads the progress and pre-fills the draft with today's thought when there is one.
    pub fn new(store: ProgressStore<S>, clock: Box<dyn Clock>, peer_source: &dyn PeerSource) -> Self {
        let today = clock.now().date_naive();
        let progress = store.load(today);
        let draft = progress.thought(today).unwrap_or_default().to_owned();
        let peers = peer_source.peers().unwrap_or_else(|e| {
            warn!("Failed to get peers: {e:?}");
            Vec::new()
        });

        Self {
            store,
            clock,
            progress,
            peers,
            draft,
            coop: false,
            status: READY_STATUS.into(),
            selected_day: SELECTED_DAY_PLACEHOLDER.into(),
            listeners: Vec::new(),
        }
    }

    pub fn progress(&self) -> &LocalProgress {
        &self.progress
    }

    pub fn peers(&self) -> &[PeerSummary] {
        &self.peers
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_coop(&self) -> bool {
        self.coop
    }

    pub fn multiplier(&self) -> f64 {
        if self.coop {
            COOP_MULTIPLIER
        } else {
            SOLO_MULTIPLIER
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected_day_text(&self) -> &str {
        &self.selected_day
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Slot a check-in would land in right now.
    pub fn current_slot(&self) -> DaySlot {
        DaySlot::from_hour(self.clock.now().hour())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(SessionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn check_in(&mut self) -> CheckInOutcome {
        let now = self.clock.now();
        let slot = DaySlot::from_hour(now.hour());
        let multiplier = self.multiplier();
        let outcome =
            self.store
                .record_check_in(&mut self.progress, now.date_naive(), slot, multiplier);

        if outcome.accepted {
            self.set_status(format!("Checked in +{}", outcome.points_awarded));
            self.notify(SessionEvent::ProgressChanged);
        } else {
            self.set_status(format!("Already checked in for the {slot}"));
        }
        outcome
    }

    /// Stores the draft as today's thought. Returns false when the draft is blank.
    pub fn save_thought(&mut self) -> bool {
        let today = self.today();
        if !self
            .store
            .record_thought(&mut self.progress, today, &self.draft)
        {
            self.set_status("Nothing to save");
            return false;
        }

        self.set_status("Thought saved");
        self.selected_day = self.draft.clone();
        self.notify(SessionEvent::SelectedDayChanged);
        self.notify(SessionEvent::ProgressChanged);
        true
    }

    /// Coop mode only lives in the session, nothing is saved.
    pub fn toggle_coop(&mut self) -> bool {
        self.coop = !self.coop;
        debug!("Coop mode set to {}", self.coop);
        self.notify(SessionEvent::CoopChanged);
        if self.coop {
            self.set_status(format!("Coop mode on x{COOP_MULTIPLIER}"));
        } else {
            self.set_status("Solo mode");
        }
        self.coop
    }

    pub fn select_day(&mut self, date: NaiveDate) -> DayLookup {
        let lookup = self.store.lookup_day(&self.progress, date);
        self.selected_day = lookup.describe();
        self.notify(SessionEvent::SelectedDayChanged);
        lookup
    }

    /// Peers and the local user ordered by points, highest first.
    pub fn leaderboard(&self) -> Vec<Standing<'_>> {
        let mut standings = self
            .peers
            .iter()
            .map(Standing::Peer)
            .chain(std::iter::once(Standing::Local(&self.progress)))
            .collect::<Vec<_>>();
        standings.sort_by_key(|s| std::cmp::Reverse(s.points()));
        standings
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.notify(SessionEvent::StatusChanged);
    }

    fn notify(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }
}
