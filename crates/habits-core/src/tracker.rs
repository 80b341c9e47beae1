//! Habit tracker controller
//!
//! The `Tracker` owns the single in-memory [`Ledger`] for a session and
//! keeps it in step with a [`KeyValueStore`]:
//!
//! - Load happens once, when the tracker is constructed, and performs
//!   day rollover.
//! - Every mutation that changes state is followed by a full save.
//! - Write failures are logged; the in-memory ledger stays authoritative
//!   and the next save rewrites everything.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::open()?;
//!
//! let id = tracker.add_habit("Stretch").map(|h| h.id);
//! tracker.toggle_habit(&id.unwrap());
//!
//! let week = tracker.build_range(7);
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::clock::{Clock, LocalClock};
use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{Habit, ProgressDay};
use crate::reminder::ReminderSettings;
use crate::stats::{Period, ProgressSummary};
use crate::storage::records::{read_date, read_json, write_json};
use crate::storage::{
    KeyValueStore, SqliteStore, HABITS_KEY, LAST_DATE_KEY, PROGRESS_KEY, REMINDER_KEY,
};

/// Callback invoked with the ledger after every applied change
pub type Subscriber = Box<dyn FnMut(&Ledger)>;

/// Session controller over a ledger and its backing store
pub struct Tracker<S: KeyValueStore = SqliteStore, C: Clock = LocalClock> {
    ledger: Ledger,
    reminder: ReminderSettings,
    store: S,
    clock: C,
    rollover_on_mutation: bool,
    subscribers: Vec<Subscriber>,
}

impl Tracker {
    /// Open the tracker using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config)
    }

    /// Open the tracker with a specific configuration
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let path = config.database_path();
        let store = SqliteStore::open(&path)
            .with_context(|| format!("Failed to open habit database at {:?}", path))?;

        let mut tracker = Tracker::load(store, LocalClock);
        tracker.set_rollover_on_mutation(config.rollover_on_mutation);
        Ok(tracker)
    }
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    /// Load ledger state from `store`, rolling over if the day changed
    ///
    /// Missing or unreadable values start empty. The resulting state is
    /// written back immediately so a rollover is persisted even if no
    /// mutation follows.
    pub fn load(store: S, clock: C) -> Self {
        let today = clock.today();

        let habits: Vec<Habit> = read_json(&store, HABITS_KEY).unwrap_or_default();
        let progress: Vec<ProgressDay> = read_json(&store, PROGRESS_KEY).unwrap_or_default();
        let last_date = read_date(&store, LAST_DATE_KEY);
        let reminder: ReminderSettings = read_json(&store, REMINDER_KEY).unwrap_or_default();

        debug!(
            habits = habits.len(),
            progress = progress.len(),
            last_date = ?last_date,
            %today,
            "loaded ledger"
        );

        let mut tracker = Self {
            ledger: Ledger::restore(habits, progress, last_date, today),
            reminder,
            store,
            clock,
            rollover_on_mutation: false,
            subscribers: Vec::new(),
        };
        tracker.save();
        tracker
    }

    /// Re-check for a new day before every mutation
    pub fn set_rollover_on_mutation(&mut self, enabled: bool) {
        self.rollover_on_mutation = enabled;
    }

    /// Register a callback to run after each applied change
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Ledger) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // ==================== Accessors ====================

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn habits(&self) -> &[Habit] {
        self.ledger.habits()
    }

    pub fn progress(&self) -> &[ProgressDay] {
        self.ledger.progress()
    }

    pub fn last_date(&self) -> NaiveDate {
        self.ledger.last_date()
    }

    pub fn reminder(&self) -> ReminderSettings {
        self.reminder
    }

    /// Current date according to the tracker's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Consume the tracker, returning its store
    pub fn into_store(self) -> S {
        self.store
    }

    // ==================== Habit Operations ====================

    /// Add a habit; blank titles are ignored
    pub fn add_habit(&mut self, title: &str) -> Option<Habit> {
        let (today, rolled) = self.begin_mutation();
        let added = self.ledger.add_habit(title, today).cloned();
        self.finish_mutation(rolled || added.is_some());
        added
    }

    /// Toggle a habit's completion; unknown ids are ignored
    pub fn toggle_habit(&mut self, id: &str) -> bool {
        let (today, rolled) = self.begin_mutation();
        let changed = self.ledger.toggle_habit(id, today);
        self.finish_mutation(rolled || changed);
        changed
    }

    /// Rename a habit; blank titles and unknown ids are ignored
    pub fn edit_habit(&mut self, id: &str, title: &str) -> bool {
        let (_, rolled) = self.begin_mutation();
        let changed = self.ledger.edit_habit(id, title);
        self.finish_mutation(rolled || changed);
        changed
    }

    /// Delete a habit; unknown ids are ignored
    pub fn delete_habit(&mut self, id: &str) -> bool {
        let (today, rolled) = self.begin_mutation();
        let changed = self.ledger.delete_habit(id, today);
        self.finish_mutation(rolled || changed);
        changed
    }

    /// Roll over now if the clock has moved to a new day
    ///
    /// Returns the archived record for the outgoing day, if any.
    pub fn check_rollover(&mut self) -> Option<ProgressDay> {
        let today = self.clock.today();
        let archived = self.ledger.roll_over(today);
        if archived.is_some() {
            self.finish_mutation(true);
        }
        archived
    }

    fn begin_mutation(&mut self) -> (NaiveDate, bool) {
        let today = self.clock.today();
        let rolled = self.rollover_on_mutation && self.ledger.roll_over(today).is_some();
        (today, rolled)
    }

    fn finish_mutation(&mut self, changed: bool) {
        if !changed {
            return;
        }
        self.save();
        for subscriber in &mut self.subscribers {
            subscriber(&self.ledger);
        }
    }

    // ==================== Reminder ====================

    /// Persist the reminder preference
    pub fn set_reminder(&mut self, enabled: bool) {
        self.reminder = ReminderSettings::new(enabled);
        if let Err(e) = write_json(&mut self.store, REMINDER_KEY, &self.reminder) {
            warn!(error = %e, "failed to save reminder setting");
        }
    }

    // ==================== Progress ====================

    /// Contiguous window of `days` records ending today
    pub fn build_range(&self, days: usize) -> Vec<ProgressDay> {
        self.ledger.build_range(days, self.clock.today())
    }

    /// Today's counts plus the window for `period`
    pub fn summary(&self, period: Period) -> ProgressSummary {
        ProgressSummary::for_period(&self.ledger, period, self.clock.today())
    }

    // ==================== Persistence ====================

    /// Write habits, progress and last date to the store
    ///
    /// Each key is written independently; failures are logged and the
    /// remaining keys are still attempted. Returns whether every write
    /// succeeded.
    pub fn save(&mut self) -> bool {
        let writes = [
            (
                HABITS_KEY,
                write_json(&mut self.store, HABITS_KEY, self.ledger.habits()),
            ),
            (
                PROGRESS_KEY,
                write_json(&mut self.store, PROGRESS_KEY, self.ledger.progress()),
            ),
            (
                LAST_DATE_KEY,
                write_json(&mut self.store, LAST_DATE_KEY, &self.ledger.last_date()),
            ),
        ];

        let mut ok = true;
        for (key, result) in writes {
            if let Err(e) = result {
                warn!(
                    key,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    suggestion = e.recovery_suggestion().unwrap_or(""),
                    "failed to save ledger state"
                );
                ok = false;
            }
        }
        ok
    }
}
