//! Daily ledger
//!
//! Owns the habit list and the per-day progress history. All operations
//! are plain functions of the in-memory state plus an explicit `today`;
//! persistence is handled by [`crate::Tracker`].
//!
//! ## Rollover
//!
//! `last_date` is the date the ledger last believed was today. When the
//! real date differs, the outgoing day is archived from the pre-reset
//! habits, every habit is reset, and `last_date` moves to today.
//!
//! ## Progress history
//!
//! Records are keyed by date and kept in insertion order. Only today's
//! record is ever recomputed; older days are frozen.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use crate::models::{count_completed, Habit, ProgressDay};

/// In-memory ledger state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    habits: Vec<Habit>,
    progress: Vec<ProgressDay>,
    last_date: NaiveDate,
}

impl Ledger {
    /// An empty ledger whose day is `today`
    pub fn new(today: NaiveDate) -> Self {
        let mut ledger = Self {
            habits: Vec::new(),
            progress: Vec::new(),
            last_date: today,
        };
        ledger.ensure_today(today);
        ledger
    }

    /// Rebuild the ledger from stored collections
    ///
    /// A missing `stored_last_date` means no rollover. In that case each
    /// habit's `completed` flag is re-derived from `last_completed_date`,
    /// which is how stores written without a `lastDate` key track days.
    pub fn restore(
        habits: Vec<Habit>,
        progress: Vec<ProgressDay>,
        stored_last_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let mut habits = dedup_habits(habits);
        if stored_last_date.is_none() {
            for habit in habits.iter_mut().filter(|h| h.last_completed_date.is_some()) {
                habit.completed = habit.last_completed_date == Some(today);
            }
        }

        let mut ledger = Self {
            habits,
            progress: dedup_progress(progress),
            last_date: stored_last_date.unwrap_or(today),
        };
        ledger.roll_over(today);
        ledger.ensure_today(today);
        ledger
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn progress(&self) -> &[ProgressDay] {
        &self.progress
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Look up a habit by exact id
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Stored record for `date`, if any
    pub fn progress_for(&self, date: NaiveDate) -> Option<&ProgressDay> {
        self.progress.iter().find(|p| p.date == date)
    }

    /// Number of habits currently marked done
    pub fn completed_count(&self) -> u32 {
        count_completed(&self.habits)
    }

    /// Number of live habits
    pub fn total(&self) -> u32 {
        self.habits.len() as u32
    }

    // ==================== Rollover ====================

    /// Archive the outgoing day and reset habits if `today` is a new day
    ///
    /// Returns the archived record when a rollover happened. The archive
    /// replaces any existing record for the outgoing date, so each date
    /// has exactly one record no matter how often this runs. Today's
    /// record is then re-synced from the reset habits.
    pub fn roll_over(&mut self, today: NaiveDate) -> Option<ProgressDay> {
        if self.last_date == today {
            return None;
        }
        if today < self.last_date {
            warn!(last_date = %self.last_date, %today, "clock moved backwards, rolling over anyway");
        }

        let archived = ProgressDay::snapshot(self.last_date, &self.habits);
        self.upsert_progress(archived);

        for habit in &mut self.habits {
            habit.reset();
        }
        self.last_date = today;
        self.sync_today_progress(today);

        info!(
            date = %archived.date,
            completed = archived.completed,
            total = archived.total,
            "day rolled over"
        );
        Some(archived)
    }

    /// Create a record for `today` from the live habits unless one exists
    fn ensure_today(&mut self, today: NaiveDate) {
        if self.progress_for(today).is_none() {
            self.progress.push(ProgressDay::snapshot(today, &self.habits));
        }
    }

    // ==================== Habit Operations ====================

    /// Append a habit; blank titles are ignored
    pub fn add_habit(&mut self, title: &str, today: NaiveDate) -> Option<&Habit> {
        if title.trim().is_empty() {
            debug!("ignoring habit with blank title");
            return None;
        }

        self.habits.push(Habit::new(title));
        self.sync_today_progress(today);
        self.habits.last()
    }

    /// Flip a habit's completed flag; unknown ids are ignored
    pub fn toggle_habit(&mut self, id: &str, today: NaiveDate) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            debug!(id, "toggle: no such habit");
            return false;
        };

        habit.toggle(today);
        self.sync_today_progress(today);
        true
    }

    /// Rename a habit; blank titles and unknown ids are ignored
    ///
    /// Progress is not touched since counts don't depend on titles.
    pub fn edit_habit(&mut self, id: &str, title: &str) -> bool {
        if title.trim().is_empty() {
            debug!(id, "edit: ignoring blank title");
            return false;
        }
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            debug!(id, "edit: no such habit");
            return false;
        };

        habit.title = title.to_string();
        true
    }

    /// Remove a habit; unknown ids are ignored
    pub fn delete_habit(&mut self, id: &str, today: NaiveDate) -> bool {
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            debug!(id, "delete: no such habit");
            return false;
        };

        self.habits.remove(pos);
        self.sync_today_progress(today);
        true
    }

    // ==================== Progress ====================

    /// Recompute today's record from the live habits
    pub fn sync_today_progress(&mut self, today: NaiveDate) {
        self.upsert_progress(ProgressDay::snapshot(today, &self.habits));
    }

    /// Replace the record with the same date, or append
    fn upsert_progress(&mut self, day: ProgressDay) {
        match self.progress.iter_mut().find(|p| p.date == day.date) {
            Some(existing) => *existing = day,
            None => self.progress.push(day),
        }
    }

    /// Contiguous window of `days` records ending at `today`
    pub fn build_range(&self, days: usize, today: NaiveDate) -> Vec<ProgressDay> {
        build_range(&self.progress, self.total(), days, today)
    }
}

/// Contiguous, ascending window of `days` records ending at `today`
///
/// Days without a stored record are filled with `completed = 0` and
/// `total = live_total`. A `days` of zero yields an empty window. A
/// window reaching past `NaiveDate::MIN` is cut short there.
pub fn build_range(
    progress: &[ProgressDay],
    live_total: u32,
    days: usize,
    today: NaiveDate,
) -> Vec<ProgressDay> {
    let Some(span) = days.checked_sub(1) else {
        return Vec::new();
    };
    let start = u64::try_from(span)
        .ok()
        .and_then(|span| today.checked_sub_days(Days::new(span)))
        .unwrap_or(NaiveDate::MIN);

    let mut by_date: HashMap<NaiveDate, &ProgressDay> = HashMap::with_capacity(progress.len());
    for day in progress {
        by_date.entry(day.date).or_insert(day);
    }

    start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| match by_date.get(&date) {
            Some(stored) => **stored,
            None => ProgressDay::empty(date, live_total),
        })
        .collect()
}

/// Drop habits whose id was already seen, keeping the first
fn dedup_habits(habits: Vec<Habit>) -> Vec<Habit> {
    let mut seen = std::collections::HashSet::with_capacity(habits.len());
    let before = habits.len();
    let habits: Vec<Habit> = habits
        .into_iter()
        .filter(|h| seen.insert(h.id.clone()))
        .collect();
    if habits.len() != before {
        warn!(dropped = before - habits.len(), "dropped habits with duplicate ids");
    }
    habits
}

/// Collapse records sharing a date: first position, last value
fn dedup_progress(progress: Vec<ProgressDay>) -> Vec<ProgressDay> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::with_capacity(progress.len());
    let mut out: Vec<ProgressDay> = Vec::with_capacity(progress.len());
    for day in progress {
        match index.get(&day.date) {
            Some(&i) => out[i] = day,
            None => {
                index.insert(day.date, out.len());
                out.push(day);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn habit(id: &str, completed: bool) -> Habit {
        let mut h = Habit::with_id(id, format!("habit {}", id));
        h.completed = completed;
        h
    }

    fn day(d: &str, completed: u32, total: u32) -> ProgressDay {
        ProgressDay {
            date: date(d),
            completed,
            total,
        }
    }

    #[test]
    fn test_new_ledger_has_today_record() {
        let today = date("2024-05-01");
        let ledger = Ledger::new(today);
        assert!(ledger.habits().is_empty());
        assert_eq!(ledger.progress(), &[day("2024-05-01", 0, 0)]);
        assert_eq!(ledger.last_date(), today);
    }

    #[test]
    fn test_restore_rollover_scenario() {
        let habits = vec![habit("1", true), habit("2", false)];
        let ledger = Ledger::restore(
            habits,
            Vec::new(),
            Some(date("2024-01-01")),
            date("2024-01-02"),
        );

        assert_eq!(ledger.progress_for(date("2024-01-01")), Some(&day("2024-01-01", 1, 2)));
        assert!(ledger.habits().iter().all(|h| !h.completed));
        assert_eq!(ledger.last_date(), date("2024-01-02"));
        assert_eq!(ledger.progress_for(date("2024-01-02")), Some(&day("2024-01-02", 0, 2)));
    }

    #[test]
    fn test_restore_rollover_replaces_existing_record() {
        // Today's record was synced before the app closed; the rollover
        // snapshot must not duplicate it.
        let habits = vec![habit("1", true), habit("2", true)];
        let progress = vec![day("2024-01-01", 1, 2)];
        let ledger = Ledger::restore(
            habits,
            progress,
            Some(date("2024-01-01")),
            date("2024-01-02"),
        );

        let jan1: Vec<_> = ledger
            .progress()
            .iter()
            .filter(|p| p.date == date("2024-01-01"))
            .collect();
        assert_eq!(jan1.len(), 1);
        assert_eq!(*jan1[0], day("2024-01-01", 2, 2));
        assert_eq!(ledger.progress().len(), 2);
    }

    #[test]
    fn test_restore_same_day_keeps_completion() {
        let today = date("2024-01-01");
        let habits = vec![habit("1", true), habit("2", false)];
        let ledger = Ledger::restore(habits, Vec::new(), Some(today), today);

        assert!(ledger.habit("1").unwrap().completed);
        assert_eq!(ledger.progress(), &[day("2024-01-01", 1, 2)]);
    }

    #[test]
    fn test_restore_same_day_keeps_existing_today_record() {
        let today = date("2024-01-01");
        let progress = vec![day("2024-01-01", 3, 4)];
        let ledger = Ledger::restore(vec![habit("1", false)], progress, Some(today), today);
        assert_eq!(ledger.progress(), &[day("2024-01-01", 3, 4)]);
    }

    #[test]
    fn test_restore_without_last_date_uses_today() {
        let today = date("2024-06-10");
        let ledger = Ledger::restore(vec![habit("1", true)], Vec::new(), None, today);
        assert_eq!(ledger.last_date(), today);
        assert!(ledger.habit("1").unwrap().completed);
        assert_eq!(ledger.progress().len(), 1);
    }

    #[test]
    fn test_restore_without_last_date_uses_completion_dates() {
        let today = date("2024-06-10");
        let mut stale = habit("1", true);
        stale.last_completed_date = Some(date("2024-06-09"));
        let mut fresh = habit("2", false);
        fresh.last_completed_date = Some(today);

        let ledger = Ledger::restore(vec![stale, fresh], Vec::new(), None, today);
        assert!(!ledger.habit("1").unwrap().completed);
        assert!(ledger.habit("2").unwrap().completed);
    }

    #[test]
    fn test_restore_collapses_duplicate_progress() {
        let today = date("2024-01-03");
        let progress = vec![
            day("2024-01-01", 0, 2),
            day("2024-01-02", 1, 2),
            day("2024-01-01", 2, 2),
        ];
        let ledger = Ledger::restore(Vec::new(), progress, Some(today), today);
        assert_eq!(
            &ledger.progress()[..2],
            &[day("2024-01-01", 2, 2), day("2024-01-02", 1, 2)]
        );
    }

    #[test]
    fn test_restore_drops_duplicate_habit_ids() {
        let today = date("2024-01-01");
        let ledger = Ledger::restore(
            vec![habit("1", false), habit("1", true), habit("2", false)],
            Vec::new(),
            Some(today),
            today,
        );
        assert_eq!(ledger.habits().len(), 2);
        assert!(!ledger.habit("1").unwrap().completed);
    }

    #[test]
    fn test_roll_over_is_noop_on_same_day() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::restore(vec![habit("1", true)], Vec::new(), Some(today), today);
        let before = ledger.clone();
        assert!(ledger.roll_over(today).is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_roll_over_across_gap() {
        let mut ledger = Ledger::restore(
            vec![habit("1", true)],
            Vec::new(),
            Some(date("2024-01-01")),
            date("2024-01-01"),
        );
        let archived = ledger.roll_over(date("2024-01-05")).unwrap();
        assert_eq!(archived, day("2024-01-01", 1, 1));
        assert_eq!(ledger.last_date(), date("2024-01-05"));
        // Intermediate days get no record; build_range fills them.
        assert!(ledger.progress_for(date("2024-01-03")).is_none());
    }

    #[test]
    fn test_roll_over_when_clock_moves_backwards() {
        let mut ledger = Ledger::restore(
            vec![habit("1", true), habit("2", false)],
            Vec::new(),
            Some(date("2024-03-10")),
            date("2024-03-10"),
        );
        let archived = ledger.roll_over(date("2024-03-09")).unwrap();
        assert_eq!(archived, day("2024-03-10", 1, 2));
        assert_eq!(ledger.last_date(), date("2024-03-09"));
        assert!(ledger.habits().iter().all(|h| !h.completed));
    }

    #[test]
    fn test_restore_rollover_resyncs_stale_today_record() {
        // A toggle after midnight wrote a record for the new day before
        // the stored lastDate moved on.
        let progress = vec![day("2024-01-01", 0, 1), day("2024-01-02", 1, 1)];
        let ledger = Ledger::restore(
            vec![habit("1", true)],
            progress,
            Some(date("2024-01-01")),
            date("2024-01-02"),
        );

        assert_eq!(ledger.progress_for(date("2024-01-01")), Some(&day("2024-01-01", 1, 1)));
        assert_eq!(ledger.progress_for(date("2024-01-02")), Some(&day("2024-01-02", 0, 1)));
        assert_eq!(ledger.progress().len(), 2);
    }

    #[test]
    fn test_add_habit() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);

        let added = ledger.add_habit("Meditate", today).cloned().unwrap();
        assert_eq!(added.title, "Meditate");
        assert!(!added.completed);
        assert_eq!(ledger.habits().len(), 1);
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-01", 0, 1)));
    }

    #[test]
    fn test_add_habit_preserves_order() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        for title in ["a", "b", "c"] {
            ledger.add_habit(title, today);
        }
        let titles: Vec<_> = ledger.habits().iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_habit_blank_title_is_noop() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        let before = ledger.clone();

        assert!(ledger.add_habit("", today).is_none());
        assert!(ledger.add_habit("   \t", today).is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        let id = ledger.add_habit("Run", today).unwrap().id.clone();

        assert!(ledger.toggle_habit(&id, today));
        assert!(ledger.habit(&id).unwrap().completed);
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-01", 1, 1)));

        assert!(ledger.toggle_habit(&id, today));
        assert!(!ledger.habit(&id).unwrap().completed);
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-01", 0, 1)));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        ledger.add_habit("Run", today);
        let before = ledger.clone();

        assert!(!ledger.toggle_habit("missing", today));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_edit_habit() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        let id = ledger.add_habit("Run", today).unwrap().id.clone();
        ledger.toggle_habit(&id, today);
        let progress_before = ledger.progress().to_vec();

        assert!(ledger.edit_habit(&id, "Run 5k"));
        let habit = ledger.habit(&id).unwrap();
        assert_eq!(habit.title, "Run 5k");
        assert!(habit.completed);
        assert_eq!(ledger.progress(), progress_before.as_slice());
    }

    #[test]
    fn test_edit_blank_title_leaves_title() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        let id = ledger.add_habit("Run", today).unwrap().id.clone();

        assert!(!ledger.edit_habit(&id, "  "));
        assert_eq!(ledger.habit(&id).unwrap().title, "Run");
    }

    #[test]
    fn test_edit_unknown_id_is_noop() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::new(today);
        let before = ledger.clone();
        assert!(!ledger.edit_habit("nope", "Title"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_delete_completed_habit_updates_today() {
        let today = date("2024-01-01");
        let ledger_habits = vec![habit("1", true), habit("2", true), habit("3", false)];
        let mut ledger = Ledger::restore(ledger_habits, Vec::new(), Some(today), today);
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-01", 2, 3)));

        assert!(ledger.delete_habit("1", today));
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-01", 1, 2)));
        assert!(ledger.habit("1").is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::restore(vec![habit("1", false)], Vec::new(), Some(today), today);
        let before = ledger.clone();
        assert!(!ledger.delete_habit("2", today));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_mutations_never_touch_history() {
        let today = date("2024-01-03");
        let history = vec![day("2024-01-01", 1, 4), day("2024-01-02", 4, 4)];
        let mut ledger = Ledger::restore(
            vec![habit("1", false), habit("2", false)],
            history.clone(),
            Some(today),
            today,
        );

        ledger.add_habit("new", today);
        ledger.toggle_habit("1", today);
        ledger.delete_habit("2", today);

        assert_eq!(&ledger.progress()[..2], history.as_slice());
        assert_eq!(ledger.progress_for(today), Some(&day("2024-01-03", 1, 2)));
    }

    #[test]
    fn test_sync_today_progress_is_idempotent() {
        let today = date("2024-01-01");
        let mut ledger = Ledger::restore(
            vec![habit("1", true), habit("2", false)],
            Vec::new(),
            Some(today),
            today,
        );

        ledger.sync_today_progress(today);
        let once = ledger.clone();
        ledger.sync_today_progress(today);
        assert_eq!(ledger, once);
        assert_eq!(ledger.progress().len(), 1);
    }

    #[test]
    fn test_sync_today_appends_when_missing() {
        let mut ledger = Ledger::new(date("2024-01-01"));
        ledger.sync_today_progress(date("2024-01-02"));
        assert_eq!(ledger.progress().len(), 2);
        assert_eq!(ledger.progress()[1].date, date("2024-01-02"));
    }

    #[test]
    fn test_build_range_length_and_order() {
        let today = date("2024-03-02");
        let ledger = Ledger::new(today);

        for n in [1usize, 2, 7, 30, 366] {
            let range = ledger.build_range(n, today);
            assert_eq!(range.len(), n);
            assert_eq!(range.last().unwrap().date, today);
            assert!(range.windows(2).all(|w| w[1].date == w[0].date + Days::new(1)));
        }
    }

    #[test]
    fn test_build_range_crosses_leap_day() {
        let range = build_range(&[], 0, 3, date("2024-03-01"));
        let dates: Vec<_> = range.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-02-28"), date("2024-02-29"), date("2024-03-01")]
        );
    }

    #[test]
    fn test_build_range_fills_gaps_with_live_total() {
        let today = date("2024-01-07");
        let progress = vec![day("2024-01-03", 2, 5), day("2024-01-07", 1, 3)];
        let range = build_range(&progress, 3, 7, today);

        assert_eq!(range[0], day("2024-01-01", 0, 3));
        assert_eq!(range[2], day("2024-01-03", 2, 5));
        assert_eq!(range[4], day("2024-01-05", 0, 3));
        assert_eq!(range[6], day("2024-01-07", 1, 3));
    }

    #[test]
    fn test_build_range_ignores_records_outside_window() {
        let today = date("2024-01-10");
        let progress = vec![day("2023-12-01", 1, 1), day("2024-01-11", 1, 1)];
        let range = build_range(&progress, 2, 3, today);
        assert!(range.iter().all(|d| d.completed == 0 && d.total == 2));
    }

    #[test]
    fn test_build_range_is_deterministic() {
        let today = date("2024-01-07");
        let progress = vec![day("2024-01-05", 1, 2)];
        assert_eq!(
            build_range(&progress, 2, 30, today),
            build_range(&progress, 2, 30, today)
        );
    }

    #[test]
    fn test_build_range_stops_at_earliest_date() {
        let today = NaiveDate::MIN.checked_add_days(Days::new(2)).unwrap();

        let range = build_range(&[], 4, usize::MAX, today);
        assert_eq!(range.len(), 3);
        assert_eq!(range[0], ProgressDay::empty(NaiveDate::MIN, 4));
        assert_eq!(range[2].date, today);

        assert_eq!(build_range(&[], 4, 10, today).len(), 3);
        assert_eq!(build_range(&[], 4, 2, today)[0].date, today.pred_opt().unwrap());
    }

    #[test]
    fn test_build_range_zero_days() {
        assert!(build_range(&[], 4, 0, date("2024-01-01")).is_empty());
    }
}
