//! The session state machine.
//!
//! A [`SessionTracker`] owns the loaded [`SessionRecord`] and drives it
//! through start, poll, completion, abort, reset and log. Each mutating
//! transition saves the whole record before any collaborator is told.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::progress::{counter_glyph, recent_glyph, Progress};
use super::record::{SessionRecord, SessionState};
use super::store::RecordStore;
use crate::config::SessionConfig;
use crate::core::{minutes_between, AudioControl, Clock, Notifier, Silent};
use crate::error::PomtrackError;
use crate::features::logbook::Logger;

/// Tracks work sessions against the persisted record.
pub struct SessionTracker {
    store: Box<dyn RecordStore>,
    record: SessionRecord,
    settings: SessionConfig,
    clock: Clock,
    notifier: Box<dyn Notifier>,
    audio: Box<dyn AudioControl>,
    loggers: Vec<Box<dyn Logger>>,
    rng: StdRng,
    log_string: Option<String>,
}

impl SessionTracker {
    /// Load the record from `store` and build a tracker around it.
    ///
    /// Collaborators start out silent and the logger list empty; use the
    /// `with_*` methods to wire them.
    ///
    /// # Errors
    ///
    /// Returns `PomtrackError::Storage` if the record cannot be loaded.
    pub fn open(store: Box<dyn RecordStore>, settings: SessionConfig) -> Result<Self, PomtrackError> {
        let record = store.load()?;
        Ok(Self {
            store,
            record,
            settings,
            clock: Clock::System,
            notifier: Box::new(Silent),
            audio: Box::new(Silent),
            loggers: Vec::new(),
            rng: StdRng::from_entropy(),
            log_string: None,
        })
    }

    /// Use `clock` for every time reading.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Send notifications through `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Control audio through `audio`.
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioControl>) -> Self {
        self.audio = audio;
        self
    }

    /// Replace the ordered logger list used by [`SessionTracker::log`].
    #[must_use]
    pub fn with_loggers(mut self, loggers: Vec<Box<dyn Logger>>) -> Self {
        self.loggers = loggers;
        self
    }

    /// Make glyph selection deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Mutable access to the clock, for advancing a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// The in-memory record.
    #[must_use]
    pub const fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Session timing settings.
    #[must_use]
    pub const fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    /// Current time according to the tracker's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn length(&self) -> Duration {
        Duration::minutes(i64::from(self.settings.length_minutes))
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::of(&self.record, self.length(), self.now())
    }

    /// Whether a session is running (active or expired).
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.record.is_started()
    }

    /// When the running session started.
    #[must_use]
    pub const fn started(&self) -> Option<DateTime<Utc>> {
        self.record.started
    }

    /// When the previous session ended.
    #[must_use]
    pub const fn ended(&self) -> DateTime<Utc> {
        self.record.last
    }

    /// Completed sessions since the last reset.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.record.count
    }

    /// Minutes since the previous session ended.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        minutes_between(self.record.last, self.now())
    }

    /// Minutes until the running session's deadline. Negative once overdue.
    #[must_use]
    pub fn remaining(&self) -> Option<f64> {
        self.record
            .deadline(self.length())
            .map(|deadline| minutes_between(self.now(), deadline))
    }

    /// Whether the running session has reached its deadline.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining().is_some_and(|r| r <= 0.0)
    }

    fn save(&self) -> Result<(), PomtrackError> {
        self.store.save(&self.record)
    }

    /// Start a session, backdated by `slip_minutes`.
    ///
    /// Does nothing if a session is already running. Returns whether a
    /// session was started.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn start(&mut self, slip_minutes: u32) -> Result<bool, PomtrackError> {
        if self.is_started() {
            debug!("start ignored, session already running");
            return Ok(false);
        }

        let now = self.now();
        self.record.started = Some(now - Duration::minutes(i64::from(slip_minutes)));
        self.save()?;
        debug!(slip_minutes, started = ?self.record.started, "session started");

        let elapsed = self.elapsed();
        let verdict = if elapsed > f64::from(self.settings.break_threshold_minutes) {
            "good job"
        } else {
            "chill out!"
        };
        #[allow(clippy::cast_possible_truncation)]
        let whole = elapsed.trunc() as i64;
        self.notifier
            .notify(&format!("{whole} minute break, {verdict}."), false);
        self.audio.suspend();
        Ok(true)
    }

    /// Check the running session.
    ///
    /// Returns `None` when idle, `Some(0)` after completing an expired
    /// session, otherwise the minutes left rounded up.
    ///
    /// # Errors
    ///
    /// Returns an error if completing the session fails to save.
    pub fn poll(&mut self) -> Result<Option<u32>, PomtrackError> {
        let Some(remaining) = self.remaining() else {
            return Ok(None);
        };

        if remaining <= 0.0 {
            self.complete()?;
            return Ok(Some(0));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = remaining.ceil() as u32;
        Ok(Some(minutes))
    }

    /// Finish the running session and count it.
    ///
    /// Does nothing when idle. Returns whether a session was completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn complete(&mut self) -> Result<bool, PomtrackError> {
        if !self.is_started() {
            debug!("complete ignored, no session running");
            return Ok(false);
        }

        self.record.started = None;
        self.record.count = self.record.count.saturating_add(1);
        self.record.last = self.now();
        self.save()?;
        debug!(count = self.record.count, "session completed");

        self.audio.resume();
        self.notifier.notify("done!", true);
        Ok(true)
    }

    /// Stop any running session without counting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn abort(&mut self) -> Result<(), PomtrackError> {
        self.record.started = None;
        self.record.last = self.now();
        self.save()?;
        debug!("session aborted");

        self.notifier.notify("Aborted", false);
        Ok(())
    }

    /// Zero the completed count.
    ///
    /// Does nothing when idle with a zero count. Otherwise returns a message
    /// naming the count that was cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn reset(&mut self) -> Result<Option<String>, PomtrackError> {
        if !self.is_started() && self.record.count == 0 {
            return Ok(None);
        }

        let message = format!("Resetting from {}.", self.record.count);
        self.record.count = 0;
        self.save()?;
        debug!("count reset");
        Ok(Some(message))
    }

    /// What a status bar should show right now.
    ///
    /// Polls a running session, so an expired one is completed here.
    ///
    /// # Errors
    ///
    /// Returns an error if completing the session fails to save.
    pub fn progress(&mut self) -> Result<Progress, PomtrackError> {
        if self.is_started() {
            let minutes = self.poll()?.unwrap_or(0);
            return Ok(Progress::Remaining(minutes));
        }

        let window = Duration::minutes(i64::from(self.settings.recent_window_minutes));
        if self.now().signed_duration_since(self.record.last) <= window {
            return Ok(Progress::JustFinished(recent_glyph(&mut self.rng)));
        }

        Ok(Progress::Tally(counter_glyph(self.record.count)))
    }

    /// Alias for [`SessionTracker::progress`].
    ///
    /// # Errors
    ///
    /// See [`SessionTracker::progress`].
    pub fn report(&mut self) -> Result<Progress, PomtrackError> {
        self.progress()
    }

    /// Send the current progress as a notification and return it.
    ///
    /// # Errors
    ///
    /// See [`SessionTracker::progress`].
    pub fn announce(&mut self) -> Result<String, PomtrackError> {
        let text = self.progress()?.to_string();
        self.notifier.notify(&text, false);
        Ok(text)
    }

    /// Run every logger in order, then reset the count and restart the break clock.
    ///
    /// Each logger sees the text produced so far. The full report is returned
    /// and kept for [`SessionTracker::log_string`].
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn log(&mut self) -> Result<String, PomtrackError> {
        let mut report = String::new();
        for logger in &self.loggers {
            let fragment = logger.produce(self, &report);
            report.push_str(&fragment);
        }

        self.reset()?;
        self.record.last = self.now();
        self.save()?;
        debug!(bytes = report.len(), "session log written");

        self.log_string = Some(report.clone());
        Ok(report)
    }

    /// The report from the last [`SessionTracker::log`] call.
    #[must_use]
    pub fn log_string(&self) -> Option<&str> {
        self.log_string.as_deref()
    }
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker")
            .field("record", &self.record)
            .field("settings", &self.settings)
            .field("clock", &self.clock)
            .field("loggers", &self.loggers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MockAudioControl, MockNotifier};
    use crate::features::focus::progress::RECENT_GLYPHS;
    use crate::features::focus::store::{MemoryStore, MockRecordStore};

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    /// A record whose last session ended an hour before `t0`.
    fn not_started() -> SessionRecord {
        SessionRecord::fresh(t0() - Duration::minutes(60))
    }

    fn tracker_with(record: SessionRecord) -> (SessionTracker, MemoryStore) {
        let store = MemoryStore::with_record(record);
        let tracker = SessionTracker::open(Box::new(store.clone()), SessionConfig::default())
            .unwrap()
            .with_clock(Clock::fixed(t0()))
            .with_seed(1);
        (tracker, store)
    }

    fn advance(tracker: &mut SessionTracker, minutes: i64) {
        tracker.clock_mut().advance_minutes(minutes);
    }

    #[test]
    fn test_open_surfaces_storage_error() {
        let err = SessionTracker::open(Box::new(MemoryStore::default()), SessionConfig::default())
            .unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_start() {
        let (mut tracker, store) = tracker_with(not_started());

        assert!(tracker.start(0).unwrap());

        assert!(tracker.is_started());
        assert_eq!(tracker.started(), Some(t0()));
        assert_eq!(tracker.count(), 0);
        assert_ne!(tracker.ended(), t0());
        assert_eq!(store.saves(), 1);
        assert_eq!(store.snapshot().unwrap().started, Some(t0()));
    }

    #[test]
    fn test_start_with_slip() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(5).unwrap();
        assert_eq!(tracker.started(), Some(t0() - Duration::minutes(5)));
        assert_eq!(tracker.poll().unwrap(), Some(20));
    }

    #[test]
    fn test_start_notifies_break_and_suspends_audio() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|msg, sticky| msg == "60 minute break, good job." && !*sticky)
            .times(1)
            .return_const(());
        let mut audio = MockAudioControl::new();
        audio.expect_suspend().times(1).return_const(());
        audio.expect_resume().never();

        let (tracker, _store) = tracker_with(not_started());
        let mut tracker = tracker
            .with_notifier(Box::new(notifier))
            .with_audio(Box::new(audio));

        tracker.start(0).unwrap();
    }

    #[test]
    fn test_short_break_says_chill_out() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|msg, _| msg == "3 minute break, chill out!.")
            .times(1)
            .return_const(());

        let (tracker, _store) = tracker_with(SessionRecord::fresh(t0() - Duration::minutes(3)));
        let mut tracker = tracker.with_notifier(Box::new(notifier));

        tracker.start(0).unwrap();
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (mut tracker, store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        let started = tracker.started();

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let mut audio = MockAudioControl::new();
        audio.expect_suspend().never();
        let mut tracker = tracker
            .with_notifier(Box::new(notifier))
            .with_audio(Box::new(audio));

        advance(&mut tracker, 1);
        assert!(!tracker.start(0).unwrap());
        assert_eq!(tracker.started(), started);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_start_while_started_does_not_save() {
        let mut record = not_started();
        record.started = Some(t0());
        let mut store = MockRecordStore::new();
        store.expect_load().times(1).return_once(move || Ok(record));
        store.expect_save().never();

        let mut tracker = SessionTracker::open(Box::new(store), SessionConfig::default())
            .unwrap()
            .with_clock(Clock::fixed(t0()));

        assert!(!tracker.start(0).unwrap());
    }

    #[test]
    fn test_elapsed_after_abort() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.abort().unwrap();
        assert!(tracker.elapsed().abs() < f64::EPSILON);

        advance(&mut tracker, 45);
        assert!((tracker.elapsed() - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_started_false_after_abort() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        assert!(tracker.is_started());

        tracker.abort().unwrap();
        assert!(!tracker.is_started());
        assert_eq!(tracker.state(), SessionState::Idle);
    }

    #[test]
    fn test_abort_notifies() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|msg, sticky| msg == "Aborted" && !*sticky)
            .times(1)
            .return_const(());

        let (tracker, store) = tracker_with(not_started());
        let mut tracker = tracker.with_notifier(Box::new(notifier));
        tracker.abort().unwrap();

        assert_eq!(store.snapshot().unwrap().last, t0());
    }

    #[test]
    fn test_remaining_and_done() {
        let (mut tracker, _store) = tracker_with(not_started());
        assert_eq!(tracker.remaining(), None);
        assert!(!tracker.is_done());

        tracker.start(0).unwrap();
        assert!((tracker.remaining().unwrap() - 25.0).abs() < f64::EPSILON);
        assert!(!tracker.is_done());
        assert_eq!(tracker.state(), SessionState::Active);

        advance(&mut tracker, 25);
        assert!(tracker.remaining().unwrap() <= 0.0);
        assert!(tracker.is_done());
        assert_eq!(tracker.state(), SessionState::Expired);
    }

    #[test]
    fn test_poll_countdown() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();

        assert_eq!(tracker.poll().unwrap(), Some(25));
        advance(&mut tracker, 1);
        assert_eq!(tracker.poll().unwrap(), Some(24));
        advance(&mut tracker, 23);
        assert_eq!(tracker.poll().unwrap(), Some(1));
    }

    #[test]
    fn test_poll_rounds_up_partial_minutes() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        tracker.clock_mut().advance(Duration::seconds(30));
        assert_eq!(tracker.poll().unwrap(), Some(25));
    }

    #[test]
    fn test_poll_when_idle() {
        let (mut tracker, store) = tracker_with(not_started());
        assert_eq!(tracker.poll().unwrap(), None);
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_poll_after_five_minutes() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        advance(&mut tracker, 5);
        assert_eq!(tracker.poll().unwrap(), Some(20));
    }

    #[test]
    fn test_poll_completes_expired_session() {
        let (mut tracker, store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        advance(&mut tracker, 45);
        assert!(tracker.is_started());

        assert_eq!(tracker.poll().unwrap(), Some(0));

        assert!(!tracker.is_started());
        assert_eq!(tracker.count(), 1);
        assert_eq!(store.snapshot().unwrap().count, 1);
    }

    #[test]
    fn test_complete_increments_count() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();

        assert!(tracker.complete().unwrap());

        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.started(), None);
        assert_eq!(tracker.ended(), t0());
    }

    #[test]
    fn test_complete_notifies_sticky_and_resumes_audio() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().withf(|_, sticky| !*sticky).return_const(());
        notifier
            .expect_notify()
            .withf(|msg, sticky| msg == "done!" && *sticky)
            .times(1)
            .return_const(());
        let mut audio = MockAudioControl::new();
        audio.expect_suspend().return_const(());
        audio.expect_resume().times(1).return_const(());

        let (tracker, _store) = tracker_with(not_started());
        let mut tracker = tracker
            .with_notifier(Box::new(notifier))
            .with_audio(Box::new(audio));

        tracker.start(0).unwrap();
        tracker.complete().unwrap();
    }

    #[test]
    fn test_complete_saturates_count() {
        let mut record = not_started();
        record.started = Some(t0());
        record.count = u32::MAX;
        let (mut tracker, store) = tracker_with(record);

        assert!(tracker.complete().unwrap());

        assert_eq!(tracker.count(), u32::MAX);
        assert_eq!(store.snapshot().unwrap().count, u32::MAX);
        assert!(!tracker.is_started());
    }

    #[test]
    fn test_complete_twice_counts_once() {
        let (mut tracker, store) = tracker_with(not_started());
        tracker.start(0).unwrap();

        assert!(tracker.complete().unwrap());
        assert!(!tracker.complete().unwrap());

        assert_eq!(tracker.count(), 1);
        assert_eq!(store.saves(), 2);
    }

    #[test]
    fn test_complete_when_idle_has_no_effect() {
        let (mut tracker, store) = tracker_with(not_started());

        assert!(!tracker.complete().unwrap());

        assert_eq!(tracker.count(), 0);
        assert_ne!(tracker.ended(), t0());
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_reset_when_idle_and_zero_does_not_save() {
        let mut store = MockRecordStore::new();
        store
            .expect_load()
            .times(1)
            .return_once(|| Ok(SessionRecord::fresh(t0())));
        store.expect_save().never();

        let mut tracker = SessionTracker::open(Box::new(store), SessionConfig::default())
            .unwrap()
            .with_clock(Clock::fixed(t0()));

        assert_eq!(tracker.reset().unwrap(), None);
    }

    #[test]
    fn test_reset_when_idle_with_count() {
        let mut record = not_started();
        record.count = 3;
        let (mut tracker, store) = tracker_with(record);

        let message = tracker.reset().unwrap().unwrap();

        assert!(message.contains('3'));
        assert_eq!(tracker.count(), 0);
        assert_eq!(store.snapshot().unwrap().count, 0);
    }

    #[test]
    fn test_reset_when_started() {
        let mut record = not_started();
        record.count = 3;
        let (mut tracker, _store) = tracker_with(record);
        tracker.start(0).unwrap();

        assert_eq!(tracker.reset().unwrap().as_deref(), Some("Resetting from 3."));
        assert_eq!(tracker.count(), 0);
        assert!(tracker.is_started());
    }

    #[test]
    fn test_progress_while_running() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        assert_eq!(tracker.progress().unwrap().to_string(), "25m");

        advance(&mut tracker, 1);
        assert_eq!(tracker.progress().unwrap().to_string(), "24m");

        advance(&mut tracker, 23);
        assert_eq!(tracker.progress().unwrap().to_string(), "1m");
    }

    #[test]
    fn test_progress_at_deadline() {
        let (mut tracker, _store) = tracker_with(not_started());
        tracker.start(0).unwrap();
        advance(&mut tracker, 25);

        assert_eq!(tracker.poll().unwrap(), Some(0));
        match tracker.progress().unwrap() {
            Progress::JustFinished(glyph) => assert!(RECENT_GLYPHS.contains(&glyph)),
            other => panic!("expected a just-finished glyph, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_tally_after_break() {
        for count in 0..=10u32 {
            let mut record = not_started();
            record.count = count;
            let (mut tracker, _store) = tracker_with(record);

            let progress = tracker.progress().unwrap();
            assert_eq!(progress, Progress::Tally(counter_glyph(count)));
        }
    }

    #[test]
    fn test_progress_tally_clamps_large_count() {
        let mut record = not_started();
        record.count = 14;
        let (mut tracker, _store) = tracker_with(record);
        assert_eq!(tracker.progress().unwrap().to_string(), "➓");
    }

    #[test]
    fn test_report_matches_progress() {
        let (mut tracker, _store) = tracker_with(not_started());
        let progress = tracker.progress().unwrap();
        assert_eq!(tracker.report().unwrap(), progress);
    }

    #[test]
    fn test_announce_notifies_progress() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|msg, sticky| msg == "⦿" && !*sticky)
            .times(1)
            .return_const(());

        let (tracker, _store) = tracker_with(not_started());
        let mut tracker = tracker.with_notifier(Box::new(notifier));

        assert_eq!(tracker.announce().unwrap(), "⦿");
    }

    #[test]
    fn test_full_session_cycle() {
        let (mut tracker, store) = tracker_with(SessionRecord::fresh(t0()));

        tracker.start(0).unwrap();
        assert_eq!(tracker.started(), Some(t0()));
        assert_eq!(tracker.count(), 0);

        advance(&mut tracker, 25);
        assert_eq!(tracker.poll().unwrap(), Some(0));

        let saved = store.snapshot().unwrap();
        assert_eq!(saved.count, 1);
        assert_eq!(saved.started, None);
        assert_eq!(saved.last, t0() + Duration::minutes(25));
    }

    #[test]
    fn test_custom_session_length() {
        let store = MemoryStore::with_record(not_started());
        let settings = SessionConfig {
            length_minutes: 50,
            ..SessionConfig::default()
        };
        let mut tracker = SessionTracker::open(Box::new(store), settings)
            .unwrap()
            .with_clock(Clock::fixed(t0()));

        tracker.start(0).unwrap();
        assert_eq!(tracker.poll().unwrap(), Some(50));
    }
}
