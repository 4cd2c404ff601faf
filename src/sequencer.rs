use std::time::Duration;

use crate::{
    model::TimelineEntry,
    scheduler::{Scheduler, TimerToken},
};

/// Default delay between marker reveals. Generous so map tiles have time to
/// settle between pans.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(4000);

/// Read-only snapshot of the sequencer's mutable state. `current == None`
/// means no marker has been revealed yet (the source's index `-1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current: Option<usize>,
    pub speed: Duration,
    /// Percentage in `[0, 100]` of the timeline revealed so far.
    pub progress: f64,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Playing,
    Paused,
    Finished,
}

impl PlaybackState {
    pub fn phase(&self) -> PlaybackPhase {
        if self.is_playing {
            PlaybackPhase::Playing
        } else if self.finished {
            PlaybackPhase::Finished
        } else if self.current.is_none() {
            PlaybackPhase::Idle
        } else {
            PlaybackPhase::Paused
        }
    }
}

/// Synchronous notification sink for playback events. Callbacks arrive in
/// the order the events logically occur; none are reordered or dropped.
pub trait PlaybackObserver {
    /// A timeline entry has been revealed (by natural advancement or by a
    /// seek's batch replay).
    fn marker_reached(&mut self, entry: &TimelineEntry);

    /// The playback state changed (play, pause, reset, seek, speed change,
    /// advancement, finish).
    fn state_changed(&mut self, state: PlaybackState);
}

/// Steps through a timeline on a timer, revealing one entry per tick.
///
/// The sequencer owns its state exclusively; observers only ever see
/// [`PlaybackState`] copies. It keeps at most one timer armed at a time and
/// ignores stale timer tokens, so a callback that fires after a logical
/// stop (pause, reset, destroy, or a reschedule) is a no-op.
pub struct Sequencer<S: Scheduler, O: PlaybackObserver> {
    timeline: Vec<TimelineEntry>,
    state: PlaybackState,
    scheduler: S,
    observer: O,
    pending: Option<TimerToken>,
    destroyed: bool,
}

impl<S: Scheduler, O: PlaybackObserver> Sequencer<S, O> {
    pub fn new(timeline: Vec<TimelineEntry>, scheduler: S, observer: O) -> Self {
        Self::with_speed(timeline, scheduler, observer, DEFAULT_SPEED)
    }

    pub fn with_speed(
        timeline: Vec<TimelineEntry>,
        scheduler: S,
        observer: O,
        speed: Duration,
    ) -> Self {
        Self {
            timeline,
            state: PlaybackState {
                is_playing: false,
                current: None,
                speed: speed.max(Duration::from_millis(1)),
                progress: 0.0,
                finished: false,
            },
            scheduler,
            observer,
            pending: None,
            destroyed: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Host access to the injected scheduler, e.g. to pump a
    /// [`QueueScheduler`](crate::scheduler::QueueScheduler).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Starts or resumes playback. No-op while already playing. From idle
    /// or after a finished run this begins fresh from the first entry;
    /// from paused it resumes at the next unrevealed entry.
    pub fn play(&mut self) {
        if self.destroyed || self.state.is_playing {
            return;
        }
        if self.state.finished {
            self.state.current = None;
            self.state.finished = false;
            self.state.progress = 0.0;
        }
        self.state.is_playing = true;
        tracing::debug!(resume_at = ?self.state.current, "playback started");
        self.arm_timer();
        self.notify_state();
    }

    /// Stops playback in place, cancelling the pending advancement.
    /// Idempotent: pausing while not playing changes nothing and emits
    /// nothing.
    pub fn pause(&mut self) {
        self.clear_timer();
        if self.destroyed || !self.state.is_playing {
            return;
        }
        self.state.is_playing = false;
        tracing::debug!(at = ?self.state.current, "playback paused");
        self.notify_state();
    }

    /// Pause, then rewind to before the first entry. Markers already
    /// revealed are not replayed; downstream observers clear their own
    /// placed markers.
    pub fn reset(&mut self) {
        if self.destroyed {
            return;
        }
        self.pause();
        self.state.current = None;
        self.state.progress = 0.0;
        self.state.finished = false;
        self.notify_state();
    }

    /// Jumps to `index`, replaying `marker_reached` for every entry from 0
    /// through `index` inclusive so a scrub shows the full history, not
    /// just the target. Out-of-range indices are ignored. A pending
    /// advancement (if playing) continues from the new position.
    pub fn seek(&mut self, index: usize) {
        if self.destroyed || index >= self.timeline.len() {
            return;
        }
        self.state.current = Some(index);
        self.state.finished = false;
        self.state.progress = progress_percent(index, self.timeline.len());
        for entry in &self.timeline[..=index] {
            self.observer.marker_reached(entry);
        }
        self.notify_state();
    }

    /// Changes the delay used for future advancements. An in-flight wait
    /// keeps its original delay; the new speed applies from the next
    /// scheduled advancement onward. Sub-millisecond speeds are clamped up
    /// to 1ms.
    pub fn set_speed(&mut self, speed: Duration) {
        if self.destroyed {
            return;
        }
        self.state.speed = speed.max(Duration::from_millis(1));
        self.notify_state();
    }

    /// Tears the sequencer down: cancels any pending timer and suppresses
    /// all further operations and notifications.
    pub fn destroy(&mut self) {
        self.clear_timer();
        self.state.is_playing = false;
        self.destroyed = true;
    }

    /// Host callback for an elapsed timer. Tokens that do not match the
    /// armed timer are stale and ignored, as is any tick after a stop.
    pub fn on_timer(&mut self, token: TimerToken) {
        if self.destroyed || !self.state.is_playing || self.pending != Some(token) {
            return;
        }
        self.pending = None;
        self.advance();
    }

    fn advance(&mut self) {
        let next = self.state.current.map_or(0, |i| i + 1);
        if next >= self.timeline.len() {
            // Ran off the end without revealing anything (empty timeline).
            self.state.is_playing = false;
            self.state.finished = true;
            self.notify_state();
            return;
        }

        self.state.current = Some(next);
        self.state.progress = progress_percent(next, self.timeline.len());
        tracing::debug!(index = next, "marker reached");
        self.observer.marker_reached(&self.timeline[next]);

        if next + 1 == self.timeline.len() {
            self.state.is_playing = false;
            self.state.finished = true;
        } else {
            self.arm_timer();
        }
        self.notify_state();
    }

    fn arm_timer(&mut self) {
        self.clear_timer();
        self.pending = Some(self.scheduler.schedule(self.state.speed));
    }

    fn clear_timer(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }

    fn notify_state(&mut self) {
        self.observer.state_changed(self.state);
    }
}

impl<S: Scheduler, O: PlaybackObserver> Drop for Sequencer<S, O> {
    fn drop(&mut self) {
        self.clear_timer();
    }
}

fn progress_percent(index: usize, len: usize) -> f64 {
    (index + 1) as f64 / len as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        date::DateValue,
        model::{Category, LocationRecord},
        scheduler::QueueScheduler,
    };
    use chrono::NaiveDate;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Marker(String),
        State { playing: bool, current: Option<usize>, progress: f64 },
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.borrow().clone()
        }

        fn markers(&self) -> Vec<String> {
            self.0
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Marker(city) => Some(city.clone()),
                    _ => None,
                })
                .collect()
        }

        fn clear(&self) {
            self.0.borrow_mut().clear();
        }
    }

    impl PlaybackObserver for Recorder {
        fn marker_reached(&mut self, entry: &TimelineEntry) {
            self.0.borrow_mut().push(Event::Marker(entry.location.city.clone()));
        }

        fn state_changed(&mut self, state: PlaybackState) {
            self.0.borrow_mut().push(Event::State {
                playing: state.is_playing,
                current: state.current,
                progress: state.progress,
            });
        }
    }

    fn entry(city: &str, year: i32) -> TimelineEntry {
        TimelineEntry {
            location: LocationRecord {
                city: city.into(),
                date: DateValue::Year(year),
                latitude: 0.0,
                longitude: 0.0,
                notes: None,
            },
            date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            category: Category::City,
        }
    }

    fn timeline() -> Vec<TimelineEntry> {
        vec![entry("SF", 2009), entry("Berkeley", 2013), entry("Tahoe", 2015)]
    }

    fn sequencer(
        entries: Vec<TimelineEntry>,
    ) -> (Sequencer<QueueScheduler, Recorder>, Recorder) {
        let recorder = Recorder::default();
        let seq = Sequencer::with_speed(
            entries,
            QueueScheduler::new(),
            recorder.clone(),
            Duration::from_millis(10),
        );
        (seq, recorder)
    }

    /// Fires pending timers until the sequencer stops arming new ones.
    fn pump(seq: &mut Sequencer<QueueScheduler, Recorder>) {
        while let Some((token, _)) = seq.scheduler_mut().take_due() {
            seq.on_timer(token);
        }
    }

    #[test]
    fn starts_idle() {
        let (seq, recorder) = sequencer(timeline());
        assert_eq!(seq.state().phase(), PlaybackPhase::Idle);
        assert_eq!(seq.state().current, None);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn full_run_visits_every_entry_in_order_and_ends_stopped() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        pump(&mut seq);

        assert_eq!(recorder.markers(), ["SF", "Berkeley", "Tahoe"]);
        let state = seq.state();
        assert!(!state.is_playing);
        assert_eq!(state.phase(), PlaybackPhase::Finished);
        assert_eq!(state.current, Some(2));
        assert_eq!(state.progress, 100.0);
    }

    #[test]
    fn progress_follows_revealed_count() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        pump(&mut seq);

        let progresses: Vec<f64> = recorder
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::State { current: Some(_), progress, .. } => Some(*progress),
                _ => None,
            })
            .collect();
        assert_eq!(progresses.len(), 3);
        assert!((progresses[0] - 100.0 / 3.0).abs() < 1e-9);
        assert!((progresses[1] - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(progresses[2], 100.0);
    }

    #[test]
    fn play_while_playing_is_a_noop() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        recorder.clear();
        seq.play();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn play_after_finish_starts_a_fresh_run() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        pump(&mut seq);
        recorder.clear();

        seq.play();
        pump(&mut seq);
        assert_eq!(recorder.markers(), ["SF", "Berkeley", "Tahoe"]);
    }

    #[test]
    fn pause_resume_continues_where_it_stopped() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        let (token, _) = seq.scheduler_mut().take_due().unwrap();
        seq.on_timer(token);
        assert_eq!(recorder.markers(), ["SF"]);

        seq.pause();
        assert_eq!(seq.state().phase(), PlaybackPhase::Paused);
        assert!(seq.scheduler_mut().take_due().is_none());

        seq.play();
        pump(&mut seq);
        assert_eq!(recorder.markers(), ["SF", "Berkeley", "Tahoe"]);
    }

    #[test]
    fn pause_is_idempotent() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.pause();
        seq.pause();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn stale_token_after_pause_is_ignored() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        let (token, _) = seq.scheduler_mut().take_due().unwrap();
        seq.pause();
        recorder.clear();

        seq.on_timer(token);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn reset_rewinds_without_replaying() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.seek(1);
        recorder.clear();

        seq.reset();
        let state = seq.state();
        assert_eq!(state.phase(), PlaybackPhase::Idle);
        assert_eq!(state.current, None);
        assert_eq!(state.progress, 0.0);
        assert!(recorder.markers().is_empty());
    }

    #[test]
    fn seek_replays_history_in_order() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.seek(2);
        assert_eq!(recorder.markers(), ["SF", "Berkeley", "Tahoe"]);
        assert_eq!(seq.state().current, Some(2));
        assert_eq!(seq.state().progress, 100.0);
    }

    #[test]
    fn seek_out_of_range_is_a_noop() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.seek(3);
        assert!(recorder.events().is_empty());
        assert_eq!(seq.state().current, None);
    }

    #[test]
    fn seek_while_playing_continues_from_the_new_position() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        seq.seek(1);
        recorder.clear();

        pump(&mut seq);
        assert_eq!(recorder.markers(), ["Tahoe"]);
    }

    #[test]
    fn set_speed_applies_to_the_next_advancement() {
        let (mut seq, _recorder) = sequencer(timeline());
        seq.play();
        let (token, delay) = seq.scheduler_mut().take_due().unwrap();
        assert_eq!(delay, Duration::from_millis(10));

        seq.set_speed(Duration::from_millis(50));
        seq.on_timer(token);
        let (_, delay) = seq.scheduler_mut().take_due().unwrap();
        assert_eq!(delay, Duration::from_millis(50));
    }

    #[test]
    fn zero_speed_is_clamped_positive() {
        let (mut seq, _recorder) = sequencer(timeline());
        seq.set_speed(Duration::ZERO);
        assert_eq!(seq.state().speed, Duration::from_millis(1));
    }

    #[test]
    fn destroy_silences_everything() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        let (token, _) = seq.scheduler_mut().take_due().unwrap();
        seq.pause();
        seq.destroy();
        recorder.clear();

        seq.on_timer(token);
        seq.play();
        seq.seek(0);
        seq.reset();
        seq.set_speed(Duration::from_millis(5));
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn empty_timeline_finishes_without_markers() {
        let (mut seq, recorder) = sequencer(Vec::new());
        seq.play();
        pump(&mut seq);

        assert!(recorder.markers().is_empty());
        assert_eq!(seq.state().phase(), PlaybackPhase::Finished);
        assert_eq!(seq.state().current, None);
    }

    #[test]
    fn marker_precedes_state_change_on_each_advancement() {
        let (mut seq, recorder) = sequencer(timeline());
        seq.play();
        recorder.clear();
        let (token, _) = seq.scheduler_mut().take_due().unwrap();
        seq.on_timer(token);

        let events = recorder.events();
        assert!(matches!(events[0], Event::Marker(_)));
        assert!(matches!(
            events[1],
            Event::State { playing: true, current: Some(0), .. }
        ));
    }
}
