//! Scheduled event types for tick based playback
//!
//! A compiled tune is an [`EventSequence`]: events stamped with a tick offset
//! from the start, plus the tick resolution needed to turn ticks into time.

use std::time::Duration;

/// Tick resolution of every compiled sequence
pub const TICKS_PER_BEAT: u16 = 4;

/// What happens when a scheduled event is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Select the instrument for the following notes
    ProgramChange(u8),
    /// Start sounding a pitch
    NoteOn(u8),
    /// Stop sounding a pitch
    NoteOff(u8),
    /// Informational marker: this pitch has just started
    NowPlaying(u8),
    /// Informational marker: the sequence is over
    EndOfTrack,
}

impl EventKind {
    /// Markers carry no sound and are only delivered to listeners
    pub fn is_marker(&self) -> bool {
        matches!(self, EventKind::NowPlaying(_) | EventKind::EndOfTrack)
    }
}

/// An event scheduled at a tick offset from the start of its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledEvent {
    /// Ticks from sequence start
    pub tick: u64,
    /// The action to perform
    pub kind: EventKind,
}

impl ScheduledEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}

/// Time-ordered events at a fixed tick resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSequence {
    ticks_per_beat: u16,
    events: Vec<ScheduledEvent>,
}

impl EventSequence {
    /// Build a sequence from events already in emission order.
    ///
    /// The sort is stable, so events sharing a tick keep their relative order.
    pub fn new(ticks_per_beat: u16, mut events: Vec<ScheduledEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self {
            ticks_per_beat,
            events,
        }
    }

    pub fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Tick of the last event (0 for an empty sequence)
    pub fn length_ticks(&self) -> u64 {
        self.events.last().map_or(0, |e| e.tick)
    }

    /// Wall-clock length at the given tempo
    pub fn duration_at(&self, tempo_bpm: f32) -> Duration {
        ticks_span(tick_duration(tempo_bpm, self.ticks_per_beat), self.length_ticks())
            .unwrap_or(Duration::MAX)
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = &'a ScheduledEvent;
    type IntoIter = std::slice::Iter<'a, ScheduledEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Length of one tick at the given tempo and resolution.
///
/// A non-finite or non-positive tempo, or zero resolution, yields a zero
/// duration. A tempo too slow to represent saturates at `Duration::MAX`.
pub fn tick_duration(tempo_bpm: f32, ticks_per_beat: u16) -> Duration {
    if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 || ticks_per_beat == 0 {
        return Duration::ZERO;
    }
    let beat_secs = 60.0 / tempo_bpm as f64;
    Duration::try_from_secs_f64(beat_secs / ticks_per_beat as f64).unwrap_or(Duration::MAX)
}

/// Time taken by `ticks` ticks of length `tick`, or `None` on overflow
pub fn ticks_span(tick: Duration, ticks: u64) -> Option<Duration> {
    match u32::try_from(ticks) {
        Ok(n) => tick.checked_mul(n),
        Err(_) => Duration::try_from_secs_f64(tick.as_secs_f64() * ticks as f64).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_ordering_within_tick() {
        let seq = EventSequence::new(
            TICKS_PER_BEAT,
            vec![
                ScheduledEvent::new(4, EventKind::NoteOff(60)),
                ScheduledEvent::new(0, EventKind::NoteOn(60)),
                ScheduledEvent::new(0, EventKind::NowPlaying(60)),
                ScheduledEvent::new(4, EventKind::EndOfTrack),
            ],
        );

        let kinds: Vec<EventKind> = seq.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::NoteOn(60),
                EventKind::NowPlaying(60),
                EventKind::NoteOff(60),
                EventKind::EndOfTrack,
            ]
        );
        assert_eq!(seq.length_ticks(), 4);
    }

    #[test]
    fn test_tick_duration() {
        // 120 BPM at 4 ticks per beat: 125ms per tick
        assert_eq!(tick_duration(120.0, 4), Duration::from_millis(125));
        assert_eq!(tick_duration(60.0, 4), Duration::from_millis(250));
        assert_eq!(tick_duration(0.0, 4), Duration::ZERO);
        assert_eq!(tick_duration(120.0, 0), Duration::ZERO);
    }

    #[test]
    fn test_tick_duration_degenerate_tempos() {
        assert_eq!(tick_duration(f32::NAN, 4), Duration::ZERO);
        assert_eq!(tick_duration(f32::INFINITY, 4), Duration::ZERO);
        assert_eq!(tick_duration(-120.0, 4), Duration::ZERO);
        assert_eq!(tick_duration(f32::MIN_POSITIVE, 1), Duration::MAX);
    }

    #[test]
    fn test_duration_at() {
        let seq = EventSequence::new(
            TICKS_PER_BEAT,
            vec![ScheduledEvent::new(8, EventKind::EndOfTrack)],
        );
        assert_eq!(seq.duration_at(120.0), Duration::from_secs(1));
        assert_eq!(seq.duration_at(f32::MIN_POSITIVE), Duration::MAX);
    }

    #[test]
    fn test_ticks_span() {
        let tick = Duration::from_millis(125);
        assert_eq!(ticks_span(tick, 8), Some(Duration::from_secs(1)));
        assert_eq!(ticks_span(Duration::ZERO, u64::MAX), Some(Duration::ZERO));
        assert_eq!(ticks_span(Duration::MAX, 2), None);
    }

    #[test]
    fn test_markers() {
        assert!(EventKind::NowPlaying(60).is_marker());
        assert!(EventKind::EndOfTrack.is_marker());
        assert!(!EventKind::NoteOn(60).is_marker());
        assert!(!EventKind::ProgramChange(0).is_marker());
    }
}
