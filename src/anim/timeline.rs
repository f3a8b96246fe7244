//! Property timelines.
//!
//! A [`Timeline`] is a list of scheduled tweens over the properties of one
//! animated target, plus a list of scheduled cues (the completion callbacks,
//! expressed as values handed back to the owner). Nothing runs on its own:
//! the owner calls [`Timeline::advance`] from its per-frame `tick(dt)`.
//!
//! A [`TimelineSlot`] holds at most one live timeline for a target. Starting
//! a new one kills the previous one first, so two timelines never write the
//! same property in the same frame.

use std::sync::atomic::{AtomicU64, Ordering};

use super::ease::Ease;

/// A target whose float properties a timeline can drive.
pub trait Animatable<P> {
    fn get(&self, prop: P) -> f32;
    fn set(&mut self, prop: P, value: f32);
}

/// Unique identity of a started timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(u64);

static NEXT_TIMELINE_ID: AtomicU64 = AtomicU64::new(1);

impl TimelineId {
    fn next() -> Self {
        TimelineId(NEXT_TIMELINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    Running,
    Completed,
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SegmentState {
    Pending,
    Running { from: f32 },
    Done,
}

#[derive(Debug, Clone)]
struct Segment<P> {
    prop: P,
    /// `None` captures the property's value when the segment starts
    from: Option<f32>,
    to: f32,
    start: f32,
    duration: f32,
    ease: Ease,
    state: SegmentState,
}

impl<P> Segment<P> {
    fn end(&self) -> f32 {
        self.start + self.duration
    }
}

#[derive(Debug, Clone)]
struct ScheduledCue<C> {
    at: f32,
    cue: C,
    fired: bool,
}

/// What one [`Timeline::advance`] call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance<C> {
    /// Cues whose time was reached during this step, in schedule order
    pub cues: Vec<C>,
    /// True on the single step in which the timeline finished
    pub completed: bool,
}

impl<C> Advance<C> {
    fn idle() -> Self {
        Self {
            cues: Vec::new(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timeline<P, C = ()> {
    id: TimelineId,
    segments: Vec<Segment<P>>,
    cues: Vec<ScheduledCue<C>>,
    /// Append position for sequential `to`
    cursor: f32,
    elapsed: f32,
    state: TimelineState,
}

impl<P: Copy, C: Clone> Default for Timeline<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy, C: Clone> Timeline<P, C> {
    pub fn new() -> Self {
        Self {
            id: TimelineId::next(),
            segments: Vec::new(),
            cues: Vec::new(),
            cursor: 0.0,
            elapsed: 0.0,
            state: TimelineState::Running,
        }
    }

    pub fn id(&self) -> TimelineId {
        self.id
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.state == TimelineState::Running
    }

    /// End time of the last segment or cue.
    pub fn duration(&self) -> f32 {
        let seg_end = self.segments.iter().map(Segment::end).fold(0.0, f32::max);
        let cue_end = self.cues.iter().map(|c| c.at).fold(0.0, f32::max);
        seg_end.max(cue_end)
    }

    // ── Building ──

    /// Tween `prop` from its current value to `to`, starting where the
    /// previous sequential segment ended.
    pub fn to(mut self, prop: P, to: f32, duration: f32, ease: Ease) -> Self {
        let at = self.cursor;
        self.push(prop, None, to, at, duration, ease);
        self.cursor = at + duration.max(0.0);
        self
    }

    /// Tween `prop` from its current value to `to`, starting at `at` seconds.
    /// Does not move the sequential cursor.
    pub fn to_at(mut self, at: f32, prop: P, to: f32, duration: f32, ease: Ease) -> Self {
        self.push(prop, None, to, at, duration, ease);
        self
    }

    /// Tween `prop` from an explicit `from` to `to`, starting at `at`.
    pub fn from_to_at(
        mut self,
        at: f32,
        prop: P,
        from: f32,
        to: f32,
        duration: f32,
        ease: Ease,
    ) -> Self {
        self.push(prop, Some(from), to, at, duration, ease);
        self
    }

    /// Jump `prop` to `value` at `at` without interpolation.
    pub fn set_at(mut self, at: f32, prop: P, value: f32) -> Self {
        self.push(prop, Some(value), value, at, 0.0, Ease::Linear);
        self
    }

    /// Hand `cue` back to the owner once the timeline reaches `at`.
    pub fn cue_at(mut self, at: f32, cue: C) -> Self {
        self.cues.push(ScheduledCue {
            at: at.max(0.0),
            cue,
            fired: false,
        });
        self
    }

    /// Hand `cue` back once every segment scheduled so far has finished.
    pub fn cue_at_end(self, cue: C) -> Self {
        let at = self.duration();
        self.cue_at(at, cue)
    }

    fn push(&mut self, prop: P, from: Option<f32>, to: f32, at: f32, duration: f32, ease: Ease) {
        self.segments.push(Segment {
            prop,
            from,
            to,
            start: at.max(0.0),
            duration: duration.max(0.0),
            ease,
            state: SegmentState::Pending,
        });
    }

    // ── Running ──

    /// Move the timeline forward by `dt` seconds and write every active
    /// segment into `target`.
    ///
    /// Segments are applied in insertion order, so for the same property a
    /// later segment overrides an earlier one within a step. A killed or
    /// completed timeline does nothing.
    pub fn advance<T: Animatable<P>>(&mut self, dt: f32, target: &mut T) -> Advance<C> {
        if self.state != TimelineState::Running {
            return Advance::idle();
        }
        self.elapsed += dt.max(0.0);
        let now = self.elapsed;

        for seg in &mut self.segments {
            if now < seg.start || seg.state == SegmentState::Done {
                continue;
            }
            let from = match seg.state {
                SegmentState::Running { from } => from,
                _ => seg.from.unwrap_or_else(|| target.get(seg.prop)),
            };
            let progress = if seg.duration <= 0.0 {
                1.0
            } else {
                (now - seg.start) / seg.duration
            };
            let eased = seg.ease.apply(progress);
            target.set(seg.prop, from + (seg.to - from) * eased);
            seg.state = if progress >= 1.0 {
                SegmentState::Done
            } else {
                SegmentState::Running { from }
            };
        }

        let mut out = Advance::idle();
        for scheduled in &mut self.cues {
            if !scheduled.fired && now >= scheduled.at {
                scheduled.fired = true;
                out.cues.push(scheduled.cue.clone());
            }
        }

        let finished = self.segments.iter().all(|s| s.state == SegmentState::Done)
            && self.cues.iter().all(|c| c.fired);
        if finished {
            self.state = TimelineState::Completed;
            out.completed = true;
        }
        out
    }

    /// Stop the timeline where it is. Properties keep their current values
    /// and no further cues fire.
    pub fn kill(&mut self) {
        if self.state == TimelineState::Running {
            self.state = TimelineState::Killed;
        }
    }
}

// ── TimelineSlot ──

/// Owner of at most one live timeline for a single animated target.
#[derive(Debug, Clone)]
pub struct TimelineSlot<P, C = ()> {
    current: Option<Timeline<P, C>>,
}

impl<P, C> Default for TimelineSlot<P, C> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<P: Copy, C: Clone> TimelineSlot<P, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill whatever is running, then take ownership of `timeline`.
    /// Returns the id of the timeline that was superseded, if it was live.
    pub fn start(&mut self, timeline: Timeline<P, C>) -> Option<TimelineId> {
        let superseded = self.cancel();
        self.current = Some(timeline);
        superseded
    }

    /// Kill and drop the current timeline. Returns its id if it was live.
    pub fn cancel(&mut self) -> Option<TimelineId> {
        let mut old = self.current.take()?;
        let was_live = old.is_running();
        old.kill();
        was_live.then(|| old.id())
    }

    /// Advance the owned timeline; finished timelines are released.
    pub fn advance<T: Animatable<P>>(&mut self, dt: f32, target: &mut T) -> Advance<C> {
        let Some(timeline) = self.current.as_mut() else {
            return Advance::idle();
        };
        let step = timeline.advance(dt, target);
        if !timeline.is_running() {
            self.current = None;
        }
        step
    }

    pub fn is_live(&self) -> bool {
        self.current.as_ref().is_some_and(Timeline::is_running)
    }

    /// Id of the live timeline, if any.
    pub fn live_id(&self) -> Option<TimelineId> {
        self.current
            .as_ref()
            .filter(|t| t.is_running())
            .map(Timeline::id)
    }

    /// Number of live timelines owned (0 or 1).
    pub fn live_count(&self) -> usize {
        usize::from(self.is_live())
    }
}
