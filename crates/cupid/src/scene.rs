//! View state controller for the card.
//!
//! A [`Scene`] owns everything that changes while the card is on screen: the
//! current view, particles, the evasive button and pending timers. Time is
//! injected through [`Scene::advance`], so the whole controller runs without a
//! display or a real clock.

use crate::evasive::EvasiveButton;
use crate::geometry::{Offset, Point, Rect, Size};
use crate::motion::{Entrance, EntranceStyle};
use crate::particles::{self, BURST_SIZE, CONFETTI_CLEAR_DELAY, ConfettiPiece, FloatingParticle};
use crate::timeline::Timeline;
use rand::Rng;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Delays of the confetti bursts that follow an accept.
pub const BURST_OFFSETS: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(500),
    Duration::from_millis(1000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum ViewState {
    #[default]
    Question,
    Yes,
    No,
}

impl ViewState {
    pub fn entrance_style(&self) -> EntranceStyle {
        match self {
            Self::Question => EntranceStyle::Rise,
            Self::Yes => EntranceStyle::Pop,
            Self::No => EntranceStyle::Slide,
        }
    }
}

/// What happens to pending timers when the card leaves the Yes view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TimerPolicy {
    /// Drop bursts that have not fired yet. Each clear only removes its own
    /// burst, so the last burst stays up for the full delay.
    #[default]
    #[strum(serialize = "cancel", serialize = "c")]
    Cancel,
    /// Let bursts fire regardless of the view. Every clear empties the
    /// confetti, whichever burst is showing.
    #[strum(serialize = "detached", serialize = "d")]
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Burst,
    /// Clears the burst with this generation.
    ClearConfetti(u64),
}

pub struct Scene<R> {
    view: ViewState,
    view_since: Duration,
    ambient: Vec<FloatingParticle>,
    confetti: Vec<ConfettiPiece>,
    burst_generation: u64,
    burst_started: Duration,
    no_button: EvasiveButton,
    timeline: Timeline<Timer>,
    policy: TimerPolicy,
    pointer: Option<Point>,
    hovering: bool,
    viewport: Size,
    now: Duration,
    rng: R,
}

impl<R: Rng> Scene<R> {
    pub fn new(mut rng: R, viewport: Size) -> Self {
        let ambient = particles::ambient(&mut rng);
        Self {
            view: ViewState::default(),
            view_since: Duration::ZERO,
            ambient,
            confetti: Vec::new(),
            burst_generation: 0,
            burst_started: Duration::ZERO,
            no_button: EvasiveButton::default(),
            timeline: Timeline::default(),
            policy: TimerPolicy::default(),
            pointer: None,
            hovering: false,
            viewport,
            now: Duration::ZERO,
            rng,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Time since the current view became current.
    pub fn view_elapsed(&self) -> Duration {
        self.now.saturating_sub(self.view_since)
    }

    /// Card entrance frame for the current view.
    pub fn entrance(&self) -> Entrance {
        Entrance::at(self.view.entrance_style(), self.view_elapsed())
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn ambient(&self) -> &[FloatingParticle] {
        &self.ambient
    }

    pub fn confetti(&self) -> &[ConfettiPiece] {
        &self.confetti
    }

    /// Time since the current burst started.
    pub fn confetti_age(&self) -> Duration {
        self.now.saturating_sub(self.burst_started)
    }

    pub fn burst_generation(&self) -> u64 {
        self.burst_generation
    }

    pub fn no_button(&self) -> &EvasiveButton {
        &self.no_button
    }

    pub fn button_offset(&self) -> Offset {
        self.no_button.offset()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn timer_policy(&self) -> TimerPolicy {
        self.policy
    }

    pub fn set_timer_policy(&mut self, policy: TimerPolicy) {
        self.policy = policy;
    }

    pub fn pending_bursts(&self) -> usize {
        self.timeline.count(|t| *t == Timer::Burst)
    }

    pub fn accept(&mut self) {
        self.enter(ViewState::Yes);
        for offset in BURST_OFFSETS {
            self.timeline.schedule(self.now + offset, Timer::Burst);
        }
    }

    pub fn decline(&mut self) {
        self.leave_yes();
        self.enter(ViewState::No);
    }

    pub fn reset(&mut self) {
        self.leave_yes();
        self.enter(ViewState::Question);
        self.no_button.reset();
    }

    /// Replaces the confetti with a fresh burst and schedules its clear.
    pub fn trigger_burst(&mut self) {
        self.burst_at(self.now);
    }

    fn burst_at(&mut self, at: Duration) {
        self.burst_generation += 1;
        let first_id = self.burst_generation * BURST_SIZE as u64;
        self.confetti = particles::burst(&mut self.rng, self.viewport.width, first_id);
        self.burst_started = at;
        self.timeline.schedule(
            at + CONFETTI_CLEAR_DELAY,
            Timer::ClearConfetti(self.burst_generation),
        );
    }

    /// Moves the scene clock to `now`, firing due timers at their deadlines and
    /// stepping motion.
    pub fn advance(&mut self, now: Duration) {
        let dt = now.saturating_sub(self.now);
        self.now = self.now.max(now);

        // a burst fired late may schedule a clear that is already due
        loop {
            let due = self.timeline.drain_due(self.now);
            if due.is_empty() {
                break;
            }
            for (at, timer) in due {
                match timer {
                    Timer::Burst => self.burst_at(at),
                    Timer::ClearConfetti(generation)
                        if self.policy == TimerPolicy::Detached
                            || generation == self.burst_generation =>
                    {
                        self.confetti.clear();
                    }
                    Timer::ClearConfetti(_) => {}
                }
            }
        }

        self.no_button.step(dt);
    }

    /// Returns `true` if the No button changed its target offset.
    pub fn pointer_moved(&mut self, point: Point, over_card: bool) -> bool {
        self.track_pointer(point, over_card);
        self.nudge_no_button(point)
    }

    /// Records the pointer and hover state without moving the No button.
    pub fn track_pointer(&mut self, point: Point, over_card: bool) {
        self.pointer = Some(point);
        self.hovering = over_card && self.view == ViewState::Question;
    }

    /// Lets the No button react to a pointer at `point`, given in the
    /// button's own untransformed coordinates.
    pub fn nudge_no_button(&mut self, point: Point) -> bool {
        self.view == ViewState::Question && self.no_button.on_pointer_move(point)
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.hovering = false;
    }

    /// Click on the No button. Declines only when the click lands on its center.
    pub fn click_no(&mut self, point: Point) -> bool {
        if self.view != ViewState::Question || !self.no_button.accepts_click(point) {
            return false;
        }
        self.decline();
        true
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_no_button_home(&mut self, rect: Rect) {
        self.no_button.set_home(rect);
    }

    pub fn detach_no_button(&mut self) {
        self.no_button.detach();
    }

    fn enter(&mut self, view: ViewState) {
        if self.view != view {
            log::debug!("view {} -> {}", self.view, view);
            self.view_since = self.now;
        }
        self.view = view;
        if view != ViewState::Question {
            self.hovering = false;
        }
    }

    fn leave_yes(&mut self) {
        if self.policy == TimerPolicy::Cancel {
            self.timeline.retain(|t| *t != Timer::Burst);
        }
    }
}
