//! The touch-session state machine.
//!
//! `Idle -> Collecting -> (draw) -> ResultShown -> Idle`. Every transition is a
//! method taking the host's [`Timers`]; the session owns the timer ids and
//! cancels them itself when it leaves a state.

use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::TimerError;
use crate::model::{Color, DrawResult, Mode, Position, TouchId, TouchPoint};

use super::draw;
use super::render::{self, RenderSnapshot};
use super::timers::{TimerId, TimerKind, Timers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Collecting,
    ResultShown,
}

#[derive(Debug)]
pub struct TouchSession<R> {
    mode: Mode,
    config: SessionConfig,
    rng: R,
    touches: BTreeMap<TouchId, Position>,
    colors: BTreeMap<TouchId, Color>,
    countdown: u32,
    result: Option<DrawResult>,
    /// Set once the countdown has produced its draw; stale ticks check it.
    drawn: bool,
    restart_scheduled: bool,
    countdown_timer: Option<TimerId>,
    restart_timer: Option<TimerId>,
}

impl<R: Rng> TouchSession<R> {
    pub fn new(mode: Mode, config: SessionConfig, rng: R) -> Self {
        Self {
            mode,
            countdown: config.countdown_secs,
            config,
            rng,
            touches: BTreeMap::new(),
            colors: BTreeMap::new(),
            result: None,
            drawn: false,
            restart_scheduled: false,
            countdown_timer: None,
            restart_timer: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::ResultShown
        } else if self.countdown_timer.is_some() || !self.touches.is_empty() {
            Phase::Collecting
        } else {
            Phase::Idle
        }
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn touches(&self) -> &BTreeMap<TouchId, Position> {
        &self.touches
    }

    pub fn colors(&self) -> &BTreeMap<TouchId, Color> {
        &self.colors
    }

    pub fn result(&self) -> Option<&DrawResult> {
        self.result.as_ref()
    }

    pub fn is_restart_scheduled(&self) -> bool {
        self.restart_scheduled
    }

    pub fn countdown_timer(&self) -> Option<TimerId> {
        self.countdown_timer
    }

    pub fn restart_timer(&self) -> Option<TimerId> {
        self.restart_timer
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        render::render(self)
    }

    /// Fingers landed. New ids are tracked and colored; the first finger of an
    /// idle session starts the countdown.
    pub fn touch_start<T: Timers + ?Sized>(
        &mut self,
        points: &[TouchPoint],
        timers: &mut T,
    ) -> Result<(), TimerError> {
        if self.result.is_some() || self.restart_scheduled {
            debug!(count = points.len(), "touch start ignored, result locked");
            return Ok(());
        }
        let was_idle = self.phase() == Phase::Idle;
        for point in points {
            if self.touches.contains_key(&point.id) {
                continue;
            }
            self.touches.insert(point.id, point.position);
            if !self.colors.contains_key(&point.id) {
                let color = draw::pick_color(&self.config.palette, &mut self.rng);
                debug!(id = %point.id, %color, "finger down");
                self.colors.insert(point.id, color);
            }
        }
        if was_idle && !self.touches.is_empty() {
            self.start_countdown(timers)?;
        }
        Ok(())
    }

    pub fn touch_move(&mut self, points: &[TouchPoint]) {
        if self.result.is_some() {
            return;
        }
        for point in points {
            if let Some(position) = self.touches.get_mut(&point.id) {
                *position = point.position;
            }
        }
    }

    /// Fingers lifted. Lifting the last finger before the draw abandons the session.
    pub fn touch_end<T: Timers + ?Sized>(&mut self, points: &[TouchPoint], timers: &mut T) {
        if self.result.is_some() {
            return;
        }
        let before = self.touches.len();
        for point in points {
            self.touches.remove(&point.id);
        }
        if before > 0 && self.touches.is_empty() {
            info!("all fingers lifted before the draw");
            self.reset_all(timers);
        }
    }

    /// The browser took the gesture away; treated exactly like a lift.
    pub fn touch_cancel<T: Timers + ?Sized>(&mut self, points: &[TouchPoint], timers: &mut T) {
        self.touch_end(points, timers);
    }

    /// A timer the session armed has fired. Ids that are no longer live are
    /// stale fires and are dropped.
    pub fn on_timer<T: Timers + ?Sized>(
        &mut self,
        id: TimerId,
        timers: &mut T,
    ) -> Result<(), TimerError> {
        if self.countdown_timer == Some(id) {
            self.countdown_tick(timers)
        } else if self.restart_timer == Some(id) {
            info!("restart delay elapsed");
            self.reset_all(timers);
            Ok(())
        } else {
            debug!(?id, "stale timer fire ignored");
            Ok(())
        }
    }

    /// Back to the initial state, cancelling any armed timer.
    pub fn reset_all<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.countdown_timer.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.restart_timer.take() {
            timers.cancel(id);
        }
        self.touches.clear();
        self.colors.clear();
        self.countdown = self.config.countdown_secs;
        self.result = None;
        self.restart_scheduled = false;
        self.drawn = false;
        debug!("session reset");
    }

    /// The screen is going away.
    pub fn teardown<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        debug!(mode = %self.mode, "session teardown");
        self.reset_all(timers);
    }

    fn start_countdown<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Result<(), TimerError> {
        self.countdown = self.config.countdown_secs;
        self.drawn = false;
        match timers.schedule(TimerKind::Countdown { every: self.config.tick() }) {
            Ok(id) => {
                debug!(?id, secs = self.countdown, "countdown started");
                self.countdown_timer = Some(id);
                Ok(())
            }
            Err(err) => {
                self.reset_all(timers);
                Err(err)
            }
        }
    }

    fn countdown_tick<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Result<(), TimerError> {
        if self.drawn || self.result.is_some() {
            return Ok(());
        }
        if self.countdown > 1 {
            self.countdown -= 1;
            return Ok(());
        }
        self.countdown = 0;
        if let Some(id) = self.countdown_timer.take() {
            timers.cancel(id);
        }
        self.drawn = true;
        self.draw(timers)
    }

    fn draw<T: Timers + ?Sized>(&mut self, timers: &mut T) -> Result<(), TimerError> {
        let result = match self.mode {
            Mode::SinglePick => {
                draw::pick_one(&self.touches, &self.colors, &mut self.rng).map(DrawResult::Single)
            }
            Mode::GroupSplit => draw::split_groups(&self.touches, &self.colors, &mut self.rng)
                .map(DrawResult::Groups),
        };
        let Some(result) = result else {
            info!("countdown ended with no fingers down");
            self.reset_all(timers);
            return Ok(());
        };
        match &result {
            DrawResult::Single(winner) => info!(id = %winner.id, color = %winner.color, "picked"),
            DrawResult::Groups(_) => {
                let (a, b) = result.team_sizes();
                info!(team_a = a, team_b = b, "split into groups");
            }
        }
        self.touches.clear();
        self.colors.clear();
        self.result = Some(result);

        match timers.schedule(TimerKind::Restart { after: self.config.restart_delay() }) {
            Ok(id) => {
                self.restart_timer = Some(id);
                self.restart_scheduled = true;
                Ok(())
            }
            Err(err) => {
                self.reset_all(timers);
                Err(err)
            }
        }
    }
}
