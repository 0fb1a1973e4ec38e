//! Discrete locomotion state machine for skiing actors.
//!
//! Each skier owns one [`Locomotion`] component: a heading/condition state
//! plus the named timers that drive implicit transitions. Turn commands step
//! one heading at a time; collision events escalate through an impact stagger
//! into a launch; the flying and recovery timers bring a launched skier down
//! and back up again. All rejected operations report failure through their
//! `bool` return value, never through an error path.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use serde::Serialize;

use crate::constants::{
    BASE_RUN_SPEED, COLLISION_ESCALATION_THRESHOLD, FLYING_DURATION_TICKS,
    FLYING_SPEED_MULTIPLIER, GATE_GRAZE_TICKS, IMPACT_HARD_TICKS, IMPACT_SLOWDOWN,
    IMPACT_SOFT_TICKS, RECOVERY_DURATION_TICKS, TURN_COOLDOWN_TICKS,
};

/// Impact hardness of an obstacle, selecting the stagger duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObstacleHardness {
    /// Soft obstacles impose a short stagger.
    Soft,
    /// Hard obstacles impose a long stagger.
    Hard,
}

/// Skiing heading, ordered from full left to full right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Heading {
    /// Traversing left with minimal descent.
    Left,
    /// Diagonal descent to the left.
    LeftDown,
    /// Straight downhill.
    Down,
    /// Diagonal descent to the right.
    RightDown,
    /// Traversing right with minimal descent.
    Right,
}

impl Heading {
    /// The next heading one step to the left, if any.
    #[must_use]
    pub const fn step_left(self) -> Option<Self> {
        match self {
            Self::Left => None,
            Self::LeftDown => Some(Self::Left),
            Self::Down => Some(Self::LeftDown),
            Self::RightDown => Some(Self::Down),
            Self::Right => Some(Self::RightDown),
        }
    }

    /// The next heading one step to the right, if any.
    #[must_use]
    pub const fn step_right(self) -> Option<Self> {
        match self {
            Self::Left => Some(Self::LeftDown),
            Self::LeftDown => Some(Self::Down),
            Self::Down => Some(Self::RightDown),
            Self::RightDown => Some(Self::Right),
            Self::Right => None,
        }
    }

    /// Unit-ish displacement ratios for this heading.
    ///
    /// Full-turn headings move mostly horizontally with partial descent;
    /// half-turn headings move diagonally; `Down` descends straight.
    #[must_use]
    pub const fn direction(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.3),
            Self::LeftDown => Vec2::new(-0.7, 0.7),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::RightDown => Vec2::new(0.7, 0.7),
            Self::Right => Vec2::new(1.0, 0.3),
        }
    }
}

/// Discrete condition of a skiing actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocomotionState {
    /// On the snow, steerable, heading in a direction.
    Gliding(Heading),
    /// Launched into the air; same heading ratios at higher speed.
    Flying(Heading),
    /// Down in the snow until the recovery timer expires.
    Crashed,
}

/// Countdown measured in simulation ticks.
///
/// Timers are inert until started and report their expiry exactly once, the
/// tick their countdown reaches zero.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TickTimer {
    remaining: u32,
}

impl TickTimer {
    /// A timer that is not running.
    #[must_use]
    pub const fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// Starts (or restarts) the countdown at `ticks`.
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Stops the countdown without expiring.
    pub fn cancel(&mut self) {
        self.remaining = 0;
    }

    /// Whether the countdown is still running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Advances one tick; returns `true` only on the expiring tick.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Per-actor locomotion state machine.
#[derive(Component, Debug, Clone, Serialize)]
pub struct Locomotion {
    state: LocomotionState,
    turn_cooldown: TickTimer,
    impact: TickTimer,
    flying: TickTimer,
    recovery: TickTimer,
    collision_count: u8,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::with_heading(Heading::Down)
    }
}

impl Locomotion {
    /// Creates a gliding state machine with the given initial heading.
    #[must_use]
    pub const fn with_heading(heading: Heading) -> Self {
        Self {
            state: LocomotionState::Gliding(heading),
            turn_cooldown: TickTimer::idle(),
            impact: TickTimer::idle(),
            flying: TickTimer::idle(),
            recovery: TickTimer::idle(),
            collision_count: 0,
        }
    }

    /// Current discrete state.
    #[must_use]
    pub const fn state(&self) -> LocomotionState {
        self.state
    }

    /// Obstacle hits accumulated since the last recovery.
    #[must_use]
    pub const fn collision_count(&self) -> u8 {
        self.collision_count
    }

    /// Whether the actor is gliding and accepts steering and tilt.
    #[must_use]
    pub const fn is_steerable(&self) -> bool {
        matches!(self.state, LocomotionState::Gliding(_))
    }

    /// True while an impact stagger runs, or while flying or crashed.
    ///
    /// Consumers use this to suppress new collision triggers and to gate the
    /// impact speed penalty.
    #[must_use]
    pub const fn is_in_collision_state(&self) -> bool {
        self.impact.is_active()
            || matches!(
                self.state,
                LocomotionState::Flying(_) | LocomotionState::Crashed
            )
    }

    /// Steps the heading one notch left. Returns `false` without effect at
    /// the end of the range, while flying or crashed, or during the post-turn
    /// cooldown.
    pub fn turn_left(&mut self) -> bool {
        self.turn(Heading::step_left)
    }

    /// Steps the heading one notch right; failure conditions mirror
    /// [`Self::turn_left`].
    pub fn turn_right(&mut self) -> bool {
        self.turn(Heading::step_right)
    }

    fn turn(&mut self, step: fn(Heading) -> Option<Heading>) -> bool {
        let LocomotionState::Gliding(heading) = self.state else {
            return false;
        };
        if self.turn_cooldown.is_active() {
            return false;
        }
        let Some(next) = step(heading) else {
            return false;
        };
        self.state = LocomotionState::Gliding(next);
        self.turn_cooldown.start(TURN_COOLDOWN_TICKS);
        true
    }

    /// Registers an obstacle hit.
    ///
    /// Ignored (returns `false`) while flying, crashed, or already staggered.
    /// Below the escalation threshold the hit starts an impact stagger whose
    /// length depends on `hardness`; the threshold hit launches the skier
    /// into [`LocomotionState::Flying`] and starts the flying timer.
    pub fn on_collision(&mut self, hardness: ObstacleHardness) -> bool {
        if self.is_in_collision_state() {
            return false;
        }
        let LocomotionState::Gliding(heading) = self.state else {
            return false;
        };
        self.collision_count = self.collision_count.saturating_add(1);
        if self.collision_count >= COLLISION_ESCALATION_THRESHOLD {
            debug!("collision threshold reached, launching skier");
            self.state = LocomotionState::Flying(heading);
            self.flying.start(FLYING_DURATION_TICKS);
        } else {
            let ticks = match hardness {
                ObstacleHardness::Soft => IMPACT_SOFT_TICKS,
                ObstacleHardness::Hard => IMPACT_HARD_TICKS,
            };
            self.impact.start(ticks);
        }
        true
    }

    /// Minor feedback for clipping a gate pole: a short stagger that does not
    /// advance the escalation counter. Rejected in any collision state.
    pub fn graze(&mut self) -> bool {
        if self.is_in_collision_state() {
            return false;
        }
        self.impact.start(GATE_GRAZE_TICKS);
        true
    }

    /// Forces the actor straight into the crashed state.
    ///
    /// Used for AI skiers, which skip the escalation ladder. Returns `false`
    /// if already crashed.
    pub fn crash(&mut self) -> bool {
        if matches!(self.state, LocomotionState::Crashed) {
            return false;
        }
        self.state = LocomotionState::Crashed;
        self.flying.cancel();
        self.impact.cancel();
        self.recovery.start(RECOVERY_DURATION_TICKS);
        true
    }

    /// Advances all timers by one tick and applies expiry transitions:
    /// flying expiry crashes the actor, recovery expiry puts it back on its
    /// skis heading down and resets the collision counter.
    pub fn tick(&mut self) {
        self.turn_cooldown.tick();
        self.impact.tick();
        if self.flying.tick() {
            debug!("flying timer expired, skier crashes");
            self.state = LocomotionState::Crashed;
            self.recovery.start(RECOVERY_DURATION_TICKS);
        }
        if self.recovery.tick() {
            debug!("recovery timer expired, skier back up");
            self.state = LocomotionState::Gliding(Heading::Down);
            self.collision_count = 0;
        }
    }

    /// Per-tick displacement on the world plane for the current state.
    ///
    /// Flying states reuse the gliding direction ratios at a higher overall
    /// speed; crashed actors do not move; a staggered glide is slowed down.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        match self.state {
            LocomotionState::Crashed => Vec2::ZERO,
            LocomotionState::Flying(heading) => {
                heading.direction() * BASE_RUN_SPEED * FLYING_SPEED_MULTIPLIER
            }
            LocomotionState::Gliding(heading) => {
                let velocity = heading.direction() * BASE_RUN_SPEED;
                if self.impact.is_active() {
                    velocity * IMPACT_SLOWDOWN
                } else {
                    velocity
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(locomotion: &mut Locomotion, ticks: u32) {
        for _ in 0..ticks {
            locomotion.tick();
        }
    }

    #[test]
    fn cooldown_blocks_immediate_second_turn() {
        let mut locomotion = Locomotion::default();
        assert!(locomotion.turn_right());
        assert!(!locomotion.turn_right());
        settle(&mut locomotion, TURN_COOLDOWN_TICKS);
        assert!(locomotion.turn_right());
    }

    #[test]
    fn graze_slows_without_counting() {
        let mut locomotion = Locomotion::default();
        assert!(locomotion.graze());
        assert!(locomotion.is_in_collision_state());
        assert_eq!(locomotion.collision_count(), 0);
        let slowed = locomotion.velocity();
        assert!(slowed.length() < Heading::Down.direction().length() * BASE_RUN_SPEED);
        assert!(!locomotion.graze(), "graze is rejected while staggered");
    }

    #[test]
    fn crash_cancels_flight() {
        let mut locomotion = Locomotion::default();
        assert!(locomotion.crash());
        assert_eq!(locomotion.state(), LocomotionState::Crashed);
        assert!(!locomotion.crash());
        assert_eq!(locomotion.velocity(), Vec2::ZERO);
        settle(&mut locomotion, RECOVERY_DURATION_TICKS);
        assert_eq!(
            locomotion.state(),
            LocomotionState::Gliding(Heading::Down)
        );
    }
}
