//! Core data model for Finger Dice.
//! Touch identifiers and positions come straight from the host's touch events;
//! everything else here is produced by the session state machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-finger identifier reported by the host. Unique only while the finger is down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TouchId(pub i32);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen coordinates in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Position,
}

impl TouchPoint {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            position: Position { x, y },
        }
    }
}

/// A CSS color string such as `#FF3B30`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Drawn when an identifier somehow has no assignment.
    pub fn fallback() -> Self {
        Self::new("#fff")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chosen on the menu before a session starts; fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    SinglePick,
    GroupSplit,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::SinglePick => f.write_str("single-pick"),
            Mode::GroupSplit => f.write_str("group-split"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => f.write_str("A"),
            Team::B => f.write_str("B"),
        }
    }
}

/// The finger chosen by a single-pick draw, frozen where it was at draw time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub id: TouchId,
    pub position: Position,
    pub color: Color,
}

/// One finger's slot in a group-split result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub team: Team,
    /// Position captured at draw time; never updated afterwards.
    pub position: Position,
    /// The finger's own color, kept so players can still find themselves.
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawResult {
    Single(Winner),
    Groups(BTreeMap<TouchId, GroupMember>),
}

impl DrawResult {
    pub fn ids(&self) -> Vec<TouchId> {
        match self {
            DrawResult::Single(winner) => vec![winner.id],
            DrawResult::Groups(members) => members.keys().copied().collect(),
        }
    }

    pub fn frozen_position(&self, id: TouchId) -> Option<Position> {
        match self {
            DrawResult::Single(winner) => (winner.id == id).then_some(winner.position),
            DrawResult::Groups(members) => members.get(&id).map(|m| m.position),
        }
    }

    pub fn team_of(&self, id: TouchId) -> Option<Team> {
        match self {
            DrawResult::Single(_) => None,
            DrawResult::Groups(members) => members.get(&id).map(|m| m.team),
        }
    }

    /// `(team A, team B)` sizes; `(0, 0)` for a single pick.
    pub fn team_sizes(&self) -> (usize, usize) {
        match self {
            DrawResult::Single(_) => (0, 0),
            DrawResult::Groups(members) => {
                let a = members.values().filter(|m| m.team == Team::A).count();
                (a, members.len() - a)
            }
        }
    }
}
