use std::collections::VecDeque;

use serde::Serialize;

use crate::pit::{
    types::{Coord, Direction},
    SnakeID,
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Running,
    Paused,
    Over,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    FoodEaten {
        snake_id: SnakeID,
    },
    MatchOver {
        winner:       SnakeID,
        winner_alive: bool,
        scores:       Vec<u64>,
    },
}

#[derive(Serialize, Debug, Clone)]
pub struct SnakeView {
    pub id:      SnakeID,
    pub color:   [u8; 3],
    pub body:    VecDeque<Coord>,
    pub heading: Direction,
    pub alive:   bool,
    pub length:  usize,
}

/// Read-only view of a match, published after every tick.
#[derive(Serialize, Debug, Clone)]
pub struct Snapshot {
    pub width:                i64,
    pub height:               i64,
    pub snakes:               Vec<SnakeView>,
    pub food:                 Vec<Coord>,
    pub scores:               Vec<u64>,
    pub elapsed_ticks:        u64,
    pub match_duration_ticks: u64,
    pub seconds_left:         u64,
    pub phase:                Phase,
    pub winner:               Option<SnakeID>,
}

#[derive(Serialize, Debug)]
pub struct Status {
    pub name:    String,
    pub author:  String,
    pub version: String,
    pub phase:   Phase,
}
