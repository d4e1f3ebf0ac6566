//! Rally scoring.
//!
//! A rally is a run of racket hits without a terminating miss. A racket
//! hit arms the tracker; the next side-wall contact converts it into a
//! point and clears the floor-bounce count. Too many consecutive floor
//! bounces without an intervening racket hit end the rally.

use crate::room::Wall;

#[derive(Debug, Clone)]
pub struct RallyTracker {
    rally: u32,
    floor_bounces: u32,
    awaiting_wall: bool,
    max_floor_bounces: u32,
}

impl RallyTracker {
    pub fn new(max_floor_bounces: u32) -> Self {
        Self {
            rally: 0,
            floor_bounces: 0,
            awaiting_wall: false,
            max_floor_bounces,
        }
    }

    pub fn rally(&self) -> u32 {
        self.rally
    }

    /// The ball was struck by the racket; the next scoring wall converts
    /// this into a point.
    pub fn on_racket_hit(&mut self) {
        self.awaiting_wall = true;
    }

    /// Feed a wall contact. Returns the new rally count when it changed.
    pub fn on_wall_hit(&mut self, wall: Wall) -> Option<u32> {
        if wall.is_floor() {
            self.floor_bounces += 1;
            if self.floor_bounces >= self.max_floor_bounces {
                self.floor_bounces = 0;
                if self.rally != 0 {
                    self.rally = 0;
                    return Some(0);
                }
            }
            return None;
        }

        if wall.scores() && self.awaiting_wall {
            self.awaiting_wall = false;
            self.rally += 1;
            self.floor_bounces = 0;
            return Some(self.rally);
        }
        None
    }

    pub fn reset(&mut self) {
        self.rally = 0;
        self.floor_bounces = 0;
        self.awaiting_wall = false;
    }
}
