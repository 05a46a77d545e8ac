//! Axis-aligned headings for chain drives.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

/// One of the four grid directions. Screen space, so `Up` is negative y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Velocity of magnitude `speed` pointing this way.
    pub fn velocity(self, speed: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -speed),
            Direction::Down => Vec2::new(0.0, speed),
            Direction::Left => Vec2::new(-speed, 0.0),
            Direction::Right => Vec2::new(speed, 0.0),
        }
    }

    /// Unit step along this direction.
    pub fn unit(self) -> Vec2 {
        self.velocity(1.0)
    }

    /// Coin flip for the axis, then a coin flip for the sign.
    pub fn random_initial<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let horizontal = rng.gen_bool(0.5);
        let negative = rng.gen_bool(0.5);
        match (horizontal, negative) {
            (true, true) => Direction::Left,
            (true, false) => Direction::Right,
            (false, true) => Direction::Up,
            (false, false) => Direction::Down,
        }
    }

    /// All four directions in a random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
        let mut dirs = Self::ALL;
        dirs.shuffle(rng);
        dirs
    }

    /// Recover a direction from an axis-aligned velocity.
    ///
    /// When both components are non-zero the vertical one wins.
    pub fn from_velocity(velocity: Vec2) -> Option<Self> {
        if velocity.y > 0.0 {
            Some(Direction::Down)
        } else if velocity.y < 0.0 {
            Some(Direction::Up)
        } else if velocity.x > 0.0 {
            Some(Direction::Right)
        } else if velocity.x < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}
