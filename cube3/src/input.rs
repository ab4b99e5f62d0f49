//! Keyboard input.
//!
//! Input is level-triggered: once per frame, the platform is asked which directional keys are
//! currently held. There is no event queue in between, so a key held for several frames moves the
//! object on every one of them.

/// One of the four movement directions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
  /// Towards `-x`.
  Left,
  /// Towards `+x`.
  Right,
  /// Towards `+y`.
  Up,
  /// Towards `-y`.
  Down,
}

impl Direction {
  /// All directions, in polling order.
  pub const ALL: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
  ];
}

/// Held state of the four directions.
///
/// Directions are independent; holding two opposite ones is allowed and cancels out.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Directions {
  /// Left held.
  pub left: bool,
  /// Right held.
  pub right: bool,
  /// Up held.
  pub up: bool,
  /// Down held.
  pub down: bool,
}

impl Directions {
  /// Nothing held.
  pub const NONE: Directions = Directions {
    left: false,
    right: false,
    up: false,
    down: false,
  };

  /// Build the held state by asking a predicate about each direction.
  pub fn from_fn(mut held: impl FnMut(Direction) -> bool) -> Self {
    let mut dirs = Directions::NONE;

    for dir in Direction::ALL {
      dirs.set(dir, held(dir));
    }

    dirs
  }

  /// Whether a given direction is held.
  pub fn is_held(&self, dir: Direction) -> bool {
    match dir {
      Direction::Left => self.left,
      Direction::Right => self.right,
      Direction::Up => self.up,
      Direction::Down => self.down,
    }
  }

  /// Mark a direction as held or released.
  pub fn set(&mut self, dir: Direction, held: bool) {
    match dir {
      Direction::Left => self.left = held,
      Direction::Right => self.right = held,
      Direction::Up => self.up = held,
      Direction::Down => self.down = held,
    }
  }

  /// Whether no direction is held.
  pub fn is_empty(&self) -> bool {
    *self == Directions::NONE
  }
}

/// Synchronous keyboard polling.
pub trait KeySampler {
  /// Directions currently held.
  fn sample_directions(&self) -> Directions;
}
