//! Player intents
//!
//! The simulation only sees [`Intent`] values; where they come from (a
//! keyboard, a script) is behind [`InputSource`].

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::sim::grid::Direction;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Second-player up (pong left paddle)
    AltUp,
    /// Second-player down
    AltDown,
    Quit,
    Restart,
}

impl Intent {
    /// Cardinal direction for the four movement intents
    pub fn direction(self) -> Option<Direction> {
        match self {
            Intent::MoveUp => Some(Direction::Up),
            Intent::MoveDown => Some(Direction::Down),
            Intent::MoveLeft => Some(Direction::Left),
            Intent::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Blocking input poll with an upper bound on the wait
pub trait InputSource {
    /// Wait up to `timeout` for one intent. `Ok(None)` means no input.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Intent>>;
}

/// Replays a fixed list of polls, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    polls: VecDeque<Option<Intent>>,
}

impl ScriptedInput {
    pub fn new(polls: impl IntoIterator<Item = Option<Intent>>) -> Self {
        Self {
            polls: polls.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.polls.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> io::Result<Option<Intent>> {
        Ok(self.polls.pop_front().unwrap_or(Some(Intent::Quit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        assert_eq!(Intent::MoveLeft.direction(), Some(Direction::Left));
        assert_eq!(Intent::AltUp.direction(), None);
        assert_eq!(Intent::Restart.direction(), None);
    }

    #[test]
    fn test_scripted_input_quits_when_exhausted() {
        let mut input = ScriptedInput::new([None, Some(Intent::MoveUp)]);
        let timeout = Duration::from_millis(1);
        assert_eq!(input.poll(timeout).unwrap(), None);
        assert_eq!(input.poll(timeout).unwrap(), Some(Intent::MoveUp));
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.poll(timeout).unwrap(), Some(Intent::Quit));
    }
}
