use std::fmt;
use std::str::FromStr;

/// A player move. `Stop` is the canonical no-op returned at terminal nodes.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Stop,
}

impl Action {
    /// The four sliding directions, in generation order.
    pub const DIRECTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    pub fn is_stop(&self) -> bool {
        matches!(self, Action::Stop)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action_str = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Stop => "stop",
        };
        write!(f, "{}", action_str)
    }
}

type ParseError = &'static str;
impl FromStr for Action {
    type Err = ParseError;
    fn from_str(action: &str) -> Result<Self, Self::Err> {
        match action.to_lowercase().as_str() {
            "up" | "u" => Ok(Action::Up),
            "down" | "d" => Ok(Action::Down),
            "left" | "l" => Ok(Action::Left),
            "right" | "r" => Ok(Action::Right),
            "stop" => Ok(Action::Stop),
            _ => Err("invalid action; options are: up, down, left, right, stop"),
        }
    }
}
