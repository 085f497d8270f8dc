//! Keyboard mapping

use crate::sim::Heading;

/// Host-level input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Snake direction change
    Steer(Heading),
    /// Start or restart the open game
    Start,
    /// Leave the open game for the menu
    Back,
    /// Autopilot on/off
    ToggleIdle,
}

impl Command {
    /// Map a `KeyboardEvent.key` value. While `typing` (Word Hunter has the
    /// text field), letters belong to the field and only Enter/Escape map.
    pub fn from_key(key: &str, typing: bool) -> Option<Self> {
        match key {
            "Enter" => return Some(Command::Start),
            "Escape" => return Some(Command::Back),
            _ => {}
        }
        if typing {
            return None;
        }
        match key {
            "ArrowUp" | "w" | "W" => Some(Command::Steer(Heading::Up)),
            "ArrowDown" | "s" | "S" => Some(Command::Steer(Heading::Down)),
            "ArrowLeft" | "a" | "A" => Some(Command::Steer(Heading::Left)),
            "ArrowRight" | "d" | "D" => Some(Command::Steer(Heading::Right)),
            " " => Some(Command::Start),
            "i" | "I" => Some(Command::ToggleIdle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_steer() {
        assert_eq!(
            Command::from_key("ArrowUp", false),
            Some(Command::Steer(Heading::Up))
        );
        assert_eq!(
            Command::from_key("d", false),
            Some(Command::Steer(Heading::Right))
        );
        assert_eq!(Command::from_key("q", false), None);
    }

    #[test]
    fn test_typing_keeps_letters() {
        assert_eq!(Command::from_key("i", true), None);
        assert_eq!(Command::from_key("w", true), None);
        assert_eq!(Command::from_key("Escape", true), Some(Command::Back));
        assert_eq!(Command::from_key("Enter", true), Some(Command::Start));
    }
}
