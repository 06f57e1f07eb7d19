//! Input parsing for human players.

use crate::grid::Direction;

/// Request typed by a human player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move one cell in the given direction.
    Move(Direction),
    /// Stop playing.
    Quit,
    /// Anything that could not be understood.
    Unknown,
}

/// Parses a single line of player input.
///
/// This function accepts the `w`, `a`, `s` and `d` keys, the words `up`, `left`, `down` and
/// `right`, and the direction names themselves, in any case and with surrounding whitespace.
/// `q` and `quit` end the game.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "w" | "up" | "n" | "north" => Command::Move(Direction::North),
        "d" | "right" | "e" | "east" => Command::Move(Direction::East),
        "s" | "down" | "south" => Command::Move(Direction::South),
        "a" | "left" | "west" => Command::Move(Direction::West),
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wasd_keys() {
        assert_eq!(parse_command("w"), Command::Move(Direction::North));
        assert_eq!(parse_command("a"), Command::Move(Direction::West));
        assert_eq!(parse_command("s"), Command::Move(Direction::South));
        assert_eq!(parse_command("d"), Command::Move(Direction::East));
    }

    #[test]
    fn test_parse_words_and_case() {
        assert_eq!(parse_command("  North\n"), Command::Move(Direction::North));
        assert_eq!(parse_command("RIGHT"), Command::Move(Direction::East));
        assert_eq!(parse_command("down"), Command::Move(Direction::South));
        assert_eq!(parse_command("west"), Command::Move(Direction::West));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("Quit"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command(""), Command::Unknown);
        assert_eq!(parse_command("jump"), Command::Unknown);
        assert_eq!(parse_command("w a"), Command::Unknown);
    }
}
