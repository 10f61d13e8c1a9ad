use std::str::FromStr;

use ottsweeper_core::{Coord, Coord2};
use thiserror::Error;

/// One discrete interaction read from the terminal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    /// Highlight the covered neighbors of a revealed cell.
    Peek(Coord2),
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("Expected two coordinates: <x> <y>")]
    MissingCoords,
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Coordinates outside the board")]
    OutOfRange,
}

pub(crate) const HELP: &str = "\
Commands:
  r <x> <y>   reveal a cell
  f <x> <y>   cycle flag / question mark / nothing
  c <x> <y>   reveal around a number whose flags are all placed
  p <x> <y>   show which cells around a number are still covered
  n           new game
  h           this help
  q           quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "c" | "chord" => Self::Chord(parse_coords(&mut words)?),
            "p" | "peek" => Self::Peek(parse_coords(&mut words)?),
            "n" | "new" | "reset" => Self::Reset,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let x = parse_axis(words.next())?;
    let y = parse_axis(words.next())?;
    Ok((x, y))
}

fn parse_axis(word: Option<&str>) -> Result<Coord, CommandError> {
    let word = word.ok_or(CommandError::MissingCoords)?;
    let value: i64 = word
        .parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))?;
    // values past the board but inside the axis type are left for the engine to ignore
    Coord::try_from(value).map_err(|_| CommandError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("r 3 4".parse(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  F 0 12 ".parse(), Ok(Command::Flag((0, 12))));
        assert_eq!("chord 1 1".parse(), Ok(Command::Chord((1, 1))));
        assert_eq!("p 2 2".parse(), Ok(Command::Peek((2, 2))));
    }

    #[test]
    fn parses_plain_commands() {
        assert_eq!("n".parse(), Ok(Command::Reset));
        assert_eq!("help".parse(), Ok(Command::Help));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("r 1".parse::<Command>(), Err(CommandError::MissingCoords));
        assert_eq!(
            "r a 1".parse::<Command>(),
            Err(CommandError::InvalidCoord("a".to_owned()))
        );
        assert_eq!("r -1 0".parse::<Command>(), Err(CommandError::OutOfRange));
        assert_eq!(
            "boom".parse::<Command>(),
            Err(CommandError::Unknown("boom".to_owned()))
        );
    }
}
