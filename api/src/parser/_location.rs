// re-exported by `parser`
use std::fmt;

/// Where, in the input, an error was detected.
///
/// Text formats report line-column positions;
/// formats read through a byte-oriented reader (e.g. XML) report byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The parser could not tell.
    Unknown,
    Pos(Position),
    /// From the first position to the second.
    Span(Position, Position),
}

impl Location {
    pub fn from_offset(offset: usize) -> Location {
        Position::Offset(offset).into()
    }

    /// `line` and `column` start at 1.
    pub fn from_lico(line: usize, column: usize) -> Location {
        Position::LiCo(line, column).into()
    }

    pub fn from_licos(line1: usize, column1: usize, line2: usize, column2: usize) -> Location {
        Location::Span(
            Position::LiCo(line1, column1),
            Position::LiCo(line2, column2),
        )
    }

    /// The starting position, unless unknown.
    pub fn start(&self) -> Option<Position> {
        match self {
            Location::Unknown => None,
            Location::Pos(p) | Location::Span(p, _) => Some(*p),
        }
    }

    /// The line of the starting position, if this is a line-column location.
    pub fn line(&self) -> Option<usize> {
        match self.start()? {
            Position::LiCo(line, _) => Some(line),
            Position::Offset(_) => None,
        }
    }
}

impl From<Position> for Location {
    fn from(pos: Position) -> Self {
        Location::Pos(pos)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => f.write_str("?"),
            Location::Pos(pos) => pos.fmt(f),
            Location::Span(from, to) => write!(f, "{from}-{to}"),
        }
    }
}

/// A point in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Bytes from the start, starting at 0.
    Offset(usize),
    /// Line and column, both starting at 1.
    LiCo(usize, usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Offset(offset) => write!(f, "byte {offset}"),
            Position::LiCo(line, column) => write!(f, "{line}:{column}"),
        }
    }
}

/// Implemented by every parse error of this workspace.
pub trait WithLocation {
    fn location(&self) -> Location;
}
