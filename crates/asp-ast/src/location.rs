use std::fmt::{self, Display, Formatter};

#[cfg(feature = "host")]
use serde::{Deserialize, Serialize};

use crate::text::Text;

#[cfg_attr(feature = "host", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct Position {
    pub filename: Text,
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position::new("<string>", 1, 1)
    }
}

impl Position {
    pub fn new(filename: &str, line: usize, column: usize) -> Self {
        Position {
            filename: Text::new(filename),
            line,
            column,
        }
    }
}

/// The source range a node was parsed from.
///
/// Locations never take part in structural comparison of nodes.
#[cfg_attr(feature = "host", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
pub struct Location {
    pub begin: Position,
    pub end: Position,
}

impl Location {
    pub fn new(begin: Position, end: Position) -> Self {
        Location { begin, end }
    }

    /// A location spanning `begin..end` columns of a single line.
    pub fn span(filename: &str, line: usize, begin: usize, end: usize) -> Self {
        Location {
            begin: Position::new(filename, line, begin),
            end: Position::new(filename, line, end),
        }
    }

    pub fn contains(&self, position: &Position) -> bool {
        (self.begin.line < position.line
            || (self.begin.line == position.line && self.begin.column <= position.column))
            && (self.end.line > position.line
                || (self.end.line == position.line && self.end.column >= position.column))
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.begin.filename, self.begin.line, self.begin.column)?;
        if self.begin.filename != self.end.filename {
            write!(f, "-{}:{}:{}", self.end.filename, self.end.line, self.end.column)
        } else if self.begin.line != self.end.line {
            write!(f, "-{}:{}", self.end.line, self.end.column)
        } else if self.begin.column != self.end.column {
            write!(f, "-{}", self.end.column)
        } else {
            Ok(())
        }
    }
}
