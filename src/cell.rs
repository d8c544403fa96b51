//! The memory word of the machine, and its conversions to and from text.

use std::convert::TryFrom;

use crate::error::RunError;

/// One addressable unit of memory.
pub type Cell = i64;

/// The code point that terminates every line of ASCII input.
pub const NEWLINE: Cell = 10;

/// Interprets an output value as a character. Values that are not Unicode scalar values are
/// an error rather than a replacement character, since callers parse the text that results.
pub fn cell_to_char(value: Cell) -> Result<char, RunError> {
  u32::try_from(value)
    .ok()
    .and_then(std::char::from_u32)
    .ok_or(RunError::InvalidCodePoint { value })
}

/**
  Encodes a line of text the way ASCII-speaking programs expect to read it: one cell per
  character holding its code point, followed by a newline.
*/
pub fn encode_ascii_line(line: &str) -> Vec<Cell> {
  line
    .chars()
    .map(|c| c as Cell)
    .chain(std::iter::once(NEWLINE))
    .collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn printable_cells(){
    assert_eq!(cell_to_char(35), Ok('#'));
    assert_eq!(cell_to_char(10), Ok('\n'));
    assert_eq!(cell_to_char(7), Ok('\u{7}'));
  }

  #[test]
  fn rejects_non_characters(){
    assert_eq!(cell_to_char(-1), Err(RunError::InvalidCodePoint { value: -1 }));
    assert_eq!(cell_to_char(0xD800), Err(RunError::InvalidCodePoint { value: 0xD800 }));
    assert_eq!(
      cell_to_char(Cell::max_value()),
      Err(RunError::InvalidCodePoint { value: Cell::max_value() })
    );
  }

  #[test]
  fn movement_routine(){
    assert_eq!(
      encode_ascii_line("A,A,B"),
      vec![65, 44, 65, 44, 66, 10]
    );
    assert_eq!(encode_ascii_line(""), vec![10]);
  }
}
