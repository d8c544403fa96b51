//! Input and output channels of the machine. Input is pulled through an `InputSource`
//! injected at construction; output is pushed as raw cells and decoded into text once the
//! program halts.

use std::collections::VecDeque;

use crate::cell::{cell_to_char, encode_ascii_line, Cell};
use crate::error::RunError;

/// Supplies the value for each `Input` instruction. `None` means no input is left.
pub trait InputSource {
  fn next_input(&mut self) -> Option<Cell>;
}

/// A one-shot scalar channel: every `Input` instruction reads the same value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FixedInput(pub Cell);

impl InputSource for FixedInput {
  fn next_input(&mut self) -> Option<Cell> {
    Some(self.0)
  }
}

/// An ordered queue of pending values, consumed front to back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InputQueue {
  pending: VecDeque<Cell>
}

impl InputQueue {
  pub fn new() -> InputQueue {
    InputQueue::default()
  }

  /// Builds the ASCII text protocol: each line's code points followed by a newline.
  pub fn from_ascii_lines<'a, I>(lines: I) -> InputQueue
    where I: IntoIterator<Item = &'a str>
  {
    let mut queue = InputQueue::new();
    for line in lines {
      queue.extend(encode_ascii_line(line));
    }
    queue
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }
}

impl Extend<Cell> for InputQueue {
  fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
    self.pending.extend(iter);
  }
}

impl From<Vec<Cell>> for InputQueue {
  fn from(values: Vec<Cell>) -> InputQueue {
    InputQueue { pending: values.into() }
  }
}

impl InputSource for InputQueue {
  fn next_input(&mut self) -> Option<Cell> {
    self.pending.pop_front()
  }
}

/// Accumulates every value the program outputs, in order, for the lifetime of a run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OutputBuffer {
  values: Vec<Cell>
}

impl OutputBuffer {
  pub fn with_capacity(capacity: usize) -> OutputBuffer {
    OutputBuffer { values: Vec::with_capacity(capacity) }
  }

  pub fn push(&mut self, value: Cell) {
    self.values.push(value);
  }

  pub fn values(&self) -> &[Cell] {
    &self.values
  }

  /// Decodes each value as one character.
  pub fn to_text(&self) -> Result<String, RunError> {
    self.values.iter().map(|&value| cell_to_char(value)).collect()
  }
}
