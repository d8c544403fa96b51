//! Failures of the interpreter. None of them are recoverable mid-run: a program that trips
//! one is malformed, and the error says where.

use crate::address::Address;
use crate::cell::Cell;

/// Problems found while turning a listing into memory, before anything executes.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum LoadError {
  #[error("the program listing is empty")]
  EmptyProgram,

  /// `offset` is the byte offset of `token` within the listing text.
  #[error("malformed program: `{token}` at byte {offset} is not an integer")]
  MalformedProgram {
    offset: usize,
    token: String
  },
}

/// Fatal conditions raised by the execution loop.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum RunError {
  #[error("unknown opcode in word {word} at {pc}")]
  UnknownOpcode {
    pc: Address,
    word: Cell
  },

  #[error("invalid addressing mode digit {digit} in instruction at {pc}")]
  InvalidAddressingMode {
    pc: Address,
    digit: Cell
  },

  #[error("immediate mode used for a destination operand in instruction at {pc}")]
  ImmediateDestination {
    pc: Address
  },

  #[error("negative address {value}")]
  AddressOutOfDomain {
    value: Cell
  },

  #[error("address {address} is beyond the largest memory the machine can grow to")]
  AddressOutOfRange {
    address: Address
  },

  #[error("input requested at {pc} but no input is left")]
  InputExhausted {
    pc: Address
  },

  #[error("output value {value} is not a character")]
  InvalidCodePoint {
    value: Cell
  },

  #[error("arithmetic overflow in instruction at {pc}")]
  ArithmeticOverflow {
    pc: Address
  },

  #[error("the program has already halted")]
  AlreadyHalted,
}

/// Either kind of failure, for callers that load and run in one go.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Load(#[from] LoadError),

  #[error(transparent)]
  Run(#[from] RunError),
}
