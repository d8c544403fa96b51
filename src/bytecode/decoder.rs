/*!
  This module is responsible for decoding instruction words. Decoding is pure arithmetic
  on the word: the opcode is `word % 100` and the mode of operand `n` is the decimal digit
  at place `10^(n+2)`.

*/
use std::convert::TryFrom;

use super::{AddressingMode, Instruction, Opcode, MAX_ARITY};
use crate::address::Address;
use crate::cell::Cell;
use crate::error::RunError;
use crate::memory::Memory;

// Place values of the mode digits, first operand first.
const MODE_PLACES: [Cell; MAX_ARITY] = [100, 1_000, 10_000];

/// Extracts the raw addressing mode digit of operand `operand` (zero based).
fn mode_digit(word: Cell, operand: usize) -> Cell {
  (word / MODE_PLACES[operand]) % 10
}

/**
  Decodes an instruction word found at `pc`. Only the mode digits of operands the opcode
  actually has are validated; higher digits are ignored. The `pc` is used for error
  reporting only.
*/
fn decode_word(word: Cell, pc: Address) -> Result<Instruction, RunError> {
  let unknown = RunError::UnknownOpcode { pc, word };
  if word < 0 {
    return Err(unknown);
  }
  let opcode = u8::try_from(word % 100)
    .ok()
    .and_then(|code| Opcode::try_from(code).ok())
    .ok_or(unknown)?;

  let arity = opcode.arity();
  let mut modes = [AddressingMode::Position; MAX_ARITY];
  for (operand, mode) in modes.iter_mut().enumerate().take(arity) {
    let digit = mode_digit(word, operand);
    *mode = u8::try_from(digit)
      .ok()
      .and_then(|d| AddressingMode::try_from(d).ok())
      .ok_or(RunError::InvalidAddressingMode { pc, digit })?;
  }

  if opcode.writes_destination() && modes[arity - 1] == AddressingMode::Immediate {
    return Err(RunError::ImmediateDestination { pc });
  }

  Ok(Instruction { opcode, modes })
}

/// Reads and decodes the instruction at `pc`, returning it with the address of its first
/// operand.
pub fn decode(memory: &mut Memory, pc: Address) -> Result<(Instruction, Address), RunError> {
  let instruction = decode_word(memory.read(pc)?, pc)?;
  Ok((instruction, pc + 1))
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::AddressingMode::*;

  fn decoded(word: Cell) -> Result<Instruction, RunError> {
    decode_word(word, Address(0))
  }

  #[test]
  fn bare_opcodes(){
    let add = decoded(1).unwrap();
    assert_eq!(add.opcode, Opcode::Add);
    assert_eq!(add.modes, [Position; 3]);
    assert_eq!(decoded(99).unwrap().opcode, Opcode::Halt);
    assert_eq!(decoded(9).unwrap().opcode, Opcode::AdjustRelativeBase);
  }

  #[test]
  fn modes_read_right_to_left(){
    let instruction = decoded(1002).unwrap();
    assert_eq!(instruction.opcode, Opcode::Multiply);
    assert_eq!(instruction.modes, [Position, Immediate, Position]);

    let instruction = decoded(21101).unwrap();
    assert_eq!(instruction.modes, [Immediate, Immediate, Relative]);

    let instruction = decoded(204).unwrap();
    assert_eq!(instruction.opcode, Opcode::Output);
    assert_eq!(instruction.operand_modes(), &[Relative]);
  }

  #[test]
  fn digits_past_arity_are_ignored(){
    let instruction = decoded(70104).unwrap();
    assert_eq!(instruction.opcode, Opcode::Output);
    assert_eq!(instruction.modes, [Immediate, Position, Position]);
    assert_eq!(decoded(12399).unwrap().opcode, Opcode::Halt);
  }

  #[test]
  fn unknown_opcodes(){
    let pc = Address(0);
    assert_eq!(decoded(0), Err(RunError::UnknownOpcode { pc, word: 0 }));
    assert_eq!(decoded(42), Err(RunError::UnknownOpcode { pc, word: 42 }));
    assert_eq!(decoded(-1), Err(RunError::UnknownOpcode { pc, word: -1 }));
    assert_eq!(decoded(198), Err(RunError::UnknownOpcode { pc, word: 198 }));
  }

  #[test]
  fn bad_mode_digits(){
    let pc = Address(0);
    assert_eq!(decoded(301), Err(RunError::InvalidAddressingMode { pc, digit: 3 }));
    assert_eq!(decoded(9005), Err(RunError::InvalidAddressingMode { pc, digit: 9 }));
  }

  #[test]
  fn immediate_destinations(){
    let pc = Address(0);
    assert_eq!(decoded(10001), Err(RunError::ImmediateDestination { pc }));
    assert_eq!(decoded(103), Err(RunError::ImmediateDestination { pc }));
    assert_eq!(decoded(203).unwrap().modes[0], Relative);
  }

  #[test]
  fn decode_from_memory(){
    let mut memory = Memory::new(vec![1101, 1, 2, 0, 99]).unwrap();
    let (instruction, next) = decode(&mut memory, Address(0)).unwrap();
    assert_eq!(instruction.opcode, Opcode::Add);
    assert_eq!(next, Address(1));

    let (instruction, next) = decode(&mut memory, Address(4)).unwrap();
    assert_eq!(instruction.opcode, Opcode::Halt);
    assert_eq!(next, Address(5));
  }
}
