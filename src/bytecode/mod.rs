/*!

  Intcode instructions are variable width. The first cell of an instruction is the
  instruction word; it is followed by one cell per operand. The instruction word is read
  as a decimal number:

  ```text
      ABCDE
        ^^^---- DE:  opcode (two least significant digits)
       ^------- C:   addressing mode of the first operand
      ^-------- B:   addressing mode of the second operand
     ^--------- A:   addressing mode of the third operand
  ```

  Leading zeros are omitted, so a missing mode digit means `Position`. Only the digits
  for the opcode's own operands are significant.

  Operands that are written to (destinations) are never resolved to a value. Their cell
  holds an address literal, which is used as is in `Position` mode or offset by the
  relative base in `Relative` mode. `Immediate` makes no sense for a destination.

*/

mod decoder;
mod listing;

pub use decoder::decode;
pub use listing::parse_listing;

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/// The most operands any instruction takes.
pub const MAX_ARITY: usize = 3;

/// Opcodes of the virtual machine, numbered as they appear in the instruction word.
#[derive(
StrumDisplay, IntoStaticStr, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Opcode {
  Add                = 1,  // add( a, b, dest )
  Multiply           = 2,  // multiply( a, b, dest )
  Input              = 3,  // input( dest )
  Output             = 4,  // output( a )
  JumpIfTrue         = 5,  // jump_if_true( a, target )
  JumpIfFalse        = 6,  // jump_if_false( a, target )
  LessThan           = 7,  // less_than( a, b, dest )
  Equals             = 8,  // equals( a, b, dest )
  AdjustRelativeBase = 9,  // adjust_relative_base( a )
  Halt               = 99, // halt
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The number of operand cells that follow the instruction word.
  pub fn arity(&self) -> usize {
    match self {
      Opcode::Add
      | Opcode::Multiply
      | Opcode::LessThan
      | Opcode::Equals               => 3,

      Opcode::JumpIfTrue
      | Opcode::JumpIfFalse          => 2,

      Opcode::Input
      | Opcode::Output
      | Opcode::AdjustRelativeBase   => 1,

      Opcode::Halt                   => 0,
    }
  }

  /// Whether the last operand is a destination address rather than a value.
  pub fn writes_destination(&self) -> bool {
    match self {
      Opcode::Add
      | Opcode::Multiply
      | Opcode::Input
      | Opcode::LessThan
      | Opcode::Equals => true,
      _                => false
    }
  }
}

/// How an operand cell is turned into a value or a destination address.
#[derive(
StrumDisplay, IntoStaticStr, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,    Debug,         Hash
)]
#[repr(u8)]
pub enum AddressingMode {
  /// The operand is the address of the value.
  Position  = 0,
  /// The operand is the value.
  Immediate = 1,
  /// The operand plus the relative base is the address of the value.
  Relative  = 2,
}

impl Default for AddressingMode {
  fn default() -> AddressingMode {
    AddressingMode::Position
  }
}

/// A decoded instruction word. Modes past the opcode's arity are always `Position`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub opcode: Opcode,
  pub modes: [AddressingMode; MAX_ARITY]
}

impl Instruction {
  /// The addressing modes of the operands this instruction actually has.
  pub fn operand_modes(&self) -> &[AddressingMode] {
    &self.modes[..self.opcode.arity()]
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.opcode.arity() == 0 {
      return write!(f, "{}", self.opcode);
    }
    write!(
      f,
      "{}({})",
      self.opcode,
      self.operand_modes()
          .iter()
          .map(|mode| Into::<&'static str>::into(*mode))
          .collect::<Vec<&str>>()
          .join(", ")
    )
  }
}
