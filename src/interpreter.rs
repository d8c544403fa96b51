//! The Intcode interpreter: memory, the program counter, the relative base register, and
//! the execution loop that ties them to an input source and an output buffer.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::address::Address;
use crate::bytecode::{decode, parse_listing, AddressingMode, Opcode};
use crate::cell::Cell;
use crate::error::{LoadError, RunError};
use crate::io::{FixedInput, InputSource, OutputBuffer};
use crate::memory::Memory;

// Initial capacity of the output buffer. Map-drawing programs print a few thousand characters.
const OUTPUT_CAPACITY: usize = 4096;
// How many memory cells on either side of the PC the state table shows.
const MEMORY_WINDOW: usize = 8;

/// What happened in a single step of execution.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
  Continue,
  Halted
}

pub struct Interpreter {
  /// Program and data, one store.
  memory        : Memory,
  /// Address of the next cell to be read; a cursor.
  pc            : Address,
  /// Added to operands in `Relative` mode.
  relative_base : Cell,
  input         : Box<dyn InputSource>,
  output        : OutputBuffer,
  halted        : bool,
}

impl Interpreter {

  // region Display methods

  fn make_memory_table(cells: &[Cell], highlight: usize, start: usize) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, cell) in cells.iter().enumerate() {
      match i + start == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> MEM[{}] =", i + start), format!("{}", cell)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("MEM[{}] =", i + start), format!("{}", cell)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Value"]);
    table.add_row(row![r->"PC =", format!("{}", self.pc)]);
    table.add_row(row![r->"RB =", format!("{}", self.relative_base)]);
    table.add_row(row![r->"Memory size =", format!("{}", self.memory.len())]);
    table.add_row(row![r->"Output length =", format!("{}", self.output.values().len())]);
    table
  }

  // endregion

  // region Construction and inspection

  /// Creates an interpreter whose every `Input` instruction reads `input`.
  pub fn new(program: Vec<Cell>, input: Cell) -> Result<Interpreter, LoadError> {
    Interpreter::with_input(program, FixedInput(input))
  }

  pub fn with_input<I>(program: Vec<Cell>, input: I) -> Result<Interpreter, LoadError>
    where I: InputSource + 'static
  {
    Ok(
      Interpreter {
        memory        :  Memory::new(program)?,
        pc            :  Address(0),
        relative_base :  0,
        input         :  Box::new(input),
        output        :  OutputBuffer::with_capacity(OUTPUT_CAPACITY),
        halted        :  false,
      }
    )
  }

  /// Parses a program listing and creates an interpreter for it.
  pub fn from_listing(listing: &str, input: Cell) -> Result<Interpreter, LoadError> {
    Interpreter::new(parse_listing(listing)?, input)
  }

  /// Overwrites a memory cell before running.
  pub fn patch(&mut self, address: Address, value: Cell) -> Result<(), RunError> {
    self.memory.patch(address, value)
  }

  pub fn pc(&self) -> Address {
    self.pc
  }

  pub fn relative_base(&self) -> Cell {
    self.relative_base
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn output(&self) -> &OutputBuffer {
    &self.output
  }

  pub fn is_halted(&self) -> bool {
    self.halted
  }

  // endregion

  // region Operand resolution

  /// Reads the cell at the PC and advances past it.
  fn fetch(&mut self) -> Result<Cell, RunError> {
    let value = self.memory.read(self.pc)?;
    self.pc = self.pc + 1;
    Ok(value)
  }

  /// Consumes one operand cell and resolves it to a value.
  fn read_operand(&mut self, mode: AddressingMode, pc: Address) -> Result<Cell, RunError> {
    let literal = self.fetch()?;
    match mode {
      AddressingMode::Immediate => Ok(literal),
      AddressingMode::Position  => {
        let address = Address::try_from_cell(literal)?;
        self.memory.read(address)
      }
      AddressingMode::Relative  => {
        let address = Address::offset(self.relative_base, literal, pc)?;
        self.memory.read(address)
      }
    }
  }

  /// Consumes one operand cell and resolves it to the address it designates.
  fn read_destination(&mut self, mode: AddressingMode, pc: Address) -> Result<Address, RunError> {
    let literal = self.fetch()?;
    match mode {
      AddressingMode::Position  => Address::try_from_cell(literal),
      AddressingMode::Relative  => Address::offset(self.relative_base, literal, pc),
      AddressingMode::Immediate => Err(RunError::ImmediateDestination { pc })
    }
  }

  // endregion

  // region Execution

  /**
    Executes the instruction at the PC.

    Jumps consume their target operand only when taken. An untaken jump steps the PC over
    the target cell without reading it, so the target is never resolved and never causes
    memory to grow.
  */
  pub fn step(&mut self) -> Result<Step, RunError> {
    if self.halted {
      return Err(RunError::AlreadyHalted);
    }

    let pc = self.pc;
    let (instruction, operands) = decode(&mut self.memory, pc)?;
    self.pc = operands;

    #[cfg(feature = "trace_computation")]
    eprintln!(
      "{:>12} │ {:<44} │ RB = {}",
      format!("{}", pc), format!("{}", instruction), self.relative_base
    );

    let [mode1, mode2, mode3] = instruction.modes;
    let overflow = RunError::ArithmeticOverflow { pc };

    match instruction.opcode {

      Opcode::Add => {
        let a           = self.read_operand(mode1, pc)?;
        let b           = self.read_operand(mode2, pc)?;
        let destination = self.read_destination(mode3, pc)?;
        self.memory.write(destination, a.checked_add(b).ok_or(overflow)?)?;
      }

      Opcode::Multiply => {
        let a           = self.read_operand(mode1, pc)?;
        let b           = self.read_operand(mode2, pc)?;
        let destination = self.read_destination(mode3, pc)?;
        self.memory.write(destination, a.checked_mul(b).ok_or(overflow)?)?;
      }

      Opcode::Input => {
        let destination = self.read_destination(mode1, pc)?;
        let value = self.input.next_input().ok_or(RunError::InputExhausted { pc })?;
        self.memory.write(destination, value)?;
      }

      Opcode::Output => {
        let value = self.read_operand(mode1, pc)?;
        self.output.push(value);
      }

      Opcode::JumpIfTrue => {
        let condition = self.read_operand(mode1, pc)?;
        if condition != 0 {
          let target = self.read_operand(mode2, pc)?;
          self.pc = Address::try_from_cell(target)?;
        } else {
          self.pc = self.pc + 1;
        }
      }

      Opcode::JumpIfFalse => {
        let condition = self.read_operand(mode1, pc)?;
        if condition == 0 {
          let target = self.read_operand(mode2, pc)?;
          self.pc = Address::try_from_cell(target)?;
        } else {
          self.pc = self.pc + 1;
        }
      }

      Opcode::LessThan => {
        let a           = self.read_operand(mode1, pc)?;
        let b           = self.read_operand(mode2, pc)?;
        let destination = self.read_destination(mode3, pc)?;
        self.memory.write(destination, (a < b) as Cell)?;
      }

      Opcode::Equals => {
        let a           = self.read_operand(mode1, pc)?;
        let b           = self.read_operand(mode2, pc)?;
        let destination = self.read_destination(mode3, pc)?;
        self.memory.write(destination, (a == b) as Cell)?;
      }

      Opcode::AdjustRelativeBase => {
        let offset = self.read_operand(mode1, pc)?;
        self.relative_base = self.relative_base.checked_add(offset).ok_or(overflow)?;
      }

      Opcode::Halt => {
        self.halted = true;
        return Ok(Step::Halted);
      }

    }

    Ok(Step::Continue)
  }

  fn run_to_halt(&mut self) -> Result<(), RunError> {
    while self.step()? == Step::Continue {}
    Ok(())
  }

  /// Runs until `Halt` and returns every output value, undecoded.
  pub fn run_values(&mut self) -> Result<Vec<Cell>, RunError> {
    self.run_to_halt()?;
    Ok(self.output.values().to_vec())
  }

  /// Runs until `Halt` and returns the output, one character per output value.
  pub fn run(&mut self) -> Result<String, RunError> {
    self.run_to_halt()?;
    self.output.to_text()
  }

  // endregion

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Interpreter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let pc    = self.pc.idx();
    let start = pc.saturating_sub(MEMORY_WINDOW).min(self.memory.len());
    let end   = (pc + MEMORY_WINDOW + 1).min(self.memory.len());

    let m_table = Interpreter::make_memory_table(&self.memory[start..end], pc, start);
    let r_table = self.make_register_table();

    let mut combined_table = table!([m_table, r_table]);

    combined_table.set_titles(row![ub->"Memory", ub->"Registers"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    let status = match self.halted {
      true  => "Halted.",
      false => "Running."
    };

    write!(f, "{}\n{}", status, combined_table)
  }
}
