//! The machine's memory store: a zero-indexed vector of cells that grows with zeros whenever
//! an access lands past its end. It never shrinks.

use std::ops::Deref;

use crate::address::Address;
use crate::cell::Cell;
use crate::error::{LoadError, RunError};

/// The most cells memory may grow to (1 GiB). Addresses at or beyond this are out of range.
pub const MAX_CELLS: usize = 1 << 27;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  cells: Vec<Cell>
}

impl Memory {

  pub fn new(program: Vec<Cell>) -> Result<Memory, LoadError> {
    if program.is_empty() {
      return Err(LoadError::EmptyProgram);
    }
    Ok(Memory { cells: program })
  }

  /**
    Grows memory, filling with zeros, so that `address` is in bounds. Every read and write
    goes through here, so this is the only place memory ever changes length. Growth past
    `MAX_CELLS`, or an allocation the system refuses, is `AddressOutOfRange`.
  */
  pub fn ensure_capacity(&mut self, address: Address) -> Result<(), RunError> {
    if address.idx() < self.cells.len() {
      return Ok(());
    }
    let out_of_range = RunError::AddressOutOfRange { address };
    if address.idx() >= MAX_CELLS {
      return Err(out_of_range);
    }
    let additional = address.idx() + 1 - self.cells.len();
    self.cells.try_reserve(additional).map_err(|_e| out_of_range)?;
    self.cells.resize(address.idx() + 1, 0);
    Ok(())
  }

  pub fn read(&mut self, address: Address) -> Result<Cell, RunError> {
    self.ensure_capacity(address)?;
    Ok(self.cells[address.idx()])
  }

  pub fn write(&mut self, address: Address, value: Cell) -> Result<(), RunError> {
    self.ensure_capacity(address)?;
    self.cells[address.idx()] = value;
    Ok(())
  }

  /// Overwrites a cell before the program runs, e.g. setting `MEM[0]` to 2 to switch a
  /// program into its interactive mode.
  pub fn patch(&mut self, address: Address, value: Cell) -> Result<(), RunError> {
    self.write(address, value)
  }

  pub fn as_slice(&self) -> &[Cell] {
    &self.cells
  }
}

impl Deref for Memory {
  type Target = [Cell];

  fn deref(&self) -> &[Cell] {
    &self.cells
  }
}
