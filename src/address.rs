//! Memory addresses. An address is always a valid, non-negative index into memory; every
//! conversion from a cell value goes through `Address::try_from_cell`, so a negative address
//! is caught at the moment it is formed rather than wrapping around.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::Add;

use crate::cell::Cell;
use crate::error::RunError;

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct Address(pub AddressNumberType);

impl Address {
  /// Converts the address to an index into memory.
  pub fn idx(&self) -> AddressNumberType {
    self.0
  }

  /// Interprets a cell value as an address. Negative values are outside the address space.
  pub fn try_from_cell(value: Cell) -> Result<Address, RunError> {
    AddressNumberType::try_from(value)
      .map(Address)
      .map_err(|_| RunError::AddressOutOfDomain { value })
  }

  /// Adds a signed offset, as relative addressing does with the relative base.
  pub fn offset(base: Cell, offset: Cell, pc: Address) -> Result<Address, RunError> {
    let value = base
      .checked_add(offset)
      .ok_or(RunError::ArithmeticOverflow { pc })?;
    Address::try_from_cell(value)
  }
}

impl Display for Address{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "MEM[{}]", self.0)
  }
}

// Increment an address
impl Add<AddressNumberType> for Address{
  type Output = Address;
  fn add(self, rhs: AddressNumberType) -> Address{
    Address(self.0 + rhs)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_cell(){
    assert_eq!(Address::try_from_cell(0), Ok(Address(0)));
    assert_eq!(Address::try_from_cell(1234), Ok(Address(1234)));
    assert_eq!(
      Address::try_from_cell(-1),
      Err(RunError::AddressOutOfDomain { value: -1 })
    );
  }

  #[test]
  fn relative_offsets(){
    let pc = Address(7);
    assert_eq!(Address::offset(10, -3, pc), Ok(Address(7)));
    assert_eq!(
      Address::offset(2, -3, pc),
      Err(RunError::AddressOutOfDomain { value: -1 })
    );
    assert_eq!(
      Address::offset(Cell::max_value(), 1, pc),
      Err(RunError::ArithmeticOverflow { pc })
    );
  }

  #[test]
  fn display(){
    assert_eq!(format!("{}", Address(42) + 1), "MEM[43]");
  }
}
