//! An interpreter for Intcode, a small integer-encoded instruction set with three
//! addressing modes, a relative base register, memory that grows on demand, and a
//! character-oriented I/O model (code points in, code points out).
//!
//! ```
//! use intcode::Interpreter;
//!
//! let mut machine = Interpreter::new(vec![3, 0, 4, 0, 99], 72).unwrap();
//! assert_eq!(machine.run().unwrap(), "H");
//! ```

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod cell;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod memory;

pub use address::Address;
pub use bytecode::{decode, parse_listing, AddressingMode, Instruction, Opcode};
pub use cell::Cell;
pub use error::{Error, LoadError, RunError};
pub use interpreter::{Interpreter, Step};
pub use io::{FixedInput, InputQueue, InputSource, OutputBuffer};
pub use memory::Memory;
