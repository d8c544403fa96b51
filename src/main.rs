use std::fs;
use std::io::{self, Read};
use std::process;

use argh::FromArgs;

use intcode::{parse_listing, Address, Cell, Error, InputQueue, Interpreter};

/// Runs an Intcode program to completion and prints its output as text.
#[derive(FromArgs)]
struct Arguments {
  /// the program listing to run,
  /// if not specified, stdin is used
  #[argh(positional)]
  program: Option<String>,

  /// the value every input instruction reads
  #[argh(option, short = 'i', default = "1")]
  input: Cell,

  /// a line of ASCII input, queued with a trailing newline;
  /// may be repeated, and replaces --input
  #[argh(option)]
  ascii: Vec<String>,

  /// overwrite a memory cell before running, written ADDRESS=VALUE;
  /// may be repeated
  #[argh(option, from_str_fn(parse_patch))]
  patch: Vec<(Address, Cell)>,

  /// print the raw output values, one per line
  #[argh(switch)]
  raw: bool,

  /// print the machine state after the program halts
  #[argh(switch)]
  dump: bool,
}

fn parse_patch(text: &str) -> Result<(Address, Cell), String> {
  let mut parts = text.splitn(2, '=');
  let address = parts.next().unwrap_or("").trim();
  let value = parts
    .next()
    .ok_or_else(|| format!("expected ADDRESS=VALUE, got `{}`", text))?
    .trim();

  let address = address
    .parse::<usize>()
    .map_err(|e| format!("bad address `{}`: {}", address, e))?;
  let value = value
    .parse::<Cell>()
    .map_err(|e| format!("bad value `{}`: {}", value, e))?;
  Ok((Address(address), value))
}

fn read_listing(path: &Option<String>) -> io::Result<String> {
  match path {
    Some(path) => fs::read_to_string(path),
    None => {
      let mut text = String::new();
      io::stdin().read_to_string(&mut text)?;
      Ok(text)
    }
  }
}

fn execute(arguments: &Arguments, listing: &str) -> Result<(), Error> {
  let program = parse_listing(listing)?;
  let mut machine =
    if arguments.ascii.is_empty() {
      Interpreter::new(program, arguments.input)?
    } else {
      let input = InputQueue::from_ascii_lines(arguments.ascii.iter().map(String::as_str));
      Interpreter::with_input(program, input)?
    };

  for &(address, value) in &arguments.patch {
    machine.patch(address, value)?;
  }

  match arguments.raw {
    true  => {
      for value in machine.run_values()? {
        println!("{}", value);
      }
    }
    false => print!("{}", machine.run()?)
  }

  if arguments.dump {
    println!("\n{}", machine);
  }
  Ok(())
}

fn main() {
  let arguments: Arguments = argh::from_env();

  #[cfg(feature = "trace_computation")]
  eprintln!("Computation Tracing ENABLED");

  let listing = match read_listing(&arguments.program) {
    Ok(listing) => listing,
    Err(e) => {
      eprintln!("Error: could not read the program: {}", e);
      process::exit(1);
    }
  };

  if let Err(e) = execute(&arguments, &listing) {
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}
