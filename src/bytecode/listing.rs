/*!
  The textual form of a program is a listing: decimal integers separated by commas, e.g.
  `1,9,10,3,2,3,11,0,99,30,40,50`. Whitespace and line breaks may surround any integer.
  This module parses a listing into the initial contents of memory.
*/

use nom::{
  bytes::complete::take_till,
  character::complete::{
    char as one_char,
    digit1,
    multispace0
  },
  combinator::{all_consuming, map_res, opt, recognize},
  error::ErrorKind,
  multi::separated_list,
  sequence::{delimited, pair},
  IResult
};

use crate::cell::Cell;
use crate::error::LoadError;

// An integer with an optional sign, with the whitespace around it. Integers that do not fit
// in a cell fail here, like any other bad token.
fn cell_p(input: &str) -> IResult<&str, Cell> {
  delimited(
    multispace0,
    map_res(
      recognize(pair(opt(one_char('-')), digit1)),
      |digits: &str| digits.parse::<Cell>()
    ),
    multispace0
  )(input)
}

fn listing_p(input: &str) -> IResult<&str, Vec<Cell>> {
  all_consuming(separated_list(one_char(','), cell_p))(input)
}

/**
  Reports the comma-delimited field containing the point where parsing stopped, `rest`.
  The list parser stops either at the comma in front of a bad field or partway through
  one.
*/
fn malformed(text: &str, rest: &str) -> LoadError {
  let stopped_at = text.len() - rest.len();
  let field_start = match rest.starts_with(',') {
    true  => stopped_at + 1,
    false => text[..stopped_at].rfind(',').map_or(0, |comma| comma + 1)
  };

  let field = text[field_start..].trim_start();
  let token = match take_till::<_, &str, (&str, ErrorKind)>(|c| c == ',')(field) {
    Ok((_rest, token)) => token.trim_end(),
    Err(_e) => field
  };
  LoadError::MalformedProgram {
    offset: text.len() - field.len(),
    token: token.to_string()
  }
}

pub fn parse_listing(text: &str) -> Result<Vec<Cell>, LoadError> {
  if text.trim().is_empty() {
    return Err(LoadError::EmptyProgram);
  }

  match listing_p(text) {
    Ok((_rest, cells)) => Ok(cells),
    Err(nom::Err::Error((rest, _kind))) | Err(nom::Err::Failure((rest, _kind))) => {
      Err(malformed(text, rest))
    }
    Err(nom::Err::Incomplete(_needed)) => Err(malformed(text, text))
  }
}
