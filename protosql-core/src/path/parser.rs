//! Path parser using nom.
//!
//! Grammar:
//! ```text
//! path       = "$" step*
//! step       = "." identifier | "[" integer "]"
//! identifier = [A-Za-z_] [A-Za-z0-9_]*
//! integer    = ("+" | "-")? digit+          (must fit in i64)
//! ```
//!
//! No whitespace is allowed anywhere.

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::ast::{Path, Step};
use super::error::PathError;

/// Parse complete path text.
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    if !input.starts_with('$') {
        return Err(PathError::MissingRoot {
            path: input.to_string(),
        });
    }

    let syntax_error = |rest: &str| PathError::Syntax {
        path: input.to_string(),
        offset: input.len() - rest.len(),
        rest: rest.to_string(),
    };

    match path(input) {
        Ok(("", steps)) => Ok(Path::new(steps)),
        Ok((rest, _)) => Err(syntax_error(rest)),
        Err(_) => Err(syntax_error(input)),
    }
}

// =============================================================================
// Step Parsers
// =============================================================================

/// `$` followed by as many well-formed steps as possible.
fn path(input: &str) -> IResult<&str, Vec<Step>> {
    preceded(char('$'), many0(step))(input)
}

fn step(input: &str) -> IResult<&str, Step> {
    alt((field_step, index_step))(input)
}

fn field_step(input: &str) -> IResult<&str, Step> {
    map(preceded(char('.'), identifier), |name: &str| {
        Step::Field(name.to_string())
    })(input)
}

fn index_step(input: &str) -> IResult<&str, Step> {
    map(delimited(char('['), integer, char(']')), Step::Index)(input)
}

// =============================================================================
// Tokens
// =============================================================================

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse::<i64>)(input)
}
