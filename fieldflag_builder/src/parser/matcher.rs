use crate::constant::*;
use crate::parser::base::ParseError;
use crate::parser::flagset::{Assignment, FlagSet};

/// The result of aligning the tokens to the flags.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Matched {
    /// The help convention was used.
    Help,
    Flags {
        assignments: Vec<Assignment>,
        remaining: Vec<String>,
    },
}

/// Align the tokens to the flags, without converting or writing any values.
///
/// Scanning stops at the first non-flag token, or after `--`.
/// The unscanned tokens are returned as `remaining`.
///
/// A help request anywhere in the scanned tokens takes precedence over any matching error.
pub(crate) fn match_tokens(flags: &FlagSet, tokens: &[&str]) -> Result<Matched, ParseError> {
    let mut assignments = Vec::default();
    let mut first_error: Option<ParseError> = None;
    let mut help = false;
    let mut position = 0;

    while position < tokens.len() {
        let token = tokens[position];

        if token.len() < 2 || !token.starts_with('-') {
            break;
        }

        position += 1;

        if token == END_OF_FLAGS {
            break;
        }

        let body = token.strip_prefix("--").unwrap_or(&token[1..]);

        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            first_error.get_or_insert(ParseError::BadSyntax(token.to_string()));
            continue;
        }

        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match flags.find(name) {
            None if name == HELP_NAME || name == HELP_SHORT => {
                help = true;
            }
            None => {
                first_error.get_or_insert(ParseError::UnknownFlag(name.to_string()));
            }
            Some(index) => {
                let value = if flags.is_bool_flag(index) {
                    Some(attached.unwrap_or("true").to_string())
                } else if let Some(value) = attached {
                    Some(value.to_string())
                } else if position < tokens.len() {
                    // The next token is the value, even when it looks like a flag.
                    position += 1;
                    Some(tokens[position - 1].to_string())
                } else {
                    first_error.get_or_insert(ParseError::MissingValue(name.to_string()));
                    None
                };

                if let Some(value) = value {
                    assignments.push(Assignment {
                        index,
                        name: name.to_string(),
                        value,
                    });
                }
            }
        }
    }

    if help {
        return Ok(Matched::Help);
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(Matched::Flags {
            assignments,
            remaining: tokens[position..].iter().map(|t| t.to_string()).collect(),
        }),
    }
}
