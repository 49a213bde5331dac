use std::env;

use crate::api::{parse_record, FlagParser};
use crate::parser::base::ParseError;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::prelude::FlagRecord;

/// Report the result of a parse, returning the process exit code.
///
/// * Success: `0`.
/// * Help request: the help message is printed, `0`.
/// * Any other error: the error is printed, `1`.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::{exit_code, ConsoleInterface, ParseError};
///
/// assert_eq!(exit_code(Ok(()), &ConsoleInterface::default()), 0);
/// assert_eq!(exit_code(Err(ParseError::MissingCommand), &ConsoleInterface::default()), 1);
/// ```
pub fn exit_code(
    result: Result<(), ParseError>,
    user_interface: &(impl UserInterface + ?Sized),
) -> i32 {
    match result {
        Ok(()) => 0,
        Err(ParseError::HelpRequested { usage }) => {
            user_interface.print(usage);
            0
        }
        Err(error) => {
            user_interface.print_error(error);
            1
        }
    }
}

fn process_tokens() -> Vec<String> {
    // The first token is the program name.
    env::args().skip(1).collect()
}

fn finish(result: Result<(), ParseError>) {
    if result.is_err() {
        std::process::exit(exit_code(result, &ConsoleInterface::default()));
    }
}

impl<'c, G: FlagRecord> FlagParser<'c, G> {
    /// Run the parser, and then the resolved command, against the Cli [`env::args`].
    ///
    /// On a help request, the help message is printed and the process exits with code `0`.
    /// On any other error (including one returned by the command), the error is printed and the process exits with code `1`.
    pub fn run_env(&self, globals: Option<&mut G>) {
        let tokens = process_tokens();
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        finish(self.run_tokens(tokens.as_slice(), globals));
    }
}

/// Parse the Cli [`env::args`] into a single record, without any commands.
///
/// On a help request, the help message is printed and the process exits with code `0`.
/// On any other error, the error is printed and the process exits with code `1`.
pub fn parse_env<R: FlagRecord>(program: &str, record: &mut R) {
    let tokens = process_tokens();
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    finish(parse_record(program, tokens.as_slice(), record));
}
