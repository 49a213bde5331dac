use thiserror::Error;

use crate::api::InvalidValue;
use crate::model::ValueKind;

/// A programmer mistake in the record or command declarations.
///
/// These are detected before any token is consumed.
/// The parse entry points raise them as panics; [`FlagParser::describe`](./struct.FlagParser.html#method.describe) returns them as values.
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A positional field of a type other than `String` or `Vec<String>`.
    #[error("Config error: only String/Vec<String> fields may be positional, found {kind} for field '{field}'.")]
    UnsupportedPositional { field: String, kind: ValueKind },
    /// A second `Vec<String>` positional field.
    #[error("Config error: duplicated multi-value positional field '{field}'.")]
    DuplicatePositionalMulti { field: String },
    /// A `Vec<String>` field which is not positional.
    #[error("Config error: Vec<String> is only supported as a positional field, found flag field '{field}'.")]
    UnsupportedFlag { field: String },
    /// The same flag name on two fields.
    #[error("Config error: flag '-{name}' is defined on both '{first}' and '{second}'.")]
    DuplicateFlag {
        name: String,
        first: String,
        second: String,
    },
    /// A `name` without any alias in it.
    #[error("Config error: field '{field}' does not resolve to any flag name.")]
    EmptyName { field: String },
    /// A declared default which does not convert into the field's type.
    #[error("Config error: invalid default for field '{field}': {source}")]
    InvalidDefault {
        field: String,
        #[source]
        source: InvalidValue,
    },
    /// A command registered without any handler.
    #[error("Config error: command '{command}' has no handler.")]
    MissingHandler { command: String },
    /// A with-globals command, on a parse without a global record.
    #[error("Config error: command '{command}' only runs with global flags, but none were provided.")]
    GlobalsRequired { command: String },
}

/// A user input mistake, or the help request.
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token such as `---x` or `-=x`.
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),
    /// A flag name which is not registered.
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),
    /// A non-boolean flag at the end of the tokens.
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),
    /// A flag value which does not convert into the field's type.
    #[error("invalid value for flag -{flag}: {source}")]
    InvalidValue {
        flag: String,
        #[source]
        source: InvalidValue,
    },
    /// Leftover tokens, for a record without positionals or commands.
    #[error("non-flag arguments not permitted: {}", .0.join(" "))]
    UnexpectedArguments(Vec<String>),
    /// More leftover tokens than positional fields.
    #[error("expected only {expected} positional arguments: {}", .found.join(" "))]
    TooManyArguments { expected: usize, found: Vec<String> },
    /// A command name which is not registered.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// No tokens left to name a command.
    #[error("no command to run")]
    MissingCommand,
    /// The help convention (`-h`, `-help`, `--help`) was used.
    /// Carries the rendered help message.
    #[error("help requested")]
    HelpRequested { usage: String },
}

impl ParseError {
    /// Whether this is the help request, rather than a genuine error.
    pub fn is_help(&self) -> bool {
        matches!(self, ParseError::HelpRequested { .. })
    }
}

/// Raise a configuration error.
pub(crate) fn fatal(error: ConfigError) -> ! {
    panic!("{error}")
}
