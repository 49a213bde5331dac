//! `fieldflag` binds command line flags, environment variables and positional arguments straight into struct fields.
//!
//! Describe the Cli once, as a plain struct with per-field metadata, and `fieldflag` derives the flag set from it.
//! Parsing writes into the struct in place; nothing is cached between parses.
//! Specifically, `fieldflag` aims for the following:
//! * *Field-first configuration*:
//! Each field carries its own flag name(s), usage, environment variable and default value.
//! * *Go style flags*:
//! Flags are `-name value`, `-name=value` or `--name value`; boolean flags need no value.
//! Flag scanning stops at the first non-flag token, or after `--`.
//! * *Positional capture*:
//! Leftover tokens are bound into `#nonflag` fields, in declaration order.
//! * *Commands sharing global flags*:
//! A [`FlagParser`] binds the global record, then dispatches the next token to a [`Command`].
//! * *No surprises on help*:
//! A help request never touches the record.
//!
//! # Usage
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/copier.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ copier -h
//! Usage: copier [OPTION]... SOURCE DEST...
//!
//! Options:
//!   -v           bool
//!                Print each copied file.
//!   -j, -jobs    u8 (default: 4, env: COPIER_JOBS)
//!                The number of parallel copies.
//!   SOURCE       string
//!                The file to copy.
//!   DEST...      string
//!                The locations to copy into.
//!
//! $ copier -v notes.txt /tmp/a /tmp/b
//! notes.txt -> /tmp/a
//! notes.txt -> /tmp/b
//! Copied 2 times with 4 jobs.
//!
//! $ copier -jobs many notes.txt
//! invalid value for flag -jobs: cannot convert 'many' to u8: invalid digit found in string
//! ```
//!
//! or equivalently via builder Api (this page), here with a custom value type:
//! ```no_run
#![doc = include_str!("../demos/builder.rs")]
//! ```
//!
//! # Builder Api
//! Describe each field with a [`FieldSpec`], and bind it to its location with [`Binder::field`].
//! A record implements [`FlagRecord`](./prelude/trait.FlagRecord.html) to bind all its fields, in declaration order.
//!
//! ### Field kinds
//! The kind of a field follows from its type and its `name`:
//! * A named flag, for `bool`, the integer types, `f32`/`f64`, `String`, or any [`FlagValue`](./prelude/trait.FlagValue.html).
//! Comma separated names are aliases for the same field (ex: `"v, verbose"`).
//! Without a name, the flag name is the identifier with a lower-cased first letter (or just that letter, via [`FieldSpec::short`]).
//! * A single-value positional, for a `String` named `"#nonflag"` (or `"#nonflag:LABEL"`).
//! * The multi-value positional, for a `Vec<String>` named `"#nonflag"`.
//! It captures the tail of the leftover tokens; a record may have at most one.
//! * Skipped, for the name `"-"`.
//!
//! ### Initial values
//! Before any flag is written, each field is initialized from its environment variable when set, otherwise from its declared default.
//! Fields with neither keep their current value.
//! An explicit flag then overrides both.
//!
//! ### Commands
//! Register commands on a [`FlagParser`].
//! The first token after the global flags (and positionals) names the command; an optional resolver (ex: [`unique_prefix`]) may rewrite it.
//! The command receives an [`Invocation`] with the remaining tokens, which it may [parse](./struct.Invocation.html#method.parse) into its own record.
//!
//! ```no_run
#![doc = include_str!("../demos/repo_tool.rs")]
//! ```
//!
//! ```console
//! $ repo_tool -h
//! A toy repository tool.
//!
//! Usage: repo_tool [OPTION]... COMMAND [ARGUMENT]...
//!
//! Options:
//!   -v     bool
//!          Print more output.
//!   -root  string (default: ".", env: REPO_ROOT)
//!          The repository root.
//!
//! Commands:
//!   clone   Clone a repository.
//!   log     Show the commit history.
//!   status  Show the working tree status.
//!
//! $ repo_tool -root /src clo -depth 1 https://example.com/repo.git
//! Cloning https://example.com/repo.git into /src (depth 1).
//!
//! $ repo_tool st
//! Nothing to commit.
//! ```
//!
//! # Errors
//! Mistakes in the Cli input are returned as [`ParseError`]s; the help request is [`ParseError::HelpRequested`].
//! Mistakes in the record or command declarations are [`ConfigError`]s, raised as panics before any token is consumed.
//! Use [`FlagParser::describe`] to check the declarations without panicking.
//!
//! # Features
//! * `tracing_debug`: log the parser's decisions via `tracing` at debug level.
//! * `unit_test`: expose [`InMemoryInterface`](./struct.InMemoryInterface.html) to capture the printed output in tests.
pub mod derive;
pub use fieldflag_builder::*;
