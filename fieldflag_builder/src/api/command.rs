use crate::api::core::parse_record;
use crate::parser::{fatal, ConfigError, ParseError};
use crate::prelude::FlagRecord;

type Run<'c> = Box<dyn Fn(&Invocation) -> Result<(), ParseError> + 'c>;
type RunWithGlobals<'c, G> = Box<dyn Fn(&G, &Invocation) -> Result<(), ParseError> + 'c>;

/// The strategy consulted when the next token names no command.
///
/// Receives the tokens starting from the candidate command name, and may rewrite them.
/// The rewritten tokens are looked up once more.
pub type Resolver<'c, G> = Box<dyn Fn(&[String], &[Command<'c, G>]) -> Option<Vec<String>> + 'c>;

/// A named sub-command, dispatched after the global flags are parsed.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::Command;
///
/// let command: Command<()> = Command::new("status", "Show the working tree status.")
///     .run(|invocation| {
///         println!("status {:?}", invocation.args());
///         Ok(())
///     });
/// ```
pub struct Command<'c, G> {
    name: String,
    usage: String,
    pub(crate) run: Option<Run<'c>>,
    pub(crate) run_with_globals: Option<RunWithGlobals<'c, G>>,
}

impl<'c, G> std::fmt::Debug for Command<'c, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("run", &self.run.is_some())
            .field("run_with_globals", &self.run_with_globals.is_some())
            .finish()
    }
}

impl<'c, G> Command<'c, G> {
    /// Create a command without any handler.
    pub fn new(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            run: None,
            run_with_globals: None,
        }
    }

    /// Set the handler which receives only the command's own invocation.
    pub fn run(mut self, handler: impl Fn(&Invocation) -> Result<(), ParseError> + 'c) -> Self {
        self.run.replace(Box::new(handler));
        self
    }

    /// Set the handler which also receives the populated global record.
    ///
    /// Used only when there is no plain handler.
    pub fn run_with_globals(
        mut self,
        handler: impl Fn(&G, &Invocation) -> Result<(), ParseError> + 'c,
    ) -> Self {
        self.run_with_globals.replace(Box::new(handler));
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub(crate) fn has_handler(&self) -> bool {
        self.run.is_some() || self.run_with_globals.is_some()
    }
}

/// The program name and remaining tokens handed to a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub(crate) fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The program name of the command: `"<program> <command>"`.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The tokens after the command name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The tokens after the command name, borrowed as `&str`.
    pub fn tokens(&self) -> Vec<&str> {
        self.args.iter().map(AsRef::as_ref).collect()
    }

    /// Parse the command's own flags into `record`.
    ///
    /// ### Example
    /// ```
    /// # use fieldflag_builder as fieldflag;
    /// use fieldflag::{Binder, Command, FieldSpec, FlagParser};
    /// use fieldflag::prelude::*;
    ///
    /// #[derive(Default)]
    /// struct CloneFlags {
    ///     depth: u32,
    /// }
    ///
    /// impl FlagRecord for CloneFlags {
    ///     fn bind<'a>(&'a mut self, binder: &mut Binder<'a>) {
    ///         binder.field(FieldSpec::new("depth"), &mut self.depth);
    ///     }
    /// }
    ///
    /// let parser = FlagParser::bare("git")
    ///     .command(Command::new("clone", "").run(|invocation| {
    ///         let mut clone = CloneFlags::default();
    ///         invocation.parse(&mut clone)?;
    ///         assert_eq!(clone.depth, 1);
    ///         Ok(())
    ///     }));
    ///
    /// parser.run_tokens(&["clone", "-depth", "1"], None).unwrap();
    /// ```
    pub fn parse<R: FlagRecord>(&self, record: &mut R) -> Result<(), ParseError> {
        parse_record(&self.program, &self.tokens(), record)
    }
}

/// A resolved command, ready to run.
#[derive(Debug)]
pub struct Dispatch<'p, 'c, G> {
    command: &'p Command<'c, G>,
    invocation: Invocation,
}

impl<'p, 'c, G> Dispatch<'p, 'c, G> {
    pub(crate) fn new(command: &'p Command<'c, G>, invocation: Invocation) -> Self {
        Self {
            command,
            invocation,
        }
    }

    /// The resolved command.
    pub fn command(&self) -> &Command<'c, G> {
        self.command
    }

    /// The invocation handed to the command.
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Run the command's handler.
    ///
    /// The plain handler is preferred.
    /// The with-globals handler runs only when there is no plain handler, and only when `globals` are provided.
    ///
    /// Panics when no handler applies.
    pub fn run(self, globals: Option<&G>) -> Result<(), ParseError> {
        let Dispatch {
            command,
            invocation,
        } = self;

        match (&command.run, &command.run_with_globals, globals) {
            (Some(run), _, _) => run(&invocation),
            (None, Some(run), Some(globals)) => run(globals, &invocation),
            (None, Some(_), None) => fatal(ConfigError::GlobalsRequired {
                command: command.name.clone(),
            }),
            (None, None, _) => fatal(ConfigError::MissingHandler {
                command: command.name.clone(),
            }),
        }
    }
}

/// The successful result of one parse pass.
#[derive(Debug)]
pub enum Outcome<'p, 'c, G> {
    /// The tokens were bound into the record; there are no commands.
    Bound,
    /// The tokens were bound into the global record, and a command was resolved.
    Dispatched(Dispatch<'p, 'c, G>),
}

impl<'p, 'c, G> Outcome<'p, 'c, G> {
    /// Run the resolved command, if any.
    pub fn run(self, globals: Option<&G>) -> Result<(), ParseError> {
        match self {
            Outcome::Bound => Ok(()),
            Outcome::Dispatched(dispatch) => dispatch.run(globals),
        }
    }
}

/// A [`Resolver`] strategy: rewrite an unambiguous prefix of a command name to its full name.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::{unique_prefix, Command, FlagParser, Outcome};
///
/// let parser = FlagParser::bare("git")
///     .command(Command::new("status", "").run(|_| Ok(())))
///     .command(Command::new("stash", "").run(|_| Ok(())))
///     .resolver(unique_prefix);
///
/// match parser.parse_tokens(&["stat"], None).unwrap() {
///     Outcome::Dispatched(dispatch) => assert_eq!(dispatch.command().name(), "status"),
///     Outcome::Bound => unreachable!(),
/// }
/// assert!(parser.parse_tokens(&["st"], None).is_err());
/// ```
pub fn unique_prefix<G>(tokens: &[String], commands: &[Command<'_, G>]) -> Option<Vec<String>> {
    let (candidate, rest) = tokens.split_first()?;

    if candidate.is_empty() {
        return None;
    }

    let mut matches: Vec<&str> = commands
        .iter()
        .map(|command| command.name())
        .filter(|name| name.starts_with(candidate.as_str()))
        .collect();
    matches.dedup();

    match matches.as_slice() {
        [name] => {
            let mut rewritten = vec![name.to_string()];
            rewritten.extend(rest.iter().cloned());
            Some(rewritten)
        }
        _ => None,
    }
}
