use crate::api::command::{Command, Dispatch, Invocation, Outcome, Resolver};
use crate::api::environment::{Environment, ProcessEnvironment};
use crate::api::field::Binder;
use crate::model::FlagSetDescription;
use crate::parser::flagset::FlagSet;
use crate::parser::matcher::{match_tokens, Matched};
use crate::parser::printer::{terminal_width, Usage};
use crate::parser::reflector::{reflect, Reflection};
use crate::parser::resolver::{distribute, resolve};
use crate::parser::{fatal, ConfigError, ParseError};
use crate::prelude::FlagRecord;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type UsageHook<'c> = Box<dyn Fn(&Usage) -> String + 'c>;

/// The command line parser.
///
/// Binds the tokens into a global record of type `G`, and then optionally resolves a [`Command`].
/// Nothing is cached between parses: the record is reflected afresh on each call.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::{Binder, FieldSpec, FlagParser};
/// use fieldflag::prelude::*;
///
/// #[derive(Default)]
/// struct Flags {
///     verbose: bool,
///     files: Vec<String>,
/// }
///
/// impl FlagRecord for Flags {
///     fn bind<'a>(&'a mut self, binder: &mut Binder<'a>) {
///         binder
///             .field(FieldSpec::new("verbose").short(), &mut self.verbose)
///             .field(FieldSpec::new("files").name("#nonflag"), &mut self.files);
///     }
/// }
///
/// let mut flags = Flags::default();
/// let parser = FlagParser::new("program");
/// parser.parse_tokens(&["-v", "a.txt", "b.txt"], Some(&mut flags)).unwrap();
///
/// assert!(flags.verbose);
/// assert_eq!(flags.files, vec!["a.txt", "b.txt"]);
/// ```
pub struct FlagParser<'c, G> {
    program: String,
    commands: Vec<Command<'c, G>>,
    resolver: Option<Resolver<'c, G>>,
    usage: Option<UsageHook<'c>>,
    environment: Box<dyn Environment + 'c>,
    width: Option<usize>,
}

impl<'c, G> std::fmt::Debug for FlagParser<'c, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagParser")
            .field("program", &self.program)
            .field("commands", &self.commands)
            .field("resolver", &self.resolver.is_some())
            .field("usage", &self.usage.is_some())
            .field("width", &self.width)
            .finish()
    }
}

impl<'c> FlagParser<'c, ()> {
    /// Create a command line parser without any global record.
    ///
    /// Only the help flags are recognized before the command name.
    pub fn bare(program: impl Into<String>) -> Self {
        Self::new(program)
    }
}

impl<'c, G> FlagParser<'c, G> {
    /// Create a command line parser.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            commands: Vec::default(),
            resolver: None,
            usage: None,
            environment: Box::new(ProcessEnvironment),
            width: None,
        }
    }

    /// Register a command, to be resolved from the first leftover token.
    ///
    /// Names should be unique; when repeated, the first registered command wins.
    /// Panics when the command has no handler.
    pub fn command(mut self, command: Command<'c, G>) -> Self {
        if !command.has_handler() {
            fatal(ConfigError::MissingHandler {
                command: command.name().to_string(),
            });
        }

        self.commands.push(command);
        self
    }

    /// Set the strategy consulted when the next token names no command.
    ///
    /// See [`unique_prefix`](./fn.unique_prefix.html).
    pub fn resolver(
        mut self,
        resolver: impl Fn(&[String], &[Command<'c, G>]) -> Option<Vec<String>> + 'c,
    ) -> Self {
        self.resolver.replace(Box::new(resolver));
        self
    }

    /// Set the hook rendering the help message from its default [`Usage`].
    ///
    /// ### Example
    /// ```
    /// # use fieldflag_builder as fieldflag;
    /// use fieldflag::FlagParser;
    ///
    /// let parser = FlagParser::bare("program")
    ///     .usage(|usage| format!("A program.\n{usage}"));
    /// let error = parser.parse_tokens(&["-h"], None).unwrap_err();
    ///
    /// assert_eq!(
    ///     error,
    ///     fieldflag::ParseError::HelpRequested {
    ///         usage: "A program.\nUsage: program\nno options.".to_string(),
    ///     },
    /// );
    /// ```
    pub fn usage(mut self, hook: impl Fn(&Usage) -> String + 'c) -> Self {
        self.usage.replace(Box::new(hook));
        self
    }

    /// Set where the initial field values are looked up (the process environment by default).
    pub fn environment(mut self, environment: impl Environment + 'c) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Wrap the help message to `width` columns, instead of the terminal width.
    pub fn width(mut self, width: usize) -> Self {
        self.width.replace(width);
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The registered commands, in registration order.
    pub fn commands(&self) -> &[Command<'c, G>] {
        &self.commands
    }
}

impl<'c, G: FlagRecord> FlagParser<'c, G> {
    /// Run the parser against the input tokens (excluding the program name).
    ///
    /// Parsing happens in two phases:
    /// 1. Token matching aligns the tokens to the flags.
    /// All tokens must be matched successfully in order to proceed to the next phase.
    /// 2. Token capturing writes the initial values (environment, otherwise declared defaults),
    /// then the matched values, then the positional values into `globals`.
    ///
    /// A help request ends the parse after phase #1 with [`ParseError::HelpRequested`], so `globals` are never touched.
    ///
    /// When commands are registered, the first leftover token selects the command to dispatch.
    ///
    /// Panics on configuration errors (see [`ConfigError`]).
    pub fn parse_tokens<'p>(
        &'p self,
        tokens: &[&str],
        globals: Option<&mut G>,
    ) -> Result<Outcome<'p, 'c, G>, ParseError> {
        if globals.is_none() {
            self.check_handlers().unwrap_or_else(|error| fatal(error));
        }

        let mut binder = Binder::default();

        if let Some(globals) = globals {
            globals.bind(&mut binder);
        }

        let Reflection {
            flags,
            singles,
            multi,
            description,
        } = reflect(binder.consume()).unwrap_or_else(|error| fatal(error));
        let mut flag_set = FlagSet::new(flags).unwrap_or_else(|error| fatal(error));

        let (assignments, remaining) = match match_tokens(&flag_set, tokens)? {
            Matched::Help => {
                return Err(ParseError::HelpRequested {
                    usage: self.render(description),
                });
            }
            Matched::Flags {
                assignments,
                remaining,
            } => (assignments, remaining),
        };

        flag_set
            .apply_initial(self.environment.as_ref())
            .unwrap_or_else(|error| fatal(error));
        flag_set.capture(assignments)?;
        drop(flag_set);

        let expected = singles.len();
        let positionals = expected + usize::from(multi.is_some());
        let leftover = distribute(singles, multi, remaining)?;

        if self.commands.is_empty() {
            return if leftover.is_empty() {
                Ok(Outcome::Bound)
            } else if positionals == 0 {
                Err(ParseError::UnexpectedArguments(leftover))
            } else {
                Err(ParseError::TooManyArguments {
                    expected,
                    found: leftover,
                })
            };
        }

        let (command, args) = resolve(&self.commands, self.resolver.as_ref(), leftover)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching to '{}' with {args:?}.", command.name());
        }

        let invocation = Invocation::new(format!("{} {}", self.program, command.name()), args);
        Ok(Outcome::Dispatched(Dispatch::new(command, invocation)))
    }

    /// Run the parser against the input tokens, and then the resolved command.
    ///
    /// See [`FlagParser::parse_tokens`] and [`Dispatch::run`].
    pub fn run_tokens(&self, tokens: &[&str], mut globals: Option<&mut G>) -> Result<(), ParseError> {
        let outcome = self.parse_tokens(tokens, globals.as_deref_mut())?;
        outcome.run(globals.as_deref())
    }

    /// Describe the flags, positionals and commands, as shown in the help message.
    ///
    /// Returns the configuration errors which the parse entry points raise as panics.
    pub fn describe(&self, globals: Option<&mut G>) -> Result<FlagSetDescription, ConfigError> {
        if globals.is_none() {
            self.check_handlers()?;
        }

        let mut binder = Binder::default();

        if let Some(globals) = globals {
            globals.bind(&mut binder);
        }

        let Reflection {
            flags, description, ..
        } = reflect(binder.consume())?;
        FlagSet::new(flags)?;
        Ok(description)
    }

    /// Render the help message, as shown for a help request.
    pub fn usage_text(&self, globals: Option<&mut G>) -> Result<String, ConfigError> {
        let description = self.describe(globals)?;
        Ok(self.render(description))
    }
}

impl<'c, G> FlagParser<'c, G> {
    fn check_handlers(&self) -> Result<(), ConfigError> {
        match self.commands.iter().find(|command| command.run.is_none()) {
            Some(command) => Err(ConfigError::GlobalsRequired {
                command: command.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn render(&self, description: FlagSetDescription) -> String {
        let commands = self
            .commands
            .iter()
            .map(|command| (command.name().to_string(), command.usage().to_string()))
            .collect();
        let usage = Usage::new(
            self.program.clone(),
            description,
            commands,
            self.width.or_else(terminal_width),
        );

        match &self.usage {
            Some(hook) => hook(&usage),
            None => usage.to_string(),
        }
    }
}

/// Parse the tokens (excluding the program name) into a single record, without any commands.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::{parse_record, Binder, FieldSpec, ParseError};
/// use fieldflag::prelude::*;
///
/// #[derive(Default)]
/// struct Flags {
///     port: u16,
/// }
///
/// impl FlagRecord for Flags {
///     fn bind<'a>(&'a mut self, binder: &mut Binder<'a>) {
///         binder.field(FieldSpec::new("port").default("80"), &mut self.port);
///     }
/// }
///
/// let mut flags = Flags::default();
/// parse_record("program", &["-port=8080"], &mut flags).unwrap();
/// assert_eq!(flags.port, 8080);
///
/// let error = parse_record("program", &["extra"], &mut flags).unwrap_err();
/// assert_eq!(error, ParseError::UnexpectedArguments(vec!["extra".to_string()]));
/// ```
pub fn parse_record<R: FlagRecord>(
    program: &str,
    tokens: &[&str],
    record: &mut R,
) -> Result<(), ParseError> {
    let parser: FlagParser<R> = FlagParser::new(program);
    parser.parse_tokens(tokens, Some(record))?;
    Ok(())
}
