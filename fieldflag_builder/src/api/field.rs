use crate::api::cell::{Cell, IntoCell};

/// The declarative metadata of a single record field.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::FieldSpec;
///
/// let spec = FieldSpec::new("Verbose")
///     .name("v, verbose")
///     .usage("Print more output.")
///     .env("APP_VERBOSE")
///     .default("false");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    pub(crate) ident: String,
    pub(crate) name: Option<String>,
    pub(crate) usage: String,
    pub(crate) env: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) short: bool,
}

impl FieldSpec {
    /// Create the metadata for the field with identifier `ident`.
    ///
    /// Without an explicit `name`, the flag name is derived from the identifier.
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            ..<Self as Default>::default()
        }
    }

    /// Set the flag name(s).
    ///
    /// * A comma separated list binds every alias onto the same field (ex: `"v, verbose"`).
    /// * `"#nonflag"` (or `"#nonflag:LABEL"`) makes this a positional field.
    /// * `"-"` skips the field entirely.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name.replace(name.into());
        self
    }

    /// Document the field for the help message.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Read the initial value from the environment variable `env`, when set.
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env.replace(env.into());
        self
    }

    /// Set the initial value from its textual form, when the environment does not provide one.
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default.replace(default.into());
        self
    }

    /// Derive a one-letter flag name from the identifier, instead of the full identifier.
    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }
}

/// Collects the field bindings of one record, in declaration order.
///
/// ### Example
/// ```
/// # use fieldflag_builder as fieldflag;
/// use fieldflag::{Binder, FieldSpec};
///
/// let mut verbose = false;
/// let mut binder = Binder::default();
/// binder.field(FieldSpec::new("verbose").short(), &mut verbose);
/// assert_eq!(binder.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Binder<'a> {
    fields: Vec<(FieldSpec, Cell<'a>)>,
}

impl<'a> Binder<'a> {
    /// Bind the field described by `spec` onto the `target` location.
    pub fn field(&mut self, spec: FieldSpec, target: impl IntoCell<'a>) -> &mut Self {
        self.fields.push((spec, target.into_cell()));
        self
    }

    /// The number of bound fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields have been bound.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn consume(self) -> Vec<(FieldSpec, Cell<'a>)> {
        self.fields
    }
}
