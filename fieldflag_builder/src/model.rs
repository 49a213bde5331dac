/// The kind of value held by a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`.
    Bool,
    /// Signed integers (`i8` through `i64`, `isize`).
    Int,
    /// Unsigned integers (`u8` through `u64`, `usize`).
    Uint,
    /// `f32` and `f64`.
    Float,
    /// `String`.
    String,
    /// `Vec<String>`, only valid for the multi-value positional field.
    Strings,
    /// Any type implementing [FlagValue](./prelude/trait.FlagValue.html).
    Custom,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How a field participates in the Cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A named flag, possibly with aliases: `-name value`.
    Flag,
    /// A positional field taking exactly one leftover token, in declaration order.
    PositionalSingle,
    /// The positional field capturing the tail of the leftover tokens.
    PositionalMulti,
    /// Not bound at all.
    Skipped,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The derived description of one bound field.
///
/// Built fresh on every parse; used for help rendering and positional distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) ident: String,
    pub(crate) names: Vec<String>,
    pub(crate) kind: FieldKind,
    pub(crate) value_kind: ValueKind,
    pub(crate) type_label: &'static str,
    pub(crate) env: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) usage: String,
}

impl FieldDescriptor {
    /// The field identifier.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The flag aliases (for a [`FieldKind::Flag`]), or the single display label (for a positional).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// How the field participates in the Cli.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The kind of value bound.
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// The type label shown in the help message.
    pub fn type_label(&self) -> &'static str {
        self.type_label
    }

    /// The environment variable consulted for the initial value.
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// The textual default: the declared literal, or else the non-zero initial value of the field.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

/// The fields of one record, partitioned by how they participate in the Cli.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSetDescription {
    pub(crate) flags: Vec<FieldDescriptor>,
    pub(crate) positional_singles: Vec<FieldDescriptor>,
    pub(crate) positional_multi: Option<FieldDescriptor>,
}

impl FlagSetDescription {
    /// The named flags, in declaration order.
    pub fn flags(&self) -> &[FieldDescriptor] {
        &self.flags
    }

    /// The single-value positional fields, in declaration order.
    pub fn positional_singles(&self) -> &[FieldDescriptor] {
        &self.positional_singles
    }

    /// The multi-value positional field, if any.
    pub fn positional_multi(&self) -> Option<&FieldDescriptor> {
        self.positional_multi.as_ref()
    }

    /// Whether there are no flags nor positionals.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.positional_singles.is_empty() && self.positional_multi.is_none()
    }
}
