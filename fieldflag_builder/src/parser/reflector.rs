use crate::api::{Cell, FieldSpec, ScalarCell, Slot};
use crate::constant::*;
use crate::model::{FieldDescriptor, FieldKind, FlagSetDescription, ValueKind};
use crate::parser::base::ConfigError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) struct FlagField<'a> {
    pub(crate) spec: FieldSpec,
    pub(crate) names: Vec<String>,
    pub(crate) cell: Box<dyn ScalarCell + 'a>,
}

pub(crate) struct PositionalField<'a> {
    pub(crate) label: String,
    pub(crate) cell: Box<dyn ScalarCell + 'a>,
}

pub(crate) struct SequenceField<'a> {
    pub(crate) label: String,
    pub(crate) variable: &'a mut Vec<String>,
}

/// The classified fields of one record.
pub(crate) struct Reflection<'a> {
    pub(crate) flags: Vec<FlagField<'a>>,
    pub(crate) singles: Vec<PositionalField<'a>>,
    pub(crate) multi: Option<SequenceField<'a>>,
    pub(crate) description: FlagSetDescription,
}

impl<'a> std::fmt::Debug for Reflection<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflection")
            .field("description", &self.description)
            .finish()
    }
}

impl<'a> Reflection<'a> {
    pub(crate) fn empty() -> Self {
        Self {
            flags: Vec::default(),
            singles: Vec::default(),
            multi: None,
            description: FlagSetDescription::default(),
        }
    }
}

/// Walk the record's fields once, in declaration order.
pub(crate) fn reflect<'a>(fields: Vec<(FieldSpec, Cell<'a>)>) -> Result<Reflection<'a>, ConfigError> {
    let mut reflection = Reflection::empty();

    for (spec, cell) in fields {
        let kind = classify(&spec);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Field '{}' classified as {kind}.", spec.ident);
        }

        match kind {
            FieldKind::Skipped => {}
            FieldKind::Flag => {
                let names = flag_names(&spec);

                if names.is_empty() {
                    return Err(ConfigError::EmptyName { field: spec.ident });
                }

                let cell = match cell.consume() {
                    Slot::Scalar(scalar) => scalar,
                    Slot::Sequence(_) => {
                        return Err(ConfigError::UnsupportedFlag { field: spec.ident });
                    }
                };

                if let Some(default) = &spec.default {
                    cell.check(default)
                        .map_err(|source| ConfigError::InvalidDefault {
                            field: spec.ident.clone(),
                            source,
                        })?;
                }

                let default = match &spec.default {
                    Some(default) => Some(default.clone()),
                    None if !cell.is_zero() => Some(cell.render()),
                    None => None,
                };
                reflection.description.flags.push(FieldDescriptor {
                    ident: spec.ident.clone(),
                    names: names.clone(),
                    kind,
                    value_kind: cell.kind(),
                    type_label: cell.type_label(),
                    env: spec.env.clone(),
                    default,
                    usage: spec.usage.clone(),
                });
                reflection.flags.push(FlagField { spec, names, cell });
            }
            FieldKind::PositionalSingle | FieldKind::PositionalMulti => {
                let label = positional_label(&spec);

                match (cell.kind(), cell.consume()) {
                    (ValueKind::String, Slot::Scalar(cell)) => {
                        reflection.description.positional_singles.push(positional_descriptor(
                            &spec,
                            &label,
                            FieldKind::PositionalSingle,
                            ValueKind::String,
                        ));
                        reflection.singles.push(PositionalField { label, cell });
                    }
                    (_, Slot::Sequence(variable)) => {
                        if reflection.multi.is_some() {
                            return Err(ConfigError::DuplicatePositionalMulti { field: spec.ident });
                        }

                        reflection.description.positional_multi.replace(positional_descriptor(
                            &spec,
                            &label,
                            FieldKind::PositionalMulti,
                            ValueKind::Strings,
                        ));
                        reflection.multi.replace(SequenceField { label, variable });
                    }
                    (kind, Slot::Scalar(_)) => {
                        return Err(ConfigError::UnsupportedPositional {
                            field: spec.ident,
                            kind,
                        });
                    }
                }
            }
        }
    }

    Ok(reflection)
}

// Only the marker decides single vs. multi; the cell kind is checked by `reflect`.
fn classify(spec: &FieldSpec) -> FieldKind {
    match &spec.name {
        Some(name) if name.trim() == SKIP_MARKER => FieldKind::Skipped,
        Some(name) if name.trim_start().starts_with(NONFLAG_MARKER) => FieldKind::PositionalSingle,
        Some(_) => FieldKind::Flag,
        // Identifiers with a leading underscore are private to the program.
        None if spec.ident.is_empty() || spec.ident.starts_with('_') => FieldKind::Skipped,
        None => FieldKind::Flag,
    }
}

fn positional_descriptor(
    spec: &FieldSpec,
    label: &str,
    kind: FieldKind,
    value_kind: ValueKind,
) -> FieldDescriptor {
    FieldDescriptor {
        ident: spec.ident.clone(),
        names: vec![label.to_string()],
        kind,
        value_kind,
        type_label: "string",
        env: None,
        default: None,
        usage: spec.usage.clone(),
    }
}

pub(crate) fn flag_names(spec: &FieldSpec) -> Vec<String> {
    match &spec.name {
        Some(name) => split_and_trim(name),
        None => vec![derive_name(&spec.ident, spec.short)],
    }
}

fn derive_name(ident: &str, short: bool) -> String {
    let mut characters = ident.chars();

    match characters.next() {
        Some(first) if short => first.to_lowercase().collect(),
        Some(first) => first.to_lowercase().chain(characters).collect(),
        None => String::default(),
    }
}

fn split_and_trim(name: &str) -> Vec<String> {
    name.split(',')
        .map(|part| part.trim().trim_start_matches('-').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn positional_label(spec: &FieldSpec) -> String {
    let label = spec
        .name
        .as_deref()
        .and_then(|name| name.trim_start().strip_prefix(NONFLAG_MARKER))
        .map(|rest| rest.trim().trim_start_matches(':').trim())
        .unwrap_or_default();

    if label.is_empty() {
        spec.ident.to_uppercase()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test::{scalar, Pair};
    use crate::api::{Binder, IntoCell};
    use crate::prelude::FlagValue;
    use rstest::rstest;

    // Describe the field, then convert its shown default back into a fresh value of the same type.
    fn reparse<T>(mut value: T, spec: FieldSpec) -> (Option<String>, T)
    where
        T: Default,
        for<'b> &'b mut T: IntoCell<'b>,
    {
        let shown = {
            let mut binder = Binder::default();
            binder.field(spec, &mut value);
            let reflection = reflect(binder.consume()).unwrap();
            reflection.description.flags()[0].default().map(str::to_string)
        };
        let mut fresh = T::default();

        if let Some(text) = &shown {
            scalar((&mut fresh).into_cell()).set(text).unwrap();
        }

        (shown, fresh)
    }

    #[rstest]
    #[case(FieldSpec::new("Verbose"), vec!["verbose"])]
    #[case(FieldSpec::new("dryRun"), vec!["dryRun"])]
    #[case(FieldSpec::new("DryRun"), vec!["dryRun"])]
    #[case(FieldSpec::new("dry_run"), vec!["dry_run"])]
    #[case(FieldSpec::new("Verbose").short(), vec!["v"])]
    #[case(FieldSpec::new("Verbose").name("loud").short(), vec!["loud"])]
    #[case(FieldSpec::new("Verbose").name("v, verbose"), vec!["v", "verbose"])]
    #[case(FieldSpec::new("Verbose").name(" -v ,--verbose,, "), vec!["v", "verbose"])]
    #[case(FieldSpec::new("Verbose").name(","), vec![])]
    fn names(#[case] spec: FieldSpec, #[case] expected: Vec<&str>) {
        assert_eq!(flag_names(&spec), expected);
    }

    #[rstest]
    #[case(FieldSpec::new("verbose"), FieldKind::Flag)]
    #[case(FieldSpec::new("verbose").name("v"), FieldKind::Flag)]
    #[case(FieldSpec::new("verbose").name("-"), FieldKind::Skipped)]
    #[case(FieldSpec::new("_verbose"), FieldKind::Skipped)]
    #[case(FieldSpec::new("_verbose").name("verbose"), FieldKind::Flag)]
    #[case(FieldSpec::new("file").name("#nonflag"), FieldKind::PositionalSingle)]
    #[case(FieldSpec::new("file").name("#nonflag:SOURCE"), FieldKind::PositionalSingle)]
    fn classification(#[case] spec: FieldSpec, #[case] expected: FieldKind) {
        assert_eq!(classify(&spec), expected);
    }

    #[rstest]
    #[case(FieldSpec::new("file").name("#nonflag"), "FILE")]
    #[case(FieldSpec::new("file").name("#nonflag:SOURCE"), "SOURCE")]
    #[case(FieldSpec::new("file").name("#nonflag: SOURCE "), "SOURCE")]
    #[case(FieldSpec::new("file").name("#nonflag SOURCE"), "SOURCE")]
    fn labels(#[case] spec: FieldSpec, #[case] expected: &str) {
        assert_eq!(positional_label(&spec), expected);
    }

    #[test]
    fn reflect_partitions() {
        // Setup
        let mut verbose = false;
        let mut source = String::default();
        let mut destination = String::default();
        let mut rest: Vec<String> = Vec::default();
        let mut ignored: u32 = 0;
        let mut binder = Binder::default();
        binder
            .field(FieldSpec::new("verbose").short().usage("Be loud."), &mut verbose)
            .field(FieldSpec::new("source").name("#nonflag"), &mut source)
            .field(FieldSpec::new("rest").name("#nonflag"), &mut rest)
            .field(FieldSpec::new("destination").name("#nonflag:DEST"), &mut destination)
            .field(FieldSpec::new("ignored").name("-"), &mut ignored);

        // Execute
        let reflection = reflect(binder.consume()).unwrap();

        // Verify
        assert_eq!(reflection.flags.len(), 1);
        assert_eq!(reflection.flags[0].names, vec!["v"]);
        let singles: Vec<&str> = reflection.singles.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(singles, vec!["SOURCE", "DEST"]);
        assert_eq!(reflection.multi.as_ref().map(|m| m.label.as_str()), Some("REST"));

        let description = &reflection.description;
        assert_eq!(description.flags()[0].usage(), "Be loud.");
        assert_eq!(description.flags()[0].type_label(), "bool");
        assert_eq!(description.positional_singles().len(), 2);
        assert_eq!(
            description.positional_multi().map(|d| d.kind()),
            Some(FieldKind::PositionalMulti)
        );
    }

    #[test]
    fn reflect_duplicate_multi() {
        let mut first: Vec<String> = Vec::default();
        let mut second: Vec<String> = Vec::default();
        let mut binder = Binder::default();
        binder
            .field(FieldSpec::new("first").name("#nonflag"), &mut first)
            .field(FieldSpec::new("second").name("#nonflag"), &mut second);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::DuplicatePositionalMulti { field }) if field == "second"
        );
    }

    #[test]
    fn reflect_unsupported_positional() {
        let mut count: u32 = 0;
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("count").name("#nonflag"), &mut count);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::UnsupportedPositional {
                kind: ValueKind::Uint,
                ..
            })
        );
    }

    #[test]
    fn reflect_custom_positional() {
        let mut pair = Pair::default();
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("pair").name("#nonflag"), &mut pair);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::UnsupportedPositional {
                kind: ValueKind::Custom,
                ..
            })
        );
    }

    #[test]
    fn reflect_sequence_flag() {
        let mut items: Vec<String> = Vec::default();
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("items"), &mut items);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::UnsupportedFlag { .. })
        );
    }

    #[test]
    fn reflect_empty_name() {
        let mut verbose = false;
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("verbose").name(" , "), &mut verbose);

        assert_matches!(reflect(binder.consume()), Err(ConfigError::EmptyName { .. }));
    }

    #[test]
    fn reflect_invalid_default() {
        let mut port: u16 = 0;
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("port").default("http"), &mut port);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::InvalidDefault { field, .. }) if field == "port"
        );
    }

    #[test]
    fn reflect_does_not_mutate() {
        let mut port: u16 = 0;
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("port").default("8080"), &mut port);

        let reflection = reflect(binder.consume()).unwrap();
        assert_eq!(reflection.description.flags()[0].default(), Some("8080"));
        drop(reflection);
        assert_eq!(port, 0);
    }

    #[test]
    fn reflect_initial_value_default() {
        let mut port: u16 = 443;
        let mut host = String::default();
        let mut binder = Binder::default();
        binder
            .field(FieldSpec::new("port"), &mut port)
            .field(FieldSpec::new("host"), &mut host);

        let reflection = reflect(binder.consume()).unwrap();
        assert_eq!(reflection.description.flags()[0].default(), Some("443"));
        assert_eq!(reflection.description.flags()[1].default(), None);
    }

    #[test]
    fn reflect_custom_flag() {
        let mut pair = Pair::default();
        let cell = (&mut pair).into_cell();
        let reflection = reflect(vec![(FieldSpec::new("pair"), cell)]).unwrap();
        let descriptor = &reflection.description.flags()[0];
        assert_eq!(descriptor.value_kind(), ValueKind::Custom);
        assert_eq!(descriptor.type_label(), "pair");
    }

    #[test]
    fn reflect_custom_invalid_default() {
        let mut pair = Pair {
            left: "a".to_string(),
            right: "b".to_string(),
        };
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("pair").default("nocomma"), &mut pair);

        assert_matches!(
            reflect(binder.consume()),
            Err(ConfigError::InvalidDefault { field, source }) if field == "pair" && source.type_label == "pair"
        );
        assert_eq!(pair.to_text(), "a,b");
    }

    #[test]
    fn reflect_custom_valid_default() {
        let mut pair = Pair::default();
        let mut binder = Binder::default();
        binder.field(FieldSpec::new("pair").default("x,y"), &mut pair);

        let reflection = reflect(binder.consume()).unwrap();
        assert_eq!(reflection.description.flags()[0].default(), Some("x,y"));
        drop(reflection);
        assert_eq!(pair, Pair::default());
    }

    #[rstest]
    #[case(false, None, None, false)]
    #[case(true, None, Some("true"), true)]
    #[case(false, Some("T"), Some("T"), true)]
    #[case(true, Some("0"), Some("0"), false)]
    fn shown_default_bool(
        #[case] initial: bool,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: bool,
    ) {
        let spec = match declared {
            Some(text) => FieldSpec::new("flag").default(text),
            None => FieldSpec::new("flag"),
        };
        assert_eq!(reparse(initial, spec), (shown.map(str::to_string), expected));
    }

    #[rstest]
    #[case(0, None, None, 0)]
    #[case(-42, None, Some("-42"), -42)]
    #[case(0, Some("-0x10"), Some("-0x10"), -16)]
    #[case(7, Some("0b11"), Some("0b11"), 3)]
    #[case(i64::MIN, None, Some("-9223372036854775808"), i64::MIN)]
    fn shown_default_int(
        #[case] initial: i64,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: i64,
    ) {
        let spec = match declared {
            Some(text) => FieldSpec::new("count").default(text),
            None => FieldSpec::new("count"),
        };
        assert_eq!(reparse(initial, spec), (shown.map(str::to_string), expected));
    }

    #[rstest]
    #[case(0, None, None, 0)]
    #[case(255, None, Some("255"), 255)]
    #[case(0, Some("0xff"), Some("0xff"), 255)]
    fn shown_default_uint(
        #[case] initial: u8,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: u8,
    ) {
        let spec = match declared {
            Some(text) => FieldSpec::new("level").default(text),
            None => FieldSpec::new("level"),
        };
        assert_eq!(reparse(initial, spec), (shown.map(str::to_string), expected));
    }

    #[rstest]
    #[case(0.0, None, None, 0.0)]
    #[case(1.5, None, Some("1.5"), 1.5)]
    #[case(0.1, None, Some("0.1"), 0.1)]
    #[case(-2.0, None, Some("-2"), -2.0)]
    #[case(0.0, Some("2.5e3"), Some("2.5e3"), 2500.0)]
    fn shown_default_float(
        #[case] initial: f64,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: f64,
    ) {
        let spec = match declared {
            Some(text) => FieldSpec::new("ratio").default(text),
            None => FieldSpec::new("ratio"),
        };
        assert_eq!(reparse(initial, spec), (shown.map(str::to_string), expected));
    }

    #[rstest]
    #[case("", None, None, "")]
    #[case("hello world", None, Some("hello world"), "hello world")]
    #[case("", Some("anon"), Some("anon"), "anon")]
    #[case("x", Some("über"), Some("über"), "über")]
    fn shown_default_string(
        #[case] initial: &str,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: &str,
    ) {
        let spec = match declared {
            Some(text) => FieldSpec::new("name").default(text),
            None => FieldSpec::new("name"),
        };
        assert_eq!(
            reparse(initial.to_string(), spec),
            (shown.map(str::to_string), expected.to_string())
        );
    }

    #[rstest]
    #[case("", "", None, None, "")]
    #[case("a", "b", None, Some("a,b"), "a,b")]
    #[case("", "", Some("x,y"), Some("x,y"), "x,y")]
    fn shown_default_custom(
        #[case] left: &str,
        #[case] right: &str,
        #[case] declared: Option<&str>,
        #[case] shown: Option<&str>,
        #[case] expected: &str,
    ) {
        let initial = Pair {
            left: left.to_string(),
            right: right.to_string(),
        };
        let spec = match declared {
            Some(text) => FieldSpec::new("pair").default(text),
            None => FieldSpec::new("pair"),
        };
        let (actual_shown, reparsed) = reparse(initial, spec);
        assert_eq!(actual_shown, shown.map(str::to_string));
        assert_eq!(reparsed.to_text(), expected);
    }
}
