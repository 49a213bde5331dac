use crate::api::{Command, Resolver};
use crate::parser::base::ParseError;
use crate::parser::reflector::{PositionalField, SequenceField};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Bind the leftover tokens into the positional fields, returning those which no field absorbs.
///
/// Single-value fields take one token each, in declaration order.
/// The multi-value field then takes the entire tail, replacing its previous contents.
pub(crate) fn distribute(
    singles: Vec<PositionalField>,
    multi: Option<SequenceField>,
    remaining: Vec<String>,
) -> Result<Vec<String>, ParseError> {
    let mut singles = singles.into_iter();
    let mut multi = multi;
    let mut tokens = remaining.into_iter().peekable();

    while tokens.peek().is_some() {
        if let Some(mut field) = singles.next() {
            if let Some(token) = tokens.next() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Positional '{}' bound to '{token}'.", field.label);
                }

                field
                    .cell
                    .set(&token)
                    .map_err(|source| ParseError::InvalidValue {
                        flag: field.label.clone(),
                        source,
                    })?;
            }
        } else if let Some(SequenceField { label: _label, variable }) = multi.take() {
            *variable = tokens.by_ref().collect();

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Positional '{_label}' bound to {variable:?}.");
            }
        } else {
            break;
        }
    }

    Ok(tokens.collect())
}

/// Find the command named by the leftover tokens.
///
/// Leading empty tokens are skipped.
/// Returns the command along with the tokens after its name.
pub(crate) fn resolve<'p, 'c, G>(
    commands: &'p [Command<'c, G>],
    resolver: Option<&Resolver<'c, G>>,
    leftover: Vec<String>,
) -> Result<(&'p Command<'c, G>, Vec<String>), ParseError> {
    let tokens: Vec<String> = leftover.into_iter().skip_while(String::is_empty).collect();
    let candidate = match tokens.first() {
        Some(candidate) => candidate.clone(),
        None => return Err(ParseError::MissingCommand),
    };

    if let Some(command) = lookup(commands, &candidate) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Resolved command '{candidate}'.");
        }

        return Ok((command, tokens[1..].to_vec()));
    }

    if let Some(resolver) = resolver {
        if let Some(rewritten) = resolver(tokens.as_slice(), commands) {
            if let Some((name, rest)) = rewritten.split_first() {
                if let Some(command) = lookup(commands, name) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Resolved command '{candidate}' as '{name}'.");
                    }

                    return Ok((command, rest.to_vec()));
                }
            }
        }
    }

    Err(ParseError::UnknownCommand(candidate))
}

// The first registered command wins.
fn lookup<'p, 'c, G>(commands: &'p [Command<'c, G>], name: &str) -> Option<&'p Command<'c, G>> {
    commands.iter().find(|command| command.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{unique_prefix, Binder, FieldSpec};
    use crate::parser::reflector::reflect;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    // Binds `singles` single-value positionals, and optionally the multi-value positional.
    fn bound(
        singles: usize,
        with_multi: bool,
        remaining: &[&str],
    ) -> (Vec<String>, Vec<String>, Result<Vec<String>, ParseError>) {
        let mut values = vec![String::from("initial"); singles];
        let mut rest = strings(&["initial"]);
        let mut binder = Binder::default();

        for (index, value) in values.iter_mut().enumerate() {
            binder.field(FieldSpec::new(format!("f{index}")).name("#nonflag"), value);
        }

        if with_multi {
            binder.field(FieldSpec::new("rest").name("#nonflag"), &mut rest);
        }

        let result = {
            let reflection = reflect(binder.consume()).unwrap();
            distribute(reflection.singles, reflection.multi, strings(remaining))
        };
        (values, rest, result)
    }

    #[rstest]
    #[case(0, false, vec![], vec![], vec!["initial"], vec![])]
    #[case(0, false, vec!["a"], vec![], vec!["initial"], vec!["a"])]
    #[case(2, false, vec!["a"], vec!["a", "initial"], vec!["initial"], vec![])]
    #[case(2, false, vec!["a", "b"], vec!["a", "b"], vec!["initial"], vec![])]
    #[case(2, false, vec!["a", "b", "c"], vec!["a", "b"], vec!["initial"], vec!["c"])]
    #[case(0, true, vec![], vec![], vec!["initial"], vec![])]
    #[case(0, true, vec!["a", "b"], vec![], vec!["a", "b"], vec![])]
    #[case(1, true, vec!["a"], vec!["a"], vec!["initial"], vec![])]
    #[case(1, true, vec!["a", "b", "", "-c"], vec!["a"], vec!["b", "", "-c"], vec![])]
    fn distribution(
        #[case] singles: usize,
        #[case] with_multi: bool,
        #[case] remaining: Vec<&str>,
        #[case] expected_singles: Vec<&str>,
        #[case] expected_multi: Vec<&str>,
        #[case] expected_leftover: Vec<&str>,
    ) {
        let (values, rest, result) = bound(singles, with_multi, &remaining);

        assert_eq!(result.unwrap(), expected_leftover);
        assert_eq!(values, expected_singles);
        assert_eq!(rest, expected_multi);
    }

    fn commands<'c>() -> Vec<Command<'c, ()>> {
        vec![
            Command::new("create", "first").run(|_| Ok(())),
            Command::new("delete", "").run(|_| Ok(())),
            Command::new("create", "second").run(|_| Ok(())),
        ]
    }

    #[rstest]
    #[case(vec!["create"], "create", vec![])]
    #[case(vec!["create", "extra"], "create", vec!["extra"])]
    #[case(vec!["", "create", "extra"], "create", vec!["extra"])]
    #[case(vec!["", "", "delete", "", "-x"], "delete", vec!["", "-x"])]
    fn resolution(#[case] leftover: Vec<&str>, #[case] expected: &str, #[case] args: Vec<&str>) {
        let commands = commands();

        let (command, remaining) = resolve(&commands, None, strings(&leftover)).unwrap();

        assert_eq!(command.name(), expected);
        assert_eq!(remaining, args);
    }

    #[test]
    fn resolution_first_wins() {
        let commands = commands();

        let (command, _) = resolve(&commands, None, strings(&["create"])).unwrap();

        assert_eq!(command.usage(), "first");
    }

    #[rstest]
    #[case(vec![], ParseError::MissingCommand)]
    #[case(vec![""], ParseError::MissingCommand)]
    #[case(vec!["update"], ParseError::UnknownCommand("update".to_string()))]
    #[case(vec!["cr"], ParseError::UnknownCommand("cr".to_string()))]
    fn resolution_error(#[case] leftover: Vec<&str>, #[case] expected: ParseError) {
        let commands = commands();

        let error = resolve(&commands, None, strings(&leftover)).unwrap_err();

        assert_eq!(error, expected);
    }

    #[test]
    fn resolution_strategy() {
        let commands = commands();
        let resolver: Resolver<()> = Box::new(unique_prefix::<()>);

        let (command, remaining) =
            resolve(&commands, Some(&resolver), strings(&["", "del", "a"])).unwrap();

        assert_eq!(command.name(), "delete");
        assert_eq!(remaining, strings(&["a"]));
    }

    #[test]
    fn resolution_strategy_once() {
        let commands = commands();
        // Rewrites to another unknown name, which is not retried.
        let resolver: Resolver<()> = Box::new(|tokens: &[String], _: &[Command<()>]| {
            let mut rewritten = tokens.to_vec();
            rewritten[0].push('x');
            Some(rewritten)
        });

        let error = resolve(&commands, Some(&resolver), strings(&["update"])).unwrap_err();

        assert_eq!(error, ParseError::UnknownCommand("update".to_string()));
    }
}
