mod attribute;
mod field;
mod record;

use crate::model::{DeriveValue, IntermediateAttributes};

fn incompatible_error(
    context: &str,
    field_name: &syn::Ident,
    left: impl Into<String>,
    right: impl Into<String>,
) -> syn::Error {
    syn::Error::new(
        field_name.span(),
        format!(
            "Invalid - {context} cannot be both `{}` and `{}`.",
            left.into(),
            right.into(),
        ),
    )
}

fn check_keys(
    context: &str,
    attributes: &IntermediateAttributes,
    allowed: &[&str],
    name: &syn::Ident,
) -> Result<(), syn::Error> {
    let mut unknown: Vec<&String> = attributes
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .collect();
    unknown.sort();

    match unknown.first() {
        Some(key) => Err(syn::Error::new(
            name.span(),
            format!("Invalid - {context} does not support the attribute `{key}`."),
        )),
        None => Ok(()),
    }
}

fn check_forms(
    attributes: &IntermediateAttributes,
    singletons: &[&str],
    pairs: &[&str],
    name: &syn::Ident,
) -> Result<(), syn::Error> {
    for key in singletons {
        if attributes.pairs.contains_key(*key) {
            return Err(syn::Error::new(
                name.span(),
                format!("Invalid - attribute `{key}` does not take a value."),
            ));
        }
    }

    for key in pairs {
        if attributes.singletons.contains(*key) {
            return Err(syn::Error::new(
                name.span(),
                format!("Invalid - attribute `{key}` requires a value."),
            ));
        }
    }

    Ok(())
}

fn single_value<'a>(
    context: &str,
    attributes: &'a IntermediateAttributes,
    key: &str,
    name: &syn::Ident,
) -> Result<Option<&'a DeriveValue>, syn::Error> {
    match attributes.pairs.get(key).map(Vec::as_slice) {
        None | Some([]) => Ok(None),
        Some([value]) => Ok(Some(value)),
        Some(_) => Err(syn::Error::new(
            name.span(),
            format!("Invalid - {context} cannot repeat the attribute `{key}`."),
        )),
    }
}

fn string_value(key: &str, value: &DeriveValue) -> Result<String, syn::Error> {
    syn::parse2::<syn::LitStr>(value.tokens.clone())
        .map(|literal| literal.value())
        .map_err(|error| {
            syn::Error::new(
                error.span(),
                format!("Invalid - attribute `{key}` must be a string literal."),
            )
        })
}

/// The textual form of a literal, as the runtime converts it.
fn literal_text(key: &str, value: &DeriveValue) -> Result<String, syn::Error> {
    let expression = syn::parse2::<syn::Expr>(value.tokens.clone())?;
    let invalid = || {
        syn::Error::new_spanned(
            &expression,
            format!("Invalid - attribute `{key}` must be a string, integer, float or bool literal."),
        )
    };

    match &expression {
        syn::Expr::Lit(syn::ExprLit { lit, .. }) => number_text(lit)
            .or_else(|| match lit {
                syn::Lit::Str(literal) => Some(literal.value()),
                syn::Lit::Bool(literal) => Some(literal.value.to_string()),
                _ => None,
            })
            .ok_or_else(invalid),
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => match expr.as_ref() {
            syn::Expr::Lit(syn::ExprLit { lit, .. }) => number_text(lit)
                .map(|digits| format!("-{digits}"))
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

fn number_text(literal: &syn::Lit) -> Option<String> {
    match literal {
        syn::Lit::Int(literal) => Some(literal.base10_digits().to_string()),
        syn::Lit::Float(literal) => Some(literal.base10_digits().to_string()),
        _ => None,
    }
}
