use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();
        attributes.merge(value)?;
        Ok(attributes)
    }
}

impl IntermediateAttributes {
    /// Add the contents of another `#[flag(..)]` attribute.
    pub fn merge(&mut self, attribute: &syn::Attribute) -> Result<(), syn::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;

        for expression in attribute.parse_args_with(attributes_parser)? {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    self.pairs
                        .entry(left.to_string())
                        .or_default()
                        .push(DeriveValue {
                            tokens: assignment.right.to_token_stream(),
                        });
                }
                syn::Expr::Path(path) if path.path.get_ident().is_some() => {
                    let ident = path.path.to_token_stream();
                    self.singletons.insert(ident.to_string());
                }
                _ => {
                    let tts = expression.to_token_stream();
                    return Err(syn::Error::new_spanned(
                        &expression,
                        format!("Unparseable attribute: {tts}"),
                    ));
                }
            };
        }

        Ok(())
    }

    /// Every key, singleton or pair.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.singletons.iter().chain(self.pairs.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use std::collections::{HashMap, HashSet};
    use syn::parse_quote;

    #[test]
    fn construct_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[flag()]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[flag(short, usage = "123")]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::from(["short".to_string()]),
                pairs: HashMap::from([(
                    "usage".to_string(),
                    vec![DeriveValue {
                        tokens: Literal::string("123").into_token_stream(),
                    }]
                )])
            }
        );
    }

    #[test]
    fn merge_attributes() {
        let first: syn::Attribute = parse_quote! {
            #[flag(short, env = "A")]
        };
        let second: syn::Attribute = parse_quote! {
            #[flag(env = "B")]
        };
        let mut attributes = IntermediateAttributes::try_from(&first).unwrap();

        attributes.merge(&second).unwrap();

        assert_eq!(attributes.pairs["env"].len(), 2);
        let mut keys: Vec<&String> = attributes.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["env", "short"]);
    }

    #[test]
    fn construct_attributes_invalid() {
        let attribute: syn::Attribute = parse_quote! {
            #[flag]
        };

        assert!(IntermediateAttributes::try_from(&attribute).is_err());
    }

    #[test]
    fn construct_attributes_invalid_expression() {
        let attribute: syn::Attribute = parse_quote! {
            #[flag(a::b, 1 + 2)]
        };

        let error = IntermediateAttributes::try_from(&attribute).unwrap_err();

        assert_eq!(error.to_string(), "Unparseable attribute: a :: b");
    }
}
