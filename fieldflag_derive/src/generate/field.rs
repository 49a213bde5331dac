use crate::model::DeriveField;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField {
            field_name,
            ident,
            name,
            usage,
            env,
            default,
            short,
        } = value;
        let name = name.map(|name| quote! { .name(#name) });
        let usage = usage.map(|usage| quote! { .usage(#usage) });
        let env = env.map(|env| quote! { .env(#env) });
        let default = default.map(|default| quote! { .default(#default) });
        let short = short.then(|| quote! { .short() });

        quote! {
            binder.field(
                ::fieldflag::FieldSpec::new(#ident) #name #usage #env #default #short,
                &mut self.#field_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::test::simple_format;
    use proc_macro2::Span;

    fn field(name: &str) -> DeriveField {
        DeriveField {
            field_name: syn::Ident::new(name, Span::call_site()),
            ident: name.to_string(),
            name: None,
            usage: None,
            env: None,
            default: None,
            short: false,
        }
    }

    #[test]
    fn render_plain() {
        // Execute
        let token_stream = TokenStream2::from(field("verbose"));

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"binder . field (:: fieldflag :: FieldSpec :: new ("verbose") , & mut self . verbose) ;
"#,
        );
    }

    #[test]
    fn render_short() {
        let token_stream = TokenStream2::from(DeriveField {
            short: true,
            ..field("verbose")
        });

        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"binder . field (:: fieldflag :: FieldSpec :: new ("verbose") . short () , & mut self . verbose) ;
"#,
        );
    }

    #[test]
    fn render_all() {
        let token_stream = TokenStream2::from(DeriveField {
            name: Some("p, port".to_string()),
            usage: Some("The port.".to_string()),
            env: Some("PORT".to_string()),
            default: Some("8080".to_string()),
            ..field("port")
        });

        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"binder . field (:: fieldflag :: FieldSpec :: new ("port") . name ("p, port") . usage ("The port.") . env ("PORT") . default ("8080") , & mut self . port) ;
"#,
        );
    }

    #[test]
    fn render_raw_identifier() {
        let token_stream = TokenStream2::from(DeriveField {
            field_name: syn::Ident::new_raw("type", Span::call_site()),
            ..field("type")
        });

        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"binder . field (:: fieldflag :: FieldSpec :: new ("type") , & mut self . r#type) ;
"#,
        );
    }
}
