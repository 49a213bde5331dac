use crate::load::{
    check_forms, check_keys, incompatible_error, literal_text, single_value, string_value,
};
use crate::model::{DeriveField, IntermediateAttributes};
use syn::ext::IdentExt;

const FIELD_KEYS: [&str; 7] = ["name", "usage", "env", "default", "short", "nonflag", "skip"];
const NONFLAG_MARKER: &str = "#nonflag";
const SKIP_MARKER: &str = "-";

impl DeriveField {
    /// Load a named field, or `None` when the field is not bound at all.
    pub fn load(value: &syn::Field) -> Result<Option<Self>, syn::Error> {
        let field_name = value.ident.clone().ok_or_else(|| {
            syn::Error::new_spanned(value, "Invalid - record fields must be named.")
        })?;
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("flag") {
                attributes.merge(attribute)?;
            }
        }

        check_keys("field", &attributes, &FIELD_KEYS, &field_name)?;
        check_forms(
            &attributes,
            &["short", "skip"],
            &["name", "usage", "env", "default"],
            &field_name,
        )?;

        let skip = attributes.singletons.contains("skip");
        let short = attributes.singletons.contains("short");
        let name = single_value("field", &attributes, "name", &field_name)?
            .map(|value| string_value("name", value))
            .transpose()?;
        let nonflag = if attributes.singletons.contains("nonflag") {
            Some(NONFLAG_MARKER.to_string())
        } else {
            single_value("field", &attributes, "nonflag", &field_name)?
                .map(|value| string_value("nonflag", value).map(|label| format!("{NONFLAG_MARKER}:{label}")))
                .transpose()?
        };

        if skip {
            for other in ["name", "usage", "env", "default", "short", "nonflag"] {
                if attributes.keys().any(|key| key == other) {
                    return Err(incompatible_error("field", &field_name, "skip", other));
                }
            }

            return Ok(None);
        }

        if nonflag.is_some() {
            for other in ["name", "env", "default", "short"] {
                if attributes.keys().any(|key| key == other) {
                    return Err(incompatible_error("field", &field_name, "nonflag", other));
                }
            }
        }

        let name = nonflag.or(name);
        let ident = field_name.unraw().to_string();

        match name.as_deref() {
            Some(name) if name.trim() == SKIP_MARKER => return Ok(None),
            // Identifiers with a leading underscore are private to the program.
            None if ident.starts_with('_') => return Ok(None),
            _ => {}
        }

        let usage = single_value("field", &attributes, "usage", &field_name)?
            .map(|value| string_value("usage", value))
            .transpose()?;
        let env = single_value("field", &attributes, "env", &field_name)?
            .map(|value| string_value("env", value))
            .transpose()?;
        let default = single_value("field", &attributes, "default", &field_name)?
            .map(|value| literal_text("default", value))
            .transpose()?;

        Ok(Some(DeriveField {
            field_name,
            ident,
            name,
            usage,
            env,
            default,
            short,
        }))
    }
}
