use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, Type, parse_macro_input};

#[proc_macro_derive(SchemaModel, attributes(form))]
pub fn derive_schema_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "SchemaModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "SchemaModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "SchemaModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for field in &named_fields {
        let (name, descriptor) = match schema_entry(field) {
            Ok(entry) => entry,
            Err(error) => return error.to_compile_error().into(),
        };
        if !seen.insert(name.clone()) {
            return syn::Error::new_spanned(
                &field.ident,
                format!("duplicate form field name `{name}`"),
            )
            .to_compile_error()
            .into();
        }
        entries.push(quote! { (#name, #descriptor) });
    }

    let schemaform = schemaform_path();
    let count = entries.len();

    quote! {
        impl #schemaform::schema::SchemaModel for #model_ident {
            fn form_schema() -> #schemaform::schema::FormSchema {
                let entries: [(&'static str, &'static str); #count] = [#(#entries),*];
                entries.into_iter().collect()
            }
        }
    }
    .into()
}

struct FormAttr {
    kind: Option<LitStr>,
    rename: Option<LitStr>,
}

fn parse_form_attr(field: &Field) -> syn::Result<FormAttr> {
    let mut parsed = FormAttr {
        kind: None,
        rename: None,
    };
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                parsed.kind = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("rename") {
                parsed.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `kind` or `rename`"))
            }
        })?;
    }
    Ok(parsed)
}

fn schema_entry(field: &Field) -> syn::Result<(String, String)> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let attr = parse_form_attr(field)?;
    let name = attr
        .rename
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string());
    let descriptor = match attr.kind {
        Some(lit) => lit.value(),
        None => infer_descriptor(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(
                &field.ty,
                "cannot infer a form kind for this type; add #[form(kind = \"...\")]",
            )
        })?,
    };
    Ok((name, descriptor))
}

fn infer_descriptor(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    let last = path.path.segments.last()?.ident.to_string();
    let descriptor = match last.as_str() {
        "String" | "SharedString" => "string",
        "bool" => "bool",
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => "int",
        "f32" | "f64" | "Decimal" => "double",
        "NaiveDate" => "date",
        _ => return None,
    };
    Some(descriptor.to_string())
}

fn schemaform_path() -> TokenStream2 {
    match crate_name("schemaform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::schemaform),
    }
}
