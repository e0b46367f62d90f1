use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{
    Expr, ExprLit, Fields, Ident, ItemStruct, Lit, Meta, Path, Token, parse_macro_input, parse_str,
    punctuated::Punctuated,
};

struct BaseEntityConfig {
    traits_path: Path,
    active_model_ident: Ident,
    id_field: Ident,
    created_at_field: Ident,
    updated_at_field: Ident,
    deleted_at_field: Ident,
}

impl Default for BaseEntityConfig {
    fn default() -> Self {
        let span = proc_macro2::Span::call_site();
        Self {
            traits_path: parse_str("crate::db::dao::base_traits")
                .expect("default traits path should parse"),
            active_model_ident: Ident::new("ActiveModel", span),
            id_field: Ident::new("id", span),
            created_at_field: Ident::new("created_at", span),
            updated_at_field: Ident::new("updated_at", span),
            deleted_at_field: Ident::new("deleted_at", span),
        }
    }
}

/// Adds the bookkeeping columns every soft-deletable table carries
/// (`id`, `created_at`, `updated_at`, `deleted_at`) and implements the
/// DAO base traits for the generated entity.
#[proc_macro_attribute]
pub fn base_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut config = BaseEntityConfig::default();
    if let Err(err) = apply_args(&mut config, args) {
        return err.to_compile_error().into();
    }

    let mut input = parse_macro_input!(item as ItemStruct);
    let fields = match &mut input.fields {
        Fields::Named(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                input,
                "base_entity requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let existing: HashSet<String> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.to_string()))
        .collect();

    let id_ident = &config.id_field;
    let created_ident = &config.created_at_field;
    let updated_ident = &config.updated_at_field;
    let deleted_ident = &config.deleted_at_field;

    let injected: [(&Ident, syn::Field); 4] = [
        (
            id_ident,
            syn::parse_quote! {
                #[sea_orm(primary_key, auto_increment = false)]
                pub #id_ident: uuid::Uuid
            },
        ),
        (
            created_ident,
            syn::parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #created_ident: sea_orm::entity::prelude::DateTimeWithTimeZone
            },
        ),
        (
            updated_ident,
            syn::parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #updated_ident: sea_orm::entity::prelude::DateTimeWithTimeZone
            },
        ),
        (
            deleted_ident,
            syn::parse_quote! {
                #[sea_orm(nullable)]
                pub #deleted_ident: Option<sea_orm::entity::prelude::DateTimeWithTimeZone>
            },
        ),
    ];

    let mut new_fields = Punctuated::new();
    for (ident, field) in injected {
        if !existing.contains(&ident.to_string()) {
            new_fields.push(field);
        }
    }
    for field in fields.named.iter().cloned() {
        new_fields.push(field);
    }
    fields.named = new_fields;

    let traits_path = &config.traits_path;
    let active_model = &config.active_model_ident;
    let id_column = column_variant(id_ident);
    let created_at_column = column_variant(created_ident);
    let deleted_at_column = column_variant(deleted_ident);

    let expanded = quote! {
        #input

        impl #traits_path::HasIdActiveModel for #active_model {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.#id_ident = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits_path::TimestampedActiveModel for #active_model {
            fn set_created_at(
                &mut self,
                ts: sea_orm::entity::prelude::DateTimeWithTimeZone,
            ) {
                self.#created_ident = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(
                &mut self,
                ts: sea_orm::entity::prelude::DateTimeWithTimeZone,
            ) {
                self.#updated_ident = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits_path::HasBaseColumns for Entity {
            fn id_column() -> Column {
                Column::#id_column
            }

            fn created_at_column() -> Column {
                Column::#created_at_column
            }

            fn deleted_at_column() -> Column {
                Column::#deleted_at_column
            }
        }
    };

    expanded.into()
}

// DeriveEntityModel names column variants in UpperCamelCase.
fn column_variant(field: &Ident) -> Ident {
    let name: String = field
        .to_string()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    Ident::new(&name, field.span())
}

fn apply_args(
    config: &mut BaseEntityConfig,
    args: Punctuated<Meta, Token![,]>,
) -> Result<(), syn::Error> {
    for meta in args {
        let Meta::NameValue(name_value) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected name-value pair, e.g. traits = \"path::to::traits\"",
            ));
        };

        let Some(ident) = name_value.path.get_ident() else {
            return Err(syn::Error::new_spanned(
                name_value.path,
                "expected simple identifier for attribute key",
            ));
        };

        let value = match name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) => lit_str,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected string literal for attribute value",
                ));
            }
        };

        let field = || Ident::new(&value.value(), value.span());
        match ident.to_string().as_str() {
            "traits" => {
                config.traits_path = value.parse::<Path>().map_err(|err| {
                    syn::Error::new(value.span(), format!("invalid traits path: {err}"))
                })?;
            }
            "active_model" => config.active_model_ident = field(),
            "id" => config.id_field = field(),
            "created_at" => config.created_at_field = field(),
            "updated_at" => config.updated_at_field = field(),
            "deleted_at" => config.deleted_at_field = field(),
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "unknown base_entity attribute key",
                ));
            }
        }
    }

    Ok(())
}
