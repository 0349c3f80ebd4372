//! Derive macros for filterable types.
//!
//! This crate provides the `#[derive(Filterable)]` macro, which turns a struct
//! into a filter field map and a typed accessor for the fluent query builder.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Ident, Lit, LitStr, Meta,
    PathArguments, Type, parse_macro_input,
};

/// Derives `Filterable` for a struct and generates a typed filter accessor.
///
/// # Container Attributes
///
/// - `#[filter(rename_all = "PascalCase")]` - Derives column names from field
///   names in the given case (`PascalCase` or `snake_case`). Filter names are
///   unaffected.
///
/// # Field Attributes
///
/// - `#[filter(rename = "json_name")]` - The name used in filter strings
///   (defaults to the field name)
/// - `#[filter(column = "ColumnName")]` - The SQL column name
/// - `#[filter(indexed)]` - Marks the column as indexed
/// - `#[filter(skip)]` - Leaves the field out of the field map
/// - `#[filter(kind = "struct")]` - Overrides the field kind (`string`,
///   `struct`, `int`, `int8`, `int16`, `int32`, `int64`, `bool`, `float32`,
///   `float64`, `bytes`)
///
/// # Generated Items
///
/// For a struct `User`, this macro generates:
///
/// - `impl Filterable for User` returning the field map
/// - `UserFilter` - wraps a `PartialQueryClause`, with one method per field
///   returning an `Ident` bound to the column. `Option<T>` and `Vec<T>` fields
///   yield `Ident<T>`.
/// - `User::filter()` returning a fresh `UserFilter`
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn derive_filterable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_filterable_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_filterable_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let column_case = get_column_case(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Filterable derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Filterable derive only supports structs",
            ));
        }
    };

    let mut filter_fields: Vec<FilterField> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_filter_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let plain_name = field_name.unraw().to_string();
        if plain_name == "new" {
            return Err(syn::Error::new_spanned(
                field_name,
                "field `new` collides with the generated filter constructor; \
                 skip it with #[filter(skip)] or rename the field",
            ));
        }
        let column_name = attrs.column.unwrap_or_else(|| match column_case {
            ColumnCase::Field => plain_name.clone(),
            ColumnCase::Pascal => to_pascal_case(&plain_name),
            ColumnCase::Snake => to_snake_case(&plain_name),
        });

        filter_fields.push(FilterField {
            method_name: field_name.clone(),
            filter_name: attrs.rename.unwrap_or(plain_name),
            column_name,
            field_type: field.ty.clone(),
            kind: attrs.kind,
            indexed: attrs.indexed,
        });
    }

    let filter_struct_name = format_ident!("{}Filter", struct_name);
    let filter_doc = format!("Typed filter accessor for `{struct_name}`.");

    let map_entries: Vec<TokenStream2> = filter_fields
        .iter()
        .map(|f| {
            let filter_name = &f.filter_name;
            let column_name = &f.column_name;
            let field_type = &f.field_type;
            let indexed = f.indexed;
            let kind = f.kind.clone().unwrap_or_else(|| {
                quote! {
                    <#field_type as ::filterql_core::schema::HasFieldKind>::field_kind()
                }
            });

            quote! {
                fields.insert(
                    ::std::string::String::from(#filter_name),
                    ::filterql_core::schema::FieldInfo {
                        name: ::std::string::String::from(#column_name),
                        kind: #kind,
                        indexed: #indexed,
                    },
                );
            }
        })
        .collect();

    let accessors: Vec<TokenStream2> = filter_fields
        .iter()
        .map(|f| {
            let method_name = &f.method_name;
            let column_name = &f.column_name;
            let value_type = value_type(&f.field_type);
            let doc = format!("Filters on the `{}` column.", f.column_name);

            quote! {
                #[doc = #doc]
                #[must_use]
                pub fn #method_name(self) -> ::filterql_core::builder::Ident<#value_type> {
                    ::filterql_core::builder::Ident::new(#column_name, self.0)
                }
            }
        })
        .collect();

    let expanded = quote! {
        impl ::filterql_core::schema::Filterable for #struct_name {
            fn filter_fields() -> ::filterql_core::schema::FieldMap {
                let mut fields = ::filterql_core::schema::FieldMap::new();
                #(#map_entries)*
                fields
            }
        }

        #[doc = #filter_doc]
        #[derive(Debug, Clone, Default)]
        #vis struct #filter_struct_name(::filterql_core::builder::PartialQueryClause);

        impl #filter_struct_name {
            /// Starts a new clause.
            #[must_use]
            pub const fn new() -> Self {
                Self(::filterql_core::builder::PartialQueryClause::new())
            }

            #(#accessors)*
        }

        impl ::core::convert::From<::filterql_core::builder::PartialQueryClause>
            for #filter_struct_name
        {
            fn from(partial: ::filterql_core::builder::PartialQueryClause) -> Self {
                Self(partial)
            }
        }

        impl #struct_name {
            /// Returns a typed filter accessor.
            #[must_use]
            pub const fn filter() -> #filter_struct_name {
                #filter_struct_name::new()
            }
        }
    };

    Ok(expanded)
}

struct FilterField {
    method_name: Ident,
    filter_name: String,
    column_name: String,
    field_type: Type,
    kind: Option<TokenStream2>,
    indexed: bool,
}

#[derive(Default)]
struct FilterAttrs {
    rename: Option<String>,
    column: Option<String>,
    indexed: bool,
    skip: bool,
    kind: Option<TokenStream2>,
}

#[derive(Clone, Copy)]
enum ColumnCase {
    Field,
    Pascal,
    Snake,
}

fn get_column_case(attrs: &[Attribute]) -> syn::Result<ColumnCase> {
    let mut case = ColumnCase::Field;
    for attr in attrs {
        if attr.path().is_ident("filter") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let value: LitStr = meta.value()?.parse()?;
                    case = match value.value().as_str() {
                        "PascalCase" => ColumnCase::Pascal,
                        "snake_case" => ColumnCase::Snake,
                        _ => {
                            return Err(syn::Error::new_spanned(
                                value,
                                "expected \"PascalCase\" or \"snake_case\"",
                            ));
                        }
                    };
                    Ok(())
                } else {
                    Err(meta.error("unsupported filter attribute"))
                }
            })?;
        }
    }
    Ok(case)
}

fn parse_filter_attrs(attrs: &[Attribute]) -> syn::Result<FilterAttrs> {
    let mut result = FilterAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("filter") {
            // Handle empty attribute like #[filter]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("indexed") {
                    result.indexed = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("rename") {
                    result.rename = Some(parse_str_value(&meta)?);
                } else if meta.path.is_ident("column") {
                    result.column = Some(parse_str_value(&meta)?);
                } else if meta.path.is_ident("kind") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.kind = Some(kind_tokens(&value)?);
                } else {
                    return Err(meta.error("unsupported filter attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn parse_str_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn kind_tokens(value: &LitStr) -> syn::Result<TokenStream2> {
    let variant = match value.value().as_str() {
        "string" => "String",
        "struct" => "Struct",
        "int" => "Int",
        "int8" => "Int8",
        "int16" => "Int16",
        "int32" => "Int32",
        "int64" => "Int64",
        "bool" => "Bool",
        "float32" => "Float32",
        "float64" => "Float64",
        "bytes" => "Bytes",
        _ => return Err(syn::Error::new_spanned(value, "unknown field kind")),
    };
    let variant = format_ident!("{}", variant);
    Ok(quote! { ::filterql_core::schema::FieldKind::#variant })
}

/// Returns the type an accessor compares against: `T` for `Option<T>` and
/// `Vec<T>`, the field type otherwise.
fn value_type(ty: &Type) -> Type {
    if let Type::Path(path) = ty {
        if path.qself.is_none() {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "Option" || segment.ident == "Vec" {
                    if let PathArguments::AngleBracketed(args) = &segment.arguments {
                        if let Some(GenericArgument::Type(inner)) = args.args.first() {
                            return inner.clone();
                        }
                    }
                }
            }
        }
    }
    ty.clone()
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("status"), "Status");
        assert_eq!(to_snake_case("userId"), "user_id");
    }

    #[test]
    fn test_value_type_unwraps_option_and_vec() {
        let ty: Type = syn::parse_quote!(Option<i64>);
        let expected: Type = syn::parse_quote!(i64);
        assert_eq!(value_type(&ty), expected);

        let ty: Type = syn::parse_quote!(Vec<String>);
        let expected: Type = syn::parse_quote!(String);
        assert_eq!(value_type(&ty), expected);

        let ty: Type = syn::parse_quote!(bool);
        assert_eq!(value_type(&ty), ty);
    }

    #[test]
    fn test_field_named_new_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Account {
                id: i64,
                new: bool,
            }
        };
        let err = derive_filterable_impl(input).unwrap_err();
        assert!(err.to_string().contains("field `new` collides"));

        let input: DeriveInput = syn::parse_quote! {
            struct Account {
                id: i64,
                r#new: bool,
            }
        };
        assert!(derive_filterable_impl(input).is_err());

        let input: DeriveInput = syn::parse_quote! {
            struct Account {
                id: i64,
                #[filter(skip)]
                new: bool,
            }
        };
        assert!(derive_filterable_impl(input).is_ok());
    }

    #[test]
    fn test_kind_tokens() {
        let lit: LitStr = syn::parse_quote!("struct");
        let tokens = kind_tokens(&lit).unwrap().to_string();
        assert!(tokens.contains("Struct"));

        let lit: LitStr = syn::parse_quote!("decimal");
        assert!(kind_tokens(&lit).is_err());
    }
}
