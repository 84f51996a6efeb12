use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use sheetease_schema::{
    naming::is_keyword,
    types::{Primitive, TypeDescriptor},
};

/// Identifier token for a validated name, raw when it is a keyword.
pub(crate) fn ident(name: &str) -> Ident {
    if is_keyword(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// `#[doc = "..."]` for optional text; multi-line text becomes one doc
/// attribute per line.
pub(crate) fn doc(text: Option<&str>) -> TokenStream {
    let Some(text) = text else {
        return quote!();
    };

    let lines = text.lines().map(|line| format!(" {}", line.trim_end()));
    quote!(#(#[doc = #lines])*)
}

pub(crate) fn primitive_type(prim: Primitive) -> TokenStream {
    match prim {
        Primitive::Int => quote!(i32),
        Primitive::Float => quote!(f64),
        Primitive::String => quote!(::std::string::String),
    }
}

/// Rust field type for a column type.
pub(crate) fn field_type(ty: TypeDescriptor) -> TokenStream {
    match ty {
        TypeDescriptor::Int => primitive_type(Primitive::Int),
        TypeDescriptor::Float => primitive_type(Primitive::Float),
        TypeDescriptor::String => primitive_type(Primitive::String),
        TypeDescriptor::List(elem) => {
            let elem = primitive_type(elem);
            quote!(::std::vec::Vec<#elem>)
        }
        TypeDescriptor::Map { key, value } => {
            let key = primitive_type(key);
            let value = primitive_type(value);
            quote!(::std::collections::BTreeMap<#key, #value>)
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("kind").to_string(), "kind");
    }

    #[test]
    fn container_types_use_absolute_paths() {
        let ty = TypeDescriptor::Map {
            key: Primitive::Int,
            value: Primitive::String,
        };

        assert_eq!(
            field_type(ty).to_string(),
            quote!(::std::collections::BTreeMap<i32, ::std::string::String>).to_string()
        );
        assert!(doc(None).is_empty());
        assert_eq!(doc(Some("a\nb")).to_string().matches("doc").count(), 2);
    }
}
