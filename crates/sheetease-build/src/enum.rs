use crate::helper::{doc, ident};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use sheetease_schema::node::EnumSchema;

// generate
// standalone enum with explicit discriminants
pub(crate) fn generate(schema: &EnumSchema) -> TokenStream {
    let name = ident(&schema.ident);
    let enum_doc = format!(" Defined on sheet `{}`.", schema.source.sheet);

    let variants: Vec<_> = schema.members.iter().map(|m| ident(&m.ident)).collect();
    let names: Vec<_> = schema.members.iter().map(|m| m.ident.as_str()).collect();
    let values: Vec<_> = schema
        .members
        .iter()
        .map(|m| Literal::i32_unsuffixed(m.value))
        .collect();
    let docs = schema.members.iter().map(|m| doc(m.description.as_deref()));

    quote! {
        #[doc = #enum_doc]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[repr(i32)]
        pub enum #name {
            #(
                #docs
                #variants = #values,
            )*
        }

        impl #name {
            pub const ALL: &'static [Self] = &[#(Self::#variants),*];

            #[must_use]
            pub const fn value(self) -> i32 {
                self as i32
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            #[must_use]
            pub const fn from_value(value: i32) -> ::core::option::Option<Self> {
                match value {
                    #(#values => Some(Self::#variants),)*
                    _ => None,
                }
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{OutputDir, generate_enum, test_support::squash};
    use sheetease_schema::{
        node::{EnumMember, EnumSchema},
        sheet::SourceRef,
    };

    #[test]
    fn enum_sheet_becomes_rust_enum() {
        let schema = EnumSchema {
            ident: "Quality".to_string(),
            source: SourceRef::new(Some("Enums.xlsx".into()), "Enum-Quality"),
            members: vec![
                EnumMember {
                    ident: "Common".to_string(),
                    value: 0,
                    description: None,
                },
                EnumMember {
                    ident: "Rare".to_string(),
                    value: 5,
                    description: Some("blue border".to_string()),
                },
            ],
        };

        let file = generate_enum(&schema);
        assert_eq!(file.dir, OutputDir::Enums);
        assert_eq!(file.file_name, "quality.rs");

        let code = squash(&file.contents);
        assert!(code.contains("pubenumQuality{Common=0,#[doc=\"blueborder\"]Rare=5,}"));
        assert!(code.contains("5=>Some(Self::Rare)"));

        syn::parse_file(&file.contents).unwrap();
    }
}
