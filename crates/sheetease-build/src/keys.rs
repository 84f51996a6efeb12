use crate::{TableBuilder, helper::ident};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use sheetease_core::EnumDomain;

// generate
// `{T}Keys`: one variant per string key, discriminant = ordinal
pub(crate) fn generate(builder: &TableBuilder<'_>, domain: &EnumDomain) -> TokenStream {
    let rt = builder.runtime;
    let keys = builder.keys_ident();
    let table = &builder.schema.ident;
    let enum_doc = format!(" String keys of the `{table}` table, in order of first appearance.");

    let variants: Vec<_> = domain.iter().map(|(_, name)| ident(name)).collect();
    let names: Vec<_> = domain.iter().map(|(_, name)| name).collect();
    let ordinals: Vec<_> = domain
        .iter()
        .map(|(ordinal, _)| Literal::i32_unsuffixed(ordinal))
        .collect();

    // a zero-variant enum cannot carry a repr or be cast
    let (repr, ordinal_body, name_body, from_ordinal_body) = if domain.is_empty() {
        (
            quote!(),
            quote!(match self {}),
            quote!(match self {}),
            quote!({
                let _ = ordinal;
                None
            }),
        )
    } else {
        (
            quote!(#[repr(i32)]),
            quote!(self as i32),
            quote! {
                match self {
                    #(Self::#variants => #names,)*
                }
            },
            quote! {
                match ordinal {
                    #(#ordinals => Some(Self::#variants),)*
                    _ => None,
                }
            },
        )
    };

    quote! {
        #[doc = #enum_doc]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #repr
        pub enum #keys {
            #(#variants = #ordinals,)*
        }

        impl #keys {
            pub const ALL: &'static [Self] = &[#(Self::#variants),*];

            /// Integer key of this member in the data file.
            #[must_use]
            pub const fn ordinal(self) -> i32 {
                #ordinal_body
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                #name_body
            }

            #[must_use]
            pub const fn from_ordinal(ordinal: i32) -> ::core::option::Option<Self> {
                #from_ordinal_body
            }
        }

        impl ::core::str::FromStr for #keys {
            type Err = #rt::ParseKeyError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    #(#names => Ok(Self::#variants),)*
                    _ => Err(#rt::ParseKeyError::new(#table, s)),
                }
            }
        }

        impl ::core::fmt::Display for #keys {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

///
/// TESTS
///
