use crate::TableBuilder;
use proc_macro2::TokenStream;
use quote::quote;
use sheetease_schema::node::KeyKind;

// generate
// `{T}Config`: the ConfigTable impl plus typed lookups
pub(crate) fn generate(builder: &TableBuilder<'_>) -> TokenStream {
    let schema = builder.schema;
    let rt = builder.runtime;
    let info = builder.info_ident();
    let config = builder.config_ident();
    let name = &schema.ident;
    let data_file = builder.data_file;
    let table_doc = format!(" Accessor for the `{name}` table, loaded from `{data_file}`.");

    let key_lookups = match schema.key {
        KeyKind::IntKey => quote!(),

        KeyKind::CompositeIntKey { .. } => quote! {
            /// Look up a row by its two sub-keys.
            pub fn get_by_composite_key(
                ctx: &#rt::ConfigContext,
                key1: i32,
                key2: i32,
            ) -> ::core::result::Result<&#info, #rt::LookupError> {
                let id = #rt::combine_key(key1, key2)?;
                Self::get_by_id(ctx, id)
            }
        },

        KeyKind::StringKey => {
            let keys = builder.keys_ident();
            quote! {
                pub fn get_by_key(
                    ctx: &#rt::ConfigContext,
                    key: #keys,
                ) -> ::core::result::Result<&#info, #rt::LookupError> {
                    Self::get_by_id(ctx, key.ordinal())
                }

                /// Look up a row by the key's member name.
                pub fn get_by_name<'a>(
                    ctx: &'a #rt::ConfigContext,
                    name: &str,
                ) -> ::core::result::Result<&'a #info, #rt::LookupError> {
                    let key: #keys = name.parse()?;
                    Self::get_by_key(ctx, key)
                }
            }
        }
    };

    quote! {
        #[doc = #table_doc]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #config;

        impl #rt::ConfigTable for #config {
            const NAME: &'static str = #name;
            const DATA_FILE: &'static str = #data_file;
            type Info = #info;
        }

        impl #config {
            pub fn table(
                ctx: &#rt::ConfigContext,
            ) -> ::core::result::Result<&#rt::TableData<#info>, #rt::LookupError> {
                ctx.table::<Self>()
            }

            pub fn get_by_id(
                ctx: &#rt::ConfigContext,
                id: i32,
            ) -> ::core::result::Result<&#info, #rt::LookupError> {
                ctx.get::<Self>(id)
            }

            pub fn filter<F>(
                ctx: &#rt::ConfigContext,
                predicate: F,
            ) -> ::core::result::Result<::std::vec::Vec<&#info>, #rt::LookupError>
            where
                F: FnMut(&#info) -> bool,
            {
                Ok(ctx.table::<Self>()?.filter(predicate))
            }

            pub fn select<R, F>(
                ctx: &#rt::ConfigContext,
                selector: F,
            ) -> ::core::result::Result<::std::vec::Vec<R>, #rt::LookupError>
            where
                F: FnMut(&#info) -> R,
            {
                Ok(ctx.table::<Self>()?.select(selector))
            }

            #key_lookups
        }
    }
}

///
/// TESTS
///
