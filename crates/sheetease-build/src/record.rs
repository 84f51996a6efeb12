use crate::{
    TableBuilder,
    helper::{doc, field_type, ident},
};
use proc_macro2::TokenStream;
use quote::quote;

// generate
// `{T}Info`: one public field per column, deserialized from the authored name
pub(crate) fn generate(builder: &TableBuilder<'_>) -> TokenStream {
    let schema = builder.schema;
    let rt = builder.runtime;
    let serde_crate = rt.serde_crate();
    let info = builder.info_ident();
    let table_doc = format!(" Row of the `{}` table.", schema.ident);

    let fields = schema.fields.iter().map(|field| {
        let name = ident(&field.ident);
        let ty = field_type(field.ty);
        let docs = doc(field.description.as_deref());
        let rename = &field.source_name;

        quote! {
            #docs
            #[serde(rename = #rename)]
            pub #name: #ty,
        }
    });

    quote! {
        #[doc = #table_doc]
        #[derive(
            Clone,
            Debug,
            PartialEq,
            #rt::__reexports::serde::Deserialize,
            #rt::__reexports::serde::Serialize,
        )]
        #[serde(crate = #serde_crate)]
        pub struct #info {
            #(#fields)*
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        OutputDir, RuntimePath, TableBuilder,
        test_support::{squash, weapon_table},
    };

    #[test]
    fn record_struct_renames_to_authored_names() {
        let table = weapon_table();
        let runtime = RuntimePath::default();
        let files = TableBuilder::new(&table, "WeaponConfig.json", &runtime).generate();

        let info = &files[0];
        assert_eq!(info.dir, OutputDir::Code);
        assert_eq!(info.file_name, "weapon_info.rs");
        assert!(info.contents.starts_with("// @generated"));
        assert!(info.contents.contains("Hit points"));

        let code = squash(&info.contents);
        assert!(code.contains("pubstructWeaponInfo"));
        assert!(code.contains("#[serde(rename=\"maxhp\")]pubmax_hp:f64"));
        assert!(code.contains("pubr#type:::std::string::String"));
        assert!(code.contains("serde(crate=\"::sheetease_runtime::__reexports::serde\")"));

        syn::parse_file(&info.contents).unwrap();
    }
}
