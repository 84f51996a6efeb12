//! Build-script helper that exports a workbook directory into `OUT_DIR`.
//!
//! Data files land in `$OUT_DIR/data`, generated code and keys enums in
//! `$OUT_DIR/code`. The calling `main` returns
//! `Result<(), Box<dyn std::error::Error>>`; workbook diagnostics are
//! printed as cargo warnings and fail the build.
#[macro_export]
macro_rules! build {
    ($input:expr) => {
        use std::{env::var, path::PathBuf};

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", $input);
        println!("cargo:rerun-if-env-changed={}", $crate::codegen::RUNTIME_CRATE_ENV);

        let out_dir = PathBuf::from(var("OUT_DIR")?);

        //
        // EXPORT
        //

        let mut config = $crate::config::ExportConfig::new($input, out_dir.join("data"));
        config.code_dir = Some(out_dir.join("code"));

        let report = $crate::Exporter::new(config)?.run()?;
        for diagnostic in report.diagnostics.iter() {
            println!("cargo:warning={diagnostic}");
        }
        if report.has_diagnostics() {
            return Err(format!("{} workbook diagnostic(s)", report.diagnostics.len()).into());
        }
    };
}
