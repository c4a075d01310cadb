use std::path::{Path, PathBuf};

const XSF_EXTENSION: &str = "xsf";

/// Builds the default output path next to `input`: `dir/name.xsf` becomes
/// `dir/name<suffix>.xsf`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, suffix, XSF_EXTENSION))
}
