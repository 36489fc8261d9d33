//! File naming rules shared by the stamper and the packager.

/// Extension of every stamped output, regardless of the input format.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Strip the final extension from a file name.
///
/// Only the last `.segment` is removed (`a.b.png` -> `a.b`). Names without a
/// dot, and names whose only dot is the leading one (`.gitkeep`), are
/// returned unchanged.
pub fn file_base_name(name: &str) -> &str {
    match name.rfind('.') {
        None | Some(0) => name,
        Some(idx) => &name[..idx],
    }
}

/// Output file name for an input file name.
pub fn output_name(input_name: &str) -> String {
    format!("{}.{}", file_base_name(input_name), OUTPUT_EXTENSION)
}

/// Hidden and control entries (`.gitkeep`, `.DS_Store`) are never treated
/// as photos and never swept from the target directory.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
