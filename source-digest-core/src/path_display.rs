//! Short display form of a file path, used for block headers.

use std::path::Path;

/// Absolute, slash-separated path, cut down to `src/...` when the path runs
/// through a `src` directory.
///
/// The cut happens after the *last* `src/` in the path, which is not
/// necessarily the `/src/` segment that triggered it: `/p/src/mysrc/A.java`
/// becomes `src/A.java`.
pub fn normalized_path(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let slashed = absolute.to_string_lossy().replace('\\', "/");
    if !slashed.contains("/src/") {
        return slashed;
    }
    match slashed.rfind("src/") {
        Some(idx) => format!("src/{}", &slashed[idx + "src/".len()..]),
        None => slashed,
    }
}
