//! Relative-path sanitization for generated files.
//!
//! Provider output is untrusted: paths may carry drive letters, absolute
//! prefixes, or parent-directory traversal. `sanitize` reduces any input to
//! a relative, traversal-free path (possibly empty; the validator treats an
//! empty result as a failure).

/// Sanitize a candidate relative file path.
///
/// Each pass, in order:
/// 1. Strip a leading single-letter drive prefix (`X:`).
/// 2. Strip all leading slash and backslash characters.
/// 3. Split on `/` and `\`, drop every segment equal to `..`, rejoin
///    with `/`.
/// 4. Remove any remaining literal `..` substrings.
///
/// Step 4 can expose a new leading slash or drive prefix (e.g. `..//x`
/// becomes `/x`), so passes repeat until a fixpoint is reached. Each pass
/// only ever shrinks the string, so this terminates. Total function:
/// always returns a string, never panics. Idempotent by construction.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_once(raw: &str) -> String {
    let mut rest = raw;

    // Drive prefix ("C:", "x:")
    let bytes = rest.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        rest = &rest[2..];
    }

    let rest = rest.trim_start_matches(['/', '\\']);

    let joined = rest
        .split(['/', '\\'])
        .filter(|segment| *segment != "..")
        .collect::<Vec<_>>()
        .join("/");

    joined.replace("..", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parent_traversal() {
        assert_eq!(sanitize("../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize("a/../b"), "a/b");
        assert_eq!(sanitize("..\\..\\windows\\system32"), "windows/system32");
    }

    #[test]
    fn strips_drive_prefix_and_leading_slashes() {
        assert_eq!(sanitize("C:\\a\\..\\b"), "a/b");
        assert_eq!(sanitize("c:/temp/file.txt"), "temp/file.txt");
        assert_eq!(sanitize("/etc/passwd"), "etc/passwd");
        assert_eq!(sanitize("\\\\share\\file"), "share/file");
        assert_eq!(sanitize("///deep/root"), "deep/root");
    }

    #[test]
    fn removes_residual_dotdot_substrings() {
        assert_eq!(sanitize("a..b/c"), "ab/c");
        assert_eq!(sanitize("....//x"), "x");
        assert_eq!(sanitize("..//x"), "x");
    }

    #[test]
    fn plain_relative_paths_pass_through() {
        assert_eq!(sanitize("index.html"), "index.html");
        assert_eq!(sanitize("src/app/main.rs"), "src/app/main.rs");
        assert_eq!(sanitize("a.b/c.d"), "a.b/c.d");
    }

    #[test]
    fn empty_and_degenerate_inputs_yield_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(".."), "");
        assert_eq!(sanitize("../.."), "");
        assert_eq!(sanitize("C:"), "");
        assert_eq!(sanitize("//"), "");
    }

    #[test]
    fn output_never_contains_traversal_or_absolute_prefix() {
        let adversarial = [
            "../../etc/passwd",
            "..\\..\\..\\boot.ini",
            "C:..\\secret",
            "a/./../../b",
            "....//....//etc",
            "..C:/etc",
            "..//x",
            "..",
        ];
        for input in adversarial {
            let out = sanitize(input);
            assert!(!out.contains(".."), "{input:?} -> {out:?}");
            assert!(!out.starts_with('/'), "{input:?} -> {out:?}");
            assert!(!out.starts_with('\\'), "{input:?} -> {out:?}");
            let bytes = out.as_bytes();
            let has_drive =
                bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
            assert!(!has_drive, "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "../../etc/passwd",
            "C:\\a\\..\\b",
            "src/app/main.rs",
            "....//x",
            "..C:/etc",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }
}
