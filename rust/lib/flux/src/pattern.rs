//! Path patterns.
//!
//! Paths are `/`-separated. In a pattern, `+` matches exactly one segment
//! and `#` matches the rest of the path (including nothing).

/// Whether `path` is matched by `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut segs = path.split('/');
    loop {
        match (pat.next(), segs.next()) {
            (Some("#"), _) => return true,
            (None, None) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(s)) if p == s => {}
            _ => return false,
        }
    }
}
