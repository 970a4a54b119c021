//! Slash-separated key paths.
//!
//! Object keys always use `/` regardless of the host platform, so these
//! helpers work on plain strings instead of `std::path`.

/// Joins the non-empty elements with `/` and cleans the result.
///
/// Returns an empty string when every element is empty.
pub fn join(elements: &[&str]) -> String {
    let non_empty: Vec<&str> = elements.iter().copied().filter(|e| !e.is_empty()).collect();
    if non_empty.is_empty() {
        return String::new();
    }
    clean(&non_empty.join("/"))
}

/// Lexically normalises a slash path: repeated separators collapse, `.`
/// segments disappear, `..` consumes the previous segment and any trailing
/// separator is dropped. An empty input cleans to `"."`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` at the root of an absolute path stays at the root
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join(&["pipelines", "abc"]), "pipelines/abc");
        assert_eq!(join(&["", "abc"]), "abc");
        assert_eq!(join(&["pipelines", ""]), "pipelines");
        assert_eq!(join(&["", ""]), "");
        assert_eq!(join(&["pipelines/", "/abc"]), "pipelines/abc");
        assert_eq!(join(&["a/b", "../c"]), "a/c");
        assert_eq!(join(&["/root", "x//y/."]), "/root/x/y");
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean(""), ".");
        assert_eq!(clean("."), ".");
        assert_eq!(clean("a/.."), ".");
        assert_eq!(clean("../../a"), "../../a");
        assert_eq!(clean("/../a"), "/a");
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("a/b/../../.."), "..");
        assert_eq!(clean("a//b/./c/"), "a/b/c");
    }
}
