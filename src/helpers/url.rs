//! URL and path helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join path segments into a site-absolute path
///
/// Empty segments and stray slashes are dropped; the result always starts
/// with `/` and never ends with one, except for the root itself.
///
/// # Examples
/// ```ignore
/// join_path(&["tags/", "/aws", "2"]) // -> "/tags/aws/2"
/// join_path(&["", ""])               // -> "/"
/// ```
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let parts: Vec<&str> = segments
        .iter()
        .flat_map(|s| s.as_ref().split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    format!("/{}", parts.join("/"))
}

/// Append a trailing slash to a non-root path
pub fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Build an absolute URL from the site URL and a site-absolute path
///
/// Each path segment is percent-encoded, so non-ASCII tag keys produce
/// valid URLs.
///
/// # Examples
/// ```ignore
/// full_url("https://example.com/", "/tags/café/") // -> "https://example.com/tags/caf%C3%A9/"
/// ```
pub fn full_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let encoded = path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        format!("{}{}", base, encoded)
    } else {
        format!("{}/{}", base, encoded)
    }
}
