//! Source parsing: project URLs and `.figma` file references

use crate::types::ProjectReference;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Host serving Figma project URLs (subdomains accepted)
pub const FIGMA_HOST: &str = "figma.com";

/// Display name used when the URL carries none
pub const DEFAULT_DISPLAY_NAME: &str = "Untitled";

#[allow(clippy::expect_used)]
static SOURCE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.figma$").expect("static pattern compiles"));

/// Whether `source` looks like a `.figma` file reference
#[must_use]
pub fn looks_like_source_file(source: &str) -> bool {
    SOURCE_FILE_PATTERN.is_match(source)
}

/// Parse a Figma project URL into a [`ProjectReference`]
///
/// The project key is the third `/`-separated path component and the display
/// name the fourth (`https://www.figma.com/file/<key>/<name>`). Returns `None`
/// when the source is not a URL, the host is not figma.com (or a subdomain of
/// it), or the key is missing.
///
/// # Examples
///
/// ```
/// use figma_export::project_url::parse_project_reference;
///
/// let project = parse_project_reference("https://figma.com/file/ABC123/My-Design").unwrap();
/// assert_eq!(project.id, "ABC123");
/// assert_eq!(project.display_name, "My-Design");
///
/// assert!(parse_project_reference("https://example.com/x").is_none());
/// ```
#[must_use]
pub fn parse_project_reference(source: &str) -> Option<ProjectReference> {
    let url = Url::parse(source).ok()?;
    let host = url.host_str()?;
    if !is_figma_host(host) {
        return None;
    }

    let segments: Vec<&str> = url.path().split('/').collect();
    let id = segments.get(2).copied().unwrap_or_default();
    if id.is_empty() {
        return None;
    }

    let display_name = match segments.get(3).copied() {
        Some(raw) if !raw.is_empty() => urlencoding::decode(raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.to_string()),
        _ => DEFAULT_DISPLAY_NAME.to_string(),
    };

    Some(ProjectReference {
        id: id.to_string(),
        display_name,
    })
}

/// Whether `source` is accepted by the exporter at all
#[must_use]
pub fn can_parse(source: &str) -> bool {
    looks_like_source_file(source) || parse_project_reference(source).is_some()
}

fn is_figma_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == FIGMA_HOST
        || host
            .strip_suffix(FIGMA_HOST)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
