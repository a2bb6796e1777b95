//! Shared link parsing.

use url::Url;

/// Returns the host of `link`, or `None` if it is not an absolute URL with a
/// host.
///
/// ```rust
/// use chatlens::analysis::domain_of;
///
/// assert_eq!(domain_of("https://www.YouTube.com/watch?v=x").as_deref(), Some("www.youtube.com"));
/// assert_eq!(domain_of("not a url"), None);
/// ```
pub fn domain_of(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}
