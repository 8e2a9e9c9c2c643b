/// Extension substrings in match priority order.
const CONTENT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".mp4", "video/mp4"),
    (".mpg", "video/mpeg"),
];

pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Picks a content type by looking for extension substrings anywhere in the
/// file name, first match wins.
///
/// # Example
///
/// ```
/// # use tiny::http::mime::content_type_for;
/// assert_eq!(content_type_for("./home.html"), "text/html");
/// assert_eq!(content_type_for("./notes.txt"), "text/plain");
/// ```
pub fn content_type_for(filename: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| filename.contains(ext))
        .map(|(_, ty)| *ty)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
