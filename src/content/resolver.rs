use std::path::{Path, PathBuf};

use crate::config::ContentConfig;

/// Any URI containing this substring, anywhere, is served by running a
/// program. `/docs/cgi-bin-notes.html` counts too.
pub const CGI_MARKER: &str = "cgi-bin";

/// Where a request URI points on disk.
///
/// `path` always starts with the configured content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    Static { path: PathBuf },
    Dynamic { path: PathBuf, query_args: String },
}

impl ResolvedTarget {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedTarget::Static { path } | ResolvedTarget::Dynamic { path, .. } => path,
        }
    }
}

/// Maps a raw request URI to a static file or a CGI program.
///
/// The root is prepended as a plain string, so `/a.html` under root `.`
/// becomes `./a.html`. Static URIs ending in `/` get the default file name
/// appended. Dynamic URIs are split at the first `?`; the tail is passed on
/// undecoded.
pub fn resolve_uri(uri: &str, content: &ContentConfig) -> ResolvedTarget {
    if !uri.contains(CGI_MARKER) {
        let mut path = format!("{}{}", content.root, uri);
        if uri.ends_with('/') {
            path.push_str(&content.default_file);
        }
        return ResolvedTarget::Static {
            path: PathBuf::from(path),
        };
    }

    let (program, query_args) = uri.split_once('?').unwrap_or((uri, ""));

    ResolvedTarget::Dynamic {
        path: PathBuf::from(format!("{}{}", content.root, program)),
        query_args: query_args.to_string(),
    }
}

/// The URI-derived part of a resolved path, with the root replaced by `.`.
///
/// File-type detection looks only at this, so a root such as
/// `/srv/site.html.d` never leaks into the content type.
pub fn uri_name(path: &Path, content: &ContentConfig) -> String {
    let full = path.to_string_lossy();
    match full.strip_prefix(content.root.as_str()) {
        Some(rest) => format!(".{}", rest),
        None => full.into_owned(),
    }
}
