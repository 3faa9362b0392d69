//! Root-path helpers
//!
//! Every item carries a normalized absolute path: `/` for the root folder,
//! otherwise `/`-separated segments with no trailing slash. These helpers
//! keep join/parent/name arithmetic in one place.

/// The root folder path
pub const ROOT_PATH: &str = "/";

/// Join a folder path and a child name into a normalized absolute path
pub fn join(folder_path: &str, name: &str) -> String {
    if folder_path == ROOT_PATH {
        format!("/{}", name)
    } else {
        format!("{}/{}", folder_path.trim_end_matches('/'), name)
    }
}

/// The parent path of an absolute path, or `None` for the root
pub fn parent(path: &str) -> Option<String> {
    if path == ROOT_PATH {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT_PATH.to_string()),
        Some(idx) => Some(path[..idx].to_string()),
        None => None,
    }
}

/// The last segment of an absolute path; empty for the root
pub fn name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Check whether a string is empty or whitespace-only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
