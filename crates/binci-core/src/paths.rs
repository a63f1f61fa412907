//! Host and container path handling

use std::path::{Component, Path, PathBuf};

/// Rewrite `.`-relative volume host paths against `cwd`
///
/// Only the host segment (up to the first `:`) is resolved; the rest of the
/// entry is kept as written. Entries not starting with `.` are returned
/// unchanged.
pub fn resolve_volumes(volumes: &[String], cwd: &Path) -> Vec<String> {
    volumes.iter().map(|v| resolve_volume(v, cwd)).collect()
}

fn resolve_volume(entry: &str, cwd: &Path) -> String {
    if !entry.starts_with('.') {
        return entry.to_string();
    }

    let (host, rest) = match entry.find(':') {
        Some(idx) => entry.split_at(idx),
        None => (entry, ""),
    };
    let resolved = normalize(&cwd.join(host));
    tracing::debug!("Resolved volume host path {} -> {}", host, resolved.display());

    format!("{}{}", resolved.display(), rest)
}

/// Lexically collapse `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never climb above the root
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// POSIX form of a host path for use inside the container
///
/// Drops Windows verbatim (`\\?\`) and drive (`C:`) prefixes and turns
/// backslashes into forward slashes.
pub fn container_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut s: &str = &raw;

    if let Some(rest) = s.strip_prefix(r"\\?\UNC\") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix(r"\\?\") {
        s = rest;
    }

    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        s = &s[2..];
    }

    let mut posix = s.replace('\\', "/");
    if !posix.starts_with('/') {
        posix.insert(0, '/');
    }
    posix
}
