//! Object key construction.
//!
//! Keys have the shape `{prefix}/{resource}/{uuid}-{file name}`. The uuid
//! keeps uploads of the same file name from overwriting each other, and the
//! file name is reduced to a URL-safe subset.

use uuid::Uuid;

/// Used when a client sends a file part without a usable name.
const FALLBACK_FILE_NAME: &str = "upload";

/// Maximum length of the sanitized file name segment.
const MAX_FILE_NAME_LEN: usize = 100;

/// Build a fresh, unique object key for an uploaded file.
pub fn object_key(prefix: &str, resource: &str, file_name: &str) -> String {
    let name = sanitize_file_name(file_name);
    let id = Uuid::new_v4();
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{resource}/{id}-{name}")
    } else {
        format!("{prefix}/{resource}/{id}-{name}")
    }
}

/// Strip directories and replace anything outside `[A-Za-z0-9._-]` with `-`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .take(MAX_FILE_NAME_LEN)
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Lowercased extension of `file_name`, if it has one.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_has_prefix_resource_and_name() {
        let key = object_key("lmscontent", "book", "cover.png");
        assert!(key.starts_with("lmscontent/book/"));
        assert!(key.ends_with("-cover.png"));
    }

    #[test]
    fn keys_are_unique_per_call() {
        assert_ne!(
            object_key("p", "book", "a.png"),
            object_key("p", "book", "a.png")
        );
    }

    #[test]
    fn empty_prefix_is_omitted() {
        assert!(object_key("/", "photo", "a.jpg").starts_with("photo/"));
    }

    #[test]
    fn sanitize_drops_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\pics\\my photo.JPG"), "my-photo.JPG");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("a.JPeG").as_deref(), Some("jpeg"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension(".hidden"), None);
        assert_eq!(extension("trailing."), None);
    }
}
