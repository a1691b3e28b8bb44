//! Request path → file resolution
//!
//! Maps the URL path onto one of the configured document roots. Paths that
//! escape a root (`..`, symlinks pointing outside) never resolve.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::logger;

/// Finds the file a request path refers to
#[derive(Debug, Clone)]
pub struct FileLocator {
    roots: Vec<PathBuf>,
}

impl FileLocator {
    /// Every root must exist; they are searched in the given order
    pub fn new<I, P>(roots: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let roots = roots
            .into_iter()
            .map(|root| {
                let root = root.as_ref();
                root.canonicalize().map_err(|e| {
                    Error::InvalidConfig(format!(
                        "Document root '{}' is not accessible: {e}",
                        root.display()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { roots })
    }

    /// Resolve a URL path (percent-encoded, query already stripped)
    ///
    /// Returns the canonical path of the first regular file found.
    /// Directories are not served.
    pub fn find_file(&self, uri_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(uri_path).ok()?;
        if decoded.contains('\0') {
            return None;
        }
        let relative = decoded.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        self.roots.iter().find_map(|root| {
            // A missing file is the common 404 case, not worth logging
            let candidate = root.join(relative).canonicalize().ok()?;
            if !candidate.starts_with(root) {
                logger::log_warning(&format!(
                    "Path traversal attempt blocked: {uri_path} -> {}",
                    candidate.display()
                ));
                return None;
            }
            candidate.is_file().then_some(candidate)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, TempDir) {
        let primary = TempDir::new().unwrap();
        fs::create_dir_all(primary.path().join("css")).unwrap();
        fs::write(primary.path().join("index.html"), "<h1>primary</h1>").unwrap();
        fs::write(primary.path().join("css/site.css"), "body {}").unwrap();
        fs::write(primary.path().join("hello world.txt"), "hi").unwrap();

        let shared = TempDir::new().unwrap();
        fs::write(shared.path().join("index.html"), "<h1>shared</h1>").unwrap();
        fs::write(shared.path().join("logo.svg"), "<svg/>").unwrap();
        (primary, shared)
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let err = FileLocator::new(["/definitely/not/here"]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_roots_are_searched_in_order() {
        let (primary, shared) = site();
        let locator = FileLocator::new([primary.path(), shared.path()]).unwrap();
        let primary_root = primary.path().canonicalize().unwrap();
        let shared_root = shared.path().canonicalize().unwrap();

        assert_eq!(
            locator.find_file("/index.html"),
            Some(primary_root.join("index.html"))
        );
        assert_eq!(
            locator.find_file("/logo.svg"),
            Some(shared_root.join("logo.svg"))
        );
        assert_eq!(
            locator.find_file("/css/site.css"),
            Some(primary_root.join("css/site.css"))
        );
    }

    #[test]
    fn test_percent_decoding() {
        let (primary, _shared) = site();
        let locator = FileLocator::new([primary.path()]).unwrap();

        assert!(locator.find_file("/hello%20world.txt").is_some());
        assert!(locator.find_file("/hello%00world.txt").is_none());
    }

    #[test]
    fn test_directories_and_missing_files() {
        let (primary, _shared) = site();
        let locator = FileLocator::new([primary.path()]).unwrap();

        assert_eq!(locator.find_file("/"), None);
        assert_eq!(locator.find_file("/css"), None);
        assert_eq!(locator.find_file("/missing.css"), None);
    }

    #[test]
    fn test_traversal_is_blocked() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("public");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let locator = FileLocator::new([&root]).unwrap();

        assert_eq!(locator.find_file("/../secret.txt"), None);
        assert_eq!(locator.find_file("/%2e%2e/secret.txt"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_is_blocked() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("public");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        fs::write(root.join("inside.txt"), "fine").unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("leak.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("inside.txt"), root.join("alias.txt")).unwrap();
        let locator = FileLocator::new([&root]).unwrap();

        assert_eq!(locator.find_file("/leak.txt"), None);
        assert_eq!(
            locator.find_file("/alias.txt"),
            Some(root.canonicalize().unwrap().join("inside.txt"))
        );
    }
}
