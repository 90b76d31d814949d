//! File discovery for finding images in directories.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A set of accepted file extensions.
///
/// Members are lowercase and carry their leading dot (`.png`). Tokens that
/// are not of that form are kept aside: they never match a file but still
/// appear in the displayed list. Both sets are ordered so the list displays
/// the same way every run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
    ignored: BTreeSet<String>,
}

impl ExtensionSet {
    /// Build a set from raw tokens. Empty tokens are dropped.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut set = Self::default();
        for token in tokens {
            let token = token.as_ref().trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            if Self::is_well_formed(&token) {
                set.extensions.insert(token);
            } else {
                set.ignored.insert(token);
            }
        }
        set
    }

    /// Whether a lowercased token is a `.ext` suffix a file name can have.
    fn is_well_formed(token: &str) -> bool {
        token
            .strip_prefix('.')
            .is_some_and(|rest| !rest.is_empty() && !rest.contains(['.', '/', '\\']))
    }

    /// Check whether a file name's lowercased suffix is in the set.
    pub fn matches(&self, file_name: &str) -> bool {
        suffix_of(file_name).is_some_and(|suffix| self.extensions.contains(&suffix))
    }

    /// True when no token can match any file.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterate usable members in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Malformed tokens, lowercased and sorted.
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Every configured token joined with `", "`, sorted, malformed ones included.
    pub fn display_list(&self) -> String {
        let all: BTreeSet<&str> = self.iter().chain(self.ignored()).collect();
        all.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Lowercased `.ext` suffix of a file name, if it has one.
///
/// Dotfiles such as `.png` and names ending in a dot have no suffix.
pub fn suffix_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub relative: String,
    /// File name including extension
    pub file_name: String,
}

/// Discovers image files under a scan root.
pub struct FileDiscovery {
    extensions: ExtensionSet,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(extensions: ExtensionSet) -> Self {
        Self { extensions }
    }

    /// Lazily walk `root` and yield every accepted file.
    ///
    /// A directory's own files come before any of its subdirectories, which
    /// are visited in enumeration order. Symlinks to directories are neither
    /// followed nor reported. Unreadable entries are skipped.
    pub fn walk<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = DiscoveredFile> + 'a {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            // Stable sort: files first, otherwise enumeration order is kept.
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .filter(|entry| !(entry.path_is_symlink() && entry.path().is_dir()))
            .filter_map(move |entry| {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !self.extensions.matches(&file_name) {
                    return None;
                }
                let relative = relative_path(root, entry.path())?;
                Some(DiscoveredFile {
                    path: entry.into_path(),
                    relative,
                    file_name,
                })
            })
    }
}

/// Root-relative path with `/` separators.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn default_set() -> ExtensionSet {
        ExtensionSet::from_tokens(&crate::config::DEFAULT_EXTENSIONS)
    }

    #[test]
    fn test_matches() {
        let set = default_set();

        assert!(set.matches("test.jpg"));
        assert!(set.matches("test.JPG"));
        assert!(set.matches("test.jpeg"));
        assert!(set.matches("b.PNG"));
        assert!(set.matches("vector.Svg"));
        assert!(set.matches("archive.tar.webp"));
        assert!(!set.matches("test.txt"));
        assert!(!set.matches("png"));
        assert!(!set.matches(".png"));
        assert!(!set.matches("trailing."));
    }

    #[test]
    fn test_from_tokens_sets_aside_malformed_tokens() {
        let set = ExtensionSet::from_tokens(&[
            " .JPG", " ", "PNG", ".", ".tar.gz", ".a/b", ".webp", "",
        ]);
        let members: Vec<&str> = set.iter().collect();
        assert_eq!(members, vec![".jpg", ".webp"]);
        let ignored: Vec<&str> = set.ignored().collect();
        assert_eq!(ignored, vec![".", ".a/b", ".tar.gz", "png"]);
    }

    #[test]
    fn test_malformed_tokens_never_match() {
        let set = ExtensionSet::from_tokens(&["png", ".tar.gz", "."]);
        assert!(set.is_empty());
        assert!(!set.matches("photo.png"));
        assert!(!set.matches("backup.tar.gz"));
        assert!(!set.matches("dot."));
    }

    #[test]
    fn test_display_list_is_sorted() {
        let set = ExtensionSet::from_tokens(&[".png", ".bmp", ".jpg"]);
        assert_eq!(set.display_list(), ".bmp, .jpg, .png");
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn test_display_list_includes_malformed_tokens() {
        let set = ExtensionSet::from_tokens(&[".PNG", "gif", " ", ".jpg"]);
        assert_eq!(set.display_list(), ".jpg, .png, gif");
    }

    #[test]
    fn test_suffix_of() {
        assert_eq!(suffix_of("photo.JPEG").as_deref(), Some(".jpeg"));
        assert_eq!(suffix_of("a.b.Png").as_deref(), Some(".png"));
        assert_eq!(suffix_of("README"), None);
        assert_eq!(suffix_of(".gif"), None);
    }

    #[test]
    fn test_walk_filters_and_relativizes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("top.png"), b"x").unwrap();
        fs::write(root.join("notes.txt"), b"x").unwrap();
        fs::write(root.join("nested/Inner.JPG"), b"x").unwrap();
        fs::write(root.join("nested/deeper/leaf.gif"), b"x").unwrap();

        let discovery = FileDiscovery::new(default_set());
        let mut relatives: Vec<String> = discovery.walk(root).map(|f| f.relative).collect();
        relatives.sort();

        assert_eq!(
            relatives,
            vec!["nested/Inner.JPG", "nested/deeper/leaf.gif", "top.png"]
        );
    }

    #[test]
    fn test_walk_yields_directory_files_before_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/child.png"), b"x").unwrap();
        fs::write(root.join("parent.png"), b"x").unwrap();

        let discovery = FileDiscovery::new(default_set());
        let relatives: Vec<String> = discovery.walk(root).map(|f| f.relative).collect();
        assert_eq!(relatives, vec!["parent.png", "sub/child.png"]);
    }

    #[test]
    fn test_walk_keeps_absolute_path_and_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/Pic.Png"), b"x").unwrap();

        let discovery = FileDiscovery::new(default_set());
        let files: Vec<DiscoveredFile> = discovery.walk(dir.path()).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "Pic.Png");
        assert_eq!(files[0].path, dir.path().join("a").join("Pic.Png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("hidden.png"), b"x").unwrap();
        fs::write(root.join("real.png"), b"x").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("linked.png")).unwrap();
        std::os::unix::fs::symlink(outside.join("hidden.png"), root.join("alias.png")).unwrap();

        let discovery = FileDiscovery::new(default_set());
        let mut relatives: Vec<String> = discovery.walk(&root).map(|f| f.relative).collect();
        relatives.sort();
        assert_eq!(relatives, vec!["alias.png", "real.png"]);
    }
}
