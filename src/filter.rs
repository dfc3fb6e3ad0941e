//! File eligibility: extension allow-list from filetypes.toml plus the hidden
//! and excluded-directory rules.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Component, Path};

/// Directory names whose contents are never cleaned, wherever they appear in a path.
/// `.git` and `.venv` are also caught by the hidden-segment rule.
pub const EXCLUDED_DIRS: &[&str] = &[
    "build",
    "__pycache__",
    ".git",
    "node_modules",
    "venv",
    ".venv",
];

/// Structure to deserialize the allow-list from TOML
#[derive(Debug, Deserialize)]
struct FileTypeConfig {
    #[serde(flatten)]
    languages: HashMap<String, LanguageConfig>,
}

#[derive(Debug, Deserialize)]
struct LanguageConfig {
    name: String,
    extensions: Vec<String>,
}

// Embed the TOML file directly in the binary at compile time
const FILETYPES_TOML: &str = include_str!("../filetypes.toml");

/// Outcome of checking a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Allow-listed; `language` is the display name of the matching group
    Eligible { language: String },
    NotAFile,
    Hidden,
    ExcludedDir(String),
    UnsupportedExtension,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    /// Short human-readable reason, used for verbose output
    pub fn reason(&self) -> String {
        match self {
            Eligibility::Eligible { language } => format!("eligible ({})", language),
            Eligibility::NotAFile => "not a regular file".to_string(),
            Eligibility::Hidden => "hidden path".to_string(),
            Eligibility::ExcludedDir(name) => format!("inside excluded directory '{}'", name),
            Eligibility::UnsupportedExtension => "extension not allow-listed".to_string(),
        }
    }
}

/// Decides whether a file should be cleaned.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    /// Lower-cased extension without the leading dot -> language name
    extensions: HashMap<String, String>,
}

impl ExtensionFilter {
    /// Load the allow-list embedded in the binary
    pub fn load() -> Result<Self> {
        Self::from_toml(FILETYPES_TOML).context("Failed to parse embedded filetypes TOML")
    }

    /// Parse an allow-list in the `filetypes.toml` format
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FileTypeConfig = toml::from_str(content)?;

        let mut extensions = HashMap::new();
        for (lang_key, lang_config) in config.languages {
            for ext in lang_config.extensions {
                let normalized = ext.strip_prefix('.').unwrap_or(&ext).to_lowercase();
                if normalized.is_empty() {
                    bail!("Empty extension in file type group '{}'", lang_key);
                }
                extensions.insert(normalized, lang_config.name.clone());
            }
        }

        let filter = ExtensionFilter { extensions };
        if filter.is_empty() {
            bail!("File type list allows no extensions");
        }
        Ok(filter)
    }

    /// Number of allow-listed extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Check a path against every rule, in order: regular file, hidden segment,
    /// excluded directory, extension.
    pub fn check(&self, path: &Path) -> Eligibility {
        if !path.is_file() {
            return Eligibility::NotAFile;
        }

        if segments(path).any(|name| is_hidden(&name)) {
            return Eligibility::Hidden;
        }

        if let Some(name) = segments(path).find(|name| is_excluded_dir(name)) {
            return Eligibility::ExcludedDir(name);
        }

        let language = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extensions.get(&ext.to_lowercase()));

        match language {
            Some(language) => Eligibility::Eligible {
                language: language.clone(),
            },
            None => Eligibility::UnsupportedExtension,
        }
    }

    pub fn is_eligible(&self, path: &Path) -> bool {
        self.check(path).is_eligible()
    }
}

/// Names of the normal components of a path; `.`, `..` and roots are skipped
fn segments(path: &Path) -> impl Iterator<Item = String> + '_ {
    path.components().filter_map(|c| {
        if let Component::Normal(os_str) = c {
            Some(os_str.to_string_lossy().into_owned())
        } else {
            None
        }
    })
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Whether directory traversal can skip an entry with this name entirely
pub fn should_prune(name: &str) -> bool {
    is_hidden(name) || is_excluded_dir(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // tempfile's default prefix is ".tmp", which would make every path hidden
    fn tempdir() -> TempDir {
        tempfile::Builder::new()
            .prefix("cleanfile-filter")
            .tempdir()
            .unwrap()
    }

    fn touch(root: &Path, rel: &str) -> std::path::PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "x = 1\n").unwrap();
        path
    }

    #[test]
    fn test_embedded_allow_list_loads() {
        let filter = ExtensionFilter::load().unwrap();
        assert!(!filter.is_empty());
        assert_eq!(filter.len(), 17);
    }

    #[test]
    fn test_allowed_extension_is_eligible() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();
        let path = touch(dir.path(), "src/main.rs");

        assert_eq!(
            filter.check(&path),
            Eligibility::Eligible {
                language: "Rust".to_string()
            }
        );
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();
        let path = touch(dir.path(), "README.MD");

        assert!(filter.is_eligible(&path));
    }

    #[test]
    fn test_unlisted_extension_is_rejected() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();

        let txt = touch(dir.path(), "notes.txt");
        let bare = touch(dir.path(), "Makefile");

        assert_eq!(filter.check(&txt), Eligibility::UnsupportedExtension);
        assert_eq!(filter.check(&bare), Eligibility::UnsupportedExtension);
    }

    #[test]
    fn test_missing_file_and_directory_are_not_files() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();
        fs::create_dir_all(dir.path().join("pkg.py")).unwrap();

        assert_eq!(
            filter.check(&dir.path().join("absent.py")),
            Eligibility::NotAFile
        );
        assert_eq!(filter.check(&dir.path().join("pkg.py")), Eligibility::NotAFile);
    }

    #[test]
    fn test_hidden_segments_are_rejected() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();

        let dotfile = touch(dir.path(), ".hidden.py");
        let in_hidden_dir = touch(dir.path(), ".config/settings.py");

        assert_eq!(filter.check(&dotfile), Eligibility::Hidden);
        assert_eq!(filter.check(&in_hidden_dir), Eligibility::Hidden);
    }

    #[test]
    fn test_excluded_directories_are_rejected() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();

        for excluded in ["build", "__pycache__", "node_modules", "venv"] {
            let path = touch(dir.path(), &format!("{}/pkg/index.js", excluded));
            assert_eq!(
                filter.check(&path),
                Eligibility::ExcludedDir(excluded.to_string()),
                "{} should be excluded",
                excluded
            );
        }
    }

    #[test]
    fn test_excluded_names_match_case_sensitively() {
        let dir = tempdir();
        let filter = ExtensionFilter::load().unwrap();
        let path = touch(dir.path(), "Build/script.py");

        assert!(filter.is_eligible(&path));
    }

    #[test]
    fn test_current_dir_component_is_not_hidden() {
        assert_eq!(segments(Path::new("./src/lib.rs")).count(), 2);
        assert_eq!(segments(Path::new("../src/lib.rs")).count(), 2);
    }

    #[test]
    fn test_from_toml_normalizes_extensions() {
        let filter = ExtensionFilter::from_toml(
            "[web]\nname = \"Web\"\nextensions = [\".HTML\", \"css\"]\n",
        )
        .unwrap();

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.extensions.get("html").map(String::as_str), Some("Web"));
        assert_eq!(filter.extensions.get("css").map(String::as_str), Some("Web"));
    }

    #[test]
    fn test_from_toml_rejects_empty_extension() {
        let result = ExtensionFilter::from_toml("[bad]\nname = \"Bad\"\nextensions = [\".\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_rejects_empty_list() {
        assert!(ExtensionFilter::from_toml("").is_err());
        let no_extensions = "[none]\nname = \"None\"\nextensions = []\n";
        assert!(ExtensionFilter::from_toml(no_extensions).is_err());
    }

    #[test]
    fn test_should_prune() {
        assert!(should_prune(".git"));
        assert!(should_prune("node_modules"));
        assert!(should_prune(".cache"));
        assert!(!should_prune("src"));
    }
}
