//! Docker Compose file selection
//!
//! Turns a list of service group names into `-f <pile>/<name>/compose.yaml`
//! selectors. Names that are not plain identifiers are dropped.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;
use tracing::warn;

use crate::config::COMPOSE_FILE;

/// Letters, digits, '-' and '_' only
pub fn is_valid_name(name: &str) -> bool {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern"))
        .is_match(name)
}

/// Ordered set of compose files passed to one `docker compose` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeFiles {
    files: Vec<PathBuf>,
}

impl ComposeFiles {
    /// Compose files for the given service groups, in input order.
    pub fn for_services<S: AsRef<str>>(pile_dir: &Path, names: &[S]) -> Self {
        let files = names
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|name| {
                let valid = is_valid_name(name);
                if !valid {
                    warn!(name = %name, "skipping service with invalid name");
                }
                valid
            })
            .map(|name| pile_dir.join(name).join(COMPOSE_FILE))
            .collect();

        Self { files }
    }

    /// Put a file in front of the service files (the shared network definition).
    pub fn with_leading(mut self, file: PathBuf) -> Self {
        self.files.insert(0, file);
        self
    }

    /// `["-f", file, "-f", file, ...]`
    pub fn args(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|file| ["-f".to_string(), file.display().to_string()])
            .collect()
    }
}

impl fmt::Display for ComposeFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for file in &self.files {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "-f {}", file.display())?;
            first = false;
        }
        Ok(())
    }
}

/// Space-joined file selector tokens for `names`. Empty input gives "".
pub fn build_file_selectors<S: AsRef<str>>(pile_dir: &Path, names: &[S]) -> String {
    ComposeFiles::for_services(pile_dir, names).to_string()
}
