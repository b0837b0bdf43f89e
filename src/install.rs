//! Installing service groups from the pile library
//!
//! The library is a git repository whose top-level directories are service
//! groups. Installing clones it shallowly into a temporary directory, copies
//! one group into the pile directory and removes the clone again.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, warn};

use crate::{config::PileContext, docker::compose::is_valid_name, error::PileError};

pub const LIBRARY_URL: &str = "https://github.com/docker-pile/pile-library.git";
pub const LIBRARY_BRANCH: &str = "main";

/// Where and how the bundle library is fetched
#[derive(Debug, Clone)]
pub struct Installer {
    pub repo_url: String,
    pub branch: String,
    /// Not namespaced per run: concurrent installs share this path.
    pub clone_dir: PathBuf,
}

impl Default for Installer {
    fn default() -> Self {
        Self {
            repo_url: LIBRARY_URL.to_string(),
            branch: LIBRARY_BRANCH.to_string(),
            clone_dir: env::temp_dir().join("pile-library"),
        }
    }
}

/// Removes the clone when dropped, whichever way `install` returns.
struct CloneGuard<'a>(&'a Path);

impl Drop for CloneGuard<'_> {
    fn drop(&mut self) {
        if self.0.exists() {
            if let Err(e) = fs::remove_dir_all(self.0) {
                warn!(path = %self.0.display(), error = %e, "failed to remove library clone");
            }
        }
    }
}

impl Installer {
    /// Install service group `name` into `<pile_dir>/<name>`.
    ///
    /// Existing files are overwritten. A failed copy is not rolled back and
    /// may leave the destination partially populated; running install again
    /// repairs it.
    pub fn install(&self, ctx: &PileContext, name: &str) -> Result<PathBuf, PileError> {
        if !is_valid_name(name) {
            return Err(PileError::InvalidName(name.to_string()));
        }

        let pile_dir = ctx.ensure_pile_dir()?;
        let dest = pile_dir.join(name);

        // A leftover clone from an interrupted run would make git refuse.
        if self.clone_dir.exists() {
            fs::remove_dir_all(&self.clone_dir).map_err(|e| {
                PileError::io(format!("Failed to remove stale clone {:?}", self.clone_dir), e)
            })?;
        }

        let _guard = CloneGuard(&self.clone_dir);
        self.clone_library()?;

        let src = self.clone_dir.join(name);
        if !src.is_dir() {
            return Err(PileError::BundleNotFound {
                name: name.to_string(),
            });
        }

        copy_dir(&src, &dest).map_err(|source| PileError::CopyFailed {
            dest: dest.clone(),
            source,
        })?;

        Ok(dest)
    }

    fn clone_library(&self) -> Result<(), PileError> {
        debug!(url = %self.repo_url, branch = %self.branch, "cloning pile library");

        let output = Command::new("git")
            .args(["clone", "--quiet", "--depth", "1", "--single-branch", "--branch"])
            .arg(&self.branch)
            .arg(&self.repo_url)
            .arg(&self.clone_dir)
            .output()
            .map_err(|e| PileError::CloneFailed {
                url: self.repo_url.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PileError::CloneFailed {
                url: self.repo_url.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Recursively copy `src` into `dest`, creating directories as needed.
///
/// File bytes are copied verbatim. Symlinks are followed, so a link to a
/// directory is copied as a directory.
pub fn copy_dir(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if fs::metadata(&src_path)?.is_dir() {
            copy_dir(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
        }
    }

    Ok(())
}
