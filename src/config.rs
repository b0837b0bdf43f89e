use std::{
    env,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PileError;

pub const CONFIG_FILE: &str = "pile.config.yaml";
pub const NETWORK_FILE: &str = "pile.network.yaml";
pub const ENV_FILE: &str = ".env";
pub const COMPOSE_FILE: &str = "compose.yaml";

/// Pause between the database and application stages of `up` and `down`
pub const STAGE_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_EDITOR: &str = "vi";

const DEFAULT_NETWORK: &str = r#"networks:
  pile:
    name: pile  # Explicitly name the network
    driver: bridge # Use bridge network (default)
"#;

/// Example service group written by `pile init`
const EXAMPLE_APP: &str = "open-webui";

/// Paths and settings resolved once at startup and passed to every command.
#[derive(Debug, Clone)]
pub struct PileContext {
    pub pile_dir: PathBuf,
    pub editor: String,
    pub stage_delay: Duration,
}

impl PileContext {
    /// Build the context from the environment.
    ///
    /// Checks the PILE_DIR environment variable first, then defaults to ~/pile.
    /// The editor comes from VISUAL or EDITOR, falling back to vi.
    pub fn from_env() -> Result<Self, PileError> {
        Self::resolve(
            env::var_os("PILE_DIR"),
            env::var("VISUAL").ok(),
            env::var("EDITOR").ok(),
            dirs::home_dir(),
        )
    }

    /// Apply the lookup rules of [`from_env`](Self::from_env) to explicit values.
    ///
    /// Empty or blank values count as unset. The home directory is only
    /// needed when PILE_DIR is unset.
    pub fn resolve(
        pile_dir: Option<OsString>,
        visual: Option<String>,
        editor: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, PileError> {
        let pile_dir = match pile_dir {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home.ok_or(PileError::HomeDirUnavailable)?.join("pile"),
        };

        let mut ctx = Self::new(pile_dir);
        if let Some(editor) = [visual, editor]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
        {
            ctx.editor = editor;
        }

        Ok(ctx)
    }

    /// Context rooted at an explicit directory, with default editor and delay.
    pub fn new(pile_dir: impl Into<PathBuf>) -> Self {
        Self {
            pile_dir: pile_dir.into(),
            editor: DEFAULT_EDITOR.to_string(),
            stage_delay: STAGE_DELAY,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.pile_dir.join(CONFIG_FILE)
    }

    pub fn network_path(&self) -> PathBuf {
        self.pile_dir.join(NETWORK_FILE)
    }

    pub fn env_path(&self) -> PathBuf {
        self.pile_dir.join(ENV_FILE)
    }

    pub fn ensure_pile_dir(&self) -> Result<&Path, PileError> {
        fs::create_dir_all(&self.pile_dir)
            .map_err(|e| PileError::io(format!("Failed to create {:?}", self.pile_dir), e))?;
        Ok(&self.pile_dir)
    }
}

/// Service groups enabled in pile.config.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PileConfig {
    #[serde(rename = "APPS", default)]
    pub apps: Vec<String>,
    #[serde(rename = "DBS", default)]
    pub dbs: Vec<String>,
}

impl PileConfig {
    /// Configuration written by `pile init`
    pub fn example() -> Self {
        Self {
            apps: vec![EXAMPLE_APP.to_string()],
            dbs: Vec::new(),
        }
    }

    /// Read the configuration from disk. Nothing is cached between calls.
    pub fn load(ctx: &PileContext) -> Result<Self, PileError> {
        let path = ctx.config_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PileError::ConfigNotFound { path });
            }
            Err(e) => return Err(PileError::io(format!("Failed to read {:?}", path), e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| PileError::ConfigParse { path, source })
    }

    pub fn save(&self, ctx: &PileContext) -> Result<(), PileError> {
        ctx.ensure_pile_dir()?;
        let path = ctx.config_path();
        let content = serde_yaml::to_string(self).map_err(|source| PileError::ConfigWrite {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|e| PileError::io(format!("Failed to write {:?}", path), e))
    }
}

/// Write pile.network.yaml and the example pile.config.yaml, replacing any
/// existing copies. Returns the written paths in that order.
pub fn write_defaults(ctx: &PileContext) -> Result<[PathBuf; 2], PileError> {
    ctx.ensure_pile_dir()?;

    let network = ctx.network_path();
    fs::write(&network, DEFAULT_NETWORK)
        .map_err(|e| PileError::io(format!("Failed to write {:?}", network), e))?;
    debug!(path = %network.display(), "wrote network definition");

    PileConfig::example().save(ctx)?;
    let config = ctx.config_path();
    debug!(path = %config.display(), "wrote example config");

    Ok([network, config])
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn context() -> (TempDir, PileContext) {
        let dir = TempDir::new().unwrap();
        let ctx = PileContext::new(dir.path().join("pile"));
        (dir, ctx)
    }

    #[test]
    fn test_defaults_round_trip_through_load() {
        let (_dir, ctx) = context();

        let written = write_defaults(&ctx).unwrap();
        assert_eq!(written, [ctx.network_path(), ctx.config_path()]);

        let config = PileConfig::load(&ctx).unwrap();
        assert_eq!(config.apps, vec!["open-webui"]);
        assert!(config.dbs.is_empty());

        let network = fs::read_to_string(ctx.network_path()).unwrap();
        assert!(network.contains("name: pile"));
        assert!(network.contains("driver: bridge"));
    }

    #[test]
    fn test_load_missing_config() {
        let (_dir, ctx) = context();

        let err = PileConfig::load(&ctx).unwrap_err();
        assert!(matches!(err, PileError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_malformed_config() {
        let (_dir, ctx) = context();
        ctx.ensure_pile_dir().unwrap();
        fs::write(ctx.config_path(), "APPS: [unterminated\n").unwrap();

        let err = PileConfig::load(&ctx).unwrap_err();
        assert!(matches!(err, PileError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_empty_config() {
        let (_dir, ctx) = context();
        ctx.ensure_pile_dir().unwrap();
        fs::write(ctx.config_path(), "").unwrap();

        assert_eq!(PileConfig::load(&ctx).unwrap(), PileConfig::default());
    }

    #[test]
    fn test_save_keeps_order() {
        let (_dir, ctx) = context();
        let config = PileConfig {
            apps: vec!["foo".to_string(), "bar".to_string()],
            dbs: vec!["postgres".to_string()],
        };

        config.save(&ctx).unwrap();

        let content = fs::read_to_string(ctx.config_path()).unwrap();
        assert!(content.contains("APPS"));
        assert!(content.contains("DBS"));
        assert_eq!(PileConfig::load(&ctx).unwrap(), config);
    }

    #[test]
    fn test_write_defaults_overwrites_edited_config() {
        let (_dir, ctx) = context();
        PileConfig {
            apps: vec!["custom".to_string()],
            dbs: vec!["postgres".to_string()],
        }
        .save(&ctx)
        .unwrap();

        write_defaults(&ctx).unwrap();

        assert_eq!(PileConfig::load(&ctx).unwrap(), PileConfig::example());
    }

    #[test]
    fn test_resolve_pile_dir_wins_over_home() {
        let ctx = PileContext::resolve(
            Some(OsString::from("/srv/pile")),
            None,
            None,
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();

        assert_eq!(ctx.pile_dir, PathBuf::from("/srv/pile"));
    }

    #[test]
    fn test_resolve_empty_pile_dir_falls_back_to_home() {
        let ctx = PileContext::resolve(
            Some(OsString::new()),
            None,
            None,
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();

        assert_eq!(ctx.pile_dir, PathBuf::from("/home/me/pile"));
    }

    #[test]
    fn test_resolve_without_home() {
        let err = PileContext::resolve(None, None, None, None).unwrap_err();
        assert!(matches!(err, PileError::HomeDirUnavailable));

        let ctx = PileContext::resolve(Some(OsString::from("/srv/pile")), None, None, None).unwrap();
        assert_eq!(ctx.pile_dir, PathBuf::from("/srv/pile"));
    }

    #[test]
    fn test_resolve_editor_precedence() {
        let home = || Some(PathBuf::from("/home/me"));
        let editor = |visual: Option<&str>, editor: Option<&str>| {
            PileContext::resolve(
                None,
                visual.map(String::from),
                editor.map(String::from),
                home(),
            )
            .unwrap()
            .editor
        };

        assert_eq!(editor(Some("nvim"), Some("nano")), "nvim");
        assert_eq!(editor(None, Some("nano")), "nano");
        assert_eq!(editor(Some("  "), Some("nano")), "nano");
        assert_eq!(editor(Some(""), Some(" ")), "vi");
        assert_eq!(editor(None, None), "vi");
    }

    #[test]
    fn test_resolve_keeps_default_delay() {
        let ctx = PileContext::resolve(None, None, None, Some(PathBuf::from("/home/me"))).unwrap();
        assert_eq!(ctx.stage_delay, STAGE_DELAY);
    }
}
