use std::path::PathBuf;

/// Environment variable selecting the rule document directory.
pub const RULES_PATH_VAR: &str = "CURSOR_RULES_PATH";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub rules_root: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `CURSOR_RULES_PATH` (optional) — directory holding the rule documents.
    ///   Unset or empty falls back to `rules/` two levels above the running binary.
    pub fn from_env() -> Result<Self, String> {
        Self::from_rules_path(std::env::var(RULES_PATH_VAR).ok())
    }

    pub fn from_rules_path(rules_path: Option<String>) -> Result<Self, String> {
        let rules_root = match rules_path.filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_rules_root()?,
        };

        Ok(Self { rules_root })
    }
}

fn default_rules_root() -> Result<PathBuf, String> {
    let exe = std::env::current_exe()
        .map_err(|e| format!("cannot locate running binary to derive {RULES_PATH_VAR}: {e}"))?;
    let bin_dir = exe
        .parent()
        .ok_or_else(|| format!("running binary has no parent directory; set {RULES_PATH_VAR}"))?;

    Ok(bin_dir.join("..").join("..").join("rules"))
}
