use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolve the application home directory.
///
/// - `provided`: value from configuration, may start with `~` or be relative.
/// - `default_subdir`: directory name used under the platform home when no
///   value was provided (e.g. ".bazaar").
/// - `create`: create the resolved directory if it does not exist.
pub fn resolve_home_dir(
    provided: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match provided {
        Some(raw) => expand_user_path(&raw)?,
        None => platform_home()?.join(default_subdir),
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .context("failed to determine current directory")?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("failed to create home directory {}", absolute.display()))?;
    }

    Ok(absolute)
}

/// Expand a leading `~` or `~/` into the platform home directory.
fn expand_user_path(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn platform_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .with_context(|| format!("{var} environment variable is not set"))
}
