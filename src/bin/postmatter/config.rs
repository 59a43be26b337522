use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

use postmatter::config::{read_config, Config, CFG_FILE_NAME};

fn get_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?.join("postmatter");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

/// Reads the configuration. Without any file, `posts_dir` alone is enough.
pub(crate) fn open_config(cfg_path: Option<PathBuf>, posts_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let config_path = cfg_path.or_else(get_config_path);

    let mut config = match (config_path, posts_dir.clone()) {
        (Some(path), _) => read_config(&path)
            .with_context(|| format!("Could not read configuration {}", path.display()))?,
        (None, Some(posts_dir)) => Config::with_posts_dir(posts_dir),
        (None, None) => bail!("Could not find {} and no posts directory was given", CFG_FILE_NAME),
    };

    if let Some(posts_dir) = posts_dir {
        config.paths.posts_dir = posts_dir;
    }

    Ok(config)
}
