use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::field_naming::{Convention, FieldNaming};
use crate::content::frontmatter_format::FrontmatterFormat;
use crate::post_codec::PostCodec;

pub const CFG_FILE_NAME: &str = "postmatter.toml";

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
}

#[derive(Deserialize, Default)]
pub struct Codec {
    #[serde(default)]
    pub convention: Convention,
    pub default_format: Option<FrontmatterFormat>,
    #[serde(default)]
    pub ignore_globs: Vec<String>,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub codec: Codec,
    pub log: Option<Log>,
}

impl Config {
    /// Config used when no file is around: posts in `posts_dir`, default conventions, no log file.
    pub fn with_posts_dir(posts_dir: PathBuf) -> Config {
        Config {
            paths: Paths { posts_dir },
            codec: Codec::default(),
            log: None,
        }
    }

    pub fn build_codec(&self) -> io::Result<PostCodec> {
        let naming = FieldNaming::from(self.codec.convention);
        let default_format = self.codec.default_format.unwrap_or(match self.codec.convention {
            Convention::Default => FrontmatterFormat::Yaml,
            Convention::Hugo => FrontmatterFormat::Toml,
        });

        let codec = PostCodec::new(&self.paths.posts_dir)
            .with_naming(naming)
            .with_default_format(default_format)
            .with_ignore_globs(&self.codec.ignore_globs)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Invalid ignore glob: {}", e)))?;
        Ok(codec)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|dir| dir.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find the executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
    };
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path).transpose()?;
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_full_config() {
        let cfg = parse_config(r##"
[paths]
posts_dir = "/srv/blog/content"

[codec]
convention = "Hugo"
ignore_globs = ["drafts/*", "_index.md"]

[log]
level = "Debug"
log_to_console = true
"##).unwrap();

        assert_eq!(cfg.paths.posts_dir, PathBuf::from("/srv/blog/content"));
        assert_eq!(cfg.log.as_ref().unwrap().level, LogLevel::Debug);

        let codec = cfg.build_codec().unwrap();
        assert_eq!(codec.naming(), &FieldNaming::HUGO);
        assert_eq!(codec.default_format(), FrontmatterFormat::Toml);
        assert!(!codec.is_publishable(Path::new("/srv/blog/content/drafts/wip.md")));
        assert!(codec.is_publishable(Path::new("/srv/blog/content/hello.md")));
    }

    #[test]
    fn test_minimal_config() {
        let cfg = parse_config("[paths]\nposts_dir = \"posts\"\n").unwrap();
        assert!(cfg.log.is_none());

        let codec = cfg.build_codec().unwrap();
        assert_eq!(codec.naming(), &FieldNaming::DEFAULT);
        assert_eq!(codec.default_format(), FrontmatterFormat::Yaml);
        assert!(codec.ignore_globs().is_empty());
    }

    #[test]
    fn test_default_format() {
        let cfg = parse_config("[paths]\nposts_dir = \"posts\"\n[codec]\ndefault_format = \"json\"\n").unwrap();
        assert_eq!(cfg.build_codec().unwrap().default_format(), FrontmatterFormat::Json);

        assert!(parse_config("[paths]\nposts_dir = \"posts\"\n[codec]\ndefault_format = \"xml\"\n").is_err());
    }

    #[test]
    fn test_invalid_glob() {
        let cfg = parse_config("[paths]\nposts_dir = \"posts\"\n[codec]\nignore_globs = [\"[oops\"]\n").unwrap();
        let err = cfg.build_codec().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_exe_dir() {
        let cfg = parse_config("[paths]\nposts_dir = \"${exe_dir}/posts\"\n").unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(cfg.paths.posts_dir, exe_dir.join("posts"));
    }
}
