use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Serialization used for the header of a post file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Delimiters {
    /// Opening and closing marker lines
    Lines(&'static str, &'static str),
    /// The header is a JSON object, bounded by its own braces
    Braces,
}

impl FrontmatterFormat {
    /// Detection order when sniffing a file.
    pub const ALL: [FrontmatterFormat; 3] = [FrontmatterFormat::Yaml, FrontmatterFormat::Toml, FrontmatterFormat::Json];

    /// Accepted file name suffixes. The first one is used when creating files.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FrontmatterFormat::Yaml => &[".md", ".markdown", ".mdown"],
            FrontmatterFormat::Toml => &[".mdt", ".tmd"],
            FrontmatterFormat::Json => &[".mdj", ".jmd"],
        }
    }

    pub fn canonical_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    pub fn delimiters(&self) -> Delimiters {
        match self {
            FrontmatterFormat::Yaml => Delimiters::Lines("---", "---"),
            FrontmatterFormat::Toml => Delimiters::Lines("+++", "+++"),
            FrontmatterFormat::Json => Delimiters::Braces,
        }
    }

    pub fn from_path(file_name: &Path) -> Option<FrontmatterFormat> {
        let file_name = file_name.file_name()?.to_str()?;
        Self::ALL.into_iter().find(|format| {
            format.extensions().iter()
                .any(|ext| file_name.len() > ext.len() && file_name.ends_with(ext))
        })
    }
}

impl Display for FrontmatterFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FrontmatterFormat::Yaml => "YAML",
            FrontmatterFormat::Toml => "TOML",
            FrontmatterFormat::Json => "JSON",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FrontmatterFormat {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(FrontmatterFormat::Yaml),
            "toml" => Ok(FrontmatterFormat::Toml),
            "json" => Ok(FrontmatterFormat::Json),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, format!("Unknown frontmatter format: {}", s))),
        }
    }
}

impl TryFrom<String> for FrontmatterFormat {
    type Error = io::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
