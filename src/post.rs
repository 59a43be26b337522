use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Who publishes a post and where. Stored as a nested table in the frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPublisher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub filepath: PathBuf,
    pub post_publisher: PostPublisher,
    pub title: String,
    pub canonical_url: Option<String>,
    pub content: String,
    pub tags: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub is_draft: bool,
}

impl Post {
    /// Compares everything but the file the post is bound to.
    pub fn same_post(&self, other: &Post) -> bool {
        self.post_publisher == other.post_publisher
            && self.title == other.title
            && self.canonical_url == other.canonical_url
            && self.content == other.content
            && self.tags == other.tags
            && self.categories == other.categories
            && self.is_draft == other.is_draft
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
        write!(f, "file={}, draft={}\ntitle={}\ntags={}\ncategories={}\ncontent:\n{}",
               self.filepath.display(),
               self.is_draft,
               self.title,
               join(&self.tags),
               join(&self.categories),
               self.content
        )
    }
}
