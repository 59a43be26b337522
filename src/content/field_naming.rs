use serde::Deserialize;

/// Frontmatter keys used on disk for each post field.
///
/// The codec reads and writes through this table, so a site generator with its own
/// conventions only needs a different table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FieldNaming {
    pub title: &'static str,
    pub is_draft: &'static str,
    pub tags: &'static str,
    pub categories: &'static str,
    pub canonical_url: &'static str,
    pub post_publisher: &'static str,
}

impl FieldNaming {
    pub const DEFAULT: FieldNaming = FieldNaming {
        title: "title",
        is_draft: "is_draft",
        tags: "tags",
        categories: "categories",
        canonical_url: "canonical_url",
        post_publisher: "post_publisher",
    };

    /// Hugo front matter names. See https://gohugo.io/content-management/front-matter/
    pub const HUGO: FieldNaming = FieldNaming {
        title: "title",
        is_draft: "draft",
        tags: "tags",
        categories: "categories",
        canonical_url: "canonicalURL",
        post_publisher: "publisher",
    };
}

/// Naming conventions selectable from the configuration file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Deserialize)]
pub enum Convention {
    #[default]
    Default,
    Hugo,
}

impl From<Convention> for FieldNaming {
    fn from(value: Convention) -> Self {
        match value {
            Convention::Default => FieldNaming::DEFAULT,
            Convention::Hugo => FieldNaming::HUGO,
        }
    }
}
