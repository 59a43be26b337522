use std::collections::BTreeSet;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, PatternError};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::content::field_naming::FieldNaming;
use crate::content::frontmatter_format::{Delimiters, FrontmatterFormat};
use crate::content::parsing_utils::{extract_content, split_frontmatter};
use crate::error::{PostDecodeError, PostError};
use crate::post::{Post, PostPublisher};

// `*` stops at path separators, so `drafts/*` does not reach into `drafts/old/`
const IGNORE_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Reads and writes posts stored as frontmatter followed by content.
///
/// The codec only holds configuration. Every call reads or writes the file again.
#[derive(Debug, Clone)]
pub struct PostCodec {
    postsdir: PathBuf,
    ignore_globs: Vec<Pattern>,
    default_format: FrontmatterFormat,
    naming: FieldNaming,
}

impl PostCodec {
    pub const CONTENT_FORMATS: &'static [FrontmatterFormat] = &FrontmatterFormat::ALL;

    pub fn new(postsdir: impl Into<PathBuf>) -> PostCodec {
        PostCodec {
            postsdir: postsdir.into(),
            ignore_globs: vec![],
            default_format: FrontmatterFormat::Yaml,
            naming: FieldNaming::DEFAULT,
        }
    }

    /// Globs are relative to the posts directory. Files matching any of them are not publishable.
    pub fn with_ignore_globs<I, S>(mut self, globs: I) -> Result<PostCodec, PatternError>
        where I: IntoIterator<Item=S>,
              S: AsRef<str>,
    {
        self.ignore_globs = globs.into_iter()
            .map(|glob| Pattern::new(glob.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Format written when the file name has no known suffix.
    pub fn with_default_format(mut self, format: FrontmatterFormat) -> PostCodec {
        self.default_format = format;
        self
    }

    pub fn with_naming(mut self, naming: FieldNaming) -> PostCodec {
        self.naming = naming;
        self
    }

    pub fn postsdir(&self) -> &Path {
        &self.postsdir
    }

    pub fn ignore_globs(&self) -> &[Pattern] {
        &self.ignore_globs
    }

    pub fn default_format(&self) -> FrontmatterFormat {
        self.default_format
    }

    pub fn naming(&self) -> &FieldNaming {
        &self.naming
    }

    /// Only looks at the file name. The file does not need to exist.
    pub fn is_post(&self, path: &Path) -> bool {
        FrontmatterFormat::from_path(path).is_some()
    }

    /// Only looks at the path. The file does not need to exist.
    pub fn is_publishable(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.postsdir).unwrap_or(path);
        !self.ignore_globs.iter()
            .any(|pattern| pattern.matches_path_with(relative, IGNORE_MATCH_OPTIONS))
    }

    /// Suffix based format used when writing `path`.
    pub fn format_for(&self, path: &Path) -> FrontmatterFormat {
        FrontmatterFormat::from_path(path).unwrap_or(self.default_format)
    }

    pub fn load(&self, path: &Path) -> Result<Post, PostError> {
        check_file(path)?;
        let text = fs::read_to_string(path).map_err(|e| PostError::io(path, e))?;
        let post = self.decode(path, &text)?;
        Ok(post)
    }

    /// Decodes the text of a post file. `path` is only recorded in the result.
    pub fn decode(&self, path: &Path, text: &str) -> Result<Post, PostDecodeError> {
        let raw = split_frontmatter(text, header_parses)?;
        let fields = parse_frontmatter(raw.format, raw.frontmatter)?;
        let content = extract_content(raw.body)?;
        let keys = &self.naming;

        let title = string_field(&fields, keys.title)?;
        if title.trim().is_empty() {
            return Err(PostDecodeError::empty_key(keys.title));
        }
        let is_draft = bool_field(&fields, keys.is_draft)?;
        let tags = string_set_field(&fields, keys.tags)?;
        let categories = string_set_field(&fields, keys.categories)?;
        let canonical_url = optional_string_field(&fields, keys.canonical_url)?;
        let post_publisher = publisher_field(&fields, keys.post_publisher)?;

        Ok(Post {
            filepath: path.to_path_buf(),
            post_publisher,
            title,
            canonical_url,
            content: content.to_string(),
            tags,
            categories,
            is_draft,
        })
    }

    /// Writes the whole post, replacing what the file had.
    pub fn dump(&self, post: &Post) -> Result<(), PostError> {
        check_file(&post.filepath)?;
        self.write_post(post, &post.content)
    }

    /// Rewrites the frontmatter of an existing file and keeps the content already there.
    pub fn dump_app_data(&self, post: &Post) -> Result<(), PostError> {
        let path = post.filepath.as_path();
        check_file(path)?;
        let existing = fs::read_to_string(path).map_err(|e| PostError::io(path, e))?;
        let body = match split_frontmatter(&existing, header_parses) {
            Ok(raw) => raw.body,
            Err(_) => existing.as_str(),
        };
        self.write_post(post, body)
    }

    /// Renders the complete file text for `post` in `format`.
    pub fn encode(&self, post: &Post, format: FrontmatterFormat) -> Result<String, PostError> {
        self.encode_with_body(post, format, &post.content)
    }

    fn encode_with_body(&self, post: &Post, format: FrontmatterFormat, body: &str) -> Result<String, PostError> {
        let header = render_frontmatter(&FrontmatterView { post, naming: &self.naming }, format)
            .map_err(|message| PostError::Encode { format, message })?;

        let text = match format.delimiters() {
            Delimiters::Lines(open, close) => format!("{}\n{}\n{}\n\n{}", open, header, close, body),
            Delimiters::Braces => format!("{}\n\n{}", header, body),
        };
        Ok(text)
    }

    fn write_post(&self, post: &Post, body: &str) -> Result<(), PostError> {
        let path = post.filepath.as_path();
        let text = self.encode_with_body(post, self.format_for(path), body)?;
        fs::write(path, text).map_err(|e| PostError::io(path, e))
    }
}

/// [`PostCodec`] writing and reading Hugo's front matter names.
///
/// New files default to TOML, as `hugo new` does.
#[derive(Debug, Clone)]
pub struct HugoPostCodec {
    codec: PostCodec,
}

impl HugoPostCodec {
    pub fn new(postsdir: impl Into<PathBuf>) -> HugoPostCodec {
        let codec = PostCodec::new(postsdir)
            .with_naming(FieldNaming::HUGO)
            .with_default_format(FrontmatterFormat::Toml);
        HugoPostCodec { codec }
    }

    pub fn with_ignore_globs<I, S>(self, globs: I) -> Result<HugoPostCodec, PatternError>
        where I: IntoIterator<Item=S>,
              S: AsRef<str>,
    {
        Ok(HugoPostCodec { codec: self.codec.with_ignore_globs(globs)? })
    }

    pub fn into_inner(self) -> PostCodec {
        self.codec
    }
}

impl Deref for HugoPostCodec {
    type Target = PostCodec;

    fn deref(&self) -> &Self::Target {
        &self.codec
    }
}

/// Ok when `path` exists and is not a directory.
fn check_file(path: &Path) -> Result<(), PostError> {
    let metadata = fs::metadata(path).map_err(|e| PostError::io(path, e))?;
    if metadata.is_dir() {
        return Err(PostError::IsADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// The frontmatter of a post, with keys taken from a naming table.
struct FrontmatterView<'a> {
    post: &'a Post,
    naming: &'a FieldNaming,
}

impl Serialize for FrontmatterView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        let post = self.post;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.naming.title, &post.title)?;
        map.serialize_entry(self.naming.is_draft, &post.is_draft)?;
        map.serialize_entry(self.naming.tags, &post.tags)?;
        map.serialize_entry(self.naming.categories, &post.categories)?;
        if let Some(ref url) = post.canonical_url {
            map.serialize_entry(self.naming.canonical_url, url)?;
        }
        // Tables go last, TOML needs them after plain values
        map.serialize_entry(self.naming.post_publisher, &post.post_publisher)?;
        map.end()
    }
}

fn render_frontmatter(view: &FrontmatterView, format: FrontmatterFormat) -> Result<String, String> {
    let header = match format {
        FrontmatterFormat::Yaml => serde_yaml::to_string(view).map_err(|e| e.to_string())?,
        FrontmatterFormat::Toml => toml::to_string(view).map_err(|e| e.to_string())?,
        FrontmatterFormat::Json => serde_json::to_string_pretty(view).map_err(|e| e.to_string())?,
    };
    Ok(header.trim_end().to_string())
}

fn parse_frontmatter(format: FrontmatterFormat, text: &str) -> Result<Map<String, Value>, PostDecodeError> {
    if text.trim().is_empty() && format != FrontmatterFormat::Json {
        return Ok(Map::new());
    }

    let value: Value = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str(text).map_err(|e| PostDecodeError::parser(format, e))?,
        FrontmatterFormat::Toml => toml::from_str(text).map_err(|e| PostDecodeError::parser(format, e))?,
        FrontmatterFormat::Json => serde_json::from_str(text).map_err(|e| PostDecodeError::parser(format, e))?,
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(PostDecodeError::parser(format, "expected a mapping")),
    }
}

fn header_parses(format: FrontmatterFormat, text: &str) -> bool {
    parse_frontmatter(format, text).is_ok()
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a Value, PostDecodeError> {
    fields.get(key).ok_or_else(|| PostDecodeError::missing_key(key))
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Result<String, PostDecodeError> {
    match required(fields, key)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(PostDecodeError::invalid_key(key, "a string")),
    }
}

fn bool_field(fields: &Map<String, Value>, key: &str) -> Result<bool, PostDecodeError> {
    required(fields, key)?
        .as_bool()
        .ok_or_else(|| PostDecodeError::invalid_key(key, "a boolean"))
}

fn string_set_field(fields: &Map<String, Value>, key: &str) -> Result<BTreeSet<String>, PostDecodeError> {
    let invalid = || PostDecodeError::invalid_key(key, "a list of strings");
    let items = required(fields, key)?.as_array().ok_or_else(invalid)?;
    items.iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn optional_string_field(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, PostDecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PostDecodeError::invalid_key(key, "a string")),
    }
}

fn publisher_field(fields: &Map<String, Value>, key: &str) -> Result<PostPublisher, PostDecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(PostPublisher::default()),
        Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
            .map_err(|_| PostDecodeError::invalid_key(key, "a mapping of strings")),
        Some(_) => Err(PostDecodeError::invalid_key(key, "a mapping")),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use crate::test_data::{POST_JSON_SYNTAX_ERROR, POST_MISMATCHED_DELIMITERS, POST_MISSING_KEYS, POST_NO_CONTENT, POST_TOML_SYNTAX_ERROR, POST_WITH_TOML, POST_YAML_SYNTAX_ERROR};

    use super::*;

    fn posts_dir(tmp: &TempDir) -> PathBuf {
        let postsdir = tmp.path().join("posts");
        fs::create_dir(&postsdir).unwrap();
        postsdir
    }

    fn touch(path: &Path) -> PathBuf {
        File::create(path).unwrap();
        path.to_path_buf()
    }

    fn expected_post(filepath: PathBuf) -> Post {
        Post {
            filepath,
            post_publisher: PostPublisher::default(),
            title: "My First Post".to_string(),
            canonical_url: None,
            content: "<h1>Content</h1><p>paragraph</p>".to_string(),
            tags: BTreeSet::from(["tag1".to_string(), "tag2".to_string()]),
            categories: BTreeSet::from(["cat1".to_string(), "cat2".to_string()]),
            is_draft: true,
        }
    }

    fn load_error(text: &str) -> String {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = postsdir.join("test_post.md");
        fs::write(&filepath, text).unwrap();

        let codec = PostCodec::new(&postsdir);
        assert!(codec.is_post(&filepath));
        assert!(codec.is_publishable(&filepath));

        match codec.load(&filepath) {
            Err(PostError::Decode(e)) => e.message().to_string(),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_dump_load_post() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = touch(&postsdir.join("test_post.md"));
        let post = expected_post(filepath.clone());

        let codec = PostCodec::new(&postsdir);
        codec.dump(&post).unwrap();
        let loaded = codec.load(&filepath).unwrap();

        assert_eq!(loaded, post);
        assert!(codec.is_post(&filepath));
        assert!(codec.is_publishable(&filepath));
    }

    #[test]
    fn test_file_formats() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let codec = PostCodec::new(&postsdir);

        for format in PostCodec::CONTENT_FORMATS {
            for ext in format.extensions() {
                let filepath = touch(&postsdir.join(format!("test_post{}", ext)));
                let mut post = expected_post(filepath.clone());
                post.canonical_url = Some("https://thiagocafe.com/view/first".to_string());
                post.post_publisher = PostPublisher {
                    author: Some("Thiago".to_string()),
                    email: None,
                    site: Some("thiagocafe.com".to_string()),
                };

                codec.dump(&post).unwrap();
                let text = fs::read_to_string(&filepath).unwrap();
                assert_eq!(split_frontmatter(&text, header_parses).unwrap().format, *format, "'{}' file extension", ext);

                let loaded = codec.load(&filepath).unwrap();
                assert_eq!(loaded, post, "Error with '{}' file extension", ext);
                assert!(codec.is_post(&filepath));
                assert!(codec.is_publishable(&filepath));
            }
        }
    }

    #[test]
    fn test_toml_layout() {
        let codec = PostCodec::new("posts");
        let post = expected_post(PathBuf::from("posts/test_post.mdt"));
        let text = codec.encode(&post, FrontmatterFormat::Toml).unwrap();

        assert!(text.starts_with("+++\ntitle = \"My First Post\"\nis_draft = true\n"));
        assert!(text.contains("tags = [\"tag1\", \"tag2\"]"));
        assert!(text.ends_with("+++\n\n<h1>Content</h1><p>paragraph</p>"));
    }

    #[test]
    fn test_content_survives_round_trip() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let codec = PostCodec::new(&postsdir);

        for ext in [".md", ".mdt", ".mdj"] {
            let filepath = touch(&postsdir.join(format!("spaced{}", ext)));
            let mut post = expected_post(filepath.clone());
            post.content = "\n\n# Title\n\n---\n\nafter a rule\n\n".to_string();

            codec.dump(&post).unwrap();
            assert_eq!(codec.load(&filepath).unwrap().content, post.content, "{}", ext);
        }
    }

    #[test]
    fn test_delimiter_lines_inside_fields_round_trip() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let codec = PostCodec::new(&postsdir);

        for ext in [".md", ".mdt", ".mdj"] {
            let filepath = touch(&postsdir.join(format!("ruled{}", ext)));
            let mut post = expected_post(filepath.clone());
            post.title = "first\n+++\n---\nsecond".to_string();
            post.tags.insert("x\n+++\ny".to_string());
            post.categories.insert("say \"hi\"\n+++\n'''".to_string());
            post.post_publisher.author = Some("a\n---\n+++\nb".to_string());
            post.content = "+++\n---\nbody\n".to_string();

            codec.dump(&post).unwrap();
            assert_eq!(codec.load(&filepath).unwrap(), post, "{}", ext);

            post.title = "\n+++\n".to_string();
            codec.dump_app_data(&post).unwrap();
            assert_eq!(codec.load(&filepath).unwrap(), post, "{}", ext);
        }

        // No known suffix, so Hugo writes TOML
        let hugo = HugoPostCodec::new(&postsdir);
        let filepath = touch(&postsdir.join("ruled_hugo"));
        let mut post = expected_post(filepath.clone());
        post.title = "first\n+++\nsecond".to_string();
        hugo.dump(&post).unwrap();
        assert!(fs::read_to_string(&filepath).unwrap().starts_with("+++\n"));
        assert_eq!(hugo.load(&filepath).unwrap(), post);
    }

    #[test]
    fn test_file_not_found() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = postsdir.join("test_post.md");
        let post = expected_post(filepath.clone());

        let codec = PostCodec::new(&postsdir);

        assert!(codec.is_post(&filepath));
        assert!(codec.is_publishable(&filepath));

        assert!(matches!(codec.dump_app_data(&post), Err(PostError::NotFound(_))));
        assert!(matches!(codec.dump(&post), Err(PostError::NotFound(_))));
        assert!(matches!(codec.load(&filepath), Err(PostError::NotFound(_))));
        assert!(!filepath.exists());
    }

    #[test]
    fn test_file_is_a_directory() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = postsdir.join("test_post");
        fs::create_dir(&filepath).unwrap();
        let post = expected_post(filepath.clone());

        let codec = PostCodec::new(&postsdir);

        assert!(!codec.is_post(&filepath));
        assert!(codec.is_publishable(&filepath));

        assert!(matches!(codec.dump_app_data(&post), Err(PostError::IsADirectory(_))));
        assert!(matches!(codec.dump(&post), Err(PostError::IsADirectory(_))));
        assert!(matches!(codec.load(&filepath), Err(PostError::IsADirectory(_))));

        // A directory named like a post is still a post by name
        let dir_post = postsdir.join("folder.md");
        fs::create_dir(&dir_post).unwrap();
        assert!(codec.is_post(&dir_post));
        assert!(matches!(codec.load(&dir_post), Err(PostError::IsADirectory(_))));
    }

    #[test]
    fn test_post_is_not_publishable() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        fs::create_dir_all(postsdir.join("otherdir/bar")).unwrap();
        let not_publishable = touch(&postsdir.join("otherdir/foo.md"));
        let publishable_1 = touch(&postsdir.join("otherdir/bar/spam.md"));
        let publishable_2 = touch(&postsdir.join("publishable.md"));

        let codec = PostCodec::new(&postsdir).with_ignore_globs(["otherdir/*"]).unwrap();

        assert!(!codec.is_publishable(&not_publishable));
        assert!(codec.is_publishable(&publishable_1));
        assert!(codec.is_publishable(&publishable_2));

        // Existence does not matter
        assert!(!codec.is_publishable(&postsdir.join("otherdir/ghost.md")));
        assert!(codec.is_publishable(&postsdir.join("ghost.md")));
    }

    #[test]
    fn test_ignore_globs() {
        let codec = PostCodec::new("posts")
            .with_ignore_globs(["drafts/**/*", "*.markdown", "_*"])
            .unwrap();

        assert_eq!(codec.ignore_globs().len(), 3);
        assert!(!codec.is_publishable(Path::new("posts/drafts/a/b/c.md")));
        assert!(!codec.is_publishable(Path::new("posts/old.markdown")));
        assert!(!codec.is_publishable(Path::new("posts/_index.md")));
        assert!(codec.is_publishable(Path::new("posts/2024/old.md")));
        assert!(codec.is_publishable(Path::new("posts/2024/_index.md")));

        assert!(PostCodec::new("posts").with_ignore_globs(["[unclosed"]).is_err());
    }

    #[test]
    fn test_invalid_frontmatter_data() {
        let message = load_error(POST_MISSING_KEYS);
        assert!(message.starts_with('\'') && message.ends_with("' key is missing."), "{}", message);
        assert_eq!(message, "'title' key is missing.");
    }

    #[test]
    fn test_error_frontmatter_separators() {
        assert_eq!(load_error(POST_MISMATCHED_DELIMITERS), "Frontmatter not found.");
    }

    #[test]
    fn test_no_frontmatter() {
        assert_eq!(load_error("# Test"), "Frontmatter not found.");
    }

    #[test]
    fn test_frontmatter_decode_errors() {
        assert!(load_error(POST_TOML_SYNTAX_ERROR).starts_with("Error in TOML Frontmatter"));
        assert!(load_error(POST_YAML_SYNTAX_ERROR).starts_with("Error in YAML Frontmatter"));
        assert!(load_error(POST_JSON_SYNTAX_ERROR).starts_with("Error in JSON Frontmatter"));
    }

    #[test]
    fn test_no_content() {
        assert_eq!(load_error(POST_NO_CONTENT), "Content not found.");
        assert_eq!(load_error("---\ntitle: Test\n---\n\n   \n"), "Content not found.");
    }

    #[test]
    fn test_invalid_field_types() {
        let base = "is_draft: true\ntags: []\ncategories: []";
        assert_eq!(load_error(&format!("---\ntitle: [1]\n{}\n---\nbody", base)),
                   "'title' key is invalid: expected a string.");
        assert_eq!(load_error(&format!("---\ntitle: ''\n{}\n---\nbody", base)),
                   "'title' key is empty.");
        assert_eq!(load_error("---\ntitle: x\nis_draft: 'yes'\ntags: []\ncategories: []\n---\nbody"),
                   "'is_draft' key is invalid: expected a boolean.");
        assert_eq!(load_error("---\ntitle: x\nis_draft: false\ntags: [1, 2]\ncategories: []\n---\nbody"),
                   "'tags' key is invalid: expected a list of strings.");
        assert_eq!(load_error("---\ntitle: x\nis_draft: false\ntags: []\n---\nbody"),
                   "'categories' key is missing.");
        assert_eq!(load_error(&format!("---\ntitle: x\n{}\npost_publisher: 3\n---\nbody", base)),
                   "'post_publisher' key is invalid: expected a mapping.");
        assert!(load_error("---\n- a\n- b\n---\nbody").starts_with("Error in YAML Frontmatter"));
    }

    #[test]
    fn test_hand_written_toml() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        // Format comes from the content, not from the suffix
        let filepath = postsdir.join("hand_written.md");
        fs::write(&filepath, POST_WITH_TOML).unwrap();

        let post = PostCodec::new(&postsdir).load(&filepath).unwrap();
        assert_eq!(post.title, "What I learned after 20+ years of software development");
        assert!(!post.is_draft);
        assert_eq!(post.tags, BTreeSet::from(["career".to_string(), "software".to_string()]));
        assert_eq!(post.categories, BTreeSet::from(["opinion".to_string()]));
        assert_eq!(post.post_publisher.author.as_deref(), Some("thiago"));
        assert_eq!(post.canonical_url, None);
        assert!(post.content.starts_with("How to be a great software engineer?"));
    }

    #[test]
    fn test_dump_app_data_keeps_content() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = postsdir.join("hand_written.mdt");
        fs::write(&filepath, POST_WITH_TOML).unwrap();

        let codec = PostCodec::new(&postsdir);
        let mut post = codec.load(&filepath).unwrap();
        let content = post.content.clone();

        post.title = "Renamed".to_string();
        post.is_draft = true;
        post.content = "ignored".to_string();
        codec.dump_app_data(&post).unwrap();

        let reloaded = codec.load(&filepath).unwrap();
        assert_eq!(reloaded.title, "Renamed");
        assert!(reloaded.is_draft);
        assert_eq!(reloaded.content, content);
    }

    #[test]
    fn test_dump_app_data_without_frontmatter() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = postsdir.join("plain.md");
        fs::write(&filepath, "# Just markdown\n").unwrap();

        let codec = PostCodec::new(&postsdir);
        codec.dump_app_data(&expected_post(filepath.clone())).unwrap();

        let post = codec.load(&filepath).unwrap();
        assert_eq!(post.title, "My First Post");
        assert_eq!(post.content, "# Just markdown\n");
    }

    #[test]
    fn test_unknown_suffix_uses_default_format() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let filepath = touch(&postsdir.join("post.txt"));
        let post = expected_post(filepath.clone());

        let codec = PostCodec::new(&postsdir).with_default_format(FrontmatterFormat::Json);
        assert!(!codec.is_post(&filepath));
        codec.dump(&post).unwrap();

        assert!(fs::read_to_string(&filepath).unwrap().starts_with('{'));
        assert_eq!(codec.load(&filepath).unwrap(), post);
    }

    #[test]
    fn test_hugo_post_fields_in_file() {
        let tmp = TempDir::new().unwrap();
        let postsdir = tmp.path().join("content");
        fs::create_dir(&postsdir).unwrap();
        let filepath = touch(&postsdir.join("post.md"));
        let mut post = expected_post(filepath.clone());
        post.canonical_url = Some("https://example.com/post/".to_string());

        let codec = HugoPostCodec::new(&postsdir);
        codec.dump(&post).unwrap();

        let text = fs::read_to_string(&filepath).unwrap();
        let raw = split_frontmatter(&text, header_parses).unwrap();
        let frontmatter: serde_yaml::Value = serde_yaml::from_str(raw.frontmatter).unwrap();

        assert_eq!(frontmatter["draft"], serde_yaml::Value::Bool(true));
        assert_eq!(frontmatter["title"].as_str(), Some("My First Post"));
        assert_eq!(frontmatter["tags"], serde_yaml::to_value(["tag1", "tag2"]).unwrap());
        assert_eq!(frontmatter["categories"], serde_yaml::to_value(["cat1", "cat2"]).unwrap());
        assert_eq!(frontmatter["canonicalURL"].as_str(), Some("https://example.com/post/"));
        assert!(frontmatter.get("is_draft").is_none());
    }

    #[test]
    fn test_hugo_round_trip() {
        let tmp = TempDir::new().unwrap();
        let postsdir = posts_dir(&tmp);
        let codec = HugoPostCodec::new(&postsdir);
        assert_eq!(codec.naming(), &FieldNaming::HUGO);

        for format in PostCodec::CONTENT_FORMATS {
            let filepath = touch(&postsdir.join(format!("hugo{}", format.canonical_extension())));
            let post = expected_post(filepath.clone());
            codec.dump(&post).unwrap();
            assert_eq!(codec.load(&filepath).unwrap(), post);

            // Keys differ, so the default codec refuses Hugo files
            let err = PostCodec::new(&postsdir).load(&filepath).unwrap_err();
            assert_eq!(err.as_decode().map(|e| e.message()), Some("'is_draft' key is missing."));
        }
    }

    #[test]
    fn test_hugo_defaults_to_toml() {
        let codec = HugoPostCodec::new("content").with_ignore_globs(["_index.md"]).unwrap();
        assert_eq!(codec.format_for(Path::new("content/post")), FrontmatterFormat::Toml);
        assert!(!codec.is_publishable(Path::new("content/_index.md")));
        assert_eq!(codec.into_inner().postsdir(), Path::new("content"));
    }
}
