pub mod field_naming;
pub mod frontmatter_format;
pub mod parsing_utils;
