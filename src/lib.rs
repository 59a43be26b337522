pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod post;
pub mod post_codec;
pub mod post_list;
pub mod text_utils;
pub mod util;
mod test_data;

pub use content::field_naming::FieldNaming;
pub use content::frontmatter_format::FrontmatterFormat;
pub use error::{PostDecodeError, PostError};
pub use post::{Post, PostPublisher};
pub use post_codec::{HugoPostCodec, PostCodec};
