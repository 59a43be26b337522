use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use spdlog::info;

use postmatter::config::Config;
use postmatter::text_utils::{post_file_stem, split_labels};
use postmatter::util::os_helper::local_publisher;
use postmatter::{Post, PostCodec};

use crate::NewArgs;

fn render_body(title: &str) -> String {
    format!("# {}\n\nThis is a body example\nPlease remove it and replace with your content\n\n<!-- more -->\n\nAnd this is the rest of your post\n", title)
}

pub(crate) fn new_post(codec: &PostCodec, args: NewArgs) -> anyhow::Result<PathBuf> {
    let format = args.format.unwrap_or(codec.default_format());
    let stem = post_file_stem(&args.title, &Utc::now().date_naive());
    let filepath = codec.postsdir().join(format!("{}{}", stem, format.canonical_extension()));

    if filepath.exists() {
        bail!("{} already exists", filepath.display());
    }
    fs::create_dir_all(codec.postsdir())
        .with_context(|| format!("Could not create {}", codec.postsdir().display()))?;
    File::create(&filepath)
        .with_context(|| format!("Could not create {}", filepath.display()))?;

    let post = Post {
        filepath: filepath.clone(),
        post_publisher: local_publisher(args.author),
        content: render_body(&args.title),
        title: args.title,
        canonical_url: None,
        tags: split_labels(&args.tags).into_iter().collect::<BTreeSet<_>>(),
        categories: split_labels(&args.categories).into_iter().collect::<BTreeSet<_>>(),
        is_draft: true,
    };
    codec.dump(&post)?;

    Ok(filepath)
}

pub fn new_cmd(config: &Config, args: NewArgs) -> anyhow::Result<()> {
    let codec = config.build_codec()?;
    let filepath = new_post(&codec, args)?;
    info!("Created {}", filepath.display());
    println!("{}", filepath.display());
    Ok(())
}
