use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use spdlog::info;

use postmatter::config::Config;
use postmatter::{FrontmatterFormat, PostCodec};

use crate::ConvertArgs;

/// `posts/hello.md` to `posts/hello.mdt` when converting to TOML.
fn target_path(path: &Path, to: FrontmatterFormat) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_str()?;
    let stem = match FrontmatterFormat::from_path(path) {
        Some(format) => format.extensions().iter()
            .find_map(|ext| file_name.strip_suffix(ext))?,
        None => path.file_stem()?.to_str()?,
    };
    Some(path.with_file_name(format!("{}{}", stem, to.canonical_extension())))
}

pub(crate) fn convert_post(codec: &PostCodec, path: &Path, to: FrontmatterFormat) -> anyhow::Result<PathBuf> {
    let mut post = codec.load(path)?;
    let Some(target) = target_path(path, to) else {
        bail!("Invalid post file name: {}", path.display());
    };
    if target == path {
        bail!("{} is already {}", path.display(), to);
    }
    if target.exists() {
        bail!("{} already exists", target.display());
    }

    File::create(&target).with_context(|| format!("Could not create {}", target.display()))?;
    post.filepath = target.clone();
    codec.dump(&post)?;

    let converted = codec.load(&target)?;
    if !converted.same_post(&post) {
        fs::remove_file(&target).with_context(|| format!("Could not remove {}", target.display()))?;
        bail!("{} does not read back as the same post as {}", target.display(), path.display());
    }
    Ok(target)
}

pub fn convert_cmd(config: &Config, args: ConvertArgs) -> anyhow::Result<()> {
    let codec = config.build_codec()?;
    let target = convert_post(&codec, &args.path, args.to)?;
    info!("Converted {} to {}", args.path.display(), target.display());

    if args.remove {
        fs::remove_file(&args.path)
            .with_context(|| format!("Could not remove {}", args.path.display()))?;
    }
    Ok(())
}
