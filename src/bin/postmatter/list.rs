use spdlog::warn;

use postmatter::config::Config;
use postmatter::post_list::PostList;

use crate::ListArgs;

pub fn list_cmd(config: &Config, args: ListArgs) -> anyhow::Result<()> {
    let codec = config.build_codec()?;

    for (path, post) in PostList::new(&codec).load_all()? {
        match post {
            Ok(post) if post.is_draft && !args.drafts => {}
            Ok(post) => {
                let draft = if post.is_draft { " [draft]" } else { "" };
                println!("{}\t{}{}", path.display(), post.title, draft);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(())
}
