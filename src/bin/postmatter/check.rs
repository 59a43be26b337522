use anyhow::bail;
use spdlog::{error, info};

use postmatter::config::Config;
use postmatter::post_list::PostList;

pub fn check_cmd(config: &Config) -> anyhow::Result<()> {
    let codec = config.build_codec()?;
    let posts = PostList::new(&codec).load_all()?;

    let mut failed = 0;
    for (path, post) in posts.iter() {
        match post {
            Ok(post) => info!("ok {} ({})", path.display(), post.title),
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    info!("{} posts checked, {} with errors", posts.len(), failed);
    if failed > 0 {
        bail!("{} of {} posts could not be loaded", failed, posts.len());
    }
    Ok(())
}
