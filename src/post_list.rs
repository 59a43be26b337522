use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;

use glob::Pattern;
use spdlog::{debug, warn};

use crate::error::PostError;
use crate::post::Post;
use crate::post_codec::PostCodec;

/// Publishable posts found under the codec's posts directory.
pub struct PostList<'a> {
    codec: &'a PostCodec,
}

impl<'a> PostList<'a> {
    pub fn new(codec: &'a PostCodec) -> PostList<'a> {
        PostList { codec }
    }

    /// Every file, at any depth, that is a post and is publishable. Sorted by path.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let root_dir = self.codec.postsdir();
        if !root_dir.is_dir() {
            return Err(io::Error::new(ErrorKind::NotFound, format!("Posts directory not found: {}", root_dir.display())));
        }
        let Some(root) = root_dir.to_str() else {
            return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid posts directory: {}", root_dir.display())));
        };

        let pattern = format!("{}/**/*", Pattern::escape(root.trim_end_matches('/')));
        let entries = glob::glob(&pattern)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;

        let mut posts = vec![];
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !path.is_file() || !self.codec.is_post(&path) {
                continue;
            }
            if !self.codec.is_publishable(&path) {
                debug!("Ignoring {}", path.display());
                continue;
            }
            posts.push(path);
        }
        posts.sort();
        Ok(posts)
    }

    pub fn load_all(&self) -> io::Result<Vec<(PathBuf, Result<Post, PostError>)>> {
        let posts = self.retrieve_files()?
            .into_iter()
            .map(|path| {
                let post = self.codec.load(&path);
                (path, post)
            })
            .collect();
        Ok(posts)
    }
}
