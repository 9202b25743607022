//! Post repository.

use std::path::PathBuf;

use crate::error::Result;
use crate::model::{new_record_id, NewPost, Post, User};
use crate::query::{now_stamp, paginate, sort_newest_first, Page};
use crate::table::{CompactReport, Table};

pub struct PostRepository {
    table: Table<Post>,
}

impl PostRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    /// Create a post, capturing the author's name as it stands right now.
    /// The snapshot is not re-synced if the user later changes name.
    pub fn create(&self, new_post: NewPost, author: &User) -> Result<Post> {
        let post = Post {
            id: new_record_id(),
            title: new_post.title,
            content: new_post.content,
            author_id: author.id.clone(),
            author_firstname: author.firstname.clone(),
            author_lastname: author.lastname.clone(),
            created_at: now_stamp(),
            image_path: new_post.image_path,
        };
        self.table.append(&post)?;
        Ok(post)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.table.scan_all()?.into_iter().find(|post| post.id == id))
    }

    /// One page of posts, newest first.
    pub fn list(&self, page: Page) -> Result<Vec<Post>> {
        Ok(paginate(self.all_newest_first()?, page))
    }

    /// Every post, newest first.
    pub fn all_newest_first(&self) -> Result<Vec<Post>> {
        let mut posts = self.table.scan_all()?;
        sort_newest_first(&mut posts, |post| &post.created_at);
        Ok(posts)
    }

    /// Every post by one author, newest first.
    pub fn by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let mut posts = self.all_newest_first()?;
        posts.retain(|post| post.author_id == author_id);
        Ok(posts)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.table.scan_all()?.len())
    }

    pub(crate) fn compact(&self) -> Result<CompactReport> {
        self.table.compact()
    }
}
