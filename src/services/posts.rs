use std::sync::Arc;

use tracing::info;

use crate::{
    domain::models::{NewPost, Post, PostId, User},
    infrastructure::state::AppState,
};

use super::errors::ServiceError;

pub struct PostService {
    pub state: Arc<AppState>,
}

impl PostService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.state.store.list_posts().await?)
    }

    pub async fn get(&self, id: Option<u64>) -> Result<Option<Post>, ServiceError> {
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(self.state.store.find_post(PostId(id)).await?)
    }

    /// The owning user, or `None` once that user has been deleted.
    pub async fn author_of(&self, post: &Post) -> Result<Option<User>, ServiceError> {
        Ok(self.state.store.find_user(post.user).await?)
    }

    pub async fn create(&self, payload: NewPost) -> Result<Post, ServiceError> {
        let owner = payload.user;
        let Some(post) = self.state.store.insert_post(payload).await? else {
            return Err(ServiceError::NotFound(format!("user {owner}")));
        };
        info!(post_id = %post.id, user_id = %owner, "post created");
        Ok(post)
    }
}
