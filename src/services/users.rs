use std::sync::Arc;

use tracing::info;

use crate::{
    domain::models::{NewUser, Post, User, UserId, UserPatch},
    infrastructure::state::AppState,
};

use super::errors::ServiceError;

pub struct UserService {
    pub state: Arc<AppState>,
}

impl UserService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.state.store.list_users().await?)
    }

    pub async fn get(&self, id: Option<u64>) -> Result<Option<User>, ServiceError> {
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(self.state.store.find_user(UserId(id)).await?)
    }

    pub async fn posts_of(&self, user: &User) -> Result<Vec<Post>, ServiceError> {
        if user.posts.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.state.store.posts_by_ids(&user.posts).await?)
    }

    pub async fn create(&self, payload: NewUser) -> Result<User, ServiceError> {
        let user = self.state.store.insert_user(payload).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn update(
        &self,
        id: Option<u64>,
        patch: UserPatch,
    ) -> Result<Option<User>, ServiceError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let updated = self.state.store.update_user(UserId(id), &patch).await?;
        match &updated {
            Some(user) => info!(user_id = %user.id, "user updated"),
            None => info!(user_id = id, "update skipped, no such user"),
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: Option<u64>) -> Result<bool, ServiceError> {
        let Some(id) = id else {
            return Ok(false);
        };
        let removed = self.state.store.delete_user(UserId(id)).await?;
        info!(user_id = id, removed, "user delete requested");
        Ok(removed)
    }
}
