use std::{path::Path, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    domain::models::{NewPost, NewUser, Post, PostId, User, UserId, UserPatch},
    infrastructure::config::StoreConfig,
};

/// Ordered collections of users and posts. Order is insertion order and is
/// what every listing returns.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    async fn find_user(&self, id: UserId) -> anyhow::Result<Option<User>>;
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User>;
    /// Applies `patch` to every user with `id`; returns the last one touched.
    async fn update_user(&self, id: UserId, patch: &UserPatch) -> anyhow::Result<Option<User>>;
    /// Removes the first user with `id`. Posts referencing it are kept.
    async fn delete_user(&self, id: UserId) -> anyhow::Result<bool>;

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>>;
    async fn find_post(&self, id: PostId) -> anyhow::Result<Option<Post>>;
    /// Posts whose id is in `ids`, in store order.
    async fn posts_by_ids(&self, ids: &[PostId]) -> anyhow::Result<Vec<Post>>;
    /// Creates the post and appends its id to the owner's post list. Returns
    /// `None` when the owner does not exist.
    async fn insert_post(&self, post: NewPost) -> anyhow::Result<Option<Post>>;
}

pub fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn DataStore>> {
    match config.seed_path.as_deref() {
        Some(path) => Ok(Arc::new(MemoryStore::from_seed_file(path)?)),
        None => Ok(Arc::new(MemoryStore::default())),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    next_user_id: u64,
    next_post_id: u64,
}

impl Tables {
    fn allocate_user_id(&mut self) -> anyhow::Result<UserId> {
        self.next_user_id = self
            .next_user_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("user id space exhausted"))?;
        Ok(UserId(self.next_user_id))
    }

    fn allocate_post_id(&mut self) -> anyhow::Result<PostId> {
        self.next_post_id = self
            .next_post_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("post id space exhausted"))?;
        Ok(PostId(self.next_post_id))
    }
}

/// Process-lifetime store. One lock covers both collections and the id
/// counters so a mutation is never observed half-applied.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn with_seed(seed: Seed) -> Self {
        let next_user_id = seed.users.iter().map(|u| u.id.0).max().unwrap_or(0);
        let next_post_id = seed.posts.iter().map(|p| p.id.0).max().unwrap_or(0);
        Self {
            tables: RwLock::new(Tables {
                users: seed.users,
                posts: seed.posts,
                next_user_id,
                next_post_id,
            }),
        }
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;
        info!(
            path = %path.display(),
            users = seed.users.len(),
            posts = seed.posts.len(),
            "loaded seed data"
        );
        Ok(Self::with_seed(seed))
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.tables.read().users.clone())
    }

    async fn find_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
        Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User> {
        let mut tables = self.tables.write();
        let id = tables.allocate_user_id()?;
        let user = user.into_user(id);
        tables.users.push(user.clone());
        debug!(user_id = %id, total = tables.users.len(), "user inserted");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        let mut tables = self.tables.write();
        let mut updated = None;
        for user in tables.users.iter_mut().filter(|u| u.id == id) {
            patch.apply(user);
            updated = Some(user.clone());
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> anyhow::Result<bool> {
        let mut tables = self.tables.write();
        match tables.users.iter().position(|u| u.id == id) {
            Some(index) => {
                tables.users.remove(index);
                debug!(user_id = %id, total = tables.users.len(), "user removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        Ok(self.tables.read().posts.clone())
    }

    async fn find_post(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        Ok(self.tables.read().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn posts_by_ids(&self, ids: &[PostId]) -> anyhow::Result<Vec<Post>> {
        Ok(self
            .tables
            .read()
            .posts
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_post(&self, post: NewPost) -> anyhow::Result<Option<Post>> {
        let mut tables = self.tables.write();
        if !tables.users.iter().any(|u| u.id == post.user) {
            return Ok(None);
        }
        let id = tables.allocate_post_id()?;
        let post = post.into_post(id);
        for owner in tables.users.iter_mut().filter(|u| u.id == post.user) {
            owner.posts.push(id);
        }
        tables.posts.push(post.clone());
        debug!(post_id = %id, user_id = %post.user, "post inserted");
        Ok(Some(post))
    }
}
