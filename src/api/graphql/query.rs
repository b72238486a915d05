use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    domain::models::{parse_id, Post, User},
    services::{posts::PostService, users::UserService},
};

use super::app_state;

#[derive(Debug, Default)]
pub struct Query;

/// Root Query
#[Object(name = "Query")]
impl Query {
    /// All users in store order.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        UserService::new(app_state(ctx)?)
            .list()
            .await
            .map_err(|err| err.extend())
    }

    async fn user(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<User>> {
        UserService::new(app_state(ctx)?)
            .get(id.as_ref().and_then(|id| parse_id(id)))
            .await
            .map_err(|err| err.extend())
    }

    /// All posts in store order.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        PostService::new(app_state(ctx)?)
            .list()
            .await
            .map_err(|err| err.extend())
    }

    async fn post(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Post>> {
        PostService::new(app_state(ctx)?)
            .get(id.as_ref().and_then(|id| parse_id(id)))
            .await
            .map_err(|err| err.extend())
    }
}
