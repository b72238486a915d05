use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    domain::models::{parse_id, Post, User, UserId},
    services::{errors::ServiceError, posts::PostService, users::UserService},
    validation::rules::ValidationError,
};

use super::{
    app_state,
    types::{PostTypeInput, UpdateUserTypeInput, UserTypeInput},
};

#[derive(Debug, Default)]
pub struct Mutation;

/// Root Mutation
#[Object(name = "Mutation")]
impl Mutation {
    /// Creates a user with a fresh id and an empty post list.
    async fn add_user(&self, ctx: &Context<'_>, input: UserTypeInput) -> Result<User> {
        UserService::new(app_state(ctx)?)
            .create(input.into())
            .await
            .map_err(|err| err.extend())
    }

    /// Overwrites the non-empty fields of `input`. Returns null when no user
    /// has `id`.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        input: UpdateUserTypeInput,
    ) -> Result<Option<User>> {
        UserService::new(app_state(ctx)?)
            .update(id.as_ref().and_then(|id| parse_id(id)), input.into())
            .await
            .map_err(|err| err.extend())
    }

    /// Returns false when no user has `id`. The user's posts are kept.
    async fn delete_user(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<bool> {
        UserService::new(app_state(ctx)?)
            .delete(id.as_ref().and_then(|id| parse_id(id)))
            .await
            .map_err(|err| err.extend())
    }

    /// Creates a post and records it in the owner's post list.
    async fn add_post(&self, ctx: &Context<'_>, input: PostTypeInput) -> Result<Post> {
        let Some(owner) = parse_id(&input.user) else {
            let invalid = ValidationError::InvalidId(input.user.0.clone());
            return Err(ServiceError::from(invalid).extend());
        };
        PostService::new(app_state(ctx)?)
            .create(input.into_new_post(UserId(owner)))
            .await
            .map_err(|err| err.extend())
    }
}
