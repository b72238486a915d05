use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result, ID};

use crate::{
    domain::models::{Gender, NewPost, NewUser, Post, User, UserId, UserPatch},
    services::{posts::PostService, users::UserService},
};

use super::{
    app_state,
    scalars::{Date, Email, Password},
};

/// It represents a single user!
#[Object(name = "User")]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn first_name(&self) -> &str {
        &self.first_name
    }

    async fn last_name(&self) -> &str {
        &self.last_name
    }

    #[graphql(name = "gander")]
    async fn gender(&self) -> Option<Gender> {
        self.gender
    }

    async fn phone(&self) -> &str {
        &self.phone
    }

    /// Stored values are re-checked here; an invalid one fails this field only.
    async fn email(&self) -> Result<Option<Email>> {
        match self.email.as_deref() {
            Some(raw) => Ok(Some(Email::from_stored(raw)?)),
            None => Ok(None),
        }
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        UserService::new(app_state(ctx)?)
            .posts_of(self)
            .await
            .map_err(|err| err.extend())
    }

    async fn created_at(&self) -> Option<Date> {
        self.created_at.map(Date)
    }

    async fn password(&self) -> Option<Password> {
        self.password.clone().map(Password)
    }
}

/// It represents a single post
#[Object(name = "Post")]
impl Post {
    async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        PostService::new(app_state(ctx)?)
            .author_of(self)
            .await
            .map_err(|err| err.extend())
    }
}

/// Taking input to add a new user
#[derive(Debug, InputObject)]
pub struct UserTypeInput {
    pub first_name: String,
    pub last_name: String,
    #[graphql(name = "gander")]
    pub gender: Gender,
    pub phone: String,
    pub email: Email,
    pub created_at: Option<Date>,
    pub password: Option<Password>,
}

impl From<UserTypeInput> for NewUser {
    fn from(input: UserTypeInput) -> Self {
        NewUser {
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender,
            phone: input.phone,
            email: input.email.0,
            created_at: input.created_at.map(|date| date.0),
            password: input.password.map(|password| password.0),
        }
    }
}

/// Taking input to update an existing user
#[derive(Debug, Default, InputObject)]
pub struct UpdateUserTypeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[graphql(name = "gander")]
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateUserTypeInput> for UserPatch {
    fn from(input: UpdateUserTypeInput) -> Self {
        UserPatch {
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender,
            phone: input.phone,
            email: input.email,
        }
    }
}

/// Taking input to add a post owned by an existing user
#[derive(Debug, InputObject)]
pub struct PostTypeInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user: ID,
}

impl PostTypeInput {
    pub fn into_new_post(self, owner: UserId) -> NewPost {
        NewPost {
            title: self.title,
            description: self.description,
            user: owner,
        }
    }
}
