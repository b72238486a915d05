use std::{fmt, str::FromStr};

use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::rules::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts an id received at the API boundary into the canonical integer id.
///
/// Surrounding whitespace and leading zeros are tolerated, so `" 007"` names
/// the same record as `7`. Anything else yields `None`, which matches no record.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Enum type for gander
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Enum)]
#[serde(try_from = "String", into = "String")]
#[graphql(name = "GenderEnumType", rename_items = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(ValidationError::InvalidEnumValue(other.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "gander", default)]
    pub gender: Option<Gender>,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub password: Option<String>,
    /// Ids of the posts this user owns, in the order they were attached.
    #[serde(default)]
    pub posts: Vec<PostId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user: UserId,
}

/// Already-validated fields for a user about to be created.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub password: Option<String>,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: Some(self.gender),
            phone: self.phone,
            email: Some(self.email),
            created_at: self.created_at,
            password: self.password,
            posts: Vec::new(),
        }
    }
}

/// Partial overwrite of a user. Only non-empty fields are applied; values are
/// taken as-is without re-running the create-time rules.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(first_name) = non_empty(&self.first_name) {
            user.first_name = first_name.to_string();
        }
        if let Some(last_name) = non_empty(&self.last_name) {
            user.last_name = last_name.to_string();
        }
        if let Some(gender) = self.gender {
            user.gender = Some(gender);
        }
        if let Some(phone) = non_empty(&self.phone) {
            user.phone = phone.to_string();
        }
        if let Some(email) = non_empty(&self.email) {
            user.email = Some(email.to_string());
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user: UserId,
}

impl NewPost {
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            description: self.description,
            user: self.user,
        }
    }
}
