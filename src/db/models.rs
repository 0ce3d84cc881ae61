use crate::error::DeskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a dashboard account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(DeskError::InvalidValue(format!("unknown role `{other}`"))),
        }
    }
}

/// Workflow state of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStatus {
    #[default]
    Pending,
    Resolved,
    InReview,
}

impl AnnotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationStatus::Pending => "pending",
            AnnotationStatus::Resolved => "resolved",
            AnnotationStatus::InReview => "in_review",
        }
    }
}

impl fmt::Display for AnnotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AnnotationStatus::Pending),
            "resolved" => Ok(AnnotationStatus::Resolved),
            "in_review" => Ok(AnnotationStatus::InReview),
            other => Err(DeskError::InvalidValue(format!(
                "unknown annotation status `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbAnnotation {
    pub id: i64,
    pub file: String,
    pub sheet: String,
    pub row: u32,
    pub column: String,
    pub text: String,
    pub status: AnnotationStatus,
    pub section: String,
}

/// Everything needed to insert an annotation; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnotation {
    pub file: String,
    pub sheet: String,
    pub row: u32,
    pub column: String,
    pub text: String,
    pub status: AnnotationStatus,
    pub section: String,
}

/// Outcome of `UsersStorage::create_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created,
    AlreadyExists,
}
