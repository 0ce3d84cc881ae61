use crate::db::Role;
use crate::error::DeskError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::Serialize;
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "sheetdesk_session";

/// Actions guarded by the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Browse,
    CreateAnnotation,
    UpdateAnnotationStatus,
    DeleteAnnotation,
    ManageUsers,
}

/// Request-scoped authentication state, rebuilt from the session cookie on
/// every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            role: None,
        }
    }

    pub fn authenticated(role: Role) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
        }
    }

    pub fn permits(&self, action: Action) -> bool {
        match (self.role, action) {
            (None, _) => false,
            (Some(Role::Admin), _) => true,
            (Some(Role::User), Action::Browse | Action::CreateAnnotation) => true,
            (Some(Role::User), _) => false,
        }
    }

    /// `Unauthenticated` for anonymous callers, `Forbidden` for a role that
    /// lacks the action.
    pub fn require(&self, action: Action) -> Result<Role, DeskError> {
        let role = self.role.ok_or(DeskError::Unauthenticated)?;
        if self.permits(action) {
            Ok(role)
        } else {
            Err(DeskError::Forbidden)
        }
    }

    fn from_jar(jar: &PrivateCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<Role>().ok())
            .map(Self::authenticated)
            .unwrap_or_else(Self::anonymous)
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::from_jar(&jar))
    }
}

/// Store the role in the encrypted session cookie. No max-age: the session
/// lasts as long as the browser keeps the cookie.
pub fn start_session(jar: PrivateCookieJar, role: Role) -> PrivateCookieJar {
    jar.add(
        Cookie::build(Cookie::new(SESSION_COOKIE, role.as_str()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}
