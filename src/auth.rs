use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::models::Role;
use crate::state::AppState;
use crate::token::TokenService;

/// Roles allowed on a path family
#[derive(Debug)]
pub struct AccessRule {
    pub prefix: &'static str,
    pub roles: &'static [Role],
}

/// Families of paths that require a bearer token. Anything not listed here is
/// public.
pub const ACCESS_POLICY: &[AccessRule] = &[
    AccessRule {
        prefix: "/employees",
        roles: &[Role::Staff, Role::Admin],
    },
    AccessRule {
        prefix: "/exhibitions",
        roles: &[Role::Staff, Role::Admin],
    },
    AccessRule {
        prefix: "/total-report",
        roles: &[Role::Admin],
    },
];

fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Roles allowed on `path`, decided by the longest matching prefix
pub fn required_roles(path: &str) -> Option<&'static [Role]> {
    ACCESS_POLICY
        .iter()
        .filter(|rule| matches_prefix(path, rule.prefix))
        .max_by_key(|rule| rule.prefix.len())
        .map(|rule| rule.roles)
}

pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".to_string(),
            )
        })
}

/// Resolve the caller from the request headers and check its role
pub fn authorize(
    tokens: &TokenService,
    headers: &HeaderMap,
    allowed: &[Role],
) -> AppResult<AuthenticatedUser> {
    let claims = tokens.verify(bearer_token(headers)?)?;
    let user = AuthenticatedUser {
        staff_id: claims.sub,
        role: claims.role,
    };
    user.require(allowed)?;
    Ok(user)
}

/// Gates every request whose path falls under [`ACCESS_POLICY`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(allowed) = required_roles(request.uri().path()) else {
        return next.run(request).await;
    };

    match authorize(&state.tokens, request.headers(), allowed) {
        Ok(user) => {
            tracing::debug!(staff_id = user.staff_id, role = %user.role, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::info!(path = %request.uri().path(), "Rejected request: {}", e);
            e.into_response()
        }
    }
}

/// Principal stored in the request extensions by [`auth_middleware`]
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub staff_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn require(&self, allowed: &[Role]) -> AppResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Requires the `staff` role
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        user.require(&[Role::Staff])?;
        Ok(RequireStaff(user))
    }
}

/// Requires the `admin` role
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        user.require(&[Role::Admin])?;
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_required_roles_by_prefix() {
        assert_eq!(required_roles("/total-report"), Some(&[Role::Admin][..]));
        assert_eq!(
            required_roles("/exhibitions/AddExhibition"),
            Some(&[Role::Staff, Role::Admin][..])
        );
        assert_eq!(
            required_roles("/employees/12"),
            Some(&[Role::Staff, Role::Admin][..])
        );
        assert_eq!(required_roles("/"), None);
        assert_eq!(required_roles("/auth/login"), None);
        assert_eq!(required_roles("/exhibitionsX"), None);
        assert_eq!(required_roles("/total-reports"), None);
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers_with("Bearer ")).is_err());
    }

    #[test]
    fn test_authorize_checks_role() {
        let tokens = TokenService::new("gallery-secret", 60);
        let staff = tokens.issue(5, Role::Staff).unwrap();
        let headers = headers_with(&format!("Bearer {}", staff));

        let user = authorize(&tokens, &headers, &[Role::Staff, Role::Admin]).unwrap();
        assert_eq!(user.staff_id, 5);

        assert!(matches!(
            authorize(&tokens, &headers, &[Role::Admin]),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            authorize(&tokens, &headers_with("Bearer forged"), &[Role::Staff]),
            Err(AppError::Unauthorized(_))
        ));
    }
}
