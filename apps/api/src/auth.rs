//! Authorization boundary. Identity is established upstream (the platform
//! gateway) and forwarded via headers; this module only reads and enforces
//! it. The platform-wide recalculation endpoint is instead gated by a
//! bearer secret shared with the cron caller.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const COMPANY_ID_HEADER: &str = "x-company-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Developer,
    Company,
    Hr,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "developer" => Some(Role::Developer),
            "company" => Some(Role::Company),
            "hr" => Some(Role::Hr),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The authenticated caller, as asserted by the gateway.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

impl Caller {
    /// ATS endpoints: the owning candidate, a company/HR user of the job's
    /// company, or an admin.
    pub fn may_score(&self, application_developer_id: Uuid, job_company_id: Uuid) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Developer => self.user_id == application_developer_id,
            Role::Company | Role::Hr => self.company_id == Some(job_company_id),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(&parts.headers, USER_ID_HEADER)
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;

        let role = header_value(&parts.headers, USER_ROLE_HEADER)
            .and_then(Role::parse)
            .ok_or(AppError::Unauthorized)?;

        let company_id =
            header_value(&parts.headers, COMPANY_ID_HEADER).and_then(|v| Uuid::parse_str(v).ok());

        Ok(Caller {
            user_id,
            role,
            company_id,
        })
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Validates the `Authorization: Bearer` secret for the platform-wide
/// recalculation endpoint against `CRON_SECRET` or `ADMIN_SECRET`.
pub fn require_batch_secret(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if token == config.cron_secret || config.admin_secret.as_deref() == Some(token) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            cron_secret: "cron-secret".to_string(),
            admin_secret: Some("admin-secret".to_string()),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_cron_secret_accepted() {
        assert!(require_batch_secret(&bearer("cron-secret"), &test_config()).is_ok());
    }

    #[test]
    fn test_admin_secret_accepted() {
        assert!(require_batch_secret(&bearer("admin-secret"), &test_config()).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        assert!(require_batch_secret(&bearer("nope"), &test_config()).is_err());
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(require_batch_secret(&HeaderMap::new(), &test_config()).is_err());
    }

    #[test]
    fn test_owning_developer_may_score() {
        let developer_id = Uuid::new_v4();
        let caller = Caller {
            user_id: developer_id,
            role: Role::Developer,
            company_id: None,
        };
        assert!(caller.may_score(developer_id, Uuid::new_v4()));
        assert!(!caller.may_score(Uuid::new_v4(), Uuid::new_v4()));
    }

    #[test]
    fn test_company_user_needs_matching_company() {
        let company_id = Uuid::new_v4();
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Role::Hr,
            company_id: Some(company_id),
        };
        assert!(caller.may_score(Uuid::new_v4(), company_id));
        assert!(!caller.may_score(Uuid::new_v4(), Uuid::new_v4()));
    }

    #[test]
    fn test_admin_always_allowed() {
        let caller = Caller {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            company_id: None,
        };
        assert!(caller.may_score(Uuid::new_v4(), Uuid::new_v4()));
    }
}
