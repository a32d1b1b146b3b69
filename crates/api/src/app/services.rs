//! Service wiring: storage, hashing, token issuing and the startup seed.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use hbnb_auth::{
    Argon2PasswordHasher, Hs256JwtIssuer, JwtClaims, JwtIssuer, PasswordHasher,
};
use hbnb_core::{DomainError, DomainResult, Entity};
use hbnb_infra::{HbnbFacade, UserRegistration};
use hbnb_users::User;

use crate::config::ApiConfig;

pub struct AppServices {
    pub facade: HbnbFacade,
    issuer: Arc<dyn JwtIssuer>,
    token_ttl: Duration,
}

impl AppServices {
    /// Sign an access token for `user`.
    pub fn issue_token(&self, user: &User) -> DomainResult<String> {
        let claims = JwtClaims::new(*user.id(), user.is_admin(), Utc::now(), self.token_ttl);
        self.issuer
            .issue(&claims)
            .map_err(|e| DomainError::internal(e.to_string()))
    }
}

pub fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let hasher: Arc<dyn PasswordHasher> = match config.password_cost {
        Some(cost) => Arc::new(Argon2PasswordHasher::with_cost(cost.memory_kib, cost.iterations)?),
        None => Arc::new(Argon2PasswordHasher::new()),
    };
    let facade = HbnbFacade::in_memory(hasher);

    if let Some(seed) = &config.admin_seed {
        let seeded = facade.seed_admin(UserRegistration {
            first_name: "Admin".to_string(),
            last_name: "HBnB".to_string(),
            email: seed.email.clone(),
            password: seed.password.clone(),
            is_admin: true,
        })?;
        if let Some(admin) = seeded {
            info!(user_id = %admin.id(), email = admin.email(), "bootstrap admin seeded");
        }
    }

    Ok(AppServices {
        facade,
        issuer: Arc::new(Hs256JwtIssuer::new(config.jwt_secret.clone().into_bytes())),
        token_ttl: config.token_ttl,
    })
}

/// Run CPU-bound facade work (password hashing) off the async workers.
pub async fn blocking<T, F>(services: &Arc<AppServices>, f: F) -> DomainResult<T>
where
    T: Send + 'static,
    F: FnOnce(&AppServices) -> DomainResult<T> + Send + 'static,
{
    let services = Arc::clone(services);
    tokio::task::spawn_blocking(move || f(&services))
        .await
        .map_err(|e| DomainError::internal(format!("blocking task failed: {e}")))?
}
