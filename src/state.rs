use std::sync::Arc;

use coursekeep_auth::TokenCodec;
use coursekeep_cache::{CacheConfig, MemorySessionStore, RedisSessionStore, SessionBackend, SessionStore};
use coursekeep_config::{CorsConfig, JwtConfig, RbacConfig, ServerConfig};
use coursekeep_core::{AuthError, UserRole};
use coursekeep_db::{PgUserRepository, UserRepository, init_db_pool, run_migrations};
use coursekeep_observability::PrometheusHandle;
use coursekeep_rbac::RoleManager;
use tracing::{info, warn};

use crate::modules::auth::service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub codec: Arc<TokenCodec>,
    pub roles: Arc<RoleManager>,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        codec: Arc<TokenCodec>,
        roles: Arc<RoleManager>,
        cors_config: CorsConfig,
        server_config: ServerConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(users, sessions, codec.clone()),
            codec,
            roles,
            cors_config,
            server_config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }
}

/// Assignable roles with no entry in the role table. Holders of these roles
/// are denied every granted route.
fn roles_missing_from_table(roles: &RoleManager) -> Vec<UserRole> {
    UserRole::ASSIGNABLE
        .into_iter()
        .filter(|role| roles.role(role.as_str()).is_none())
        .collect()
}

/// Builds every long-lived component from the environment.
///
/// A missing signing secret, an unreadable role file, or an unreachable
/// database or registry is fatal: the server does not start half-configured.
pub async fn init_app_state() -> Result<AppState, AuthError> {
    let codec = Arc::new(TokenCodec::new(&JwtConfig::from_env())?);

    let rbac_config = RbacConfig::from_env();
    let roles = Arc::new(RoleManager::from_file(&rbac_config.roles_path)?);
    for role in roles_missing_from_table(&roles) {
        warn!(role = %role, "Role has no entry in the role file; all its requests will be denied");
    }

    let cache_config = CacheConfig::from_env();
    let sessions: Arc<dyn SessionStore> = match cache_config.backend {
        SessionBackend::Redis => Arc::new(RedisSessionStore::connect(&cache_config).await?),
        SessionBackend::Memory => {
            warn!("Using in-memory session registry; sessions are lost on restart");
            Arc::new(MemorySessionStore::new())
        }
    };

    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));

    info!(roles = roles.roles().len(), "Application state initialized");

    Ok(AppState::new(
        users,
        sessions,
        codec,
        roles,
        CorsConfig::from_env(),
        ServerConfig::from_env(),
    ))
}
