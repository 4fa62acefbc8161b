use std::env;
use std::path::PathBuf;

/// Where the role definition file lives.
///
/// Read once at startup from `ROLES_PATH` (default: `roles.json`). Changing
/// the file requires a restart.
#[derive(Clone, Debug)]
pub struct RbacConfig {
    pub roles_path: PathBuf,
}

impl RbacConfig {
    pub fn from_env() -> Self {
        Self {
            roles_path: env::var("ROLES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("roles.json")),
        }
    }
}
