//! The role table and grant decisions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use coursekeep_core::AuthError;
use serde::Deserialize;
use tracing::{info, warn};

use crate::role::Role;
use crate::route::normalize_route;

/// Top-level shape of the role definition file.
#[derive(Debug, Deserialize)]
struct RoleFile {
    roles: Vec<Role>,
}

/// Read-only role table built once at startup.
///
/// # Decision policy
///
/// [`RoleManager::grant`] resolves in this order:
///
/// 1. Unknown role name: `Err(RoleNotFound)`.
/// 2. The first permission whose method matches case-insensitively decides.
///    If a role declares the same method twice, later declarations are never
///    consulted (first match wins). The loader logs a warning for such roles.
/// 3. No permission for the method: `Ok(false)`. This is the default-deny
///    branch and is not an error.
#[derive(Debug, Clone, Default)]
pub struct RoleManager {
    roles: HashMap<String, Role>,
}

impl RoleManager {
    /// Builds the table from already-constructed roles.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if two roles share a name.
    pub fn new(roles: Vec<Role>) -> Result<Self, AuthError> {
        let mut table = HashMap::with_capacity(roles.len());

        for role in roles {
            let duplicates = role.duplicate_methods();
            if !duplicates.is_empty() {
                warn!(
                    role = %role.name,
                    methods = ?duplicates,
                    "role declares a method more than once; the first declaration wins"
                );
            }

            if table.contains_key(&role.name) {
                return Err(AuthError::Config(format!("duplicate role: {}", role.name)));
            }
            table.insert(role.name.clone(), role);
        }

        Ok(Self { roles: table })
    }

    /// Loads the role table from a JSON definition file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the file does not exist, cannot be read,
    /// or is not a valid role definition. Callers treat this as fatal.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AuthError::Config(format!(
                "roles file does not exist: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            AuthError::Config(format!("cannot read roles file {}: {}", path.display(), e))
        })?;

        let manager = Self::from_json(&contents)?;
        info!(path = %path.display(), roles = manager.roles.len(), "role table loaded");

        Ok(manager)
    }

    /// Parses a role definition document.
    pub fn from_json(contents: &str) -> Result<Self, AuthError> {
        let file: RoleFile = serde_json::from_str(contents)
            .map_err(|e| AuthError::Config(format!("cannot parse roles file: {}", e)))?;

        Self::new(file.roles)
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// All roles, sorted by name.
    pub fn roles(&self) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self.roles.values().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    /// Decides whether `role_name` may call `method` on `route`.
    ///
    /// See the type-level docs for the decision policy.
    pub fn grant(&self, role_name: &str, method: &str, route: &str) -> Result<bool, AuthError> {
        let route = normalize_route(route);

        let role = self
            .roles
            .get(role_name)
            .ok_or_else(|| AuthError::RoleNotFound(role_name.to_string()))?;

        match role.permission_for(method) {
            Some(permission) => Ok(permission.allows(&route)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permission;

    fn table() -> RoleManager {
        RoleManager::new(vec![
            Role::new("guest", vec![]),
            Role::new(
                "student",
                vec![
                    Permission::new("GET", ["/users/me/", "courses"]),
                    Permission::new("POST", ["/auth/logout/", "/auth/refresh-token/"]),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_grant_normalizes_route() {
        let roles = table();
        for route in ["/courses/", "courses", " courses ", "/courses"] {
            assert!(roles.grant("student", "GET", route).unwrap(), "{route}");
        }
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let roles = table();
        assert!(roles.grant("student", "get", "courses").unwrap());
        assert!(roles.grant("student", "Post", "auth/logout").unwrap());
    }

    #[test]
    fn test_route_not_in_permission() {
        assert!(!table().grant("student", "GET", "admin").unwrap());
    }

    #[test]
    fn test_no_permission_for_method_is_default_deny() {
        assert!(!table().grant("student", "DELETE", "courses").unwrap());
        assert!(!table().grant("guest", "POST", "auth/logout").unwrap());
    }

    #[test]
    fn test_unknown_role() {
        assert!(matches!(
            table().grant("ghost", "GET", "courses"),
            Err(AuthError::RoleNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_duplicate_method_first_match_wins() {
        let roles = RoleManager::new(vec![Role::new(
            "employee",
            vec![
                Permission::new("GET", ["first"]),
                Permission::new("get", ["second"]),
            ],
        )])
        .unwrap();

        assert!(roles.grant("employee", "GET", "first").unwrap());
        assert!(!roles.grant("employee", "GET", "second").unwrap());
    }

    #[test]
    fn test_duplicate_role_names_rejected() {
        let result = RoleManager::new(vec![Role::new("admin", vec![]), Role::new("admin", vec![])]);
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_from_json() {
        let roles = RoleManager::from_json(
            r#"{"roles":[{"name":"admin","permissions":[{"method":"PATCH","routes":["/users/:id"]}]}]}"#,
        )
        .unwrap();
        assert!(roles.grant("admin", "patch", "users/:id").unwrap());
        assert_eq!(roles.roles().len(), 1);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            RoleManager::from_json("{ not json"),
            Err(AuthError::Config(_))
        ));
        assert!(matches!(
            RoleManager::from_json(r#"{"users":[]}"#),
            Err(AuthError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(matches!(RoleManager::from_file(path), Err(AuthError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("roles-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{"roles":[{"name":"guest","permissions":[{"method":"POST","routes":["/auth/logout/"]}]}]}"#,
        )
        .unwrap();

        let roles = RoleManager::from_file(&path).unwrap();
        assert!(roles.grant("guest", "POST", "auth/logout").unwrap());

        std::fs::remove_file(path).unwrap();
    }
}
