use serde::{Deserialize, Serialize};

use crate::permission::Permission;

/// A named role with its permissions in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }

    /// First permission declared for `method`, compared case-insensitively.
    pub fn permission_for(&self, method: &str) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.matches_method(method))
    }

    /// Methods declared more than once.
    pub fn duplicate_methods(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates = Vec::new();
        for perm in &self.permissions {
            if seen.iter().any(|m| m.eq_ignore_ascii_case(&perm.method)) {
                if !duplicates.iter().any(|m: &&str| m.eq_ignore_ascii_case(&perm.method)) {
                    duplicates.push(perm.method.as_str());
                }
            } else {
                seen.push(perm.method.as_str());
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_for_is_case_insensitive() {
        let role = Role::new("student", vec![Permission::new("get", ["courses"])]);
        assert!(role.permission_for("GET").is_some());
        assert!(role.permission_for("POST").is_none());
    }

    #[test]
    fn test_duplicate_methods() {
        let role = Role::new(
            "employee",
            vec![
                Permission::new("GET", ["a"]),
                Permission::new("get", ["b"]),
                Permission::new("POST", ["c"]),
                Permission::new("Get", ["d"]),
            ],
        );
        assert_eq!(role.duplicate_methods(), vec!["get"]);
    }
}
