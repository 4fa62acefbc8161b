//! Role file inspection.

use std::fmt::Write;

use coursekeep_rbac::RoleManager;

/// Renders every role with its permissions, sorted by role name. Routes are
/// shown in their normalized form, which is what grant checks compare.
pub fn describe_roles(manager: &RoleManager) -> String {
    let mut out = String::new();

    for role in manager.roles() {
        let _ = writeln!(out, "{}", role.name);
        if role.permissions.is_empty() {
            let _ = writeln!(out, "  (no permissions)");
        }
        for perm in &role.permissions {
            let mut routes: Vec<&str> = perm.routes().iter().map(String::as_str).collect();
            routes.sort_unstable();
            let _ = writeln!(out, "  {:<7} {}", perm.method, routes.join(", "));
        }
        for method in role.duplicate_methods() {
            let _ = writeln!(
                out,
                "  warning: {} declared more than once, only the first applies",
                method
            );
        }
    }

    out
}
