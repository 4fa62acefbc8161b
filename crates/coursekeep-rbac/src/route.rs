/// Canonical form of a route used as the permission lookup key.
///
/// Surrounding whitespace is trimmed and every `/` is removed, so `"/users/"`,
/// `"users"` and `" users "` all map to `"users"`. Both stored routes and
/// looked-up routes go through this function; raw strings are never compared.
pub fn normalize_route(route: &str) -> String {
    route.trim().replace('/', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_forms() {
        assert_eq!(normalize_route("/users/"), "users");
        assert_eq!(normalize_route("users"), "users");
        assert_eq!(normalize_route(" users "), "users");
        assert_eq!(normalize_route("\t/auth/logout/\n"), "authlogout");
    }

    #[test]
    fn test_empty_and_root() {
        assert_eq!(normalize_route(""), "");
        assert_eq!(normalize_route("/"), "");
    }
}
