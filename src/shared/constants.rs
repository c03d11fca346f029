/// Minimum trimmed length of any operator-entered name
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length of a derived or entered slug
pub const MIN_SLUG_LENGTH: usize = 2;

/// Maximum name/slug length accepted by the catalog service
pub const MAX_NAME_LENGTH: u64 = 200;

/// Seconds an operator should wait after the auth service rate-limits a code request
pub const LOGIN_COOLDOWN_SECS: u64 = 30;

// =============================================================================
// REMOTE API PATHS
// =============================================================================

pub const AUTH_PATH_PREFIX: &str = "/api/v1/auth/";
pub const AUTH_LOGIN_PATH: &str = "/api/v1/auth/login/";
pub const AUTH_CONFIRM_PATH: &str = "/api/v1/auth/confirm/";
pub const AUTH_REFRESH_PATH: &str = "/api/v1/auth/refresh/";

pub const CATEGORIES_PATH: &str = "/api/v1/categories/";
pub const BRANDS_PATH: &str = "/api/v1/brands";
pub const USERS_PATH: &str = "/api/v1/users/";

/// Item path for a collection, e.g. `/api/v1/categories/7`
pub fn item_path(collection: &str, id: i64) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_strips_collection_slash() {
        assert_eq!(item_path(CATEGORIES_PATH, 7), "/api/v1/categories/7");
        assert_eq!(item_path(BRANDS_PATH, 3), "/api/v1/brands/3");
    }
}
