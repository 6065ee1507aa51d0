//! Environment variable parsing with warn-level logging for invalid values.

pub const REMOTE_URL_ENV: &str = "MOVIE_TRACKER_REMOTE_URL";
pub const CACHE_PATH_ENV: &str = "MOVIE_TRACKER_CACHE_PATH";
pub const SHEET_PATH_ENV: &str = "MOVIE_TRACKER_SHEET_PATH";
pub const HTTP_TIMEOUT_ENV: &str = "MOVIE_TRACKER_HTTP_TIMEOUT_SECS";
pub const DB_POOL_SIZE_ENV: &str = "MOVIE_TRACKER_DB_POOL_SIZE";

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a non-empty string variable, trimming surrounding whitespace.
pub fn env_string(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name, so they can run in parallel.

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_MOVIE_ENV_PARSE_VALID_41207";
        unsafe { std::env::set_var(var_name, " 42 ") };
        let result: u64 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_MOVIE_ENV_PARSE_INVALID_41208";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_MOVIE_ENV_PARSE_MISSING_41209";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_string_blank_is_none() {
        let var_name = "TEST_MOVIE_ENV_STRING_BLANK_41210";
        unsafe { std::env::set_var(var_name, "   ") };
        assert!(env_string(var_name).is_none());
        unsafe { std::env::remove_var(var_name) };
    }
}
