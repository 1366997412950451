use once_cell::sync::Lazy;
use std::env;

macro_rules! lazy_env_var {
    ($name:ident) => {
        pub static $name: Lazy<Option<String>> = Lazy::new(|| {
            env::var(stringify!($name))
                .ok()
                .filter(|value| !value.trim().is_empty())
        });
    };
    ($name:ident, $default:expr) => {
        pub static $name: Lazy<String> = Lazy::new(|| {
            env::var(stringify!($name))
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| $default.to_string())
        });
    };
}

lazy_env_var!(BIND_ADDR, "127.0.0.1:8080");
lazy_env_var!(QUERY_API_URL);
lazy_env_var!(QUERY_API_KEY);
lazy_env_var!(FIXTURE_DIR, "fixtures");
lazy_env_var!(LOCALES_DIR, "locales");
lazy_env_var!(PAGE_SIZE, "10");
lazy_env_var!(ALLOWED_ORIGIN);

pub const MEMBERS_TABLE: &str = "members";
pub const MEMBERS_SELECT: &str = "id,created_at,user_id,role,status,user:profiles(id,email,full_name,created_at)";
pub const HARVESTS_TABLE: &str = "harvest_assistance";
pub const HARVESTS_SELECT: &str = "*";
