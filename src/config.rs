use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Careport";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Get the application data directory
/// ~/Careport/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Careport")
}

/// Database path: `CAREPORT_DB` env override, else the app data dir.
pub fn database_path() -> PathBuf {
    match std::env::var("CAREPORT_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("careport.db"),
    }
}

/// Bind address: `CAREPORT_ADDR` env override, else localhost:5000.
/// A malformed override falls back to the default.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CAREPORT_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| DEFAULT_ADDR.parse().expect("default addr parses"))
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "careport=info,tower_http=warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Careport"));
    }

    #[test]
    fn default_database_under_app_data() {
        // Only valid when the override is unset in the test environment
        if std::env::var("CAREPORT_DB").is_err() {
            let db = database_path();
            assert!(db.starts_with(app_data_dir()));
            assert!(db.ends_with("careport.db"));
        }
    }

    #[test]
    fn default_addr_is_localhost() {
        if std::env::var("CAREPORT_ADDR").is_err() {
            let addr = bind_addr();
            assert!(addr.ip().is_loopback());
            assert_eq!(addr.port(), 5000);
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
