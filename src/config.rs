// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Origin used when `BACKEND_URL` is empty. A native client has no page
/// origin, so the "same origin" default resolves to the local backend.
pub const LOCAL_ORIGIN: &str = "http://127.0.0.1:8000";

pub const PROCESS_PATH: &str = "/api/process";
pub const EXPORT_PATH: &str = "/api/export";

/// File name proposed in the save dialog for exported workbooks.
pub const EXPORT_FILE_NAME: &str = "ATC_Smart_Pro_Categorized.xlsx";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL prefix for both endpoints, empty by default.
    pub backend_url: String,
}

impl Config {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        let backend_url = std::env::var(BACKEND_URL_VAR).unwrap_or_default();
        Self::new(backend_url.trim())
    }

    /// Effective base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        let trimmed = self.backend_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            LOCAL_ORIGIN
        } else {
            trimmed
        }
    }

    /// Join the base URL and an endpoint path with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    pub fn process_url(&self) -> String {
        self.endpoint(PROCESS_PATH)
    }

    pub fn export_url(&self) -> String {
        self.endpoint(EXPORT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_falls_back_to_local_origin() {
        let config = Config::default();
        assert_eq!(config.process_url(), "http://127.0.0.1:8000/api/process");
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = Config::new("https://atc.example.com/");
        assert_eq!(config.export_url(), "https://atc.example.com/api/export");

        let config = Config::new("https://atc.example.com/tenant//");
        assert_eq!(config.endpoint("api/process"), "https://atc.example.com/tenant/api/process");
    }

    #[test]
    fn whitespace_only_base_is_treated_as_empty() {
        let config = Config::new("   ");
        assert_eq!(config.base_url(), LOCAL_ORIGIN);
    }
}
