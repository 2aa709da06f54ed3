use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVICE_URL: &str = "http://localhost:8082/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub service_url: String,
    pub request_timeout: Duration,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let service_url = lookup("PLAN_SERVICE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        let timeout_secs = lookup("PLAN_SERVICE_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let page_size = lookup("PLAN_PAGE_SIZE")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            port,
            service_url,
            request_timeout: Duration::from_secs(timeout_secs),
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.service_url, "http://localhost:8082/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn values_are_read_and_normalized() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("PLAN_SERVICE_URL", "http://plans.local/api/"),
            ("PLAN_SERVICE_TIMEOUT_SECS", "5"),
            ("PLAN_PAGE_SIZE", "25"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.service_url, "http://plans.local/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("PLAN_SERVICE_TIMEOUT_SECS", "0"),
            ("PLAN_PAGE_SIZE", "-1"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 100);
    }
}
