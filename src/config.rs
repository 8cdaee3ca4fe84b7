use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_api_base() -> String {
    track_resolver::SOUNDCLOUD_API_BASE.to_string()
}

fn default_connect_timeout() -> u64 {
    10u64
}

fn default_request_timeout() -> u64 {
    30u64
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct SoundcloudCredentials {
    #[serde(rename = "soundcloud_client_id")]
    pub(crate) client_id: Option<String>,
    #[serde(rename = "soundcloud_access_token")]
    pub(crate) access_token: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default = "default_api_base")]
    pub(crate) api_base: String,
    pub(crate) proxy_url: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub(crate) connect_timeout: u64,
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: u64,
    #[serde(flatten)]
    pub(crate) default_credentials: SoundcloudCredentials,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Invalid environment variable: {:#?}", error),
        }
    }

    pub(crate) fn proxy_prefix(&self) -> Option<String> {
        self.proxy_url
            .as_ref()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
        .expect("Expected config to be parsed")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!("0.0.0.0:8080", config.bind_address);
        assert_eq!(30, config.shutdown_timeout);
        assert_eq!("https://api-v2.soundcloud.com", config.api_base);
        assert_eq!(None, config.proxy_prefix());
        assert_eq!(10, config.connect_timeout);
        assert_eq!(30, config.request_timeout);
        assert_eq!(None, config.default_credentials.client_id);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("PROXY_URL", "https://corsproxy.io/?"),
            ("REQUEST_TIMEOUT", "5"),
            ("SOUNDCLOUD_CLIENT_ID", "client-123"),
        ]);

        assert_eq!("127.0.0.1:9000", config.bind_address);
        assert_eq!(Some("https://corsproxy.io/?".into()), config.proxy_prefix());
        assert_eq!(5, config.request_timeout);
        assert_eq!(
            Some("client-123".to_string()),
            config.default_credentials.client_id
        );
    }

    #[test]
    fn test_empty_proxy_url_disables_proxy() {
        let config = parse(&[("PROXY_URL", "")]);

        assert_eq!(None, config.proxy_prefix());
    }
}
