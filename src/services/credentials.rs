use track_resolver::{Credentials, TrackRequest};

/// Fills in deployment-wide credentials for requests that arrive without
/// their own. Values sent with the request always take precedence, and the
/// default access token only travels with the default client id.
pub(crate) struct CredentialsProvider {
    default_client_id: Option<String>,
    default_access_token: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl CredentialsProvider {
    pub(crate) fn new(
        default_client_id: Option<String>,
        default_access_token: Option<String>,
    ) -> Self {
        Self {
            default_client_id: non_blank(default_client_id),
            default_access_token: non_blank(default_access_token),
        }
    }

    pub(crate) fn credentials_for(&self, request: &TrackRequest) -> Credentials {
        let own = request.credentials();

        // Tokens are bound to the client id that issued them.
        match non_blank(Some(own.client_id)) {
            Some(client_id) => Credentials::new(client_id, non_blank(own.access_token)),
            None => Credentials::new(
                self.default_client_id.clone().unwrap_or_default(),
                non_blank(own.access_token).or_else(|| self.default_access_token.clone()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(client_id: &str, access_token: Option<&str>) -> TrackRequest {
        TrackRequest {
            url: "https://soundcloud.com/forss/flickermood".into(),
            client_id: client_id.into(),
            access_token: access_token.map(Into::into),
        }
    }

    #[test]
    fn test_request_credentials_take_precedence() {
        let provider = CredentialsProvider::new(Some("default".into()), Some("token".into()));

        let credentials = provider.credentials_for(&request("own", Some("own-token")));

        assert_eq!(Credentials::new("own", Some("own-token".into())), credentials);
    }

    #[test]
    fn test_defaults_fill_missing_credentials() {
        let provider = CredentialsProvider::new(Some("default".into()), Some("token".into()));

        let credentials = provider.credentials_for(&request(" ", None));

        assert_eq!(Credentials::new("default", Some("token".into())), credentials);
    }

    #[test]
    fn test_own_client_id_is_not_paired_with_default_token() {
        let provider = CredentialsProvider::new(Some("default".into()), Some("token".into()));

        let credentials = provider.credentials_for(&request("own", None));

        assert_eq!(Credentials::new("own", None), credentials);
    }

    #[test]
    fn test_missing_everything_yields_empty_client_id() {
        let provider = CredentialsProvider::new(None, Some("".into()));

        let credentials = provider.credentials_for(&request("", Some("")));

        assert_eq!(Credentials::new("", None), credentials);
    }
}
