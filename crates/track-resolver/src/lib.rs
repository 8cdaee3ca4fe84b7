mod resolver;
mod transport;

pub use resolver::*;
pub use transport::*;

use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub const SOUNDCLOUD_API_BASE: &str = "https://api-v2.soundcloud.com";

// TrackId
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Serialize, Deserialize)]
pub struct TrackId(pub(crate) u64);

impl Deref for TrackId {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u64> for TrackId {
    fn from(value: u64) -> Self {
        TrackId(value)
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Credentials
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub client_id: String,
    pub access_token: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_token,
        }
    }

    pub(crate) fn oauth_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

// Secrets stay out of the logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
