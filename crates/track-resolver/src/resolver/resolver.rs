use crate::resolver::types::{
    MediaDescriptor, PreviewDescriptor, SoundcloudTrack, StreamUrl, StreamsResponse, TrackRecord,
};
use crate::{Credentials, TrackId, Transport, TransportError, SOUNDCLOUD_API_BASE};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

const PROGRESSIVE_PROTOCOL: &str = "progressive";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("URL and client id are required")]
    InvalidInput,
    #[error("{context} ({status})")]
    UpstreamError { context: &'static str, status: u16 },
    #[error("Download URL not found")]
    StreamNotFound,
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] TransportError),
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Turns public SoundCloud track URLs into media URLs. Holds no per-call
/// state, so one instance is shared by every concurrent request.
pub struct TrackResolver {
    transport: Arc<dyn Transport>,
    api_base: String,
}

impl TrackResolver {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_api_base(transport, SOUNDCLOUD_API_BASE)
    }

    pub fn with_api_base(transport: Arc<dyn Transport>, api_base: &str) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn resolve_info(&self, url: &str, credentials: &Credentials) -> MediaDescriptor {
        match self.download_target(url, credentials).await {
            Ok((title, download_url)) => {
                info!(url, title = %title, "Track resolved to a downloadable stream");
                MediaDescriptor::downloadable(title, download_url)
            }
            Err(error) => {
                error!(url, %error, "Unable to resolve track info");
                MediaDescriptor::failed(error.to_string())
            }
        }
    }

    pub async fn resolve_preview(&self, url: &str, credentials: &Credentials) -> PreviewDescriptor {
        match self.resolve(url, credentials).await {
            Ok(record) => PreviewDescriptor::from_record(&record),
            Err(error) => {
                error!(url, %error, "Unable to resolve track preview");
                PreviewDescriptor::failed(error.to_string())
            }
        }
    }

    async fn download_target(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<(String, String), ResolveError> {
        let record = self.resolve(url, credentials).await?;
        let download_url = self.lookup_stream(record.id(), credentials).await?;

        Ok((record.display_title(), download_url))
    }

    /// Resolves a public track URL into its track record.
    pub async fn resolve(
        &self,
        url: &str,
        credentials: &Credentials,
    ) -> Result<TrackRecord, ResolveError> {
        let url = url.trim();

        if url.is_empty() || credentials.client_id.trim().is_empty() {
            return Err(ResolveError::InvalidInput);
        }

        let mut params = vec![("url", url)];
        params.extend(Self::credential_params(credentials));
        let endpoint = self.endpoint("/resolve", &params)?;

        debug!(url, "Resolving track");

        let response = self.transport.fetch(endpoint.as_str()).await?;

        if !response.is_success() {
            return Err(ResolveError::UpstreamError {
                context: "Unable to resolve the resource",
                status: response.status,
            });
        }

        let track: SoundcloudTrack = serde_json::from_str(&response.body)?;

        Ok(TrackRecord::from_track(track))
    }

    /// Finds a directly fetchable audio URL for the track, trying the
    /// `streams` shortcut before the transcoding list.
    pub async fn lookup_stream(
        &self,
        track_id: TrackId,
        credentials: &Credentials,
    ) -> Result<String, ResolveError> {
        if let Some(url) = self.fetch_streams_url(track_id, credentials).await? {
            debug!(%track_id, "Stream URL found through the streams endpoint");
            return Ok(url);
        }

        debug!(%track_id, "Falling back to the track transcodings");

        match self.fetch_transcoding_url(track_id, credentials).await? {
            Some(url) => Ok(url),
            None => Err(ResolveError::StreamNotFound),
        }
    }

    async fn fetch_streams_url(
        &self,
        track_id: TrackId,
        credentials: &Credentials,
    ) -> Result<Option<String>, ResolveError> {
        let endpoint = self.endpoint(
            &format!("/i1/tracks/{}/streams", track_id),
            &Self::credential_params(credentials),
        )?;
        let response = self.transport.fetch(endpoint.as_str()).await?;

        if !response.is_success() {
            warn!(%track_id, status = response.status, "Streams endpoint unavailable");
            return Ok(None);
        }

        let streams = match serde_json::from_str::<StreamsResponse>(&response.body) {
            Ok(streams) => streams,
            Err(error) => {
                warn!(%track_id, %error, "Unable to parse streams response");
                return Ok(None);
            }
        };

        Ok(streams.best_url().map(str::to_string))
    }

    async fn fetch_transcoding_url(
        &self,
        track_id: TrackId,
        credentials: &Credentials,
    ) -> Result<Option<String>, ResolveError> {
        let endpoint = self.endpoint(
            &format!("/tracks/{}", track_id),
            &Self::credential_params(credentials),
        )?;
        let response = self.transport.fetch(endpoint.as_str()).await?;

        if !response.is_success() {
            return Err(ResolveError::UpstreamError {
                context: "Unable to fetch the track",
                status: response.status,
            });
        }

        let track: SoundcloudTrack = serde_json::from_str(&response.body)?;
        let transcoding_url = track
            .media
            .unwrap_or_default()
            .transcodings
            .into_iter()
            .filter(|transcoding| transcoding.protocol() == Some(PROGRESSIVE_PROTOCOL))
            .find_map(|transcoding| transcoding.url.filter(|url| !url.is_empty()));

        let transcoding_url = match transcoding_url {
            Some(url) => url,
            None => {
                warn!(%track_id, "Track has no progressive transcoding");
                return Ok(None);
            }
        };

        let mut stream_endpoint = Url::parse(&transcoding_url)?;
        stream_endpoint
            .query_pairs_mut()
            .append_pair("client_id", credentials.client_id.trim());

        let response = self.transport.fetch(stream_endpoint.as_str()).await?;

        if !response.is_success() {
            return Err(ResolveError::UpstreamError {
                context: "Unable to fetch the audio stream",
                status: response.status,
            });
        }

        let stream: StreamUrl = serde_json::from_str(&response.body)?;

        Ok(stream.url.filter(|url| !url.is_empty()))
    }

    fn credential_params(credentials: &Credentials) -> Vec<(&'static str, &str)> {
        let mut params = vec![("client_id", credentials.client_id.trim())];

        if let Some(token) = credentials.oauth_token() {
            params.push(("oauth_token", token));
        }

        params
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ResolveError> {
        Ok(Url::parse_with_params(
            &format!("{}{}", self.api_base, path),
            params,
        )?)
    }
}
