use crate::{Credentials, TrackId};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown artist";

const ARTWORK_SIZE_TOKEN: &str = "large";
const ARTWORK_LARGE_SIZE_TOKEN: &str = "t500x500";

/// Body the UI sends for both operations.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl TrackRequest {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.client_id.clone(), self.access_token.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MediaDescriptor {
    pub(crate) fn downloadable(title: String, download_url: String) -> Self {
        Self {
            success: true,
            title: Some(title),
            download_url: Some(download_url),
            error: None,
        }
    }

    pub(crate) fn failed(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDescriptor {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PreviewDescriptor {
    pub(crate) fn from_record(record: &TrackRecord) -> Self {
        Self {
            success: true,
            title: record.title().map(str::to_string),
            artist: Some(record.artist_name().to_string()),
            artwork_url: Some(record.large_artwork_url()),
            duration: record.duration(),
            error: None,
        }
    }

    pub(crate) fn failed(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            ..Self::default()
        }
    }
}

/// A resolved track. Built once from the `/resolve` response and only read
/// afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackRecord {
    id: TrackId,
    title: Option<String>,
    artwork_url: Option<String>,
    duration: Option<u64>,
    artist_name: String,
}

impl TrackRecord {
    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.artwork_url.as_deref()
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Artwork with the `large` size token swapped for `t500x500`, or an empty
    /// string when the track has no artwork.
    pub fn large_artwork_url(&self) -> String {
        match &self.artwork_url {
            Some(url) => url.replacen(ARTWORK_SIZE_TOKEN, ARTWORK_LARGE_SIZE_TOKEN, 1),
            None => String::new(),
        }
    }

    /// Title used for the downloaded file name.
    pub fn display_title(&self) -> String {
        match self.title() {
            Some(title) => title.to_string(),
            None => self.id.to_string(),
        }
    }

    pub(crate) fn from_track(track: SoundcloudTrack) -> Self {
        let artist_name = track
            .user
            .and_then(|user| user.username)
            .filter(|username| !username.is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Self {
            id: TrackId(track.id),
            title: track.title,
            artwork_url: track.artwork_url.filter(|url| !url.is_empty()),
            duration: track.duration,
            artist_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SoundcloudUser {
    pub(crate) username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SoundcloudTrack {
    pub(crate) id: u64,
    pub(crate) title: Option<String>,
    pub(crate) artwork_url: Option<String>,
    pub(crate) duration: Option<u64>,
    pub(crate) user: Option<SoundcloudUser>,
    #[serde(default)]
    pub(crate) media: Option<SoundcloudMedia>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SoundcloudMedia {
    #[serde(default)]
    pub(crate) transcodings: Vec<Transcoding>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscodingFormat {
    pub(crate) protocol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Transcoding {
    pub(crate) url: Option<String>,
    pub(crate) format: Option<TranscodingFormat>,
    pub(crate) protocol: Option<String>,
}

impl Transcoding {
    pub(crate) fn protocol(&self) -> Option<&str> {
        self.format
            .as_ref()
            .and_then(|format| format.protocol.as_deref())
            .or(self.protocol.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamUrl {
    pub(crate) url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StreamsResponse {
    pub(crate) http_mp3_128_url: Option<String>,
    pub(crate) hls_mp3_128_url: Option<String>,
    #[serde(default)]
    pub(crate) progressive: Vec<StreamUrl>,
    #[serde(default)]
    pub(crate) hls: Vec<StreamUrl>,
}

fn non_empty(url: Option<&String>) -> Option<&str> {
    url.map(String::as_str).filter(|url| !url.is_empty())
}

impl StreamsResponse {
    /// Direct MP3, then MP3 over HLS, then the first progressive and HLS
    /// entries.
    pub(crate) fn best_url(&self) -> Option<&str> {
        non_empty(self.http_mp3_128_url.as_ref())
            .or_else(|| non_empty(self.hls_mp3_128_url.as_ref()))
            .or_else(|| non_empty(self.progressive.first().and_then(|s| s.url.as_ref())))
            .or_else(|| non_empty(self.hls.first().and_then(|s| s.url.as_ref())))
    }
}
