mod health;
mod track_resolution;

use actix_web::web;

pub(crate) use health::readiness_check;
pub(crate) use track_resolution::{resolve_track_info, resolve_track_preview};

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/info").route(web::post().to(resolve_track_info)))
        .service(web::resource("/preview").route(web::post().to(resolve_track_preview)))
        .service(web::resource("/health").route(web::get().to(readiness_check)));
}

#[cfg(test)]
mod tests {
    use super::configure;
    use crate::services::CredentialsProvider;
    use actix_web::web::Data;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use track_resolver::{TrackResolver, Transport, TransportError, TransportResponse};

    struct UpstreamMock {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for UpstreamMock {
        async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());

            let body = if url.contains("/resolve?") {
                json!({
                    "id": 293,
                    "title": "Flickermood",
                    "artwork_url": "https://i1.sndcdn.com/artworks-000-large.jpg",
                    "duration": 213000,
                    "user": {"username": "Forss"}
                })
            } else if url.contains("/i1/tracks/293/streams?") {
                json!({"http_mp3_128_url": "https://cf-media.sndcdn.com/a.mp3"})
            } else {
                return Ok(TransportResponse::new(404, ""));
            };

            Ok(TransportResponse::new(200, body.to_string()))
        }
    }

    fn app_data(
        default_client_id: Option<&str>,
    ) -> (Arc<UpstreamMock>, Arc<TrackResolver>, Arc<CredentialsProvider>) {
        let upstream = Arc::new(UpstreamMock {
            calls: Mutex::new(vec![]),
        });
        let resolver = Arc::new(TrackResolver::new(upstream.clone()));
        let credentials = Arc::new(CredentialsProvider::new(
            default_client_id.map(Into::into),
            None,
        ));

        (upstream, resolver, credentials)
    }

    #[actix_web::test]
    async fn test_info_endpoint_returns_media_descriptor() {
        let (_, resolver, credentials) = app_data(None);
        let app = test::init_service(
            App::new()
                .app_data(Data::new(resolver))
                .app_data(Data::new(credentials))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/info")
            .set_json(json!({
                "url": "https://soundcloud.com/forss/flickermood",
                "clientId": "client-123"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            json!({
                "success": true,
                "title": "Flickermood",
                "downloadUrl": "https://cf-media.sndcdn.com/a.mp3"
            }),
            body
        );
    }

    #[actix_web::test]
    async fn test_preview_endpoint_uses_default_client_id() {
        let (upstream, resolver, credentials) = app_data(Some("default-client"));
        let app = test::init_service(
            App::new()
                .app_data(Data::new(resolver))
                .app_data(Data::new(credentials))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/preview")
            .set_json(json!({"url": "https://soundcloud.com/forss/flickermood"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            json!({
                "success": true,
                "title": "Flickermood",
                "artist": "Forss",
                "artworkUrl": "https://i1.sndcdn.com/artworks-000-t500x500.jpg",
                "duration": 213000
            }),
            body
        );
        assert!(upstream.calls.lock().unwrap()[0].contains("client_id=default-client"));
    }

    #[actix_web::test]
    async fn test_missing_credentials_return_error_descriptor() {
        let (upstream, resolver, credentials) = app_data(None);
        let app = test::init_service(
            App::new()
                .app_data(Data::new(resolver))
                .app_data(Data::new(credentials))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/info")
            .set_json(json!({"url": "https://soundcloud.com/forss/flickermood"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(json!(false), body["success"]);
        assert!(body["error"].as_str().is_some());
        assert!(body.get("downloadUrl").is_none());
        assert!(upstream.calls.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let (_, resolver, credentials) = app_data(None);
        let app = test::init_service(
            App::new()
                .app_data(Data::new(resolver))
                .app_data(Data::new(credentials))
                .configure(configure),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert!(response.status().is_success());
    }
}
