use crate::services::CredentialsProvider;
use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use std::sync::Arc;
use track_resolver::{TrackRequest, TrackResolver};
use tracing::info;
use uuid::Uuid;

pub(crate) async fn resolve_track_info(
    track_resolver: Data<Arc<TrackResolver>>,
    credentials_provider: Data<Arc<CredentialsProvider>>,
    request: Json<TrackRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let credentials = credentials_provider.credentials_for(&request);

    info!(%request_id, url = %request.url, "Track info requested");

    let descriptor = track_resolver
        .resolve_info(&request.url, &credentials)
        .await;

    info!(%request_id, success = descriptor.success, "Track info request finished");

    HttpResponse::Ok().json(descriptor)
}

pub(crate) async fn resolve_track_preview(
    track_resolver: Data<Arc<TrackResolver>>,
    credentials_provider: Data<Arc<CredentialsProvider>>,
    request: Json<TrackRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let credentials = credentials_provider.credentials_for(&request);

    info!(%request_id, url = %request.url, "Track preview requested");

    let descriptor = track_resolver
        .resolve_preview(&request.url, &credentials)
        .await;

    info!(%request_id, success = descriptor.success, "Track preview request finished");

    HttpResponse::Ok().json(descriptor)
}
