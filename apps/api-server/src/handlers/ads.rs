//! Ad handlers.

use actix_multipart::{Multipart, MultipartError};
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use serde::Deserialize;

use bazaar_core::ads;
use bazaar_core::domain::{AdDetail, AdPatch, NewAd};
use bazaar_core::ports::{ImageStorage, ImageUpload};
use bazaar_shared::dto::{
    AdListItem, AdListResponse, AdResponse, CreateAdRequest, ImageUploadResponse, StatusResponse,
    UpdateAdRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// Name of the multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Raw page number; anything unparsable falls back to the first page.
    pub page: Option<String>,
}

fn ad_response(detail: AdDetail) -> AdResponse {
    AdResponse {
        id: detail.ad.id,
        name: detail.ad.name,
        author: detail.author_username,
        price: detail.ad.price,
        description: detail.ad.description,
        address: detail.address,
        is_published: detail.ad.is_published,
        category: detail.category_name,
    }
}

fn list_item(images: &dyn ImageStorage, detail: AdDetail) -> AdListItem {
    let image = detail
        .ad
        .image
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| images.url(path))
        .unwrap_or_default();

    AdListItem {
        ad: ad_response(detail),
        image,
    }
}

/// GET /ad/
pub async fn list_ads(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = ads::list_ads(&state.repos, query.page.as_deref())
        .await?
        .map(|detail| list_item(state.images.as_ref(), detail));

    Ok(HttpResponse::Ok().json(AdListResponse {
        total: page.total,
        num_pages: page.num_pages,
        items: page.items,
    }))
}

/// GET /ad/{id}/
pub async fn get_ad(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let detail = ads::get_ad(&state.repos, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ad_response(detail)))
}

/// POST /ad/create/
pub async fn create_ad(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreateAdRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_ad = NewAd {
        name: req.name,
        author_id: req.author_id,
        category_id: req.category_id,
        price: req.price,
        description: req.description,
        is_published: req.is_published,
        image: req.image,
    };

    let detail = ads::create_ad(&state.repos, new_ad).await?;
    tracing::info!(request_id = request_id.as_str(), ad_id = detail.ad.id, "Ad created");

    Ok(HttpResponse::Ok().json(ad_response(detail)))
}

/// PATCH /ad/{id}/update/
pub async fn update_ad(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateAdRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = AdPatch {
        name: req.name,
        author_id: req.author_id,
        price: req.price,
        description: req.description,
        is_published: req.is_published,
    };

    let id = path.into_inner();
    if patch.is_empty() {
        tracing::debug!(ad_id = id, "Update without recognized fields");
    }

    let detail = ads::update_ad(&state.repos, id, patch).await?;
    Ok(HttpResponse::Ok().json(ad_response(detail)))
}

/// DELETE /ad/{id}/delete/
pub async fn delete_ad(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    ads::delete_ad(&state.repos, id).await?;
    tracing::info!(request_id = request_id.as_str(), ad_id = id, "Ad deleted");

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// POST /ad/{id}/upload_image/ (multipart, file field `image`)
pub async fn upload_image(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    // Unknown ads are rejected before the body is read.
    ads::find_ad(&state.repos, id).await?;

    let upload = read_image(payload, state.max_upload_bytes)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("No '{IMAGE_FIELD}' file supplied")))?;

    let ad = ads::attach_image(&state.repos, state.images.as_ref(), id, upload).await?;
    let path = ad.image.unwrap_or_default();
    tracing::info!(request_id = request_id.as_str(), ad_id = id, image = %path, "Ad image replaced");

    Ok(HttpResponse::Ok().json(ImageUploadResponse {
        id: ad.id,
        image: state.images.url(&path),
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}

/// Drain the multipart body and keep the last file sent as `image`.
///
/// Parts without a file name are form values, not files, and are skipped.
async fn read_image(mut payload: Multipart, limit: usize) -> AppResult<Option<ImageUpload>> {
    let mut image = None;

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        let wanted = field.name() == Some(IMAGE_FIELD) && filename.is_some();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if !wanted {
                continue;
            }
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image exceeds {limit} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if let (true, Some(filename)) = (wanted, filename) {
            image = Some(ImageUpload { filename, bytes });
        }
    }

    Ok(image)
}
