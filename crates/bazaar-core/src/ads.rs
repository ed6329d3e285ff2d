//! Ad operations.
//!
//! Each operation is a single request/response round-trip over the
//! repository ports: look records up by primary key, apply the change,
//! persist it once and return the ad together with its related data.

use crate::domain::{Ad, AdDetail, AdPatch, Category, NewAd, User};
use crate::error::{DomainError, RepoError};
use crate::pagination::{ADS_PER_PAGE, Page, Paginator};
use crate::ports::{ImageStorage, ImageUpload, Repositories};

/// Fetch a single ad with its author, address and category.
pub async fn get_ad(repos: &Repositories, id: i64) -> Result<AdDetail, DomainError> {
    let ad = find_ad(repos, id).await?;
    load_detail(repos, ad).await
}

/// List ads by descending price, `ADS_PER_PAGE` per page.
///
/// `page` is the raw query value; see [`Paginator::resolve`].
pub async fn list_ads(
    repos: &Repositories,
    page: Option<&str>,
) -> Result<Page<AdDetail>, DomainError> {
    let total = repos.ads.count().await?;
    let paginator = Paginator::new(total, ADS_PER_PAGE);
    let number = paginator.resolve(page);

    let ads = repos.ads.list_page(number - 1, ADS_PER_PAGE).await?;
    let mut items = Vec::with_capacity(ads.len());
    for ad in ads {
        items.push(load_detail(repos, ad).await?);
    }

    Ok(Page {
        number,
        num_pages: paginator.num_pages(),
        total,
        items,
    })
}

/// Create an ad after resolving its author and category.
///
/// Nothing is written if either reference is missing.
pub async fn create_ad(repos: &Repositories, new_ad: NewAd) -> Result<AdDetail, DomainError> {
    let author = find_author(repos, new_ad.author_id).await?;
    let category = find_category(repos, new_ad.category_id).await?;

    let ad = repos.ads.create(new_ad).await?;
    let address = repos.users.location_names(author.id).await?;

    Ok(AdDetail {
        ad,
        author_username: author.username,
        address,
        category_name: category.name,
    })
}

/// Apply a partial update and save the ad once.
pub async fn update_ad(
    repos: &Repositories,
    id: i64,
    patch: AdPatch,
) -> Result<AdDetail, DomainError> {
    let mut ad = find_ad(repos, id).await?;
    if let Some(author_id) = patch.author_id {
        find_author(repos, author_id).await?;
    }

    patch.apply(&mut ad);
    let ad = repos.ads.save(ad).await?;
    load_detail(repos, ad).await
}

/// Delete an ad. The stored image, if any, is left in place.
pub async fn delete_ad(repos: &Repositories, id: i64) -> Result<(), DomainError> {
    match repos.ads.delete(id).await {
        Err(RepoError::NotFound) => Err(DomainError::not_found("Ad", id)),
        other => Ok(other?),
    }
}

/// Store an uploaded image and point the ad at it.
///
/// The previous image file is not removed.
pub async fn attach_image(
    repos: &Repositories,
    storage: &dyn ImageStorage,
    id: i64,
    upload: ImageUpload,
) -> Result<Ad, DomainError> {
    let mut ad = find_ad(repos, id).await?;
    if upload.filename.trim().is_empty() {
        return Err(DomainError::Validation("image file name is empty".to_string()));
    }

    ad.image = Some(storage.store(upload).await?);
    Ok(repos.ads.save(ad).await?)
}

/// Look an ad up by id, failing with `NotFound` when it does not exist.
pub async fn find_ad(repos: &Repositories, id: i64) -> Result<Ad, DomainError> {
    repos
        .ads
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Ad", id))
}

async fn find_author(repos: &Repositories, id: i64) -> Result<User, DomainError> {
    repos
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id))
}

async fn find_category(repos: &Repositories, id: i64) -> Result<Category, DomainError> {
    repos
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category", id))
}

async fn load_detail(repos: &Repositories, ad: Ad) -> Result<AdDetail, DomainError> {
    let author = find_author(repos, ad.author_id).await?;
    let category = find_category(repos, ad.category_id).await?;
    let address = repos.users.location_names(author.id).await?;

    Ok(AdDetail {
        ad,
        author_username: author.username,
        address,
        category_name: category.name,
    })
}
