//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Deserializer, Serialize};

/// Request to create an ad.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAdRequest {
    pub author_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Path of an image already under the media root.
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update of an ad. Absent keys are left untouched and keys
/// outside this set are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAdRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    /// `Some(None)` when the client sent `"description": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Representation of a single ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: i64,
    pub name: String,
    /// Username of the author.
    pub author: String,
    pub price: i32,
    pub description: Option<String>,
    /// Names of the author's locations.
    pub address: Vec<String>,
    pub is_published: bool,
    /// Category name.
    pub category: String,
}

/// Listing entry: the ad representation plus its image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdListItem {
    #[serde(flatten)]
    pub ad: AdResponse,
    /// Empty string when the ad has no image.
    pub image: String,
}

/// One page of the ad listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdListResponse {
    pub total: u64,
    pub num_pages: u64,
    pub items: Vec<AdListItem>,
}

/// Response to an image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub id: i64,
    pub image: String,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
