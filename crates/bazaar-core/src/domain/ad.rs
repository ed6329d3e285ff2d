use serde::{Deserialize, Serialize};

/// Ad entity - an item listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub category_id: i64,
    pub price: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Path of the attached image relative to the media root.
    pub image: Option<String>,
}

/// Fields of an ad that does not exist yet. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAd {
    pub name: String,
    pub author_id: i64,
    pub category_id: i64,
    pub price: i32,
    pub description: Option<String>,
    pub is_published: bool,
    /// Image path relative to the media root, if one is already stored.
    pub image: Option<String>,
}

/// Partial update of an ad. Only fields that are `Some` are applied.
///
/// `description` is doubly optional: `Some(None)` clears it.
/// Category and image are not patchable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdPatch {
    pub name: Option<String>,
    pub author_id: Option<i64>,
    pub price: Option<i32>,
    pub description: Option<Option<String>>,
    pub is_published: Option<bool>,
}

impl AdPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.author_id.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.is_published.is_none()
    }

    /// Overwrite every field that is set in the patch.
    pub fn apply(self, ad: &mut Ad) {
        if let Some(name) = self.name {
            ad.name = name;
        }
        if let Some(author_id) = self.author_id {
            ad.author_id = author_id;
        }
        if let Some(price) = self.price {
            ad.price = price;
        }
        if let Some(description) = self.description {
            ad.description = description;
        }
        if let Some(is_published) = self.is_published {
            ad.is_published = is_published;
        }
    }
}

/// An ad together with the related data its representation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdDetail {
    pub ad: Ad,
    pub author_username: String,
    /// Names of the author's locations.
    pub address: Vec<String>,
    pub category_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ad() -> Ad {
        Ad {
            id: 7,
            name: "Bicycle".to_string(),
            author_id: 1,
            category_id: 2,
            price: 1500,
            description: Some("Barely used".to_string()),
            is_published: false,
            image: Some("ads/bike.jpg".to_string()),
        }
    }

    #[test]
    fn test_price_only_patch_keeps_other_fields() {
        let mut ad = sample_ad();
        AdPatch {
            price: Some(900),
            ..Default::default()
        }
        .apply(&mut ad);

        let expected = Ad {
            price: 900,
            ..sample_ad()
        };
        assert_eq!(ad, expected);
    }

    #[test]
    fn test_patch_can_clear_description_and_toggle_flag() {
        let mut ad = sample_ad();
        AdPatch {
            description: Some(None),
            is_published: Some(true),
            ..Default::default()
        }
        .apply(&mut ad);

        assert_eq!(ad.description, None);
        assert!(ad.is_published);
        assert_eq!(ad.image.as_deref(), Some("ads/bike.jpg"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(AdPatch::default().is_empty());
        assert!(
            !AdPatch {
                author_id: Some(3),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
