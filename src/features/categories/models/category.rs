use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// Category record as owned by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// Body of `POST /categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub parent_id: Option<CategoryId>,
}

/// Body of `PATCH /categories/{id}`; absent fields are left untouched.
///
/// `parent_id` is doubly optional: `Some(None)` serializes as `null` and
/// detaches the category, `None` leaves the parent as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<CategoryId>>,
}

impl CategoryPatch {
    /// Patch that only flips the own-visibility flag
    pub fn visibility(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}

impl From<NewCategory> for CategoryPatch {
    fn from(c: NewCategory) -> Self {
        Self {
            name: Some(c.name),
            slug: Some(c.slug),
            is_active: Some(c.is_active),
            parent_id: Some(c.parent_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visibility_patch_only_carries_is_active() {
        let body = serde_json::to_value(CategoryPatch::visibility(false)).unwrap();
        assert_eq!(body, json!({"is_active": false}));
    }

    #[test]
    fn test_full_patch_sends_null_parent() {
        let patch: CategoryPatch = NewCategory {
            name: "Худи".to_string(),
            slug: "hudi".to_string(),
            is_active: true,
            parent_id: None,
        }
        .into();
        let body = serde_json::to_value(patch).unwrap();
        assert_eq!(
            body,
            json!({"name": "Худи", "slug": "hudi", "is_active": true, "parent_id": null})
        );
    }

    #[test]
    fn test_category_accepts_missing_parent_field() {
        let category: Category = serde_json::from_value(
            json!({"id": 1, "name": "Shoes", "slug": "shoes", "is_active": true}),
        )
        .unwrap();
        assert_eq!(category.parent_id, None);
    }
}
