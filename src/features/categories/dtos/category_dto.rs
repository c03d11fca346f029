use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::{Category, CategoryId};
use crate::features::categories::services::{CascadeOutcome, CategoryForm, VisibilityChange};
use crate::features::categories::tree::{render_tree, CategoryForest};
use crate::shared::constants::MIN_SLUG_LENGTH;
use crate::shared::slug::slugify;

/// Rendered tree node.
///
/// `is_active` is the category's own flag, `effective_visible` also takes
/// every ancestor into account. Hidden nodes are still listed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub effective_visible: bool,
    /// Root whose `parent_id` names a category missing from the catalog
    pub orphaned: bool,
    /// A visibility change touching this node is in flight
    pub busy: bool,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    pub fn render(forest: &CategoryForest, busy: &HashSet<CategoryId>) -> Vec<CategoryTreeDto> {
        render_tree(forest, |node, effective_visible, children| {
            let c = node.category();
            CategoryTreeDto {
                id: c.id,
                parent_id: c.parent_id,
                name: c.name.clone(),
                slug: c.slug.clone(),
                is_active: c.is_active,
                effective_visible,
                orphaned: node.is_orphaned(),
                busy: busy.contains(&c.id),
                children,
            }
        })
    }
}

/// Request DTO for creating or editing a category. The slug is derived from the name.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveCategoryDto {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

fn default_active() -> bool {
    true
}

impl From<SaveCategoryDto> for CategoryForm {
    fn from(dto: SaveCategoryDto) -> Self {
        Self {
            name: dto.name,
            is_active: dto.is_active,
            parent_id: dto.parent_id,
        }
    }
}

/// Request DTO for a cascading visibility change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleVisibilityDto {
    pub is_active: bool,
}

/// Response DTO for a visibility change
#[derive(Debug, Serialize, ToSchema)]
pub struct VisibilityChangeDto {
    pub outcome: CascadeOutcome,
    /// Tree after the re-fetch, or the previous tree when the re-fetch failed
    pub tree: Vec<CategoryTreeDto>,
    pub refresh_error: Option<String>,
}

impl VisibilityChangeDto {
    pub fn new(change: VisibilityChange, busy: &HashSet<CategoryId>) -> Self {
        Self {
            tree: CategoryTreeDto::render(&change.forest, busy),
            outcome: change.outcome,
            refresh_error: change.refresh_error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParentOptionDto {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for ParentOptionDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ParentOptionsQuery {
    /// Category currently being edited, left out of the options
    pub editing: Option<CategoryId>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlugPreviewQuery {
    #[serde(default)]
    pub name: String,
}

/// Slug the catalog would receive for `name`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlugPreviewDto {
    pub name: String,
    pub slug: String,
    /// Long enough to be saved
    pub valid: bool,
}

impl SlugPreviewDto {
    pub fn for_name(name: &str) -> Self {
        let slug = slugify(name);
        Self {
            name: name.to_string(),
            valid: slug.chars().count() >= MIN_SLUG_LENGTH,
            slug,
        }
    }
}
