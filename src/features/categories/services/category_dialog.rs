//! Edit and delete dialog sessions driven by an embedding console.

use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryId};
use crate::features::categories::services::category_service::{
    CategoryForm, CategoryService, SaveTarget,
};
use crate::features::categories::tree::CategoryForest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(CategoryId),
}

impl From<DialogMode> for SaveTarget {
    fn from(mode: DialogMode) -> Self {
        match mode {
            DialogMode::Create => SaveTarget::Create,
            DialogMode::Edit(id) => SaveTarget::Edit(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryDialog {
    #[default]
    Closed,
    Open {
        mode: DialogMode,
        form: CategoryForm,
        /// Last validation or remote failure shown to the operator
        message: Option<String>,
    },
}

impl CategoryDialog {
    /// Empty form, optionally preselecting a parent
    pub fn open_create(parent_id: Option<CategoryId>) -> Self {
        CategoryDialog::Open {
            mode: DialogMode::Create,
            form: CategoryForm {
                parent_id,
                ..Default::default()
            },
            message: None,
        }
    }

    /// Form prefilled from the record being edited
    pub fn open_edit(category: &Category) -> Self {
        CategoryDialog::Open {
            mode: DialogMode::Edit(category.id),
            form: CategoryForm::from(category),
            message: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CategoryDialog::Open { .. })
    }

    pub fn form_mut(&mut self) -> Option<&mut CategoryForm> {
        match self {
            CategoryDialog::Open { form, .. } => Some(form),
            CategoryDialog::Closed => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            CategoryDialog::Open { message, .. } => message.as_deref(),
            CategoryDialog::Closed => None,
        }
    }

    pub fn close(&mut self) {
        *self = CategoryDialog::Closed;
    }

    /// Save the form. Success closes the dialog and returns the re-fetched
    /// forest; any failure keeps it open with the message set.
    pub async fn submit(&mut self, service: &CategoryService) -> Option<Arc<CategoryForest>> {
        let CategoryDialog::Open {
            mode,
            form,
            message,
        } = self
        else {
            return None;
        };

        match service.save((*mode).into(), form).await {
            Ok(forest) => {
                self.close();
                Some(forest)
            }
            Err(e) => {
                *message = Some(e.user_message());
                None
            }
        }
    }
}

/// Confirmation gate in front of a category deletion
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeleteDialog {
    #[default]
    Idle,
    Pending {
        id: CategoryId,
        message: Option<String>,
    },
}

impl DeleteDialog {
    pub fn request(&mut self, id: CategoryId) {
        *self = DeleteDialog::Pending { id, message: None };
    }

    pub fn cancel(&mut self) {
        *self = DeleteDialog::Idle;
    }

    /// Issue the confirmed deletion. A failure keeps the request pending.
    pub async fn confirm(&mut self, service: &CategoryService) -> Result<Arc<CategoryForest>> {
        let DeleteDialog::Pending { id, message } = self else {
            return Err(AppError::BadRequest("No deletion is pending".to_string()));
        };

        match service.delete(*id, true).await {
            Ok(forest) => {
                *self = DeleteDialog::Idle;
                Ok(forest)
            }
            Err(e) => {
                *message = Some(e.user_message());
                Err(e)
            }
        }
    }
}
