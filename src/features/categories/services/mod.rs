pub mod cascade_executor;
pub mod category_dialog;
pub mod category_service;

pub use cascade_executor::{BusyGuard, BusyIds, CascadeExecutor, CascadeOutcome, CascadeReport};
pub use category_dialog::{CategoryDialog, DeleteDialog, DialogMode};
pub use category_service::{CategoryForm, CategoryService, SaveTarget, VisibilityChange};
