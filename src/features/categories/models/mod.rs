pub mod category;

pub use category::{Category, CategoryId, CategoryPatch, NewCategory};
