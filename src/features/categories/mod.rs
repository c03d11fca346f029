//! Category taxonomy.
//!
//! The catalog keeps categories as a flat list of parent pointers. The
//! console rebuilds an ordered forest from every fetched list, derives
//! inherited visibility at render time and applies visibility changes to
//! whole subtrees one record at a time.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Ordered tree with effective visibility |
//! | POST | `/api/categories` | Create a category |
//! | PATCH | `/api/categories/{id}` | Edit a category |
//! | DELETE | `/api/categories/{id}` | Delete (needs confirmation) |
//! | PUT | `/api/categories/{id}/visibility` | Cascade visibility over a subtree |
//! | GET | `/api/categories/parent-options` | Root categories for the parent picker |
//! | GET | `/api/categories/slug-preview` | Slug derived from a name |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tree;

pub use clients::{CategoryStore, HttpCategoryStore};
pub use services::CategoryService;
