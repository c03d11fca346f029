//! Brand (manufacturer) management.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/brands` | Brands ordered by id |
//! | POST | `/api/brands` | Create a brand |
//! | PATCH | `/api/brands/{id}` | Edit a brand |
//! | DELETE | `/api/brands/{id}` | Delete (needs confirmation) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BrandService;
