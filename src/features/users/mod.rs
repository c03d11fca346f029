//! Console user management.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | All users |
//! | POST | `/api/users` | Create a user |
//! | PATCH | `/api/users/{id}` | Edit a user |
//! | DELETE | `/api/users/{id}` | Delete (needs confirmation) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
