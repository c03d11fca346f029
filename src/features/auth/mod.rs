//! Operator sign-in and the authenticated HTTP client.
//!
//! The console signs in against the auth service with a one-time e-mail
//! code. The resulting access token is held in memory and attached to every
//! catalog call by [`AuthenticatedClient`], which refreshes it once on a 401.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/login` | E-mail a one-time code |
//! | POST | `/api/auth/confirm` | Exchange the code for a session |
//! | POST | `/api/auth/logout` | Drop the session |
//! | GET | `/api/auth/session` | Session state |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod session;

pub use clients::AuthenticatedClient;
pub use services::AuthService;
pub use session::SessionStore;
