pub mod authenticated_client;

pub use authenticated_client::AuthenticatedClient;
