pub mod brand;

pub use brand::{Brand, BrandId, BrandPayload};
