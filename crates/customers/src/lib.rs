pub mod client;
pub mod errors;
pub mod filter;
pub mod model;
pub mod validate;

pub use client::{CustomerClient, DEFAULT_BASE_URL};
pub use errors::ApiError;
pub use model::{Customer, CustomerDraft, Field, MEMBERSHIP_TYPES};
