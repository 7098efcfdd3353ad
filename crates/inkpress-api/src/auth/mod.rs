//! Bearer-token decoding. Tokens are issued by the authentication
//! collaborator; this crate only verifies them and builds a [`Principal`].
//!
//! [`Principal`]: inkpress_entity::user::Principal

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
