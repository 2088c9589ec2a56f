pub mod account;
pub mod auth_token;
pub mod prelude;
pub mod profile_hash;
pub mod social_media_variation;
pub mod social_profile;
