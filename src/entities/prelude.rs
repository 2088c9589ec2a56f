#![allow(unused_imports)]

pub use super::account::Entity as Account;
pub use super::auth_token::Entity as AuthToken;
pub use super::profile_hash::Entity as ProfileHash;
pub use super::social_media_variation::Entity as SocialMediaVariation;
pub use super::social_profile::Entity as SocialProfile;
