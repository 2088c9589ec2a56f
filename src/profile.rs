use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

pub const MAX_HASH_VALUE_LEN: usize = 32;
pub const UPDATE_HASH_CAP: usize = 3;
pub const DEFAULT_REGISTRATION_HASH_LIMIT: usize = 3;
pub const DEFAULT_QUERY_HASH_LIMIT: usize = 100;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_VERIFIED: &str = "verified";

/// BrightID network instance a profile is registered against. The value is
/// also the subdomain of the verification endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightIdNetwork {
    Node,
    App,
}

impl BrightIdNetwork {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::App => "app",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "node" => Ok(Self::Node),
            "app" => Ok(Self::App),
            other => Err(anyhow!("Unsupported BrightID network: {other}")),
        }
    }
}

impl Default for BrightIdNetwork {
    fn default() -> Self {
        Self::Node
    }
}

/// Verification state of a profile. `Pending -> Verified` fires exactly once
/// on a successful verifier call; there is no transition out of `Verified`
/// and no explicit failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Verified => STATUS_VERIFIED,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_VERIFIED => Ok(Self::Verified),
            other => Err(anyhow!("Unknown verification status: {other}")),
        }
    }

    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Broad category of a variation: a profile on a platform, or a direct
/// contact detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariationKind {
    SocialProfile,
    ContactInfo,
}

impl VariationKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "social-profile" => Ok(Self::SocialProfile),
            "contact-info" => Ok(Self::ContactInfo),
            other => Err(anyhow!("Unknown variation kind: {other}")),
        }
    }
}

/// Accepted sharing format of the identifier itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareType {
    Username,
    Telephone,
    Url,
    Email,
}

impl ShareType {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "username" => Ok(Self::Username),
            "telephone" => Ok(Self::Telephone),
            "url" => Ok(Self::Url),
            "email" => Ok(Self::Email),
            other => Err(anyhow!("Unknown share type: {other}")),
        }
    }
}

/// Display label for the sharing format; a superset of ShareType for
/// platforms that accept either a username or a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareTypeDisplay {
    Username,
    Telephone,
    Url,
    Email,
    UsernameOrTelephone,
}

impl ShareTypeDisplay {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "username" => Ok(Self::Username),
            "telephone" => Ok(Self::Telephone),
            "url" => Ok(Self::Url),
            "email" => Ok(Self::Email),
            "username-or-telephone" => Ok(Self::UsernameOrTelephone),
            other => Err(anyhow!("Unknown share type display: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareActionType {
    OpenLink,
    Copy,
    CopyIfPhoneLinkIfUsername,
}

impl ShareActionType {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "open-link" => Ok(Self::OpenLink),
            "copy" => Ok(Self::Copy),
            "copy-if-phone-link-if-username" => Ok(Self::CopyIfPhoneLinkIfUsername),
            other => Err(anyhow!("Unknown share action type: {other}")),
        }
    }
}

/// Validates a submitted hash list against a path-specific cap. Every value
/// must be non-empty and at most MAX_HASH_VALUE_LEN characters.
pub fn validate_hash_values(values: &[String], cap: usize) -> Result<()> {
    assert!(cap > 0, "Hash cap must be positive");
    assert!(cap <= 10_000, "Hash cap exceeds bounds");
    if values.is_empty() {
        return Err(anyhow!("profile_hashes must not be empty"));
    }
    if values.len() > cap {
        return Err(anyhow!(
            "profile_hashes exceeds the limit of {cap} entries, got {}",
            values.len()
        ));
    }
    for value in values {
        if value.is_empty() {
            return Err(anyhow!("profile_hashes entries must not be empty"));
        }
        if value.len() > MAX_HASH_VALUE_LEN {
            return Err(anyhow!(
                "profile_hashes entries must be at most {MAX_HASH_VALUE_LEN} characters"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_parse_is_case_insensitive() {
        assert_eq!(BrightIdNetwork::parse("NODE").unwrap(), BrightIdNetwork::Node);
        assert_eq!(BrightIdNetwork::parse(" app ").unwrap(), BrightIdNetwork::App);
        assert!(BrightIdNetwork::parse("test").is_err());
    }

    #[test]
    fn network_default_is_node() {
        assert_eq!(BrightIdNetwork::default(), BrightIdNetwork::Node);
    }

    #[test]
    fn status_roundtrip() {
        assert_eq!(
            VerificationStatus::parse(STATUS_PENDING).unwrap(),
            VerificationStatus::Pending
        );
        assert_eq!(
            VerificationStatus::parse(STATUS_VERIFIED).unwrap(),
            VerificationStatus::Verified
        );
        assert!(VerificationStatus::parse("failed").is_err());
        assert!(VerificationStatus::Verified.is_verified());
        assert!(!VerificationStatus::Pending.is_verified());
    }

    #[test]
    fn hash_list_bounds() {
        let three: Vec<String> = (0..3).map(|i| format!("hash{i}")).collect();
        assert!(validate_hash_values(&three, 3).is_ok());

        let four: Vec<String> = (0..4).map(|i| format!("hash{i}")).collect();
        assert!(validate_hash_values(&four, 3).is_err());

        assert!(validate_hash_values(&[], 3).is_err());
    }

    #[test]
    fn hash_value_length_enforced() {
        let max = vec!["a".repeat(MAX_HASH_VALUE_LEN)];
        assert!(validate_hash_values(&max, 3).is_ok());

        let over = vec!["a".repeat(MAX_HASH_VALUE_LEN + 1)];
        assert!(validate_hash_values(&over, 3).is_err());

        let empty = vec![String::new()];
        assert!(validate_hash_values(&empty, 3).is_err());
    }

    #[test]
    fn variation_enums_cover_stored_values() {
        assert_eq!(
            VariationKind::parse("social-profile").unwrap(),
            VariationKind::SocialProfile
        );
        assert_eq!(ShareType::parse("telephone").unwrap(), ShareType::Telephone);
        assert!(ShareType::parse("username-or-telephone").is_err());
        assert_eq!(
            ShareTypeDisplay::parse("username-or-telephone").unwrap(),
            ShareTypeDisplay::UsernameOrTelephone
        );
        assert_eq!(
            ShareActionType::parse("copy-if-phone-link-if-username").unwrap(),
            ShareActionType::CopyIfPhoneLinkIfUsername
        );
        assert!(ShareActionType::parse("paste").is_err());
    }

    #[test]
    fn share_enum_wire_format_is_kebab_case() {
        let json = serde_json::to_string(&ShareActionType::OpenLink).expect("serialize action");
        assert_eq!(json, "\"open-link\"");
        let json = serde_json::to_string(&ShareTypeDisplay::UsernameOrTelephone)
            .expect("serialize display");
        assert_eq!(json, "\"username-or-telephone\"");
    }

    #[test]
    fn network_serde_wire_format() {
        let json = serde_json::to_string(&BrightIdNetwork::Node).expect("serialize network");
        assert_eq!(json, "\"node\"");
        let parsed: BrightIdNetwork = serde_json::from_str("\"app\"").expect("deserialize network");
        assert_eq!(parsed, BrightIdNetwork::App);
    }
}
