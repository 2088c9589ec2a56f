use anyhow::{Context, Error, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::social_media_variation;
use crate::profile::{
    BrightIdNetwork, ShareActionType, ShareType, ShareTypeDisplay, VariationKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariationView {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub kind: VariationKind,
    pub share_type: ShareType,
    pub share_type_display: ShareTypeDisplay,
    pub share_action_type: ShareActionType,
    pub share_action_data_format: String,
    pub bright_id_app_id: Option<String>,
}

impl TryFrom<social_media_variation::Model> for VariationView {
    type Error = Error;

    /// Stored choice strings are parsed into the closed enums here; a row
    /// that fails to parse is corrupt reference data.
    fn try_from(model: social_media_variation::Model) -> Result<Self> {
        let kind = VariationKind::parse(&model.kind)
            .with_context(|| format!("Variation {}", model.id))?;
        let share_type = ShareType::parse(&model.share_type)
            .with_context(|| format!("Variation {}", model.id))?;
        let share_type_display = ShareTypeDisplay::parse(&model.share_type_display)
            .with_context(|| format!("Variation {}", model.id))?;
        let share_action_type = ShareActionType::parse(&model.share_action_type)
            .with_context(|| format!("Variation {}", model.id))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            icon: model.icon,
            kind,
            share_type,
            share_type_display,
            share_action_type,
            share_action_data_format: model.share_action_data_format,
            bright_id_app_id: model.bright_id_app_id,
        })
    }
}

/// Body returned from registration: the public profile id plus the issued
/// bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCreatedView {
    pub profile: Uuid,
    pub token: String,
    pub network: BrightIdNetwork,
    pub variation: Uuid,
    pub profile_hashes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryMatchView {
    pub profile_hash: String,
    pub variation: VariationView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variation_model() -> social_media_variation::Model {
        social_media_variation::Model {
            id: Uuid::nil(),
            name: "Twitter".to_string(),
            icon: None,
            kind: "social-profile".to_string(),
            share_type: "username".to_string(),
            share_type_display: "username".to_string(),
            share_action_type: "open-link".to_string(),
            share_action_data_format: "https://twitter.com/{username}".to_string(),
            bright_id_app_id: Some("twitter".to_string()),
        }
    }

    #[test]
    fn variation_view_parses_stored_choices() {
        let view = VariationView::try_from(variation_model()).expect("valid row converts");
        assert_eq!(view.kind, VariationKind::SocialProfile);
        assert_eq!(view.share_type, ShareType::Username);
        assert_eq!(view.share_action_type, ShareActionType::OpenLink);
    }

    #[test]
    fn variation_view_rejects_corrupt_row() {
        let mut model = variation_model();
        model.share_action_type = "teleport".to_string();
        assert!(VariationView::try_from(model).is_err());
    }
}
