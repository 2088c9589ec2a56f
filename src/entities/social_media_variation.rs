//! Supported social-media platform descriptor. Immutable reference data,
//! seeded by migration and only ever extended by administrators.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "social_media_variations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub icon: Option<String>,
    /// social-profile or contact-info
    #[sea_orm(column_type = "String(StringLen::N(32))")]
    pub kind: String,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub share_type: String,
    #[sea_orm(column_type = "String(StringLen::N(40))")]
    pub share_type_display: String,
    #[sea_orm(column_type = "String(StringLen::N(40))")]
    pub share_action_type: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub share_action_data_format: String,
    /// BrightID app registration used for verification; NULL means the
    /// variation cannot be verified.
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub bright_id_app_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::social_profile::Entity")]
    SocialProfile,
}

impl Related<super::social_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
