//! A social-media profile claim. The row id doubles as the public app-user
//! id sent to BrightID during verification.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "social_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub network: String,
    /// pending or verified; never transitions out of verified.
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub verification_status: String,
    pub variation_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::social_media_variation::Entity",
        from = "Column::VariationId",
        to = "super::social_media_variation::Column::Id"
    )]
    SocialMediaVariation,
    #[sea_orm(has_many = "super::profile_hash::Entity")]
    ProfileHash,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::social_media_variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialMediaVariation.def()
    }
}

impl Related<super::profile_hash::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileHash.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
