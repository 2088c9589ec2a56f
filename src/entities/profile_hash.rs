//! One hashed representation of a profile's human-readable identifier.
//! A profile keeps several rows when equivalent spellings exist, e.g. a
//! phone number stored with and without the country code.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profile_hashes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub profile_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(32))")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::social_profile::Entity",
        from = "Column::ProfileId",
        to = "super::social_profile::Column::Id"
    )]
    SocialProfile,
}

impl Related<super::social_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
