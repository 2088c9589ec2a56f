use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthTokens::Key)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthTokens::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AuthTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_tokens_account")
                            .from(AuthTokens::Table, AuthTokens::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialMediaVariations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialMediaVariations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SocialMediaVariations::Icon).text().null())
                    .col(
                        ColumnDef::new(SocialMediaVariations::Kind)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::ShareType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::ShareTypeDisplay)
                            .string_len(40)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::ShareActionType)
                            .string_len(40)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::ShareActionDataFormat)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaVariations::BrightIdAppId)
                            .string_len(50)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SocialProfiles::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SocialProfiles::Network)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialProfiles::VerificationStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialProfiles::VariationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_social_profiles_account")
                            .from(SocialProfiles::Table, SocialProfiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_social_profiles_variation")
                            .from(SocialProfiles::Table, SocialProfiles::VariationId)
                            .to(SocialMediaVariations::Table, SocialMediaVariations::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileHashes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfileHashes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProfileHashes::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileHashes::Value)
                            .string_len(32)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_hashes_profile")
                            .from(ProfileHashes::Table, ProfileHashes::ProfileId)
                            .to(SocialProfiles::Table, SocialProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup path filters on the raw hash value.
        manager
            .create_index(
                Index::create()
                    .name("idx_profile_hashes_value")
                    .table(ProfileHashes::Table)
                    .col(ProfileHashes::Value)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileHashes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialMediaVariations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Key,
    AccountId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SocialMediaVariations {
    Table,
    Id,
    Name,
    Icon,
    Kind,
    ShareType,
    ShareTypeDisplay,
    ShareActionType,
    ShareActionDataFormat,
    BrightIdAppId,
}

#[derive(DeriveIden)]
enum SocialProfiles {
    Table,
    Id,
    AccountId,
    Network,
    VerificationStatus,
    VariationId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProfileHashes {
    Table,
    Id,
    ProfileId,
    Value,
}
