use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial variation catalog. Reference data only; administrators extend it
/// out of band. `bright_id_app_id` is NULL for variations that BrightID has
/// no app registration for, which makes them unverifiable by design.
const SEED_SQL: &str = r#"
INSERT INTO social_media_variations
    (id, name, icon, kind, share_type, share_type_display, share_action_type, share_action_data_format, bright_id_app_id)
VALUES
    ('30df9830-2b8d-4313-bd8a-bc2e90d0f02b', 'Twitter', NULL, 'social-profile', 'username', 'username', 'open-link', 'https://twitter.com/{username}', 'twitter'),
    ('ec2a1d55-3c11-4b5a-9a73-6de0f5cf8c0e', 'Instagram', NULL, 'social-profile', 'username', 'username', 'open-link', 'https://instagram.com/{username}', 'instagram'),
    ('7faf5941-7e66-4a02-9797-1bfe8e1b8f0a', 'Telegram', NULL, 'social-profile', 'username', 'username-or-telephone', 'copy-if-phone-link-if-username', 'https://t.me/{username}', 'telegram'),
    ('da0dfb2c-8ef4-4d59-acd8-27b1f83c1f95', 'LinkedIn', NULL, 'social-profile', 'url', 'url', 'open-link', '{url}', 'linkedin'),
    ('0e92b7e7-ee0c-4d3f-8fb5-7fbc10ce3c2b', 'Phone', NULL, 'contact-info', 'telephone', 'telephone', 'copy', '{telephone}', NULL),
    ('e3485b33-f7f1-46b4-a4e5-5eb860c5a89c', 'Email', NULL, 'contact-info', 'email', 'email', 'copy', 'mailto:{email}', NULL)
ON CONFLICT (id) DO NOTHING
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(SEED_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM social_media_variations")
            .await?;
        Ok(())
    }
}
