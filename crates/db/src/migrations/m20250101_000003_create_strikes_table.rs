//! Create strikes table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Strikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Strikes::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Strikes::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Strikes::Reason).string_len(255).not_null())
                    .col(ColumnDef::new(Strikes::Description).text().not_null())
                    .col(ColumnDef::new(Strikes::IssuedBy).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Strikes::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_strikes_user")
                            .from(Strikes::Table, Strikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_strikes_issuer")
                            .from(Strikes::Table, Strikes::IssuedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a trooper's strikes)
        manager
            .create_index(
                Index::create()
                    .name("idx_strikes_user_id")
                    .table(Strikes::Table)
                    .col(Strikes::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Strikes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Strikes {
    Table,
    Id,
    UserId,
    Reason,
    Description,
    IssuedBy,
    IssuedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
