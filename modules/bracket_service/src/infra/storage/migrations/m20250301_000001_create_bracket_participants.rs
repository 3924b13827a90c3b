use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BracketParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BracketParticipants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BracketParticipants::TournamentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BracketParticipants::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BracketParticipants::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(BracketParticipants::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bracket_participants_tournament_id")
                    .table(BracketParticipants::Table)
                    .col(BracketParticipants::TournamentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BracketParticipants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BracketParticipants {
    Table,
    Id,
    TournamentId,
    DisplayName,
    Status,
    RegisteredAt,
}
