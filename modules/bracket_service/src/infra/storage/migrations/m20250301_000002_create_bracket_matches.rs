use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BracketMatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BracketMatches::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BracketMatches::TournamentId).uuid().not_null())
                    .col(ColumnDef::new(BracketMatches::Round).integer().not_null())
                    .col(ColumnDef::new(BracketMatches::MatchNumber).integer().not_null())
                    .col(ColumnDef::new(BracketMatches::Player1Id).uuid())
                    .col(ColumnDef::new(BracketMatches::Player2Id).uuid())
                    .col(ColumnDef::new(BracketMatches::SourceMatch1).integer())
                    .col(ColumnDef::new(BracketMatches::SourceMatch2).integer())
                    .col(ColumnDef::new(BracketMatches::WinnerId).uuid())
                    .col(
                        ColumnDef::new(BracketMatches::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(BracketMatches::Score1).big_integer())
                    .col(ColumnDef::new(BracketMatches::Score2).big_integer())
                    .col(
                        ColumnDef::new(BracketMatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BracketMatches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One match number per tournament
        manager
            .create_index(
                Index::create()
                    .name("idx_bracket_matches_tournament_number")
                    .table(BracketMatches::Table)
                    .col(BracketMatches::TournamentId)
                    .col(BracketMatches::MatchNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bracket_matches_tournament_round")
                    .table(BracketMatches::Table)
                    .col(BracketMatches::TournamentId)
                    .col(BracketMatches::Round)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BracketMatches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BracketMatches {
    Table,
    Id,
    TournamentId,
    Round,
    MatchNumber,
    Player1Id,
    Player2Id,
    SourceMatch1,
    SourceMatch2,
    WinnerId,
    Status,
    Score1,
    Score2,
    CreatedAt,
    UpdatedAt,
}
