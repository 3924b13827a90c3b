//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Bracket matches table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "bracket_matches")]
pub struct Model {
    /// Match ID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning tournament
    pub tournament_id: Uuid,

    /// Round number, 1 = first round
    pub round: i32,

    /// Sequence number, unique per tournament
    pub match_number: i32,

    pub player1_id: Option<Uuid>,

    pub player2_id: Option<Uuid>,

    /// Match number feeding player1
    pub source_match1: Option<i32>,

    /// Match number feeding player2
    pub source_match2: Option<i32>,

    pub winner_id: Option<Uuid>,

    /// pending | in_progress | completed
    pub status: String,

    pub score1: Option<i64>,

    pub score2: Option<i64>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Participants module
pub mod participant {
    use sea_orm::entity::prelude::*;

    /// Bracket participants table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "bracket_participants")]
    pub struct Model {
        /// Participant ID (primary key)
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Owning tournament
        pub tournament_id: Uuid,

        pub display_name: String,

        /// pending | accepted | rejected | withdrawn
        pub status: String,

        /// Registration timestamp, used for seeding
        pub registered_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
