//! Database migrations for bracket service
//!
//! One file per migration: `DeriveMigrationName` names each migration after
//! its file stem.

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_bracket_participants;
mod m20250301_000002_create_bracket_matches;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_bracket_participants::Migration),
            Box::new(m20250301_000002_create_bracket_matches::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_migration_names_are_unique_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "m20250301_000001_create_bracket_participants",
                "m20250301_000002_create_bracket_matches",
            ]
        );
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
    }
}
