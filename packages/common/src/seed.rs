use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;

use crate::entity::language;

/// Seed the `language` table with [`language::SUPPORTED_LANGUAGES`].
///
/// Existing rows are left alone, so this is safe to run on every startup.
pub async fn seed_languages<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(code, name) in language::SUPPORTED_LANGUAGES {
        let model = language::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
        };

        let result = language::Entity::insert(model)
            .on_conflict(
                OnConflict::column(language::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(rows) => inserted += rows as u32,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new languages", inserted);
    }

    Ok(())
}
