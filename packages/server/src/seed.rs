use ladle_common::AccountKind;
use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::config::AdminBootstrapConfig;
use crate::entity::{account, message, notification, recipe, special_offer};
use crate::utils::hash;

/// Create the administrator account from config if no account uses that username.
///
/// An existing account is left untouched, including its password.
pub async fn bootstrap_admin(
    db: &DatabaseConnection,
    cfg: &AdminBootstrapConfig,
) -> anyhow::Result<()> {
    let existing = account::Entity::find()
        .filter(account::Column::Username.eq(&cfg.username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password = hash::hash_password(&cfg.password)
        .map_err(|e| anyhow::anyhow!("Password hash error: {e}"))?;
    let model = account::ActiveModel {
        username: Set(cfg.username.clone()),
        email: Set(cfg.email.clone()),
        password: Set(password),
        kind: Set(AccountKind::Plain),
        is_admin: Set(true),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_approved: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = account::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(account::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => info!(username = %cfg.username, "Bootstrapped administrator account"),
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        // Profile and feed listings: recipes by author, newest first.
        Index::create()
            .if_not_exists()
            .name("idx_recipe_author_created")
            .table(recipe::Entity)
            .col(recipe::Column::AuthorId)
            .col(recipe::Column::CreatedAt)
            .to_string(PostgresQueryBuilder),
        // Unread counts.
        Index::create()
            .if_not_exists()
            .name("idx_notification_recipient_read")
            .table(notification::Entity)
            .col(notification::Column::RecipientId)
            .col(notification::Column::IsRead)
            .to_string(PostgresQueryBuilder),
        // Conversation threads in either direction.
        Index::create()
            .if_not_exists()
            .name("idx_message_sender_recipient")
            .table(message::Entity)
            .col(message::Column::SenderId)
            .col(message::Column::RecipientId)
            .to_string(PostgresQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_message_recipient_sender")
            .table(message::Entity)
            .col(message::Column::RecipientId)
            .col(message::Column::SenderId)
            .to_string(PostgresQueryBuilder),
        // Feed offers: live offers ordered by start date.
        Index::create()
            .if_not_exists()
            .name("idx_offer_active_end")
            .table(special_offer::Entity)
            .col(special_offer::Column::IsActive)
            .col(special_offer::Column::EndDate)
            .to_string(PostgresQueryBuilder),
    ];

    for stmt in statements {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index: {}", stmt),
            Err(e) => tracing::warn!("Failed to create index ({}): {}", stmt, e),
        }
    }

    Ok(())
}
