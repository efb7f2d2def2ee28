//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use dm_core::entities::{MediaType, Message};
use dm_core::traits::{MessageQuery, MessageRepository, RepoResult};
use dm_core::value_objects::Snowflake;

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, sender_id, receiver_id,
                   content, media_url, media_type, is_read, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Page ending just before the cursor (scrolling up)
                let mut page = sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_id, receiver_id,
                           content, media_url, media_type, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await;

                // Responses are always oldest-first
                if let Ok(ref mut rows) = page {
                    rows.reverse();
                }
                page
            }
            (None, Some(after)) => {
                // Page starting just after the cursor (scrolling down)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_id, receiver_id,
                           content, media_url, media_type, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // First page of the log (no cursor)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_id, receiver_id,
                           content, media_url, media_type, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1
                    ORDER BY id ASC
                    LIMIT $2
                    "#,
                )
                .bind(conversation_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        // Single data-modifying statement: the message row and the
        // conversation's last-activity bump land together or not at all.
        sqlx::query(
            r#"
            WITH new_message AS (
                INSERT INTO messages (id, conversation_id, sender_id, receiver_id,
                                      content, media_url, media_type, is_read, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING conversation_id, created_at
            )
            UPDATE conversations c
            SET updated_at = new_message.created_at
            FROM new_message
            WHERE c.id = new_message.conversation_id
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.content)
        .bind(&message.media_url)
        .bind(message.media_type.map(MediaType::as_str))
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn last_in_conversation(
        &self,
        conversation_id: Snowflake,
    ) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, sender_id, receiver_id,
                   content, media_url, media_type, is_read, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(conversation_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<u64> {
        // false -> true only; rows already read are untouched, so the call
        // is idempotent
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE conversation_id = $1 AND receiver_id = $2 AND NOT is_read
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(receiver_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_unread(
        &self,
        conversation_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE conversation_id = $1 AND receiver_id = $2 AND NOT is_read
            "#,
        )
        .bind(conversation_id.into_inner())
        .bind(receiver_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
