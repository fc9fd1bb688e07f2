use crate::models::{Connection, NewConnection};
use anyhow::Result;
use sqlx::PgPool;

pub async fn create_connection(pool: &PgPool, new: &NewConnection) -> Result<Connection> {
    let connection = sqlx::query_as::<_, Connection>(
        r#"
        INSERT INTO connections (user_a, user_b, shared_mood)
        VALUES ($1, $2, $3)
        RETURNING id, user_a, user_b, shared_mood, created_at
        "#,
    )
    .bind(&new.user_a)
    .bind(&new.user_b)
    .bind(&new.shared_mood)
    .fetch_one(pool)
    .await?;

    Ok(connection)
}

/// Connections the user initiated, newest first
pub async fn get_connections_by_initiator(pool: &PgPool, user_id: &str) -> Result<Vec<Connection>> {
    let connections = sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_a, user_b, shared_mood, created_at
        FROM connections
        WHERE user_a = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(connections)
}
