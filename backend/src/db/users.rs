use crate::models::{ProfileUpdate, UserProfile};
use anyhow::Result;
use sqlx::PgPool;

// Profile operations
pub async fn upsert_user(pool: &PgPool, update: &ProfileUpdate) -> Result<UserProfile> {
    let user = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, username, display_name, avatar_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET username = EXCLUDED.username,
            display_name = EXCLUDED.display_name,
            avatar_url = EXCLUDED.avatar_url,
            updated_at = NOW()
        RETURNING id, username, display_name, avatar_url, created_at
        "#,
    )
    .bind(&update.id)
    .bind(&update.username)
    .bind(&update.display_name)
    .bind(&update.avatar_url)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<UserProfile>> {
    let user = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, username, display_name, avatar_url, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

// Follow operations
pub async fn create_follow(pool: &PgPool, follower_id: &str, followee_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followee_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, followee_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Newest profiles that are neither the user nor already followed by them
pub async fn get_suggested_users(pool: &PgPool, user_id: &str, limit: i64) -> Result<Vec<UserProfile>> {
    let users = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT u.id, u.username, u.display_name, u.avatar_url, u.created_at
        FROM users u
        WHERE u.id <> $1
        AND NOT EXISTS (
            SELECT 1 FROM follows f
            WHERE f.follower_id = $1 AND f.followee_id = u.id
        )
        ORDER BY u.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
