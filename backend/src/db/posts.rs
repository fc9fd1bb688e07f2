use crate::models::{MoodPost, NewMoodPost};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub async fn create_post(pool: &PgPool, new: &NewMoodPost) -> Result<MoodPost> {
    let post = sqlx::query_as::<_, MoodPost>(
        r#"
        INSERT INTO mood_posts (user_id, mood, note, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, mood, note, image_url, created_at
        "#,
    )
    .bind(&new.user_id)
    .bind(&new.mood)
    .bind(&new.note)
    .bind(&new.image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn get_recent_posts_by_mood(pool: &PgPool, mood: &str, limit: i64) -> Result<Vec<MoodPost>> {
    let posts = sqlx::query_as::<_, MoodPost>(
        r#"
        SELECT id, user_id, mood, note, image_url, created_at
        FROM mood_posts
        WHERE mood = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(mood)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn get_posts_since(
    pool: &PgPool,
    mood: Option<&str>,
    since: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<MoodPost>> {
    let posts = sqlx::query_as::<_, MoodPost>(
        r#"
        SELECT id, user_id, mood, note, image_url, created_at
        FROM mood_posts
        WHERE created_at >= $1
        AND ($2::TEXT IS NULL OR mood = $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(since)
    .bind(mood)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
