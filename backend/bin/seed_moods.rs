use anyhow::Result;
use clap::Parser;
use moodlink::{
    auth::issue_token,
    constants::SEED_MOODS,
    db::{get_db_pool, DatabaseConfig, PgStore, Store},
    models::{NewMoodPost, ProfileUpdate},
    utils::{config::optional_setting, init_logging, validation::validate_mood},
};
use rand::{seq::IndexedRandom, Rng};
use tracing::info;

/// Fill a local database with random mood posts for manual testing
#[derive(Parser, Debug)]
#[command(name = "seed_moods")]
struct Args {
    /// Number of posts to insert
    #[arg(long, default_value_t = 50)]
    posts: usize,

    /// Number of distinct users (seed-u1 .. seed-uN) to post as
    #[arg(long, default_value_t = 8)]
    users: usize,

    /// Use this mood for every post instead of a random one
    #[arg(long)]
    mood: Option<String>,

    /// Print a one-hour bearer token for this user id (needs JWT_SECRET)
    #[arg(long)]
    token_for: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let fixed_mood = match &args.mood {
        Some(m) => Some(validate_mood(m)?.to_string()),
        None => None,
    };
    if args.users == 0 {
        anyhow::bail!("--users must be at least 1");
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;
    moodlink::db::migrations::run_migrations(&pool).await?;
    let store = PgStore::new(pool);

    let user_ids: Vec<String> = (1..=args.users).map(|i| format!("seed-u{}", i)).collect();
    for user_id in &user_ids {
        store
            .upsert_user(ProfileUpdate {
                id: user_id.clone(),
                username: user_id.clone(),
                display_name: format!("Seed user {}", user_id.trim_start_matches("seed-u")),
                avatar_url: None,
            })
            .await?;
    }

    let planned: Vec<NewMoodPost> = {
        let mut rng = rand::rng();
        (0..args.posts)
            .map(|_| {
                let user_id = user_ids[rng.random_range(0..user_ids.len())].clone();
                let mood = match &fixed_mood {
                    Some(m) => m.clone(),
                    None => SEED_MOODS.choose(&mut rng).copied().unwrap_or("calm").to_string(),
                };
                NewMoodPost { user_id, mood, note: None, image_url: None }
            })
            .collect()
    };

    for post in planned {
        store.insert_post(post).await?;
    }
    info!("Seeded {} posts across {} users", args.posts, args.users);

    if let Some(user_id) = args.token_for {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set to issue a token"))?;
        let audience = optional_setting(std::env::var("JWT_AUDIENCE").ok());
        let token = issue_token(&secret, &user_id, audience.as_deref(), 3600)?;
        println!("{}", token);
    }

    Ok(())
}
