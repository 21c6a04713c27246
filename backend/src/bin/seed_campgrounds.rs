//! Replace all campgrounds with the sample set.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::sync::Arc;

use backend::domain::{CampgroundSeeder, Registration};
use backend::outbound::password::Argon2PasswordHasher;
use backend::outbound::persistence::{
    DbPool, DieselCampgroundRepository, DieselCommentRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `seed-campgrounds` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-campgrounds",
    about = "Remove all campgrounds and comments, then insert the sample campgrounds",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `YELPCAMP_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Username that authors the sample campgrounds and comments.
    #[arg(long = "seed-username", value_name = "name", default_value = "seeder")]
    seed_username: String,
    /// Password for the seed user if it has to be created.
    #[arg(long = "seed-password", value_name = "password", env = "SEED_PASSWORD")]
    seed_password: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = CliArgs::try_parse()?;
    let database_url = resolve_database_url(args.database_url)?;
    let seed_user = Registration::try_from_parts(&args.seed_username, &args.seed_password)
        .map_err(|error| eyre!("invalid seed user: {error}"))?;

    run_migrations(&database_url)
        .await
        .map_err(|error| eyre!("apply migrations: {error}"))?;
    let pool = DbPool::connect(&PoolConfig::new(&database_url))
        .await
        .map_err(|error| eyre!("create database pool: {error}"))?;

    let seeder = CampgroundSeeder::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCampgroundRepository::new(pool.clone())),
        Arc::new(DieselCommentRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    );
    let outcome = seeder
        .seed(&seed_user)
        .await
        .map_err(|error| eyre!("seeding failed: {error}"))?;

    println!("removed_campgrounds={}", outcome.removed);
    println!("inserted_campgrounds={}", outcome.inserted);
    println!("seed_user_created={}", outcome.author_created);
    Ok(())
}

fn resolve_database_url(cli_value: Option<String>) -> Result<String> {
    cli_value
        .or_else(|| env::var("YELPCAMP_DATABASE_URL").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            eyre!("database URL required: pass --database-url or set YELPCAMP_DATABASE_URL")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn cli_value_wins_over_environment() {
        let url = resolve_database_url(Some("postgres://cli/yelpcamp".to_owned())).expect("url");
        assert_eq!(url, "postgres://cli/yelpcamp");
    }

    #[rstest]
    fn parses_seed_arguments() {
        let args = CliArgs::try_parse_from([
            "seed-campgrounds",
            "--database-url",
            "postgres://localhost/yelpcamp",
            "--seed-password",
            "hunter2",
        ])
        .expect("arguments parse");
        assert_eq!(args.seed_username, "seeder");
        assert_eq!(args.seed_password, "hunter2");
    }

    #[rstest]
    fn seed_password_falls_back_to_the_environment() {
        let _guard = env_lock::lock_env([("SEED_PASSWORD", Some("from-env".to_owned()))]);

        let args = CliArgs::try_parse_from(["seed-campgrounds", "--seed-username", "colt"])
            .expect("arguments parse");
        assert_eq!(args.seed_username, "colt");
        assert_eq!(args.seed_password, "from-env");
    }
}
