/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (auth / CORS / request-id / trace / limit / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::repos::{MemoryNoteRepo, NoteStore, PgNoteRepo};
use crate::services::{
    access_guard::AccessPolicy, auth::build_token_authenticator, id_codec::IdCodec,
};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,notes_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting notes API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let notes: Arc<dyn NoteStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(
            PgNoteRepo::connect(config, url)
                .await
                .context("failed to connect note store")?,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; notes are kept in memory and lost on restart");
            Arc::new(MemoryNoteRepo::new())
        }
    };

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid SQIDS_* configuration")?;
    let auth = build_token_authenticator(config).context("invalid JWT_SECRET")?;
    let access = AccessPolicy::new(config.conceal_foreign_notes);

    Ok(AppState::new(notes, id_codec, auth, access))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes(state.clone()))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
