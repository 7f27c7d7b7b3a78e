#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    error::{BindListenerSnafu, RosterResult, ServeSnafu},
    routes::{
        edit::{internal_post_save_edit, internal_put_edit_draft, post_begin_edit},
        export::get_students_csv,
        index::get_index,
        registration::{internal_put_registration_draft, post_register},
        search::internal_put_search,
        student_list::delete_student,
    },
    state::RosterState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use snafu::ResultExt;
use tokio::{net::TcpListener, signal};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;

async fn shutdown_signal(state: RosterState) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    state.sensible_shutdown().await;
}

fn router(state: RosterState) -> Router {
    let max_upload_bytes = state.config().max_upload_bytes();

    Router::new()
        .route("/", get(get_index))
        .route("/students", post(post_register))
        .route("/students.csv", get(get_students_csv))
        .route("/students/{key}", delete(delete_student))
        .route("/students/{key}/edit", post(post_begin_edit))
        .route(
            "/internal/registration/draft",
            put(internal_put_registration_draft),
        )
        .route("/internal/edit/draft", put(internal_put_edit_draft))
        .route("/internal/edit/save", post(internal_post_save_edit))
        .route("/internal/search", put(internal_put_search))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn run() -> RosterResult<()> {
    let state = RosterState::new(RuntimeConfiguration::new()?);
    let server_ip = state.config().server_ip().to_string();

    let listener = TcpListener::bind(&server_ip)
        .await
        .context(BindListenerSnafu {
            address: server_ip.clone(),
        })?;

    info!(?server_ip, seeded = state.config().seed_demo_students(), "Listening");
    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context(ServeSnafu)
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    ) {
        eprintln!("unable to set tracing subscriber: {e}");
    }

    info!("`tracing` online");
    if let Err(e) = dotenv {
        debug!(?e, "No .env file loaded");
    }

    if let Err(e) = run().await {
        error!(?e, "Unable to run roster");
        std::process::exit(1);
    }
}
