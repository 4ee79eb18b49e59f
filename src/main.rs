#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod files;
mod openapi;
mod repository;
mod route;
mod trace;
mod validate;

use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type Ideas = Arc<dyn repository::IdeaRepository>;
pub type Files = Arc<dyn files::FileLookup>;

/// The shared application state.
///
/// Handlers pick the parts they need with `State<Ideas>` or `State<Files>`.
#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
	pub ideas: Ideas,
	pub files: Files,
}

/// Builds the application router, including its documentation and middleware.
pub fn app(state: AppState) -> Router {
	let mut api = OpenApi::default();

	route::routes()
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CompressionLayer::new())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let config = config::Config::from_env().expect("invalid configuration");
	let _guard = trace::init_tracing_subscriber(&config);

	let ideas: Ideas = if let Some(url) = &config.database_url {
		Arc::new(
			repository::PgIdeaRepository::connect(url)
				.await
				.expect("failed to connect to database"),
		)
	} else {
		tracing::warn!("DATABASE_URL is not set, ideas will only be kept in memory");
		Arc::new(repository::MemoryIdeaRepository::default())
	};

	let state = AppState {
		ideas,
		files: Arc::new(files::LocalFiles::new(&config.upload_dir)),
	};

	let listener = tokio::net::TcpListener::bind((config.host, config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!(
		host = %config.host,
		port = config.port,
		upload_dir = %config.upload_dir.display(),
		"listening"
	);

	axum::serve(listener, app(state)).await.unwrap();
}
