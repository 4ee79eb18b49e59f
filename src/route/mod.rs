use aide::axum::ApiRouter;

use crate::AppState;

pub mod docs;
pub mod idea;
pub mod model;

pub fn routes() -> ApiRouter<AppState> {
	ApiRouter::new()
		.nest("/ideas", idea::routes())
		.nest("/docs", docs::routes())
}
