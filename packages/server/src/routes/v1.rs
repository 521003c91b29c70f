use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/contests", contest_routes())
        .nest("/problems", problem_routes())
        .nest("/tags", tag_routes())
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::contest::list_contests))
        .routes(routes!(handlers::contest::get_contest))
        .routes(routes!(handlers::contest::list_contest_problems))
}

fn problem_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::problem::list_problems))
        .routes(routes!(handlers::problem::get_problem))
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::tag::list_tags))
}
