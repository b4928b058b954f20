//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use maud::html;

use crate::{
    AppState,
    dashboard::{
        clear_exclusions, exclude_transaction, get_dashboard_page, include_transaction,
        refresh_dashboard,
    },
    endpoints,
    html::base,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::EXCLUDE_API, post(exclude_transaction))
        .route(endpoints::INCLUDE_API, post(include_transaction))
        .route(endpoints::CLEAR_EXCLUSIONS_API, post(clear_exclusions))
        .route(endpoints::REFRESH_API, post(refresh_dashboard))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_404_not_found() -> Response {
    let content = html!(
        main
        {
            h1 { "404: Not Found" }

            p
            {
                "The page you were looking for does not exist. "
                a href=(endpoints::DASHBOARD_VIEW) { "Back to the dashboard" }
            }
        }
    );

    (StatusCode::NOT_FOUND, base("Not Found", &content)).into_response()
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_404_not_found, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn unknown_routes_get_a_404_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
