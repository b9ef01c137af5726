// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, platform, quiz, student, user},
    state::AppState,
    utils::jwt::{auth_middleware, editor_middleware},
};

/// Assembles the main application router.
///
/// * Login is public; every other route requires an editor token.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (statistics engine, config, revocation list).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let protected_routes = Router::<AppState>::new()
        .route("/auth/logout", post(auth::logout))
        .route("/users/me", get(user::get_me))
        .route("/quizzes", get(quiz::list_quizzes))
        .route("/quizzes/stats", get(quiz::get_quiz_stats))
        .route("/quizzes/{id}", get(quiz::get_quiz))
        .route("/students", get(student::list_students))
        .route("/students/stats", get(student::get_student_stats))
        .route("/students/{username}", get(student::get_student))
        .route("/platform_stats", get(platform::get_platform_stats))
        .route(
            "/platform_stats/daily_distribution",
            get(platform::get_daily_distribution),
        )
        // Auth runs first (outermost), then the editor check
        .layer(middleware::from_fn(editor_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::<AppState>::new()
        .route("/auth/login", post(auth::login))
        .merge(protected_routes);

    Router::new()
        .nest("/api", api_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
