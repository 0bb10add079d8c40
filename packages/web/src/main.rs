use dioxus::prelude::*;

use ui::{AppStateProvider, AuthProvider, ToastProvider};
use views::{
    Admin, Agenda, Conversations, Dashboard, Leads, Login, NotFound, Pipeline, Profile, Register,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/pipeline")]
    Pipeline {},
    #[route("/leads")]
    Leads {},
    #[route("/agenda")]
    Agenda {},
    #[route("/conversas")]
    Conversations {},
    #[route("/admin")]
    Admin {},
    #[route("/perfil")]
    Profile {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::post;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Initialize database pool
    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    // Run migrations
    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to migrate session store");

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into().unwrap(),
        )); // 7 days

    // Build the Dioxus app with custom routes
    let router = axum::Router::new()
        // Inbound WhatsApp messages land here, outside the session layer's concerns
        .route("/hooks/whatsapp", post(whatsapp_webhook))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App)
        // Add session layer to all routes
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

/// WhatsApp webhook endpoint. Authenticated with a bearer secret, validated
/// and ingested by [`api::webhook`]; duplicates answer 200 so the
/// automation does not retry them forever.
#[cfg(feature = "server")]
async fn whatsapp_webhook(
    headers: axum::http::HeaderMap,
    axum::extract::Json(payload): axum::extract::Json<api::webhook::InboundMessage>,
) -> axum::response::Response {
    use api::webhook::{ingest, WebhookOutcome};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::Json;

    let secret = std::env::var("WEBHOOK_SECRET").unwrap_or_default();
    let expected = format!("Bearer {secret}");
    let authorized = !secret.is_empty()
        && headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());

    if !authorized {
        tracing::warn!("webhook call with missing or wrong secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Não autorizado." })),
        )
            .into_response();
    }

    let pool = match api::db::get_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("webhook could not reach the database: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Banco de dados indisponível." })),
            )
                .into_response();
        }
    };

    match ingest(pool, payload).await {
        Ok(WebhookOutcome::Stored { lead_id, .. }) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Operação concluída com sucesso!",
                "leadId": lead_id,
            })),
        )
            .into_response(),
        Ok(WebhookOutcome::Duplicate { .. }) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Mensagem duplicada ignorada." })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("webhook ingestion failed: {e}");
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::CRM_CSS }

        AuthProvider {
            AppStateProvider {
                ToastProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}
