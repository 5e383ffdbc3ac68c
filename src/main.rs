//src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

fn rh_routes() -> Router<AppState> {
    let ponto_routes = Router::new().route(
        "/{funcionario_id}/{competencia}",
        get(handlers::ponto::get_ponto_mes).put(handlers::ponto::replace_ponto_mes),
    );

    let banco_horas_routes = Router::new()
        .route("/{funcionario_id}/resumo", get(handlers::banco_horas::get_resumo))
        .route(
            "/{funcionario_id}/ajustes",
            get(handlers::banco_horas::list_ajustes).post(handlers::banco_horas::create_ajuste),
        )
        .route(
            "/{funcionario_id}/saldo-inicial",
            post(handlers::banco_horas::create_saldo_inicial),
        )
        .route("/ajustes/{ajuste_id}", delete(handlers::banco_horas::delete_ajuste))
        // Períodos (fechamento / reabertura)
        .route("/{funcionario_id}/periodos", get(handlers::periodo::list_periodos))
        .route(
            "/{funcionario_id}/periodos/{ano}/{mes}",
            get(handlers::periodo::get_periodo).post(handlers::periodo::change_periodo),
        );

    let feriado_routes = Router::new()
        .route(
            "/",
            get(handlers::feriados::list_feriados).post(handlers::feriados::create_feriado),
        )
        .route(
            "/{feriado_id}",
            put(handlers::feriados::update_feriado).delete(handlers::feriados::delete_feriado),
        );

    let jornada_routes = Router::new().route(
        "/",
        get(handlers::jornadas::list_jornadas).post(handlers::jornadas::create_jornada),
    );

    Router::new()
        .nest("/ponto", ponto_routes)
        .nest("/banco-horas", banco_horas_routes)
        .nest("/feriados", feriado_routes)
        .nest("/jornadas", jornada_routes)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/rh", rh_routes())
        .with_state(app_state);

    let listener = TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
