// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        AuditRepository, BancoHorasRepository, CadastroRepository, MasterUserRepository,
        PeriodoRepository, PontoRepository,
    },
    services::{
        audit_service::{AuditLogger, PgAuditWriter},
        banco_horas_service::BancoHorasService,
        cadastro_service::CadastroService,
        credentials::PgMasterCredentialVerifier,
        periodo_service::PeriodoService,
        ponto_service::PontoService,
        reference_cache::ReferenceCache,
    },
};

/// Configuração lida do ambiente (.env incluso).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub reference_cache_ttl: Duration,
}

fn env_or<T>(nome: &str, padrao: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(nome) {
        Ok(valor) => valor
            .trim()
            .parse()
            .with_context(|| format!("{} com valor inválido: '{}'", nome, valor)),
        Err(_) => Ok(padrao),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:3000".to_string())?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            reference_cache_ttl: Duration::from_secs(env_or("REFERENCE_CACHE_TTL_SECS", 300)?),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub cadastro_service: CadastroService,
    pub ponto_service: PontoService,
    pub banco_horas_service: BancoHorasService,
    pub periodo_service: PeriodoService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, settings))
    }

    // --- Monta o grafo de dependências ---
    pub fn from_pool(db_pool: PgPool, settings: &Settings) -> Self {
        let cadastro_repo = CadastroRepository::new(db_pool.clone());
        let ponto_repo = PontoRepository::new(db_pool.clone());
        let banco_repo = BancoHorasRepository::new(db_pool.clone());
        let periodo_repo = PeriodoRepository::new(db_pool.clone());

        let audit = AuditLogger::new(Arc::new(PgAuditWriter::new(AuditRepository::new(
            db_pool.clone(),
        ))));
        let credenciais = Arc::new(PgMasterCredentialVerifier::new(MasterUserRepository::new(
            db_pool.clone(),
        )));
        let cache = ReferenceCache::new(settings.reference_cache_ttl);

        let cadastro_service = CadastroService::new(cadastro_repo, cache, audit.clone());
        let periodo_service = PeriodoService::new(
            periodo_repo.clone(),
            banco_repo.clone(),
            credenciais,
            audit.clone(),
        );
        let ponto_service = PontoService::new(
            ponto_repo,
            periodo_repo.clone(),
            cadastro_service.clone(),
            periodo_service.clone(),
            audit.clone(),
        );
        let banco_horas_service = BancoHorasService::new(
            banco_repo,
            periodo_repo,
            cadastro_service.clone(),
            ponto_service.clone(),
            periodo_service.clone(),
            audit,
        );

        Self {
            db_pool,
            i18n_store: Arc::new(I18nStore::new()),
            cadastro_service,
            ponto_service,
            banco_horas_service,
            periodo_service,
        }
    }
}
