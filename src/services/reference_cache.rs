// src/services/reference_cache.rs

use std::{sync::Arc, time::Duration};

use moka::future::Cache;
use uuid::Uuid;

use crate::models::ponto::{Feriado, Jornada};

/// Cache de cadastros de referência, sempre chaveado por tenant.
/// Escritas em feriados devem chamar `invalidate_feriados`; jornadas não mudam depois de criadas.
#[derive(Clone)]
pub struct ReferenceCache {
    feriados: Cache<Uuid, Arc<Vec<Feriado>>>,
    jornadas: Cache<(Uuid, Uuid), Arc<Jornada>>,
}

impl ReferenceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            feriados: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
            jornadas: Cache::builder()
                .max_capacity(50_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn feriados(&self, tenant_id: Uuid) -> Option<Arc<Vec<Feriado>>> {
        self.feriados.get(&tenant_id).await
    }

    pub async fn put_feriados(&self, tenant_id: Uuid, feriados: Vec<Feriado>) -> Arc<Vec<Feriado>> {
        let feriados = Arc::new(feriados);
        self.feriados.insert(tenant_id, Arc::clone(&feriados)).await;
        feriados
    }

    pub async fn invalidate_feriados(&self, tenant_id: Uuid) {
        self.feriados.invalidate(&tenant_id).await;
    }

    pub async fn jornada(&self, tenant_id: Uuid, jornada_id: Uuid) -> Option<Arc<Jornada>> {
        self.jornadas.get(&(tenant_id, jornada_id)).await
    }

    pub async fn put_jornada(&self, tenant_id: Uuid, jornada: Jornada) -> Arc<Jornada> {
        let jornada = Arc::new(jornada);
        self.jornadas
            .insert((tenant_id, jornada.id), Arc::clone(&jornada))
            .await;
        jornada
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feriado(tenant_id: Uuid, dia: i16, mes: i16) -> Feriado {
        Feriado {
            id: Uuid::new_v4(),
            tenant_id,
            dia,
            mes,
            descricao: "Feriado".into(),
            ativo: true,
        }
    }

    #[tokio::test]
    async fn feriados_isolados_por_tenant() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        cache.put_feriados(a, vec![feriado(a, 25, 12)]).await;

        assert_eq!(cache.feriados(a).await.map(|f| f.len()), Some(1));
        assert!(cache.feriados(b).await.is_none());

        cache.invalidate_feriados(a).await;
        assert!(cache.feriados(a).await.is_none());
    }

    #[tokio::test]
    async fn jornada_por_tenant_e_id() {
        let cache = ReferenceCache::new(Duration::from_secs(60));
        let tenant = Uuid::new_v4();
        let jornada = Jornada {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            nome: "Comercial".into(),
            entrada_manha: Some("08:00".into()),
            saida_manha: Some("12:00".into()),
            entrada_tarde: Some("13:00".into()),
            saida_tarde: Some("17:00".into()),
            intervalo_inicio: None,
            intervalo_fim: None,
            tolerancia_minutos: 10,
            created_at: None,
        };
        let id = jornada.id;

        cache.put_jornada(tenant, jornada).await;

        assert!(cache.jornada(tenant, id).await.is_some());
        assert!(cache.jornada(Uuid::new_v4(), id).await.is_none());
        assert!(cache.jornada(tenant, Uuid::new_v4()).await.is_none());
    }
}
