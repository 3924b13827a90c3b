//! Module declaration and lifecycle: configure, migrate, wire, expose

use crate::config::Config;
use crate::contract::BracketApi;
use crate::domain::{BracketEvent, BroadcastEventPublisher, EventPublisher, NoOpEventPublisher, Service};
use crate::infra::storage::{Migrator, SeaOrmMatchRepository, SeaOrmParticipantRepository};
use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Bracket service module
pub struct BracketServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
    events: RwLock<Option<Arc<BroadcastEventPublisher>>>,
}

impl Default for BracketServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl BracketServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
            events: RwLock::new(None),
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Bracket service migrations completed");
        Ok(())
    }

    /// Build repositories, event publisher and domain service
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let cfg = self.config.read().clone();
        cfg.validate()?;

        let participant_repo = Arc::new(SeaOrmParticipantRepository::new(db.clone()));
        let match_repo = Arc::new(SeaOrmMatchRepository::new(db));

        let event_publisher: Arc<dyn EventPublisher> = if cfg.publish_events {
            let broadcast = Arc::new(BroadcastEventPublisher::new(cfg.event_buffer));
            *self.events.write() = Some(broadcast.clone());
            broadcast
        } else {
            Arc::new(NoOpEventPublisher)
        };

        let service = Arc::new(Service::with_config(
            participant_repo,
            match_repo,
            event_publisher,
            cfg.clone(),
        ));
        *self.service.write() = Some(service);

        tracing::info!(
            max_participants = cfg.max_participants,
            publish_events = cfg.publish_events,
            "Bracket service initialized"
        );
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn BracketApi>> {
        let service = self.service()?;
        Ok(Arc::new(crate::api::native::NativeClient::new(service)))
    }

    /// Subscribe to bracket events; `None` when publishing is disabled
    pub fn subscribe(&self) -> Option<broadcast::Receiver<BracketEvent>> {
        self.events.read().as_ref().map(|events| events.subscribe())
    }

    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering bracket service REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
