use crate::clients::{ResourceClient, ZoneClient};
use crate::config::EngineConfig;
use crate::service::ZoneService;
use crate::{resource_actor, zone_actor};
use tracing::{error, info};

/// Owns the running zone and resource stores.
///
/// # Example
///
/// ```ignore
/// let system = ZoneSystem::new(EngineConfig::default());
///
/// let zone = system.service.create_zone(params).await?;
/// system.resource_client.provision(detector).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ZoneSystem {
    /// Orchestrator for every zone and assignment operation
    pub service: ZoneService,

    /// Direct access to the zone store
    pub zone_client: ZoneClient,

    /// Direct access to the resource store, used to load the inventory
    pub resource_client: ResourceClient,

    config: EngineConfig,

    /// Task handles for the store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ZoneSystem {
    /// Spawns both store actors and builds the service on top of them.
    ///
    /// Must be called inside a Tokio runtime. A `channel_buffer` of zero is raised to 1.
    pub fn new(config: EngineConfig) -> Self {
        let buffer = config.channel_buffer.max(1);

        let (zone_actor, zone_client) = zone_actor::new(buffer);
        let (resource_actor, resource_client) = resource_actor::new(buffer);

        let zone_handle = tokio::spawn(zone_actor.run());
        let resource_handle = tokio::spawn(resource_actor.run());

        let service = ZoneService::new(
            zone_client.clone(),
            resource_client.clone(),
            config.delete_policy,
        );

        info!(
            channel_buffer = buffer,
            delete_policy = %config.delete_policy,
            "Zone system started"
        );

        Self {
            service,
            zone_client,
            resource_client,
            config,
            handles: vec![zone_handle, resource_handle],
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drops every owned client and waits for the store actors to finish.
    ///
    /// Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down zone system...");

        let Self {
            service,
            zone_client,
            resource_client,
            handles,
            ..
        } = self;

        // Closing every sender lets each actor's receive loop end.
        drop(service);
        drop(zone_client);
        drop(resource_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Zone system shutdown complete.");
        Ok(())
    }
}
