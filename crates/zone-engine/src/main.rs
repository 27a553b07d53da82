//! # Zone Engine Demo
//!
//! Boots a [`ZoneSystem`], loads a small inventory, and walks through the zone and
//! assignment operations:
//! 1. Building `Site → Floor 1 → Room 12` and a sibling `Floor 2`.
//! 2. Assigning detectors and a circuit, including one unknown id.
//! 3. Attempting an invalid reparent and an invalid delete.
//! 4. Deleting a zone under the configured [`DeletePolicy`].
//!
//! ```bash
//! RUST_LOG=debug cargo run -p zone-engine -- --delete-policy unassign
//! ```

use clap::Parser;
use std::collections::BTreeSet;
use tracing::{error, info, Instrument};
use zone_engine::config::{DeletePolicy, EngineConfig};
use zone_engine::lifecycle::{setup_tracing, ZoneSystem};
use zone_engine::model::{ResourceCreate, ResourceId, ResourceKind, ZoneCreate, ZoneId, ZonePatch};
use zone_engine::tree::TreeNode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Zone engine demo", long_about = None)]
struct Args {
    /// Capacity of each store actor's request channel
    #[arg(long, env = "ZONE_ENGINE_CHANNEL_BUFFER", default_value_t = 32)]
    channel_buffer: usize,

    /// What happens to assigned resources when their zone is deleted (keep, block, unassign)
    #[arg(long, env = "ZONE_ENGINE_DELETE_POLICY", default_value_t = DeletePolicy::Keep)]
    delete_policy: DeletePolicy,

    /// Print the final zone tree as JSON
    #[arg(long)]
    json: bool,
}

fn zone(name: &str, parent_id: Option<&ZoneId>) -> ZoneCreate {
    ZoneCreate {
        name: name.to_string(),
        parent_id: parent_id.cloned(),
        description: None,
    }
}

fn log_tree(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        info!(
            "{}{} ({})",
            "  ".repeat(depth),
            node.zone.name,
            node.zone.id
        );
        log_tree(&node.children, depth + 1);
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    setup_tracing();

    let config = EngineConfig::default()
        .with_channel_buffer(args.channel_buffer)
        .with_delete_policy(args.delete_policy);
    config.validate().map_err(|e| e.to_string())?;

    info!(delete_policy = %config.delete_policy, "Starting zone engine demo");
    let system = ZoneSystem::new(config);
    let service = &system.service;

    // Zones
    let span = tracing::info_span!("zone_setup");
    let (site, floor_1, room_12, floor_2) = async {
        let site = service.create_zone(zone("Site", None)).await?;
        let floor_1 = service.create_zone(zone("Floor 1", Some(&site.id))).await?;
        let room_12 = service.create_zone(zone("Room 12", Some(&floor_1.id))).await?;
        let floor_2 = service.create_zone(zone("Floor 2", Some(&site.id))).await?;
        Ok::<_, zone_engine::error::ZoneError>((site, floor_1, room_12, floor_2))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    // Inventory, normally owned by the provisioning side
    let mut detectors = BTreeSet::new();
    for (label, address) in [("Smoke 1", 1), ("Smoke 2", 2), ("Heat 1", 3)] {
        let detector = system
            .resource_client
            .provision(ResourceCreate::Detector {
                label: label.to_string(),
                address,
            })
            .await
            .map_err(|e| e.to_string())?;
        detectors.insert(zone_engine::model::Assignable::id(&detector).clone());
    }
    let sounder = system
        .resource_client
        .provision(ResourceCreate::Circuit {
            label: "Sounder A".to_string(),
            channel: 1,
        })
        .await
        .map_err(|e| e.to_string())?;

    // Assignments
    let span = tracing::info_span!("assignment");
    async {
        let mut requested = detectors.clone();
        requested.insert(ResourceId::from("res_404"));
        match service
            .assign_resources(room_12.id.clone(), requested, ResourceKind::Detector)
            .await
        {
            Ok(outcome) => info!(
                succeeded = outcome.succeeded.len(),
                failed = outcome.failed.len(),
                "Detectors assigned"
            ),
            Err(e) => error!(error = %e, "Assignment failed"),
        }

        let circuit_ids =
            BTreeSet::from([zone_engine::model::Assignable::id(&sounder).clone()]);
        if let Err(e) = service
            .assign_resources(floor_1.id.clone(), circuit_ids, ResourceKind::Circuit)
            .await
        {
            error!(error = %e, "Circuit assignment failed");
        }
    }
    .instrument(span)
    .await;

    // Rejected structural edits
    let cycle = service
        .update_zone(
            site.id.clone(),
            ZonePatch {
                parent_id: Some(Some(room_12.id.clone())),
                ..ZonePatch::default()
            },
        )
        .await;
    if let Err(e) = cycle {
        info!(error = %e, api = ?e.to_api(), "Reparent rejected as expected");
    }
    if let Err(e) = service.delete_zone(floor_1.id.clone()).await {
        info!(error = %e, "Delete rejected as expected");
    }

    // Delete a leaf that still holds resources
    match service.delete_zone(room_12.id.clone()).await {
        Ok(()) => info!(zone_id = %room_12.id, "Room deleted"),
        Err(e) => info!(error = %e, "Room kept"),
    }
    let free = service
        .unassigned_resources(ResourceKind::Detector)
        .await
        .map_err(|e| e.to_string())?;
    info!(unassigned_detectors = free.len(), "After delete");

    let tree = service.get_zone_tree().await.map_err(|e| e.to_string())?;
    log_tree(&tree, 0);
    if args.json {
        let rendered = serde_json::to_string_pretty(&tree).map_err(|e| e.to_string())?;
        println!("{}", rendered);
    }
    info!(floor_2 = %floor_2.id, "Demo finished");

    system.shutdown().await?;
    Ok(())
}
