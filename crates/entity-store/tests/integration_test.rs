use entity_store::{StoreActor, StoreEntity, StoreError};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Panel {
    id: u32,
    label: String,
    armed: bool,
}

#[derive(Debug)]
struct PanelCreate {
    label: String,
}

#[derive(Debug)]
struct PanelUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum PanelAction {
    Arm,
}

#[derive(Debug, thiserror::Error)]
enum PanelError {
    #[error("label must not be empty")]
    EmptyLabel,
}

impl StoreEntity for Panel {
    type Id = u32;
    type Create = PanelCreate;
    type Update = PanelUpdate;
    type Action = PanelAction;
    type ActionResult = bool;
    type Error = PanelError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: PanelCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(PanelError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            armed: false,
        })
    }

    fn on_update(&mut self, update: PanelUpdate) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(PanelError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: PanelAction) -> Result<bool, Self::Error> {
        match action {
            PanelAction::Arm => {
                let changed = !self.armed;
                self.armed = true;
                Ok(changed)
            }
        }
    }
}

fn panel(id: u32, label: &str) -> Panel {
    Panel {
        id,
        label: label.to_string(),
        armed: false,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = StoreActor::<Panel>::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Create allocates ids from the counter
    let created = client
        .create(PanelCreate {
            label: "North wing".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    // 2. Action
    assert!(client
        .perform_action(created.id, PanelAction::Arm)
        .await
        .unwrap());
    assert!(!client
        .perform_action(created.id, PanelAction::Arm)
        .await
        .unwrap());

    // 3. Update
    let updated = client
        .update(
            created.id,
            PanelUpdate {
                label: Some("South wing".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "South wing");
    assert!(updated.armed);

    // 4. Delete
    client.delete(created.id).await.unwrap();
    assert!(client.get(created.id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(created.id).await,
        Err(StoreError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_put_is_an_upsert_and_create_skips_taken_ids() {
    let (actor, client) = StoreActor::<Panel>::new(10);
    tokio::spawn(actor.run());

    assert!(client.put(panel(1, "first")).await.unwrap().is_none());
    let replaced = client.put(panel(1, "renamed")).await.unwrap();
    assert_eq!(replaced.unwrap().label, "first");

    let created = client
        .create(PanelCreate {
            label: "second".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 2);

    let mut labels: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.label)
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["renamed".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn test_entity_errors_leave_state_untouched() {
    let (actor, client) = StoreActor::<Panel>::new(10);
    tokio::spawn(actor.run());

    let err = client
        .create(PanelCreate {
            label: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.entity_error::<PanelError>(),
        Some(PanelError::EmptyLabel)
    ));
    assert!(client.list().await.unwrap().is_empty());

    client.put(panel(10, "kept")).await.unwrap();
    let err = client
        .update(
            10,
            PanelUpdate {
                label: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(err.entity_error::<PanelError>().is_some());
    assert_eq!(
        client.get(10).await.unwrap().unwrap().label,
        "kept"
    );

    let missing = client
        .update(99, PanelUpdate { label: None })
        .await;
    assert!(matches!(missing, Err(StoreError::NotFound(id)) if id == "99"));
}

#[tokio::test]
async fn test_closed_store_reports_actor_closed() {
    let (actor, client) = StoreActor::<Panel>::new(10);
    drop(actor);

    assert!(matches!(
        client.get(1).await,
        Err(StoreError::ActorClosed)
    ));
}
