//! # Store Messages
//!
//! The request type sent from a [`StoreClient`](crate::StoreClient) to its
//! [`StoreActor`](crate::StoreActor), one variant per primitive.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to a store actor.
///
/// - **Create**: allocates a fresh id and builds the record from [`StoreEntity::Create`].
/// - **Get**: fetches a record by id (`None` if absent).
/// - **List**: snapshot of every record, in no particular order.
/// - **Put**: upsert keyed by [`StoreEntity::id`]; returns the replaced record, if any.
/// - **Update**: applies [`StoreEntity::Update`] in place and returns the new state.
/// - **Delete**: removes a record, failing with `NotFound` if absent.
/// - **Action**: runs [`StoreEntity::Action`] against one record.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Put {
        entity: T,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
