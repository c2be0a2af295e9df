//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Table Operations
/// The variants map onto what a persistence facade needs from a single table:
///
/// - **Get**: fetch one entity by id; a miss is `Ok(None)`, never an error.
/// - **All**: every stored entity, in no particular order.
/// - **Count**: number of stored entities.
/// - **Save**: upsert. The actor runs [`ActorEntity::on_save`] and answers with the stored copy.
/// - **Delete**: remove by id; answers `NotFound` when there is nothing to remove.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    All {
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Save {
        item: T,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
