use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::{ShopError, ShopResult};
use crate::store::{Table, Tables, Transaction};

// =============================================================================
// 1. THE ABSTRACTION (Entities and their identities)
// =============================================================================

/// Identity of a stored entity. Each id type names the entity it points at,
/// so lookups by id resolve the right table without annotations.
pub trait EntityId: Copy + Eq + Ord + Hash + Send + Sync + Display + Debug + 'static {
    type Entity: Entity<Id = Self>;

    /// Placeholder carried by entities that were never saved.
    const UNSAVED: Self;

    fn from_seq(seq: u64) -> Self;

    fn is_unsaved(self) -> bool {
        self == Self::UNSAVED
    }
}

/// Trait that any domain entity must implement to be kept by the store.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: EntityId<Entity = Self>;

    fn id(&self) -> Self::Id;

    /// Called by the store the first time the entity is saved.
    fn assign_id(&mut self, id: Self::Id);

    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

// =============================================================================
// 2. THE MESSAGES
// =============================================================================

/// A unit of work shipped to the store task. It owns its reply channel.
pub type Job = Box<dyn FnOnce(&mut Tables) + Send>;

pub enum StoreRequest {
    Transact { label: &'static str, job: Job },
    Shutdown,
}

impl Debug for StoreRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreRequest::Transact { label, .. } => {
                f.debug_struct("Transact").field("label", label).finish()
            }
            StoreRequest::Shutdown => f.write_str("Shutdown"),
        }
    }
}

// =============================================================================
// 3. THE STORE ACTOR
// =============================================================================

/// Owns every table and runs submitted transactions one at a time, so
/// writers on any row are serialized.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    tables: Tables,
}

impl StoreActor {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            tables: Tables::default(),
        };
        (actor, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Transact { label, job } => self.handle_transact(label, job),
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }
        info!(
            users = self.tables.users.len(),
            products = self.tables.products.len(),
            orders = self.tables.orders.len(),
            payments = self.tables.payments.len(),
            "StoreService stopped"
        );
    }

    #[instrument(fields(transaction = label), skip(self, job))]
    fn handle_transact(&mut self, label: &'static str, job: Job) {
        debug!("Running transaction");
        job(&mut self.tables);
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Runs `work` inside one transaction on the store task.
    ///
    /// Staged writes are committed when `work` returns `Ok` and discarded
    /// when it returns `Err`; the result is handed back either way.
    #[instrument(skip(self, work))]
    pub async fn transact<R, F>(&self, label: &'static str, work: F) -> ShopResult<R>
    where
        F: FnOnce(&mut Transaction<'_>) -> ShopResult<R> + Send + 'static,
        R: Send + 'static,
    {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        let job: Job = Box::new(move |tables: &mut Tables| {
            let mut tx = Transaction::begin(tables);
            let result = work(&mut tx);
            match &result {
                Ok(_) => {
                    let writes = tx.commit();
                    debug!(writes, "Transaction committed");
                }
                Err(e) => {
                    let discarded = tx.rollback();
                    warn!(error = %e, discarded, "Transaction rolled back");
                }
            }
            let _ = respond_to.send(result);
        });

        self.sender
            .send(StoreRequest::Transact { label, job })
            .await
            .map_err(|_| ShopError::Unavailable("Store closed".to_string()))?;
        response
            .await
            .map_err(|_| ShopError::Unavailable("Store dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> ShopResult<()> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| ShopError::Unavailable("Store closed".to_string()))
    }
}
