//! Store Lifecycle
//!
//! Runs the connect/load sequence on a spawned task and reports each step
//! through an [`EventStream`].
//!
//! ## Sequence
//! 1. pre-entities hooks
//! 2. `Start`
//! 3. driver connect (bounded by `StoreConfig::connect_timeout` when set)
//! 4. one `EntityLoaded` per schema, in registration order
//! 5. post-entities hooks, then `End`
//!
//! Any failure emits a single `Error` and stops the sequence.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, watch};

use crate::config::StoreConfig;
use crate::domain::driver::{EntitySchema, StoreDriver};
use crate::domain::event::{LifecycleEvent, LifecycleState};
use crate::domain::registry::EntityRegistry;
use crate::error::{StoreConnectionError, StoreResult};

const EVENT_BUFFER: usize = 16;

pub type PreEntitiesHook = Box<dyn Fn() + Send + Sync>;
pub type PostEntitiesHook = Box<dyn Fn(&EntityRegistry) + Send + Sync>;

/// One-shot store lifecycle
///
/// ## Examples
/// ```rust,no_run
/// use store::{MemoryStoreDriver, StoreConfig, StoreLifecycle};
///
/// # async fn run() -> Result<(), store::StoreConnectionError> {
/// let registry = StoreLifecycle::new(MemoryStoreDriver, StoreConfig::new("memory://"))
///     .on_post_entities(|registry| println!("{} entities", registry.len()))
///     .begin()
///     .ready()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct StoreLifecycle<D>
where
    D: StoreDriver,
{
    driver: D,
    config: StoreConfig,
    schemas: Vec<Box<dyn EntitySchema<D::Connection>>>,
    pre_entities: Vec<PreEntitiesHook>,
    post_entities: Vec<PostEntitiesHook>,
    state: watch::Sender<LifecycleState>,
}

impl<D> StoreLifecycle<D>
where
    D: StoreDriver + Send + Sync + 'static,
{
    pub fn new(driver: D, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(LifecycleState::Idle);
        Self {
            driver,
            config,
            schemas: Vec::new(),
            pre_entities: Vec::new(),
            post_entities: Vec::new(),
            state,
        }
    }

    /// Register an entity schema; load order follows registration order
    pub fn entity<S>(mut self, schema: S) -> Self
    where
        S: EntitySchema<D::Connection> + 'static,
    {
        self.schemas.push(Box::new(schema));
        self
    }

    /// Run before the connection attempt starts
    pub fn on_pre_entities<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.pre_entities.push(Box::new(hook));
        self
    }

    /// Run after every entity loaded, before `End` is emitted
    pub fn on_post_entities<F>(mut self, hook: F) -> Self
    where
        F: Fn(&EntityRegistry) + Send + Sync + 'static,
    {
        self.post_entities.push(Box::new(hook));
        self
    }

    /// Observe state transitions
    pub fn state(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Start the sequence on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn begin(self) -> EventStream {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(self.run(tx));
        EventStream { rx }
    }

    async fn run(self, events: mpsc::Sender<LifecycleEvent>) {
        match self.load(&events).await {
            Ok(registry) => {
                tracing::info!(entities = registry.len(), "Store ready");
                self.state.send_replace(LifecycleState::Ready);
                emit(&events, LifecycleEvent::End(registry)).await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Store initialization failed");
                self.state.send_replace(LifecycleState::Failed);
                emit(&events, LifecycleEvent::Error(err)).await;
            }
        }
    }

    async fn load(&self, events: &mpsc::Sender<LifecycleEvent>) -> StoreResult<EntityRegistry> {
        for hook in &self.pre_entities {
            hook();
        }

        let address = self.config.address.clone();
        self.state.send_replace(LifecycleState::Connecting);
        emit(events, LifecycleEvent::Start { address }).await;

        let connecting = self.driver.connect(&self.config);
        let connection = match self.config.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| StoreConnectionError::Timeout(limit))??,
            None => connecting.await?,
        };

        self.state.send_replace(LifecycleState::LoadingEntities);
        let mut registry = EntityRegistry::default();
        for schema in &self.schemas {
            let name = schema.name().to_string();
            if registry.contains(&name) {
                return Err(StoreConnectionError::DuplicateEntity(name));
            }

            let handle = schema.load(&connection).await?;
            registry.insert(name.clone(), handle)?;

            tracing::debug!(entity = %name, "Entity loaded");
            emit(events, LifecycleEvent::EntityLoaded { name }).await;
        }

        for hook in &self.post_entities {
            hook(&registry);
        }

        Ok(registry)
    }
}

async fn emit(events: &mpsc::Sender<LifecycleEvent>, event: LifecycleEvent) {
    let name = event.name();
    if events.send(event).await.is_err() {
        tracing::debug!(event = name, "Lifecycle event dropped, no subscriber");
    }
}

/// Ordered lifecycle events of one [`StoreLifecycle::begin`] call
///
/// Yields `None` once the terminal event has been delivered.
pub struct EventStream {
    rx: mpsc::Receiver<LifecycleEvent>,
}

impl EventStream {
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        self.rx.recv().await
    }

    /// Wait for the terminal event
    ///
    /// Intermediate events are discarded; subscribe with [`recv`](Self::recv)
    /// to observe them.
    pub async fn ready(mut self) -> StoreResult<EntityRegistry> {
        while let Some(event) = self.rx.recv().await {
            match event {
                LifecycleEvent::End(registry) => return Ok(registry),
                LifecycleEvent::Error(err) => return Err(err),
                _ => {}
            }
        }
        Err(StoreConnectionError::Aborted)
    }
}

impl Stream for EventStream {
    type Item = LifecycleEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
