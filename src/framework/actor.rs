//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the in-memory store for one entity type and
//! processes all incoming [`ResourceRequest`]s sequentially in its own
//! Tokio task. Exclusive ownership of the store within the task is what
//! makes every mutation a read-modify-write against current state, with no
//! locks and no lost updates: a vendor status change and a gateway payment
//! event racing on the same order are simply ordered by the channel.
//!
//! A `CreateGroup` request is handled inside a single message, so no other
//! request can interleave with it: readers of this store either see the
//! whole group or none of it.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state
/// (`store`) and the receiver end of the channel; [`ResourceClient`] is the
/// cloneable sending half.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the mpsc channel; when it is full,
    /// client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes.
    ///
    /// # Context Injection
    /// `context` is injected into every entity hook, so entities can reach
    /// dependencies (other actors' clients) that were wired up after this
    /// actor was constructed.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g. "Order" instead of
        // "order_desk::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::CreateGroup { params, respond_to } => {
                    debug!(entity_type, count = params.len(), "CreateGroup");
                    // Construct every entity before touching the store, so
                    // a rejection anywhere leaves nothing behind.
                    let mut ids = Vec::with_capacity(params.len());
                    let mut items = Vec::with_capacity(params.len());
                    let mut construct_err = None;
                    for p in params {
                        let id = T::Id::from(self.next_id);
                        self.next_id += 1;
                        match T::from_create_params(id.clone(), p) {
                            Ok(item) => {
                                ids.push(id);
                                items.push(item);
                            }
                            Err(e) => {
                                construct_err = Some(e);
                                break;
                            }
                        }
                    }
                    if let Some(e) = construct_err {
                        warn!(entity_type, error = %e, "CreateGroup failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Err(e) = T::on_create_group(&mut items, &context).await {
                        warn!(entity_type, error = %e, "on_create_group failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    // Past this point the commit cannot fail: plain inserts,
                    // no awaits.
                    for (id, item) in ids.iter().zip(items.into_iter()) {
                        self.store.insert(id.clone(), item);
                    }
                    info!(
                        entity_type,
                        created = ids.len(),
                        size = self.store.len(),
                        "Created group"
                    );
                    let _ = respond_to.send(Ok(ids));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, found = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use thiserror::Error;

    // --- Minimal test resource ---

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        subject: String,
        open: bool,
    }

    #[derive(Debug)]
    struct TicketCreate {
        subject: String,
    }

    #[derive(Debug)]
    struct TicketUpdate {
        subject: Option<String>,
    }

    #[derive(Debug)]
    enum TicketAction {
        Close,
    }

    #[derive(Debug)]
    struct OpenOnly(bool);

    #[derive(Debug, Clone, Error, PartialEq)]
    enum TicketError {
        #[error("subject must not be empty")]
        EmptySubject,
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u32;
        type Create = TicketCreate;
        type Update = TicketUpdate;
        type Action = TicketAction;
        type ActionResult = bool;
        type Filter = OpenOnly;
        type Context = ();
        type Error = TicketError;

        fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
            if params.subject.is_empty() {
                return Err(TicketError::EmptySubject);
            }
            Ok(Self {
                id,
                subject: params.subject,
                open: true,
            })
        }

        fn matches(&self, filter: &OpenOnly) -> bool {
            !filter.0 || self.open
        }

        async fn on_update(
            &mut self,
            update: TicketUpdate,
            _ctx: &(),
        ) -> Result<(), TicketError> {
            if let Some(subject) = update.subject {
                self.subject = subject;
            }
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: TicketAction,
            _ctx: &(),
        ) -> Result<bool, TicketError> {
            match action {
                TicketAction::Close => {
                    let changed = self.open;
                    self.open = false;
                    Ok(changed)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_crud_and_action_roundtrip() {
        let (actor, client) = ResourceActor::<Ticket>::new(10);
        tokio::spawn(actor.run(()));

        let id = client
            .create(TicketCreate {
                subject: "printer on fire".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let ticket = client.get(id).await.unwrap().unwrap();
        assert_eq!(ticket.subject, "printer on fire");
        assert!(ticket.open);

        let updated = client
            .update(
                id,
                TicketUpdate {
                    subject: Some("printer still on fire".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.subject, "printer still on fire");

        let changed = client.perform_action(id, TicketAction::Close).await.unwrap();
        assert!(changed);
        let changed_again = client.perform_action(id, TicketAction::Close).await.unwrap();
        assert!(!changed_again);

        client.delete(id).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_group_is_all_or_nothing() {
        let (actor, client) = ResourceActor::<Ticket>::new(10);
        tokio::spawn(actor.run(()));

        // One invalid member poisons the whole group.
        let result = client
            .create_group(vec![
                TicketCreate { subject: "a".into() },
                TicketCreate { subject: String::new() },
                TicketCreate { subject: "c".into() },
            ])
            .await;
        assert!(result.is_err());
        let listed = client.list(OpenOnly(false)).await.unwrap();
        assert!(listed.is_empty(), "no member of a failed group may be stored");

        // A valid group lands as a unit, ids in input order.
        let ids = client
            .create_group(vec![
                TicketCreate { subject: "a".into() },
                TicketCreate { subject: "b".into() },
            ])
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert_eq!(client.list(OpenOnly(false)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_applies_filter() {
        let (actor, client) = ResourceActor::<Ticket>::new(10);
        tokio::spawn(actor.run(()));

        let a = client
            .create(TicketCreate { subject: "a".into() })
            .await
            .unwrap();
        let _b = client
            .create(TicketCreate { subject: "b".into() })
            .await
            .unwrap();
        client.perform_action(a, TicketAction::Close).await.unwrap();

        let open = client.list(OpenOnly(true)).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].subject, "b");
        assert_eq!(client.list(OpenOnly(false)).await.unwrap().len(), 2);
    }
}
