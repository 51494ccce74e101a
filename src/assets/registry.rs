//! # Asset Placement Registry
//!
//! Issues load requests onto the async runtime and collects finished objects
//! into the searchable-object list.
//!
//! Loads run on runtime worker threads. Each finished load is sent back over
//! a channel and applied by [`AssetRegistry::poll`] on the frame loop's
//! thread, so the object list and the role slots have a single writer.
//!
//! Roles are bound once every tagged load has settled. The registry must be
//! [sealed](AssetRegistry::seal) first, which marks the end of request issuing
//! and starts a timeout. If the timeout passes first, roles are bound from
//! whatever has arrived and a warning is logged.

use super::{AssetLoader, AssetRequest, LoadedAsset, ObjectId, SearchableObject, Tag};
use crate::KeyhuntResult;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// A finished load travelling back to the frame loop.
#[derive(Debug)]
struct LoadCompletion {
    request: AssetRequest,
    result: KeyhuntResult<LoadedAsset>,
}

/// Objects bound to the key and treasure roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSlots {
    pub key: Option<ObjectId>,
    pub treasure: Option<ObjectId>,
}

impl RoleSlots {
    pub fn is_key(&self, id: ObjectId) -> bool {
        self.key == Some(id)
    }

    pub fn is_treasure(&self, id: ObjectId) -> bool {
        self.treasure == Some(id)
    }
}

/// Progress of role binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResolution {
    /// Requests may still be issued
    Open,
    /// Waiting for tagged loads, bound at the deadline at the latest
    Waiting { deadline: Instant },
    /// Roles have been bound
    Resolved { timed_out: bool },
}

/// Summary of one role binding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleReport {
    pub slots: RoleSlots,
    /// Tagged loads still outstanding when roles were bound
    pub outstanding: usize,
    pub timed_out: bool,
}

/// Registry of searchable objects fed by asynchronous loads.
pub struct AssetRegistry {
    loader: Arc<dyn AssetLoader>,
    runtime: Handle,
    sender: mpsc::UnboundedSender<LoadCompletion>,
    receiver: mpsc::UnboundedReceiver<LoadCompletion>,
    objects: Vec<SearchableObject>,
    pending: usize,
    pending_tagged: usize,
    failed: usize,
    roles: RoleSlots,
    resolution: RoleResolution,
}

impl AssetRegistry {
    /// Creates an empty registry that spawns loads onto `runtime`.
    pub fn new(loader: Arc<dyn AssetLoader>, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            loader,
            runtime,
            sender,
            receiver,
            objects: Vec::new(),
            pending: 0,
            pending_tagged: 0,
            failed: 0,
            roles: RoleSlots::default(),
            resolution: RoleResolution::Open,
        }
    }

    /// Starts loading one model. Returns immediately; the object appears in
    /// the registry after a later [`poll`](Self::poll).
    pub fn request(&mut self, request: AssetRequest) {
        if request.tag.is_role() {
            if !matches!(self.resolution, RoleResolution::Open) {
                warn!(
                    "{:?} object {} requested after the registry was sealed",
                    request.tag, request.path
                );
            }
            self.pending_tagged += 1;
        }
        self.pending += 1;

        debug!("Requesting {} ({:?})", request.path, request.tag);
        let load = self.loader.load(&request.path);
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = load.await;
            // The receiver only goes away with the registry itself
            let _ = sender.send(LoadCompletion { request, result });
        });
    }

    pub fn request_all(&mut self, requests: impl IntoIterator<Item = AssetRequest>) {
        for request in requests {
            self.request(request);
        }
    }

    /// Applies every load that has finished since the last poll.
    ///
    /// Returns the number of completions applied, failures included.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Waits for the next load to finish and applies it.
    ///
    /// Returns `false` immediately when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Waits until every outstanding load has finished.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn apply(&mut self, completion: LoadCompletion) {
        let LoadCompletion { request, result } = completion;
        self.pending = self.pending.saturating_sub(1);
        if request.tag.is_role() {
            self.pending_tagged = self.pending_tagged.saturating_sub(1);
        }

        match result {
            Ok(asset) => {
                let object = SearchableObject::instantiate(&request, &asset);
                debug!("Object {} ready: {} ({:?})", object.id, object.path, object.tag);
                self.objects.push(object);
            }
            Err(e) => {
                self.failed += 1;
                warn!("Skipping {}: {}", request.path, e);
            }
        }
    }

    /// Marks the end of request issuing. Roles bind once tagged loads have
    /// settled, or after `timeout` from `now`.
    pub fn seal(&mut self, now: Instant, timeout: Duration) {
        if matches!(self.resolution, RoleResolution::Open) {
            info!(
                "Asset registry sealed with {} loads pending ({} tagged)",
                self.pending, self.pending_tagged
            );
            self.resolution = RoleResolution::Waiting {
                deadline: now + timeout,
            };
        }
    }

    /// Binds roles if the registry is sealed and either every tagged load has
    /// settled or the deadline has passed. Runs at most once.
    pub fn update_roles(&mut self, now: Instant) -> Option<RoleReport> {
        let RoleResolution::Waiting { deadline } = self.resolution else {
            return None;
        };

        if self.pending_tagged == 0 {
            Some(self.finish_resolution(false))
        } else if now >= deadline {
            warn!(
                "Binding roles with {} tagged loads still outstanding",
                self.pending_tagged
            );
            Some(self.finish_resolution(true))
        } else {
            None
        }
    }

    fn finish_resolution(&mut self, timed_out: bool) -> RoleReport {
        let slots = self.resolve_roles();
        self.resolution = RoleResolution::Resolved { timed_out };
        RoleReport {
            slots,
            outstanding: self.pending_tagged,
            timed_out,
        }
    }

    /// Binds the first KEY and first TREASURE object in registry order.
    ///
    /// Can be called again to pick up objects that arrived late.
    pub fn resolve_roles(&mut self) -> RoleSlots {
        self.roles = RoleSlots {
            key: self.first_tagged(Tag::Key),
            treasure: self.first_tagged(Tag::Treasure),
        };

        info!(
            "Roles bound: key {}, treasure {}",
            describe_slot(self.roles.key),
            describe_slot(self.roles.treasure)
        );
        if self.roles.key.is_none() {
            warn!("No key object is bound; the key cannot be found this session");
        }
        if self.roles.treasure.is_none() {
            warn!("No treasure object is bound; the game cannot be won this session");
        }
        self.roles
    }

    fn first_tagged(&self, tag: Tag) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.tag == tag).map(|o| o.id)
    }

    pub fn objects(&self) -> &[SearchableObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&SearchableObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn roles(&self) -> RoleSlots {
        self.roles
    }

    pub fn resolution(&self) -> RoleResolution {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, RoleResolution::Resolved { .. })
    }

    /// Loads still in flight.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// KEY/TREASURE loads still in flight.
    pub fn pending_tagged(&self) -> usize {
        self.pending_tagged
    }

    /// Loads that finished with an error.
    pub fn failed(&self) -> usize {
        self.failed
    }
}

fn describe_slot(slot: Option<ObjectId>) -> String {
    slot.map_or_else(|| "unbound".to_string(), |id| id.to_string())
}
