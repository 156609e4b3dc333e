//! Type-keyed store of ephemeral UI state with copy-on-write snapshots.
//!
//! Each chunk of UI state is keyed by its Rust type. Readers (the view layer)
//! hold a [`Snapshot`], which is immutable and cheap to clone. Writers go
//! through [`DataStore::transact`], which hands out a [`Draft`]; the draft is
//! published as the next snapshot only when the transaction returns `Ok`.
//!
//! Chunks untouched by a transaction are shared between consecutive
//! snapshots. A chunk is cloned the first time a transaction asks for it
//! mutably, so the previous snapshot never observes in-progress edits.
//!
//! `transact` borrows the store mutably for the whole transaction, so a
//! second transaction on the same store cannot start before the first ends.
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// Marker for values that can live in the store.
pub trait Chunk: Any + Clone + Send + Sync {}

impl<T: Any + Clone + Send + Sync> Chunk for T {}

trait ErasedChunk: Any + Send + Sync {
    fn clone_shared(&self) -> Arc<dyn ErasedChunk>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn chunk_name(&self) -> &'static str;
}

impl<T: Chunk> ErasedChunk for T {
    fn clone_shared(&self) -> Arc<dyn ErasedChunk> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn chunk_name(&self) -> &'static str {
        type_name::<T>()
    }
}

type Slots = HashMap<TypeId, Arc<dyn ErasedChunk>>;

fn downcast<T: Chunk>(slot: &Arc<dyn ErasedChunk>) -> Option<&T> {
    (**slot).as_any().downcast_ref::<T>()
}

/// Immutable, point-in-time view of the store.
#[derive(Clone, Default)]
pub struct Snapshot {
    slots: Arc<Slots>,
    generation: u64,
}

impl Snapshot {
    pub fn get<T: Chunk>(&self) -> Option<&T> {
        self.slots.get(&TypeId::of::<T>()).and_then(downcast::<T>)
    }

    pub fn contains<T: Chunk>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of committed transactions that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if both snapshots hold the very same `T` instance.
    pub fn shares<T: Chunk>(&self, other: &Snapshot) -> bool {
        let key = TypeId::of::<T>();
        match (self.slots.get(&key), other.slots.get(&key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .slots
            .values()
            .map(|slot| (**slot).chunk_name())
            .collect();
        names.sort_unstable();
        f.debug_struct("Snapshot")
            .field("generation", &self.generation)
            .field("chunks", &names)
            .finish()
    }
}

/// Mutable scratch copy of the store handed to a transaction.
pub struct Draft {
    slots: Slots,
}

impl Draft {
    /// Current chunk for `T`, never constructing one.
    pub fn get<T: Chunk>(&self) -> Option<&T> {
        self.slots.get(&TypeId::of::<T>()).and_then(downcast::<T>)
    }

    /// Mutable access to an existing chunk, cloning it away from the
    /// published snapshot on first use.
    pub fn get_mut<T: Chunk>(&mut self) -> Option<&mut T> {
        let slot = self.slots.get_mut(&TypeId::of::<T>())?;
        Some(unshare::<T>(slot))
    }

    /// Returns the chunk for `T`, constructing it with `init` if absent.
    ///
    /// Within one transaction repeated calls return the same instance.
    pub fn build<T: Chunk>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        let slot = self
            .slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                trace!(target: "frontend::store", chunk = type_name::<T>(), "building chunk");
                Arc::new(init()) as Arc<dyn ErasedChunk>
            });
        unshare::<T>(slot)
    }

    /// Replaces the chunk for `T` unconditionally.
    pub fn set<T: Chunk>(&mut self, value: T) -> &mut T {
        let key = TypeId::of::<T>();
        if self.slots.contains_key(&key) {
            trace!(target: "frontend::store", chunk = type_name::<T>(), "resetting chunk");
        }
        let slot = self
            .slots
            .entry(key)
            .insert_entry(Arc::new(value) as Arc<dyn ErasedChunk>)
            .into_mut();
        unshare::<T>(slot)
    }

    pub fn remove<T: Chunk>(&mut self) -> bool {
        self.slots.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn contains<T: Chunk>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("chunks", &self.slots.len())
            .finish()
    }
}

fn unshare<T: Chunk>(slot: &mut Arc<dyn ErasedChunk>) -> &mut T {
    if Arc::get_mut(slot).is_none() {
        *slot = (**slot).clone_shared();
    }
    Arc::get_mut(slot)
        .and_then(|chunk| (*chunk).as_any_mut().downcast_mut::<T>())
        .expect("chunk slots are keyed by their own TypeId and unshared above")
}

/// Owner of the published snapshot.
#[derive(Debug, Default)]
pub struct DataStore {
    published: Snapshot,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.published.clone()
    }

    pub fn generation(&self) -> u64 {
        self.published.generation
    }

    /// Runs `f` against a draft and publishes it if `f` succeeds.
    ///
    /// On `Err` (or a panic inside `f`) the draft is dropped and the
    /// previously published snapshot stays in place.
    pub fn transact<R, E>(
        &mut self,
        f: impl FnOnce(&mut Draft) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut draft = Draft {
            slots: (*self.published.slots).clone(),
        };

        let output = f(&mut draft)?;

        self.published = Snapshot {
            slots: Arc::new(draft.slots),
            generation: self.published.generation + 1,
        };
        Ok(output)
    }

    /// Infallible variant of [`transact`](Self::transact).
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Draft) -> R) -> R {
        match self.transact::<R, std::convert::Infallible>(|draft| Ok(f(draft))) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }
}
