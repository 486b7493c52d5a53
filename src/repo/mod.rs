//! Repository interfaces for the content factory and catalogs
//!
//! Pages never own their data: they read and write through these traits, so
//! the same UI runs on the in-memory store and on `SQLite`
//! ([`crate::db::Database`]).

mod memory;

pub use memory::{MemoryRepository, MemoryStore};

use crate::error::Result;
use crate::models::{
    Assistant, BasePostItem, CheckItem, CollectedItem, Prompt, PublicationItem, Source,
    SupportTicket,
};

/// A stored record with a string id
pub trait Record: Clone + Send + 'static {
    /// Entity name used in logs and errors
    const ENTITY: &'static str;

    /// Record id
    fn id(&self) -> &str;
}

/// Ordered collection of records of one kind
pub trait Repository<T: Record> {
    /// All records, in insertion order
    fn list(&self) -> Result<Vec<T>>;

    /// Record by id
    fn get(&self, id: &str) -> Result<Option<T>>;

    /// Append a record; fails if the id is already taken
    fn insert(&mut self, item: &T) -> Result<()>;

    /// Replace a record in place; fails with `NotFound` for unknown ids
    fn update(&mut self, item: &T) -> Result<()>;

    /// Remove a record, returning whether it existed
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Number of records
    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}

/// Source registry
pub trait ContentSourceRepository: Repository<Source> {}
impl<R: Repository<Source>> ContentSourceRepository for R {}

/// Collected items
pub trait CollectionRepository: Repository<CollectedItem> {}
impl<R: Repository<CollectedItem>> CollectionRepository for R {}

/// Credibility check queue
pub trait CheckRepository: Repository<CheckItem> {}
impl<R: Repository<CheckItem>> CheckRepository for R {}

/// Base post drafts
pub trait BasePostRepository: Repository<BasePostItem> {}
impl<R: Repository<BasePostItem>> BasePostRepository for R {}

/// Publications
pub trait PublicationRepository: Repository<PublicationItem> {}
impl<R: Repository<PublicationItem>> PublicationRepository for R {}

/// Custom assistants
pub trait AssistantRepository: Repository<Assistant> {}
impl<R: Repository<Assistant>> AssistantRepository for R {}

/// Prompt catalog
pub trait PromptRepository: Repository<Prompt> {}
impl<R: Repository<Prompt>> PromptRepository for R {}

/// Submitted support tickets
pub trait TicketRepository: Repository<SupportTicket> {}
impl<R: Repository<SupportTicket>> TicketRepository for R {}

/// Every repository the app needs, behind one object
pub trait Store:
    ContentSourceRepository
    + CollectionRepository
    + CheckRepository
    + BasePostRepository
    + PublicationRepository
    + AssistantRepository
    + PromptRepository
    + TicketRepository
    + Send
{
    /// Nothing has been stored yet
    fn is_empty(&self) -> Result<bool> {
        Ok(Repository::<Source>::count(self)? == 0
            && Repository::<CollectedItem>::count(self)? == 0
            && Repository::<CheckItem>::count(self)? == 0
            && Repository::<BasePostItem>::count(self)? == 0
            && Repository::<PublicationItem>::count(self)? == 0
            && Repository::<Assistant>::count(self)? == 0
            && Repository::<Prompt>::count(self)? == 0)
    }
}

impl<S> Store for S where
    S: ContentSourceRepository
        + CollectionRepository
        + CheckRepository
        + BasePostRepository
        + PublicationRepository
        + AssistantRepository
        + PromptRepository
        + TicketRepository
        + Send
{
}
