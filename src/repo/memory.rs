//! In-memory repositories

use super::{Record, Repository};
use crate::error::{Error, Result};
use crate::models::{
    Assistant, BasePostItem, CheckItem, CollectedItem, Prompt, PublicationItem, Source,
    SupportTicket,
};

/// Records kept in a vector, in insertion order
#[derive(Debug, Clone)]
pub struct MemoryRepository<T> {
    items: Vec<T>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> MemoryRepository<T> {
    /// Repository pre-filled with `items`
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.items.clone())
    }

    fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.position(id).map(|idx| self.items[idx].clone()))
    }

    fn insert(&mut self, item: &T) -> Result<()> {
        if self.position(item.id()).is_some() {
            return Err(Error::validation(format!(
                "{} '{}' already exists",
                T::ENTITY,
                item.id()
            )));
        }
        self.items.push(item.clone());
        Ok(())
    }

    fn update(&mut self, item: &T) -> Result<()> {
        let idx = self
            .position(item.id())
            .ok_or_else(|| Error::not_found(T::ENTITY, item.id()))?;
        self.items[idx] = item.clone();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        match self.position(id) {
            Some(idx) => {
                self.items.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

/// All repositories in memory; nothing survives a restart
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sources: MemoryRepository<Source>,
    collection: MemoryRepository<CollectedItem>,
    checks: MemoryRepository<CheckItem>,
    base_posts: MemoryRepository<BasePostItem>,
    publications: MemoryRepository<PublicationItem>,
    assistants: MemoryRepository<Assistant>,
    prompts: MemoryRepository<Prompt>,
    tickets: MemoryRepository<SupportTicket>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! delegate_repository {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Repository<$ty> for MemoryStore {
                fn list(&self) -> Result<Vec<$ty>> {
                    self.$field.list()
                }

                fn get(&self, id: &str) -> Result<Option<$ty>> {
                    self.$field.get(id)
                }

                fn insert(&mut self, item: &$ty) -> Result<()> {
                    self.$field.insert(item)
                }

                fn update(&mut self, item: &$ty) -> Result<()> {
                    self.$field.update(item)
                }

                fn delete(&mut self, id: &str) -> Result<bool> {
                    self.$field.delete(id)
                }

                fn count(&self) -> Result<usize> {
                    self.$field.count()
                }
            }
        )*
    };
}

delegate_repository! {
    Source => sources,
    CollectedItem => collection,
    CheckItem => checks,
    BasePostItem => base_posts,
    PublicationItem => publications,
    Assistant => assistants,
    Prompt => prompts,
    SupportTicket => tickets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionStatus, SourceKind};
    use crate::repo::Store;

    #[test]
    fn test_crud_keeps_order() {
        let mut repo = MemoryRepository::new(vec![
            CollectedItem::sample("1", CollectionStatus::New),
            CollectedItem::sample("2", CollectionStatus::New),
        ]);
        repo.insert(&CollectedItem::sample("3", CollectionStatus::New)).unwrap();

        let mut second = repo.get("2").unwrap().unwrap();
        second.title = "Edited".to_string();
        repo.update(&second).unwrap();

        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(repo.get("2").unwrap().unwrap().title, "Edited");

        assert!(repo.delete("1").unwrap());
        assert!(!repo.delete("1").unwrap());
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_and_missing_ids() {
        let mut repo = MemoryRepository::new(vec![CollectedItem::sample("1", CollectionStatus::New)]);
        assert!(repo.insert(&CollectedItem::sample("1", CollectionStatus::New)).is_err());
        assert!(matches!(
            repo.update(&CollectedItem::sample("9", CollectionStatus::New)),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_store_through_trait_object() {
        let mut store: Box<dyn Store> = Box::new(MemoryStore::new());
        assert!(store.is_empty().unwrap());

        let source = Source::new(SourceKind::Rss, "TechCrunch", "https://techcrunch.com/feed").unwrap();
        Repository::<Source>::insert(&mut *store, &source).unwrap();

        assert!(!store.is_empty().unwrap());
        assert_eq!(Repository::<Source>::list(&*store).unwrap().len(), 1);
    }
}
