//! Database module for `SQLite` storage (sources, pipeline stages, catalogs)

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::path::Path;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{
    Assistant, BasePostItem, CheckItem, CollectedItem, CollectedSourceType, ContentFormat,
    CredibilityScore, Prompt, PromptModel, PublicationItem, SocialNetwork, Source, SourceKind,
    SupportTicket, TicketCategory,
};
use crate::paths;
use crate::pipeline::StatusMachine;
use crate::repo::{Record, Repository};

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the default location
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        Self::open_path(&path)
    }

    /// Open or create the database at a specific path
    pub fn open_path(path: &Path) -> anyhow::Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let conn = Connection::open(path).context("Failed to open database")?;

        let db = Self { conn };
        db.init().context("Failed to initialize database schema")?;

        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.init().context("Failed to initialize database schema")?;
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> anyhow::Result<PathBuf> {
        paths::database_path()
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS sources (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                last_sync TEXT,
                items_count INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS collected_items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                source TEXT NOT NULL,
                source_type TEXT NOT NULL,
                date TEXT NOT NULL,
                format TEXT NOT NULL,
                summary TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'new',
                original_url TEXT
            );

            CREATE TABLE IF NOT EXISTS check_items (
                id TEXT PRIMARY KEY,
                source TEXT NOT NULL,
                source_icon TEXT NOT NULL,
                channel_name TEXT NOT NULL,
                title TEXT NOT NULL,
                credibility_score INTEGER NOT NULL,
                description TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending'
            );

            CREATE TABLE IF NOT EXISTS base_posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                image TEXT,
                model TEXT NOT NULL,
                prompt TEXT NOT NULL,
                base_post TEXT NOT NULL,
                social_networks TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft'
            );

            CREATE TABLE IF NOT EXISTS publications (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                text TEXT NOT NULL,
                image TEXT,
                network TEXT NOT NULL,
                channel TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                publish_date TEXT
            );

            CREATE TABLE IF NOT EXISTS assistants (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                preview TEXT NOT NULL,
                tags_json TEXT NOT NULL DEFAULT '[]',
                model TEXT NOT NULL,
                is_liked INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS support_tickets (
                id TEXT PRIMARY KEY,
                subject TEXT NOT NULL,
                category TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_collected_items_status ON collected_items(status);
            CREATE INDEX IF NOT EXISTS idx_check_items_status ON check_items(status);
            CREATE INDEX IF NOT EXISTS idx_publications_status ON publications(status);
            ",
        )?;

        Ok(())
    }

    fn exists(&self, table: &str, id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT 1 FROM {table} WHERE id = ?1"),
                params![id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

/// A record type with its own table
///
/// The first entry of `COLUMNS` is always `id`, and `values` returns one
/// value per column in the same order.
pub trait Table: Record + Sized {
    /// Table name
    const TABLE: &'static str;
    /// Column names, `id` first
    const COLUMNS: &'static [&'static str];

    /// Build a record from a row selected with `COLUMNS`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Column values, in `COLUMNS` order
    fn values(&self) -> Result<Vec<Value>>;
}

impl<T: Table> Repository<T> for Database {
    fn list(&self) -> Result<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], T::from_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn get(&self, id: &str) -> Result<Option<T>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        self.conn
            .query_row(&sql, params![id], T::from_row)
            .optional()
            .map_err(Into::into)
    }

    fn insert(&mut self, item: &T) -> Result<()> {
        if self.exists(T::TABLE, item.id())? {
            return Err(Error::validation(format!(
                "{} '{}' already exists",
                T::ENTITY,
                item.id()
            )));
        }

        let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );
        self.conn.execute(&sql, params_from_iter(item.values()?))?;
        tracing::debug!("Inserted {} {}", T::ENTITY, item.id());
        Ok(())
    }

    fn update(&mut self, item: &T) -> Result<()> {
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?1",
            T::TABLE,
            assignments.join(", ")
        );

        let changed = self.conn.execute(&sql, params_from_iter(item.values()?))?;
        if changed == 0 {
            return Err(Error::not_found(T::ENTITY, item.id()));
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1", T::TABLE), params![id])?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

// ==================== Column helpers ====================

fn invalid(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("invalid {what}: {value}").into(),
    )
}

fn text_column<T>(row: &Row<'_>, idx: usize, what: &str, parse: impl Fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| invalid(idx, what, &raw))
}

fn status_column<S: StatusMachine>(row: &Row<'_>, idx: usize) -> rusqlite::Result<S> {
    text_column(row, idx, S::ENTITY, |s| S::parse(s).ok())
}

fn timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => timestamp(&raw).map(Some).ok_or_else(|| invalid(idx, "timestamp", &raw)),
        None => Ok(None),
    }
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn optional_text(s: Option<&String>) -> Value {
    s.map_or(Value::Null, |s| text(s))
}

fn optional_time(dt: Option<DateTime<Utc>>) -> Value {
    dt.map_or(Value::Null, |dt| Value::Text(dt.to_rfc3339()))
}

// ==================== Tables ====================

impl Table for Source {
    const TABLE: &'static str = "sources";
    const COLUMNS: &'static [&'static str] =
        &["id", "kind", "name", "url", "is_active", "last_sync", "items_count"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: text_column(row, 1, "source kind", SourceKind::from_str)?,
            name: row.get(2)?,
            url: row.get(3)?,
            is_active: row.get::<_, i32>(4)? != 0,
            last_sync: optional_timestamp(row, 5)?,
            items_count: row.get(6)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(self.kind.as_str()),
            text(&self.name),
            text(&self.url),
            Value::Integer(i64::from(self.is_active)),
            optional_time(self.last_sync),
            Value::Integer(i64::from(self.items_count)),
        ])
    }
}

impl Table for CollectedItem {
    const TABLE: &'static str = "collected_items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "source",
        "source_type",
        "date",
        "format",
        "summary",
        "status",
        "original_url",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            source: row.get(2)?,
            source_type: text_column(row, 3, "source type", CollectedSourceType::from_str)?,
            date: text_column(row, 4, "date", |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())?,
            format: text_column(row, 5, "format", ContentFormat::from_str)?,
            summary: row.get(6)?,
            status: status_column(row, 7)?,
            original_url: row.get(8)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.title),
            text(&self.source),
            text(self.source_type.as_str()),
            Value::Text(self.date.format("%Y-%m-%d").to_string()),
            text(self.format.as_str()),
            text(&self.summary),
            text(self.status.as_str()),
            optional_text(self.original_url.as_ref()),
        ])
    }
}

impl Table for CheckItem {
    const TABLE: &'static str = "check_items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "source",
        "source_icon",
        "channel_name",
        "title",
        "credibility_score",
        "description",
        "status",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw_score: u8 = row.get(5)?;
        let credibility_score = CredibilityScore::new(raw_score)
            .map_err(|_| invalid(5, "credibility score", &raw_score.to_string()))?;

        Ok(Self {
            id: row.get(0)?,
            source: row.get(1)?,
            source_icon: row.get(2)?,
            channel_name: row.get(3)?,
            title: row.get(4)?,
            credibility_score,
            description: row.get(6)?,
            status: status_column(row, 7)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.source),
            text(&self.source_icon),
            text(&self.channel_name),
            text(&self.title),
            Value::Integer(i64::from(self.credibility_score.value())),
            text(&self.description),
            text(self.status.as_str()),
        ])
    }
}

impl Table for BasePostItem {
    const TABLE: &'static str = "base_posts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "text",
        "image",
        "model",
        "prompt",
        "base_post",
        "social_networks",
        "status",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let networks: String = row.get(7)?;
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            image: row.get(3)?,
            model: row.get(4)?,
            prompt: row.get(5)?,
            base_post: row.get(6)?,
            social_networks: SocialNetwork::split(&networks),
            status: status_column(row, 8)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.title),
            text(&self.text),
            optional_text(self.image.as_ref()),
            text(&self.model),
            text(&self.prompt),
            text(&self.base_post),
            Value::Text(SocialNetwork::join(&self.social_networks)),
            text(self.status.as_str()),
        ])
    }
}

impl Table for PublicationItem {
    const TABLE: &'static str = "publications";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "text",
        "image",
        "network",
        "channel",
        "status",
        "publish_date",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            image: row.get(3)?,
            network: text_column(row, 4, "network", SocialNetwork::from_str)?,
            channel: row.get(5)?,
            status: status_column(row, 6)?,
            publish_date: optional_timestamp(row, 7)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.title),
            text(&self.text),
            optional_text(self.image.as_ref()),
            text(self.network.key()),
            text(&self.channel),
            text(self.status.as_str()),
            optional_time(self.publish_date),
        ])
    }
}

impl Table for Assistant {
    const TABLE: &'static str = "assistants";
    const COLUMNS: &'static [&'static str] = &["id", "name", "description", "icon", "color"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            icon: row.get(3)?,
            color: row.get(4)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.name),
            text(&self.description),
            text(&self.icon),
            text(&self.color),
        ])
    }
}

impl Table for Prompt {
    const TABLE: &'static str = "prompts";
    const COLUMNS: &'static [&'static str] =
        &["id", "title", "preview", "tags_json", "model", "is_liked"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let tags_json: String = row.get(3)?;
        let tags: Vec<String> =
            serde_json::from_str(&tags_json).map_err(|_| invalid(3, "tag list", &tags_json))?;

        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            preview: row.get(2)?,
            tags,
            model: text_column(row, 4, "model", PromptModel::from_str)?,
            is_liked: row.get::<_, i32>(5)? != 0,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.title),
            text(&self.preview),
            Value::Text(serde_json::to_string(&self.tags)?),
            text(self.model.name()),
            Value::Integer(i64::from(self.is_liked)),
        ])
    }
}

impl Table for SupportTicket {
    const TABLE: &'static str = "support_tickets";
    const COLUMNS: &'static [&'static str] = &["id", "subject", "category", "message", "created_at"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            subject: row.get(1)?,
            category: text_column(row, 2, "ticket category", TicketCategory::from_str)?,
            message: row.get(3)?,
            created_at: text_column(row, 4, "timestamp", timestamp)?,
        })
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.id),
            text(&self.subject),
            text(self.category.as_str()),
            text(&self.message),
            Value::Text(self.created_at.to_rfc3339()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BasePostStatus, CollectionStatus, PublicationStatus};
    use crate::pipeline::{Action, advance};
    use crate::repo::Store;
    use tempfile::tempdir;

    #[test]
    fn test_database_init() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let db = Database::open_path(&path).unwrap();
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_source_crud() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let mut db = Database::open_path(&path).unwrap();

        let mut source = Source::new(SourceKind::Telegram, "@technews", "https://t.me/technews").unwrap();
        db.insert(&source).unwrap();
        assert!(db.insert(&source).is_err());

        source.toggle();
        source.items_count = 42;
        db.update(&source).unwrap();

        let sources: Vec<Source> = db.list().unwrap();
        assert_eq!(sources.len(), 1);
        assert!(!sources[0].is_active);
        assert_eq!(sources[0].items_count, 42);
        assert_eq!(sources[0].kind, SourceKind::Telegram);

        assert!(Repository::<Source>::delete(&mut db, &source.id).unwrap());
        assert!(Repository::<Source>::list(&db).unwrap().is_empty());
    }

    #[test]
    fn test_status_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sqlite");

        {
            let mut db = Database::open_path(&path).unwrap();
            db.insert(&CollectedItem::sample("1", CollectionStatus::New)).unwrap();
            db.insert(&CollectedItem::sample("2", CollectionStatus::New)).unwrap();
            advance::<CollectedItem, _>(&mut db, "1", Action::Approve).unwrap();
        }

        let db = Database::open_path(&path).unwrap();
        let items: Vec<CollectedItem> = db.list().unwrap();
        assert_eq!(items[0].status, CollectionStatus::InProgress);
        assert_eq!(items[1].status, CollectionStatus::New);
        assert_eq!(items[0].date, CollectedItem::sample("1", CollectionStatus::New).date);
    }

    #[test]
    fn test_publication_date_round_trip() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert(&PublicationItem::sample("p1", PublicationStatus::Draft)).unwrap();

        let published = advance::<PublicationItem, _>(&mut db, "p1", Action::Publish).unwrap();
        let stored: PublicationItem = db.get("p1").unwrap().unwrap();
        assert_eq!(stored.status, PublicationStatus::Published);
        assert_eq!(stored.publish_date, published.publish_date);

        assert!(advance::<PublicationItem, _>(&mut db, "p1", Action::Cancel).is_err());
    }

    #[test]
    fn test_list_columns_round_trip() {
        let mut db = Database::open_in_memory().unwrap();

        let post = BasePostItem {
            id: "b1".to_string(),
            title: "AI trends".to_string(),
            text: "Body".to_string(),
            image: None,
            model: "GPT-4".to_string(),
            prompt: "Write about AI".to_string(),
            base_post: "Theses".to_string(),
            social_networks: vec![SocialNetwork::Telegram, SocialNetwork::Instagram],
            status: BasePostStatus::Draft,
        };
        db.insert(&post).unwrap();
        let stored: Option<BasePostItem> = db.get("b1").unwrap();
        assert_eq!(stored, Some(post));

        let prompt = Prompt {
            id: "p1".to_string(),
            title: "SEO article".to_string(),
            preview: "Long-form".to_string(),
            tags: vec!["SEO".to_string(), "Marketing".to_string()],
            model: PromptModel::Claude,
            is_liked: true,
        };
        db.insert(&prompt).unwrap();
        let stored: Option<Prompt> = db.get("p1").unwrap();
        assert_eq!(stored, Some(prompt));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut db = Database::open_in_memory().unwrap();
        let ticket = SupportTicket::new("Refund", Some(TicketCategory::Billing), "Please").unwrap();
        assert!(matches!(db.update(&ticket), Err(Error::NotFound { .. })));
        db.insert(&ticket).unwrap();
        assert_eq!(Repository::<SupportTicket>::count(&db).unwrap(), 1);
    }
}
