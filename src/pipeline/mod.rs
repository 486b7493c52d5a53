//! Content factory pipeline
//!
//! Each editorial stage (collection, credibility check, base post,
//! publication) carries a closed status enum. Moving between statuses goes
//! through a single transition table per entity, so an action that the table
//! does not list fails with [`Error::InvalidTransition`] and leaves the record
//! untouched.
//!
//! ```text
//! collection   new ──approve──▶ in_progress     new ──reject──▶ rejected
//! check        pending ─approve─▶ approved      pending ─reject─▶ rejected
//! base post    draft ──approve──▶ ready         draft ──reject──▶ rejected
//! publication  draft ──publish──▶ published     draft ──cancel──▶ cancelled
//! ```

mod editorial;
mod readiness;

pub use editorial::{EditorialSettings, PostLength, Style, Tone};
pub use readiness::{AdaptationBoard, ReadinessFlag};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::repo::{Record, Repository};

/// User actions that move a record through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Accept the item into the next stage
    Approve,
    /// Drop the item
    Reject,
    /// Publish a draft publication
    Publish,
    /// Cancel a draft publication
    Cancel,
}

impl Action {
    /// Get action as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Publish => "publish",
            Self::Cancel => "cancel",
        }
    }

    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "publish" => Some(Self::Publish),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed status enum with an explicit transition table
pub trait StatusMachine: Copy + Eq + std::fmt::Debug + 'static {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// Every allowed `(from, action, to)` triple
    const TRANSITIONS: &'static [(Self, Action, Self)];

    /// All status values, in display order
    const ALL: &'static [Self];

    /// Storage / display key
    fn as_str(&self) -> &'static str;

    /// Next status for `action`, or `InvalidTransition`
    fn next(self, action: Action) -> Result<Self> {
        Self::TRANSITIONS
            .iter()
            .find(|(from, a, _)| *from == self && *a == action)
            .map(|(_, _, to)| *to)
            .ok_or(Error::InvalidTransition {
                entity: Self::ENTITY,
                from: self.as_str(),
                action,
            })
    }

    /// Actions listed for this status
    fn allowed_actions(self) -> Vec<Action> {
        Self::TRANSITIONS
            .iter()
            .filter(|(from, _, _)| *from == self)
            .map(|(_, action, _)| *action)
            .collect()
    }

    /// No outgoing transitions
    fn is_terminal(self) -> bool {
        !Self::TRANSITIONS.iter().any(|(from, _, _)| *from == self)
    }

    /// Parse from a storage / CLI key
    fn parse(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| Error::Parse(format!("unknown {} status: {s}", Self::ENTITY)))
    }
}

/// A record that carries a pipeline status
pub trait Staged: Record {
    /// Status enum for this stage
    type Status: StatusMachine;

    /// Current status
    fn status(&self) -> Self::Status;

    /// Overwrite the status (only called with a table-approved value)
    fn set_status(&mut self, status: Self::Status);

    /// Side effects of a successful transition
    fn on_transition(&mut self, _action: Action, _now: DateTime<Utc>) {}

    /// Apply `action`; on error the record is unchanged
    fn apply(&mut self, action: Action, now: DateTime<Utc>) -> Result<Self::Status> {
        let next = self.status().next(action)?;
        self.set_status(next);
        self.on_transition(action, now);
        Ok(next)
    }
}

/// Load a record, apply `action` and persist the result
pub fn advance<T, R>(repo: &mut R, id: &str, action: Action) -> Result<T>
where
    T: Staged,
    R: Repository<T> + ?Sized,
{
    advance_at(repo, id, action, Utc::now())
}

/// [`advance`] with an explicit clock
pub fn advance_at<T, R>(repo: &mut R, id: &str, action: Action, now: DateTime<Utc>) -> Result<T>
where
    T: Staged,
    R: Repository<T> + ?Sized,
{
    let mut item = repo
        .get(id)?
        .ok_or_else(|| Error::not_found(T::ENTITY, id))?;

    let from = item.status();
    if let Err(e) = item.apply(action, now) {
        tracing::debug!("Rejected {} on {} {}: {}", action, T::ENTITY, id, e);
        return Err(e);
    }

    repo.update(&item)?;
    tracing::info!(
        "{} {}: {} -> {}",
        T::ENTITY,
        id,
        from.as_str(),
        item.status().as_str()
    );
    Ok(item)
}

/// Count records per status, in the status enum's display order
pub fn count_by_status<T: Staged>(items: &[T]) -> Vec<(T::Status, usize)> {
    T::Status::ALL
        .iter()
        .map(|status| {
            let count = items.iter().filter(|item| item.status() == *status).count();
            (*status, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BasePostStatus, CheckStatus, CollectedItem, CollectionStatus, PublicationItem,
        PublicationStatus,
    };
    use crate::repo::MemoryRepository;

    fn statuses(repo: &MemoryRepository<CollectedItem>) -> Vec<(String, CollectionStatus)> {
        repo.list()
            .unwrap()
            .into_iter()
            .map(|item| (item.id, item.status))
            .collect()
    }

    #[test]
    fn test_transition_tables() {
        use Action::{Approve, Cancel, Publish, Reject};

        assert_eq!(CollectionStatus::New.next(Approve).unwrap(), CollectionStatus::InProgress);
        assert_eq!(CollectionStatus::New.next(Reject).unwrap(), CollectionStatus::Rejected);
        assert_eq!(CheckStatus::Pending.next(Approve).unwrap(), CheckStatus::Approved);
        assert_eq!(CheckStatus::Pending.next(Reject).unwrap(), CheckStatus::Rejected);
        assert_eq!(BasePostStatus::Draft.next(Approve).unwrap(), BasePostStatus::Ready);
        assert_eq!(BasePostStatus::Draft.next(Reject).unwrap(), BasePostStatus::Rejected);
        assert_eq!(PublicationStatus::Draft.next(Publish).unwrap(), PublicationStatus::Published);
        assert_eq!(PublicationStatus::Draft.next(Cancel).unwrap(), PublicationStatus::Cancelled);
    }

    #[test]
    fn test_repeating_action_on_result_fails() {
        use Action::{Approve, Cancel, Publish, Reject};

        for action in [Approve, Reject] {
            let to = CollectionStatus::New.next(action).unwrap();
            assert!(matches!(to.next(action), Err(Error::InvalidTransition { .. })));
            let to = CheckStatus::Pending.next(action).unwrap();
            assert!(matches!(to.next(action), Err(Error::InvalidTransition { .. })));
            let to = BasePostStatus::Draft.next(action).unwrap();
            assert!(matches!(to.next(action), Err(Error::InvalidTransition { .. })));
        }
        for action in [Publish, Cancel] {
            let to = PublicationStatus::Draft.next(action).unwrap();
            assert!(to.is_terminal());
            assert!(matches!(to.next(action), Err(Error::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_actions_outside_stage_are_rejected() {
        assert!(CollectionStatus::New.next(Action::Publish).is_err());
        assert!(PublicationStatus::Draft.next(Action::Approve).is_err());
        assert!(PublicationStatus::Scheduled.next(Action::Publish).is_err());
        assert!(PublicationStatus::Scheduled.is_terminal());
    }

    #[test]
    fn test_allowed_actions() {
        assert_eq!(
            CheckStatus::Pending.allowed_actions(),
            vec![Action::Approve, Action::Reject]
        );
        assert!(CheckStatus::Approved.allowed_actions().is_empty());
        assert_eq!(
            PublicationStatus::Draft.allowed_actions(),
            vec![Action::Publish, Action::Cancel]
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            CollectionStatus::parse("in-progress").unwrap(),
            CollectionStatus::InProgress
        );
        assert_eq!(
            PublicationStatus::parse("Cancelled").unwrap(),
            PublicationStatus::Cancelled
        );
        assert!(CheckStatus::parse("maybe").is_err());
    }

    #[test]
    fn test_collection_scenario() {
        let mut repo = MemoryRepository::new(vec![
            CollectedItem::sample("1", CollectionStatus::New),
            CollectedItem::sample("2", CollectionStatus::New),
            CollectedItem::sample("3", CollectionStatus::Rejected),
        ]);

        advance::<CollectedItem, _>(&mut repo, "1", Action::Approve).unwrap();
        assert_eq!(
            statuses(&repo),
            vec![
                ("1".to_string(), CollectionStatus::InProgress),
                ("2".to_string(), CollectionStatus::New),
                ("3".to_string(), CollectionStatus::Rejected),
            ]
        );

        advance::<CollectedItem, _>(&mut repo, "2", Action::Reject).unwrap();
        assert_eq!(
            statuses(&repo),
            vec![
                ("1".to_string(), CollectionStatus::InProgress),
                ("2".to_string(), CollectionStatus::Rejected),
                ("3".to_string(), CollectionStatus::Rejected),
            ]
        );
    }

    #[test]
    fn test_rejected_transition_is_not_persisted() {
        let mut repo = MemoryRepository::new(vec![CollectedItem::sample(
            "3",
            CollectionStatus::Rejected,
        )]);

        let result = advance::<CollectedItem, _>(&mut repo, "3", Action::Approve);
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
        assert_eq!(repo.get("3").unwrap().unwrap().status, CollectionStatus::Rejected);
    }

    #[test]
    fn test_publish_then_cancel_is_noop() {
        let mut repo = MemoryRepository::new(vec![PublicationItem::sample(
            "1",
            PublicationStatus::Draft,
        )]);

        let published = advance::<PublicationItem, _>(&mut repo, "1", Action::Publish).unwrap();
        assert_eq!(published.status, PublicationStatus::Published);
        assert!(published.publish_date.is_some());

        let result = advance::<PublicationItem, _>(&mut repo, "1", Action::Cancel);
        assert!(result.is_err());
        let stored = repo.get("1").unwrap().unwrap();
        assert_eq!(stored.status, PublicationStatus::Published);
        assert_eq!(stored.publish_date, published.publish_date);
    }

    #[test]
    fn test_unknown_id() {
        let mut repo: MemoryRepository<PublicationItem> = MemoryRepository::default();
        let result = advance::<PublicationItem, _>(&mut repo, "42", Action::Publish);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_count_by_status() {
        let items = vec![
            CollectedItem::sample("1", CollectionStatus::New),
            CollectedItem::sample("2", CollectionStatus::New),
            CollectedItem::sample("3", CollectionStatus::Rejected),
        ];
        assert_eq!(
            count_by_status(&items),
            vec![
                (CollectionStatus::New, 2),
                (CollectionStatus::InProgress, 0),
                (CollectionStatus::Rejected, 1),
            ]
        );
    }
}
