//! Remote harvesting links.

use nis_types::{Address, BlockHeight};
use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Maximum number of links remembered per account.
const LINK_HISTORY: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportanceTransferMode {
    Activate,
    Deactivate,
}

/// Which side of the link an account is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteLinkOwner {
    /// The account delegates harvesting to a remote.
    HarvestingRemotely,
    /// The account is the remote proxy.
    RemoteHarvester,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLink {
    /// The account on the other side of the link.
    pub address: Address,
    pub effective_height: BlockHeight,
    pub mode: ImportanceTransferMode,
    pub owner: RemoteLinkOwner,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteStatus {
    NotSet,
    OwnerActivating,
    OwnerActive,
    OwnerDeactivating,
    OwnerInactive,
    RemoteActivating,
    RemoteActive,
    RemoteDeactivating,
    RemoteInactive,
}

impl RemoteStatus {
    /// Whether the link is, or is becoming, (de)activated.
    pub fn is_in_effect(&self) -> bool {
        !matches!(self, Self::NotSet | Self::OwnerInactive | Self::RemoteInactive)
    }
}

/// Stack of the most recent remote links, newest last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLinks {
    links: Vec<RemoteLink>,
}

impl RemoteLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_link(&mut self, link: RemoteLink) {
        if self.links.len() == LINK_HISTORY {
            self.links.remove(0);
        }
        self.links.push(link);
    }

    /// Remove the current link; `link` must match it exactly.
    pub fn remove_link(&mut self, link: &RemoteLink) -> Result<(), StateError> {
        match self.links.last() {
            Some(current) if current == link => {
                self.links.pop();
                Ok(())
            }
            _ => Err(StateError::RemoteLinkMismatch),
        }
    }

    pub fn current(&self) -> Option<&RemoteLink> {
        self.links.last()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn is_harvesting_remotely(&self) -> bool {
        self.current().is_some_and(|l| l.owner == RemoteLinkOwner::HarvestingRemotely)
    }

    pub fn is_remote_harvester(&self) -> bool {
        self.current().is_some_and(|l| l.owner == RemoteLinkOwner::RemoteHarvester)
    }

    /// Status of the current link at `height`; changes take `delay` blocks.
    pub fn remote_status(&self, height: BlockHeight, delay: u64) -> RemoteStatus {
        let Some(link) = self.current() else {
            return RemoteStatus::NotSet;
        };
        let pending = height.blocks_since(link.effective_height) < delay;
        match (link.owner, link.mode, pending) {
            (RemoteLinkOwner::HarvestingRemotely, ImportanceTransferMode::Activate, true) => RemoteStatus::OwnerActivating,
            (RemoteLinkOwner::HarvestingRemotely, ImportanceTransferMode::Activate, false) => RemoteStatus::OwnerActive,
            (RemoteLinkOwner::HarvestingRemotely, ImportanceTransferMode::Deactivate, true) => RemoteStatus::OwnerDeactivating,
            (RemoteLinkOwner::HarvestingRemotely, ImportanceTransferMode::Deactivate, false) => RemoteStatus::OwnerInactive,
            (RemoteLinkOwner::RemoteHarvester, ImportanceTransferMode::Activate, true) => RemoteStatus::RemoteActivating,
            (RemoteLinkOwner::RemoteHarvester, ImportanceTransferMode::Activate, false) => RemoteStatus::RemoteActive,
            (RemoteLinkOwner::RemoteHarvester, ImportanceTransferMode::Deactivate, true) => RemoteStatus::RemoteDeactivating,
            (RemoteLinkOwner::RemoteHarvester, ImportanceTransferMode::Deactivate, false) => RemoteStatus::RemoteInactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(height: u64, mode: ImportanceTransferMode, owner: RemoteLinkOwner) -> RemoteLink {
        RemoteLink {
            address: Address::from_encoded_unchecked(format!("T{}", "R".repeat(39))),
            effective_height: BlockHeight::new(height),
            mode,
            owner,
        }
    }

    #[test]
    fn empty_links_are_not_set() {
        let links = RemoteLinks::new();
        assert_eq!(links.remote_status(BlockHeight::new(100), 1440), RemoteStatus::NotSet);
        assert!(links.current().is_none());
    }

    #[test]
    fn activation_takes_effect_after_delay() {
        let mut links = RemoteLinks::new();
        links.add_link(link(100, ImportanceTransferMode::Activate, RemoteLinkOwner::HarvestingRemotely));
        assert_eq!(links.remote_status(BlockHeight::new(1539), 1440), RemoteStatus::OwnerActivating);
        assert_eq!(links.remote_status(BlockHeight::new(1540), 1440), RemoteStatus::OwnerActive);
        assert!(links.is_harvesting_remotely());
    }

    #[test]
    fn remote_side_reports_remote_statuses() {
        let mut links = RemoteLinks::new();
        links.add_link(link(100, ImportanceTransferMode::Deactivate, RemoteLinkOwner::RemoteHarvester));
        assert_eq!(links.remote_status(BlockHeight::new(200), 1440), RemoteStatus::RemoteDeactivating);
        assert_eq!(links.remote_status(BlockHeight::new(2000), 1440), RemoteStatus::RemoteInactive);
        assert!(links.is_remote_harvester());
    }

    #[test]
    fn third_link_drops_oldest() {
        let mut links = RemoteLinks::new();
        let first = link(1, ImportanceTransferMode::Activate, RemoteLinkOwner::HarvestingRemotely);
        let second = link(2, ImportanceTransferMode::Deactivate, RemoteLinkOwner::HarvestingRemotely);
        let third = link(3, ImportanceTransferMode::Activate, RemoteLinkOwner::HarvestingRemotely);
        links.add_link(first);
        links.add_link(second.clone());
        links.add_link(third.clone());
        links.remove_link(&third).unwrap();
        links.remove_link(&second).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn remove_requires_matching_current_link() {
        let mut links = RemoteLinks::new();
        let first = link(1, ImportanceTransferMode::Activate, RemoteLinkOwner::HarvestingRemotely);
        links.add_link(first.clone());
        links.add_link(link(5, ImportanceTransferMode::Deactivate, RemoteLinkOwner::HarvestingRemotely));
        assert!(matches!(links.remove_link(&first), Err(StateError::RemoteLinkMismatch)));
    }
}
