//! Effect observers and the execute/undo entry points.

use nis_state::{ImportanceTransferMode, NisCache, RemoteLink, RemoteLinkOwner, StateError};
use nis_types::{Address, Amount, BlockHeight};
use tracing::trace;

use crate::effect::Effect;
use crate::error::TransactionError;
use crate::mosaic_supply::MosaicSupplyType;
use crate::Transaction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationTrigger {
    Execute,
    Undo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationContext {
    pub height: BlockHeight,
    pub trigger: NotificationTrigger,
}

impl NotificationContext {
    pub fn execute(height: BlockHeight) -> Self {
        Self { height, trigger: NotificationTrigger::Execute }
    }

    pub fn undo(height: BlockHeight) -> Self {
        Self { height, trigger: NotificationTrigger::Undo }
    }
}

/// Receives the effects of executed or undone transactions.
pub trait EffectObserver {
    fn notify(&mut self, effect: &Effect, context: &NotificationContext) -> Result<(), TransactionError>;
}

/// Buffers effects and replays them in reverse order on [`commit`](Self::commit).
pub struct ReversingObserver<'a> {
    inner: &'a mut dyn EffectObserver,
    pending: Vec<(Effect, NotificationContext)>,
}

impl<'a> ReversingObserver<'a> {
    pub fn new(inner: &'a mut dyn EffectObserver) -> Self {
        Self { inner, pending: Vec::new() }
    }

    pub fn commit(self) -> Result<(), TransactionError> {
        let Self { inner, pending } = self;
        for (effect, context) in pending.into_iter().rev() {
            inner.notify(&effect, &context)?;
        }
        Ok(())
    }
}

impl EffectObserver for ReversingObserver<'_> {
    fn notify(&mut self, effect: &Effect, context: &NotificationContext) -> Result<(), TransactionError> {
        self.pending.push((effect.clone(), *context));
        Ok(())
    }
}

/// Apply `tx` at `height`, notifying each effect in order.
pub fn execute(tx: &Transaction, observer: &mut dyn EffectObserver, height: BlockHeight) -> Result<(), TransactionError> {
    let context = NotificationContext::execute(height);
    for effect in tx.effects() {
        observer.notify(&effect, &context)?;
    }
    Ok(())
}

/// Revert `tx` previously executed at `height`.
pub fn undo(tx: &Transaction, observer: &mut dyn EffectObserver, height: BlockHeight) -> Result<(), TransactionError> {
    let context = NotificationContext::undo(height);
    let mut reversing = ReversingObserver::new(observer);
    for effect in tx.effects() {
        reversing.notify(&effect.invert(), &context)?;
    }
    reversing.commit()
}

/// Applies effects to a [`NisCache`].
pub struct StateObserver<'a> {
    cache: &'a mut NisCache,
}

impl<'a> StateObserver<'a> {
    pub fn new(cache: &'a mut NisCache) -> Self {
        Self { cache }
    }

    fn touch(&mut self, account: &Address, context: &NotificationContext) {
        let state = self.cache.accounts.find_or_create(account);
        state.height.get_or_insert(context.height);
        state.increment_reference_count();
    }

    fn release(&mut self, account: &Address, context: &NotificationContext) -> Result<(), StateError> {
        let state = self.cache.accounts.get_mut(account)?;
        let remaining = state.decrement_reference_count()?;
        if remaining == 0 && state.height == Some(context.height) {
            trace!(%account, height = %context.height, "removing account created at undone height");
            self.cache.accounts.remove(account);
        }
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: Amount, context: &NotificationContext) -> Result<(), StateError> {
        let state = self.cache.accounts.get_mut(account)?;
        state.credit(amount)?;
        match context.trigger {
            NotificationTrigger::Execute => state.weighted_balances.add_receive(context.height, amount),
            NotificationTrigger::Undo => state.weighted_balances.undo_send(context.height, amount),
        }
    }

    fn debit(&mut self, account: &Address, amount: Amount, context: &NotificationContext) -> Result<(), StateError> {
        let state = self.cache.accounts.get_mut(account)?;
        let mut weighted = state.weighted_balances.clone();
        match context.trigger {
            NotificationTrigger::Execute => weighted.add_send(context.height, amount)?,
            NotificationTrigger::Undo => weighted.undo_receive(context.height, amount)?,
        }
        state.debit(amount)?;
        state.weighted_balances = weighted;
        Ok(())
    }

    fn link_cosignatory(&mut self, multisig: &Address, cosignatory: &Address) -> Result<(), StateError> {
        self.cache.accounts.get_mut(multisig)?.multisig_links.add_cosignatory(cosignatory.clone())?;
        self.cache.accounts.get_mut(cosignatory)?.multisig_links.add_cosignatory_of(multisig.clone())
    }

    /// A removal from links with a zero threshold cannot be undone exactly:
    /// the threshold saturates at zero but re-adding increments it.
    fn unlink_cosignatory(&mut self, multisig: &Address, cosignatory: &Address) -> Result<(), StateError> {
        let links = &mut self.cache.accounts.get_mut(multisig)?.multisig_links;
        if links.has_cosignatory(cosignatory) && links.min_cosignatories() == 0 {
            return Err(StateError::IrreversibleCosignatoryRemoval(cosignatory.clone()));
        }
        links.remove_cosignatory(cosignatory);
        self.cache.accounts.get_mut(cosignatory)?.multisig_links.remove_cosignatory_of(multisig);
        Ok(())
    }

    fn remote_links(
        lessor: &Address,
        lessee: &Address,
        mode: ImportanceTransferMode,
        height: BlockHeight,
    ) -> (RemoteLink, RemoteLink) {
        (
            RemoteLink {
                address: lessee.clone(),
                effective_height: height,
                mode,
                owner: RemoteLinkOwner::HarvestingRemotely,
            },
            RemoteLink {
                address: lessor.clone(),
                effective_height: height,
                mode,
                owner: RemoteLinkOwner::RemoteHarvester,
            },
        )
    }

    fn apply(&mut self, effect: &Effect, context: &NotificationContext) -> Result<(), StateError> {
        match effect {
            Effect::AccountTouched { account } => {
                self.touch(account, context);
                Ok(())
            }
            Effect::AccountReleased { account } => self.release(account, context),
            Effect::BalanceTransfer { sender, recipient, amount } => {
                self.debit(sender, *amount, context)?;
                self.credit(recipient, *amount, context)
            }
            Effect::BalanceCredit { account, amount } => self.credit(account, *amount, context),
            Effect::BalanceDebit { account, amount } => self.debit(account, *amount, context),
            Effect::MosaicTransfer { sender, recipient, mosaic_id, quantity } => {
                self.cache.mosaics.transfer(mosaic_id, sender, recipient, *quantity)
            }
            Effect::MosaicSupplyChange { supplier, mosaic_id, supply_type, delta } => {
                let entry = self.cache.mosaics.get_mut(mosaic_id)?;
                if &entry.creator != supplier {
                    return Err(StateError::UnknownMosaic(mosaic_id.clone()));
                }
                match supply_type {
                    MosaicSupplyType::Create => entry.increase_supply(*delta),
                    MosaicSupplyType::Delete => entry.decrease_supply(*delta),
                }
            }
            Effect::CosignatoryAdded { multisig, cosignatory } => self.link_cosignatory(multisig, cosignatory),
            Effect::CosignatoryRemoved { multisig, cosignatory } => self.unlink_cosignatory(multisig, cosignatory),
            Effect::MinCosignatoriesChanged { multisig, delta } => self
                .cache
                .accounts
                .get_mut(multisig)?
                .multisig_links
                .increment_min_cosignatories_by(*delta),
            Effect::RemoteLinkAdded { lessor, lessee, mode } => {
                let (owner_link, remote_link) = Self::remote_links(lessor, lessee, *mode, context.height);
                self.cache.accounts.get_mut(lessor)?.remote_links.add_link(owner_link);
                self.cache.accounts.get_mut(lessee)?.remote_links.add_link(remote_link);
                Ok(())
            }
            Effect::RemoteLinkRemoved { lessor, lessee, mode } => {
                let (owner_link, remote_link) = Self::remote_links(lessor, lessee, *mode, context.height);
                self.cache.accounts.get_mut(lessee)?.remote_links.remove_link(&remote_link)?;
                self.cache.accounts.get_mut(lessor)?.remote_links.remove_link(&owner_link)
            }
        }
    }
}

impl EffectObserver for StateObserver<'_> {
    fn notify(&mut self, effect: &Effect, context: &NotificationContext) -> Result<(), TransactionError> {
        Ok(self.apply(effect, context)?)
    }
}
