//! Vesting ledger.
//!
//! Every credit starts out unvested. Once per day (a fixed number of blocks)
//! a tenth of the unvested part becomes vested. The ledger keeps a
//! height-ordered history of snapshots so that any operation can be undone
//! exactly and balances can be queried at earlier heights.
//!
//! All arithmetic is integer arithmetic in micro units; rounding is floor.

use nis_types::{Amount, BlockHeight};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StateError;

/// Blocks per vesting day unless configured otherwise.
pub const DEFAULT_BLOCKS_PER_DAY: u64 = 1440;

/// A vested/unvested snapshot at a height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBalance {
    pub height: BlockHeight,
    pub vested: Amount,
    pub unvested: Amount,
    /// The amount received or sent by the operation that produced this snapshot.
    pub amount: Amount,
}

impl WeightedBalance {
    pub const ZERO: Self = Self {
        height: BlockHeight::ONE,
        vested: Amount::ZERO,
        unvested: Amount::ZERO,
        amount: Amount::ZERO,
    };

    pub fn create_unvested(height: BlockHeight, amount: Amount) -> Self {
        Self { height, vested: Amount::ZERO, unvested: amount, amount }
    }

    pub fn create_vested(height: BlockHeight, amount: Amount) -> Self {
        Self { height, vested: amount, unvested: Amount::ZERO, amount }
    }

    pub fn balance(&self) -> Amount {
        Amount::new(self.vested.micro().saturating_add(self.unvested.micro()))
    }

    /// Advance to the first block of the following day, vesting a tenth of the
    /// unvested part.
    pub fn next(&self, blocks_per_day: u64) -> Self {
        let h = self.height.raw();
        let next_height = h.div_ceil(blocks_per_day) * blocks_per_day + 1;
        let unvested = self.unvested.micro();
        let remaining = unvested / 10 * 9 + unvested % 10 * 9 / 10;
        let matured = unvested - remaining;
        Self {
            height: BlockHeight::new(next_height),
            vested: Amount::new(self.vested.micro().saturating_add(matured)),
            unvested: Amount::new(remaining),
            amount: Amount::ZERO,
        }
    }

    /// Snapshot after receiving `amount` at `height`.
    pub fn create_receive(&self, height: BlockHeight, amount: Amount) -> Result<Self, StateError> {
        let unvested = self
            .unvested
            .checked_add(amount)
            .ok_or(StateError::Overflow("unvested balance"))?;
        Ok(Self { height, vested: self.vested, unvested, amount })
    }

    /// Snapshot after sending `amount` at `height`.
    ///
    /// The amount is split between unvested and vested proportionally to the
    /// current ratio. Sending the whole balance leaves both parts at zero.
    pub fn create_send(&self, height: BlockHeight, amount: Amount) -> Result<Self, StateError> {
        let vested = self.vested.micro() as u128;
        let unvested = self.unvested.micro() as u128;
        let total = vested + unvested;
        let a = amount.micro() as u128;
        if a > total {
            return Err(StateError::InsufficientBalance { needed: amount, available: self.balance() });
        }
        if a == 0 {
            return Ok(Self { height, amount, ..*self });
        }

        let send_unvested = unvested * a / total;
        let send_vested = a - send_unvested;
        let (new_vested, new_unvested) = if vested < send_vested {
            let shortfall = send_vested - vested;
            (0, unvested - send_unvested - shortfall)
        } else {
            (vested - send_vested, unvested - send_unvested)
        };

        Ok(Self {
            height,
            vested: Amount::new(new_vested as u64),
            unvested: Amount::new(new_unvested as u64),
            amount,
        })
    }

    /// Project forward through whole days up to and including `height`.
    fn project(&self, height: BlockHeight, blocks_per_day: u64) -> Self {
        let mut current = *self;
        loop {
            if current.unvested.is_zero() {
                return current;
            }
            let next = current.next(blocks_per_day);
            if next.height > height {
                return current;
            }
            current = next;
        }
    }
}

/// What produced a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Seeded or pruned history; cannot be undone.
    Base,
    /// Day boundary crossed on the way to a receive or send.
    Advance,
    Receive,
    Send,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    kind: EntryKind,
    balance: WeightedBalance,
}

/// Height-ordered vesting history of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBalances {
    entries: Vec<Entry>,
    blocks_per_day: u64,
}

impl Default for WeightedBalances {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKS_PER_DAY)
    }
}

impl WeightedBalances {
    pub fn new(blocks_per_day: u64) -> Self {
        Self { entries: Vec::new(), blocks_per_day: blocks_per_day.max(1) }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn last(&self) -> Option<&WeightedBalance> {
        self.entries.last().map(|e| &e.balance)
    }

    fn check_height(&self, height: BlockHeight) -> Result<(), StateError> {
        match self.last() {
            Some(last) if height < last.height => {
                Err(StateError::HeightDecreasing { last: last.height, requested: height })
            }
            _ => Ok(()),
        }
    }

    /// First height of the day containing `height`.
    fn day_start(&self, height: BlockHeight) -> u64 {
        height.raw().saturating_sub(1) / self.blocks_per_day * self.blocks_per_day + 1
    }

    /// Day-boundary snapshots that must precede an operation at `height`.
    fn advances_to(&self, height: BlockHeight) -> Vec<Entry> {
        let Some(mut current) = self.last().copied() else {
            return Vec::new();
        };
        let mut advances = Vec::new();
        while height.raw() > current.height.raw().div_ceil(self.blocks_per_day) * self.blocks_per_day {
            let next = if current.unvested.is_zero() {
                // Nothing left to vest: jump straight to the target day.
                WeightedBalance {
                    height: BlockHeight::new(self.day_start(height)),
                    amount: Amount::ZERO,
                    ..current
                }
            } else {
                current.next(self.blocks_per_day)
            };
            advances.push(Entry { kind: EntryKind::Advance, balance: next });
            current = next;
        }
        advances
    }

    fn push_operation(
        &mut self,
        height: BlockHeight,
        kind: EntryKind,
        apply: impl FnOnce(&WeightedBalance) -> Result<WeightedBalance, StateError>,
    ) -> Result<(), StateError> {
        self.check_height(height)?;
        let advances = self.advances_to(height);
        let base = advances
            .last()
            .map(|e| e.balance)
            .or_else(|| self.last().copied())
            .unwrap_or(WeightedBalance { height, ..WeightedBalance::ZERO });
        let balance = apply(&base)?;
        self.entries.extend(advances);
        self.entries.push(Entry { kind, balance });
        Ok(())
    }

    /// Record a credit of `amount` at `height`.
    pub fn add_receive(&mut self, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        self.push_operation(height, EntryKind::Receive, |b| b.create_receive(height, amount))
    }

    /// Record a debit of `amount` at `height`. Fails without modifying the
    /// ledger when the balance is too low.
    pub fn add_send(&mut self, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        self.push_operation(height, EntryKind::Send, |b| b.create_send(height, amount))
    }

    /// Append a fully vested entry (nemesis seeding).
    pub fn add_fully_vested(&mut self, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        self.check_height(height)?;
        let base = self.last().copied().unwrap_or(WeightedBalance::ZERO);
        let vested = base
            .vested
            .checked_add(amount)
            .ok_or(StateError::Overflow("vested balance"))?;
        self.entries.push(Entry {
            kind: EntryKind::Base,
            balance: WeightedBalance { height, vested, unvested: base.unvested, amount },
        });
        Ok(())
    }

    fn undo_operation(&mut self, height: BlockHeight, kind: EntryKind, amount: Amount) -> Result<(), StateError> {
        self.undo_chain(height);
        match self.entries.last() {
            Some(e) if e.kind == kind && e.balance.height == height && e.balance.amount == amount => {}
            Some(e) => {
                debug!(?kind, %height, %amount, found = ?e.kind, at = %e.balance.height, "vesting undo mismatch");
                return Err(StateError::UndoMismatch(format!(
                    "expected {kind:?} of {amount} at {height}, found {:?} of {} at {}",
                    e.kind, e.balance.amount, e.balance.height
                )));
            }
            None => {
                return Err(StateError::UndoMismatch(format!("expected {kind:?} at {height}, ledger is empty")));
            }
        }
        self.entries.pop();
        while matches!(self.entries.last(), Some(e) if e.kind == EntryKind::Advance) {
            self.entries.pop();
        }
        Ok(())
    }

    /// Revert a previous [`add_receive`](Self::add_receive).
    pub fn undo_receive(&mut self, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        self.undo_operation(height, EntryKind::Receive, amount)
    }

    /// Revert a previous [`add_send`](Self::add_send).
    pub fn undo_send(&mut self, height: BlockHeight, amount: Amount) -> Result<(), StateError> {
        self.undo_operation(height, EntryKind::Send, amount)
    }

    /// Drop every entry after `height`, always keeping at least one.
    pub fn undo_chain(&mut self, height: BlockHeight) {
        while self.entries.len() > 1 && self.entries.last().is_some_and(|e| e.balance.height > height) {
            self.entries.pop();
        }
    }

    /// Turn a single nemesis receive into a fully vested balance.
    pub fn convert_to_fully_vested(&mut self) -> Result<(), StateError> {
        match self.entries.as_slice() {
            [only] if only.balance.height == BlockHeight::ONE => {
                let balance = WeightedBalance::create_vested(BlockHeight::ONE, only.balance.balance());
                self.entries[0] = Entry { kind: EntryKind::Base, balance };
                Ok(())
            }
            _ => Err(StateError::NotConvertible),
        }
    }

    /// Discard history before `height`. Balances at `height` and later are unchanged.
    pub fn prune(&mut self, height: BlockHeight) {
        let keep_from = self.entries.partition_point(|e| e.balance.height <= height);
        if keep_from <= 1 {
            return;
        }
        self.entries.drain(..keep_from - 1);
        self.entries[0].kind = EntryKind::Base;
    }

    fn snapshot_at(&self, height: BlockHeight) -> Option<WeightedBalance> {
        let count = self.entries.partition_point(|e| e.balance.height <= height);
        let last = self.entries.get(count.checked_sub(1)?)?;
        Some(last.balance.project(height, self.blocks_per_day))
    }

    /// Vested balance at `height`; zero before the first entry.
    pub fn get_vested(&self, height: BlockHeight) -> Amount {
        self.snapshot_at(height).map_or(Amount::ZERO, |b| b.vested)
    }

    /// Unvested balance at `height`; zero before the first entry.
    pub fn get_unvested(&self, height: BlockHeight) -> Amount {
        self.snapshot_at(height).map_or(Amount::ZERO, |b| b.unvested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(height: u64) -> BlockHeight {
        BlockHeight::new(height)
    }

    fn nem(coins: u64) -> Amount {
        Amount::from_nem(coins)
    }

    fn advance(balance: WeightedBalance, days: usize) -> WeightedBalance {
        (0..days).fold(balance, |b, _| b.next(DEFAULT_BLOCKS_PER_DAY))
    }

    #[test]
    fn next_moves_to_first_block_of_following_day() {
        for (from, to) in [(1, 1441), (770, 1441), (1440, 1441), (1441, 2881), (2880, 2881)] {
            let b = WeightedBalance::create_unvested(h(from), nem(1)).next(DEFAULT_BLOCKS_PER_DAY);
            assert_eq!(b.height, h(to), "from {from}");
        }
    }

    #[test]
    fn next_vests_a_tenth() {
        let b = WeightedBalance::create_unvested(h(1), nem(1_000_000)).next(DEFAULT_BLOCKS_PER_DAY);
        assert_eq!(b.unvested, Amount::new(900_000_000_000));
        assert_eq!(b.vested, Amount::new(100_000_000_000));
        assert_eq!(b.amount, Amount::ZERO);
    }

    #[test]
    fn next_handles_unvested_near_max() {
        let b = WeightedBalance {
            height: h(1),
            vested: Amount::ZERO,
            unvested: Amount::new(u64::MAX),
            amount: Amount::ZERO,
        };
        let n = b.next(DEFAULT_BLOCKS_PER_DAY);
        assert_eq!(n.unvested, Amount::new(16_602_069_666_338_596_453));
        assert_eq!(n.vested, Amount::new(1_844_674_407_370_955_162));
        assert_eq!(n.balance(), Amount::new(u64::MAX));
    }

    #[test]
    fn ten_days_of_decay() {
        let b = advance(WeightedBalance::create_unvested(h(1), nem(1_000_000)), 10);
        assert_eq!(b.height, h(14401));
        assert_eq!(b.unvested, Amount::new(348_678_440_100));
        assert_eq!(b.balance(), nem(1_000_000));
    }

    #[test]
    fn fifty_days_of_decay_with_floor_rounding() {
        let b = advance(WeightedBalance::create_unvested(h(1), Amount::new(1_000_000)), 50);
        assert_eq!(b.unvested, Amount::new(5149));
        assert_eq!(b.vested, Amount::new(994_851));
    }

    #[test]
    fn send_splits_proportionally() {
        let b = advance(WeightedBalance::create_unvested(h(1), nem(1_000_000)), 10);
        let sent = b.create_send(h(14401), nem(100_000)).unwrap();
        assert_eq!(sent.vested, Amount::new(586_189_403_910));
        assert_eq!(sent.unvested, Amount::new(313_810_596_090));

        let received = sent.create_receive(h(14401), nem(100_000)).unwrap();
        assert_eq!(received.unvested, Amount::new(413_810_596_090));
        assert_eq!(received.vested, Amount::new(586_189_403_910));
    }

    #[test]
    fn sending_whole_balance_leaves_nothing() {
        let b = WeightedBalance {
            height: h(1),
            vested: Amount::new(2_549_716),
            unvested: Amount::new(450_284),
            amount: Amount::ZERO,
        };
        let sent = b.create_send(h(1), Amount::new(3_000_000)).unwrap();
        assert_eq!(sent.vested, Amount::ZERO);
        assert_eq!(sent.unvested, Amount::ZERO);
    }

    #[test]
    fn send_above_balance_fails() {
        let b = WeightedBalance::create_unvested(h(1), nem(10));
        assert!(matches!(
            b.create_send(h(1), nem(11)),
            Err(StateError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn balance_is_fully_unvested_within_first_day() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(123)).unwrap();
        assert_eq!(wb.get_unvested(h(1440)), nem(123));
        assert_eq!(wb.get_vested(h(1440)), Amount::ZERO);
        assert_eq!(wb.get_unvested(h(1441)), Amount::new(110_700_000));
        assert_eq!(wb.get_vested(h(1441)), Amount::new(12_300_000));
    }

    #[test]
    fn receives_across_days_accumulate() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(123)).unwrap();
        wb.add_receive(h(2881), nem(345)).unwrap();
        assert_eq!(wb.get_unvested(h(4321)), Amount::new(400_167_000));
        assert_eq!(wb.size(), 4);
    }

    #[test]
    fn empty_ledger_reports_zero() {
        let wb = WeightedBalances::default();
        assert_eq!(wb.get_vested(h(100)), Amount::ZERO);
        assert_eq!(wb.get_unvested(h(100)), Amount::ZERO);
    }

    #[test]
    fn height_before_first_entry_reports_zero() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(100), nem(5)).unwrap();
        assert_eq!(wb.get_unvested(h(99)), Amount::ZERO);
        assert_eq!(wb.get_unvested(h(100)), nem(5));
    }

    #[test]
    fn equal_heights_are_allowed() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(10), nem(5)).unwrap();
        wb.add_receive(h(10), nem(6)).unwrap();
        wb.add_send(h(10), nem(1)).unwrap();
        assert_eq!(wb.get_unvested(h(10)), nem(10));
    }

    #[test]
    fn decreasing_height_is_rejected() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(10), nem(5)).unwrap();
        assert!(matches!(
            wb.add_receive(h(9), nem(5)),
            Err(StateError::HeightDecreasing { .. })
        ));
    }

    #[test]
    fn failed_send_leaves_ledger_unchanged() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(5)).unwrap();
        let before = wb.clone();
        assert!(wb.add_send(h(5000), nem(6)).is_err());
        assert_eq!(wb, before);
    }

    #[test]
    fn undo_receive_restores_previous_state() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(100)).unwrap();
        let before = wb.clone();
        wb.add_receive(h(5000), nem(50)).unwrap();
        wb.undo_receive(h(5000), nem(50)).unwrap();
        assert_eq!(wb, before);
    }

    #[test]
    fn undo_with_wrong_amount_fails() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(100)).unwrap();
        assert!(matches!(wb.undo_receive(h(1), nem(99)), Err(StateError::UndoMismatch(_))));
        assert!(matches!(wb.undo_send(h(1), nem(100)), Err(StateError::UndoMismatch(_))));
    }

    #[test]
    fn can_undo_send_whole_balance_cumulative() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(100)).unwrap();
        wb.add_receive(h(1441), nem(50)).unwrap();
        let before = wb.clone();
        wb.add_send(h(2881), nem(150)).unwrap();
        assert_eq!(wb.get_vested(h(2881)), Amount::ZERO);
        assert_eq!(wb.get_unvested(h(2881)), Amount::ZERO);
        wb.undo_send(h(2881), nem(150)).unwrap();
        assert_eq!(wb, before);
    }

    #[test]
    fn can_undo_send_partially_matured_whole_balance() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(123)).unwrap();
        wb.add_send(h(1441), nem(123)).unwrap();
        wb.undo_send(h(1441), nem(123)).unwrap();
        assert_eq!(wb.get_unvested(h(1441)), Amount::new(110_700_000));
        assert_eq!(wb.size(), 1);
    }

    #[test]
    fn prune_keeps_balances_at_and_after_height() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(1000)).unwrap();
        for height in [1441, 2881, 4321, 5761] {
            wb.add_send(h(height), nem(10)).unwrap();
        }
        assert_eq!(wb.size(), 9);

        let at_2881 = (wb.get_vested(h(2881)), wb.get_unvested(h(2881)));
        let at_4321 = (wb.get_vested(h(4321)), wb.get_unvested(h(4321)));
        wb.prune(h(2881));

        assert_eq!(wb.size(), 5);
        assert_eq!((wb.get_vested(h(2881)), wb.get_unvested(h(2881))), at_2881);
        assert_eq!((wb.get_vested(h(4321)), wb.get_unvested(h(4321))), at_4321);
    }

    #[test]
    fn undo_chain_keeps_one_entry() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(100), nem(1)).unwrap();
        wb.add_receive(h(200), nem(1)).unwrap();
        wb.undo_chain(h(1));
        assert_eq!(wb.size(), 1);
    }

    #[test]
    fn convert_single_nemesis_entry() {
        let mut wb = WeightedBalances::default();
        wb.add_receive(h(1), nem(500)).unwrap();
        wb.convert_to_fully_vested().unwrap();
        assert_eq!(wb.get_vested(h(1)), nem(500));
        assert_eq!(wb.get_unvested(h(1)), Amount::ZERO);
    }

    #[test]
    fn convert_rejects_later_or_multiple_entries() {
        let mut later = WeightedBalances::default();
        later.add_receive(h(2), nem(500)).unwrap();
        assert!(later.convert_to_fully_vested().is_err());

        let mut multiple = WeightedBalances::default();
        multiple.add_receive(h(1), nem(500)).unwrap();
        multiple.add_receive(h(1), nem(1)).unwrap();
        assert!(multiple.convert_to_fully_vested().is_err());
    }

    #[test]
    fn long_idle_vested_account_does_not_grow_history() {
        let mut wb = WeightedBalances::default();
        wb.add_fully_vested(h(1), nem(10)).unwrap();
        wb.add_receive(h(10_000_000), nem(1)).unwrap();
        assert_eq!(wb.size(), 3);
        assert_eq!(wb.get_vested(h(10_000_000)), nem(10));
    }
}
