//! Vesting accounting shared by every instruction.
//!
//! The engine never touches accounts directly: custody goes through an
//! [`AssetLedger`], released totals through a [`ReleaseAccount`] that the
//! caller loads and persists. That keeps the arithmetic testable off-chain.

pub mod asset;
pub mod ledger;
pub mod release;
pub mod roles;
pub mod schedule;

pub use asset::*;
pub use ledger::*;
pub use release::*;
pub use roles::*;
pub use schedule::*;

use anchor_lang::prelude::Pubkey;

use crate::error::DripperError;

/// Result of a release or sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disbursement {
    pub key: AssetKey,
    pub recipient: Pubkey,
    /// Exact amount moved; zero when nothing was due.
    pub amount: u64,
    /// Released total for `key` after the operation.
    pub released_total: u128,
}

/// Point-in-time accounting for one asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub key: AssetKey,
    pub timestamp: i64,
    pub custody: u64,
    pub vested: u128,
    pub released: u128,
    pub releasable: u64,
    pub sweepable: u64,
}

pub struct DripperEngine<L: AssetLedger> {
    schedule: VestingSchedule,
    roles: RoleRegistry,
    ledger: L,
}

impl<L: AssetLedger> DripperEngine<L> {
    pub fn new(schedule: VestingSchedule, roles: RoleRegistry, ledger: L) -> Self {
        Self {
            schedule,
            roles,
            ledger,
        }
    }

    pub fn schedule(&self) -> &VestingSchedule {
        &self.schedule
    }

    #[cfg(test)]
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    #[cfg(test)]
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn custody(&self, key: &AssetKey) -> Result<u64, DripperError> {
        self.ledger.balance_of(key)
    }

    /// Custody plus everything already released: the base the schedule vests.
    pub fn total_ever_received(&self, account: &ReleaseAccount) -> Result<u128, DripperError> {
        let custody = self.custody(&account.key())? as u128;
        custody
            .checked_add(account.released())
            .ok_or(DripperError::MathOverflow)
    }

    /// Amount of `account`'s asset vested at `timestamp`. Any timestamp is accepted.
    ///
    /// Stays `u128`: custody plus released can exceed `u64::MAX`.
    pub fn vested_amount(
        &self,
        account: &ReleaseAccount,
        timestamp: i64,
    ) -> Result<u128, DripperError> {
        let total = self.total_ever_received(account)?;
        self.schedule.vested_amount(total, timestamp)
    }

    pub fn releasable(&self, account: &ReleaseAccount, now: i64) -> Result<u64, DripperError> {
        Ok(account.releasable(self.vested_amount(account, now)?))
    }

    /// Custody not owed to the beneficiary at `now`.
    pub fn sweepable(&self, account: &ReleaseAccount, now: i64) -> Result<u64, DripperError> {
        let custody = self.custody(&account.key())?;
        let releasable = self.releasable(account, now)?;
        custody
            .checked_sub(releasable)
            .ok_or(DripperError::MathOverflow)
    }

    pub fn quote(
        &self,
        account: &ReleaseAccount,
        timestamp: i64,
    ) -> Result<Quote, DripperError> {
        let custody = self.custody(&account.key())?;
        let vested = self.vested_amount(account, timestamp)?;
        let releasable = account.releasable(vested);
        let sweepable = custody
            .checked_sub(releasable)
            .ok_or(DripperError::MathOverflow)?;
        Ok(Quote {
            key: account.key(),
            timestamp,
            custody,
            vested,
            released: account.released(),
            releasable,
            sweepable,
        })
    }

    /// Pays everything releasable at `now` to the beneficiary.
    ///
    /// Callable by anyone. `account` only advances once the ledger transfer
    /// succeeded; a zero releasable amount moves nothing and is not an error.
    pub fn release(
        &mut self,
        account: &mut ReleaseAccount,
        now: i64,
    ) -> Result<Disbursement, DripperError> {
        let key = account.key();
        let beneficiary = self.roles.beneficiary();
        let amount = self.releasable(account, now)?;
        if amount == 0 {
            return Ok(Disbursement {
                key,
                recipient: beneficiary,
                amount: 0,
                released_total: account.released(),
            });
        }

        // Reject an unrecordable amount before anything leaves custody.
        account.staged(amount)?;
        self.ledger.transfer(&key, &beneficiary, amount)?;
        let released_total = account.record(amount)?;

        Ok(Disbursement {
            key,
            recipient: beneficiary,
            amount,
            released_total,
        })
    }

    /// Moves unobligated custody to the controller.
    ///
    /// `amount = None` sweeps everything sweepable; asking for more than is
    /// sweepable fails with `TransferFailed` before the ledger is touched.
    pub fn sweep(
        &mut self,
        caller: &Pubkey,
        account: &ReleaseAccount,
        amount: Option<u64>,
        now: i64,
    ) -> Result<Disbursement, DripperError> {
        self.roles.authorize_sweep(caller)?;

        let key = account.key();
        let controller = self.roles.controller();
        let sweepable = self.sweepable(account, now)?;
        let amount = match amount {
            None => sweepable,
            Some(requested) if requested <= sweepable => requested,
            Some(_) => return Err(DripperError::TransferFailed),
        };

        if amount > 0 {
            self.ledger.transfer(&key, &controller, amount)?;
        }

        Ok(Disbursement {
            key,
            recipient: controller,
            amount,
            released_total: account.released(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const T: i64 = 1_750_000_000;

    #[derive(Default)]
    struct MemoryLedger {
        custody: HashMap<AssetKey, u64>,
        paid: HashMap<(AssetKey, Pubkey), u64>,
        transfers: usize,
        fail: bool,
    }

    impl MemoryLedger {
        fn with(key: AssetKey, amount: u64) -> Self {
            let mut ledger = Self::default();
            ledger.deposit(key, amount);
            ledger
        }

        fn deposit(&mut self, key: AssetKey, amount: u64) {
            *self.custody.entry(key).or_default() += amount;
        }

        fn paid_to(&self, key: AssetKey, to: Pubkey) -> u64 {
            self.paid.get(&(key, to)).copied().unwrap_or_default()
        }
    }

    impl AssetLedger for MemoryLedger {
        fn balance_of(&self, key: &AssetKey) -> Result<u64, DripperError> {
            Ok(self.custody.get(key).copied().unwrap_or_default())
        }

        fn transfer(
            &mut self,
            key: &AssetKey,
            to: &Pubkey,
            amount: u64,
        ) -> Result<(), DripperError> {
            if self.fail {
                return Err(DripperError::TransferFailed);
            }
            let balance = self.custody.entry(*key).or_default();
            if *balance < amount {
                return Err(DripperError::TransferFailed);
            }
            *balance -= amount;
            *self.paid.entry((*key, *to)).or_default() += amount;
            self.transfers += 1;
            Ok(())
        }
    }

    fn roles() -> RoleRegistry {
        RoleRegistry::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        )
        .unwrap()
    }

    fn engine(ledger: MemoryLedger) -> DripperEngine<MemoryLedger> {
        DripperEngine::new(VestingSchedule::new(T, 100).unwrap(), roles(), ledger)
    }

    #[test]
    fn releases_linearly_then_drains_once() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let beneficiary = e.roles().beneficiary();
        let mut acct = ReleaseAccount::empty(key);

        assert_eq!(e.vested_amount(&acct, T + 50).unwrap(), 500);
        let d = e.release(&mut acct, T + 50).unwrap();
        assert_eq!(d.amount, 500);
        assert_eq!(d.recipient, beneficiary);
        assert_eq!(acct.released(), 500);
        assert_eq!(e.releasable(&acct, T + 50).unwrap(), 0);

        // Released funds still count toward the vesting base.
        assert_eq!(e.vested_amount(&acct, T + 100).unwrap(), 1000);
        let d = e.release(&mut acct, T + 100).unwrap();
        assert_eq!(d.amount, 500);
        assert_eq!(d.released_total, 1000);

        let d = e.release(&mut acct, T + 150).unwrap();
        assert_eq!(d.amount, 0);
        assert_eq!(acct.released(), 1000);
        assert_eq!(e.ledger().paid_to(key, beneficiary), 1000);
        assert_eq!(e.ledger().transfers, 2);
    }

    #[test]
    fn second_release_at_same_instant_is_empty() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let mut acct = ReleaseAccount::empty(key);

        assert_eq!(e.release(&mut acct, T + 30).unwrap().amount, 300);
        assert_eq!(e.release(&mut acct, T + 30).unwrap().amount, 0);
        assert_eq!(acct.released(), 300);
    }

    #[test]
    fn nothing_released_before_start() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let mut acct = ReleaseAccount::empty(key);

        let d = e.release(&mut acct, T - 1).unwrap();
        assert_eq!(d.amount, 0);
        assert_eq!(e.ledger().transfers, 0);
    }

    #[test]
    fn zero_release_does_not_touch_ledger() {
        let key = AssetKey::Native;
        let mut ledger = MemoryLedger::with(key, 1000);
        ledger.fail = true;
        let mut e = engine(ledger);
        let mut acct = ReleaseAccount::empty(key);

        assert_eq!(e.release(&mut acct, T).unwrap().amount, 0);
    }

    #[test]
    fn failed_transfer_does_not_advance_released() {
        let key = AssetKey::Native;
        let mut ledger = MemoryLedger::with(key, 1000);
        ledger.fail = true;
        let mut e = engine(ledger);
        let mut acct = ReleaseAccount::new(key, 100);

        assert!(matches!(
            e.release(&mut acct, T + 60),
            Err(DripperError::TransferFailed)
        ));
        assert_eq!(acct.released(), 100);
        assert_eq!(e.custody(&key).unwrap(), 1000);

        e.ledger_mut().fail = false;
        let d = e.release(&mut acct, T + 60).unwrap();
        // 60% of 1100 minus the 100 already out
        assert_eq!(d.amount, 560);
        assert_eq!(acct.released(), 660);
    }

    #[test]
    fn deposits_unlock_more_of_the_vested_fraction() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let mut acct = ReleaseAccount::empty(key);

        assert_eq!(e.release(&mut acct, T + 50).unwrap().amount, 500);
        e.ledger_mut().deposit(key, 1000);
        assert_eq!(e.vested_amount(&acct, T + 50).unwrap(), 1000);
        assert_eq!(e.release(&mut acct, T + 50).unwrap().amount, 500);
        assert_eq!(acct.released(), 1000);
    }

    #[test]
    fn vested_amount_is_a_pure_view() {
        let key = AssetKey::Native;
        let e = engine(MemoryLedger::with(key, 1000));
        let acct = ReleaseAccount::empty(key);

        assert_eq!(e.vested_amount(&acct, T + 250).unwrap(), 1000);
        assert_eq!(e.vested_amount(&acct, T + 25).unwrap(), 250);
        assert_eq!(e.custody(&key).unwrap(), 1000);
        assert_eq!(e.ledger().transfers, 0);
    }

    #[test]
    fn vested_amount_monotonic_over_time() {
        let key = AssetKey::Native;
        let e = engine(MemoryLedger::with(key, 12_345));
        let acct = ReleaseAccount::new(key, 77);
        let mut prev = 0;
        for now in (T - 5)..(T + 110) {
            let v = e.vested_amount(&acct, now).unwrap();
            assert!(v >= prev);
            assert!(v <= e.total_ever_received(&acct).unwrap());
            prev = v;
        }
    }

    #[test]
    fn sweep_leaves_releasable_in_custody() {
        let key = AssetKey::Token(Pubkey::new_unique());
        let mut e = engine(MemoryLedger::with(key, 1000));
        let acct = ReleaseAccount::new(key, 100);
        let controller = e.roles().controller();

        assert_eq!(e.releasable(&acct, T + 10).unwrap(), 10);
        assert_eq!(e.sweepable(&acct, T + 10).unwrap(), 990);

        assert!(matches!(
            e.sweep(&controller, &acct, Some(991), T + 10),
            Err(DripperError::TransferFailed)
        ));
        assert_eq!(e.custody(&key).unwrap(), 1000);

        let d = e.sweep(&controller, &acct, Some(990), T + 10).unwrap();
        assert_eq!(d.amount, 990);
        assert_eq!(d.recipient, controller);
        assert_eq!(d.released_total, 100);
        assert_eq!(e.custody(&key).unwrap(), 10);
        assert_eq!(e.ledger().paid_to(key, controller), 990);
    }

    #[test]
    fn full_sweep_then_release_respects_custody() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let keeper = e.roles().keeper();
        let mut acct = ReleaseAccount::empty(key);

        let d = e.sweep(&keeper, &acct, None, T + 40).unwrap();
        assert_eq!(d.amount, 600);
        assert_eq!(e.custody(&key).unwrap(), 400);

        // The base shrank to 400; 40% of it is 160 and nothing is released yet.
        let d = e.release(&mut acct, T + 40).unwrap();
        assert_eq!(d.amount, 160);

        // After the window everything left belongs to the beneficiary.
        assert_eq!(e.sweepable(&acct, T + 100).unwrap(), 0);
        let d = e.release(&mut acct, T + 100).unwrap();
        assert_eq!(d.amount, 240);
        assert_eq!(e.custody(&key).unwrap(), 0);
    }

    #[test]
    fn sweep_never_dips_below_releasable() {
        let key = AssetKey::Native;
        for now in [T - 10, T, T + 1, T + 33, T + 99, T + 100, T + 500] {
            let mut e = engine(MemoryLedger::with(key, 777));
            let acct = ReleaseAccount::new(key, 23);
            let controller = e.roles().controller();
            let releasable = e.releasable(&acct, now).unwrap();
            e.sweep(&controller, &acct, None, now).unwrap();
            assert_eq!(e.custody(&key).unwrap(), releasable);
        }
    }

    #[test]
    fn unauthorized_sweep_changes_nothing() {
        let key = AssetKey::Native;
        let mut e = engine(MemoryLedger::with(key, 1000));
        let acct = ReleaseAccount::empty(key);
        let outsiders = [
            e.roles().beneficiary(),
            e.roles().governance(),
            Pubkey::new_unique(),
        ];

        for caller in outsiders {
            assert!(matches!(
                e.sweep(&caller, &acct, None, T + 10),
                Err(DripperError::Unauthorized)
            ));
        }
        assert_eq!(e.custody(&key).unwrap(), 1000);
        assert_eq!(e.ledger().transfers, 0);
    }

    #[test]
    fn rotated_keeper_is_honored_immediately() {
        let key = AssetKey::Native;
        let mut roles = roles();
        let old_keeper = roles.keeper();
        let controller = roles.controller();
        let governance = roles.governance();
        let new_keeper = Pubkey::new_unique();
        assert!(matches!(
            roles.set_keeper(&controller, new_keeper),
            Err(DripperError::Unauthorized)
        ));
        roles.set_keeper(&governance, new_keeper).unwrap();

        let schedule = VestingSchedule::new(T, 100).unwrap();
        let mut e = DripperEngine::new(schedule, roles, MemoryLedger::with(key, 1000));
        let acct = ReleaseAccount::empty(key);

        assert!(matches!(
            e.sweep(&old_keeper, &acct, Some(1), T),
            Err(DripperError::Unauthorized)
        ));
        assert_eq!(e.sweep(&new_keeper, &acct, Some(1), T).unwrap().amount, 1);
    }

    #[test]
    fn assets_are_accounted_independently() {
        let native = AssetKey::Native;
        let token = AssetKey::Token(Pubkey::new_unique());
        let mut ledger = MemoryLedger::with(native, 1000);
        ledger.deposit(token, 50);
        let mut e = engine(ledger);
        let mut native_acct = ReleaseAccount::empty(native);
        let mut token_acct = ReleaseAccount::empty(token);

        assert_eq!(e.release(&mut native_acct, T + 20).unwrap().amount, 200);
        assert_eq!(e.release(&mut token_acct, T + 20).unwrap().amount, 10);
        assert_eq!(e.custody(&native).unwrap(), 800);
        assert_eq!(e.custody(&token).unwrap(), 40);
    }

    #[test]
    fn base_above_u64_max_stays_movable() {
        let key = AssetKey::Token(Pubkey::new_unique());
        let mut e = engine(MemoryLedger::with(key, u64::MAX));
        let controller = e.roles().controller();
        let mut acct = ReleaseAccount::new(key, 10);

        let q = e.quote(&acct, T + 100).unwrap();
        assert_eq!(q.vested, u64::MAX as u128 + 10);
        assert_eq!(q.releasable, u64::MAX);
        assert_eq!(q.sweepable, 0);
        assert_eq!(e.sweep(&controller, &acct, None, T + 100).unwrap().amount, 0);

        let d = e.release(&mut acct, T + 100).unwrap();
        assert_eq!(d.amount, u64::MAX);
        assert_eq!(d.released_total, u64::MAX as u128 + 10);
        assert_eq!(e.custody(&key).unwrap(), 0);

        // Re-depositing after the window is immediately releasable again.
        e.ledger_mut().deposit(key, 5);
        assert_eq!(e.releasable(&acct, T + 200).unwrap(), 5);
    }

    #[test]
    fn quote_matches_individual_views() {
        let key = AssetKey::Native;
        let e = engine(MemoryLedger::with(key, 1000));
        let acct = ReleaseAccount::new(key, 100);

        let q = e.quote(&acct, T + 10).unwrap();
        assert_eq!(
            q,
            Quote {
                key,
                timestamp: T + 10,
                custody: 1000,
                vested: 110,
                released: 100,
                releasable: 10,
                sweepable: 990,
            }
        );
    }

    #[test]
    fn snapshot_ledger_serves_views_only() {
        let key = AssetKey::Native;
        let schedule = VestingSchedule::new(T, 100).unwrap();
        let mut e = DripperEngine::new(schedule, roles(), CustodySnapshot::new(key, 1000));
        let mut acct = ReleaseAccount::empty(key);

        assert_eq!(e.vested_amount(&acct, T + 50).unwrap(), 500);
        assert!(matches!(
            e.release(&mut acct, T + 50),
            Err(DripperError::TransferFailed)
        ));
        assert_eq!(acct.released(), 0);

        let other = ReleaseAccount::empty(AssetKey::Token(Pubkey::new_unique()));
        assert!(matches!(
            e.vested_amount(&other, T + 50),
            Err(DripperError::AssetMismatch)
        ));
    }
}
