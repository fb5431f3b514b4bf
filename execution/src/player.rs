//! Player ledger: bankroll plus the open-wager set.
//!
//! Stakes are escrowed. Adding a wager moves its amount out of the bankroll; a win returns
//! the stake plus winnings, a loss returns nothing and a withdrawal refunds the stake.

use layline_types::{Wager, WagerError, WagerId, WagerKind};
use std::{collections::BTreeMap, fmt};

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    bankroll: f64,
    wagers: BTreeMap<WagerId, Wager>,
    next_id: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, bankroll: f64) -> Self {
        Self {
            name: name.into(),
            bankroll,
            wagers: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Money not currently at risk.
    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    /// Sum of open stakes.
    pub fn wagered(&self) -> f64 {
        self.wagers.values().map(|wager| wager.amount).sum()
    }

    /// Open wagers in placement order.
    pub fn wagers(&self) -> impl Iterator<Item = &Wager> {
        self.wagers.values()
    }

    pub fn wagers_of(&self, kind: WagerKind) -> impl Iterator<Item = &Wager> {
        self.wagers.values().filter(move |wager| wager.kind == kind)
    }

    /// Returns true if an open wager matches `kind` (and `number`, when given).
    pub fn has_wager(&self, kind: WagerKind, number: Option<u8>) -> bool {
        self.wagers.values().any(|wager| wager.is(kind, number))
    }

    pub fn count_of(&self, kind: WagerKind) -> usize {
        self.wagers_of(kind).count()
    }

    pub fn get(&self, id: WagerId) -> Option<&Wager> {
        self.wagers.get(&id)
    }

    pub fn contains(&self, id: WagerId) -> bool {
        self.wagers.contains_key(&id)
    }

    /// Open a new wager, escrowing `amount` from the bankroll.
    pub fn add_wager(
        &mut self,
        kind: WagerKind,
        amount: f64,
        number: Option<u8>,
        parent: Option<WagerId>,
    ) -> Result<WagerId, WagerError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(WagerError::NonPositiveAmount(amount));
        }
        if amount > self.bankroll {
            return Err(WagerError::InsufficientBankroll {
                needed: amount,
                available: self.bankroll,
            });
        }
        let id = WagerId(self.next_id);
        self.next_id += 1;
        self.bankroll -= amount;
        self.wagers.insert(
            id,
            Wager {
                id,
                kind,
                amount,
                number,
                parent,
            },
        );
        Ok(id)
    }

    /// Move an untravelled wager to `number`.
    pub fn travel(&mut self, id: WagerId, number: u8) -> Result<(), WagerError> {
        let wager = self
            .wagers
            .get_mut(&id)
            .ok_or(WagerError::UnknownWager(id))?;
        wager.number = Some(number);
        Ok(())
    }

    /// Close a winning wager: stake plus `winnings` go back to the bankroll.
    pub fn settle_win(&mut self, id: WagerId, winnings: f64) -> Result<Wager, WagerError> {
        let wager = self.wagers.remove(&id).ok_or(WagerError::UnknownWager(id))?;
        self.bankroll += wager.amount + winnings;
        Ok(wager)
    }

    /// Close a losing wager. The escrowed stake is gone.
    pub fn settle_loss(&mut self, id: WagerId) -> Result<Wager, WagerError> {
        self.wagers.remove(&id).ok_or(WagerError::UnknownWager(id))
    }

    /// Take a wager down and refund its stake.
    pub fn withdraw(&mut self, id: WagerId) -> Result<Wager, WagerError> {
        let wager = self.wagers.remove(&id).ok_or(WagerError::UnknownWager(id))?;
        self.bankroll += wager.amount;
        Ok(wager)
    }

    /// Pay winnings on a wager that stays up.
    pub fn pay(&mut self, id: WagerId, winnings: f64) -> Result<(), WagerError> {
        if !self.contains(id) {
            return Err(WagerError::UnknownWager(id));
        }
        self.bankroll += winnings;
        Ok(())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<bank={} wagered={} open={}>",
            self.name,
            self.bankroll,
            self.wagered(),
            self.wagers.len()
        )
    }
}
