pub mod netting;
pub mod record;
pub mod search;

pub use record::{Debt, DebtorRecord, HistoryEntry};

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::mem;

/// Core domain state: a two-level mapping from creditor to debtor to the
/// record of what that debtor owes the creditor.
///
/// Invariants between public operations:
/// - Symmetric presence: if `[a][b]` exists then `[b][a]` exists
/// - Every `owes` and every history `amount` is non-negative
/// - Pair exclusivity: at most one direction of a pair owes a non-zero balance
///
/// The ledger owns all records and debts directly; history entries reference
/// expenses by id only, so there are no cross-pair pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    creditors: BTreeMap<String, BTreeMap<String, DebtorRecord>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Ledger {
            creditors: BTreeMap::new(),
        }
    }

    pub(crate) fn from_map(creditors: BTreeMap<String, BTreeMap<String, DebtorRecord>>) -> Self {
        Ledger { creditors }
    }

    /// Read-only view of the full creditor → debtor → record mapping.
    pub fn creditors(&self) -> &BTreeMap<String, BTreeMap<String, DebtorRecord>> {
        &self.creditors
    }

    pub fn has_creditor(&self, creditor: &str) -> bool {
        self.creditors.contains_key(creditor)
    }

    pub fn has_debtor(&self, creditor: &str, debtor: &str) -> bool {
        self.creditors
            .get(creditor)
            .map(|debtors| debtors.contains_key(debtor))
            .unwrap_or(false)
    }

    /// Record for (creditor, debtor). A missing creditor is a programmer
    /// error; a missing debtor under an existing creditor returns `None`,
    /// which callers must distinguish from a zero-balance record.
    pub fn record(&self, creditor: &str, debtor: &str) -> Result<Option<&DebtorRecord>> {
        let debtors = self
            .creditors
            .get(creditor)
            .ok_or_else(|| Error::MissingCreditor(creditor.to_string()))?;
        Ok(debtors.get(debtor))
    }

    fn record_mut(&mut self, creditor: &str, debtor: &str) -> Result<&mut DebtorRecord> {
        let debtors = self
            .creditors
            .get_mut(creditor)
            .ok_or_else(|| Error::MissingCreditor(creditor.to_string()))?;
        debtors.get_mut(debtor).ok_or_else(|| Error::MissingDebtor {
            creditor: creditor.to_string(),
            debtor: debtor.to_string(),
        })
    }

    /// Idempotent creation of `[creditor][debtor]` with a fresh empty record.
    pub(crate) fn ensure_debtor(&mut self, creditor: &str, debtor: &str) {
        self.creditors
            .entry(creditor.to_string())
            .or_default()
            .entry(debtor.to_string())
            .or_insert_with(DebtorRecord::new);
    }

    /// Ensure both `[creditor][debtor]` and `[debtor][creditor]` exist.
    pub(crate) fn ensure_two_way_relation(&mut self, creditor: &str, debtor: &str) {
        self.ensure_debtor(creditor, debtor);
        self.ensure_debtor(debtor, creditor);
    }

    /// Book `grants` against the debt for `to_expense` in `[creditor][debtor]`,
    /// attributing the adjustment to `from_expense`. The record must exist.
    pub(crate) fn upsert(
        &mut self,
        creditor: &str,
        debtor: &str,
        from_expense: u64,
        to_expense: u64,
        grants: i64,
    ) -> Result<()> {
        let record = self.record_mut(creditor, debtor)?;
        record.upsert(from_expense, to_expense, grants);
        Ok(())
    }

    /// Record a new expense: `debtor` owes `creditor` `amount`, then fold the
    /// claim against any opposing outstanding debts of the same pair.
    ///
    /// An `amount` of zero is a net-zero booking that still ensures symmetric
    /// presence of the pair; a negative amount is rejected. `expense_id`
    /// should be fresh for the pair.
    pub fn add(&mut self, creditor: &str, debtor: &str, amount: i64, expense_id: u64) -> Result<()> {
        if creditor == debtor {
            return Err(Error::SelfPair(creditor.to_string()));
        }
        if amount < 0 {
            return Err(Error::InvalidAmount(amount));
        }

        self.ensure_two_way_relation(creditor, debtor);
        self.upsert(creditor, debtor, expense_id, expense_id, amount)?;
        self.simplify(creditor, debtor)
    }

    /// Run a netting pass over the pair, with `[creditor][debtor]` holding
    /// the fresh claim. Both records must exist.
    fn simplify(&mut self, creditor: &str, debtor: &str) -> Result<()> {
        // The two sides live under different outer keys, but the borrow
        // checker cannot see that; take the claim side out, net it against
        // the opposing side, and put it back.
        let mut claim = mem::take(self.record_mut(creditor, debtor)?);
        let outcome = match self.record_mut(debtor, creditor) {
            Ok(opposing) => {
                netting::simplify_pair(&mut claim, opposing);
                Ok(())
            }
            Err(e) => Err(e),
        };
        *self.record_mut(creditor, debtor)? = claim;
        outcome
    }

    /// Serialize the ledger into its textual form.
    pub fn to_text(&self) -> Result<String> {
        crate::codec::encode(self)
    }

    /// Reconstitute a ledger from its textual form. On failure nothing is
    /// built, so any engine the caller holds stays untouched.
    pub fn from_text(text: &str) -> Result<Ledger> {
        crate::codec::decode(text)
    }
}
