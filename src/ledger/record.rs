use serde::{Deserialize, Serialize};

/// One atomic adjustment applied to a debt.
///
/// `expense_id` names the opposing expense that caused the adjustment; the
/// very first entry of a debt carries the debt's own expense id (the initial
/// booking). `amount` is the debt's balance after applying `grants`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub expense_id: u64,
    pub grants: i64,
    pub amount: i64,
}

/// The lifetime of a single expense's claim.
///
/// Invariants:
/// - History is append-only, oldest entry first
/// - Each entry's `amount` equals the previous `amount` plus its `grants`
/// - `amount` never goes below zero
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Debt {
    pub expense_id: u64,
    pub history: Vec<HistoryEntry>,
}

impl Debt {
    pub fn new(expense_id: u64) -> Self {
        Debt {
            expense_id,
            history: Vec::new(),
        }
    }

    /// Outstanding amount: the last history entry's `amount`, 0 when empty.
    pub fn current_amount(&self) -> i64 {
        self.history.last().map(|entry| entry.amount).unwrap_or(0)
    }

    /// Append an adjustment caused by `from_expense` and return the new amount.
    ///
    /// The caller chooses `grants` such that the result stays non-negative.
    pub fn adjust(&mut self, from_expense: u64, grants: i64) -> i64 {
        let amount = self.current_amount() + grants;
        self.history.push(HistoryEntry {
            expense_id: from_expense,
            grants,
            amount,
        });
        amount
    }
}

/// The claim one participant holds against another.
///
/// Invariants:
/// - `owes` equals the sum of current amounts over `debts`
/// - `owes` never goes below zero
/// - `expense_id` values in `debts` are unique
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebtorRecord {
    pub owes: i64,
    pub debts: Vec<Debt>,
}

impl DebtorRecord {
    pub fn new() -> Self {
        DebtorRecord {
            owes: 0,
            debts: Vec::new(),
        }
    }

    /// Append an adjustment to the debt for `to_expense`, creating the debt
    /// if this is its first booking, and keep the `owes` cache in sync.
    pub fn upsert(&mut self, from_expense: u64, to_expense: u64, grants: i64) {
        let debt = match self
            .debts
            .iter_mut()
            .position(|d| d.expense_id == to_expense)
        {
            Some(index) => &mut self.debts[index],
            None => {
                self.debts.push(Debt::new(to_expense));
                self.debts.last_mut().expect("just pushed")
            }
        };
        debt.adjust(from_expense, grants);
        self.owes += grants;
    }

    /// Sort `debts` ascending by current amount, most recently booked first
    /// among equal amounts. The netting pass requires this order: zeroed
    /// debts cluster at the front and the largest claim sits at the tail.
    pub fn sort_debts_by_amount(&mut self) {
        self.debts.reverse();
        self.debts.sort_by_key(Debt::current_amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_amount_empty_history() {
        let debt = Debt::new(7);
        assert_eq!(debt.current_amount(), 0);
    }

    #[test]
    fn test_adjust_appends_running_amounts() {
        let mut debt = Debt::new(0);
        assert_eq!(debt.adjust(0, 10), 10);
        assert_eq!(debt.adjust(2, -4), 6);
        assert_eq!(debt.current_amount(), 6);

        assert_eq!(debt.history.len(), 2);
        assert_eq!(debt.history[0].expense_id, 0);
        assert_eq!(debt.history[0].grants, 10);
        assert_eq!(debt.history[1].expense_id, 2);
        assert_eq!(debt.history[1].amount, 6);
    }

    #[test]
    fn test_upsert_creates_debt_on_first_booking() {
        let mut record = DebtorRecord::new();
        record.upsert(3, 3, 12);

        assert_eq!(record.owes, 12);
        assert_eq!(record.debts.len(), 1);
        assert_eq!(record.debts[0].expense_id, 3);
        assert_eq!(record.debts[0].current_amount(), 12);
    }

    #[test]
    fn test_upsert_appends_to_existing_debt() {
        let mut record = DebtorRecord::new();
        record.upsert(3, 3, 12);
        record.upsert(8, 3, -5);

        assert_eq!(record.owes, 7);
        assert_eq!(record.debts.len(), 1);
        assert_eq!(record.debts[0].history.len(), 2);
        assert_eq!(record.debts[0].current_amount(), 7);
    }

    #[test]
    fn test_owes_tracks_sum_of_debts() {
        let mut record = DebtorRecord::new();
        record.upsert(0, 0, 10);
        record.upsert(1, 1, 5);
        record.upsert(2, 2, 3);

        let sum: i64 = record.debts.iter().map(Debt::current_amount).sum();
        assert_eq!(record.owes, sum);
    }

    #[test]
    fn test_sort_orders_ascending_recent_first_on_ties() {
        let mut record = DebtorRecord::new();
        record.upsert(0, 0, 7);
        record.upsert(1, 1, 1);
        record.upsert(2, 2, 1);
        record.upsert(3, 3, 1);
        record.sort_debts_by_amount();

        let order: Vec<(u64, i64)> = record
            .debts
            .iter()
            .map(|d| (d.expense_id, d.current_amount()))
            .collect();
        assert_eq!(order, vec![(3, 1), (2, 1), (1, 1), (0, 7)]);
    }
}
