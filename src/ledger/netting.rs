use crate::ledger::record::{Debt, DebtorRecord};
use crate::ledger::search::rightmost_at_most;

/// Net the largest outstanding claim on one side of a pair against the
/// opposing side, mirroring each offset into both histories.
///
/// `claim` is the record that just received a new booking, `opposing` the
/// reverse direction. After the pass at least one of the two `owes` values
/// is zero, because each offset zeroes either the claim remainder or the
/// targeted opposing debt.
///
/// Target selection absorbs as many small opposing debts as possible before
/// spending the remainder on a larger one: start at the rightmost opposing
/// debt not exceeding the claim, walk left while smaller debts still carry
/// mass, then apply any residual to the next-larger debt.
pub(crate) fn simplify_pair(claim: &mut DebtorRecord, opposing: &mut DebtorRecord) {
    claim.sort_debts_by_amount();
    let claim_index = match claim.debts.len().checked_sub(1) {
        Some(index) => index,
        None => return,
    };
    let claim_expense = claim.debts[claim_index].expense_id;
    let mut remaining = claim.debts[claim_index].current_amount();

    opposing.sort_debts_by_amount();
    let start = match rightmost_at_most(remaining, &opposing.debts, Debt::current_amount) {
        Some(index) => index,
        None => return,
    };
    // Mass of opposing debts at or below the starting point; while it is
    // positive there are smaller debts left that the remainder can absorb.
    let mut prefix_mass: i64 = opposing.debts[..=start]
        .iter()
        .map(Debt::current_amount)
        .sum();
    let mut cursor = start as isize;

    while remaining > 0 {
        if cursor < 0 {
            break;
        }
        let index = cursor as usize;
        let outstanding = opposing.debts[index].current_amount();
        if outstanding <= 0 {
            break;
        }
        prefix_mass -= outstanding;

        let leftover = (outstanding - remaining).max(0);
        let next_remaining = remaining - (outstanding - leftover);
        let grants = -(remaining - next_remaining);

        let opposing_expense = opposing.debts[index].expense_id;
        claim.debts[claim_index].adjust(opposing_expense, grants);
        claim.owes += grants;
        opposing.debts[index].adjust(claim_expense, grants);
        opposing.owes += grants;

        remaining = next_remaining;

        if prefix_mass > 0 {
            cursor -= 1;
        } else {
            // Residual goes to the next-larger debt. When the search already
            // sat at the last index this revisits a zeroed debt and the
            // outstanding check above ends the loop.
            cursor = (start + 1).min(opposing.debts.len() - 1) as isize;
        }
    }
}
