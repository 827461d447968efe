/// Rightmost index whose key does not exceed `target`, over a slice sorted
/// ascending by `key_of`.
///
/// - An exact match returns the rightmost such index.
/// - Otherwise the insertion point minus one, clamped to 0 when `target` is
///   below every element.
/// - An empty slice returns `None`.
/// - Skip-zero rule: a chosen index with key 0 advances to the next index
///   when one exists. Paid-off debts cluster at the front of the ascending
///   list and must not be selected as an offset target.
pub fn rightmost_at_most<T>(target: i64, items: &[T], key_of: impl Fn(&T) -> i64) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    let below_or_equal = items.partition_point(|item| key_of(item) <= target);
    let mut index = below_or_equal.saturating_sub(1);

    if key_of(&items[index]) == 0 && index + 1 < items.len() {
        index += 1;
    }

    Some(index)
}
