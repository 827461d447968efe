//! Textual serialization of the ledger.
//!
//! Each keyed-mapping level is emitted as a self-describing tagged object
//! (`{"dataType":"Map","value":[[key, value], ...]}`) so it stays
//! distinguishable from a plain record; debt records and history entries
//! serialize as plain records.

use crate::error::{Error, Result};
use crate::ledger::{DebtorRecord, Ledger};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag distinguishing a serialized keyed mapping from a plain record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum MapTag {
    Map,
}

/// A keyed mapping in transit: the tag plus an ordered sequence of
/// `[key, value]` pairs.
#[derive(Serialize, Deserialize)]
struct TaggedMap<V> {
    #[serde(rename = "dataType")]
    data_type: MapTag,
    value: Vec<(String, V)>,
}

impl<V> TaggedMap<V> {
    fn new(value: Vec<(String, V)>) -> Self {
        TaggedMap {
            data_type: MapTag::Map,
            value,
        }
    }
}

pub(crate) fn encode(ledger: &Ledger) -> Result<String> {
    let doc = TaggedMap::new(
        ledger
            .creditors()
            .iter()
            .map(|(creditor, debtors)| {
                (
                    creditor.clone(),
                    TaggedMap::new(
                        debtors
                            .iter()
                            .map(|(debtor, record)| (debtor.clone(), record.clone()))
                            .collect(),
                    ),
                )
            })
            .collect(),
    );
    serde_json::to_string(&doc).map_err(|e| Error::Serialize(e.to_string()))
}

pub(crate) fn decode(text: &str) -> Result<Ledger> {
    let doc: TaggedMap<TaggedMap<DebtorRecord>> =
        serde_json::from_str(text).map_err(|e| Error::Deserialize(e.to_string()))?;

    let mut creditors = BTreeMap::new();
    for (creditor, debtors) in doc.value {
        let inner: BTreeMap<String, DebtorRecord> = debtors.value.into_iter().collect();
        creditors.insert(creditor, inner);
    }
    Ok(Ledger::from_map(creditors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add("alice", "bob", 10, 0).unwrap();
        ledger.add("alice", "bob", 5, 1).unwrap();
        ledger.add("bob", "alice", 7, 2).unwrap();
        ledger
    }

    #[test]
    fn test_round_trip_preserves_ledger() {
        let ledger = sample_ledger();
        let text = encode(&ledger).unwrap();
        let restored = decode(&text).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_round_trip_empty_ledger() {
        let ledger = Ledger::new();
        let restored = decode(&encode(&ledger).unwrap()).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_map_levels_carry_the_tag() {
        let text = encode(&sample_ledger()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["dataType"], "Map");
        let outer_entries = value["value"].as_array().unwrap();
        assert_eq!(outer_entries.len(), 2);

        // Each outer entry is a [key, inner-map] pair; the inner level is
        // tagged too, while debt records below it are plain objects.
        let (creditor, debtors) = (&outer_entries[0][0], &outer_entries[0][1]);
        assert_eq!(creditor, "alice");
        assert_eq!(debtors["dataType"], "Map");
        let record = &debtors["value"][0][1];
        assert!(record.get("dataType").is_none());
        assert!(record.get("owes").is_some());
        assert!(record.get("debts").is_some());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode("not a ledger").unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }

    #[test]
    fn test_decode_rejects_untagged_mapping() {
        let err = decode(r#"{"value": []}"#).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let err = decode(r#"{"dataType": "Set", "value": []}"#).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }

    #[test]
    fn test_decode_rejects_malformed_record() {
        let text = r#"{"dataType":"Map","value":[["alice",{"dataType":"Map","value":[["bob",{"owes":"ten","debts":[]}]]}]]}"#;
        let err = decode(text).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
    }
}
