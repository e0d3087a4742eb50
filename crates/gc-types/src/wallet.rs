use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub balance_cents: i64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// One wallet ledger entry. Credits are positive, donations and
/// redemptions negative.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: serde_json::Value,
    pub ts: String,
    pub kind: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub collection_id: Option<i64>,
    #[serde(default)]
    pub collection_status: Option<String>,
    #[serde(default)]
    pub proof_url: Option<String>,
}

impl Transaction {
    /// Stable key for list rendering; ids are numeric on the real backend
    /// and strings on the mock one.
    pub fn key(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn kind_label(&self) -> String {
        let mut chars = self.kind.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
            None => String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletHistory {
    #[serde(default)]
    pub items: Vec<Transaction>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    pub amount_cents: i64,
    pub charity_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub amount_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_may_be_strings_or_numbers() {
        let numeric: Transaction = serde_json::from_str(
            r#"{"id":12,"ts":"2025-01-01T10:00:00","kind":"return","amountCents":15}"#,
        )
        .unwrap();
        assert_eq!(numeric.key(), "12");

        let text: Transaction = serde_json::from_str(
            r#"{"id":"txn_3","ts":"2025-01-01T10:00:00","kind":"voucher_credit","amountCents":-40,"note":"x"}"#,
        )
        .unwrap();
        assert_eq!(text.key(), "txn_3");
        assert_eq!(text.kind_label(), "Voucher credit");
    }
}
