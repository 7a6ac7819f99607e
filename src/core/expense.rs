use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub type Amount = f64;
pub type ExpenseId = String;

/// One entry of the ledger.
///
/// Decoding is lenient so that hand-edited storage still loads: a numeric
/// id or name becomes its string form, a missing or null one becomes empty
/// and an amount that is not a number becomes NaN.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: ExpenseId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default = "missing_amount", deserialize_with = "lenient_amount")]
    pub amount: Amount,
}

impl Expense {
    pub fn new(id: impl Into<ExpenseId>, name: impl Into<String>, amount: Amount) -> Expense {
        Expense { id: id.into(), name: name.into(), amount }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.id, self.name, self.amount)
    }
}

fn missing_amount() -> Amount {
    Amount::NAN
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let text = match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    return Ok(text);
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    return Ok(value.as_f64().unwrap_or(Amount::NAN));
}


#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::Expense;

    #[test]
    fn serialize() {
        let expense = Expense::new("1700000000000", "Coffee", 4.5);
        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value, json!({"id": "1700000000000", "name": "Coffee", "amount": 4.5}));
    }

    #[test]
    fn numeric_id_is_stringified() {
        let parsed: Expense = serde_json::from_value(json!({"id": 1700000000000u64, "name": "Tea", "amount": 2})).unwrap();
        assert_eq!(parsed, Expense::new("1700000000000", "Tea", 2.0));
    }

    #[rstest]
    #[case(json!({"id": "1", "name": "Tea", "amount": "lots"}))]
    #[case(json!({"id": "1", "name": "Tea", "amount": null}))]
    #[case(json!({"id": "1", "name": "Tea"}))]
    fn garbage_amount_is_nan(#[case] raw: serde_json::Value) {
        let parsed: Expense = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.name, "Tea");
        assert!(parsed.amount.is_nan());
    }

    #[rstest]
    #[case(json!({"id": "1", "amount": 3.0}), "")]
    #[case(json!({"id": "1", "name": null, "amount": 3.0}), "")]
    #[case(json!({"id": "1", "name": 7, "amount": 3.0}), "7")]
    #[case(json!({"id": "1", "name": true, "amount": 3.0}), "true")]
    fn tampered_name_is_stringified(#[case] raw: serde_json::Value, #[case] expected: &str) {
        let parsed: Expense = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.name, expected);
        assert_eq!(parsed.amount, 3.0);
    }

    #[test]
    fn display() {
        assert_eq!(Expense::new("9", "Lunch", 12.5).to_string(), "9 Lunch: 12.5");
    }
}
