use serde_json::Value;

use super::plain;

/// The headline figure of each calculator, in lookup order.
const HEADLINE_KEYS: [&str; 7] = [
    "monthly_payment",
    "max_loan_amount",
    "interest_saved",
    "future_value",
    "maturity_amount",
    "formatted",
    "amount",
];

/// Print just the key answer value from the output, for scripting.
///
/// Falls back to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        let headline = HEADLINE_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        if let Some(val) = headline {
            println!("{}", plain(val));
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, plain(val));
            return;
        }
    }

    println!("{}", plain(result));
}
