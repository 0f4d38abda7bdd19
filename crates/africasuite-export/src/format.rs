//! Display formatting for report values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a metric or column value is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Whole amount, thousands grouped, followed by the currency code.
    Currency,
    /// Percentage points (the data holds `78.5`, not `0.785`).
    Percent,
    Number,
    #[default]
    Text,
}

/// A formatted value. `number` keeps the raw figure for spreadsheet cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub number: Option<f64>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number: None,
        }
    }

    pub fn empty() -> Self {
        Self::text("-")
    }
}

pub fn format_value(value: Option<&Value>, format: ValueFormat, currency: &str) -> Cell {
    let Some(value) = value else {
        return Cell::empty();
    };

    match (value, format) {
        (Value::Null, _) => Cell::empty(),
        (Value::Number(n), ValueFormat::Currency) => {
            let amount = n.as_f64().unwrap_or_default();
            Cell {
                text: format!("{} {currency}", group_thousands(amount.round() as i64)),
                number: Some(amount),
            }
        }
        (Value::Number(n), ValueFormat::Percent) => {
            let pct = n.as_f64().unwrap_or_default();
            Cell {
                text: format!("{pct:.1}%"),
                number: Some(pct),
            }
        }
        (Value::Number(n), ValueFormat::Number | ValueFormat::Text) => {
            let figure = n.as_f64().unwrap_or_default();
            let text = if figure.fract() == 0.0 {
                group_thousands(figure as i64)
            } else {
                format!("{figure:.1}")
            };
            Cell {
                text,
                number: Some(figure),
            }
        }
        (Value::String(s), _) => Cell::text(s.as_str()),
        (Value::Bool(b), _) => Cell::text(if *b { "Yes" } else { "No" }),
        (Value::Array(items), _) => Cell::text(
            items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        (Value::Object(_), _) => Cell::text(value.to_string()),
    }
}

/// `1250000` → `1 250 000`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// Resolve a dotted path (`revenue.total`) inside the report data.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
