use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

/// One row of the results table.
///
/// Columns without a dedicated field are kept in `extra` so full-row
/// responses carry everything the source file had.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    pub actual_response: Value,
    pub response_score: Value,
    pub rf_prediction: Value,
    pub xgb_prediction: Value,
    pub nb_prediction: Value,
    pub nb_isotonic_prediction: Value,
    pub nb_sigmoid_prediction: Value,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Record {
    pub const COLUMNS: [&'static str; 8] = [
        "id",
        "actual_response",
        "response_score",
        "rf_prediction",
        "xgb_prediction",
        "nb_prediction",
        "nb_isotonic_prediction",
        "nb_sigmoid_prediction",
    ];

    pub fn prediction_view(&self) -> PredictionView {
        PredictionView {
            id: self.id,
            actual_response: self.actual_response.clone(),
            response_score: self.response_score.clone(),
            rf_prediction: self.rf_prediction.clone(),
            xgb_prediction: self.xgb_prediction.clone(),
            nb_prediction: self.nb_prediction.clone(),
            nb_isotonic_prediction: self.nb_isotonic_prediction.clone(),
            nb_sigmoid_prediction: self.nb_sigmoid_prediction.clone(),
        }
    }
}

/// Fixed projection returned by the id lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub id: i64,
    pub actual_response: Value,
    pub response_score: Value,
    pub rf_prediction: Value,
    pub xgb_prediction: Value,
    pub nb_prediction: Value,
    pub nb_isotonic_prediction: Value,
    pub nb_sigmoid_prediction: Value,
}

/// One row of the text table, already reduced to the columns the batch
/// endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRecord {
    #[serde(rename = "ID")]
    pub id: Value,
    #[serde(rename = "Name")]
    pub name: Value,
    #[serde(rename = "Description")]
    pub description: Value,
    pub xgb_prediction: Value,
    pub rf_prediction: Value,
    pub nb_prediction: Value,
    pub nb_isotonic_prediction: Value,
    pub nb_sigmoid_prediction: Value,
    pub response_score: Value,
    pub response_v05: Value,
    pub response_v07: Value,
    pub response_v09: Value,
}

impl TextRecord {
    pub const COLUMNS: [&'static str; 12] = [
        "ID",
        "Name",
        "Description",
        "xgb_prediction",
        "rf_prediction",
        "nb_prediction",
        "nb_isotonic_prediction",
        "nb_sigmoid_prediction",
        "response_score",
        "response_v05",
        "response_v07",
        "response_v09",
    ];
}

/// Gives the score formatting pass uniform access to both tables.
pub trait Scored {
    fn response_score(&self) -> &Value;
    fn set_response_score(&mut self, score: Value);
}

impl Scored for Record {
    fn response_score(&self) -> &Value {
        &self.response_score
    }

    fn set_response_score(&mut self, score: Value) {
        self.response_score = score;
    }
}

impl Scored for TextRecord {
    fn response_score(&self) -> &Value {
        &self.response_score
    }

    fn set_response_score(&mut self, score: Value) {
        self.response_score = score;
    }
}

/// Cell spellings a dataframe reader treats as missing.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Types a raw CSV cell the way a dataframe reader would.
pub fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        return Value::Null;
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }

    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    match trimmed {
        "True" | "true" => Value::Bool(true),
        "False" | "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Renders a score with exactly five decimals. Nulls become `nan`.
pub fn format_score(score: &Value) -> Option<String> {
    match score {
        Value::Number(n) => n.as_f64().map(|f| format!("{:.5}", f)),
        Value::Null => Some("nan".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_cell(""), Value::Null);
        assert_eq!(infer_cell("  "), Value::Null);
        assert_eq!(infer_cell("42"), json!(42));
        assert_eq!(infer_cell("-3"), json!(-3));
        assert_eq!(infer_cell("0.25"), json!(0.25));
        assert_eq!(infer_cell("True"), json!(true));
        assert_eq!(infer_cell("false"), json!(false));
        assert_eq!(infer_cell("Widget, large"), json!("Widget, large"));
    }

    #[test]
    fn missing_value_tokens_become_null() {
        for token in ["NaN", "nan", "NA", "N/A", "n/a", "null", "NULL", "None", "#N/A", "<NA>"] {
            assert_eq!(infer_cell(token), Value::Null, "{token}");
        }
        assert_eq!(infer_cell(" NaN "), Value::Null);
        assert_eq!(infer_cell("Nan"), json!("Nan"));
    }

    #[test]
    fn infinite_floats_stay_strings() {
        assert_eq!(infer_cell("inf"), json!("inf"));
        assert_eq!(infer_cell("-inf"), json!("-inf"));
    }

    #[test]
    fn formats_scores_to_five_decimals() {
        assert_eq!(format_score(&json!(0.123456)).as_deref(), Some("0.12346"));
        assert_eq!(format_score(&json!(1)).as_deref(), Some("1.00000"));
        assert_eq!(format_score(&Value::Null).as_deref(), Some("nan"));
        assert_eq!(format_score(&json!("high")), None);
    }

    #[test]
    fn record_serializes_extra_columns_inline() {
        let record = Record {
            id: 1,
            actual_response: json!(0),
            response_score: json!("0.50000"),
            rf_prediction: json!(1),
            xgb_prediction: json!(0),
            nb_prediction: json!(1),
            nb_isotonic_prediction: json!(0.7),
            nb_sigmoid_prediction: json!(0.6),
            extra: BTreeMap::from([("segment".to_string(), json!("retail"))]),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["segment"], json!("retail"));
        assert_eq!(value["id"], json!(1));

        let view = serde_json::to_value(record.prediction_view()).unwrap();
        assert_eq!(view.as_object().unwrap().len(), Record::COLUMNS.len());
        assert!(view.get("segment").is_none());
    }
}
