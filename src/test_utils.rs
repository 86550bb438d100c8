use std::{collections::HashMap, sync::Arc};

use serde_json::json;

use crate::api::AppState;
use crate::auth::CredentialStore;
use crate::dataset::{DatasetStore, Record, TextRecord, loader};

pub const RESULTS_CSV: &str = "\
id,actual_response,response_score,rf_prediction,xgb_prediction,nb_prediction,nb_isotonic_prediction,nb_sigmoid_prediction,segment
1,0,0.123456,0,0,1,0.41,0.39,retail
2,1,0.9,1,1,1,0.88,0.91,wholesale
42,1,0.5,1,0,1,0.62,,retail
";

pub const TEXT_CSV: &str = "\
ID,Name,Description,xgb_prediction,rf_prediction,nb_prediction,nb_isotonic_prediction,nb_sigmoid_prediction,response_score,response_v05,response_v07,response_v09
A-1,Widget,Small widget,0,0,1,0.4,0.3,0.25,0,0,0
A-2,\"Gadget, deluxe\",Large gadget,1,1,1,0.9,0.8,0.95,1,1,1
";

/// Synthetic results rows with ids `1..=rows` and unformatted scores of `id / 100`.
pub fn results_table(rows: usize) -> Vec<Record> {
    (1..=rows as i64)
        .map(|id| Record {
            id,
            actual_response: json!(id % 2),
            response_score: json!(id as f64 / 100.0),
            rf_prediction: json!(id % 2),
            xgb_prediction: json!(1 - id % 2),
            nb_prediction: json!(id % 2),
            nb_isotonic_prediction: json!(0.3),
            nb_sigmoid_prediction: json!(0.4),
            extra: [("segment".to_string(), json!("retail"))].into(),
        })
        .collect()
}

pub fn text_table() -> Vec<TextRecord> {
    loader::read_text(TEXT_CSV.as_bytes()).unwrap()
}

pub fn test_state(rows: usize) -> Arc<AppState> {
    Arc::new(AppState {
        datasets: DatasetStore::new(results_table(rows), text_table()),
        credentials: CredentialStore::new(HashMap::from([
            ("u1".to_string(), "pw1".to_string()),
            ("u2".to_string(), "pw2".to_string()),
        ])),
    })
}
