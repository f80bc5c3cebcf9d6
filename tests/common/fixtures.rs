//! Search API response fixtures

use serde_json::{Value, json};

/// One question as the API returns it through the default response filter
pub fn question(id: u64, views: u64, answers: u64) -> Value {
    json!({
        "answer_count": answers,
        "link": format!("https://stackoverflow.com/questions/{id}"),
        "view_count": views,
        "creation_date": 1_700_000_000 + id,
        "question_id": id,
    })
}

/// A successful search response body
pub fn search_page(items: Vec<Value>, total: u64) -> Value {
    json!({
        "items": items,
        "has_more": false,
        "quota_max": 300,
        "quota_remaining": 299,
        "total": total,
    })
}

/// An API error body
pub fn api_error(id: i64, name: &str, message: &str) -> Value {
    json!({
        "error_id": id,
        "error_name": name,
        "error_message": message,
    })
}
