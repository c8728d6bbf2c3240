use serde_json::Value;

pub const MAX_PANTRY_ITEMS: usize = 50;

/// Keeps string entries only, trimmed, non-empty, first occurrence wins,
/// capped at [`MAX_PANTRY_ITEMS`].
pub fn clean_pantry(raw: &[Value]) -> Vec<String> {
    let mut pantry: Vec<String> = Vec::new();

    for item in raw.iter().filter_map(Value::as_str) {
        let item = item.trim();
        if item.is_empty() || pantry.iter().any(|existing| existing == item) {
            continue;
        }
        pantry.push(item.to_string());
        if pantry.len() == MAX_PANTRY_ITEMS {
            break;
        }
    }

    pantry
}
