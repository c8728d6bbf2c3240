use serde_json::json;

/// Returns the JSON schema for meal plan LLM responses
pub fn get_meal_plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "meals": {
                "type": "array",
                "minItems": 3,
                "maxItems": 6,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "spookyName": { "type": "string" },
                        "timeMinutes": { "type": "integer", "minimum": 1, "maximum": 240 },
                        "calories": { "type": "integer", "minimum": 50, "maximum": 5000 },
                        "macros": {
                            "type": "object",
                            "properties": {
                                "protein_g": { "type": "number", "minimum": 0, "maximum": 300 },
                                "carbs_g": { "type": "number", "minimum": 0, "maximum": 600 },
                                "fat_g": { "type": "number", "minimum": 0, "maximum": 200 }
                            },
                            "required": ["protein_g", "carbs_g", "fat_g"]
                        },
                        "ingredients": {
                            "type": "array",
                            "minItems": 2,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "amount": { "type": "string" }
                                },
                                "required": ["name", "amount"]
                            }
                        },
                        "steps": {
                            "type": "array",
                            "minItems": 3,
                            "items": { "type": "string" }
                        }
                    },
                    "required": [
                        "title", "spookyName", "timeMinutes", "calories",
                        "macros", "ingredients", "steps"
                    ]
                }
            }
        },
        "required": ["meals"]
    })
}
