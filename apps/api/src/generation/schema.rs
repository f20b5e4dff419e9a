//! Response schema sent with every generation call.
//!
//! Expressed in the OpenAPI subset Gemini accepts for `responseSchema`, so the
//! remote model constrains its own output to:
//! `{titles: string[5], caption: {paragraph1, paragraph2, paragraph3, footer}}`.

use serde_json::{json, Value};

pub const TITLE_COUNT: usize = 5;

pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "titles": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Exactly 5 journalistic titles."
            },
            "caption": {
                "type": "OBJECT",
                "properties": {
                    "paragraph1": { "type": "STRING" },
                    "paragraph2": { "type": "STRING" },
                    "paragraph3": { "type": "STRING" },
                    "footer": { "type": "STRING" }
                },
                "required": ["paragraph1", "paragraph2", "paragraph3", "footer"]
            }
        },
        "required": ["titles", "caption"]
    })
}
