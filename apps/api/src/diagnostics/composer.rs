//! Prompt Composer: turns a `DiagnosticRequest` into a Gemini request.
//!
//! Pure: same input, same `GenerationRequest`. The response schema is a
//! static value so it can be checked without touching the network, and the
//! media attachment only ever adds one inline part to the contents.

use std::sync::LazyLock;

use serde_json::{json, Value};

use crate::diagnostics::models::{DiagnosticRequest, Difficulty};
use crate::diagnostics::prompts::{
    DESCRIPTION_FIELD_DESCRIPTION, DIAGNOSTIC_PROMPT_TEMPLATE, MEDIA_EVIDENCE_NOTE,
    SOLUTION_COUNT, STEPS_FIELD_DESCRIPTION, TITLE_FIELD_DESCRIPTION,
};
use crate::llm_client::prompts::{JSON_RESPONSE_MIME_TYPE, SERBIAN_LANGUAGE_INSTRUCTION};
use crate::llm_client::types::{Content, GenerationConfig, GenerationRequest, InlineData, Part};

/// Output schema every diagnostic answer must conform to: an array of
/// solution objects with all four fields required.
pub static SOLUTION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    let difficulty_levels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": TITLE_FIELD_DESCRIPTION },
                "description": { "type": "STRING", "description": DESCRIPTION_FIELD_DESCRIPTION },
                "difficulty": { "type": "STRING", "enum": difficulty_levels },
                "steps": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": STEPS_FIELD_DESCRIPTION
                }
            },
            "required": ["title", "description", "difficulty", "steps"]
        }
    })
});

/// Builds the natural-language instruction for one analysis.
pub fn compose_instruction(request: &DiagnosticRequest) -> String {
    let media_note = if request.media.is_some() {
        MEDIA_EVIDENCE_NOTE
    } else {
        ""
    };

    DIAGNOSTIC_PROMPT_TEMPLATE
        .replace("{device}", request.device.id())
        .replace("{description}", &request.description)
        .replace("{media_note}", media_note)
        .replace("{count}", &SOLUTION_COUNT.to_string())
        .replace("{language}", SERBIAN_LANGUAGE_INSTRUCTION)
}

/// Builds the full generation request: instruction text, optional inline
/// media part, and the JSON response constraint.
///
/// The description is not re-checked here; callers guarantee it is non-empty.
pub fn compose_request(request: &DiagnosticRequest, model: &str) -> GenerationRequest {
    let mut parts = vec![Part::Text {
        text: compose_instruction(request),
    }];

    if let Some(media) = &request.media {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type.clone(),
                data: media.data.clone(),
            },
        });
    }

    GenerationRequest {
        model: model.to_string(),
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_RESPONSE_MIME_TYPE.to_string(),
            response_schema: SOLUTION_SCHEMA.clone(),
        },
    }
}
