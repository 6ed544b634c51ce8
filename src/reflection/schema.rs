/// Output shape required from the reflection service and its validation
///
/// The same type drives both sides of the boundary: schemars renders it as
/// the JSON schema sent with the request, and serde checks the response
/// against it.

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    DateRange, EmotionalPoint, Reflection, Suggestion, MAX_EMOTIONAL_SCORE, MIN_EMOTIONAL_SCORE,
};
use crate::reflection::{RawReflection, ReflectionError};

/// Guidance items the instruction asks for; fewer is tolerated
pub const MIN_GUIDANCE_ITEMS: usize = 3;

/// Structured output of a reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionPayload {
    #[schemars(description = "Síntesis del clima emocional del período.")]
    pub summary: String,
    #[schemars(description = "Análisis profundo de las recurrencias.")]
    pub evolution: String,
    #[schemars(description = "Puntaje entre -5 y 5 por fecha.")]
    pub emotional_points: Vec<EmotionalPoint>,
    #[schemars(description = "Pasos accionables o tips para el crecimiento personal (mínimo 3).")]
    pub guidance: Vec<String>,
    #[schemars(description = "Recursos culturales con links verificados.")]
    pub suggestions: Vec<Suggestion>,
}

/// JSON schema of [`ReflectionPayload`] with every subschema inlined
pub fn output_schema() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.meta_schema = None;
        })
        .into_generator();
    let schema = generator.into_root_schema_for::<ReflectionPayload>();

    serde_json::to_value(schema).unwrap_or(Value::Null)
}

/// Parse and check the raw service output
///
/// Anything that does not match the payload shape is rejected as a whole;
/// no partially populated reflection is ever returned.
pub fn validate(raw: RawReflection, range: DateRange) -> Result<Reflection, ReflectionError> {
    let mut payload: ReflectionPayload = serde_json::from_str(raw.text.trim())
        .map_err(|e| ReflectionError::Malformed(format!("Response does not match the reflection shape: {}", e)))?;

    for point in &mut payload.emotional_points {
        if !point.score.is_finite() {
            return Err(ReflectionError::Malformed(format!(
                "Emotional score for {} is not a number",
                point.date
            )));
        }
        if point.score < MIN_EMOTIONAL_SCORE || point.score > MAX_EMOTIONAL_SCORE {
            tracing::warn!(
                "Clamping emotional score {} for {} into [{}, {}]",
                point.score,
                point.date,
                MIN_EMOTIONAL_SCORE,
                MAX_EMOTIONAL_SCORE
            );
            point.score = point.score.clamp(MIN_EMOTIONAL_SCORE, MAX_EMOTIONAL_SCORE);
        }
    }

    if payload.guidance.len() < MIN_GUIDANCE_ITEMS {
        tracing::warn!(
            "Reflection returned {} guidance items, expected at least {}",
            payload.guidance.len(),
            MIN_GUIDANCE_ITEMS
        );
    }

    Ok(Reflection {
        range,
        summary: payload.summary,
        evolution: payload.evolution,
        emotional_points: payload.emotional_points,
        guidance: payload.guidance,
        suggestions: payload.suggestions,
        grounding_chunks: raw.grounding_chunks,
    })
}
