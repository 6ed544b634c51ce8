/// Construction of the request sent to the reflection service
///
/// The request is a transcript of the selected entries, the visual media
/// attached to them, a summary of the user's goals and the fixed persona
/// instruction.

use crate::domain::{DateRange, Goal, JournalEntry};

/// Heading placed before the transcript
pub const TRANSCRIPT_HEADING: &str =
    "Fragmentos del discurso del analizante para su análisis clínico:";

/// Goals summary used when the user has no goals
pub const NO_GOALS_PLACEHOLDER: &str =
    "No se han detectado deseos conscientes explicitados aún.";

const SYSTEM_INSTRUCTION_TEMPLATE: &str = r#"Sos un psicoanalista clínico de Buenos Aires con muchos años de práctica. Vas a leer el discurso escrito de un analizante durante el período {start} a {end}.

ESTILO:
- Usá el voseo rioplatense profesional ("fijate", "tenés", "podés", "noté que solés").
- Tono agudo y analítico, con la calidez de un espacio terapéutico.

QUÉ DEVOLVER:
1. Analizá los nudos sintomáticos, las repeticiones y su relación con estos deseos declarados:
{goals}
2. Armá una hoja de ruta: al menos tres pasos concretos, ejercicios o tips accionables.
3. Sugerí recursos culturales (libros, artículos, videos, prácticas) con links reales y verificados.

FORMATO:
- Respondé únicamente con un objeto JSON que respete el esquema indicado.
- "summary": síntesis del clima emocional del período.
- "evolution": análisis de las recurrencias y de cómo cambiaron.
- "emotionalPoints": un puntaje entre -5 y 5 por cada fecha con registros.
- "guidance": pasos a seguir, mínimo tres.
- "suggestions": recursos con título, tipo, descripción y link.
- Cada texto tiene que estar completo y terminar con punto final."#;

/// An image or drawing forwarded inline to the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    /// Base64 payload without the data URL prefix
    pub data: String,
}

/// Everything the reflection service needs for one reflection
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionRequest {
    pub range: DateRange,
    pub system_instruction: String,
    pub transcript: String,
    pub media: Vec<InlineMedia>,
}

impl ReflectionRequest {
    /// Build the request for `entries` (in the order given) and `goals`
    pub fn build(entries: &[JournalEntry], goals: &[Goal], range: DateRange) -> Self {
        Self {
            range,
            system_instruction: system_instruction(&goals_summary(goals), &range),
            transcript: transcript(entries),
            media: inline_media(entries),
        }
    }
}

/// Entries rendered as dated paragraphs under the transcript heading
pub fn transcript(entries: &[JournalEntry]) -> String {
    let body = entries
        .iter()
        .map(|e| format!("[Fecha: {}]: {}", e.created_at.format("%-d/%-m/%Y"), e.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n{}", TRANSCRIPT_HEADING, body)
}

/// One line per goal with its state, or the placeholder
pub fn goals_summary(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return NO_GOALS_PLACEHOLDER.to_string();
    }

    goals
        .iter()
        .map(|g| format!("- {} ({})", g.text, g.status_label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn inline_media(entries: &[JournalEntry]) -> Vec<InlineMedia> {
    entries
        .iter()
        .flat_map(JournalEntry::visual_media)
        .map(|m| InlineMedia {
            mime_type: m.mime_type.clone(),
            data: m.base64_payload().to_string(),
        })
        .collect()
}

fn system_instruction(goals_summary: &str, range: &DateRange) -> String {
    SYSTEM_INSTRUCTION_TEMPLATE
        .replace("{start}", &range.start.format("%d/%m/%Y").to_string())
        .replace("{end}", &range.end.format("%d/%m/%Y").to_string())
        .replace("{goals}", goals_summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};
    use crate::domain::{MediaItem, MediaKind};

    fn entry(ts: &str, text: &str) -> JournalEntry {
        JournalEntry::new(text.to_string(), DateTime::parse_from_rfc3339(ts).unwrap(), None).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_transcript_format() {
        let entries = vec![
            entry("2024-03-09T21:00:00-03:00", "Soñé con el mar."),
            entry("2024-03-02T08:15:00-03:00", "Discutí con mi hermana."),
        ];

        let text = transcript(&entries);
        assert_eq!(
            text,
            "Fragmentos del discurso del analizante para su análisis clínico:\n\
             [Fecha: 9/3/2024]: Soñé con el mar.\n\n\
             [Fecha: 2/3/2024]: Discutí con mi hermana."
        );
    }

    #[test]
    fn test_goals_summary() {
        assert_eq!(goals_summary(&[]), NO_GOALS_PLACEHOLDER);

        let mut done = Goal::new("Terminar la tesis".to_string()).unwrap();
        done.completed = true;
        let pending = Goal::new("Ir a terapia".to_string()).unwrap();

        assert_eq!(
            goals_summary(&[done, pending]),
            "- Terminar la tesis (Logrado)\n- Ir a terapia (Pendiente)"
        );
    }

    #[test]
    fn test_only_visual_media_is_forwarded() {
        let media = vec![
            MediaItem::new(MediaKind::Image, "image/jpeg".to_string(), "data:image/jpeg;base64,IMG".to_string()).unwrap(),
            MediaItem::new(MediaKind::Audio, "audio/webm".to_string(), "data:audio/webm;base64,AUD".to_string()).unwrap(),
            MediaItem::new(MediaKind::Drawing, "image/png".to_string(), "data:image/png;base64,DRW".to_string()).unwrap(),
        ];
        let entries = vec![entry("2024-03-03T10:00:00-03:00", "Con fotos").with_media(media)];

        let request = ReflectionRequest::build(&entries, &[], range());
        assert_eq!(
            request.media,
            vec![
                InlineMedia { mime_type: "image/jpeg".to_string(), data: "IMG".to_string() },
                InlineMedia { mime_type: "image/png".to_string(), data: "DRW".to_string() },
            ]
        );
    }

    #[test]
    fn test_instruction_embeds_goals_and_range() {
        let goal = Goal::new("Dormir mejor".to_string()).unwrap();
        let request = ReflectionRequest::build(
            &[entry("2024-03-03T10:00:00-03:00", "Hola")],
            &[goal],
            range(),
        );

        assert!(request.system_instruction.contains("- Dormir mejor (Pendiente)"));
        assert!(request.system_instruction.contains("01/03/2024 a 09/03/2024"));
        assert!(!request.system_instruction.contains("{goals}"));
    }
}
