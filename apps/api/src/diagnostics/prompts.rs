// All LLM prompt constants for the Diagnostics module.

/// How many candidate solutions the model is asked for.
pub const SOLUTION_COUNT: usize = 3;

/// Diagnostic instruction template.
/// Replace: {device}, {description}, {media_note}, {count}, {language}
pub const DIAGNOSTIC_PROMPT_TEMPLATE: &str = "Korisnik ima problem sa uređajem: {device}. \
Opis problema: {description}.
{media_note}
Generiši listu od {count} moguća rešenja ili koraka za dijagnostiku {language}.";

/// Sentence added when the user attached visual evidence.
pub const MEDIA_EVIDENCE_NOTE: &str =
    "Korisnik je priložio i vizuelni dokaz (sliku/video) problema.";

// Field descriptions embedded in the response schema.
pub const TITLE_FIELD_DESCRIPTION: &str = "Kratak naslov rešenja";
pub const DESCRIPTION_FIELD_DESCRIPTION: &str = "Detaljno objašnjenje";
pub const STEPS_FIELD_DESCRIPTION: &str = "Koraci za izvođenje";

// Fallback answer, shown whenever the model path fails.
pub const FALLBACK_TITLE: &str = "Sistemska Greška";
pub const FALLBACK_DESCRIPTION: &str = "Trenutno nismo u mogućnosti da obradimo vaš zahtev \
putem AI asistenta. Molimo vas da nas kontaktirate direktno.";
