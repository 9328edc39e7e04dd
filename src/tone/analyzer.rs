//! Tone analysis
//!
//! Scores a message for respectfulness using a fixed Portuguese lexicon of
//! discourteous terms and imperative phrasings, plus a penalty for runs of
//! exclamation marks. The same analyzer backs the composer preview and the
//! relay gate, so both surfaces always agree on a score.

use serde::{Deserialize, Serialize};

/// Points deducted per distinct lexicon term found
pub const TERM_PENALTY: u32 = 15;

/// Points deducted per run of two or more `!`
pub const EXCLAMATION_PENALTY: u32 = 5;

/// Minimum score classified as respectful
pub const RESPECTFUL_THRESHOLD: u8 = 75;

/// Discourteous terms and imperative phrasings, matched as lowercase substrings.
const NEGATIVE_TERMS: &[&str] = &[
    "burro",
    "idiota",
    "estúpido",
    "nojento",
    "fedido",
    "porco",
    "insuportável",
    "péssimo",
    "horrível",
    "palhaço",
    "chato",
    "detesto",
    "pare de",
    "nunca faça",
    "você precisa",
    "você tem que",
    "ridículo",
    "vergonha",
    "mau cheiro",
    "hálito ruim",
];

/// Advisory rewrites: (any of these phrasings, suggestion shown)
const SUGGESTION_PATTERNS: &[(&[&str], &str)] = &[
    (
        &["você precisa", "você tem que"],
        "Prefira “talvez” ou “pode ajudar” em vez de imposições.",
    ),
    (
        &["pare de"],
        "Tente “talvez diminuir” ou “evitar quando possível”.",
    ),
    (
        &["hálito", "mau cheiro"],
        "Sugira “cuidar um pouco mais do hálito/cheiro” de forma cuidadosa.",
    ),
];

const HARSH_TERMS_SUGGESTION: &str = "Evite termos duros; troque por sugestões gentis.";

/// Overall classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneQuality {
    /// Score at or above [`RESPECTFUL_THRESHOLD`]
    #[serde(rename = "respeitoso")]
    Respectful,
    /// Below the threshold, the composer should nudge a rewrite
    #[serde(rename = "ajustar")]
    NeedsAdjustment,
}

impl ToneQuality {
    /// Label shown next to the score in the composer
    pub fn label(&self) -> &'static str {
        match self {
            ToneQuality::Respectful => "Respeitoso",
            ToneQuality::NeedsAdjustment => "Ajustes recomendados",
        }
    }
}

/// Result of analyzing a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneReport {
    /// Respectfulness score in `[0, 100]`
    pub score: u8,
    /// Lexicon terms found, in lexicon order
    pub issues: Vec<String>,
    /// Number of `!!`-or-longer runs
    pub exclamation_count: usize,
    pub quality: ToneQuality,
    /// Display-only rewrite hints
    pub suggestions: Vec<String>,
}

impl ToneReport {
    pub fn is_respectful(&self) -> bool {
        self.quality == ToneQuality::Respectful
    }
}

/// Analyze a message.
///
/// Each distinct lexicon term present deducts [`TERM_PENALTY`] once, no
/// matter how often it occurs; each exclamation run deducts
/// [`EXCLAMATION_PENALTY`]. Text with no matches (including empty text and
/// scripts the lexicon does not cover) scores 100.
pub fn analyze(text: &str) -> ToneReport {
    let lower = text.to_lowercase();

    let issues: Vec<String> = NEGATIVE_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect();

    let exclamation_count = count_exclamation_runs(text);

    let penalty = issues.len() as u32 * TERM_PENALTY + exclamation_count as u32 * EXCLAMATION_PENALTY;
    let score = 100u32.saturating_sub(penalty).min(100) as u8;

    let mut suggestions = Vec::new();
    if !issues.is_empty() {
        suggestions.push(HARSH_TERMS_SUGGESTION.to_string());
    }
    for (phrasings, suggestion) in SUGGESTION_PATTERNS {
        if phrasings.iter().any(|p| lower.contains(p)) {
            suggestions.push(suggestion.to_string());
        }
    }

    let quality = if score >= RESPECTFUL_THRESHOLD {
        ToneQuality::Respectful
    } else {
        ToneQuality::NeedsAdjustment
    };

    ToneReport {
        score,
        issues,
        exclamation_count,
        quality,
        suggestions,
    }
}

/// Count maximal runs of two or more consecutive `!`.
fn count_exclamation_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut run_len = 0;
    for c in text.chars() {
        if c == '!' {
            run_len += 1;
            if run_len == 2 {
                runs += 1;
            }
        } else {
            run_len = 0;
        }
    }
    runs
}
