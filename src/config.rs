//! Configuration types.

use crate::recipients::PLACEHOLDER_MARKER;
use crate::templates::Category;

/// Generator configuration for one batch run.
///
/// The CC formulas per stage reference the two fixed mailboxes here; the
/// BCC marker and `today` display format are fixed per run as well.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Business function whose template set applies to every row.
    pub category: Category,
    /// Benchmarking team mailbox, CC'd at every stage.
    pub benchmarking_team: String,
    /// Practice manager mailbox, CC'd at follow-up and escalation.
    pub practice_manager: String,
    /// BCC value applied to every stage.
    pub bcc: String,
    /// chrono format string for the `today` template variable.
    pub date_format: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            category: Category::Erd,
            benchmarking_team: "ERDDBTeam.Global@Bain.com".to_string(),
            practice_manager: "Sebastian.Sambale@Bain.com".to_string(),
            bcc: PLACEHOLDER_MARKER.to_string(),
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn for_category(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }
}
