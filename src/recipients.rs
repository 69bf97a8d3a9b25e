//! Recipient normalization, display-name derivation, and validation.
//!
//! Recipient strings come straight out of spreadsheet cells: semicolon or
//! comma separated, sometimes `Display Name <email>` shaped, sometimes the
//! literal `//` marker meaning "intentionally blank". Everything here is
//! pure string processing — no address book, no DNS, no delivery.

use regex::Regex;

/// Literal marker for an intentionally blank/unknown recipient.
///
/// Exempt from email-shape validation; used as the fixed BCC value.
pub const PLACEHOLDER_MARKER: &str = "//";

// ── Normalizer ──────────────────────────────────────────────────────

/// Split a free-form recipient string on `;` and `,` into trimmed,
/// non-empty tokens, preserving order.
pub fn split_recipients(s: &str) -> Vec<String> {
    s.replace(',', ";")
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge recipient source strings into one `"; "`-joined list.
///
/// Tokens are concatenated in source order and de-duplicated by full
/// lowercased token — two entries with different display names around the
/// same email stay distinct. First occurrence wins.
pub fn merge_recipients<I, S>(sources: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    let mut out = Vec::new();
    for source in sources {
        for token in split_recipients(source.as_ref()) {
            let key = token.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(token);
        }
    }
    out.join("; ")
}

/// Remove from CC any entry whose extracted email already appears in To.
///
/// Unlike [`merge_recipients`], the match key here is the email portion
/// only, lowercased — a CC entry is dropped when its address matches a To
/// address regardless of display-name wrapping or case.
pub fn dedup_against_to(to: &str, cc: &str) -> String {
    let to_emails: Vec<String> = split_recipients(to)
        .iter()
        .map(|e| extract_email(e).to_lowercase())
        .collect();
    let kept: Vec<String> = split_recipients(cc)
        .into_iter()
        .filter(|e| !to_emails.contains(&extract_email(e).to_lowercase()))
        .collect();
    kept.join("; ")
}

/// Extract the email portion of an entry.
///
/// `"John Doe <john@acme.com>"` → `"john@acme.com"`; anything without an
/// angle-bracketed (non-empty) address is returned as-is, trimmed.
pub fn extract_email(entry: &str) -> String {
    let entry = entry.trim();
    if let Some(start) = entry.find('<')
        && let Some(len) = entry[start + 1..].find('>')
    {
        let inside = entry[start + 1..start + 1 + len].trim();
        if !inside.is_empty() {
            return inside.to_string();
        }
    }
    entry.to_string()
}

// ── Display-name deriver ────────────────────────────────────────────

/// Derive a human-readable display name from an email address.
///
/// `"john.doe_smith@acme.com"` → `"John Doe Smith"`. Falls back to `"POC"`
/// when nothing usable is left of the local part.
pub fn derive_display_name(email: &str) -> String {
    let email = extract_email(email);
    let local = email.split('@').next().unwrap_or("");
    let pretty = local.replace(['.', '_', '-'], " ");
    let name = pretty
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { "POC".to_string() } else { name }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// ── Validator ───────────────────────────────────────────────────────

/// Result of checking one labeled recipient list.
#[derive(Debug, Clone)]
pub struct RecipientCheck {
    /// Which list was checked, e.g. `"To"` or `"CC (Sebastian)"`.
    pub label: String,
    /// Entries that failed the email-shape grammar.
    pub invalid: Vec<String>,
}

impl RecipientCheck {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Email-shape validator with a compiled grammar.
///
/// The grammar is deliberately simple: `local@domain.tld` with no embedded
/// whitespace or second `@`. Validation reports, it never raises — the
/// caller decides whether to skip the row.
pub struct RecipientValidator {
    email_re: Regex,
}

impl Default for RecipientValidator {
    fn default() -> Self {
        Self {
            email_re: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap(),
        }
    }
}

impl RecipientValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every entry in a recipient list against the email grammar.
    ///
    /// The literal `//` marker is always accepted. For other entries the
    /// angle-bracket-extracted email portion is what gets tested.
    pub fn check(&self, label: &str, recipients: &str) -> RecipientCheck {
        let invalid: Vec<String> = split_recipients(recipients)
            .into_iter()
            .filter(|entry| {
                entry != PLACEHOLDER_MARKER && !self.email_re.is_match(&extract_email(entry))
            })
            .collect();
        RecipientCheck {
            label: label.to_string(),
            invalid,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Split / merge ───────────────────────────────────────────────

    #[test]
    fn split_handles_semicolons_and_commas() {
        assert_eq!(
            split_recipients("a@x.com, b@y.com; c@z.com"),
            vec!["a@x.com", "b@y.com", "c@z.com"]
        );
    }

    #[test]
    fn split_drops_empty_tokens() {
        assert_eq!(split_recipients("a@x.com;; , ;b@y.com"), vec!["a@x.com", "b@y.com"]);
    }

    #[test]
    fn merge_dedups_case_insensitively_keeping_first() {
        let merged = merge_recipients(["A@x.com; b@y.com", "a@X.com, c@z.com"]);
        assert_eq!(merged, "A@x.com; b@y.com; c@z.com");
    }

    #[test]
    fn merge_keeps_distinct_display_name_wrappings() {
        // Full-string key: same email behind different display names stays.
        let merged = merge_recipients(["John <j@x.com>", "Johnny <j@x.com>"]);
        assert_eq!(merged, "John <j@x.com>; Johnny <j@x.com>");
    }

    #[test]
    fn merge_preserves_source_argument_order() {
        let merged = merge_recipients(["b@y.com", "a@x.com"]);
        assert_eq!(merged, "b@y.com; a@x.com");
    }

    #[test]
    fn merge_of_empty_sources_is_empty() {
        assert_eq!(merge_recipients(["", " ", ";"]), "");
    }

    // ── Dedup against To ────────────────────────────────────────────

    #[test]
    fn dedup_against_to_matches_email_case_insensitively() {
        assert_eq!(dedup_against_to("a@x.com", "A@X.com; b@y.com"), "b@y.com");
    }

    #[test]
    fn dedup_against_to_sees_through_display_names() {
        assert_eq!(dedup_against_to("a@x.com", "Alice <a@x.com>; b@y.com"), "b@y.com");
    }

    #[test]
    fn dedup_against_to_preserves_cc_order() {
        assert_eq!(
            dedup_against_to("x@x.com", "c@c.com; b@b.com; a@a.com"),
            "c@c.com; b@b.com; a@a.com"
        );
    }

    // ── Email extraction ────────────────────────────────────────────

    #[test]
    fn extract_email_from_angle_brackets() {
        assert_eq!(extract_email("John Doe <john@acme.com>"), "john@acme.com");
    }

    #[test]
    fn extract_email_plain_passthrough() {
        assert_eq!(extract_email("  john@acme.com "), "john@acme.com");
    }

    #[test]
    fn extract_email_empty_brackets_returns_original() {
        assert_eq!(extract_email("John <>"), "John <>");
    }

    // ── Display name ────────────────────────────────────────────────

    #[test]
    fn derive_display_name_from_dotted_local_part() {
        assert_eq!(derive_display_name("john.doe_smith@acme.com"), "John Doe Smith");
    }

    #[test]
    fn derive_display_name_falls_back_to_poc() {
        assert_eq!(derive_display_name("@acme.com"), "POC");
        assert_eq!(derive_display_name(""), "POC");
    }

    #[test]
    fn derive_display_name_handles_angle_bracket_form() {
        assert_eq!(derive_display_name("X <jane-roe@acme.com>"), "Jane Roe");
    }

    #[test]
    fn derive_display_name_lowercases_tail_of_words() {
        assert_eq!(derive_display_name("JOHN.DOE@acme.com"), "John Doe");
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn validator_accepts_placeholder_marker() {
        let v = RecipientValidator::new();
        assert!(v.check("BCC", "//").is_valid());
    }

    #[test]
    fn validator_rejects_non_email() {
        let v = RecipientValidator::new();
        let check = v.check("To", "not-an-email");
        assert!(!check.is_valid());
        assert_eq!(check.invalid, vec!["not-an-email"]);
    }

    #[test]
    fn validator_accepts_display_name_form() {
        let v = RecipientValidator::new();
        assert!(v.check("CC", "John Doe <john@acme.com>").is_valid());
    }

    #[test]
    fn validator_rejects_missing_tld() {
        let v = RecipientValidator::new();
        assert!(!v.check("To", "john@acme").is_valid());
    }

    #[test]
    fn validator_collects_only_bad_entries() {
        let v = RecipientValidator::new();
        let check = v.check("CC", "a@x.com; bogus; //; b@y.com");
        assert_eq!(check.invalid, vec!["bogus"]);
    }

    #[test]
    fn validator_empty_list_is_valid() {
        let v = RecipientValidator::new();
        assert!(v.check("CC", "").is_valid());
    }
}
