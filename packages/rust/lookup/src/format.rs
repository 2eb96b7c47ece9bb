//! Contact identifier formatting for label values.

/// Literal email domain suffix that cannot appear in a label value.
const DOMAIN_SUFFIX: &str = "@teco.com.ar";

/// Sanitized replacement used inside label values.
const LABEL_SUFFIX: &str = "-teco_com_ar";

/// Rewrite a team contact identifier into a form valid as a label value.
///
/// The label syntax disallows the characters of a raw email address
/// domain, so the team domain suffix is replaced with a sanitized
/// literal. Identifiers without the suffix pass through unchanged.
pub fn format_contact_label(identifier: &str) -> String {
    identifier.replace(DOMAIN_SUFFIX, LABEL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_team_domain_suffix() {
        assert_eq!(format_contact_label("a@teco.com.ar"), "a-teco_com_ar");
        assert_eq!(
            format_contact_label("security-team@teco.com.ar"),
            "security-team-teco_com_ar"
        );
    }

    #[test]
    fn other_identifiers_unchanged() {
        assert_eq!(format_contact_label("a@other.com"), "a@other.com");
        assert_eq!(format_contact_label("plain-handle"), "plain-handle");
        assert_eq!(format_contact_label(""), "");
    }
}
