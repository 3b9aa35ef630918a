//! Displayed header to attribute name remapping.
//!
//! The first alias listed for an attribute is its canonical display header,
//! used when an entity is re-serialized into a scope.

use crate::model::entity::{BOOL_ATTRS, PEOPLE_ATTRS, TEXT_ATTRS, TIMESTAMP_ATTRS};

/// `(display header, attribute)` pairs. Headers are compared upper-cased.
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("Title", "title"),
    ("Code", "slug"),
    ("State", "status"),
    ("Status", "status"),
    ("Launch Status", "status"),
    ("Description", "description"),
    ("Notes", "notes"),
    ("Assessment Type", "assessment_type"),
    ("Last Updated By", "modified_by"),
    ("Modified By", "modified_by"),
    ("Review State", "review_status"),
    ("Review Status", "review_status"),
    ("REVIEW_STATUS", "review_status"),
    ("REVIEW_STATUS_DISPLAY_NAME", "review_status_display_name"),
    ("Created Date", "created_at"),
    ("Created At", "created_at"),
    ("Last Updated Date", "updated_at"),
    ("Last Updated", "updated_at"),
    ("Verified", "verified"),
    ("Mandatory", "mandatory"),
    ("Comments", "comments"),
    ("Admin", "admins"),
    ("Primary Contacts", "primary_contacts"),
    ("Secondary Contacts", "secondary_contacts"),
    ("Assignees", "assignees"),
    ("Creators", "creators"),
    ("Verifiers", "verifiers"),
    ("Program Managers", "managers"),
    ("Program Editors", "editors"),
    ("Program Readers", "readers"),
    ("Control Operators", "control_operators"),
    ("Control Owners", "control_owners"),
    ("Risk Owners", "risk_owners"),
    ("Other Contacts", "other_contacts"),
    ("Audit Captains", "audit_captains"),
    ("Auditors", "auditors"),
];

const EXTRA_ATTRS: &[&str] = &["comments", "id"];

/// Resolves an upper-cased header to its attribute name.
///
/// Headers spelled as an attribute name (`UPDATED_AT`, `PRIMARY_CONTACTS`)
/// resolve to that attribute. Returns `None` for custom attributes.
pub fn attr_for_header(upper_header: &str) -> Option<&'static str> {
    if let Some((_, attr)) = HEADER_ALIASES
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(upper_header))
    {
        return Some(*attr);
    }
    known_attrs().find(|attr| attr.eq_ignore_ascii_case(upper_header))
}

/// Canonical display header for an attribute; falls back to the attribute name.
pub fn display_header(attr: &str) -> &str {
    HEADER_ALIASES
        .iter()
        .find(|(_, candidate)| *candidate == attr)
        .map_or(attr, |(header, _)| *header)
}

fn known_attrs() -> impl Iterator<Item = &'static str> {
    TEXT_ATTRS
        .iter()
        .chain(TIMESTAMP_ATTRS)
        .chain(BOOL_ATTRS)
        .chain(PEOPLE_ATTRS)
        .chain(EXTRA_ATTRS)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::{attr_for_header, display_header};

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(attr_for_header("CODE"), Some("slug"));
        assert_eq!(attr_for_header("LAST UPDATED"), Some("updated_at"));
        assert_eq!(attr_for_header("PRIMARY_CONTACTS"), Some("primary_contacts"));
        assert_eq!(attr_for_header("MY CUSTOM FIELD"), None);
    }

    #[test]
    fn canonical_header_is_first_alias() {
        assert_eq!(display_header("status"), "State");
        assert_eq!(display_header("updated_at"), "Last Updated Date");
        assert_eq!(display_header("unknown_attr"), "unknown_attr");
    }
}
