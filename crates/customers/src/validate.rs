use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{CustomerDraft, Field, MEMBERSHIP_TYPES};

lazy_static! {
    // Etwas vor dem @, etwas dahinter, und ein Punkt mit Zeichen auf beiden
    // Seiten. Leerzeichen und weitere @ sind nirgends erlaubt.
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Checks a draft and returns one message per failing attribute. An empty map
/// means the draft may be submitted.
///
/// Emptiness is judged on the trimmed value; the email format check runs on
/// the value as typed, so surrounding whitespace fails it.
pub fn validate(draft: &CustomerDraft) -> HashMap<Field, String> {
    let mut errors = HashMap::new();

    if draft.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, "First name is required".to_string());
    }
    if draft.last_name.trim().is_empty() {
        errors.insert(Field::LastName, "Last name is required".to_string());
    }
    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required".to_string());
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.insert(Field::Email, "Invalid email format".to_string());
    }
    if draft.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone is required".to_string());
    }
    if draft.address.trim().is_empty() {
        errors.insert(Field::Address, "Address is required".to_string());
    }
    if draft.city.trim().is_empty() {
        errors.insert(Field::City, "City is required".to_string());
    }
    if !MEMBERSHIP_TYPES.contains(&draft.membership_type.trim()) {
        errors.insert(
            Field::MembershipType,
            "Membership type is required".to_string(),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann.lee@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            membership_type: "Gold".to_string(),
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn every_empty_attribute_gets_its_own_message() {
        let errors = validate(&CustomerDraft::default());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[&Field::FirstName], "First name is required");
        assert_eq!(errors[&Field::LastName], "Last name is required");
        assert_eq!(errors[&Field::Email], "Email is required");
        assert_eq!(errors[&Field::Phone], "Phone is required");
        assert_eq!(errors[&Field::Address], "Address is required");
        assert_eq!(errors[&Field::City], "City is required");
        assert_eq!(
            errors[&Field::MembershipType],
            "Membership type is required"
        );
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut draft = valid_draft();
        draft.phone = "   ".to_string();
        draft.city = "\t".to_string();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&Field::Phone], "Phone is required");
        assert_eq!(errors[&Field::City], "City is required");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "plain",
            "missing@tld",
            "no-local.part.com",
            "@example.com",
            "two@@example.com",
            "dot@.com",
            "trailing@example.",
            "spaced name@example.com",
        ] {
            let mut draft = valid_draft();
            draft.email = email.to_string();
            let errors = validate(&draft);
            assert_eq!(errors.get(&Field::Email).map(String::as_str), Some("Invalid email format"), "{email}");
        }
    }

    #[test]
    fn unusual_but_wellformed_emails_pass() {
        for email in ["a@b.c", "first+tag@sub.example.co", "x@y..z"] {
            let mut draft = valid_draft();
            draft.email = email.to_string();
            assert!(validate(&draft).is_empty(), "{email}");
        }
    }

    #[test]
    fn email_format_sees_the_untrimmed_value() {
        let mut draft = valid_draft();
        draft.email = " ann.lee@example.com".to_string();
        let errors = validate(&draft);
        assert_eq!(errors[&Field::Email], "Invalid email format");
    }

    #[test]
    fn membership_must_be_a_known_tier() {
        for tier in MEMBERSHIP_TYPES {
            let mut draft = valid_draft();
            draft.membership_type = tier.to_string();
            assert!(validate(&draft).is_empty(), "{tier}");
        }
        for bogus in ["", "Platinum", "gold"] {
            let mut draft = valid_draft();
            draft.membership_type = bogus.to_string();
            assert_eq!(
                validate(&draft)[&Field::MembershipType],
                "Membership type is required",
                "{bogus:?}"
            );
        }
    }

    #[test]
    fn partially_filled_draft_reports_exactly_the_failing_attributes() {
        let mut draft = valid_draft();
        draft.first_name = String::new();
        draft.email = "bad".to_string();
        draft.membership_type = String::new();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[&Field::FirstName], "First name is required");
        assert_eq!(errors[&Field::Email], "Invalid email format");
        assert_eq!(
            errors[&Field::MembershipType],
            "Membership type is required"
        );
    }
}
