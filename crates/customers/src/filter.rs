use crate::model::Customer;

/// Derives the visible rows for a search term: case-insensitive substring
/// match against first name, last name or email. The empty term keeps every
/// record, in backend order. The term is matched as typed, not trimmed.
pub fn apply(customers: &[Customer], term: &str) -> Vec<Customer> {
    if term.is_empty() {
        return customers.to_vec();
    }
    let needle = term.to_lowercase();
    customers
        .iter()
        .filter(|customer| {
            customer.first_name.to_lowercase().contains(&needle)
                || customer.last_name.to_lowercase().contains(&needle)
                || customer.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn customer(id: i64, first: &str, last: &str, email: &str) -> Customer {
        Customer {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            membership_type: "Basic".to_string(),
        }
    }

    fn roster() -> Vec<Customer> {
        vec![
            customer(1, "Ann", "Lee", "ann.lee@example.com"),
            customer(2, "Bob", "Stone", "bob@example.com"),
            customer(3, "Kathleen", "Price", "kp@example.com"),
            customer(4, "Carol", "Diaz", "carol@leeward.org"),
        ]
    }

    #[test]
    fn empty_term_keeps_every_record_in_order() {
        let all = roster();
        let visible = apply(&all, "");
        assert_eq!(visible, all);
    }

    #[test]
    fn matches_are_case_insensitive_across_name_and_email() {
        let visible = apply(&roster(), "LEE");
        let ids: Vec<i64> = visible.iter().map(|c| c.id).collect();
        // Ann by last name, Kathleen by first name, Carol by email domain.
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn phone_address_and_city_are_not_searched() {
        assert!(apply(&roster(), "555-0100").is_empty());
        assert!(apply(&roster(), "Main St").is_empty());
        assert!(apply(&roster(), "Springfield").is_empty());
    }

    #[test]
    fn term_is_not_trimmed_before_matching() {
        assert!(apply(&roster(), " lee").is_empty());
    }

    #[test]
    fn filtering_an_already_filtered_list_changes_nothing() {
        let once = apply(&roster(), "lee");
        let twice = apply(&once, "lee");
        assert_eq!(once, twice);
    }

    #[test]
    fn unmatched_term_yields_no_rows() {
        assert!(apply(&roster(), "zz").is_empty());
    }
}
