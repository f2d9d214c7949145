use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Membership tiers the backend accepts, in the order forms cycle through them.
pub const MEMBERSHIP_TYPES: [&str; 4] = ["Gold", "Silver", "Bronze", "Basic"];

/// Ein Kundendatensatz, wie ihn das Backend speichert.
/// Die `id` vergibt ausschließlich das Backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub membership_type: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The editable attributes of a record, without identity. A form owns one of
/// these while the user composes a create or edit submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub membership_type: String,
}

impl CustomerDraft {
    /// Copy with surrounding whitespace removed from every attribute.
    /// Drafts are trimmed once, right before they are handed to the backend.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            membership_type: self.membership_type.trim().to_string(),
        }
    }
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            membership_type: customer.membership_type.clone(),
        }
    }
}

/// Editable attributes in the order forms present them. The `Display`
/// serialization doubles as the on-screen label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Field {
    #[strum(serialize = "First Name")]
    FirstName,
    #[strum(serialize = "Last Name")]
    LastName,
    #[strum(serialize = "Email")]
    Email,
    #[strum(serialize = "Phone")]
    Phone,
    #[strum(serialize = "Address")]
    Address,
    #[strum(serialize = "City")]
    City,
    #[strum(serialize = "Membership Type")]
    MembershipType,
}

impl Field {
    pub fn get(self, draft: &CustomerDraft) -> &str {
        match self {
            Field::FirstName => &draft.first_name,
            Field::LastName => &draft.last_name,
            Field::Email => &draft.email,
            Field::Phone => &draft.phone,
            Field::Address => &draft.address,
            Field::City => &draft.city,
            Field::MembershipType => &draft.membership_type,
        }
    }

    pub fn set(self, draft: &mut CustomerDraft, value: String) {
        match self {
            Field::FirstName => draft.first_name = value,
            Field::LastName => draft.last_name = value,
            Field::Email => draft.email = value,
            Field::Phone => draft.phone = value,
            Field::Address => draft.address = value,
            Field::City => draft.city = value,
            Field::MembershipType => draft.membership_type = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn sample() -> Customer {
        Customer {
            id: 7,
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
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["firstName"], "Ann");
        assert_eq!(value["lastName"], "Lee");
        assert_eq!(value["membershipType"], "Gold");
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "id": 3,
            "firstName": "Bob",
            "lastName": "Stone",
            "email": "bob@example.com",
            "phone": "555-0102",
            "address": "2 Oak Ave",
            "city": "Shelbyville",
            "membershipType": "Basic"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, 3);
        assert_eq!(customer.first_name, "Bob");
        assert_eq!(customer.membership_type, "Basic");
    }

    #[test]
    fn draft_from_customer_copies_every_attribute() {
        let customer = sample();
        let draft = CustomerDraft::from(&customer);
        for field in Field::iter() {
            assert!(!field.get(&draft).is_empty());
        }
        assert_eq!(draft.email, customer.email);
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace_only() {
        let mut draft = CustomerDraft::from(&sample());
        draft.first_name = "  Ann ".to_string();
        draft.address = " 1 Main St  ".to_string();
        let trimmed = draft.trimmed();
        assert_eq!(trimmed.first_name, "Ann");
        assert_eq!(trimmed.address, "1 Main St");
        assert_eq!(trimmed.email, "ann.lee@example.com");
    }

    #[test]
    fn field_accessors_round_trip() {
        let mut draft = CustomerDraft::default();
        Field::City.set(&mut draft, "Berlin".to_string());
        assert_eq!(Field::City.get(&draft), "Berlin");
        assert_eq!(Field::Phone.get(&draft), "");
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(sample().full_name(), "Ann Lee");
    }
}
