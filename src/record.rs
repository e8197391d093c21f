use serde::{Deserialize, Serialize};

/// A customer/remedy record exactly as the backend serves it.
///
/// The schema evolved in place: older records carry up to five ad-hoc
/// `remedy1`..`remedy5` slots, newer ones a single `remedies` list. Both
/// shapes coexist in the database, so every field is optional here and
/// [`CustomerRecord::normalize`] collapses them into one canonical form at
/// the API boundary. Nothing outside the `api` module should ever see this
/// type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// 6-digit `MMDDYY` birth-date code.
    #[serde(default)]
    pub dob: Option<String>,

    #[serde(default)]
    pub remedies: Option<Vec<String>>,

    #[serde(default)]
    pub remedy1: Option<String>,
    #[serde(default)]
    pub remedy2: Option<String>,
    #[serde(default)]
    pub remedy3: Option<String>,
    #[serde(default)]
    pub remedy4: Option<String>,
    #[serde(default)]
    pub remedy5: Option<String>,
}

impl CustomerRecord {
    /// Collapse the two remedy representations into a single ordered list.
    ///
    /// A non-empty `remedies` list wins; otherwise the legacy slots are
    /// taken in order. Blank and whitespace-only entries are dropped either
    /// way.
    pub fn normalize(self) -> Customer {
        let from_list = self
            .remedies
            .as_ref()
            .is_some_and(|list| list.iter().any(|r| !r.trim().is_empty()));

        let raw: Vec<String> = if from_list {
            self.remedies.unwrap_or_default()
        } else {
            [
                self.remedy1,
                self.remedy2,
                self.remedy3,
                self.remedy4,
                self.remedy5,
            ]
            .into_iter()
            .flatten()
            .collect()
        };

        let remedies = raw
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        Customer {
            id: self.id,
            customer_id: self.customer_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            dob: self.dob,
            remedies,
        }
    }
}

/// The canonical, normalized customer shape used everywhere past the API
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Backend record id, when the backend exposes one.
    pub id: Option<String>,
    pub customer_id: String,
    pub name: String,
    pub dob: Option<String>,
    pub remedies: Vec<String>,
}

/// Payload for creating or updating a customer record. Always written in
/// the newer list form; the backend keeps legacy slots for old rows only.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub name: String,
    pub dob: String,
    pub remedies: Vec<String>,
}

/// A consultation-booking request as submitted by the booking form.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationRequest {
    pub name: String,
    /// 6-digit `MMDDYY` birth-date code.
    pub dob: String,
    /// Time of birth, free-form (e.g. `04:30`).
    pub time: String,
    pub place: String,
    pub mobile: String,
    pub email: String,
    pub query: String,
}
