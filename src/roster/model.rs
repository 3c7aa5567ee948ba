use serde::{Deserialize, Serialize};

/// Geographic coordinates inside an [`Address`]. Opaque passthrough data:
/// the client never edits or interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Postal address of a user. Opaque passthrough data; synthesized empty on
/// create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Company attached to a user. Only `name` is editable; `catch_phrase` and
/// `bs` are passthrough and synthesized empty on writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// A user record as owned by the remote service. Identity is `id`; the
/// client never invents one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

/// The user-editable subset of a record, as entered in a create/edit form.
/// `company` holds the company *name*; the remaining company fields and the
/// address are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: String,
}

impl UserDraft {
    /// Prefill a draft from an existing record, for editing.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            website: record.website.clone(),
            company: record.company.name.clone(),
        }
    }

    /// Materialize the record this draft describes under a server-assigned
    /// id, with the non-editable subfields synthesized empty.
    pub fn to_record(&self, id: i64) -> UserRecord {
        UserRecord {
            id,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            address: Address::default(),
            company: Company {
                name: self.company.clone(),
                catch_phrase: String::new(),
                bs: String::new(),
            },
        }
    }
}
