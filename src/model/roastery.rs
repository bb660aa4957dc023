use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address owned by a roastery. `country` is an ISO 3166-1 alpha-2 code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roastery {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<Address>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

/// Create/replace input. Every omitted optional is written as null on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoastery {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

impl NewRoastery {
    pub fn named(name: impl Into<String>) -> Self {
        NewRoastery {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The aggregate this input describes once stored under `id`.
    pub fn into_roastery(self, id: Uuid) -> Roastery {
        Roastery {
            id,
            name: self.name,
            description: self.description,
            address: self.address,
            phone_number: self.phone_number,
            website: self.website,
            facebook: self.facebook,
            instagram: self.instagram,
            twitter: self.twitter,
        }
    }
}
