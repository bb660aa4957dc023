//! Bean aggregate. `processing` and `composition` are composite optionals: each is
//! surfaced only when one of its constituent flags is true, regardless of what the
//! other stored constituents hold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DegreeOfRoasting {
    Light,
    Medium,
    Dark,
}

impl DegreeOfRoasting {
    pub const ALL: [DegreeOfRoasting; 3] = [
        DegreeOfRoasting::Light,
        DegreeOfRoasting::Medium,
        DegreeOfRoasting::Dark,
    ];

    /// Stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            DegreeOfRoasting::Light => "LIGHT",
            DegreeOfRoasting::Medium => "MEDIUM",
            DegreeOfRoasting::Dark => "DARK",
        }
    }
}

impl fmt::Display for DegreeOfRoasting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown degree of roasting: '{0}'")]
pub struct UnknownDegreeOfRoasting(pub String);

impl FromStr for DegreeOfRoasting {
    type Err = UnknownDegreeOfRoasting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DegreeOfRoasting::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDegreeOfRoasting(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanProcessing {
    pub is_washed: bool,
    pub is_semi_washed: bool,
    pub is_natural: bool,
}

impl BeanProcessing {
    pub fn is_present(&self) -> bool {
        self.is_washed || self.is_semi_washed || self.is_natural
    }

    /// Presence rule applied to stored columns; null flags read as false.
    pub fn from_columns(
        is_washed: Option<bool>,
        is_semi_washed: Option<bool>,
        is_natural: Option<bool>,
    ) -> Option<Self> {
        let processing = BeanProcessing {
            is_washed: is_washed.unwrap_or(false),
            is_semi_washed: is_semi_washed.unwrap_or(false),
            is_natural: is_natural.unwrap_or(false),
        };
        processing.is_present().then_some(processing)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanComposition {
    pub contains_arabica: bool,
    pub contains_robusta: bool,
    #[serde(default)]
    pub arabica_fraction: Option<f64>,
    #[serde(default)]
    pub robusta_fraction: Option<f64>,
}

impl BeanComposition {
    pub fn is_present(&self) -> bool {
        self.contains_arabica || self.contains_robusta
    }

    /// Presence rule applied to stored columns. Fractions are carried through
    /// untouched when the composite is present.
    pub fn from_columns(
        contains_arabica: Option<bool>,
        contains_robusta: Option<bool>,
        arabica_fraction: Option<f64>,
        robusta_fraction: Option<f64>,
    ) -> Option<Self> {
        let composition = BeanComposition {
            contains_arabica: contains_arabica.unwrap_or(false),
            contains_robusta: contains_robusta.unwrap_or(false),
            arabica_fraction,
            robusta_fraction,
        };
        composition.is_present().then_some(composition)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bean {
    pub id: Uuid,
    pub name: String,
    pub roastery_id: Uuid,
    pub altitude: Option<String>,
    pub processing: Option<BeanProcessing>,
    pub composition: Option<BeanComposition>,
    /// Never `Some` of an empty set.
    pub origins: Option<BTreeSet<String>>,
    pub degree_of_roasting: Option<DegreeOfRoasting>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBean {
    pub name: String,
    pub roastery_id: Uuid,
    #[serde(default)]
    pub altitude: Option<String>,
    #[serde(default)]
    pub processing: Option<BeanProcessing>,
    #[serde(default)]
    pub composition: Option<BeanComposition>,
    #[serde(default)]
    pub origins: Option<BTreeSet<String>>,
    #[serde(default)]
    pub degree_of_roasting: Option<DegreeOfRoasting>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewBean {
    pub fn new(name: impl Into<String>, roastery_id: Uuid) -> Self {
        NewBean {
            name: name.into(),
            roastery_id,
            altitude: None,
            processing: None,
            composition: None,
            origins: None,
            degree_of_roasting: None,
            description: None,
        }
    }

    /// Origin codes to associate; absent and empty are the same.
    pub fn origin_codes(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().flatten().map(String::as_str)
    }

    /// The aggregate this input reads back as once stored under `id`.
    pub fn into_bean(self, id: Uuid) -> Bean {
        Bean {
            id,
            name: self.name,
            roastery_id: self.roastery_id,
            altitude: self.altitude,
            processing: self.processing.filter(BeanProcessing::is_present),
            composition: self.composition.filter(BeanComposition::is_present),
            origins: self.origins.filter(|o| !o.is_empty()),
            degree_of_roasting: self.degree_of_roasting,
            description: self.description,
        }
    }
}

/// Bean input for the nested `/roasteries/:id/beans` route, where the owner comes from the path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBeanWithoutRoasteryId {
    pub name: String,
    #[serde(default)]
    pub altitude: Option<String>,
    #[serde(default)]
    pub processing: Option<BeanProcessing>,
    #[serde(default)]
    pub composition: Option<BeanComposition>,
    #[serde(default)]
    pub origins: Option<BTreeSet<String>>,
    #[serde(default)]
    pub degree_of_roasting: Option<DegreeOfRoasting>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewBeanWithoutRoasteryId {
    pub fn into_new_bean(self, roastery_id: Uuid) -> NewBean {
        NewBean {
            name: self.name,
            roastery_id,
            altitude: self.altitude,
            processing: self.processing,
            composition: self.composition,
            origins: self.origins,
            degree_of_roasting: self.degree_of_roasting,
            description: self.description,
        }
    }
}
