//! Members of the social network.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Capability, CapabilitySet};

/// Opaque member identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal details carried by human members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub occupation: String,
    pub empathy: i32,
}

impl PersonProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Racing attributes carried by duck members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuckTraits {
    pub capabilities: CapabilitySet,
    pub speed: f64,
    pub endurance: f64,
}

/// What kind of member this is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    Person(PersonProfile),
    Duck(DuckTraits),
}

/// A member of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub email: String,
    pub kind: MemberKind,
}

impl Member {
    pub fn person(id: MemberId, username: impl Into<String>, email: impl Into<String>, profile: PersonProfile) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            kind: MemberKind::Person(profile),
        }
    }

    pub fn duck(
        id: MemberId,
        username: impl Into<String>,
        email: impl Into<String>,
        capabilities: CapabilitySet,
        speed: f64,
        endurance: f64,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            kind: MemberKind::Duck(DuckTraits { capabilities, speed, endurance }),
        }
    }

    pub fn is_duck(&self) -> bool {
        matches!(self.kind, MemberKind::Duck(_))
    }

    pub fn duck_traits(&self) -> Option<&DuckTraits> {
        match &self.kind {
            MemberKind::Duck(traits) => Some(traits),
            MemberKind::Person(_) => None,
        }
    }

    /// Capabilities of this member. Plain members have none.
    pub fn capabilities(&self) -> CapabilitySet {
        self.duck_traits().map_or(CapabilitySet::NONE, |t| t.capabilities)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    pub fn speed(&self) -> Option<f64> {
        self.duck_traits().map(|t| t.speed)
    }

    pub fn endurance(&self) -> Option<f64> {
        self.duck_traits().map(|t| t.endurance)
    }
}

/// A member that has not yet been assigned an id by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub username: String,
    pub email: String,
    pub kind: MemberKind,
}

impl NewMember {
    pub fn person(username: impl Into<String>, email: impl Into<String>, profile: PersonProfile) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            kind: MemberKind::Person(profile),
        }
    }

    pub fn duck(
        username: impl Into<String>,
        email: impl Into<String>,
        capabilities: CapabilitySet,
        speed: f64,
        endurance: f64,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            kind: MemberKind::Duck(DuckTraits { capabilities, speed, endurance }),
        }
    }

    pub fn with_id(self, id: MemberId) -> Member {
        Member {
            id,
            username: self.username,
            email: self.email,
            kind: self.kind,
        }
    }
}
