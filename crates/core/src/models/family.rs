use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FamilyType {
    /// Household the holder lives with
    #[default]
    Primary,
    /// Parents, siblings, in-laws and so on
    Extended,
}

impl FamilyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyType::Primary => "Primary",
            FamilyType::Extended => "Extended",
        }
    }
}

impl std::fmt::Display for FamilyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relative who can hold a share of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub family_type: FamilyType,
}

impl FamilyMember {
    pub fn new(
        name: impl Into<String>,
        relationship: impl Into<String>,
        family_type: FamilyType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            relationship: relationship.into(),
            family_type,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
