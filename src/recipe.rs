use serde::{Deserialize, Serialize};
use std::fmt;

/// A nutritional role a recipe can fill in a dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Protein,
    Starch,
    Vegetable,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Protein, Role::Starch, Role::Vegetable];

    fn bit(self) -> u8 {
        match self {
            Role::Protein => 0b001,
            Role::Starch => 0b010,
            Role::Vegetable => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Protein => "protein",
            Role::Starch => "starch",
            Role::Vegetable => "vegetable",
        };
        f.write_str(name)
    }
}

/// Small set of roles. Serialized as a list of role names.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const FULL: RoleSet = RoleSet(0b111);

    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self) -> bool {
        self == Self::FULL
    }

    pub fn union(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 | other.0)
    }

    pub fn intersection(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 & other.0)
    }

    pub fn difference(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 & !other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(set: RoleSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|r| r.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Opaque identifier assigned by the recipe store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        RecipeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId(id.to_string())
    }
}

/// Meal category assigned by the external classifier alongside the roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Side,
    Dessert,
    Other(String),
}

impl MealCategory {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "breakfast" => MealCategory::Breakfast,
            "lunch" => MealCategory::Lunch,
            "dinner" => MealCategory::Dinner,
            "side" => MealCategory::Side,
            "dessert" => MealCategory::Dessert,
            other => MealCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Side => "side",
            MealCategory::Dessert => "dessert",
            MealCategory::Other(name) => name,
        }
    }
}

impl From<String> for MealCategory {
    fn from(name: String) -> Self {
        MealCategory::parse(&name)
    }
}

impl From<MealCategory> for String {
    fn from(category: MealCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub roles: RoleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MealCategory>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Recipe {
            id: RecipeId::new(id),
            name: name.into(),
            roles: roles.into_iter().collect(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: MealCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// A single recipe covering protein, starch and vegetable.
    pub fn is_complete_meal(&self) -> bool {
        self.roles.is_full()
    }
}
