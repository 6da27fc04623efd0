use crate::recipe::{MealCategory, Recipe, Role};

/// Role-partitioned views over the recipe collection, built once per planning run.
#[derive(Debug, Clone, Default)]
pub struct RecipePools {
    pub protein: Vec<Recipe>,
    pub starch: Vec<Recipe>,
    pub vegetable: Vec<Recipe>,
    /// Recipes that cover all three roles on their own.
    pub complete: Vec<Recipe>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSummary {
    pub protein: usize,
    pub starch: usize,
    pub vegetable: usize,
    pub complete: usize,
}

impl RecipePools {
    /// Sorts recipes into every pool whose role they satisfy. Recipes without
    /// roles land nowhere. Input order is kept within each pool.
    pub fn build<'a, I>(recipes: I) -> Self
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let mut pools = RecipePools::default();
        for recipe in recipes {
            if recipe.roles.contains(Role::Protein) {
                pools.protein.push(recipe.clone());
            }
            if recipe.roles.contains(Role::Starch) {
                pools.starch.push(recipe.clone());
            }
            if recipe.roles.contains(Role::Vegetable) {
                pools.vegetable.push(recipe.clone());
            }
            if recipe.is_complete_meal() {
                pools.complete.push(recipe.clone());
            }
        }
        pools
    }

    pub fn pool(&self, role: Role) -> &[Recipe] {
        match role {
            Role::Protein => &self.protein,
            Role::Starch => &self.starch,
            Role::Vegetable => &self.vegetable,
        }
    }

    pub fn summary(&self) -> PoolSummary {
        PoolSummary {
            protein: self.protein.len(),
            starch: self.starch.len(),
            vegetable: self.vegetable.len(),
            complete: self.complete.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.protein.is_empty() && self.starch.is_empty() && self.vegetable.is_empty()
    }
}

/// Keeps only recipes labelled with `category`. Recipes without a category are dropped.
pub fn filter_by_category(recipes: Vec<Recipe>, category: &MealCategory) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|recipe| recipe.category.as_ref() == Some(category))
        .collect()
}
