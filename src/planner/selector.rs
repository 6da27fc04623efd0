use std::collections::HashSet;

use tracing::debug;

use crate::planner::pools::RecipePools;
use crate::planner::tie_break::TieBreak;
use crate::recipe::{Recipe, RecipeId, RoleSet};

/// Ids of recipes used too recently to be planned again.
///
/// Ids are only ever added during a run.
#[derive(Debug, Clone, Default)]
pub struct RecencySet {
    ids: HashSet<RecipeId>,
}

impl RecencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: RecipeId) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeId> {
        self.ids.iter()
    }
}

impl Extend<RecipeId> for RecencySet {
    fn extend<I: IntoIterator<Item = RecipeId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl FromIterator<RecipeId> for RecencySet {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        RecencySet { ids: iter.into_iter().collect() }
    }
}

/// Default minimum number of distinct roles a component-built day must cover.
pub const DEFAULT_MIN_ROLES_COVERED: usize = 2;

/// Union of the roles of every recipe in `picks`.
pub fn covered_roles<'a, I>(picks: I) -> RoleSet
where
    I: IntoIterator<Item = &'a Recipe>,
{
    picks
        .into_iter()
        .fold(RoleSet::EMPTY, |covered, recipe| covered.union(recipe.roles))
}

/// Number of still-needed roles `recipe` would satisfy.
pub fn gain(recipe: &Recipe, needed: RoleSet) -> usize {
    recipe.roles.intersection(needed).len()
}

/// Picks the recipes for a single day.
///
/// A fresh complete meal is preferred. Otherwise recipes are combined greedily
/// until protein, starch and vegetable are covered or candidates run out. The
/// result is accepted only when it covers at least `min_roles_covered` roles;
/// accepted picks are added to `recency`. An empty vector means the day could
/// not be filled, and `recency` is left untouched.
pub fn select_day<T: TieBreak + ?Sized>(
    pools: &RecipePools,
    recency: &mut RecencySet,
    min_roles_covered: usize,
    tie_break: &mut T,
) -> Vec<Recipe> {
    if let Some(meal) = pick_complete_meal(pools, recency, tie_break) {
        debug!("Picked complete meal '{}' ({})", meal.name, meal.id);
        recency.insert(meal.id.clone());
        return vec![meal];
    }

    let picks = build_from_components(pools, recency, tie_break);
    let covered = covered_roles(picks.iter().copied());
    if covered.len() < min_roles_covered {
        debug!(
            "Component build covered {} (needs at least {} roles); leaving day empty",
            covered, min_roles_covered
        );
        return Vec::new();
    }

    let chosen: Vec<Recipe> = picks.into_iter().cloned().collect();
    for recipe in &chosen {
        recency.insert(recipe.id.clone());
    }
    debug!(
        "Built day from {} recipe(s) covering {}",
        chosen.len(),
        covered
    );
    chosen
}

fn pick_complete_meal<T: TieBreak + ?Sized>(
    pools: &RecipePools,
    recency: &RecencySet,
    tie_break: &mut T,
) -> Option<Recipe> {
    let fresh: Vec<&Recipe> = pools
        .complete
        .iter()
        .filter(|recipe| !recency.contains(&recipe.id))
        .collect();
    if fresh.is_empty() {
        return None;
    }
    Some(fresh[tie_break.choose(fresh.len())].clone())
}

fn build_from_components<'a, T: TieBreak + ?Sized>(
    pools: &'a RecipePools,
    recency: &RecencySet,
    tie_break: &mut T,
) -> Vec<&'a Recipe> {
    let mut seen: HashSet<&RecipeId> = HashSet::new();
    let universe: Vec<&Recipe> = pools
        .protein
        .iter()
        .chain(&pools.starch)
        .chain(&pools.vegetable)
        .filter(|recipe| !recency.contains(&recipe.id))
        .filter(|&recipe| seen.insert(&recipe.id))
        .collect();

    let mut needed = RoleSet::FULL;
    let mut picks: Vec<&Recipe> = Vec::new();

    while !needed.is_empty() {
        let candidates: Vec<&Recipe> = universe
            .iter()
            .copied()
            .filter(|recipe| gain(recipe, needed) > 0)
            .filter(|recipe| !picks.iter().any(|picked| picked.id == recipe.id))
            .collect();
        if candidates.is_empty() {
            debug!("No candidates left for {}", needed);
            break;
        }

        let choice = if needed.len() == 1 {
            let pure: Vec<&Recipe> = candidates
                .iter()
                .copied()
                .filter(|recipe| recipe.roles.len() == 1)
                .collect();
            if pure.is_empty() {
                pick_best(&candidates, needed, tie_break)
            } else {
                pure[tie_break.choose(pure.len())]
            }
        } else {
            pick_best(&candidates, needed, tie_break)
        };

        picks.push(choice);
        needed = needed.difference(choice.roles);
    }

    picks
}

/// Best-score ordering: highest gain, then fewest total roles, then the tie-break.
fn pick_best<'a, T: TieBreak + ?Sized>(
    candidates: &[&'a Recipe],
    needed: RoleSet,
    tie_break: &mut T,
) -> &'a Recipe {
    let score = |recipe: &Recipe| (gain(recipe, needed), std::cmp::Reverse(recipe.roles.len()));
    let best = candidates
        .iter()
        .map(|recipe| score(recipe))
        .max()
        .unwrap_or((0, std::cmp::Reverse(0)));
    let tied: Vec<&'a Recipe> = candidates
        .iter()
        .copied()
        .filter(|recipe| score(recipe) == best)
        .collect();
    tied[tie_break.choose(tied.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::tie_break::{FirstTieBreak, RandomTieBreak};
    use crate::recipe::Role;

    fn ids(picks: &[Recipe]) -> Vec<&str> {
        picks.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_covered_roles_of_nothing_is_empty() {
        assert!(covered_roles(&Vec::<Recipe>::new()).is_empty());
    }

    #[test]
    fn test_one_recipe_per_role() {
        let recipes = vec![
            Recipe::new("P1", "Steak", [Role::Protein]),
            Recipe::new("S1", "Rice", [Role::Starch]),
            Recipe::new("V1", "Broccoli", [Role::Vegetable]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut FirstTieBreak);

        let mut picked = ids(&day);
        picked.sort();
        assert_eq!(picked, vec!["P1", "S1", "V1"]);
        assert_eq!(recency.len(), 3);
    }

    #[test]
    fn test_complete_meal_short_circuits() {
        let recipes = vec![
            Recipe::new("P1", "Steak", [Role::Protein]),
            Recipe::new("M1", "Lasagne", Role::ALL),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut RandomTieBreak::seeded(1));

        assert_eq!(ids(&day), vec!["M1"]);
        assert!(recency.contains(&RecipeId::new("M1")));
        assert!(!recency.contains(&RecipeId::new("P1")));
    }

    #[test]
    fn test_single_role_is_below_threshold() {
        let recipes = vec![Recipe::new("P1", "Steak", [Role::Protein])];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, DEFAULT_MIN_ROLES_COVERED, &mut FirstTieBreak);

        assert!(day.is_empty());
        assert!(recency.is_empty());
    }

    #[test]
    fn test_two_roles_meet_default_threshold_but_not_strict() {
        let recipes = vec![
            Recipe::new("P1", "Steak", [Role::Protein]),
            Recipe::new("S1", "Rice", [Role::Starch]),
        ];
        let pools = RecipePools::build(&recipes);

        let mut strict = RecencySet::new();
        assert!(select_day(&pools, &mut strict, 3, &mut FirstTieBreak).is_empty());
        assert!(strict.is_empty());

        let mut lenient = RecencySet::new();
        let day = select_day(&pools, &mut lenient, 2, &mut FirstTieBreak);
        assert_eq!(ids(&day), vec!["P1", "S1"]);
    }

    #[test]
    fn test_multi_role_recipe_is_picked_once() {
        let recipes = vec![
            Recipe::new("X", "Chicken rice", [Role::Protein, Role::Starch]),
            Recipe::new("V1", "Salad", [Role::Vegetable]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut RandomTieBreak::seeded(3));

        assert_eq!(ids(&day), vec!["X", "V1"]);
        assert!(covered_roles(&day).is_full());
    }

    #[test]
    fn test_best_score_prefers_gain_then_fewer_roles() {
        let recipes = vec![
            Recipe::new("P1", "Steak", [Role::Protein]),
            Recipe::new("PS", "Burger", [Role::Protein, Role::Starch]),
            Recipe::new("V1", "Salad", [Role::Vegetable]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut FirstTieBreak);

        // PS has the highest gain first; V1 is the only vegetable afterwards.
        assert_eq!(ids(&day), vec!["PS", "V1"]);
    }

    #[test]
    fn test_last_role_prefers_pure_recipe() {
        let recipes = vec![
            Recipe::new("PS", "Burger", [Role::Protein, Role::Starch]),
            Recipe::new("SV", "Veggie pasta", [Role::Starch, Role::Vegetable]),
            Recipe::new("V1", "Salad", [Role::Vegetable]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut FirstTieBreak);

        assert_eq!(ids(&day), vec!["PS", "V1"]);
        assert!(!recency.contains(&RecipeId::new("SV")));
    }

    #[test]
    fn test_last_role_falls_back_to_fewest_roles() {
        let recipes = vec![
            Recipe::new("PS", "Burger", [Role::Protein, Role::Starch]),
            Recipe::new("SV", "Veggie pasta", [Role::Starch, Role::Vegetable]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency = RecencySet::new();

        let day = select_day(&pools, &mut recency, 2, &mut FirstTieBreak);

        assert_eq!(ids(&day), vec!["PS", "SV"]);
        assert!(covered_roles(&day).is_full());
    }

    #[test]
    fn test_recent_recipes_are_excluded() {
        let recipes = vec![
            Recipe::new("M1", "Lasagne", Role::ALL),
            Recipe::new("P1", "Steak", [Role::Protein]),
            Recipe::new("P2", "Tofu", [Role::Protein]),
            Recipe::new("S1", "Rice", [Role::Starch]),
        ];
        let pools = RecipePools::build(&recipes);
        let mut recency: RecencySet = ["M1", "P1"].into_iter().map(RecipeId::from).collect();

        let day = select_day(&pools, &mut recency, 2, &mut FirstTieBreak);

        assert_eq!(ids(&day), vec!["P2", "S1"]);
        assert_eq!(recency.len(), 4);
    }

    #[test]
    fn test_random_picks_hold_invariants() {
        let recipes: Vec<Recipe> = (0..30)
            .map(|i| {
                let roles: Vec<Role> = Role::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(bit, _)| (i >> bit) & 1 == 1 || i % 7 == *bit)
                    .map(|(_, role)| role)
                    .collect();
                Recipe::new(format!("r{i}"), format!("Recipe {i}"), roles)
            })
            .collect();
        let pools = RecipePools::build(&recipes);
        let mut tie_break = RandomTieBreak::seeded(11);
        let mut recency = RecencySet::new();

        for _ in 0..20 {
            let before = recency.clone();
            let day = select_day(&pools, &mut recency, 2, &mut tie_break);
            let unique: HashSet<&RecipeId> = day.iter().map(|r| &r.id).collect();
            assert_eq!(unique.len(), day.len());
            for recipe in &day {
                assert!(!before.contains(&recipe.id));
                assert!(recency.contains(&recipe.id));
            }
            if !day.is_empty() {
                assert!(covered_roles(&day).len() >= 2);
            }
            assert!(before.iter().all(|id| recency.contains(id)));
        }
    }
}
