//! Skill categories, per-token XP counters and level math.

use soroban_sdk::{contracttype, Env, String};

/// XP needed per level; `level = xp / XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 100;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Dev,
    Defi,
    Gov,
    Social,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Dev, Category::Defi, Category::Gov, Category::Social];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dev => "dev",
            Category::Defi => "defi",
            Category::Gov => "gov",
            Category::Social => "social",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(e: &Env, name: &String) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| *name == String::from_str(e, category.as_str()))
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SkillStats {
    pub dev: u64,
    pub defi: u64,
    pub gov: u64,
    pub social: u64,
}

impl SkillStats {
    pub fn xp(&self, category: Category) -> u64 {
        match category {
            Category::Dev => self.dev,
            Category::Defi => self.defi,
            Category::Gov => self.gov,
            Category::Social => self.social,
        }
    }

    pub fn level(&self, category: Category) -> u64 {
        level_for(self.xp(category))
    }

    /// Adds `amount` to one counter and returns `(old, new)` XP, or `None` on overflow.
    pub fn add(&mut self, category: Category, amount: u64) -> Option<(u64, u64)> {
        let slot = match category {
            Category::Dev => &mut self.dev,
            Category::Defi => &mut self.defi,
            Category::Gov => &mut self.gov,
            Category::Social => &mut self.social,
        };
        let old = *slot;
        let new = old.checked_add(amount)?;
        *slot = new;
        Some((old, new))
    }
}

pub fn level_for(xp: u64) -> u64 {
    xp / XP_PER_LEVEL
}

/// The level reached when moving from `old` to `new` XP, if a threshold was crossed.
///
/// Multiple thresholds crossed at once report only the final level.
pub fn crossed_level(old: u64, new: u64) -> Option<u64> {
    let (before, after) = (level_for(old), level_for(new));
    (after > before).then_some(after)
}
