use std::collections::{BTreeMap, BTreeSet};

use crate::error::DataError;

/// One unvalidated table row, as handed over by a loader.
///
/// Yields are carried as `f64` so that negative or fractional values coming
/// from a data source can be rejected instead of silently truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroRecord {
    pub id: String,
    pub cost: f64,
    pub yields: Vec<(String, f64)>,
}

impl HeroRecord {
    pub fn new(id: impl Into<String>, cost: f64) -> Self {
        HeroRecord {
            id: id.into(),
            cost,
            yields: Vec::new(),
        }
    }

    pub fn with_yield(mut self, token: impl Into<String>, amount: f64) -> Self {
        self.yields.push((token.into(), amount));
        self
    }
}

/// A validated row of the reward table
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    id: String,
    cost: f64,
    yields: BTreeMap<String, u32>,
}

impl Hero {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Tokens earned per single play. Zero for tokens the hero does not award.
    pub fn yield_of(&self, token: &str) -> u32 {
        self.yields.get(token).copied().unwrap_or(0)
    }

    pub fn yields(&self) -> impl Iterator<Item = (&str, u32)> {
        self.yields.iter().map(|(token, &amount)| (token.as_str(), amount))
    }
}

/// Hero -> (cost, yield per token) mapping.
///
/// Yields are read-only once the table is built; only the cost column can be
/// edited. A solve borrows the table, so it always sees one consistent state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardTable {
    heroes: BTreeMap<String, Hero>,
    tokens: BTreeSet<String>,
}

impl RewardTable {
    /// Validate records and build the table.
    pub fn new(records: impl IntoIterator<Item = HeroRecord>) -> Result<Self, DataError> {
        let mut heroes = BTreeMap::new();
        let mut tokens = BTreeSet::new();

        for record in records {
            if heroes.contains_key(&record.id) {
                return Err(DataError::DuplicateHero(record.id));
            }
            validate_cost(&record.id, record.cost)?;

            let mut yields = BTreeMap::new();
            for (token, value) in record.yields {
                let amount = to_yield(&record.id, &token, value)?;
                tokens.insert(token.clone());
                if amount > 0 {
                    yields.insert(token, amount);
                }
            }

            heroes.insert(
                record.id.clone(),
                Hero {
                    id: record.id,
                    cost: record.cost,
                    yields,
                },
            );
        }

        Ok(RewardTable { heroes, tokens })
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn hero(&self, id: &str) -> Option<&Hero> {
        self.heroes.get(id)
    }

    pub fn cost(&self, hero: &str) -> Option<f64> {
        self.heroes.get(hero).map(Hero::cost)
    }

    /// Yield of `token` for `hero`, 0 when either is unknown.
    pub fn yield_of(&self, hero: &str, token: &str) -> u32 {
        self.heroes
            .get(hero)
            .map(|h| h.yield_of(token))
            .unwrap_or(0)
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn hero_ids(&self) -> impl Iterator<Item = &str> {
        self.heroes.keys().map(String::as_str)
    }

    /// Every token column of the table, including all-zero columns.
    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Heroes with a non-zero yield for `token`.
    pub fn heroes_yielding<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a Hero> + 'a {
        self.heroes.values().filter(move |h| h.yield_of(token) > 0)
    }

    pub fn set_cost(&mut self, hero: &str, cost: f64) -> Result<(), DataError> {
        validate_cost(hero, cost)?;
        match self.heroes.get_mut(hero) {
            Some(h) => {
                h.cost = cost;
                Ok(())
            }
            None => Err(DataError::UnknownHero(hero.to_string())),
        }
    }
}

fn validate_cost(hero: &str, cost: f64) -> Result<(), DataError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(())
    } else {
        Err(DataError::InvalidCost {
            hero: hero.to_string(),
            cost,
        })
    }
}

fn to_yield(hero: &str, token: &str, value: f64) -> Result<u32, DataError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(DataError::InvalidYield {
            hero: hero.to_string(),
            token: token.to_string(),
            value,
        })
    }
}
