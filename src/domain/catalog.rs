use serde::{Deserialize, Serialize};

use crate::domain::optimizer::Requirements;
use crate::domain::table::RewardTable;

/// A display group of token types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    pub name: String,
    pub tokens: Vec<String>,
}

impl Act {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Keep only the requirement entries for this act's tokens.
    pub fn restrict(&self, requirements: &Requirements) -> Requirements {
        requirements
            .iter()
            .filter(|(token, _)| self.contains(token))
            .map(|(token, &required)| (token.clone(), required))
            .collect()
    }
}

/// Acts in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCatalog {
    acts: Vec<Act>,
}

impl TokenCatalog {
    pub fn new(acts: Vec<Act>) -> Self {
        TokenCatalog { acts }
    }

    /// Single act named `All` holding every token column of the table.
    pub fn from_table(table: &RewardTable) -> Self {
        TokenCatalog {
            acts: vec![Act {
                name: "All".to_string(),
                tokens: table.tokens().iter().cloned().collect(),
            }],
        }
    }

    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    pub fn act(&self, name: &str) -> Option<&Act> {
        self.acts.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// The default selection
    pub fn latest(&self) -> Option<&Act> {
        self.acts.last()
    }
}
