use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::optimizer::{Outcome, Requirements};

// ---------- API (wire) types: owned & serde-friendly ----------

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SolveRequest {
    /// Restrict the solve to one act's tokens
    #[serde(default)]
    pub act: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CostUpdate {
    pub cost: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct HeroQuery {
    pub act: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiHero {
    pub id: String,
    pub cost: f64,
    pub tokens: BTreeMap<String, u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiPlay {
    pub hero: String,
    pub matches: u32,
    pub cost: f64,
    /// Tokens earned over all matches of this hero
    pub tokens: BTreeMap<String, u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiSolution {
    pub status: Outcome,
    pub act: Option<String>,
    pub plays: Vec<ApiPlay>,
    pub total_matches: u64,
    pub total_cost: f64,
    pub token_totals: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl ToString) -> Self {
        ApiError {
            error: error.to_string(),
        }
    }
}
