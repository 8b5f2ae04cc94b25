use super::hero::{Hero, PowerStat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team selection strategy understood by `/teams/recommend`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Balanced,
    Power,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Balanced, Strategy::Power, Strategy::Random];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::Power => "power",
            Strategy::Random => "random",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Balanced => "Balanced",
            Strategy::Power => "Power focus",
            Strategy::Random => "Random",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A well-formed recommendation request.
///
/// `power` is present exactly when the strategy is [`Strategy::Power`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamQuery {
    strategy: Strategy,
    power: Option<PowerStat>,
}

impl TeamQuery {
    /// Shapes a request from the current selection. A power-focused request
    /// without a chosen attribute ranks by intelligence.
    pub fn new(strategy: Strategy, selected: Option<PowerStat>) -> Self {
        let power = match strategy {
            Strategy::Power => Some(selected.unwrap_or_default()),
            Strategy::Balanced | Strategy::Random => None,
        };
        Self { strategy, power }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn power(&self) -> Option<PowerStat> {
        self.power
    }

    pub fn params(&self) -> Vec<(&'static str, &'static str)> {
        let mut params = vec![("strategy", self.strategy.as_str())];
        if let Some(power) = self.power {
            params.push(("power", power.as_str()));
        }
        params
    }

    pub fn query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Raw query parameters accepted by the recommendation endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamParams {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecommendation {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerStat>,
    #[serde(default)]
    pub team_size: usize,
    #[serde(default)]
    pub reason: Option<String>,
    pub heroes: Vec<Hero>,
}
