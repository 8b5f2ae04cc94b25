use serde::{Deserialize, Serialize};
use std::fmt;

pub type HeroId = i64;

/// A character from the catalog. Stats are `None` when unknown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub intelligence: Option<u32>,
    #[serde(default)]
    pub strength: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub durability: Option<u32>,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub combat: Option<u32>,
}

impl Hero {
    /// A hero with only an id and a name, everything else unknown
    pub fn named(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            full_name: None,
            publisher: None,
            alignment: None,
            gender: None,
            race: None,
            image_url: None,
            intelligence: None,
            strength: None,
            speed: None,
            durability: None,
            power: None,
            combat: None,
        }
    }

    pub fn stat(&self, stat: PowerStat) -> Option<u32> {
        match stat {
            PowerStat::Intelligence => self.intelligence,
            PowerStat::Strength => self.strength,
            PowerStat::Speed => self.speed,
            PowerStat::Durability => self.durability,
            PowerStat::Power => self.power,
            PowerStat::Combat => self.combat,
        }
    }

    pub fn set_stat(&mut self, stat: PowerStat, value: Option<u32>) {
        let slot = match stat {
            PowerStat::Intelligence => &mut self.intelligence,
            PowerStat::Strength => &mut self.strength,
            PowerStat::Speed => &mut self.speed,
            PowerStat::Durability => &mut self.durability,
            PowerStat::Power => &mut self.power,
            PowerStat::Combat => &mut self.combat,
        };
        *slot = value;
    }
}

/// One of the six numeric attributes a hero can be ranked by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerStat {
    #[default]
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
}

impl PowerStat {
    pub const ALL: [PowerStat; 6] = [
        PowerStat::Intelligence,
        PowerStat::Strength,
        PowerStat::Speed,
        PowerStat::Durability,
        PowerStat::Power,
        PowerStat::Combat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PowerStat::Intelligence => "intelligence",
            PowerStat::Strength => "strength",
            PowerStat::Speed => "speed",
            PowerStat::Durability => "durability",
            PowerStat::Power => "power",
            PowerStat::Combat => "combat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerStat::Intelligence => "Intelligence",
            PowerStat::Strength => "Strength",
            PowerStat::Speed => "Speed",
            PowerStat::Durability => "Durability",
            PowerStat::Power => "Power",
            PowerStat::Combat => "Combat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.as_str() == value)
    }
}

impl fmt::Display for PowerStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_unknown() {
        let hero: Hero = serde_json::from_str(r#"{"id": 70, "name": "Batman"}"#).unwrap();
        assert_eq!(hero, Hero::named(70, "Batman"));
        assert_eq!(hero.stat(PowerStat::Combat), None);
    }

    #[test]
    fn null_stats_are_unknown() {
        let hero: Hero = serde_json::from_str(
            r#"{"id": 1, "name": "A-Bomb", "strength": 100, "speed": null, "publisher": "Marvel Comics"}"#,
        )
        .unwrap();
        assert_eq!(hero.stat(PowerStat::Strength), Some(100));
        assert_eq!(hero.stat(PowerStat::Speed), None);
        assert_eq!(hero.publisher.as_deref(), Some("Marvel Comics"));
    }

    #[test]
    fn set_stat_targets_matching_field() {
        let mut hero = Hero::named(1, "Bane");
        for (value, stat) in PowerStat::ALL.into_iter().enumerate() {
            hero.set_stat(stat, Some(value as u32));
        }
        assert_eq!(hero.intelligence, Some(0));
        assert_eq!(hero.combat, Some(5));
        assert_eq!(hero.stat(PowerStat::Durability), Some(3));
    }

    #[test]
    fn power_stat_parses_wire_names_only() {
        assert_eq!(PowerStat::parse("strength"), Some(PowerStat::Strength));
        assert_eq!(PowerStat::parse("Strength"), None);
        assert_eq!(PowerStat::parse("luck"), None);
        assert_eq!(
            serde_json::to_string(&PowerStat::Durability).unwrap(),
            "\"durability\""
        );
    }
}
