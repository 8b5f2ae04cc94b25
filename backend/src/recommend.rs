use rand::Rng;
use rand::seq::SliceRandom;
use shared::models::{Hero, PowerStat, Strategy, TeamParams, TeamRecommendation};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_TEAM_SIZE: usize = 5;
pub const TEAM_SIZE: RangeInclusive<usize> = 3..=10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TeamError {
    #[error("Team size must be between 3 and 10, got {0}")]
    InvalidSize(usize),
    #[error("No heroes available")]
    NoHeroes,
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Power must be one of intelligence, strength, speed, durability, power, combat")]
    InvalidPower,
}

/// Picks a team from `heroes` according to the requested strategy
pub fn recommend<R: Rng + ?Sized>(
    heroes: &[Hero],
    params: &TeamParams,
    rng: &mut R,
) -> Result<TeamRecommendation, TeamError> {
    let size = params.size.unwrap_or(DEFAULT_TEAM_SIZE);
    if !TEAM_SIZE.contains(&size) {
        return Err(TeamError::InvalidSize(size));
    }
    if heroes.is_empty() {
        return Err(TeamError::NoHeroes);
    }

    let raw_strategy = params.strategy.as_deref().unwrap_or("balanced");
    let strategy = Strategy::parse(raw_strategy)
        .ok_or_else(|| TeamError::UnknownStrategy(raw_strategy.to_string()))?;

    let (team, power, reason) = match strategy {
        Strategy::Random => (
            pick_random(heroes, size, rng),
            None,
            "Random mix for fun.".to_string(),
        ),
        Strategy::Power => {
            let power = params
                .power
                .as_deref()
                .and_then(PowerStat::parse)
                .ok_or(TeamError::InvalidPower)?;
            (
                strongest(heroes, power, size),
                Some(power),
                format!("Top {} scores.", power),
            )
        }
        Strategy::Balanced => (
            balanced(heroes, size, rng),
            None,
            "Mix of heroes, villains, and neutrals.".to_string(),
        ),
    };

    Ok(TeamRecommendation {
        strategy,
        power,
        team_size: team.len(),
        reason: Some(reason),
        heroes: team,
    })
}

fn pick_random<R: Rng + ?Sized>(heroes: &[Hero], count: usize, rng: &mut R) -> Vec<Hero> {
    if heroes.len() <= count {
        return heroes.to_vec();
    }
    heroes.choose_multiple(rng, count).cloned().collect()
}

/// Highest values first; unknown counts as zero and ties keep catalog order
fn strongest(heroes: &[Hero], power: PowerStat, size: usize) -> Vec<Hero> {
    let mut ordered = heroes.to_vec();
    ordered.sort_by_key(|hero| std::cmp::Reverse(hero.stat(power).unwrap_or(0)));
    ordered.truncate(size);
    ordered
}

fn with_alignment(heroes: &[Hero], alignment: &str) -> Vec<Hero> {
    heroes
        .iter()
        .filter(|h| h.alignment.as_deref() == Some(alignment))
        .cloned()
        .collect()
}

fn balanced<R: Rng + ?Sized>(heroes: &[Hero], size: usize, rng: &mut R) -> Vec<Hero> {
    let good = with_alignment(heroes, "good");
    let bad = with_alignment(heroes, "bad");
    let neutral = with_alignment(heroes, "neutral");

    let mut team = pick_random(&good, (size / 2).max(1), rng);
    team.extend(pick_random(&bad, (size / 3).max(1), rng));
    if !neutral.is_empty() {
        team.extend(pick_random(&neutral, 1, rng));
    }

    if team.len() < size {
        let remaining: Vec<Hero> = heroes
            .iter()
            .filter(|h| !team.iter().any(|t| t.id == h.id))
            .cloned()
            .collect();
        let missing = size - team.len();
        team.extend(pick_random(&remaining, missing, rng));
    }
    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn hero(id: i64, alignment: &str, strength: Option<u32>) -> Hero {
        let mut hero = Hero::named(id, format!("Hero {}", id));
        hero.alignment = Some(alignment.to_string());
        hero.strength = strength;
        hero
    }

    fn roster() -> Vec<Hero> {
        vec![
            hero(1, "good", Some(80)),
            hero(2, "good", None),
            hero(3, "good", Some(100)),
            hero(4, "bad", Some(80)),
            hero(5, "bad", Some(10)),
            hero(6, "neutral", Some(55)),
            hero(7, "good", Some(30)),
            hero(8, "bad", None),
            hero(9, "good", Some(90)),
            hero(10, "neutral", Some(20)),
        ]
    }

    fn params(strategy: &str, power: Option<&str>, size: Option<usize>) -> TeamParams {
        TeamParams {
            strategy: Some(strategy.to_string()),
            power: power.map(str::to_string),
            size,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn ids(team: &TeamRecommendation) -> Vec<i64> {
        team.heroes.iter().map(|h| h.id).collect()
    }

    #[test]
    fn power_ranks_descending_with_stable_ties() {
        let team = recommend(&roster(), &params("power", Some("strength"), None), &mut rng())
            .unwrap();
        assert_eq!(ids(&team), vec![3, 9, 1, 4, 6]);
        assert_eq!(team.power, Some(PowerStat::Strength));
        assert_eq!(team.reason.as_deref(), Some("Top strength scores."));
        assert_eq!(team.team_size, 5);
    }

    #[test]
    fn unknown_stat_counts_as_zero() {
        let team = recommend(&roster(), &params("power", Some("strength"), Some(10)), &mut rng())
            .unwrap();
        assert_eq!(&ids(&team)[8..], &[2, 8]);
    }

    #[test]
    fn power_requires_valid_attribute() {
        for power in [None, Some("luck")] {
            let err = recommend(&roster(), &params("power", power, None), &mut rng()).unwrap_err();
            assert_eq!(err, TeamError::InvalidPower);
        }
    }

    #[test]
    fn random_returns_distinct_heroes() {
        let team = recommend(&roster(), &params("random", None, Some(4)), &mut rng()).unwrap();
        let unique: HashSet<_> = ids(&team).into_iter().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(team.strategy, Strategy::Random);
    }

    #[test]
    fn small_catalog_returns_everything() {
        let heroes = roster()[..2].to_vec();
        let team = recommend(&heroes, &params("random", None, None), &mut rng()).unwrap();
        assert_eq!(ids(&team), vec![1, 2]);
    }

    #[test]
    fn balanced_mixes_alignments_and_fills_to_size() {
        let team = recommend(&roster(), &params("balanced", None, None), &mut rng()).unwrap();
        assert_eq!(team.heroes.len(), 5);
        let alignments: Vec<_> = team
            .heroes
            .iter()
            .map(|h| h.alignment.as_deref().unwrap())
            .collect();
        assert!(alignments.iter().filter(|a| **a == "good").count() >= 2);
        assert!(alignments.contains(&"bad"));
        assert!(alignments.contains(&"neutral"));
        let unique: HashSet<_> = ids(&team).into_iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn strategy_defaults_to_balanced() {
        let team = recommend(&roster(), &TeamParams::default(), &mut rng()).unwrap();
        assert_eq!(team.strategy, Strategy::Balanced);
        assert_eq!(
            team.reason.as_deref(),
            Some("Mix of heroes, villains, and neutrals.")
        );
    }

    #[test]
    fn rejects_bad_requests() {
        assert_eq!(
            recommend(&roster(), &params("chaos", None, None), &mut rng()).unwrap_err(),
            TeamError::UnknownStrategy("chaos".to_string())
        );
        assert_eq!(
            recommend(&roster(), &params("random", None, Some(2)), &mut rng()).unwrap_err(),
            TeamError::InvalidSize(2)
        );
        assert_eq!(
            recommend(&[], &params("random", None, None), &mut rng()).unwrap_err(),
            TeamError::NoHeroes
        );
    }
}
