use crate::models::Hero;

/// Case-insensitive substring match on a display name.
/// A blank query matches everything; otherwise the query is matched as typed,
/// surrounding whitespace included.
pub fn name_matches(name: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Filters the catalog by display name, keeping the original order
pub fn filter_heroes(catalog: &[Hero], query: &str) -> Vec<Hero> {
    if query.trim().is_empty() {
        return catalog.to_vec();
    }
    catalog
        .iter()
        .filter(|hero| name_matches(&hero.name, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Hero> {
        vec![
            Hero::named(1, "Batman"),
            Hero::named(2, "Bane"),
            Hero::named(3, "Superman"),
            Hero::named(4, "Batgirl"),
        ]
    }

    fn ids(heroes: &[Hero]) -> Vec<i64> {
        heroes.iter().map(|h| h.id).collect()
    }

    #[test]
    fn blank_query_returns_catalog_unchanged() {
        let catalog = catalog();
        assert_eq!(filter_heroes(&catalog, ""), catalog);
        assert_eq!(filter_heroes(&catalog, "   "), catalog);
    }

    #[test]
    fn prefix_shared_by_two_names_keeps_both_in_order() {
        let catalog = vec![Hero::named(1, "Batman"), Hero::named(2, "Bane")];
        assert_eq!(ids(&filter_heroes(&catalog, "ba")), vec![1, 2]);
        assert_eq!(ids(&filter_heroes(&catalog, "bat")), vec![1]);
    }

    #[test]
    fn matching_ignores_case() {
        let catalog = catalog();
        assert_eq!(ids(&filter_heroes(&catalog, "BAT")), vec![1, 4]);
        assert_eq!(ids(&filter_heroes(&catalog, "MAN")), vec![1, 3]);
    }

    #[test]
    fn whitespace_in_query_is_significant() {
        let catalog = vec![Hero::named(1, "Iron Man"), Hero::named(2, "Batman")];
        let found = filter_heroes(&catalog, " man");
        assert_eq!(ids(&found), vec![1]);
        assert!(found.iter().all(|h| h.name.to_lowercase().contains(" man")));
        assert!(filter_heroes(&catalog, "batman ").is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_heroes(&catalog(), "joker").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = catalog();
        for query in ["", "a", "bat", "MAN", "zzz"] {
            let once = filter_heroes(&catalog, query);
            let twice = filter_heroes(&once, query);
            assert_eq!(once, twice, "query {:?}", query);
        }
    }

    #[test]
    fn results_are_an_ordered_subsequence() {
        let catalog = catalog();
        let result = filter_heroes(&catalog, "a");
        let mut positions = result
            .iter()
            .map(|hero| catalog.iter().position(|c| c.id == hero.id).unwrap());
        let mut last = positions.next().unwrap();
        for pos in positions {
            assert!(pos > last);
            last = pos;
        }
        assert!(result.iter().all(|h| name_matches(&h.name, "a")));
    }
}
