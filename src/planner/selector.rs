use crate::recipes::dto::RecipeCandidate;

/// Distance between a candidate's per-serving calories and the slot target.
pub fn score(candidate: &RecipeCandidate, sub_target: i32) -> f64 {
    (candidate.calories_per_serving() - f64::from(sub_target)).abs()
}

/// Keeps candidates tagged with `cuisine` (case-insensitive substring).
/// Returns everything when no candidate matches.
pub fn prefer_cuisine<'a>(
    candidates: &'a [RecipeCandidate],
    cuisine: Option<&str>,
) -> Vec<&'a RecipeCandidate> {
    let Some(cuisine) = cuisine.map(str::to_lowercase) else {
        return candidates.iter().collect();
    };
    let matching: Vec<&RecipeCandidate> = candidates
        .iter()
        .filter(|c| {
            c.cuisine_tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&cuisine))
        })
        .collect();
    if matching.is_empty() {
        candidates.iter().collect()
    } else {
        matching
    }
}

/// Candidate closest to `sub_target`; the earliest one wins ties.
pub fn select_best<'a>(
    candidates: &'a [RecipeCandidate],
    sub_target: i32,
    cuisine: Option<&str>,
) -> Option<&'a RecipeCandidate> {
    prefer_cuisine(candidates, cuisine)
        .into_iter()
        .map(|c| (c, score(c, sub_target)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

#[cfg(test)]
mod selector_tests {
    use super::*;

    fn candidate(name: &str, calories: Option<f64>, servings: Option<f64>, cuisine: &[&str]) -> RecipeCandidate {
        RecipeCandidate {
            name: name.into(),
            total_calories: calories,
            servings,
            cuisine_tags: cuisine.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_is_no_match() {
        assert!(select_best(&[], 500, None).is_none());
        assert!(select_best(&[], 500, Some("Indian")).is_none());
    }

    #[test]
    fn picks_closest_per_serving() {
        let cs = vec![
            candidate("big batch", Some(2400.0), Some(4.0), &[]), // 600
            candidate("single", Some(900.0), None, &[]),          // 900
            candidate("close", Some(1100.0), Some(2.0), &[]),     // 550
        ];
        assert_eq!(select_best(&cs, 577, None).unwrap().name, "close");
    }

    #[test]
    fn ties_keep_input_order() {
        let cs = vec![
            candidate("first", Some(400.0), None, &[]),
            candidate("second", Some(600.0), None, &[]),
        ];
        assert_eq!(select_best(&cs, 500, None).unwrap().name, "first");
    }

    #[test]
    fn missing_calories_score_as_zero() {
        let cs = vec![
            candidate("unknown", None, Some(2.0), &[]),
            candidate("known", Some(300.0), None, &[]),
        ];
        assert_eq!(score(&cs[0], 231), 231.0);
        assert_eq!(select_best(&cs, 231, None).unwrap().name, "known");
        assert_eq!(select_best(&cs, 100, None).unwrap().name, "unknown");
    }

    #[test]
    fn cuisine_is_preferred_not_required() {
        let cs = vec![
            candidate("exact", Some(577.0), None, &["american"]),
            candidate("indian", Some(900.0), None, &["south indian"]),
        ];
        assert_eq!(select_best(&cs, 577, Some("Indian")).unwrap().name, "indian");
        assert_eq!(select_best(&cs, 577, Some("Mexican")).unwrap().name, "exact");
    }

    #[test]
    fn result_has_minimal_score() {
        let cs: Vec<RecipeCandidate> = (0..25)
            .map(|i| candidate(&format!("r{i}"), Some(f64::from(i * 137 % 1000)), Some(f64::from(i % 3)), &[]))
            .collect();
        for target in [0, 231, 577, 808, 1500] {
            let best = select_best(&cs, target, None).unwrap();
            let best_score = score(best, target);
            assert!(cs.iter().all(|c| score(c, target) >= best_score));
        }
    }
}
