use studio_core::{Project, StaffMember};

const BASE_SCORE: f32 = 50.0;
const STAT_WEIGHT: f32 = 0.3;
const AFFINITY_WEIGHT: f32 = 0.2;
const LEVEL_GAP_PENALTY: f32 = 5.0;
const SPEED_WEIGHT: f32 = 0.1;

/// How far `have` goes towards `required`, as a percentage capped at 100.
fn requirement_match(have: f32, required: f32) -> f32 {
    if required <= 0.0 {
        return 100.0;
    }
    (have / required * 100.0).min(100.0)
}

/// Fit of `staff` for `project`, an integer in [0, 100].
///
/// Starts at 50 and adjusts for declared stat requirements, genre affinity,
/// the gap between project difficulty and the member's level, and speed.
/// Pure: identical inputs always give the same score.
pub fn match_score(staff: &StaffMember, project: &Project) -> u8 {
    let mut score = BASE_SCORE;

    if let Some(required) = project.requirements.creativity {
        let m = requirement_match(staff.stats.creativity, required);
        score += (m - 50.0) * STAT_WEIGHT;
    }
    if let Some(required) = project.requirements.technical {
        let m = requirement_match(staff.stats.technical, required);
        score += (m - 50.0) * STAT_WEIGHT;
    }
    if let Some(bonus) = staff.affinity_bonus(&project.genre) {
        score += bonus * AFFINITY_WEIGHT;
    }
    let level_gap = project.difficulty.saturating_sub(staff.level_in_role);
    score -= level_gap as f32 * LEVEL_GAP_PENALTY;
    score += (staff.stats.speed - 50.0) * SPEED_WEIGHT;

    if !score.is_finite() {
        return 0;
    }
    score.clamp(0.0, 100.0).round() as u8
}

/// Staff sorted best-first for `project`; ties fall back to staff id.
pub fn rank_staff_for_project<'a>(
    project: &Project,
    staff: impl IntoIterator<Item = &'a StaffMember>,
) -> Vec<(&'a StaffMember, u8)> {
    let mut scored: Vec<_> = staff
        .into_iter()
        .map(|s| (s, match_score(s, project)))
        .collect();
    scored.sort_by(|(a, sa), (b, sb)| sb.cmp(sa).then_with(|| a.id.cmp(&b.id)));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{project, staff};
    use proptest::prelude::*;
    use studio_core::{GenreAffinity, StaffRole};

    #[test]
    fn affinity_adds_a_fifth_of_the_bonus() {
        let mut s = staff("a", StaffRole::Producer, 50.0, 50.0, 50.0);
        s.genre_affinity = Some(GenreAffinity {
            genre: "rock".into(),
            bonus: 20.0,
        });
        let p = project("p", "Rock", 1);
        assert_eq!(match_score(&s, &p), 54);
    }

    #[test]
    fn neutral_staff_scores_fifty() {
        let s = staff("a", StaffRole::Engineer, 10.0, 90.0, 50.0);
        let p = project("p", "Jazz", 1);
        assert_eq!(match_score(&s, &p), 50);
    }

    #[test]
    fn under_levelled_staff_penalised_per_level() {
        let s = staff("a", StaffRole::Engineer, 50.0, 50.0, 50.0);
        let p = project("p", "Jazz", 4);
        assert_eq!(match_score(&s, &p), 35);
    }

    #[test]
    fn requirements_reward_meeting_them() {
        let strong = staff("a", StaffRole::Engineer, 80.0, 80.0, 50.0);
        let weak = staff("b", StaffRole::Engineer, 20.0, 20.0, 50.0);
        let mut p = project("p", "Pop", 1);
        p.requirements.creativity = Some(80.0);
        p.requirements.technical = Some(80.0);
        // 50 + 2 * (100 - 50) * 0.3
        assert_eq!(match_score(&strong, &p), 80);
        // 50 + 2 * (25 - 50) * 0.3
        assert_eq!(match_score(&weak, &p), 35);
    }

    #[test]
    fn score_is_clamped() {
        let s = staff("a", StaffRole::Engineer, 0.0, 0.0, 0.0);
        let p = project("p", "Pop", 30);
        assert_eq!(match_score(&s, &p), 0);
    }

    #[test]
    fn ranking_breaks_ties_by_id() {
        let b = staff("b", StaffRole::Engineer, 50.0, 50.0, 50.0);
        let a = staff("a", StaffRole::Producer, 50.0, 50.0, 50.0);
        let c = staff("c", StaffRole::Songwriter, 50.0, 50.0, 90.0);
        let p = project("p", "Pop", 1);
        let ranked = rank_staff_for_project(&p, [&b, &a, &c]);
        let ids: Vec<_> = ranked.iter().map(|(s, _)| s.id.0.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    proptest! {
        #[test]
        fn deterministic_and_bounded(c in 0.0f32..=100.0, t in 0.0f32..=100.0, sp in 0.0f32..=100.0,
                                     req in proptest::option::of(0.0f32..=100.0), diff in 1u32..10) {
            let s = staff("a", StaffRole::Engineer, c, t, sp);
            let mut p = project("p", "Rock", diff);
            p.requirements.creativity = req;
            let first = match_score(&s, &p);
            let second = match_score(&s, &p);
            prop_assert_eq!(first, second);
            prop_assert!(first <= 100);
        }
    }
}
