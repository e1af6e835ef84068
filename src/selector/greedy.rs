use super::{compare_totals, Candidate, DayContext, ScoredPick, Selection, Strategy};
use crate::scorer::DayState;
use std::cmp::Ordering;

/// Fills positions in order with the best unused candidate. The first
/// strict maximum in pool order wins, so ties go to the lower id.
pub fn select(ctx: &DayContext) -> Selection {
    let k = ctx.scorer.exercises_per_day();
    let mut day = DayState::with_capacity(k);
    let mut picks = Vec::with_capacity(k);

    for position in 0..k {
        let mut best: Option<(Candidate, f64, f64)> = None;

        for cand in ctx.pool.candidates() {
            if day.contains(cand.id) {
                continue;
            }
            let dynamic = ctx.scorer.dynamic_score(cand.id, position, &day, ctx.weekly);
            let total = cand.static_score + dynamic;
            if best.map_or(true, |(_, _, b)| compare_totals(total, b) == Ordering::Greater) {
                best = Some((*cand, dynamic, total));
            }
        }

        // Pool exhausted
        let Some((cand, dynamic, _)) = best else {
            break;
        };

        picks.push(ScoredPick {
            id: cand.id,
            position,
            static_score: cand.static_score,
            dynamic_score: dynamic,
        });
        ctx.scorer.record(&mut day, cand.id);
    }

    Selection {
        picks,
        method: Strategy::Greedy,
    }
}
