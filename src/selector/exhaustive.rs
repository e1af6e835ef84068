use super::{
    compare_totals, evaluate, greedy, position_scores, rebuild, DayContext, Selection, Strategy,
};
use crate::catalog::ExerciseId;
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Orderings the exhaustive search evaluates: C(n, k) * k!.
pub fn ordering_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let mut combos: u128 = 1;
    for i in 0..k {
        combos = combos * (n - i) as u128 / (i + 1) as u128;
    }
    (1..=k as u128).fold(combos, |acc, f| acc.saturating_mul(f))
}

struct Best {
    index: usize,
    order: Vec<ExerciseId>,
    total: f64,
    slots: Vec<f64>,
}

impl Best {
    /// Higher total wins. Totals equal up to rounding prefer the ordering
    /// that scores more in earlier slots, then the earlier subset.
    fn beats(&self, other: &Best) -> bool {
        match compare_totals(self.total, other.total) {
            Ordering::Greater => true,
            Ordering::Equal => match front_loaded(&self.slots, &other.slots) {
                Ordering::Greater => true,
                Ordering::Equal => self.index < other.index,
                Ordering::Less => false,
            },
            Ordering::Less => false,
        }
    }
}

/// Lexicographic comparison of per-slot scores.
fn front_loaded(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_totals(*x, *y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Global optimum over every k-subset and every ordering of it.
///
/// Subsets are enumerated in lexicographic id order and orderings in
/// lexicographic order. Subsets are scored in parallel and reduced with
/// `Best::beats`, a total order, so the result matches a sequential scan.
/// Pools smaller than k fall back to greedy.
pub fn select(ctx: &DayContext) -> Selection {
    let k = ctx.scorer.exercises_per_day();
    let n = ctx.pool.len();
    if n < k {
        debug!("Pool of {} is smaller than {}, using greedy", n, k);
        return greedy::select(ctx);
    }

    debug!("Evaluating {} orderings", ordering_count(n, k));

    let best = ctx
        .pool
        .ids()
        .combinations(k)
        .enumerate()
        .par_bridge()
        .map(|(index, combo)| best_ordering(ctx, index, &combo))
        .reduce_with(|a, b| if b.beats(&a) { b } else { a });

    match best {
        Some(best) => Selection {
            picks: rebuild(ctx, &best.order),
            method: Strategy::Exhaustive,
        },
        None => greedy::select(ctx),
    }
}

fn best_ordering(ctx: &DayContext, index: usize, combo: &[ExerciseId]) -> Best {
    let mut best_order = combo.to_vec();
    let mut best_total = f64::NEG_INFINITY;
    let mut best_slots: Option<Vec<f64>> = None;

    for perm in combo.iter().copied().permutations(combo.len()) {
        let total = evaluate(ctx, &perm);
        let ord = if best_total == f64::NEG_INFINITY {
            Ordering::Greater
        } else {
            compare_totals(total, best_total)
        };
        if ord == Ordering::Greater {
            best_total = total;
            best_order = perm;
            best_slots = None;
        } else if ord == Ordering::Equal {
            let incumbent = best_slots.get_or_insert_with(|| position_scores(ctx, &best_order));
            let slots = position_scores(ctx, &perm);
            if front_loaded(&slots, incumbent) == Ordering::Greater {
                best_order = perm;
                best_slots = Some(slots);
            }
        }
    }

    let slots = best_slots.unwrap_or_else(|| position_scores(ctx, &best_order));
    Best {
        index,
        order: best_order,
        total: best_total,
        slots,
    }
}
