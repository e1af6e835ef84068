use super::{compare_totals, evaluate, rebuild, DayContext, Selection, Strategy};
use std::cmp::Ordering;
use tracing::debug;

/// First-improvement pair swaps over a fixed set of picks.
///
/// Pairs `(i, j)` with `i < j` are scanned in position order. The first swap
/// that raises the total by more than rounding noise is kept and the scan restarts. Stops after
/// a pass with no improvement or after `max_2opt_iterations` passes.
pub fn improve(ctx: &DayContext, start: Selection) -> Selection {
    let mut order = start.ids();
    let mut current = evaluate(ctx, &order);
    let max_passes = ctx.scorer.config.search.max_2opt_iterations;

    let mut passes = 0;
    let mut swaps = 0;
    let mut improved = true;

    while improved && passes < max_passes {
        improved = false;
        passes += 1;

        'scan: for i in 0..order.len() {
            for j in (i + 1)..order.len() {
                order.swap(i, j);
                let score = evaluate(ctx, &order);
                if compare_totals(score, current) == Ordering::Greater {
                    current = score;
                    swaps += 1;
                    improved = true;
                    break 'scan;
                }
                order.swap(i, j);
            }
        }
    }

    debug!("2-opt: {} swaps in {} passes, total {:.2}", swaps, passes, current);

    Selection {
        picks: rebuild(ctx, &order),
        method: Strategy::TwoOpt,
    }
}
