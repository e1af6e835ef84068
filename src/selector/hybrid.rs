use super::{exhaustive, greedy, two_opt, DayContext, Selection};

/// Exhaustive search for pools within the threshold, otherwise greedy
/// refined by 2-opt.
pub fn select(ctx: &DayContext) -> Selection {
    if ctx.pool.len() <= ctx.scorer.config.search.exhaustive_threshold {
        exhaustive::select(ctx)
    } else {
        two_opt::improve(ctx, greedy::select(ctx))
    }
}
