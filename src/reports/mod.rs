use crate::cmd::compare::{SampleRun, StrategyRun};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use liftforge::api::Engine;
use liftforge::catalog::{Dimension, Exercise};
use liftforge::planner::{round2, WeeklyPlan};
use liftforge::scorer::{DynamicBreakdown, Scorer};
use liftforge::templates::{split_name, DaySpec};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::Range<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn fmt_score(x: f64) -> String {
    format!("{:.2}", x)
}

fn plan_split_name(plan: &WeeklyPlan) -> String {
    let template: Vec<DaySpec> = plan.days.iter().map(|d| d.muscle_groups.clone()).collect();
    split_name(&template)
}

pub fn print_plan_settings(engine: &Engine) {
    let settings = engine.settings();
    println!(
        "\nTraining Days: {} ({}) | Strategy: {}",
        settings.training_days,
        engine.template().map_or_else(|_| "Custom".to_string(), split_name),
        engine.strategy().label()
    );

    let custom: Vec<_> = settings
        .preferences
        .iter()
        .filter(|(_, v)| *v != 1.0)
        .collect();
    if !custom.is_empty() {
        println!("Muscle Preferences:");
        for (category, coefficient) in custom {
            println!("  {}: {}", category, coefficient);
        }
    }

    if !settings.excluded.is_empty() {
        println!("Excluded Exercises:");
        for id in &settings.excluded {
            match engine.exercise(*id) {
                Some(ex) => println!("  - [{}] {}", id, ex.name),
                None => println!("  - [{}] (not in catalog)", id),
            }
        }
    }
}

pub fn print_weekly_summary(plan: &WeeklyPlan) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Day").add_attribute(Attribute::Bold),
        Cell::new("Type"),
        Cell::new("Method"),
        Cell::new("Pool"),
        Cell::new("Exercises"),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    for day in &plan.days {
        let method = day.method.map_or("-", |m| m.label());
        let exercises = if day.is_rest() {
            "Rest and Recovery".to_string()
        } else {
            day.exercises
                .iter()
                .map(|e| format!("{}. {}", e.position, e.name))
                .collect::<Vec<_>>()
                .join("\n")
        };
        table.add_row(vec![
            Cell::new(&day.label),
            Cell::new(&day.day_type),
            Cell::new(method),
            Cell::new(day.pool_size),
            Cell::new(exercises),
            Cell::new(fmt_score(day.total_score)),
        ]);
    }
    align_right(&mut table, 3..4);
    align_right(&mut table, 5..6);

    println!("\n=== WEEKLY PLAN ({}) ===", plan_split_name(plan));
    println!("{}", table);
    println!(
        "Total: {} over {} exercises ({} rest days)",
        fmt_score(plan.total_score()),
        plan.exercise_count(),
        plan.rest_days()
    );
}

/// Per-exercise listing. With breakdowns, adds the dynamic score layers.
pub fn print_detailed_plan(plan: &WeeklyPlan, breakdowns: Option<&[Vec<DynamicBreakdown>]>) {
    println!("\n{}", "=".repeat(80));
    println!(
        "Weekly Workout Plan ({} / {})",
        plan_split_name(plan),
        plan.strategy.label()
    );
    println!("{}", "=".repeat(80));

    for (idx, day) in plan.days.iter().enumerate() {
        println!("\n{}: {}", day.label, day.day_type);
        if day.is_rest() {
            println!("   Rest and Recovery!");
            continue;
        }
        println!("Target Muscles: {}", day.muscle_groups.join(", "));
        println!(
            "Daily Total Score: {} ({} candidates, {})",
            fmt_score(day.total_score),
            day.pool_size,
            day.method.map_or("-", |m| m.label())
        );

        let layers = breakdowns.and_then(|b| b.get(idx));

        let mut table = new_table();
        let mut header = vec![
            Cell::new("#"),
            Cell::new("ID"),
            Cell::new("Exercise").add_attribute(Attribute::Bold),
            Cell::new("Static"),
            Cell::new("Dynamic"),
            Cell::new("Total").fg(Color::Cyan),
            Cell::new("Primary"),
            Cell::new("Secondary"),
        ];
        if layers.is_some() {
            header.extend([
                Cell::new("Pos").fg(Color::Green),
                Cell::new("Bal").fg(Color::Red),
                Cell::new("Fam").fg(Color::Red),
                Cell::new("Week").fg(Color::Red),
                Cell::new("Ovl").fg(Color::Red),
            ]);
        }
        table.set_header(header);

        for (pos, ex) in day.exercises.iter().enumerate() {
            let mut row = vec![
                Cell::new(ex.position),
                Cell::new(ex.id),
                Cell::new(&ex.name),
                Cell::new(fmt_score(ex.static_score)),
                Cell::new(fmt_score(ex.dynamic_score)),
                Cell::new(fmt_score(ex.score)),
                Cell::new(ex.primary_muscles.join(", ")),
                Cell::new(ex.secondary_muscles.join(", ")),
            ];
            if let Some(b) = layers.and_then(|l| l.get(pos)) {
                row.extend(
                    [b.position, b.balance, b.family, b.weekly, b.overlap]
                        .into_iter()
                        .map(|v| Cell::new(fmt_score(round2(v)))),
                );
            }
            table.add_row(row);
        }
        align_right(&mut table, 3..6);
        align_right(&mut table, 8..13);
        println!("{}", table);
    }
}

pub fn print_strategy_comparison(runs: &[StrategyRun]) {
    let Some(first) = runs.first() else {
        return;
    };

    let mut table = new_table();
    let mut header = vec![Cell::new("Day").add_attribute(Attribute::Bold)];
    header.extend(runs.iter().map(|r| Cell::new(r.strategy.label())));
    header.push(Cell::new("Gain").fg(Color::Green));
    table.set_header(header);

    for (idx, day) in first.plan.days.iter().enumerate() {
        let scores: Vec<f64> = runs
            .iter()
            .map(|r| r.plan.days.get(idx).map_or(0.0, |d| d.total_score))
            .collect();
        let mut row = vec![Cell::new(format!("{} ({})", day.label, day.day_type))];
        row.extend(scores.iter().map(|s| Cell::new(fmt_score(*s))));
        row.push(gain_cell(&scores));
        table.add_row(row);
    }

    let totals: Vec<f64> = runs.iter().map(|r| r.plan.total_score()).collect();
    let mut total_row = vec![Cell::new("Total").add_attribute(Attribute::Bold)];
    total_row.extend(
        totals
            .iter()
            .map(|s| Cell::new(fmt_score(*s)).add_attribute(Attribute::Bold)),
    );
    total_row.push(gain_cell(&totals));
    table.add_row(total_row);

    let mut time_row = vec![Cell::new("Time")];
    time_row.extend(runs.iter().map(|r| Cell::new(format!("{:.2?}", r.elapsed))));
    time_row.push(Cell::new(""));
    table.add_row(time_row);

    align_right(&mut table, 1..runs.len() + 2);

    println!("\n=== STRATEGY COMPARISON ===");
    println!("{}", table);
}

/// Last column minus first column.
fn gain_cell(scores: &[f64]) -> Cell {
    let gain = match (scores.first(), scores.last()) {
        (Some(a), Some(b)) => round2(b - a),
        _ => 0.0,
    };
    let cell = Cell::new(format!("{:+.2}", gain));
    if gain > 0.0 {
        cell.fg(Color::Green)
    } else if gain < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn print_sample_comparison(samples: &[SampleRun]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Orderings"),
        Cell::new("Greedy"),
        Cell::new("Exhaustive").fg(Color::Cyan),
        Cell::new("Gap"),
        Cell::new("Greedy Time"),
        Cell::new("Exhaustive Time"),
    ]);

    for s in samples {
        table.add_row(vec![
            Cell::new(s.size),
            Cell::new(s.orderings),
            Cell::new(fmt_score(s.greedy_score)),
            Cell::new(fmt_score(s.exhaustive_score)),
            gain_cell(&[s.greedy_score, s.exhaustive_score]),
            Cell::new(format!("{:.2?}", s.greedy_time)),
            Cell::new(format!("{:.2?}", s.exhaustive_time)),
        ]);
    }
    align_right(&mut table, 0..7);

    println!("\n=== GREEDY vs EXHAUSTIVE ===");
    println!("{}", table);
}

pub fn print_exercise_detail(exercise: &Exercise, scorer: &Scorer) {
    let catalog = &scorer.catalog;
    let profile = scorer.profile(exercise.id);

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    let groups: Vec<&str> = profile
        .groups
        .iter()
        .filter_map(|&g| catalog.muscle_groups().get(g).map(String::as_str))
        .collect();
    let family = profile
        .family
        .and_then(|f| catalog.family_name(f))
        .unwrap_or("-");

    let mut rows: Vec<(String, String)> = vec![
        ("ID".into(), exercise.id.to_string()),
        ("Name".into(), exercise.name.clone()),
        ("Primary".into(), exercise.primary_muscles.join(", ")),
        ("Secondary".into(), exercise.secondary_muscles.join(", ")),
        ("Muscle Groups".into(), groups.join(", ")),
    ];
    for dim in Dimension::iter() {
        let side = profile.side(dim).map_or("-", |s| dim.side_name(s));
        rows.push((dim.to_string(), side.to_string()));
    }
    rows.push(("Family".into(), family.to_string()));
    rows.push(("Common".into(), if profile.common { "yes" } else { "no" }.into()));
    rows.push((
        "Static Score".into(),
        fmt_score(scorer.static_score(exercise)),
    ));

    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    println!("{}", table);
}

pub fn print_catalog_summary(engine: &Engine) {
    let catalog = engine.catalog();
    println!(
        "\nCatalog: {} exercises, {} muscle groups, {} movement families",
        catalog.len(),
        catalog.group_count(),
        catalog.family_count()
    );

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Muscle Group").add_attribute(Attribute::Bold),
        Cell::new("Exercises"),
    ]);
    for label in catalog.muscle_groups() {
        let count = catalog.members(label).map_or(0, |m| m.len());
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    align_right(&mut table, 1..2);
    println!("{}", table);

    let templates: Vec<String> = catalog
        .templates()
        .days()
        .filter_map(|d| {
            let template = catalog.templates().get(d).ok()?;
            Some(format!("{} ({})", d, split_name(template)))
        })
        .collect();
    println!("Templates: {}", templates.join(", "));
}
