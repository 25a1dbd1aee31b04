use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quiver::config::RuleSet;
use quiver::leaderboard::Standing;
use quiver::scorer::{ScoreAggregate, SessionStatistics, Shot};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn shot_cell(shot: &Option<Shot>) -> Cell {
    let cell = match shot {
        Some(Shot::X) => Cell::new("X").fg(Color::Yellow).add_attribute(Attribute::Bold),
        Some(Shot::Miss) => Cell::new("M").fg(Color::Red),
        Some(s) => Cell::new(s.label()),
        None => Cell::new("·").fg(Color::DarkGrey),
    };
    cell.set_alignment(CellAlignment::Center)
}

pub fn end_table(aggregate: &ScoreAggregate) {
    let arrows = aggregate.config().arrows_per_end as usize;
    let mut table = new_table();

    let mut header = vec![Cell::new("End").add_attribute(Attribute::Bold)];
    header.extend((1..=arrows).map(|i| Cell::new(format!("A{}", i))));
    header.push(Cell::new("Score").fg(Color::Cyan));
    header.push(Cell::new("X"));
    header.push(Cell::new("Total").add_attribute(Attribute::Bold));
    header.push(Cell::new("State"));
    table.set_header(header);

    for (end, (_, running)) in aggregate.ends().iter().zip(aggregate.running_totals()) {
        let mut row = vec![Cell::new(end.end_number())];
        row.extend(end.shots().iter().map(shot_cell));
        row.push(Cell::new(end.end_score()).fg(Color::Cyan));
        row.push(Cell::new(end.x_count()));
        row.push(Cell::new(running).add_attribute(Attribute::Bold));
        row.push(Cell::new(end.state().to_string()));
        table.add_row(row);
    }
    right_align(&mut table, arrows + 1, arrows + 3);

    println!("\n{}", table);
    println!(
        "Total: {} | X: {} | Arrows: {}/{} | Ends complete: {}/{}",
        aggregate.total_score(),
        aggregate.x_count(),
        aggregate.arrows_entered(),
        aggregate.config().total_arrows(),
        aggregate.ends_completed(),
        aggregate.config().ends_planned
    );
}

pub fn statistics(stats: &SessionStatistics) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let rows = [
        (
            "Total",
            format!(
                "{} / {} ({:.1}%)",
                stats.total_score,
                stats.max_possible,
                stats.percentage()
            ),
        ),
        ("X", stats.x_count.to_string()),
        ("10+", stats.ten_plus_count.to_string()),
        ("Misses", stats.miss_count.to_string()),
        ("Avg / Arrow", format!("{:.2}", stats.average_per_arrow)),
        ("Avg / End", format!("{:.2}", stats.average_per_end)),
        ("End Std Dev", format!("{:.2}", stats.end_standard_deviation)),
        (
            "Best End",
            format!("#{} ({})", stats.best_end.end_number, stats.best_end.value),
        ),
        (
            "Worst End",
            format!("#{} ({})", stats.worst_end.end_number, stats.worst_end.value),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    right_align(&mut table, 1, 1);
    println!("\n📊 Statistics\n{}", table);

    let mut dist = new_table();
    let (labels, counts): (Vec<Cell>, Vec<Cell>) = stats
        .distribution
        .iter()
        .map(|(label, count)| {
            (
                Cell::new(label).set_alignment(CellAlignment::Center),
                Cell::new(count).set_alignment(CellAlignment::Center),
            )
        })
        .unzip();
    dist.set_header(labels);
    dist.add_row(counts);
    println!("\n🎯 Distribution\n{}", dist);
}

pub fn standings(standings: &[Standing]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Archer").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("X"),
        Cell::new("10+"),
        Cell::new("Arrows"),
        Cell::new("Done"),
    ]);

    for s in standings {
        table.add_row(vec![
            Cell::new(s.rank),
            Cell::new(&s.name),
            Cell::new(s.total_score).fg(Color::Cyan),
            Cell::new(s.x_count),
            Cell::new(s.ten_plus_count),
            Cell::new(s.arrows_entered),
            Cell::new(if s.complete { "yes" } else { "no" }),
        ]);
    }
    right_align(&mut table, 2, 5);
    println!("\n🏆 Leaderboard\n{}", table);
}

pub fn presets() {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Rule Set").add_attribute(Attribute::Bold),
        Cell::new("Arrows/End"),
        Cell::new("Ends"),
        Cell::new("Max"),
        Cell::new("X"),
        Cell::new("Values"),
    ]);

    for rule_set in RuleSet::iter() {
        let c = rule_set.config();
        let values = match &c.scoring_values {
            Some(v) => v
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
            None => format!("0..={}", c.max_score),
        };
        table.add_row(vec![
            Cell::new(rule_set.to_string()),
            Cell::new(c.arrows_per_end),
            Cell::new(c.ends_planned),
            Cell::new(c.max_score),
            Cell::new(c.x_value),
            Cell::new(values),
        ]);
    }
    println!("{}", table);
}
