use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serveforge::pipeline::{EnrichedMatch, PipelineOutput, PipelineSummary, ProjectionModel};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

pub fn print_standings(output: &PipelineOutput) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Player").add_attribute(Attribute::Bold),
        Cell::new("Wins").fg(Color::Green),
        Cell::new("Matches"),
        Cell::new("Win %").fg(Color::Cyan),
        Cell::new("Last Rank"),
    ]);
    align_right(&mut table, 2..=5);

    for (i, s) in output.standings.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(s.match_wins),
            Cell::new(s.total_matches),
            Cell::new(format!("{:.1}", s.win_rate * 100.0)),
            Cell::new(opt(output.latest_rank(&s.name), 0)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_projection(model: &ProjectionModel) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Mean"),
        Cell::new("Scale"),
        Cell::new("PC1").fg(Color::Cyan),
        Cell::new("PC2").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=4);

    for (j, feature) in model.features.iter().enumerate() {
        let loading = |k: usize| {
            model
                .loadings
                .get(k)
                .and_then(|l| l.get(j))
                .map(|w| format!("{:+.3}", w))
                .unwrap_or_default()
        };
        table.add_row(vec![
            Cell::new(feature).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", model.means[j])),
            Cell::new(format!("{:.3}", model.scales[j])),
            Cell::new(loading(0)),
            Cell::new(loading(1)),
        ]);
    }

    let ratio = |k: usize| {
        model
            .explained_variance_ratio
            .get(k)
            .map(|r| format!("{:.1}%", r * 100.0))
            .unwrap_or_default()
    };
    table.add_row(vec![
        Cell::new("Explained").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(ratio(0)).fg(Color::Green),
        Cell::new(ratio(1)).fg(Color::Green),
    ]);
    println!("\n{}", table);
    println!(
        "   missing policy: {} | rows projected: {} | dropped: {} | imputed values: {}",
        model.missing_policy, model.rows_projected, model.rows_dropped, model.values_imputed
    );
}

pub fn print_summary(summary: &PipelineSummary) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Stage").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 1..=1);

    let stages = [
        ("Loaded matches", summary.matches_loaded),
        ("Filtered matches", summary.matches_filtered),
        ("Player rows", summary.player_rows),
        ("Selected player rows", summary.selected_rows),
        ("With serve counters", summary.serve_rows),
        ("Projected", summary.projected_rows),
    ];
    for (stage, rows) in stages {
        table.add_row(vec![Cell::new(stage), Cell::new(rows)]);
    }
    println!("\n{}", table);
}

pub fn print_player_rows(name: &str, rows: &[&EnrichedMatch], limit: usize) {
    println!("\nPlayer: {} ({} rows)", name, rows.len());
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Tournament").add_attribute(Attribute::Bold),
        Cell::new("Rd"),
        Cell::new("Score"),
        Cell::new("W/L"),
        Cell::new("Games"),
        Cell::new("1st In"),
        Cell::new("1st Won"),
        Cell::new("2nd Won"),
        Cell::new("PC1").fg(Color::Cyan),
        Cell::new("PC2").fg(Color::Cyan),
    ]);
    align_right(&mut table, 5..=10);

    for row in rows.iter().take(limit) {
        let p = &row.player;
        let serve = row.serve.unwrap_or_default();
        let outcome = if p.won {
            Cell::new("W").fg(Color::Green)
        } else {
            Cell::new("L").fg(Color::Red)
        };
        let games = row
            .games
            .map(|g| format!("{}-{}", g.won, g.lost))
            .unwrap_or_default();
        let [pc1, pc2] = match row.components {
            Some([a, b]) => [Some(a), Some(b)],
            None => [None, None],
        };

        table.add_row(vec![
            Cell::new(p.tourney_date),
            Cell::new(&p.tourney_name),
            Cell::new(&p.round),
            Cell::new(&p.score),
            outcome,
            Cell::new(games),
            Cell::new(opt(serve.first_in_rate, 3)),
            Cell::new(opt(serve.first_win_rate, 3)),
            Cell::new(opt(serve.second_win_rate, 3)),
            Cell::new(opt(pc1, 3)),
            Cell::new(opt(pc2, 3)),
        ]);
    }
    println!("{}", table);
}
