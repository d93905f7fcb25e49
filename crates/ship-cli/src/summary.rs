use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ship_cli::session::LoadedManifest;
use ship_common::{format_currency, format_grouped, format_percent};
use ship_compliance::{CarrierCheck, ComplianceReport, KeyMetrics};
use ship_geo::{GeocodeSummary, Route, RouteReport, TimelineReport};
use ship_ingest::QualityReport;
use ship_map::MappingSuggestion;
use ship_model::StandardField;

pub fn print_mapping(
    manifest: &LoadedManifest,
    suggestions: &BTreeMap<StandardField, Vec<MappingSuggestion>>,
    missing_required: &[StandardField],
) {
    println!("Manifest: {}", manifest.path.display());
    println!(
        "Rows: {}  Columns: {}",
        manifest.raw.height(),
        manifest.raw.width()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Suggestions"),
    ]);
    apply_summary_table_style(&mut table);
    for field in StandardField::ALL {
        let field_cell = if missing_required.contains(&field) {
            Cell::new(field.display_name())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(field.display_name())
        };
        let column_cell = match manifest.mapping.get(field) {
            Some(column) => Cell::new(column).fg(Color::Green),
            None => dim_cell("-"),
        };
        let suggestion_cell = match suggestions.get(&field) {
            Some(ranked) => Cell::new(
                ranked
                    .iter()
                    .map(|s| format!("{} ({:.1})", s.source_column, s.confidence))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            None => dim_cell("-"),
        };
        table.add_row(vec![field_cell, column_cell, suggestion_cell]);
    }
    println!("{table}");
    if !missing_required.is_empty() {
        let names: Vec<&str> = missing_required
            .iter()
            .map(|field| field.display_name())
            .collect();
        eprintln!("Missing required fields: {}", names.join(", "));
    }
}

pub fn print_quality(report: &QualityReport, with_profile: bool) {
    println!(
        "Completeness: {}%  Duplicate rows: {}",
        format_percent(report.completeness),
        report.duplicate_rows
    );
    if !with_profile {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
        header_cell("Outliers"),
        header_cell("Samples"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in &report.profiles {
        let (min, max, mean) = match &profile.numeric {
            Some(summary) => (
                Cell::new(format!("{:.2}", summary.min)),
                Cell::new(format!("{:.2}", summary.max)),
                Cell::new(format!("{:.2}", summary.mean)),
            ),
            None => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        let outliers = report.outliers.get(&profile.name).copied();
        table.add_row(vec![
            Cell::new(&profile.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(profile.column_type),
            Cell::new(format!(
                "{} ({}%)",
                profile.null_count,
                format_percent(profile.null_percentage)
            )),
            Cell::new(profile.unique_count),
            min,
            max,
            mean,
            count_cell(outliers, Color::Yellow),
            Cell::new(profile.samples.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_metrics(metrics: &KeyMetrics) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Delayed"),
        header_cell("In transit"),
        header_cell("Completed"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(metrics.total).add_attribute(Attribute::Bold),
        count_cell(Some(metrics.delayed), Color::Red),
        Cell::new(metrics.in_transit),
        Cell::new(metrics.completed).fg(Color::Green),
    ]);
    println!("{table}");
}

pub fn print_compliance(report: &ComplianceReport, carriers: Option<&CarrierCheck>) {
    match &report.tracking_column {
        Some(column) => println!("Tracking column: {column}"),
        None => println!("Tracking column: not found (tracking check skipped)"),
    }
    if let Some(check) = carriers {
        println!(
            "Carriers: {} approved, {} not approved",
            check.approved_count(),
            check.unapproved.len()
        );
    }
    if report.is_clean() {
        for line in report.lines() {
            println!("{line}");
        }
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, line) in report.lines().into_iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(line).fg(Color::Yellow)]);
    }
    println!("{table}");
}

pub fn print_carriers(carriers: &[String]) {
    if carriers.is_empty() {
        println!("No approved carriers.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Approved carrier")]);
    apply_table_style(&mut table);
    for carrier in carriers {
        table.add_row(vec![Cell::new(carrier)]);
    }
    println!("{table}");
}

pub fn print_geocode(summary: &GeocodeSummary) {
    println!("{}", summary.describe());
    println!(
        "Cities: {} ({} built-in, {} looked up)",
        summary.unique_cities, summary.from_table, summary.from_remote
    );
    if !summary.unresolved.is_empty() {
        eprintln!("Unresolved: {}", summary.unresolved.join(", "));
    }
}

pub fn print_routes(report: &RouteReport, top: usize) {
    println!(
        "Routes: {}  Skipped rows: {}",
        report.routes.len(),
        report.skipped_rows
    );
    println!(
        "Total distance: {} mi  Average: {:.1} mi",
        format_grouped(report.total_distance),
        report.average_distance
    );
    if let Some(total) = report.total_cost {
        println!("Total cost: {}", format_currency(total));
    }
    if let Some(average) = report.average_cost_per_mile {
        println!("Average cost per mile: {}", format_currency(average));
    }
    let highlights = [
        ("Longest", &report.longest),
        ("Shortest", &report.shortest),
        ("Most efficient", &report.most_efficient),
        ("Least efficient", &report.least_efficient),
    ];
    for (label, route) in highlights {
        if let Some(route) = route {
            println!("{label}: {}", describe_route(route));
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Shipment"),
        header_cell("Route"),
        header_cell("Carrier"),
        header_cell("Miles"),
        header_cell("Cost"),
        header_cell("Per mile"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut longest_first: Vec<&Route> = report.routes.iter().collect();
    longest_first.sort_by(|a, b| b.distance_miles.total_cmp(&a.distance_miles));
    for route in longest_first.into_iter().take(top) {
        table.add_row(vec![
            optional_cell(route.shipment_id.as_deref()),
            Cell::new(route.label()),
            optional_cell(route.carrier.as_deref()),
            Cell::new(format_grouped(route.distance_miles)),
            money_cell(route.cost),
            money_cell(route.cost_per_mile),
        ]);
    }
    println!("{table}");

    if report.carriers.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Carrier"),
        header_cell("Shipments"),
        header_cell("Miles"),
        header_cell("Cost"),
        header_cell("Per mile"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stats in &report.carriers {
        table.add_row(vec![
            Cell::new(&stats.carrier)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stats.shipments),
            Cell::new(format_grouped(stats.total_distance)),
            Cell::new(format_currency(stats.total_cost)),
            money_cell(stats.cost_per_mile),
        ]);
    }
    println!("{table}");
}

fn describe_route(route: &Route) -> String {
    let mut text = format!("{} ({:.1} mi", route.label(), route.distance_miles);
    if let Some(per_mile) = route.cost_per_mile {
        text.push_str(&format!(", {}/mi", format_currency(per_mile)));
    }
    text.push(')');
    text
}

pub fn print_timeline(report: &TimelineReport) {
    println!(
        "Shipments with both dates: {}  Unparsed ship dates: {}  Unparsed delivery dates: {}",
        report.records.len(),
        report.unparsed_departures,
        report.unparsed_arrivals
    );
    let (Some(average), Some(shortest), Some(longest)) = (
        report.average_days,
        report.shortest_days,
        report.longest_days,
    ) else {
        println!("No transit times available.");
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Average days"),
        header_cell("Shortest"),
        header_cell("Longest"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(format!("{average:.1}")).add_attribute(Attribute::Bold),
        Cell::new(shortest),
        Cell::new(longest),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn money_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_currency(value)),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
