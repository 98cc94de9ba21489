use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{Layer, Override, Plan},
    pricing::Provider,
    quantity::cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Per-layer costs on every cloud, with the resolved choice highlighted.
pub fn breakdown_table(plan: &Plan) -> Table {
    let providers: Vec<Provider> = plan.layer_costs.keys().copied().collect();

    let mut table = new_table();
    let mut header = vec!["Layer".to_owned()];
    header.extend(providers.iter().map(ToString::to_string));
    table.set_header(header);

    for layer in Layer::ALL {
        let mut row = vec![Cell::new(layer)];
        for provider in &providers {
            let cell = match plan.layer_costs[provider].get(layer) {
                Some(cost) => {
                    let cell =
                        Cell::new(cost.total.round_to_cents()).set_alignment(CellAlignment::Right);
                    if plan.resolved.get(&layer) == Some(provider) {
                        cell.fg(Color::Green).add_attribute(Attribute::Bold)
                    } else {
                        cell
                    }
                }
                None => Cell::new("—").set_alignment(CellAlignment::Center).fg(Color::DarkGrey),
            };
            row.push(cell);
        }
        table.add_row(row);
    }
    table
}

/// The resolved pipeline, L1 through L5, and the monthly grand total.
pub fn pipeline_table(plan: &Plan) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Layer", "Provider", "Monthly"]);
    for layer in Layer::ALL {
        let provider = plan.resolved[&layer];
        table.add_row(vec![
            Cell::new(layer),
            Cell::new(provider).fg(provider_color(provider)),
            Cell::new(plan.layer_costs[&provider].get(layer).map_or_else(
                || "—".to_owned(),
                |cost| cost.total.round_to_cents().to_string(),
            ))
            .set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total with glue").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(plan.total.round_to_cents())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

/// Why a layer left its locally cheapest cloud.
pub fn override_table(override_: &Override) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        format!("{}: {} over {}", override_.layer, override_.selected, override_.locally_cheapest),
        "Layer".to_owned(),
        "Glue".to_owned(),
        "Total".to_owned(),
    ]);
    for candidate in &override_.candidates {
        let selected = candidate.provider == override_.selected;
        let mut cells = vec![
            Cell::new(candidate.provider).fg(provider_color(candidate.provider)),
            Cell::new(candidate.layer_cost.round_to_cents()).set_alignment(CellAlignment::Right),
            Cell::new(candidate.transfer.round_to_cents()).set_alignment(CellAlignment::Right),
            Cell::new(candidate.total.round_to_cents()).set_alignment(CellAlignment::Right),
        ];
        if selected {
            cells = cells.into_iter().map(|cell| cell.add_attribute(Attribute::Bold)).collect();
        }
        table.add_row(cells);
    }
    table
}

/// All topology routes priced at this month's volume.
pub fn transfer_table(plan: &Plan) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Route", "Volume", "Monthly"]);
    for transfer in &plan.transfers {
        table.add_row(vec![
            Cell::new(&transfer.route),
            Cell::new(transfer.volume).set_alignment(CellAlignment::Right),
            Cell::new(transfer.cost.round_to_cents())
                .set_alignment(CellAlignment::Right)
                .fg(if transfer.cost > Cost::ZERO { Color::Red } else { Color::Green }),
        ]);
    }
    table
}

const fn provider_color(provider: Provider) -> Color {
    match provider {
        Provider::Aws => Color::DarkYellow,
        Provider::Azure => Color::Blue,
    }
}
