use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::core::{
    mapper::{Value, is_available},
    metric::METRICS,
    snapshot::Snapshot,
};

pub fn build_metrics_table(snapshot: &Snapshot) -> Table {
    let is_available = is_available(snapshot);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Section", "Metric", "Name", "Value", "Unit", "Class", "State"]);

    for (section, metrics) in &METRICS.iter().chunk_by(|metric| metric.source.section) {
        for (index, metric) in metrics.enumerate() {
            let section_cell = if index == 0 {
                Cell::new(section)
            } else {
                Cell::new("")
            };
            let value_cell = match metric.resolve(snapshot) {
                Some(value @ Value::Number(_)) => {
                    Cell::new(value).set_alignment(CellAlignment::Right)
                }
                Some(value) => Cell::new(value),
                None => Cell::new("—").add_attribute(Attribute::Dim),
            };
            table.add_row(vec![
                section_cell.add_attribute(Attribute::Bold),
                Cell::new(metric.key).add_attribute(Attribute::Dim),
                Cell::new(metric.name),
                value_cell.fg(if is_available { Color::Green } else { Color::Red }),
                Cell::new(metric.unit.unwrap_or_default()).add_attribute(Attribute::Dim),
                optional_cell(metric.device_class),
                optional_cell(metric.state_class),
            ]);
        }
    }

    table
}

fn optional_cell(value: Option<impl ToString>) -> Cell {
    value.map_or_else(|| Cell::new(""), |value| Cell::new(value).add_attribute(Attribute::Dim))
}
