// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text rendering of counter cards and the palette.

use comfy_table::{presets::UTF8_FULL, Table};
use tally_core::palette::{self, PaletteColor, PALETTE};
use tally_core::{render_marks, CountField, Counter};

/// One row per counter: id, name, color, then both tallies.
pub fn counters_table(counters: &[Counter]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID".to_owned(),
        "Name".to_owned(),
        "Color".to_owned(),
        CountField::Count1.label().to_owned(),
        CountField::Count2.label().to_owned(),
    ]);
    for counter in counters {
        table.add_row(vec![
            counter.id.to_string(),
            counter.name.clone(),
            palette::describe(&counter.color).name.to_owned(),
            tally_cell(counter, CountField::Count1),
            tally_cell(counter, CountField::Count2),
        ]);
    }
    table
}

fn tally_cell(counter: &Counter, field: CountField) -> String {
    let count = counter.count(field);
    format!("{count}  {}", render_marks(count))
}

/// Palette names and values; `*` marks the preferred color.
pub fn palette_table(preferred: PaletteColor) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["", "Name", "Value"]);
    for color in PALETTE {
        let marker = if color == preferred { "*" } else { "" };
        table.add_row(vec![marker, color.name, color.value]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_rows_show_counts_and_marks() {
        let mut counter = Counter::new("42".into(), "Bier", "#10b981");
        counter.count1 = 7;
        let rendered = counters_table(&[counter]).to_string();
        assert!(rendered.contains("Green"));
        assert!(rendered.contains("7  ||||/ ||"));
        assert!(rendered.contains("0  No marks"));
    }

    #[test]
    fn palette_marks_preference() {
        let rendered = palette_table(palette::default_color()).to_string();
        assert!(rendered.contains('*'));
        assert!(rendered.contains("#14b8a6"));
    }
}
