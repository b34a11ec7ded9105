//! Aligned pipe tables

use crate::render::TableLayout;
use crate::style::Alignment;

/// Rendered cell contents, one vector per row.
pub struct PipeTable<'a> {
    pub layout: &'a TableLayout,
    pub head: Vec<Vec<String>>,
    pub body: Vec<Vec<String>>,
}

fn width(text: &str) -> usize {
    text.chars().count()
}

impl PipeTable<'_> {
    pub fn serialize(&self) -> String {
        let columns = self.layout.columns;

        // Column widths, with room for the alignment markers
        let mut col_widths = vec![3; columns];
        for row in self.head.iter().chain(&self.body) {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(width(cell));
            }
        }

        let mut lines = Vec::new();
        let empty_head = vec![Vec::new()];
        let head = if self.head.is_empty() {
            &empty_head
        } else {
            &self.head
        };
        for row in head {
            lines.push(row_line(row, &col_widths));
        }

        let separator: Vec<String> = col_widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let dashes = "-".repeat(width.saturating_sub(2));
                match self.layout.alignment(i) {
                    Some(Alignment::Left) => format!(":{dashes}-"),
                    Some(Alignment::Right) => format!("-{dashes}:"),
                    Some(Alignment::Center) => format!(":{dashes}:"),
                    _ => format!("-{dashes}-"),
                }
            })
            .collect();
        lines.push(format!("| {} |", separator.join(" | ")));

        for row in &self.body {
            lines.push(row_line(row, &col_widths));
        }
        lines.join("\n")
    }
}

fn row_line(row: &[String], col_widths: &[usize]) -> String {
    let cells: Vec<String> = col_widths
        .iter()
        .enumerate()
        .map(|(i, col_width)| {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let pad = col_width.saturating_sub(width(text));
            format!("{text}{}", " ".repeat(pad))
        })
        .collect();
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_padded_and_aligned() {
        let layout = TableLayout {
            columns: 2,
            alignments: vec![Some(Alignment::Center), None],
        };
        let table = PipeTable {
            layout: &layout,
            head: vec![vec!["name".into(), "n".into()]],
            body: vec![vec!["é".into()]],
        };
        assert_eq!(
            table.serialize(),
            "| name | n   |\n| :--: | --- |\n| é    |     |"
        );
    }
}
