//! Table layout and table style keys in HTML

use crate::common::render;
use qtext_babel::ast::{Container, Document, Node, Table, TableCell, TableRow};
use qtext_babel::render::render as render_document;
use qtext_babel::{OutputFormat, RenderOptions};

fn html(source: &str) -> String {
    render(source, OutputFormat::Html).unwrap()
}

fn row(header: bool, texts: &[&str]) -> TableRow {
    TableRow {
        cells: texts
            .iter()
            .map(|text| TableCell {
                header,
                style: None,
                children: vec![Node::text(*text)],
            })
            .collect(),
    }
}

#[test]
fn test_table_width_is_widest_row() {
    let table = Table {
        head: vec![row(true, &["a"])],
        body: vec![row(false, &["1", "2", "3"]), row(false, &["4"])],
    };
    let root = Container {
        name: None,
        root: true,
        style: Default::default(),
        children: vec![Node::Table(table)],
    };
    let document = Document::new(Some(root), ".");
    let out = render_document(&document, OutputFormat::Html, &RenderOptions::default()).unwrap();

    assert_eq!(out.matches("<tr>").count(), 3);
    // header and short body row are padded to three cells
    assert_eq!(out.matches("<th ").count(), 3);
    assert_eq!(out.matches("<td ").count(), 6);
}

#[test]
fn test_short_markdown_rows_are_padded() {
    let out = html("| a | b |\n|---|---|\n| 1 |");
    assert!(out.contains(
        "<td style=\"padding: 0.25em 0.25em\">1</td><td style=\"padding: 0.25em 0.25em\"></td>"
    ));
}

#[test]
fn test_sections_and_alignment() {
    let out = html("| Header 1 | Header 2 |\n| :--- | :---: |\n| Cell 1 | Cell 2 |");
    assert!(out.contains("<table style=\"border-collapse: collapse\">"));
    assert!(out.contains("<thead><tr>"));
    assert!(out.contains("<tbody><tr>"));
    assert!(out.contains("<td style=\"text-align: center; padding: 0.25em 0.25em\">Cell 2</td>"));
    assert!(out.contains("<td style=\"text-align: left; padding: 0.25em 0.25em\">Cell 1</td>"));
}

#[test]
fn test_table_style_keys() {
    let out = html(
        "<style>{\"table-border\": true, \"table-cell-height\": 2, \"table-cell-width\": 3, \
         \"table-header-bold\": false, \"table-header-rule\": false, \"content-align\": \"center\"}</style>\n\n\
         | h |\n|---|\n| v |",
    );
    assert!(out.contains(
        "<table style=\"border-collapse: collapse; margin-left: auto; margin-right: auto\">"
    ));
    assert!(out.contains(
        "<th style=\"padding: 0.5em 1em; border: 1px solid; font-weight: normal\">h</th>"
    ));
    assert!(out.contains("<td style=\"padding: 0.5em 1em; border: 1px solid\">v</td>"));
}

#[test]
fn test_table_style_comes_from_the_nearest_container() {
    let out = html(
        "<style>{\"table-border\": true}</style>\n\n\
         ::: plain\n<style>{\"table-border\": false}</style>\n\n| h |\n|---|\n| v |\n:::\n\n\
         | h |\n|---|\n| v |",
    );
    assert_eq!(out.matches("border: 1px solid").count(), 2);
}
