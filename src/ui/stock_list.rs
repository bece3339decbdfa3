// ============================================================================
// Vue : tableau des stocks
// ============================================================================
// Fonction pure : &[Stock] -> <table> avec une ligne d'en-tête fixe puis une
// ligne par stock, dans l'ordre reçu.
//
// CONCEPT RUST : Iterator::map + collect implicite via children()
// - Chaque stock est projeté en ligne par render_stock_row
// ============================================================================

use crate::models::Stock;
use crate::ui::datetime::DateTimeFormat;
use crate::ui::markup::Element;
use crate::ui::stock_row::render_stock_row;

/// Titres des colonnes, dans l'ordre
pub const HEADERS: [&str; 4] = ["Id", "Name", "CurrentPrice", "LastUpdate"];

/// Dessine le tableau complet
///
/// `<table><tbody><tr><th>Id</th>...</tr>` + une `<tr>` par stock
pub fn render_stock_list(stocks: &[Stock], format: &DateTimeFormat) -> Element {
    let header = Element::new("tr")
        .children(HEADERS.iter().map(|title| Element::new("th").text(*title)));
    let rows = stocks.iter().map(|stock| render_stock_row(stock, format));

    Element::new("table").child(Element::new("tbody").child(header).children(rows))
}

/// Lignes de données du tableau (sans l'en-tête)
pub fn data_rows(table: &Element) -> Vec<&Element> {
    table
        .child_elements()
        .filter(|element| element.tag() == "tbody")
        .flat_map(|tbody| tbody.child_elements().skip(1))
        .collect()
}
