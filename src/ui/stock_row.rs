// ============================================================================
// Vue : ligne de stock
// ============================================================================
// Fonction pure : un Stock -> une ligne <tr> de quatre cellules
//   id | nom | prix | date de mise à jour (locale)
// ============================================================================

use crate::models::Stock;
use crate::ui::datetime::DateTimeFormat;
use crate::ui::markup::Element;

/// Dessine un stock sous forme de ligne de tableau
///
/// La ligne porte l'id du stock comme clé. Le prix est affiché tel quel
/// (plus courte écriture décimale, comme dans le JSON reçu).
///
/// # Arguments
/// * `stock` - Stock à afficher
/// * `format` - Locale et fuseau pour la colonne LastUpdate
pub fn render_stock_row(stock: &Stock, format: &DateTimeFormat) -> Element {
    Element::new("tr")
        .with_key(stock.id.to_string())
        .child(cell(stock.id.to_string()))
        .child(cell(stock.name.clone()))
        .child(cell(stock.current_price.to_string()))
        .child(cell(format.format_millis(stock.last_update)))
}

fn cell(text: String) -> Element {
    Element::new("td").text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::datetime::{Locale, Zone};

    fn pinned() -> DateTimeFormat {
        DateTimeFormat::new(Locale::EnUs, Zone::utc())
    }

    fn cells(row: &Element) -> Vec<String> {
        row.child_elements().map(Element::text_content).collect()
    }

    #[test]
    fn test_row_cells() {
        let row = render_stock_row(&Stock::new(1, "ACME", 12.5, 0), &pinned());

        assert_eq!(row.tag(), "tr");
        assert_eq!(row.key(), Some("1"));
        assert_eq!(
            cells(&row),
            vec!["1", "ACME", "12.5", "1/1/1970, 12:00:00 AM"]
        );
    }

    #[test]
    fn test_price_is_not_reformatted() {
        let row = render_stock_row(&Stock::new(3, "name_3", 3.0, 0), &pinned());
        assert_eq!(cells(&row)[2], "3");

        let row = render_stock_row(&Stock::new(4, "name_4", 100000.66, 0), &pinned());
        assert_eq!(cells(&row)[2], "100000.66");
    }

    #[test]
    fn test_name_is_escaped_in_html() {
        let row = render_stock_row(&Stock::new(2, "<script>", 1.0, 0), &pinned());

        assert_eq!(cells(&row)[1], "<script>");
        assert!(row.to_html().contains("<td>&lt;script&gt;</td>"));
    }

    #[test]
    fn test_row_html() {
        let row = render_stock_row(&Stock::new(1, "ACME", 12.5, 0), &pinned());

        assert_eq!(
            row.to_html(),
            "<tr><td>1</td><td>ACME</td><td>12.5</td><td>1/1/1970, 12:00:00 AM</td></tr>"
        );
    }
}
