// ============================================================================
// Page hôte
// ============================================================================
// Document HTML complet avec un unique point de montage : <div id="react">.
// L'arbre rendu par App est inséré dans ce conteneur.
// ============================================================================

use crate::ui::markup::{escape, Element};

/// Id de l'élément conteneur dans la page
pub const MOUNT_POINT_ID: &str = "react";

/// Monte l'arbre rendu dans le conteneur de la page
pub fn mount(root: Element) -> Element {
    Element::new("div").attr("id", MOUNT_POINT_ID).child(root)
}

/// Produit le document HTML complet
///
/// # Arguments
/// * `title` - Titre de la page (échappé)
/// * `root` - Arbre rendu par le conteneur racine
pub fn render_page(title: &str, root: Element) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\"/>\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "{container}\n",
            "</body>\n",
            "</html>\n",
        ),
        title = escape(title),
        container = mount(root).to_html(),
    )
}
