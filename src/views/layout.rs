use maud::{html, Markup};

pub fn vertical_layout() -> Markup {
    html! {
        div class="vertical-navbar" {
            div class="layout-title" { span { "Billed" } }
            div id="layout-icon1" data-testid="icon-window" { "window" }
            div id="layout-icon2" data-testid="icon-mail" { "mail" }
            div id="layout-disconnect" data-testid="layout-disconnect" { "disconnect" }
        }
    }
}

pub fn page(content: Markup) -> Markup {
    html! {
        div class="layout" {
            (vertical_layout())
            div class="content" { (content) }
        }
    }
}

pub fn loading_page() -> Markup {
    page(html! {
        div id="loading" data-testid="loading" { "Loading..." }
    })
}

/// The store message is shown verbatim.
pub fn error_page(message: &str) -> Markup {
    page(html! {
        div class="content-title" { "Erreur" }
        div data-testid="error-message" { (message) }
    })
}

pub fn not_found_page(path: &str) -> Markup {
    page(html! {
        div class="content-title" { "Page introuvable" }
        div data-testid="not-found" { (path) }
    })
}
