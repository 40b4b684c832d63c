use maud::{html, Markup};

use crate::views::layout::page;

pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

pub fn new_bill_ui() -> Markup {
    page(html! {
        div class="content-header" {
            div class="content-title" { "Envoyer une note de frais" }
        }
        div class="form-newbill-container content-inner" {
            form data-testid="form-new-bill" {
                label for="expense-type" { "Type de dépense" }
                select required data-testid="expense-type" {
                    @for expense_type in EXPENSE_TYPES {
                        option { (expense_type) }
                    }
                }
                label for="expense-name" { "Nom de la dépense" }
                input type="text" data-testid="expense-name" placeholder="Vol Paris Londres";
                label for="datepicker" { "Date" }
                input required type="date" data-testid="datepicker";
                label for="amount" { "Montant TTC" }
                input required type="number" data-testid="amount" placeholder="348";
                label for="vat" { "TVA" }
                input type="number" data-testid="vat" placeholder="70";
                input type="number" data-testid="pct" placeholder="20";
                label for="commentary" { "Commentaire" }
                textarea data-testid="commentary" {}
                label for="file" { "Justificatif" }
                input required type="file" accept=".png,.jpg,.jpeg" data-testid="file";
                button type="submit" id="btn-send-bill" data-testid="btn-send-bill" class="btn btn-primary" { "Envoyer" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::query::elements;

    #[test]
    fn form_exposes_every_field() {
        let html = new_bill_ui().into_string();
        let ids: Vec<String> = elements(&html)
            .into_iter()
            .filter_map(|e| e.test_id().map(str::to_string))
            .collect();
        for id in [
            "form-new-bill",
            "expense-type",
            "expense-name",
            "datepicker",
            "amount",
            "vat",
            "pct",
            "commentary",
            "file",
            "btn-send-bill",
            "icon-mail",
        ] {
            assert!(ids.iter().any(|i| i == id), "missing {}", id);
        }
        assert!(html.contains("Envoyer"));
    }
}
