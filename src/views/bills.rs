use chrono::NaiveDate;
use maud::{html, Markup};

use crate::models::BillRow;
use crate::utils::{format_amount, parse_date};
use crate::views::layout::{error_page, loading_page, page};

pub enum BillsView<'a> {
    Loading,
    Rows(&'a [BillRow]),
    Error(&'a str),
}

pub fn bills_ui(view: BillsView<'_>) -> Markup {
    match view {
        BillsView::Loading => loading_page(),
        BillsView::Error(message) => error_page(message),
        BillsView::Rows(rows) => page(html! {
            div class="content-header" {
                div class="content-title" { "Mes notes de frais" }
                button type="button" data-testid="btn-new-bill" class="btn btn-primary" {
                    "Nouvelle note de frais"
                }
            }
            div id="data-table" {
                table id="example" class="table table-striped" {
                    thead {
                        tr {
                            th { "Type" }
                            th { "Nom" }
                            th { "Date" }
                            th { "Montant" }
                            th { "Statut" }
                            th { "Actions" }
                        }
                    }
                    tbody data-testid="tbody" {
                        @for bill_row in sorted_rows(rows) {
                            (row(bill_row))
                        }
                    }
                }
            }
            (modal())
        }),
    }
}

/// Most recent first. Rows with equal dates keep their store order and rows
/// with no readable date go last.
pub fn sorted_rows(rows: &[BillRow]) -> Vec<&BillRow> {
    let mut sorted: Vec<&BillRow> = rows.iter().collect();
    sorted.sort_by(|a, b| date_key(b).cmp(&date_key(a)));
    sorted
}

/// Calendar day first, then the raw value so times within a day still order.
fn date_key(row: &BillRow) -> (Option<NaiveDate>, &str) {
    (parse_date(&row.bill.date).ok(), row.bill.date.as_str())
}

fn row(row: &BillRow) -> Markup {
    let bill = &row.bill;
    html! {
        tr {
            td { (bill.expense_type) }
            td { (bill.name) }
            td data-testid="bill-date" data-date=(bill.date) { (row.display_date) }
            td { (format_amount(bill.amount)) " €" }
            td { (row.status_label) }
            td {
                div class="icon-actions" {
                    div id="eye" data-testid="icon-eye" data-bill-url=(bill.file_url) { "eye" }
                }
            }
        }
    }
}

fn modal() -> Markup {
    html! {
        div class="modal fade" id="modaleFile" data-testid="modal-file" tabindex="-1" role="dialog" {
            div class="modal-dialog modal-dialog-centered modal-lg" role="document" {
                div class="modal-content" {
                    div class="modal-header" { h5 class="modal-title" { "Justificatif" } }
                    div class="modal-body" data-testid="modal-body" {}
                }
            }
        }
    }
}

pub fn receipt_modal_body(image_url: Option<&str>, width: u32) -> Markup {
    html! {
        div class="bill-proof-container" {
            @if let Some(url) = image_url {
                img width=(width) src=(url) alt="Bill" data-testid="receipt-image";
            }
        }
    }
}

#[cfg(test)]
#[path = "bills_tests.rs"]
mod tests;
