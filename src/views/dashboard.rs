use maud::{html, Markup};

use crate::models::{Bill, BillStatus};
use crate::utils::{format_amount, format_status};
use crate::views::layout::page;

const SECTIONS: [(BillStatus, &str); 3] = [
    (BillStatus::Pending, "status-bills-container1"),
    (BillStatus::Accepted, "status-bills-container2"),
    (BillStatus::Refused, "status-bills-container3"),
];

/// Admin overview: every bill grouped under its status.
pub fn dashboard_ui(bills: &[Bill]) -> Markup {
    page(html! {
        div class="content-title" { "Validations" }
        @for (status, test_id) in SECTIONS {
            @let cards: Vec<&Bill> = bills.iter().filter(|b| b.status == status).collect();
            div class="status-bills-header" {
                h3 { (format_status(status)) " (" (cards.len()) ")" }
            }
            div class="status-bills-container" data-testid=(test_id) {
                @for bill in cards {
                    (card(bill))
                }
            }
        }
    })
}

fn card(bill: &Bill) -> Markup {
    let id = format!("open-bill{}", bill.id);
    html! {
        div class="bill-card" id=(id) data-testid=(id) {
            span { (bill.email) }
            span { (format_amount(bill.amount)) " €" }
            span { (bill.name) }
        }
    }
}
