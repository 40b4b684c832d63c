use maud::{html, Markup};

pub fn login_ui() -> Markup {
    html! {
        div class="login-page" {
            h2 { "Employé" }
            form data-testid="form-employee" {
                input type="email" data-testid="employee-email-input" placeholder="johndoe@email.com";
                input type="password" data-testid="employee-password-input" placeholder="******";
                button type="submit" data-testid="employee-login-button" { "Se connecter" }
            }
            h2 { "Administration" }
            form data-testid="form-admin" {
                input type="email" data-testid="admin-email-input" placeholder="johndoe@email.com";
                input type="password" data-testid="admin-password-input" placeholder="******";
                button type="submit" data-testid="admin-login-button" { "Se connecter" }
            }
        }
    }
}
