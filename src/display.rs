use crate::birthdate::{self, ResolvedBirthDate};
use crate::record::Customer;
use chrono::NaiveDate;
use std::fmt::Write;

/// One-line age summary, e.g. `34 years (Born in 1990, Horse Year)`.
///
/// Absent input renders as a neutral placeholder; a missing age must never
/// abort a larger render.
pub fn age_summary(resolved: Option<&ResolvedBirthDate>) -> String {
    match resolved {
        Some(info) => format!(
            "{} years (Born in {}, {} Year)",
            info.age, info.year, info.zodiac
        ),
        None => "N/A".to_string(),
    }
}

/// Render the personalized remedies dashboard as plain text.
pub fn render_dashboard(customer: &Customer, today: NaiveDate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Your Personalized Remedies");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out, "Customer ID:   {}", customer.customer_id);
    let _ = writeln!(out, "Name:          {}", customer.name);

    if let Some(dob) = customer.dob.as_deref() {
        let resolved = birthdate::resolve_at(dob, today);
        let _ = writeln!(out, "Date of Birth: {}", birthdate::format_for_display(dob));
        let _ = writeln!(out, "Age:           {}", age_summary(resolved.as_ref()));
    } else {
        let _ = writeln!(out, "Date of Birth: N/A");
        let _ = writeln!(out, "Age:           N/A");
    }

    let _ = writeln!(out);
    if customer.remedies.is_empty() {
        let _ = writeln!(out, "No remedies assigned yet. Please contact support.");
    } else {
        for (index, remedy) in customer.remedies.iter().enumerate() {
            let _ = writeln!(out, "  {}. {remedy}", index + 1);
        }
    }

    out
}

/// One row of the admin list view.
pub fn render_customer_row(customer: &Customer) -> String {
    let remedy_count = customer.remedies.len();
    let label = if remedy_count == 1 { "remedy" } else { "remedies" };

    format!(
        "{:<12} {:<24} {:<10} {remedy_count} {label}",
        customer.customer_id,
        customer.name,
        customer.dob.as_deref().unwrap_or("-"),
    )
}
