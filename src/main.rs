mod api;
mod birthdate;
mod config;
mod display;
mod record;
mod validation;

use api::auth::{Credentials, LoginOutcome};
use api::{ApiClient, Session};
use chrono::Local;
use config::{load as config_load, validate as config_validate};
use record::{ConsultationRequest, NewCustomer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = config_load();

    if let Err(err) = config_validate(&config) {
        eprintln!("Configuration error: {err}");
        std::process::exit(1);
    }

    info!(
        base_url = %config.api.base_url,
        admin_config = ?config.admin.sanitized_for_log(),
        "Effective configuration loaded"
    );

    let api = ApiClient::new(&config.api);
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        ["remedies", customer_id] => cmd_remedies(&api, customer_id),
        ["book", rest @ ..] => cmd_book(&api, rest),
        ["admin", rest @ ..] => cmd_admin(&api, &config.admin, rest),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        error!(error = %err, "Command failed");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  jyotish remedies <customer-id>");
    eprintln!("  jyotish book <name> <dob MMDDYY> <time> <place> <mobile> <email> <query...>");
    eprintln!("  jyotish admin list [query]");
    eprintln!("  jyotish admin add <customer-id> <name> <dob MMDDYY> [remedy...]");
    eprintln!("  jyotish admin update <customer-id> <name> <dob MMDDYY> [remedy...]");
    eprintln!("  jyotish admin delete <customer-id>");
    eprintln!("  jyotish admin forgot <email>");
    eprintln!("  jyotish admin reset <token> <new-password>");
    eprintln!("  jyotish admin passwd <current-password> <new-password>");
}

/// The "My Remedies" lookup flow.
fn cmd_remedies(api: &ApiClient, customer_id: &str) -> anyhow::Result<()> {
    let customer_id = customer_id.trim();

    if !validation::is_valid_customer_id(customer_id) {
        eprintln!("Invalid Customer ID format (4-10 letters and digits).");
        std::process::exit(1);
    }

    let found = match api.find_customer(customer_id) {
        Ok(found) => found,
        Err(err) => {
            error!(error = %err, customer_id = %customer_id, "Remedies lookup failed");
            eprintln!("Unable to reach the server. Please try again.");
            std::process::exit(1);
        }
    };

    match found {
        Some(customer) => {
            print!(
                "{}",
                display::render_dashboard(&customer, Local::now().date_naive())
            );
        }
        None => {
            println!("Customer ID not found. Please contact support for assistance.");
        }
    }

    Ok(())
}

/// The consultation-booking flow.
fn cmd_book(api: &ApiClient, args: &[&str]) -> anyhow::Result<()> {
    let [name, dob, time, place, mobile, email, query @ ..] = args else {
        print_usage();
        std::process::exit(2);
    };

    if query.is_empty() {
        print_usage();
        std::process::exit(2);
    }

    let request = ConsultationRequest {
        name: validation::sanitize(name),
        // Accept separators in the DOB the same way the booking form does.
        dob: dob.chars().filter(|c| c.is_ascii_digit()).collect(),
        time: time.to_string(),
        place: validation::sanitize(place),
        mobile: mobile.to_string(),
        email: validation::sanitize(email),
        query: validation::sanitize(&query.join(" ")),
    };

    if let Err(errors) = validation::validate_consultation(&request) {
        eprintln!("Please fix the following fields:");
        for err in errors {
            eprintln!("  {}: {}", err.field, err.message);
        }
        std::process::exit(1);
    }

    let message = api.submit_consultation(&request)?;
    info!(name = %request.name, "Consultation request submitted");
    println!("{message}");
    println!("Thank you! We will contact you within 24 hours to confirm your consultation.");

    Ok(())
}

/// Admin management commands; all of them require a login first.
fn cmd_admin(api: &ApiClient, admin: &config::AdminConfig, args: &[&str]) -> anyhow::Result<()> {
    // forgot/reset are the only admin flows usable without credentials.
    match args {
        ["forgot", email] => {
            println!("{}", api.forgot_password(email)?);
            return Ok(());
        }
        ["reset", token, new_password] => {
            println!("{}", api.reset_password(token, new_password)?);
            return Ok(());
        }
        _ => {}
    }

    let session = admin_login(api, admin);

    match args {
        ["list"] => cmd_admin_list(api, &session, None),
        ["list", query] => cmd_admin_list(api, &session, Some(query)),
        ["add", customer_id, name, dob, remedies @ ..] => {
            let customer = new_customer(customer_id, name, dob, remedies);
            let created = api.create(&session, &customer)?;
            println!(
                "Created {} ({} remedies).",
                created.customer_id,
                created.remedies.len()
            );
            Ok(())
        }
        ["update", customer_id, name, dob, remedies @ ..] => {
            let customer = new_customer(customer_id, name, dob, remedies);
            let updated = api.update(&session, customer_id, &customer)?;
            println!(
                "Updated {} ({} remedies).",
                updated.customer_id,
                updated.remedies.len()
            );
            Ok(())
        }
        ["delete", customer_id] => {
            api.delete(&session, customer_id)?;
            println!("Deleted {customer_id}.");
            Ok(())
        }
        ["passwd", current, new] => {
            println!("{}", api.change_password(&session, current, new)?);
            Ok(())
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

fn cmd_admin_list(api: &ApiClient, session: &Session, query: Option<&str>) -> anyhow::Result<()> {
    let customers = api.list(session, query)?;

    if customers.is_empty() {
        println!("No customer records found.");
        return Ok(());
    }

    for customer in &customers {
        println!("{}", display::render_customer_row(customer));
    }
    println!("{} record(s).", customers.len());

    Ok(())
}

fn new_customer(customer_id: &str, name: &str, dob: &str, remedies: &[&str]) -> NewCustomer {
    NewCustomer {
        customer_id: validation::sanitize(customer_id),
        name: validation::sanitize(name),
        dob: dob.chars().filter(|c| c.is_ascii_digit()).collect(),
        remedies: remedies
            .iter()
            .map(|r| validation::sanitize(r))
            .filter(|r| !r.is_empty())
            .collect(),
    }
}

fn admin_login(api: &ApiClient, admin: &config::AdminConfig) -> Session {
    let (Some(username), Some(password)) = (admin.username.clone(), admin.password.clone()) else {
        eprintln!("admin.username and admin.password must be configured for admin commands.");
        std::process::exit(1);
    };

    match api.login(&Credentials { username, password }) {
        LoginOutcome::Success(session) => {
            info!(username = %session.username, "Logged in");
            session
        }
        LoginOutcome::Invalid { message } => {
            eprintln!("Login failed: {message}");
            std::process::exit(1);
        }
        LoginOutcome::Unreachable { message } => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}
