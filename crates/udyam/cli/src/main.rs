//! Terminal driver for the Udyam registration wizard.
//!
//! `udyam register` walks the schema's steps interactively against a
//! running service; `show` and `delete` expose the record endpoints.

mod client;
mod error;

use clap::{Parser, Subcommand};
use client::RegistrationClient;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use udyam_engine::{PincodeDirectory, SubmitOutcome, Wizard};
use udyam_pincode::PincodeClient;
use udyam_types::{FieldType, FieldValue, FormField, FormSchema};

/// Udyam registration CLI.
#[derive(Parser)]
#[command(name = "udyam")]
#[command(about = "Udyam registration wizard and record tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Registration service endpoint
    #[arg(
        long,
        env = "UDYAM_ENDPOINT",
        default_value = "http://127.0.0.1:8080"
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the registration wizard
    Register,
    /// Show a registration record
    Show { id: String },
    /// Delete a registration record
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Register => run_register(&cli.endpoint).await,
        Command::Show { id } => {
            let client = RegistrationClient::new(&cli.endpoint)?;
            let body = client.get_registration(&id).await?;
            println!("{}", serde_json::to_string_pretty(&body.registration)?);
            Ok(())
        }
        Command::Delete { id } => {
            let client = RegistrationClient::new(&cli.endpoint)?;
            let ack = client.delete_registration(&id).await?;
            println!("{}", ack.message);
            Ok(())
        }
    }
}

async fn run_register(endpoint: &str) -> anyhow::Result<()> {
    let client = RegistrationClient::new(endpoint)?;
    let schema = match client.fetch_schema().await {
        Ok(schema) => Arc::new(schema),
        Err(err) => {
            tracing::warn!(%err, "schema fetch failed, using the embedded schema");
            Arc::new(FormSchema::builtin())
        }
    };
    let directory = PincodeClient::new()?;

    let mut wizard = Wizard::new(schema);

    while !wizard.is_completed() {
        let step = wizard.current_step().clone();
        println!("\n== {} ==", step.title);
        if !step.description.is_empty() {
            println!("{}", step.description);
        }

        for field in &step.fields {
            fill_field(&mut wizard, &directory, field).await?;
        }

        match wizard.submit(&client).await {
            SubmitOutcome::Advanced => println!("Step accepted."),
            SubmitOutcome::Completed => {
                let id = wizard
                    .state()
                    .registration_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                println!("\nRegistration complete. Your registration id: {id}");
            }
            SubmitOutcome::Stayed => {
                if let Some(message) = &wizard.state().step_error {
                    println!("Submission failed: {message}");
                }
                println!("Please review your answers and try again.");
            }
            SubmitOutcome::Held => {
                for (field_id, message) in &wizard.state().field_errors {
                    println!("  {field_id}: {message}");
                }
                println!("Please correct the fields above.");
            }
        }
    }

    Ok(())
}

/// Prompt for one field until its value validates.
async fn fill_field(
    wizard: &mut Wizard,
    directory: &PincodeClient,
    field: &FormField,
) -> anyhow::Result<()> {
    loop {
        // A PIN code lookup may already have filled this field; offer
        // the current value as the default.
        let current = match wizard.state().values.get(&field.id) {
            Some(FieldValue::Text(text)) if !text.is_empty() => Some(text.clone()),
            _ => None,
        };
        let value = prompt_value(field, current.as_deref())?;
        let lookup = wizard.edit_field(&field.id, value);

        if let Some(request) = lookup {
            let outcome = directory.lookup(&request.pincode).await;
            wizard.apply_lookup(request.ticket, outcome);
            offer_suggestions(wizard)?;
        }

        match wizard.state().field_errors.get(&field.id) {
            Some(message) => println!("  {message}"),
            None => return Ok(()),
        }
    }
}

fn prompt_value(field: &FormField, current: Option<&str>) -> anyhow::Result<FieldValue> {
    match field.field_type {
        FieldType::Checkbox => {
            let answer = prompt(&format!("{} [y/N]: ", field.label))?;
            Ok(FieldValue::Bool(matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes"
            )))
        }
        FieldType::Select => {
            println!("{}:", field.label);
            for option in &field.options {
                println!("  [{}] {}", option.value, option.text);
            }
            Ok(FieldValue::from(prompt("Choice: ")?.trim()))
        }
        FieldType::Text => {
            let label = match current {
                Some(current) => format!("{} [{}]: ", field.label, current),
                None => format!("{}: ", field.label),
            };
            let answer = prompt(&label)?;
            let answer = answer.trim();
            if answer.is_empty() {
                if let Some(current) = current {
                    return Ok(FieldValue::from(current));
                }
            }
            Ok(FieldValue::from(answer))
        }
    }
}

fn offer_suggestions(wizard: &mut Wizard) -> anyhow::Result<()> {
    let suggestions = wizard.state().suggestions.clone();
    if suggestions.is_empty() {
        return Ok(());
    }
    println!("Multiple locations match this PIN code:");
    for (index, location) in suggestions.iter().enumerate() {
        println!(
            "  [{}] {}, {}, {}",
            index + 1,
            location.city,
            location.district,
            location.state
        );
    }
    let answer = prompt("Choose a location: ")?;
    if let Ok(choice) = answer.trim().parse::<usize>() {
        if choice >= 1 && wizard.choose_suggestion(choice - 1) {
            return Ok(());
        }
    }
    println!("No location chosen; fill the address fields manually.");
    Ok(())
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
