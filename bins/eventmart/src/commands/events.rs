//! Event listings and the vendor event editor

use super::{is_json, print_json, Session};
use crate::output::{format_count, spinner, Status};
use crate::Cli;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use eventmart_api_client::Event;
use eventmart_core::{Error, Role};
use eventmart_portal::{EventForm, EventList};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Fields for `create-event`
#[derive(Args, Debug)]
pub struct NewEventArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    category: String,

    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    /// Start time (RFC 3339, e.g. 2024-06-01T18:00:00Z)
    #[arg(long, value_parser = parse_time)]
    start: DateTime<Utc>,

    /// End time (RFC 3339)
    #[arg(long, value_parser = parse_time)]
    end: DateTime<Utc>,

    /// Event day (YYYY-MM-DD or RFC 3339); repeat for multi-day events
    #[arg(long = "date", value_parser = parse_time)]
    dates: Vec<DateTime<Utc>>,

    #[arg(long, default_value = "0")]
    price: f64,

    #[arg(long, default_value = "1")]
    max_per_user: u32,

    #[arg(long)]
    total_tickets: u32,

    /// Poster image to upload; repeatable
    #[arg(long = "poster")]
    posters: Vec<PathBuf>,
}

/// Accept RFC 3339 timestamps or plain dates (midnight UTC)
fn parse_time(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{value}'"))
}

fn print_event_row(event: &Event) {
    println!(
        "  {}  {:<32} {}  {}",
        event.id.dimmed(),
        event.title,
        event.start_time.format("%Y-%m-%d %H:%M"),
        format!("{} left", event.tickets_left()).dimmed()
    );
}

pub async fn list(cli: &Cli, role: Role, page: u32) -> Result<()> {
    let session = Session::open(cli)?;
    let list = match role {
        Role::Vendor => {
            session.require(Role::Vendor)?;
            EventList::vendor(session.ctx)
        }
        Role::Client => EventList::client(session.ctx),
        Role::Admin => {
            return Err(Error::validation("Events are listed for vendors or clients")
                .with_suggestion("Use --role vendor or --role client")
                .into());
        }
    };

    let pb = spinner("Loading events...");
    let result = list.load(page).await;
    pb.finish_and_clear();
    let page = result?;

    if is_json(cli) {
        return print_json(&page);
    }

    Status::header("Events");
    for event in &page.items {
        print_event_row(event);
    }
    println!();
    println!(
        "{}",
        format!(
            "{} · page {}/{}",
            format_count(page.items.len(), "event", "events"),
            page.current_page,
            page.total_pages
        )
        .dimmed()
    );
    Ok(())
}

pub async fn show(cli: &Cli, id: &str) -> Result<()> {
    let session = Session::open(cli)?;
    let list = EventList::client(session.ctx);
    let event = list.details(id).await?;

    if is_json(cli) {
        return print_json(&event);
    }

    Status::header(&event.title);
    println!("{}", event.description);
    println!();
    println!("  {:<12} {}", "Category".bold(), event.category);
    println!(
        "  {:<12} {} to {}",
        "When".bold(),
        event.start_time.format("%Y-%m-%d %H:%M"),
        event.end_time.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  {:<12} {:.5}, {:.5}",
        "Where".bold(),
        event.location.latitude,
        event.location.longitude
    );
    println!("  {:<12} {:.2}", "Price".bold(), event.price_per_ticket);
    println!(
        "  {:<12} {} of {} (max {} per person)",
        "Tickets".bold(),
        event.tickets_left(),
        event.total_ticket,
        event.max_tickets_per_user
    );
    Ok(())
}

pub async fn create(cli: &Cli, args: &NewEventArgs) -> Result<()> {
    let session = Session::open(cli)?;
    session.require(Role::Vendor)?;
    let mut form = EventForm::create(session.ctx);

    for path in &args.posters {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "poster".to_string());
        let pb = spinner(&format!("Uploading {file_name}..."));
        let result = form.upload_poster(&file_name, &bytes).await;
        pb.finish_and_clear();
        result?;
    }

    let fields = form.fields_mut();
    fields.title = args.title.clone();
    fields.description = args.description.clone();
    fields.category = args.category.clone();
    fields.longitude = args.longitude;
    fields.latitude = args.latitude;
    fields.start_time = Some(args.start);
    fields.end_time = Some(args.end);
    fields.dates = args.dates.clone();
    fields.price_per_ticket = args.price;
    fields.max_tickets_per_user = args.max_per_user;
    fields.total_ticket = args.total_tickets;

    let event = form.submit().await?;
    if is_json(cli) {
        print_json(&event)?;
    } else {
        print_event_row(&event);
    }
    Ok(())
}
