//! Admin portal: vendor and client management

use super::{is_json, print_json, Session};
use crate::output::{format_count, spinner, Status};
use crate::{AccountKind, Cli, VendorListArg};
use anyhow::Result;
use eventmart_api_client::{AccountStatus, Page};
use eventmart_core::Role;
use eventmart_portal::{ClientTable, RejectVendorModal, VendorList, VendorTable};
use owo_colors::OwoColorize;

impl From<VendorListArg> for VendorList {
    fn from(list: VendorListArg) -> Self {
        match list {
            VendorListArg::All => Self::All,
            VendorListArg::Pending => Self::Pending,
            VendorListArg::Rejected => Self::Rejected,
        }
    }
}

fn admin_session(cli: &Cli) -> Result<Session> {
    let session = Session::open(cli)?;
    session.require(Role::Admin)?;
    Ok(session)
}

fn status_label(status: AccountStatus) -> String {
    match status {
        AccountStatus::Active => status.as_str().green().to_string(),
        AccountStatus::Blocked | AccountStatus::Rejected => status.as_str().red().to_string(),
        AccountStatus::Pending | AccountStatus::Inactive => status.as_str().yellow().to_string(),
    }
}

fn page_footer<T>(page: &Page<T>, noun: (&str, &str)) {
    println!();
    println!(
        "{}",
        format!(
            "{} · page {}/{}",
            format_count(page.items.len(), noun.0, noun.1),
            page.current_page,
            page.total_pages
        )
        .dimmed()
    );
}

pub async fn vendors(cli: &Cli, list: VendorListArg, page: u32) -> Result<()> {
    let session = admin_session(cli)?;
    let table = VendorTable::new(list.into(), session.ctx);

    let pb = spinner("Loading vendors...");
    let result = table.load(page).await;
    pb.finish_and_clear();
    let page = result?;

    if is_json(cli) {
        return print_json(&page);
    }

    Status::header("Vendors");
    for vendor in &page.items {
        println!(
            "  {}  {:<24} {:<32} {}",
            vendor.id.dimmed(),
            vendor.name,
            vendor.email,
            status_label(vendor.status)
        );
        if let Some(reason) = &vendor.rejection_reason {
            println!("      {} {}", "reason:".dimmed(), reason);
        }
    }
    page_footer(&page, ("vendor", "vendors"));
    Ok(())
}

pub async fn clients(cli: &Cli, page: u32) -> Result<()> {
    let session = admin_session(cli)?;
    let table = ClientTable::new(session.ctx);

    let pb = spinner("Loading clients...");
    let result = table.load(page).await;
    pb.finish_and_clear();
    let page = result?;

    if is_json(cli) {
        return print_json(&page);
    }

    Status::header("Clients");
    for client in &page.items {
        println!(
            "  {}  {:<24} {:<32} {}",
            client.id.dimmed(),
            client.name,
            client.email,
            status_label(client.status)
        );
    }
    page_footer(&page, ("client", "clients"));
    Ok(())
}

pub async fn set_blocked(cli: &Cli, kind: AccountKind, id: &str, blocked: bool) -> Result<()> {
    let session = admin_session(cli)?;
    let ack = match (kind, blocked) {
        (AccountKind::Vendor, true) => VendorTable::new(VendorList::All, session.ctx).block(id).await?,
        (AccountKind::Vendor, false) => VendorTable::new(VendorList::All, session.ctx).unblock(id).await?,
        (AccountKind::Client, true) => ClientTable::new(session.ctx).block(id).await?,
        (AccountKind::Client, false) => ClientTable::new(session.ctx).unblock(id).await?,
    };
    if is_json(cli) {
        print_json(&ack)?;
    }
    Ok(())
}

pub async fn approve(cli: &Cli, id: &str) -> Result<()> {
    let session = admin_session(cli)?;
    let ack = VendorTable::new(VendorList::Pending, session.ctx)
        .approve(id)
        .await?;
    if is_json(cli) {
        print_json(&ack)?;
    }
    Ok(())
}

pub async fn reject(cli: &Cli, id: &str, reason: &str) -> Result<()> {
    let session = admin_session(cli)?;
    let table = VendorTable::new(VendorList::Pending, session.ctx);

    let mut modal = RejectVendorModal::new();
    modal.open(id);
    modal.set_reason(reason);
    let ack = modal.submit(&table).await?;
    if is_json(cli) {
        print_json(&ack)?;
    }
    Ok(())
}
