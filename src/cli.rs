//! Command-line interface over the HubSpot client.

use crate::client::HubspotClient;
use crate::models::Association;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query and update the HubSpot records behind the deal-flow pipeline.
#[derive(Parser, Debug)]
#[clap(name = "hubspot-dealflow", version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the company associated with a contact
    CompanyForContact { contact_id: String },

    /// Print the deal associated with a company
    DealForCompany { company_id: String },

    /// Print the contact id for an application, checking its company number
    ContactId {
        application_id: String,
        company_number: String,
    },

    /// Search a form's submissions for one whose KEY field equals VALUE
    FindSubmission {
        key: String,
        value: String,
        /// Form to search (default: HUBSPOT_FORM_ID)
        #[clap(long)]
        form_id: Option<String>,
    },

    /// Upload a file and print its preview URL
    Upload {
        path: PathBuf,
        /// Destination folder in the file manager
        #[clap(long)]
        folder: String,
        /// File name to upload as (default: the local file name)
        #[clap(long)]
        name: Option<String>,
    },

    /// Make an uploaded file public and print its URL
    MakePublic { file_id: String },
}

/// Run one command and print its result to stdout.
pub fn run(cli: Cli, client: &HubspotClient) -> Result<()> {
    match cli.command {
        Commands::CompanyForContact { contact_id } => {
            print_association(client.get_company_for_contact(&contact_id)?);
        }
        Commands::DealForCompany { company_id } => {
            print_association(client.get_deal_for_company(&company_id)?);
        }
        Commands::ContactId {
            application_id,
            company_number,
        } => {
            println!("{}", client.get_contact_id(&application_id, &company_number)?);
        }
        Commands::FindSubmission {
            key,
            value,
            form_id,
        } => {
            let form_id = form_id
                .or_else(|| client.config().form_id.clone())
                .context("No form given: pass --form-id or set HUBSPOT_FORM_ID")?;
            let submission = client.find_submission(&form_id, &key, &value)?;
            println!("{}", serde_json::to_string_pretty(&submission)?);
        }
        Commands::Upload { path, folder, name } => {
            let content =
                std::fs::read(&path).with_context(|| format!("Reading {}", path.display()))?;
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .context("Cannot derive a file name from the path; pass --name")?,
            };
            println!("{}", client.upload_file(&content, &folder, &name)?);
        }
        Commands::MakePublic { file_id } => {
            println!("{}", client.make_file_public(&file_id)?);
        }
    }

    Ok(())
}

fn print_association(association: Association) {
    match association {
        Association::Found(id) => println!("{}", id),
        Association::NotAssociated => println!("(none)"),
    }
}
