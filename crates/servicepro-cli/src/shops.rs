//! `shops` subcommands: browse, inspect and manage the directory.

use clap::{Args, Subcommand};
use servicepro_core::{ProviderId, ServiceFilter, ShopForm};
use servicepro_directory::Intent;

use crate::console::{print_cards, print_details};
use crate::context::{check, Context};

#[derive(Debug, Subcommand)]
pub(crate) enum ShopsCommands {
    /// List shops around the map center
    List {
        /// Service type (electrician, plumber, mechanic, carwash, or all)
        #[arg(long, default_value = "all")]
        service: String,
        /// Minimum average rating
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        /// Search radius in kilometres (defaults to SERVICEPRO_DEFAULT_RADIUS_KM)
        #[arg(long)]
        radius: Option<f64>,
        /// Free-text search on name or service; ignores the other filters
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one shop with its reviews
    Show { id: String },
    /// Add a shop (provider or admin accounts)
    Add(ShopFields),
    /// Edit a shop you own
    Edit {
        id: String,
        #[command(flatten)]
        fields: ShopFields,
    },
    /// Delete a shop you own
    Delete { id: String },
}

/// Form fields. On `add` every missing field is blank; on `edit` a missing
/// field keeps its current value.
#[derive(Debug, Args, Default)]
pub(crate) struct ShopFields {
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) service: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lat: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lng: Option<String>,
}

impl ShopFields {
    pub(crate) fn merge_into(self, mut form: ShopForm) -> ShopForm {
        let fields = [
            (self.name, &mut form.name),
            (self.service, &mut form.service),
            (self.phone, &mut form.phone),
            (self.address, &mut form.address),
            (self.description, &mut form.description),
            (self.lat, &mut form.lat),
            (self.lng, &mut form.lng),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

pub(crate) async fn run(ctx: &Context, command: ShopsCommands) -> anyhow::Result<()> {
    match command {
        ShopsCommands::List {
            service,
            min_rating,
            radius,
            search,
        } => {
            let mut dir = ctx.open_directory(None).await?;
            check(
                &dir.dispatch(Intent::FilterChanged {
                    service: ServiceFilter::parse(&service),
                    min_rating,
                    radius_km: radius.unwrap_or(ctx.config.default_radius_km),
                })
                .await,
            )?;
            if let Some(text) = search {
                check(&dir.dispatch(Intent::SearchChanged(text)).await)?;
            }
            print_cards(&dir.surface().cards);
        }
        ShopsCommands::Show { id } => {
            let dir = ctx.open_directory(None).await?;
            let id = ProviderId(id);
            let details = dir
                .details(&id)
                .ok_or_else(|| anyhow::anyhow!("no shop with id {id}"))?;
            print_details(&details);
        }
        ShopsCommands::Add(fields) => {
            ctx.require_user()?;
            let mut dir = ctx.open_directory(None).await?;
            check(&dir.dispatch(Intent::OpenAddForm).await)?;
            let form = fields.merge_into(ShopForm::default());
            check(&dir.dispatch(Intent::SubmitShop(form)).await)?;
        }
        ShopsCommands::Edit { id, fields } => {
            ctx.require_user()?;
            let mut dir = ctx.open_directory(None).await?;
            check(&dir.dispatch(Intent::OpenEditForm(ProviderId(id))).await)?;
            let current = dir
                .open_form()
                .map(|pending| pending.form.clone())
                .unwrap_or_default();
            let form = fields.merge_into(current);
            check(&dir.dispatch(Intent::SubmitShop(form)).await)?;
        }
        ShopsCommands::Delete { id } => {
            ctx.require_user()?;
            let mut dir = ctx.open_directory(None).await?;
            check(&dir.dispatch(Intent::DeleteShop(ProviderId(id))).await)?;
        }
    }
    Ok(())
}
