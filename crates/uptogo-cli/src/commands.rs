//! Command handlers, called from `main` once configuration and logging are
//! set up.

use std::path::Path;

use anyhow::{bail, Context};
use uptogo_core::records::ShippingMethodRecord;
use uptogo_core::{find_shipping_method, AppConfig, Settings};
use uptogo_shipping::{available_action, save_settings, DeliveryOutcome, ShippingRate, ShippingService};

use crate::order_file::OrderFile;

/// Resolves `api_key` and prints the settings as env lines for `.env`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the key is unknown.
pub(crate) async fn run_settings(config: &AppConfig, api_key: &str) -> anyhow::Result<()> {
    let settings = resolve_settings(config, api_key).await?;

    println!("UPTOGO_API_KEY={}", settings.api_key);
    println!("UPTOGO_STORE_ID={}", settings.store_id);
    println!("UPTOGO_STORE_LOCATION={}", settings.store_location);
    Ok(())
}

/// Looks up `api_key` with a client authenticated by the stored key.
pub(crate) async fn resolve_settings(config: &AppConfig, api_key: &str) -> anyhow::Result<Settings> {
    let service = ShippingService::from_config(config).context("failed to build Uptogo client")?;
    Ok(save_settings(service.client(), api_key).await?)
}

/// Quotes the file's package and prints the offers as JSON. With `select`,
/// the chosen offer is stored on the order's shipping line and the file is
/// written back.
///
/// # Errors
///
/// Returns an error if the order file cannot be read or written, or if
/// `select` is out of range.
pub(crate) async fn run_quote(
    config: &AppConfig,
    path: &Path,
    select: Option<usize>,
) -> anyhow::Result<()> {
    let service = ShippingService::from_config(config)?;
    let mut file = OrderFile::load(path).await?;

    let mut offers: Vec<ShippingRate> = Vec::new();
    let count = service.calculate_shipping(&file.package(), &mut offers).await;
    if count == 0 {
        tracing::warn!(order = %path.display(), "no shipping offers");
    }
    println!("{}", serde_json::to_string_pretty(&offers)?);

    let Some(index) = select else {
        return Ok(());
    };
    let Some(offer) = offers.get(index) else {
        bail!("no offer at position {index}; {} offered", offers.len());
    };
    let line = file.uptogo_line();
    offer.select(line);
    line.save_meta()?;
    file.save(path).await?;
    tracing::info!(offer = %offer.id, order = %path.display(), "offer selected");
    println!("selected {}", offer.label);
    Ok(())
}

/// Requests a delivery for the order and writes the file back.
///
/// # Errors
///
/// Returns an error if the order file cannot be read or written, or if the
/// delivery could not be requested.
pub(crate) async fn run_deliver(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let service = ShippingService::from_config(config)?;
    let mut file = OrderFile::load(path).await?;

    let (order, shipping) = file.parts();
    let outcome = service.delivery_create(order, shipping).await;
    report(outcome, &file, path).await
}

/// Cancels the order's active delivery and writes the file back.
///
/// # Errors
///
/// Returns an error if the order file cannot be read or written, or if the
/// delivery could not be cancelled.
pub(crate) async fn run_cancel(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let service = ShippingService::from_config(config)?;
    let mut file = OrderFile::load(path).await?;

    let (order, shipping) = file.parts();
    let outcome = service.delivery_cancel(order, shipping).await;
    report(outcome, &file, path).await
}

/// Prints the action the order's admin screen would offer.
///
/// # Errors
///
/// Returns an error if the order file cannot be read.
pub(crate) async fn run_actions(path: &Path) -> anyhow::Result<()> {
    let mut file = OrderFile::load(path).await?;
    match available_action(find_shipping_method(&mut file.shipping_methods).as_deref()) {
        Some(action) => println!("{}\t{}", action.id(), action.label()),
        None => println!("no Uptogo shipping line"),
    }
    Ok(())
}

async fn report(outcome: DeliveryOutcome, file: &OrderFile, path: &Path) -> anyhow::Result<()> {
    match outcome {
        DeliveryOutcome::Created(id) => {
            file.save(path).await?;
            println!("delivery {id} requested");
        }
        DeliveryOutcome::Cancelled(id) => {
            file.save(path).await?;
            println!("delivery {id} cancelled");
        }
        DeliveryOutcome::Skipped => {
            tracing::info!(order = %path.display(), "delivery action skipped");
            println!("nothing to do for this order");
        }
        DeliveryOutcome::Aborted(e) => return Err(e.into()),
    }
    Ok(())
}
