//! Per-account concurrent fetch
//!
//! Accounts are fetched in parallel and isolated from each other: one
//! account failing never discards another account's results. Detail
//! enrichment failures degrade to the base notification instead of
//! failing the account.

use log::{debug, warn};
use rayon::prelude::*;

use crate::github::{FetchOptions, NotificationClient, normalize};
use crate::models::{Account, AccountNotifications, Settings};

/// Fetch every account once and collect per-account results.
///
/// The result always contains one entry per account, in account order,
/// with either notifications or the classified error.
pub fn fetch_round<C: NotificationClient>(
    client: &C,
    accounts: &[Account],
    settings: &Settings,
) -> Vec<AccountNotifications> {
    accounts
        .par_iter()
        .map(|account| fetch_account(client, account, settings))
        .collect()
}

/// Fetch one account's notifications, normalizing and optionally
/// enriching them
pub fn fetch_account<C: NotificationClient>(
    client: &C,
    account: &Account,
    settings: &Settings,
) -> AccountNotifications {
    let options = FetchOptions::from_settings(settings);
    let raw = match client.list_notifications(account, &options) {
        Ok(raw) => raw,
        Err(error) => {
            warn!("Fetch failed for {}: {}", account.uuid(), error);
            return AccountNotifications {
                account: account.clone(),
                notifications: vec![],
                error: Some(error),
            };
        }
    };

    debug!("Fetched {} notifications for {}", raw.len(), account.uuid());

    let notifications = raw
        .par_iter()
        .map(|raw_notification| {
            let mut notification = normalize(raw_notification, account);
            if settings.detailed_notifications {
                match client.fetch_subject_details(account, raw_notification) {
                    Ok(details) => crate::github::enrich(&mut notification, &details),
                    Err(error) => {
                        debug!(
                            "Detail fetch failed for thread {}: {}",
                            raw_notification.id, error
                        );
                    }
                }
            }
            notification
        })
        .collect();

    AccountNotifications {
        account: account.clone(),
        notifications,
        error: None,
    }
}
