//! Engine facade tying fetch, store, filters and actions together
//!
//! Rendering layers hold an `Arc<Engine>` and call into it from any
//! thread. The engine owns the refresh scheduler; callbacks reach back
//! through a weak reference so a dropped engine stops refreshing
//! instead of leaking.

use std::sync::{Arc, Mutex, RwLock, Weak};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::actions::ActionHandler;
use crate::alerts::AlertSink;
use crate::filters::apply_filters;
use crate::github::NotificationClient;
use crate::links;
use crate::models::{Account, AccountNotifications, FilterSettings, Notification, Settings};
use crate::persist::{PersistedState, save_state};
use crate::query::total_unread_count;
use crate::store::NotificationStore;
use crate::sync::{RefreshScheduler, clamp_fetch_interval, fetch_round, new_notifications};

pub struct Engine<C> {
    client: Arc<C>,
    store: Arc<NotificationStore>,
    actions: ActionHandler<C>,
    alerts: Arc<dyn AlertSink>,
    accounts: RwLock<Vec<Account>>,
    settings: RwLock<Settings>,
    filters: RwLock<FilterSettings>,
    scheduler: Mutex<Option<RefreshScheduler>>,
    persist: bool,
}

impl<C: NotificationClient + 'static> Engine<C> {
    pub fn new(client: Arc<C>, alerts: Arc<dyn AlertSink>) -> Self {
        Self::from_persisted(client, alerts, PersistedState::default())
    }

    /// Build an engine from previously persisted state
    pub fn from_persisted(
        client: Arc<C>,
        alerts: Arc<dyn AlertSink>,
        state: PersistedState,
    ) -> Self {
        let store = Arc::new(NotificationStore::new());
        store.set_accounts(&state.accounts);
        let actions = ActionHandler::new(Arc::clone(&client), Arc::clone(&store));
        let mut settings = state.settings;
        settings.fetch_interval_ms = clamp_fetch_interval(settings.fetch_interval_ms);
        Self {
            client,
            store,
            actions,
            alerts,
            accounts: RwLock::new(state.accounts),
            settings: RwLock::new(settings),
            filters: RwLock::new(state.filters),
            scheduler: Mutex::new(None),
            persist: true,
        }
    }

    /// Disable writing state to disk, for ephemeral or embedded use
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Run one fetch round for every account and reconcile the store.
    ///
    /// Safe to call concurrently with itself; a round overtaken by a
    /// newer one is discarded on apply.
    pub fn refresh(&self) {
        let accounts = self.accounts.read().unwrap().clone();
        let settings = self.settings.read().unwrap().clone();

        let round = self.store.begin_round();
        let previous = self.store.snapshot();
        let results = fetch_round(&*self.client, &accounts, &settings);
        if self.store.apply_round(round, results) {
            let current = self.store.snapshot();
            let fresh = new_notifications(&previous, &current);
            if !fresh.is_empty() {
                self.alerts.notify_new_items(&fresh);
            }
            self.update_badge();
        }
    }

    /// Refresh the user details behind every account credential
    pub fn refresh_account_details(&self) {
        let accounts = self.accounts.read().unwrap().clone();
        for account in &accounts {
            match self.client.fetch_authenticated_user(account) {
                Ok(user) => {
                    let mut accounts = self.accounts.write().unwrap();
                    if let Some(entry) = accounts.iter_mut().find(|a| a.is_same(account)) {
                        entry.user = Some(user);
                    }
                }
                Err(error) => {
                    warn!("User refresh failed for {}: {}", account.uuid(), error);
                }
            }
        }
        if let Err(error) = self.save() {
            warn!("Failed to persist state: {error:#}");
        }
    }

    /// Add an account, fetching its user details when absent, and run a
    /// fetch round so its notifications appear without waiting for the
    /// next timer tick.
    ///
    /// Fails when the credential cannot resolve a user, so a bad token
    /// never enters the account list.
    pub fn login(&self, mut account: Account) -> Result<()> {
        if account.user.is_none() {
            let user = self
                .client
                .fetch_authenticated_user(&account)
                .with_context(|| format!("Login failed for {}", account.hostname))?;
            account.user = Some(user);
        }
        info!("Adding account {}", account.uuid());
        {
            let mut accounts = self.accounts.write().unwrap();
            accounts.retain(|a| !a.is_same(&account));
            accounts.push(account);
            self.store.set_accounts(&accounts);
        }
        self.refresh();
        self.save()
    }

    /// Remove an account and everything fetched for it, then refresh the
    /// remaining accounts
    pub fn logout(&self, account: &Account) -> Result<()> {
        info!("Removing account {}", account.uuid());
        {
            let mut accounts = self.accounts.write().unwrap();
            accounts.retain(|a| !a.is_same(account));
        }
        self.store.remove_account(account);
        self.update_badge();
        self.refresh();
        self.save()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.read().unwrap().clone()
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().unwrap().clone()
    }

    pub fn filters(&self) -> FilterSettings {
        self.filters.read().unwrap().clone()
    }

    /// Access the underlying store for status and error display
    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Mutate the filter selection and persist it
    pub fn update_filters(&self, update: impl FnOnce(&mut FilterSettings)) -> Result<()> {
        {
            let mut filters = self.filters.write().unwrap();
            update(&mut filters);
        }
        self.save()
    }

    /// The current snapshot with the filter pipeline applied per account
    pub fn filtered_notifications(&self) -> Vec<AccountNotifications> {
        let filters = self.filters.read().unwrap().clone();
        let settings = self.settings.read().unwrap().clone();
        self.store
            .snapshot()
            .into_iter()
            .map(|entry| {
                let notifications = apply_filters(&entry.notifications, &filters, &settings)
                    .into_iter()
                    .cloned()
                    .collect();
                AccountNotifications {
                    account: entry.account,
                    notifications,
                    error: entry.error,
                }
            })
            .collect()
    }

    pub fn mark_read(&self, notifications: &[Notification]) {
        self.actions.mark_read(notifications, &self.settings());
        self.update_badge();
    }

    pub fn mark_done(&self, notifications: &[Notification]) {
        self.actions.mark_done(notifications, &self.settings());
        self.update_badge();
    }

    pub fn unsubscribe(&self, notification: &Notification) {
        self.actions.unsubscribe(notification, &self.settings());
        self.update_badge();
    }

    pub fn mark_repository_read(&self, group: &[Notification]) {
        self.actions.mark_repository_read(group, &self.settings());
        self.update_badge();
    }

    pub fn mark_repository_done(&self, group: &[Notification]) {
        self.actions.mark_repository_done(group, &self.settings());
        self.update_badge();
    }

    /// Open a notification in the browser, optionally marking it done
    pub fn open_notification(&self, notification: &Notification) -> Result<()> {
        links::open_notification(notification)?;
        let settings = self.settings();
        if settings.mark_as_done_on_open {
            self.mark_done(std::slice::from_ref(notification));
        }
        Ok(())
    }

    fn update_badge(&self) {
        self.alerts.update_badge(total_unread_count(&self.store.snapshot()));
    }

    fn save(&self) -> Result<()> {
        if !self.persist {
            return Ok(());
        }
        save_state(&PersistedState {
            accounts: self.accounts(),
            settings: self.settings(),
            filters: self.filters(),
        })
    }
}

impl<C: NotificationClient + 'static> Engine<C> {
    /// Start periodic refreshing.
    ///
    /// Idempotent; calling again restarts the scheduler with the
    /// current fetch interval.
    pub fn start(self: &Arc<Self>) {
        let mut slot = self.scheduler.lock().unwrap();
        if let Some(old) = slot.take() {
            old.shutdown();
        }
        let interval = self.settings().fetch_interval_ms;

        let refresh_engine: Weak<Self> = Arc::downgrade(self);
        let account_engine: Weak<Self> = Arc::downgrade(self);
        *slot = Some(RefreshScheduler::start(
            interval,
            move || {
                if let Some(engine) = refresh_engine.upgrade() {
                    engine.refresh();
                }
            },
            move || {
                if let Some(engine) = account_engine.upgrade() {
                    engine.refresh_account_details();
                }
            },
        ));
    }

    /// Stop periodic refreshing
    pub fn stop(&self) {
        if let Some(scheduler) = self.scheduler.lock().unwrap().take() {
            scheduler.shutdown();
        }
    }

    /// Apply new settings, persist them and restart the scheduler when
    /// the fetch cadence changed
    pub fn update_settings(self: &Arc<Self>, mut new_settings: Settings) -> Result<()> {
        new_settings.fetch_interval_ms = clamp_fetch_interval(new_settings.fetch_interval_ms);
        let interval_changed = {
            let mut settings = self.settings.write().unwrap();
            let changed = settings.fetch_interval_ms != new_settings.fetch_interval_ms;
            *settings = new_settings;
            changed
        };
        if interval_changed && self.scheduler.lock().unwrap().is_some() {
            self.start();
        }
        self.save()
    }
}

impl<C> Drop for Engine<C> {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.lock().unwrap().take() {
            scheduler.shutdown();
        }
    }
}
