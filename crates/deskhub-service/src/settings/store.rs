//! Per-user notification and autocorrect preferences.
//!
//! The store is the single owner of the viewer's preferences. Local state
//! changes only when the backend accepted a write, and is published through
//! a `watch` channel so readers always see the newest record.
//!
//! Toggles are not queued. Each update applies its change to the latest
//! *issued* record so concurrent toggles compose, and a successful response
//! is discarded if a later-issued update has already been applied.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use deskhub_cache::keys;
use deskhub_client::backend::PreferencesBackend;
use deskhub_core::result::AppResult;
use deskhub_core::traits::cache::CacheProviderExt;
use deskhub_core::traits::{CacheProvider, NoticeSink};
use deskhub_core::types::{Notice, UserId};
use deskhub_entity::notification::{NotificationPreferences, PreferenceKey};

#[derive(Debug)]
struct Drafts {
    /// Record the next update builds on.
    issued: NotificationPreferences,
    /// Sequence number of the most recently issued update.
    last_issued: u64,
    /// Sequence number of the most recently applied update.
    last_applied: u64,
}

/// Holds and synchronizes one user's preferences.
#[derive(Debug)]
pub struct UserProfileSettingsStore {
    user_id: UserId,
    backend: Arc<dyn PreferencesBackend>,
    cache: Arc<dyn CacheProvider>,
    notices: Arc<dyn NoticeSink>,
    state: watch::Sender<NotificationPreferences>,
    drafts: Mutex<Drafts>,
}

impl UserProfileSettingsStore {
    /// Creates a store holding default preferences.
    pub fn new(
        user_id: UserId,
        backend: Arc<dyn PreferencesBackend>,
        cache: Arc<dyn CacheProvider>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        let initial = NotificationPreferences::default();
        let (state, _) = watch::channel(initial);
        Self {
            user_id,
            backend,
            cache,
            notices,
            state,
            drafts: Mutex::new(Drafts {
                issued: initial,
                last_issued: 0,
                last_applied: 0,
            }),
        }
    }

    /// The owner of these preferences.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The authoritative local preferences.
    pub fn current(&self) -> NotificationPreferences {
        *self.state.borrow()
    }

    /// Subscribes to preference changes.
    pub fn subscribe(&self) -> watch::Receiver<NotificationPreferences> {
        self.state.subscribe()
    }

    fn drafts(&self) -> std::sync::MutexGuard<'_, Drafts> {
        self.drafts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Loads the stored preferences, reading through the cache.
    ///
    /// A backend without a record leaves the current preferences in place.
    /// A load that overlaps an update is discarded, since the update was
    /// built on newer state than the load could have observed.
    pub async fn load(&self) -> AppResult<NotificationPreferences> {
        let key = keys::preferences(&self.user_id);
        let issued_before = self.drafts().last_issued;

        let cached: Option<NotificationPreferences> =
            self.cache.get_json(&key).await.unwrap_or_else(|e| {
                warn!("Preferences cache read failed: {}", e);
                None
            });

        let (loaded, from_backend) = match cached {
            Some(prefs) => {
                debug!(user_id = %self.user_id, "Preferences served from cache");
                (prefs, false)
            }
            None => match self.backend.fetch_preferences(&self.user_id).await {
                Ok(Some(prefs)) => (prefs, true),
                Ok(None) => {
                    debug!(user_id = %self.user_id, "No stored preferences, keeping defaults");
                    return Ok(self.current());
                }
                Err(e) => {
                    warn!(user_id = %self.user_id, "Loading preferences failed: {}", e);
                    self.notices
                        .push(Notice::from_error("Loading settings failed", &e));
                    return Err(e);
                }
            },
        };

        if from_backend && self.drafts().last_issued == issued_before {
            if let Err(e) = self.cache.set_json(&key, &loaded).await {
                warn!("Preferences cache write failed: {}", e);
            }
        }

        let applied = {
            let mut drafts = self.drafts();
            if drafts.last_issued == issued_before {
                drafts.issued = loaded;
                self.state.send_replace(loaded);
                true
            } else {
                false
            }
        };
        if !applied {
            debug!(user_id = %self.user_id, "Loaded preferences superseded by an update");
            if from_backend {
                if let Err(e) = self.cache.delete(&key).await {
                    warn!("Preferences cache invalidation failed: {}", e);
                }
            }
        }
        Ok(self.current())
    }

    /// Replaces one field and persists the whole record.
    ///
    /// Returns the authoritative preferences after the call.
    pub async fn update(&self, key: PreferenceKey, value: bool) -> AppResult<NotificationPreferences> {
        let (seq, record) = {
            let mut drafts = self.drafts();
            let record = drafts.issued.with(key, value);
            drafts.issued = record;
            drafts.last_issued += 1;
            (drafts.last_issued, record)
        };
        debug!(user_id = %self.user_id, %key, value, seq, "Saving preference");

        let cache_key = keys::preferences(&self.user_id);
        match self.backend.save_preferences(&self.user_id, &record).await {
            Ok(()) => {
                let apply = {
                    let mut drafts = self.drafts();
                    if seq > drafts.last_applied {
                        drafts.last_applied = seq;
                        true
                    } else {
                        false
                    }
                };
                if apply {
                    self.state.send_replace(record);
                    if let Err(e) = self.cache.set_json(&cache_key, &record).await {
                        warn!("Preferences cache write failed: {}", e);
                    }
                    info!(user_id = %self.user_id, %key, value, "Preference saved");
                } else {
                    debug!(seq, "Preference response superseded by a later update");
                }
                Ok(self.current())
            }
            Err(e) => {
                warn!(user_id = %self.user_id, %key, "Saving preference failed: {}", e);
                if let Err(cache_err) = self.cache.delete(&cache_key).await {
                    warn!("Preferences cache invalidation failed: {}", cache_err);
                }
                {
                    let mut drafts = self.drafts();
                    if drafts.last_issued == seq {
                        drafts.issued = *self.state.borrow();
                    }
                }
                self.notices
                    .push(Notice::from_error("Saving settings failed", &e));
                Err(e)
            }
        }
    }
}
