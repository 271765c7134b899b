use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use gymbook_web_app::{OnboardingRepository, Settings, SettingsRepository, log};
use serde::de::DeserializeOwned;

const KEY_ONBOARDING_GUIDE_SEEN: &str = "onboarding guide seen";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

pub struct LocalStorage;

fn read_or_default<T: DeserializeOwned>(key: &str, default: T) -> Result<T, String> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(value),
        Err(err) => match err {
            gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(default),
            err => Err(err),
        },
    }
    .map_err(|err| err.to_string())
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        read_or_default(KEY_SETTINGS, Settings::default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

impl OnboardingRepository for LocalStorage {
    async fn read_onboarding_guide_seen(&self) -> Result<bool, String> {
        read_or_default(KEY_ONBOARDING_GUIDE_SEEN, false)
    }

    async fn write_onboarding_guide_seen(&self, seen: bool) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_ONBOARDING_GUIDE_SEEN, seen)
            .map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        read_or_default(KEY_LOG, VecDeque::new()).map_err(log::Error::Unknown)
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::prepend(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
