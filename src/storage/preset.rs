// Saved authentication presets
// Author: Gabriel Demetrios Lafis

use chrono::{SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::data::{InputRow, TableExtractor, TableRow};
use super::{KeyValueStore, StorageError};

/// Key under which the preset list is stored
pub const PRESETS_KEY: &str = "savedAuthAPIs";

/// Secret store used when a preset does not name one
pub const DEFAULT_SECRET_STORE: &str = "local-encrypted";

/// Message returned when saving a preset without a name
pub const MISSING_NAME: &str = "Enter a configuration name";

/// A named, reusable authentication request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthPreset {
    pub id: i64,
    pub name: String,
    pub method: String,
    pub url: String,
    pub body: String,
    pub token_path: String,
    pub token_expiry_path: String,
    pub timeout: String,
    pub retries: String,
    #[serde(rename = "verifySSL")]
    pub verify_ssl: bool,
    pub cache_token: bool,
    pub encrypt_creds: bool,
    pub secret_store: String,
    pub params: Vec<TableRow>,
    pub headers: Vec<TableRow>,
    pub created_at: String,
}

impl AuthPreset {
    /// Label used in preset selection lists
    pub fn label(&self) -> String {
        format!("{} ({} {})", self.name, self.method, self.url)
    }
}

/// Form state of the auth section, saved into and loaded from presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetDraft {
    pub name: String,
    pub method: String,
    pub url: String,
    pub body: String,
    pub token_path: String,
    pub token_expiry_path: String,
    pub timeout: String,
    pub retries: String,
    #[serde(rename = "verifySSL")]
    pub verify_ssl: bool,
    pub cache_token: bool,
    pub encrypt_creds: bool,
    pub secret_store: String,
    pub params: Vec<InputRow>,
    pub headers: Vec<InputRow>,
}

impl Default for PresetDraft {
    fn default() -> Self {
        PresetDraft {
            name: String::new(),
            method: String::new(),
            url: String::new(),
            body: String::new(),
            token_path: String::new(),
            token_expiry_path: String::new(),
            timeout: String::new(),
            retries: String::new(),
            verify_ssl: false,
            cache_token: false,
            encrypt_creds: false,
            secret_store: DEFAULT_SECRET_STORE.to_string(),
            params: Vec::new(),
            headers: Vec::new(),
        }
    }
}

/// Preset list backed by a key/value store.
///
/// The list is read once by [`PresetStore::open`] and written back after
/// every change.
pub struct PresetStore<S: KeyValueStore> {
    store: S,
    presets: Vec<AuthPreset>,
}

impl<S: KeyValueStore> PresetStore<S> {
    /// Load the preset list from a store. A missing key is an empty list.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let presets = match store.get(PRESETS_KEY)? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };

        Ok(PresetStore { store, presets })
    }

    /// Write a candidate list and adopt it only once the store accepted it
    fn commit(&mut self, presets: Vec<AuthPreset>) -> Result<(), StorageError> {
        let text = serde_json::to_string(&presets)?;
        self.store.set(PRESETS_KEY, &text)?;
        self.presets = presets;
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        match self.presets.iter().map(|p| p.id).max() {
            Some(last) if last >= now => last + 1,
            _ => now,
        }
    }

    /// Save the draft as a new preset and clear the draft's name
    pub fn save(&mut self, draft: &mut PresetDraft) -> Result<AuthPreset, StorageError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(StorageError::Validation(MISSING_NAME.to_string()));
        }

        let preset = AuthPreset {
            id: self.next_id(),
            name,
            method: draft.method.clone(),
            url: draft.url.clone(),
            body: draft.body.clone(),
            token_path: draft.token_path.clone(),
            token_expiry_path: draft.token_expiry_path.clone(),
            timeout: draft.timeout.clone(),
            retries: draft.retries.clone(),
            verify_ssl: draft.verify_ssl,
            cache_token: draft.cache_token,
            encrypt_creds: draft.encrypt_creds,
            secret_store: draft.secret_store.clone(),
            params: TableExtractor::extract(&draft.params),
            headers: TableExtractor::extract(&draft.headers),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let mut presets = self.presets.clone();
        presets.push(preset.clone());
        self.commit(presets)?;
        draft.name.clear();

        info!("Saved config \"{}\"", preset.name);
        Ok(preset)
    }

    /// Get all presets in save order
    pub fn list(&self) -> &[AuthPreset] {
        &self.presets
    }

    /// Get a preset by id
    pub fn get(&self, id: i64) -> Option<&AuthPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Copy a preset into the draft for editing.
    ///
    /// The name and the param/header tables of the draft are left as they are.
    pub fn load_into(&self, id: i64, draft: &mut PresetDraft) -> Option<&AuthPreset> {
        let preset = self.get(id)?;

        draft.method = preset.method.clone();
        draft.url = preset.url.clone();
        draft.body = preset.body.clone();
        draft.token_path = preset.token_path.clone();
        draft.token_expiry_path = preset.token_expiry_path.clone();
        draft.timeout = preset.timeout.clone();
        draft.retries = preset.retries.clone();
        draft.verify_ssl = preset.verify_ssl;
        draft.cache_token = preset.cache_token;
        draft.encrypt_creds = preset.encrypt_creds;
        draft.secret_store = if preset.secret_store.is_empty() {
            DEFAULT_SECRET_STORE.to_string()
        } else {
            preset.secret_store.clone()
        };

        Some(preset)
    }

    /// Delete a preset once `confirm` agrees. Returns whether anything was removed.
    pub fn delete<F>(&mut self, id: i64, confirm: F) -> Result<bool, StorageError>
    where
        F: FnOnce(&AuthPreset) -> bool,
    {
        let preset = match self.get(id) {
            Some(preset) => preset,
            None => return Ok(false),
        };

        if !confirm(preset) {
            return Ok(false);
        }

        let presets = self.presets.iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.commit(presets)?;

        info!("Deleted auth config {}", id);
        Ok(true)
    }

    /// Options for a preset selection list: id and label
    pub fn dropdown_options(&self) -> Vec<(i64, String)> {
        self.presets.iter().map(|p| (p.id, p.label())).collect()
    }
}
