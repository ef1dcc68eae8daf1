//! Reversible persistence for the Gemini API key.
//!
//! The key is stored base64-encoded under a fixed identifier in a JSON file
//! in the app's config directory. Base64 keeps the raw key out of casual
//! view in the store file; it is an obscuring measure, not encryption, and
//! no confidentiality is claimed.
//!
//! Never log the key value.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tauri::AppHandle;
use tauri::Manager;

const STORE_FILE_NAME: &str = "key_store.json";

/// On-disk shape of the key store: a single entry under a fixed field name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct KeyStoreFile {
    #[serde(default)]
    gemini_api_key_b64: Option<String>,
}

/// Base64 of the UTF-8 bytes of `secret`. Total; never fails.
pub fn encode(secret: &str) -> String {
    BASE64.encode(secret.as_bytes())
}

/// Inverse of [`encode`]. Absent, empty, and malformed tokens all decode to
/// `None`: a corrupt stored token reads as "no stored value", not an error.
pub fn decode(token: Option<&str>) -> Option<String> {
    let token = token?;
    if token.is_empty() {
        return None;
    }
    let bytes = BASE64.decode(token).ok()?;
    String::from_utf8(bytes).ok()
}

fn store_path_in(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE_NAME)
}

/// Read and decode the stored key from `dir`, if any.
/// Read and parse failures degrade to `None` (logged, not surfaced).
pub fn load_from(dir: &Path) -> Option<String> {
    let path = store_path_in(dir);

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("KeyStore: failed to read {:?}: {}", path, e);
            return None;
        }
    };

    let file = match serde_json::from_str::<KeyStoreFile>(&contents) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("KeyStore: failed to parse {:?}: {}", path, e);
            return None;
        }
    };

    decode(file.gemini_api_key_b64.as_deref())
}

/// Encode `secret` and write it into the store file in `dir`.
pub fn save_to(dir: &Path, secret: &str) -> Result<(), String> {
    if secret.is_empty() {
        return Err("Refusing to store an empty key".to_string());
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create config directory {:?}: {}", dir, e))?;

    let file = KeyStoreFile {
        gemini_api_key_b64: Some(encode(secret)),
    };
    let contents =
        serde_json::to_string_pretty(&file).map_err(|e| format!("Serialize key store: {}", e))?;

    let path = store_path_in(dir);

    // Write atomically: write to a temp file in the same directory, then
    // rename. This prevents a partial/corrupt store file if the app crashes
    // mid-write.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &contents)
        .map_err(|e| format!("Write temp key store {:?}: {}", tmp_path, e))?;

    // On Unix, rename will atomically replace the destination. On Windows,
    // rename fails if the destination exists, so we remove it first.
    if cfg!(windows) && path.exists() {
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(format!("Remove existing key store {:?}: {}", path, e));
            }
        }
    }

    std::fs::rename(&tmp_path, &path)
        .map_err(|e| format!("Rename temp key store {:?} to {:?}: {}", tmp_path, path, e))?;

    log::info!("KeyStore: stored API key");
    Ok(())
}

/// Remove the stored key. Removing an absent entry is not an error.
pub fn clear_in(dir: &Path) -> Result<(), String> {
    let path = store_path_in(dir);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            log::info!("KeyStore: cleared stored API key");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Remove key store {:?}: {}", path, e)),
    }
}

fn config_dir(app: &AppHandle) -> Result<PathBuf, String> {
    app.path()
        .app_config_dir()
        .map_err(|e| format!("Could not determine config directory: {}", e))
}

pub fn load(app: &AppHandle) -> Option<String> {
    match config_dir(app) {
        Ok(dir) => load_from(&dir),
        Err(e) => {
            log::warn!("KeyStore: {}", e);
            None
        }
    }
}

pub fn save(app: &AppHandle, secret: &str) -> Result<(), String> {
    save_to(&config_dir(app)?, secret)
}

pub fn clear(app: &AppHandle) -> Result<(), String> {
    clear_in(&config_dir(app)?)
}
