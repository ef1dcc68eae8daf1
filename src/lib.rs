pub mod keystore;
pub mod media;
pub mod processing;
pub mod session;
pub mod transcription;

use serde::Serialize;
use tauri::{AppHandle, Manager};
use tokio::sync::Mutex;

use processing::OutputMode;
use session::Session;

/// Environment variable consulted when no stored or typed key is available.
const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// Session state shared across commands. One user, one active session.
pub struct SessionState(Mutex<Session>);

fn env_default_key() -> Option<String> {
    match std::env::var(ENV_API_KEY) {
        Ok(key) if !key.is_empty() => Some(key),
        _ => None,
    }
}

/// Session snapshot for the initial page render.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    key_configured: bool,
    busy: bool,
    last_result: Option<String>,
}

// ============================================================================
// Tauri commands: key handling
// ============================================================================

/// Key used to pre-fill the key field on startup: stored key first, then the
/// environment default.
#[tauri::command]
async fn startup_key(
    app: AppHandle,
    state: tauri::State<'_, SessionState>,
) -> Result<Option<String>, String> {
    let key = keystore::load(&app).or_else(env_default_key);
    if let Some(ref k) = key {
        state.0.lock().await.set_credential(k);
    }
    Ok(key)
}

/// Record the key currently typed in the UI field. An empty string clears it.
#[tauri::command]
async fn set_session_key(state: tauri::State<'_, SessionState>, key: String) -> Result<(), String> {
    state.0.lock().await.set_credential(&key);
    Ok(())
}

#[tauri::command]
async fn load_saved_key(
    app: AppHandle,
    state: tauri::State<'_, SessionState>,
) -> Result<Option<String>, String> {
    let key = keystore::load(&app);
    if let Some(ref k) = key {
        state.0.lock().await.set_credential(k);
    }
    Ok(key)
}

#[tauri::command]
async fn save_key(
    app: AppHandle,
    state: tauri::State<'_, SessionState>,
    key: String,
) -> Result<(), String> {
    if key.is_empty() {
        return Err("Cannot save an empty key".to_string());
    }
    keystore::save(&app, &key)?;
    state.0.lock().await.set_credential(&key);
    Ok(())
}

#[tauri::command]
async fn clear_saved_key(
    app: AppHandle,
    state: tauri::State<'_, SessionState>,
) -> Result<(), String> {
    keystore::clear(&app)?;
    state.0.lock().await.set_credential("");
    Ok(())
}

// ============================================================================
// Tauri commands: processing and results
// ============================================================================

#[tauri::command]
async fn session_status(state: tauri::State<'_, SessionState>) -> Result<SessionStatus, String> {
    let session = state.0.lock().await;
    Ok(SessionStatus {
        key_configured: session.credential().is_some() || env_default_key().is_some(),
        busy: session.is_busy(),
        last_result: session.result().map(str::to_string),
    })
}

/// Process one uploaded audio file and return the generated text.
///
/// The credential is resolved session key first, then environment default.
/// On failure the previous result text is left untouched; the frontend shows
/// the error notice and keeps displaying the old result.
#[tauri::command]
async fn process_audio(
    state: tauri::State<'_, SessionState>,
    file_name: String,
    audio: Vec<u8>,
    mode: OutputMode,
) -> Result<String, String> {
    let (id, api_key) = {
        let mut session = state.0.lock().await;
        let api_key = session
            .credential()
            .map(str::to_string)
            .or_else(env_default_key)
            .ok_or_else(|| transcription::InferenceError::MissingApiKey.to_string())?;
        (session.begin_submission(), api_key)
    };

    let mime_type = media::mime_for_file_name(&file_name);
    log::info!(
        "Processing {} as {} ({} bytes, {:?})",
        file_name,
        mime_type,
        audio.len(),
        mode
    );

    let outcome = transcription::process(&audio, mime_type, mode, &api_key).await;

    let mut session = state.0.lock().await;
    match outcome {
        Ok(text) => {
            if session.complete_submission(id, text.clone()) {
                Ok(text)
            } else {
                Err("Superseded by a newer submission".to_string())
            }
        }
        Err(e) => {
            session.fail_submission(id, e.to_string());
            Err(format!("processing failed: {}", e))
        }
    }
}

/// Copy the last result text to the system clipboard.
#[tauri::command]
async fn copy_result(state: tauri::State<'_, SessionState>) -> Result<(), String> {
    let text = state
        .0
        .lock()
        .await
        .result()
        .map(str::to_string)
        .ok_or_else(|| "No result to copy".to_string())?;

    // arboard::Clipboard is not Send, so the copy runs on a std thread.
    // On Linux/X11 the clipboard owner must stay alive for other apps to
    // read the selection, so the thread lingers after reporting success.
    let (result_tx, result_rx) = std::sync::mpsc::sync_channel::<Result<(), String>>(1);

    std::thread::spawn(move || {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(c) => c,
            Err(e) => {
                let _ = result_tx.send(Err(format!("Clipboard access failed: {}", e)));
                return;
            }
        };

        if let Err(e) = clipboard.set_text(&text) {
            let _ = result_tx.send(Err(format!("Clipboard set failed: {}", e)));
            return;
        }

        log::info!("Copied {} chars to clipboard", text.len());
        let _ = result_tx.send(Ok(()));

        #[cfg(target_os = "linux")]
        {
            use std::time::{Duration, Instant};
            let start = Instant::now();
            let timeout = Duration::from_secs(30);

            while start.elapsed() < timeout {
                std::thread::sleep(Duration::from_millis(100));
                match clipboard.get_text() {
                    Ok(current) if current == text => {}
                    _ => {
                        log::debug!("Clipboard ownership transferred");
                        break;
                    }
                }
            }
        }
    });

    result_rx
        .recv()
        .map_err(|e| format!("Clipboard thread failed: {}", e))?
}

// ============================================================================
// Application entry point
// ============================================================================

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Set up logging in debug mode
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Debug)
                        .build(),
                )?;
            }

            app.manage(SessionState(Mutex::new(Session::default())));

            log::info!("MeetScribe started");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            startup_key,
            set_session_key,
            load_saved_key,
            save_key,
            clear_saved_key,
            session_status,
            process_audio,
            copy_result,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
