// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    // Load .env if present so GEMINI_API_KEY can serve as the default
    // credential in development. Missing .env is fine.
    let _ = dotenvy::dotenv();

    app_lib::run();
}
