//! Brand Analytics Suite - Tauri Application Entry Point
//!
//! This module sets up and configures the Tauri application. It:
//! 1. Initializes plugins (dialog, logging)
//! 2. Creates and manages application state
//! 3. Registers all IPC command handlers
//! 4. Starts the Tauri runtime
//!
//! # Architecture Overview
//!
//! ```text
//! -------------------------------------------------------------------
//! |                      Tauri Application                          |
//! |                                                                 |
//! |  ---------------  ---------------  ---------------------------  |
//! |  |   Plugins   |  |    State    |  |    Command Handlers     |  |
//! |  |  - dialog   |  |  AppState   |  |  - open_csv_dialog      |  |
//! |  |  - log      |  |  (managed)  |  |  - load_csv_file        |  |
//! |  ---------------  ---------------  |  - get_dashboard_data   |  |
//! |                                    |  - ask_question         |  |
//! |                                    |  - find_best_frame      |  |
//! |                                    |  - Settings commands    |  |
//! |                                    ---------------------------  |
//! |                                                                 |
//! |  -----------------------------------------------------------   |
//! |  |                 Events (Rust → Frontend)                 |   |
//! |  |  csv:loaded, csv:closed, app:loading, app:error          |   |
//! |  |  chat:response, settings:tab-changed                     |   |
//! |  -----------------------------------------------------------   |
//! |                                                                 |
//! |  -----------------------------------------------------------   |
//! |  |                    WebView (frontend)                    |   |
//! |  |               Communicates via IPC (invoke)              |   |
//! |  -----------------------------------------------------------   |
//! -------------------------------------------------------------------
//! ```
//!
//! # Command Categories
//!
//! Commands are organized by function:
//! - **Dialog**: Native OS file dialogs
//! - **File I/O**: Loading/closing the exposure CSV
//! - **Dashboard**: Aggregates and brand candidates
//! - **Chat**: CSV chatbot via the reasoning service
//! - **Selection**: Best-frame finder via the reasoning service
//! - **Settings**: Credential and tab state

mod commands;
pub mod events;
mod state;

use state::AppState;

/// Tauri mobile entry point attribute.
/// This macro generates the appropriate entry point for mobile platforms.
/// On desktop, it has no effect.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        // ====================================================================
        // PLUGINS
        // ====================================================================
        // Dialog plugin: Provides native file open dialogs.
        // Used by `open_csv_dialog` to show the OS-native file picker.
        // Required permission in capabilities/default.json
        .plugin(tauri_plugin_dialog::init())
        // ====================================================================
        // STATE MANAGEMENT
        // ====================================================================
        // Register `AppState` as managed state.
        // This makes it available to all command handlers via `State<'_, AppState>`
        // Tauri ensures thread-safe access across multiple async invocations.
        .manage(AppState::new())
        // ====================================================================
        // COMMAND HANDLERS
        // ====================================================================
        // Register all IPC commands that the frontend can invoke.
        // Commands are called from TypeScript via: `invoke("command_name", { args })`
        .invoke_handler(tauri::generate_handler![
            // Dialog commands
            // Opens native file picker filtered to CSV files
            commands::open_csv_dialog,
            // File I/O commands
            // Loads an exposure CSV into memory as raw text
            commands::load_csv_file,
            // Returns cached file metadata (if already loaded)
            commands::get_csv_info,
            // Closes the current file and clears the session
            commands::close_csv,
            // Dashboard commands
            // Parses the CSV and returns the aggregate rankings
            commands::get_dashboard_data,
            // Returns the filtered brand dropdown candidates
            commands::get_brand_candidates,
            // Chat commands
            // Asks the reasoning service a free-text question
            commands::ask_question,
            // Returns the current transcript
            commands::get_chat_transcript,
            // Clears the transcript
            commands::clear_chat,
            // Selection commands
            // Asks the reasoning service for the best exposure frame
            commands::find_best_frame,
            // Settings commands
            // Stores the reasoning-service credential for the session
            commands::set_reasoning_credential,
            // Removes the stored credential
            commands::clear_reasoning_credential,
            // Reports whether a credential is configured
            commands::has_reasoning_credential,
            // Gets the active tab
            commands::get_active_tab,
            // Sets the active tab and notifies the frontend
            commands::set_active_tab,
        ])
        // ====================================================================
        // SETUP HOOK
        // ====================================================================
        // Setup runs once after the app is initialized but before the window opens.
        // Used here to conditionally enable logging in debug builds
        .setup(|app| {
            // Only enable logging plugin in debug builds
            // This prevents log spam in production releases
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        // ====================================================================
        // RUN
        // ====================================================================
        // Start the Tauri application.
        // generate_context!() reads tauri.conf.json at compile time.
        // This call blocks until the application exits.
        .run(tauri::generate_context!())
        .expect("Error while running Tauri application");
}
