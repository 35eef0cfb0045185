//! Settings Commands
//!
//! Session settings: the reasoning-service credential and the active tab.
//!
//! # Credential Handling
//!
//! The credential lives only in `AppState` for the lifetime of the
//! process. It is never written to disk, never logged, and never echoed
//! back to the frontend; `has_reasoning_credential` exists so the UI can
//! show a "configured" badge without ever seeing the key again.

use tauri::{AppHandle, State};

use crate::events::{error_codes, AppEventEmitter};
use crate::state::{AppState, Tab};

// ============================================================================
// CREDENTIAL COMMANDS
// ============================================================================

/// Stores the reasoning-service credential for this session.
///
/// Rejects blank input; use `clear_reasoning_credential` to remove a key.
#[tauri::command]
pub fn set_reasoning_credential(
    credential: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let trimmed = credential.trim();
    if trimmed.is_empty() {
        let message = "Credential cannot be empty".to_string();
        app.emit_error(error_codes::SETTINGS_INVALID_CREDENTIAL, &message);
        return Err(message);
    }

    let mut guard = state.credential.write();
    *guard = Some(trimmed.to_string());
    Ok(())
}

/// Clears the stored credential. Subsequent reasoning calls fail their
/// pre-flight check until a new one is set.
#[tauri::command]
pub fn clear_reasoning_credential(state: State<'_, AppState>) {
    let mut guard = state.credential.write();
    *guard = None;
}

/// Returns whether a credential is currently configured.
///
/// The key itself is never returned to the frontend.
#[tauri::command]
pub fn has_reasoning_credential(state: State<'_, AppState>) -> bool {
    state
        .credential
        .read()
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty())
}

// ============================================================================
// TAB COMMANDS
// ============================================================================

/// Returns the currently active tab.
#[tauri::command]
pub fn get_active_tab(state: State<'_, AppState>) -> Tab {
    *state.active_tab.read()
}

/// Sets the active tab and notifies the frontend via `settings:tab-changed`.
#[tauri::command]
pub fn set_active_tab(tab: Tab, app: AppHandle, state: State<'_, AppState>) {
    {
        let mut guard = state.active_tab.write();
        *guard = tab;
    }
    app.emit_tab_changed(tab);
}
