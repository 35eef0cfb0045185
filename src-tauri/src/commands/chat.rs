//! Chat Commands
//!
//! The CSV chatbot: free-text questions about the loaded file, answered
//! by the reasoning service with the whole CSV in the prompt.
//!
//! # Flow
//!
//! ```text
//! ask_question(question)
//!     │ pre-flight: CSV loaded? credential set? no call pending?
//!     │ push user turn onto the transcript
//!     │ spawn_blocking ──► GeminiClient::answer_question (blocking HTTP)
//!     │ clear the pending flag (always, success or failure)
//!     └ push model turn (answer, or an apologetic inline error)
//! ```
//!
//! # Degraded Errors
//!
//! A transport or service failure mid-conversation becomes a model turn
//! that apologizes and carries the error text. The transcript stays
//! coherent and the user can simply re-ask; only pre-flight failures
//! (no file, no credential, call already pending) reject the command.

use tauri::{AppHandle, State};

use exposure_analytics::ai::{GeminiClient, ReasoningService};
use exposure_analytics::{AnalyticsError, ChatMessage, ChatRole};

use crate::events::AppEventEmitter;
use crate::state::AppState;

/// Pre-flight snapshot taken under the locks: everything the blocking
/// call needs, copied out so no guard crosses the await point.
fn take_chat_inputs(state: &AppState) -> Result<(String, String), AnalyticsError> {
    let csv_text = {
        let guard = state.csv.read();
        guard
            .as_ref()
            .map(|loaded| loaded.text.clone())
            .ok_or(AnalyticsError::NoDataLoaded)?
    };

    let api_key = {
        let guard = state.credential.read();
        match guard.as_deref() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => return Err(AnalyticsError::MissingCredential),
        }
    };

    Ok((csv_text, api_key))
}

/// Asks the reasoning service a free-text question about the loaded CSV.
///
/// Appends the user turn and the resulting model turn to the transcript
/// and returns the model turn. Concurrent submissions are rejected with
/// `REQUEST_PENDING` while a call is outstanding.
///
/// # Returns
///
/// - `Ok(ChatMessage)` - the model's reply (possibly a degraded inline
///   error message, see module docs)
/// - `Err(AnalyticsError)` - pre-flight failure: `NO_DATA_LOADED`,
///   `MISSING_CREDENTIAL`, or `REQUEST_PENDING`
#[tauri::command]
pub async fn ask_question(
    question: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<ChatMessage, AnalyticsError> {
    let (csv_text, api_key) = take_chat_inputs(&state)?;

    // Gate overlapping calls; checked and set under one write lock
    {
        let mut pending = state.chat_pending.write();
        if *pending {
            return Err(AnalyticsError::RequestPending);
        }
        *pending = true;
    }

    // The user turn goes on the transcript before the call so the UI can
    // render it while the request is in flight
    {
        let mut transcript = state.chat_transcript.write();
        transcript.push(ChatMessage {
            role: ChatRole::User,
            content: question.clone(),
        });
    }

    // Blocking HTTP call off the async runtime
    let result = tauri::async_runtime::spawn_blocking(move || {
        let client = GeminiClient::new(api_key)?;
        client.answer_question(&csv_text, &question)
    })
    .await;

    // Clear the gate unconditionally so a failure cannot wedge the view
    {
        let mut pending = state.chat_pending.write();
        *pending = false;
    }

    // Flatten the join error and the call error into one degraded path
    let reply_text = match result {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) => {
            log::warn!("Chat request failed: {}", e);
            format!(
                "Sorry, I ran into an error answering that: {}. Please try again.",
                e
            )
        }
        Err(e) => {
            log::error!("Chat task panicked or was cancelled: {}", e);
            "Sorry, something went wrong on my end. Please try again.".to_string()
        }
    };

    let reply = ChatMessage {
        role: ChatRole::Model,
        content: reply_text,
    };

    {
        let mut transcript = state.chat_transcript.write();
        transcript.push(reply.clone());
    }

    // Notify event-driven listeners as well as the awaiting caller
    app.emit_chat_response(reply.clone());

    Ok(reply)
}

/// Returns the full chat transcript for the loaded file.
#[tauri::command]
pub fn get_chat_transcript(state: State<'_, AppState>) -> Vec<ChatMessage> {
    state.chat_transcript.read().clone()
}

/// Clears the chat transcript without touching the loaded CSV.
#[tauri::command]
pub fn clear_chat(state: State<'_, AppState>) {
    state.chat_transcript.write().clear();
}
