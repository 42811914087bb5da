//! Runtime application state
//!
//! Owns the signed-in user, the visible transcript, the pending image
//! attachment and the busy flag that keeps a single request in flight.

use reqwest::Client;
use std::time::Instant;

use crate::api::GenerateRequest;
use crate::core::config::Config;
use crate::core::constants::FALLBACK_REPLY;
use crate::core::interaction::build_request;
use crate::core::message::Message;
use crate::core::modes::{ChatMode, RpFlavor};
use crate::core::store::UserStore;
use crate::core::user::User;
use crate::utils::logging::TranscriptLog;
use crate::utils::scroll;
use ratatui::text::Line;

/// One visible transcript row source: either a real conversation turn
/// (persisted in the user's history) or an app notice (command output,
/// warnings) that never reaches the store or the provider.
pub enum TranscriptEntry {
    Turn(Message),
    Notice(String),
}

pub struct App {
    pub store: UserStore,
    pub user: User,
    pub transcript: Vec<TranscriptEntry>,
    pub input: String,
    /// Data URI attached via `/image`, re-sent with every turn of an
    /// image mode until cleared.
    pub pending_image: Option<String>,
    pub is_processing: bool,
    pub pulse_start: Instant,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub client: Client,
    pub config: Config,
    pub api_key: String,
    pub logging: TranscriptLog,
}

impl App {
    pub fn new(
        store: UserStore,
        user: User,
        config: Config,
        api_key: String,
        log_file: Option<String>,
    ) -> Self {
        let transcript = user
            .history
            .iter()
            .cloned()
            .map(TranscriptEntry::Turn)
            .collect();

        App {
            store,
            user,
            transcript,
            input: String::new(),
            pending_image: None,
            is_processing: false,
            pulse_start: Instant::now(),
            scroll_offset: 0,
            auto_scroll: true,
            client: Client::new(),
            config,
            api_key,
            logging: TranscriptLog::new(log_file),
        }
    }

    pub fn mode(&self) -> ChatMode {
        self.user.mode
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.user.mode = mode;
        self.persist();
        self.push_notice(format!("Режим: {}", mode.label()));
    }

    pub fn set_flavor(&mut self, flavor: RpFlavor) {
        self.user.rp_flavor = flavor;
        self.persist();
        self.push_notice(format!("РП-сеттинг: {}", flavor.as_str()));
    }

    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::Notice(text.into()));
    }

    /// A turn in an image mode cannot go out without an attachment.
    pub fn missing_required_image(&self) -> bool {
        self.user.mode.requires_image() && self.pending_image.is_none()
    }

    /// Record the user's turn and produce the provider request for it.
    ///
    /// The request context is the history *before* this turn; the new
    /// text (and the attachment, in image modes) forms the final turn.
    pub fn begin_exchange(&mut self, text: String) -> GenerateRequest {
        let image = if self.user.mode.requires_image() {
            self.pending_image.clone()
        } else {
            None
        };

        let request = build_request(
            self.user.mode,
            self.user.rp_flavor,
            &text,
            image.as_deref(),
            &self.user.history,
            self.config.temperature,
        );

        if let Err(e) = self.logging.append(&format!("Ты: {text}")) {
            self.push_notice(format!("Ошибка лога: {e}"));
        }

        let message = Message::user(text, image);
        self.user.history.push(message.clone());
        self.transcript.push(TranscriptEntry::Turn(message));

        self.is_processing = true;
        self.pulse_start = Instant::now();
        self.auto_scroll = true;

        request
    }

    /// Append the reply (or the fixed fallback) and settle the exchange:
    /// XP is awarded only for a successful reply, and the mutated user is
    /// written back to the store either way.
    pub fn complete_exchange(&mut self, result: Result<String, String>) {
        let reply = match result {
            Ok(text) => {
                self.user.xp += 1;
                text
            }
            Err(error) => {
                tracing::warn!(%error, "provider call failed");
                FALLBACK_REPLY.to_string()
            }
        };

        if let Err(e) = self.logging.append(&reply) {
            self.push_notice(format!("Ошибка лога: {e}"));
        }

        let message = Message::model(reply);
        self.user.history.push(message.clone());
        self.transcript.push(TranscriptEntry::Turn(message));
        self.is_processing = false;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.update(&self.user) {
            tracing::warn!(error = %e, "failed to persist user record");
            self.push_notice(format!("Не удалось сохранить профиль: {e}"));
        }
    }

    pub fn build_display_lines(&self) -> Vec<Line<'static>> {
        scroll::build_display_lines(&self.transcript)
    }

    pub fn max_scroll_offset(&self, available_height: u16, terminal_width: u16) -> u16 {
        scroll::max_scroll_offset(&self.transcript, terminal_width, available_height)
    }

    /// Pin the view to the bottom while auto-scroll is on.
    pub fn update_scroll_position(&mut self, available_height: u16, terminal_width: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.max_scroll_offset(available_height, terminal_width);
        }
    }
}
