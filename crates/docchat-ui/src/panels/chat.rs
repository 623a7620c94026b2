//! Chat panel — displays the active session's conversation and input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use docchat_core::orchestrator::ChatState;
use docchat_types::message::{Message, Role};

use crate::state::UiState;
use crate::theme::*;

/// What the user did in the chat panel this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    /// Ask for follow-up suggestions to the last answer.
    FollowUps,
}

/// Render the chat panel. Returns Some(action) when the user submits
/// input or requests follow-ups.
pub fn chat_panel(ui: &mut egui::Ui, chat: &ChatState, state: &mut UiState) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    let title = chat
                        .active_session()
                        .map(|s| s.file_name.clone())
                        .unwrap_or_else(|| "DocChat".to_string());
                    ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.last_error.is_some() {
                            ERROR
                        } else if state.is_busy(chat) {
                            WARNING
                        } else {
                            SUCCESS
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                let Some(session) = chat.active_session() else {
                    empty_state(ui);
                    return;
                };

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &session.messages {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }
                        if chat.sending {
                            ui.label(RichText::new("▌").color(ACCENT).strong());
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask about the document...")
                        .desired_width(ui.available_width() - 160.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty() && !chat.sending;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        let text = state.input_text.trim().to_string();
                        action = Some(ChatAction::Send(text));
                        state.input_text.clear();
                        response.request_focus();
                    }

                    // Suggestions only make sense after an answer.
                    let follow_up_enabled =
                        session.last_assistant_text().is_some() && !chat.generating_follow_up;
                    let follow_up_btn = ui.add_enabled(
                        follow_up_enabled,
                        egui::Button::new(RichText::new("Suggest").color(TEXT_PRIMARY))
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING),
                    );
                    if follow_up_btn.clicked() {
                        action = Some(ChatAction::FollowUps);
                    }
                });
            });
        });

    action
}

fn empty_state(ui: &mut egui::Ui) {
    ui.add_space(ui.available_height() * 0.35);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Upload a PDF to start a conversation")
                .color(TEXT_SECONDARY)
                .size(16.0),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new("Drop a file anywhere, or use + New chat")
                .color(TEXT_SECONDARY)
                .small(),
        );
    });
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (label, label_color, bg) = match message.role {
        Role::User => ("You", ACCENT, BG_SECONDARY),
        Role::Assistant => ("Assistant", SUCCESS, BG_SURFACE),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
            if !message.relevant_pages.is_empty() {
                ui.label(
                    RichText::new(format_page_refs(&message.relevant_pages))
                        .color(PAGE_REF)
                        .small(),
                );
            }
        });
}

pub(crate) fn format_page_refs(pages: &[u32]) -> String {
    let list: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
    format!("Found on page(s): {}", list.join(", "))
}
