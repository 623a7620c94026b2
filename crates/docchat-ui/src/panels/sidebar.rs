//! Sidebar panel — session list plus the new-chat entry point.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use docchat_core::orchestrator::ChatState;
use docchat_types::session::SessionId;

use crate::theme::*;

/// What the user did in the sidebar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    /// Open the file picker for a new document.
    NewChat,
    Select(SessionId),
    Delete(SessionId),
}

/// Render the sidebar. Returns Some(action) when the user clicks something.
pub fn sidebar_panel(ui: &mut egui::Ui, chat: &ChatState) -> Option<SidebarAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading(RichText::new("DocChat").color(TEXT_PRIMARY).strong());
                ui.add_space(4.0);

                let new_chat = ui.add_sized(
                    Vec2::new(ui.available_width(), 28.0),
                    egui::Button::new(RichText::new("+ New chat").color(TEXT_PRIMARY))
                        .fill(if chat.uploading { BG_SURFACE } else { ACCENT })
                        .corner_radius(PANEL_ROUNDING),
                );
                if new_chat.clicked() && !chat.uploading {
                    action = Some(SidebarAction::NewChat);
                }

                ui.separator();

                if chat.sessions.is_empty() {
                    ui.label(
                        RichText::new("No documents yet")
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                    return;
                }

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for session in &chat.sessions {
                            let is_active = chat.active == Some(session.id);
                            if let Some(a) = session_row(ui, session, is_active) {
                                action = Some(a);
                            }
                        }
                    });
            });
        });

    action
}

fn session_row(
    ui: &mut egui::Ui,
    session: &docchat_types::session::Session,
    is_active: bool,
) -> Option<SidebarAction> {
    let mut action = None;
    let bg = if is_active { BG_SURFACE } else { BG_SECONDARY };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let title_color = if is_active { TEXT_PRIMARY } else { TEXT_SECONDARY };
                let title = ui.add(
                    egui::Label::new(
                        RichText::new(&session.file_name).color(title_color),
                    )
                    .truncate()
                    .sense(egui::Sense::click()),
                );
                if title.clicked() {
                    action = Some(SidebarAction::Select(session.id));
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let delete = ui.add(
                        egui::Button::new(RichText::new("✕").color(TEXT_SECONDARY).small())
                            .fill(bg)
                            .corner_radius(PANEL_ROUNDING),
                    );
                    if delete.clicked() {
                        action = Some(SidebarAction::Delete(session.id));
                    }
                    ui.label(
                        RichText::new(format!("{}", session.messages.len()))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });

    action
}
