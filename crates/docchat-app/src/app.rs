//! Main egui application — composes the panels and drives the orchestrator.
//!
//! All orchestration futures are `?Send` and run on a `LocalPool` pumped
//! once per frame. A tokio runtime is entered around the pump so reqwest
//! has a reactor; the futures themselves never leave the UI thread.

use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, SidePanel};
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use docchat_backend::HttpBackend;
use docchat_core::event_bus::EventBus;
use docchat_core::orchestrator::ChatOrchestrator;
use docchat_core::ports::DocumentUpload;
use docchat_types::config::AppConfig;
use docchat_ui::panels::{chat_panel, sidebar_panel, ChatAction, SidebarAction};
use docchat_ui::state::UiState;
use docchat_ui::theme;

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// The main application state
pub struct DocChatApp {
    orchestrator: Rc<ChatOrchestrator>,
    backend: Rc<HttpBackend>,
    ui_state: UiState,
    pool: LocalPool,
    spawner: LocalSpawner,
    rt: tokio::runtime::Runtime,
    first_frame: bool,
}

impl DocChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> std::io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let pool = LocalPool::new();
        let spawner = pool.spawner();

        Ok(Self {
            orchestrator: Rc::new(ChatOrchestrator::new(EventBus::new())),
            backend: Rc::new(HttpBackend::new(&config.backend)),
            ui_state: UiState::new(),
            pool,
            spawner,
            rt,
            first_frame: true,
        })
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let upload = if let Some(bytes) = file.bytes {
                Some(DocumentUpload {
                    file_name: file.name.clone(),
                    content_type: if file.mime.is_empty() {
                        guess_mime(Path::new(&file.name))
                    } else {
                        file.mime.clone()
                    },
                    bytes: bytes.to_vec(),
                })
            } else if let Some(path) = file.path {
                read_document(&path)
            } else {
                None
            };
            if let Some(upload) = upload {
                self.dispatch_upload(upload, ctx);
            }
        }
    }

    fn dispatch_upload(&self, upload: DocumentUpload, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();
        let spawned = self.spawner.spawn_local(async move {
            if let Err(e) = orchestrator.upload_document(backend.as_ref(), upload).await {
                log::error!("upload failed: {}", e);
            }
            ctx.request_repaint();
        });
        if let Err(e) = spawned {
            log::error!("failed to spawn upload task: {}", e);
        }
    }

    fn dispatch_send(&self, text: String, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();
        let spawned = self.spawner.spawn_local(async move {
            if let Err(e) = orchestrator.send_message(backend.as_ref(), &text).await {
                log::error!("send failed: {}", e);
            }
            ctx.request_repaint();
        });
        if let Err(e) = spawned {
            log::error!("failed to spawn send task: {}", e);
        }
    }

    fn dispatch_follow_ups(&self, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();
        let spawned = self.spawner.spawn_local(async move {
            if let Err(e) = orchestrator.generate_follow_ups(backend.as_ref()).await {
                log::error!("follow-up generation failed: {}", e);
            }
            ctx.request_repaint();
        });
        if let Err(e) = spawned {
            log::error!("failed to spawn follow-up task: {}", e);
        }
    }
}

impl eframe::App for DocChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Pump pending orchestration futures inside the tokio runtime so
        // reqwest's reactor is available to them.
        {
            let _guard = self.rt.enter();
            self.pool.run_until_stalled();
        }

        let events = self.orchestrator.events().drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        self.handle_dropped_files(ctx);

        let mut sidebar_action = None;
        let mut chat_action = None;
        {
            let chat = self.orchestrator.state();
            self.ui_state.sync_busy(&chat);
            if self.ui_state.is_busy(&chat) {
                ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
            }

            SidePanel::left("sidebar")
                .default_width(230.0)
                .min_width(180.0)
                .show(ctx, |ui| {
                    sidebar_action = sidebar_panel(ui, &chat);
                });

            CentralPanel::default().show(ctx, |ui| {
                chat_action = chat_panel(ui, &chat, &mut self.ui_state);
            });
        }
        // The state borrow is dropped; actions may now re-enter the orchestrator.

        match sidebar_action {
            Some(SidebarAction::NewChat) => {
                if let Some(upload) = pick_document() {
                    self.dispatch_upload(upload, ctx);
                }
            }
            Some(SidebarAction::Select(id)) => self.orchestrator.switch_session(id),
            Some(SidebarAction::Delete(id)) => self.orchestrator.delete_session(id),
            None => {}
        }

        match chat_action {
            Some(ChatAction::Send(text)) => self.dispatch_send(text, ctx),
            Some(ChatAction::FollowUps) => self.dispatch_follow_ups(ctx),
            None => {}
        }
    }
}

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

fn read_document(path: &Path) -> Option<DocumentUpload> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    Some(DocumentUpload {
        file_name,
        content_type: guess_mime(path),
        bytes,
    })
}

fn pick_document() -> Option<DocumentUpload> {
    let path = rfd::FileDialog::new()
        .add_filter("PDF documents", &["pdf"])
        .pick_file()?;
    read_document(&path)
}
