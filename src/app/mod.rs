use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{error, info};

use crate::family::{FamilySnapshot, SearchState, TreeNode, load_family_snapshot};

use self::graph::{GestureInput, TreeLayout};
use self::viewport::ViewportController;

mod graph;
mod highlight;
mod render_utils;
mod ui;
mod viewport;

pub struct FamilyTreeApp {
    family_path: PathBuf,
    requested_root: Option<String>,
    max_depth: u32,
    next_revision: u64,
    state: AppState,
    reload_rx: Option<Receiver<Result<FamilySnapshot, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<FamilySnapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    snapshot: FamilySnapshot,
    snapshot_revision: u64,
    root_id: String,
    max_depth: u32,
    search_query: String,
    search: SearchState,
    root_filter: String,
    viewport: ViewportController,
    gesture_input: GestureInput,
    canvas_size: Vec2,
    tree_cache: Option<TreeCache>,
}

/// Tree and layout for one root and depth limit. Both are `None` when the
/// root id is not in the snapshot.
struct TreeCache {
    key: TreeCacheKey,
    tree: Option<TreeNode>,
    layout: Option<TreeLayout>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TreeCacheKey {
    snapshot_revision: u64,
    root_id: String,
    max_depth: u32,
}

impl FamilyTreeApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        family_path: PathBuf,
        requested_root: Option<String>,
        max_depth: u32,
    ) -> Self {
        let state = Self::start_load(family_path.clone());
        Self {
            family_path,
            requested_root,
            max_depth,
            next_revision: 0,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(family_path: PathBuf) -> Receiver<Result<FamilySnapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_family_snapshot(&family_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(family_path: PathBuf) -> AppState {
        info!(path = %family_path.display(), "loading family");
        AppState::Loading {
            rx: Self::spawn_load(family_path),
        }
    }

    fn finish_load(&mut self, result: Result<FamilySnapshot, String>) -> AppState {
        match result {
            Ok(snapshot) => {
                self.next_revision += 1;
                AppState::Ready(Box::new(ViewModel::new(
                    snapshot,
                    self.next_revision,
                    self.requested_root.as_deref(),
                    self.max_depth,
                )))
            }
            Err(message) => {
                error!(%message, "family load failed");
                AppState::Error(message)
            }
        }
    }
}

impl eframe::App for FamilyTreeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut finished = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => finished = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        finished = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading family tree...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load family tree");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.family_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.family_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    info!(path = %self.family_path.display(), "reloading family");
                    self.reload_rx = Some(Self::spawn_load(self.family_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => finished = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            finished = Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = finished {
            transition = Some(self.finish_load(result));
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
