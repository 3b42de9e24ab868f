use crate::{
    Arguments, ColumnDef, DataContainer, MyStyle, SidePanelShell, TableAction, TableState,
    TableViewError, TableViewResult, TableWidget, default_columns,
};

use egui::{
    CentralPanel, Context, Layout, Spinner, TopBottomPanel, style::Visuals, warn_if_debug_build,
    widgets,
};
use std::path::PathBuf;
use tokio::sync::oneshot::{self, Receiver, error::TryRecvError};
use tracing::{error, info};

/// Type alias for the result delivered by the background load.
pub type ContainerResult = TableViewResult<DataContainer>;

/// Root container of the application.
///
/// Owns the column schema and the table state, starts loading the dataset
/// when created and hands it to the table once the load completes.
pub struct TableViewApp {
    /// Interactive state of the table (search, sort, visibility, page, panel).
    pub table: TableState,
    /// Path of the JSON document being shown.
    pub source: PathBuf,

    /// Tokio runtime for the asynchronous load.
    runtime: tokio::runtime::Runtime,
    /// Channel for receiving the result of the asynchronous load.
    pipe: Option<Receiver<ContainerResult>>,
    /// Active asynchronous tasks. Aborted when the app is dropped.
    tasks: Vec<tokio::task::JoinHandle<()>>,
    /// Message of the last failed load, shown in the status bar.
    load_error: Option<String>,
}

impl TableViewApp {
    /// Creates the app with the default column schema and starts loading `args.path`.
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Arguments) -> TableViewResult<Self> {
        let visuals = if args.light {
            Visuals::light()
        } else {
            Visuals::dark()
        };
        cc.egui_ctx.set_style_init(visuals);

        let mut app = Self::with_columns(default_columns(), args)?;
        app.load(&cc.egui_ctx);
        Ok(app)
    }

    /// Builds the app without any UI context. The dataset is not requested yet.
    pub fn with_columns(columns: Vec<ColumnDef>, args: &Arguments) -> TableViewResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            table: TableState::new(columns, args.page_size),
            source: args.path.clone(),
            runtime,
            pipe: None,
            tasks: Vec::new(),
            load_error: None,
        })
    }

    /// Spawns the load of `self.source` and keeps the receiving end of its channel.
    fn load(&mut self, ctx: &Context) {
        // Before scheduling a new load, forget tasks that are done.
        self.tasks.retain(|task| !task.is_finished());

        let (tx, rx) = oneshot::channel::<ContainerResult>();
        self.pipe = Some(rx);
        self.load_error = None;

        let ctx_clone = ctx.clone();
        let path = self.source.clone();

        info!("Loading dataset from {}", path.display());

        let handle = self.runtime.spawn(async move {
            let data = DataContainer::load_data(path).await;
            // The app may have been closed while the file was being read.
            if tx.send(data).is_err() {
                error!("Receiver dropped before data could be sent.");
            }
            ctx_clone.request_repaint();
        });

        self.tasks.push(handle);
    }

    /// Polls the pending load, if any.
    ///
    /// Returns `true` while the load is still in progress. On success the rows
    /// are handed to the table; on failure the error is logged and the table stays empty.
    fn check_data_pending(&mut self) -> bool {
        let Some(mut output) = self.pipe.take() else {
            return false;
        };

        match output.try_recv() {
            Ok(Ok(container)) => {
                self.table.set_dataset(container.rows);
                false
            }
            Ok(Err(err)) => {
                self.fail_load(err);
                false
            }
            Err(TryRecvError::Empty) => {
                self.pipe = Some(output);
                true
            }
            Err(TryRecvError::Closed) => {
                self.fail_load(TableViewError::ChannelReceive(
                    "Data operation terminated without response.".to_string(),
                ));
                false
            }
        }
    }

    fn fail_load(&mut self, err: TableViewError) {
        error!("Data loading failed: {err}");
        self.load_error = Some(err.to_string());
    }

    /// Applies the actions collected while drawing the frame, in order.
    pub fn apply_actions(&mut self, actions: Vec<TableAction>) {
        for action in actions {
            self.table.apply(action);
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui, pending: bool) {
        ui.horizontal(|ui| {
            if pending {
                ui.add(Spinner::new());
                ui.label(format!("Loading {}", self.source.display()));
            } else if let Some(message) = &self.load_error {
                ui.colored_label(ui.visuals().error_fg_color, message);
            } else {
                ui.label(format!(
                    "{} of {} rows | {}",
                    self.table.filtered_len(),
                    self.table.dataset().len(),
                    self.source.display()
                ));
            }

            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                widgets::global_theme_preference_switch(ui);
                warn_if_debug_build(ui);
            });
        });
    }
}

impl eframe::App for TableViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let pending = self.check_data_pending();
        let mut actions = Vec::new();

        //  | search            features |
        //  ------------------------------
        //  |                  |         |
        //  |      table       |  side   |
        //  |                  |  panel  |
        //  |    pagination    |         |
        //  ------------------------------
        //  | status bar                 |

        let widget = TableWidget::new(&self.table);

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            widget.render_toolbar(ui, &mut actions);
            ui.add_space(4.0);
        });

        let panel = self.table.panel();
        let mut closed = false;
        SidePanelShell::new("feature_panel", panel.title(), panel.is_open()).show(
            ctx,
            || closed = true,
            |ui| widget.render_panel_contents(ui, &mut actions),
        );
        if closed {
            actions.push(TableAction::ClosePanel);
        }

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui, pending);
        });

        TopBottomPanel::bottom("pagination").show(ctx, |ui| {
            ui.add_space(4.0);
            widget.render_pagination(ui, &mut actions);
            ui.add_space(4.0);
        });

        CentralPanel::default().show(ctx, |ui| {
            widget.render_table(ui, &mut actions);
        });

        self.apply_actions(actions);
    }
}

impl Drop for TableViewApp {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests_layout {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::time::Duration;

    fn app(args: &[&str]) -> TableViewApp {
        let args = Arguments::parse_from(args.iter().copied());
        TableViewApp::with_columns(default_columns(), &args).expect("runtime")
    }

    fn wait_for_load(app: &mut TableViewApp) {
        for _ in 0..200 {
            if !app.check_data_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("load did not finish");
    }

    #[test]
    fn test_load_hands_rows_to_table() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        std::fs::write(
            file.path(),
            json!([{"id": 1, "name": "Apple"}, {"id": 2, "name": "Banana"}]).to_string(),
        )
        .expect("write");

        let path = file.path().to_string_lossy().to_string();
        let mut app = app(&["table-view", &path]);
        app.load(&Context::default());
        wait_for_load(&mut app);

        assert_eq!(app.table.dataset().len(), 2);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_missing_file_leaves_table_empty() {
        let mut app = app(&["table-view", "/definitely/not/here.json"]);
        app.load(&Context::default());
        wait_for_load(&mut app);

        assert_eq!(app.table.dataset().len(), 0);
        assert!(app.load_error.as_deref().is_some_and(|m| m.contains("not found")));
    }

    #[test]
    fn test_actions_are_applied_in_order() {
        let mut app = app(&["table-view"]);
        app.apply_actions(vec![
            TableAction::OpenPanel(crate::PanelState::Sort),
            TableAction::ClosePanel,
        ]);
        assert!(!app.table.panel().is_open());
    }

    #[test]
    fn test_page_size_from_arguments() {
        let app = app(&["table-view", "--page-size", "25"]);
        assert_eq!(app.table.page_size(), 25);
    }
}
