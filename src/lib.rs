use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::{mpsc::Sender, Arc};
use tracing::{debug, info, warn};

use ratatui::style::Style;
use ratatui::layout::Margin;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub mod cache;
pub mod chart_data;
pub mod chart_export;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod error_display;
pub mod loader;
pub mod pairings;
mod render;
pub mod schema;
pub mod widgets;

pub use cache::{CacheManager, DatasetCache};
pub use config::{
    rgb_to_256_color, rgb_to_basic_ansi, AppConfig, ColorParser, ConfigManager, Theme,
};
pub use dashboard::{DashboardOptions, DashboardView, NavState};
pub use dataset::{Dataset, WineFilter};
pub use error::{PairingError, PairingResult};
pub use loader::OpenOptions;
pub use taste_harmony_cli::{Args, TieBreakArg, ViewArg};

use error_display::{user_message_from_pairing, user_message_from_report};
use widgets::controls::Controls;
use widgets::sidebar::{Sidebar, SidebarFocus};

/// Application name used for cache directory and other app-specific paths
pub const APP_NAME: &str = "taste-harmony";

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Open(PathBuf, OpenOptions),
    /// Load the current path again; served from the cache unless the file changed.
    Reload,
    Navigate(NavState),
    Select(WineFilter),
    ExportCharts(PathBuf),
    /// Re-derive the dashboard from the current dataset, page and selection.
    Update,
    Resize(u16, u16),
    Exit,
}

pub struct App {
    events: Sender<AppEvent>,
    theme: Theme,
    options: DashboardOptions,
    open_options: OpenOptions,
    path: Option<PathBuf>,
    dataset_cache: DatasetCache,
    dataset: Option<Arc<Dataset>>,
    dashboard: Option<DashboardView>,
    nav: NavState,
    selection: WineFilter,
    /// Wine requested on the command line, applied once the dataset is loaded.
    pending_selection: Option<String>,
    filter_cursor: usize,
    focus: SidebarFocus,
    /// Set when loading fails; only the error page is drawn afterwards.
    fatal: Option<String>,
    status: Option<String>,
    export_dir: PathBuf,
}

impl App {
    pub fn new(events: Sender<AppEvent>) -> App {
        Self::new_with_config(events, Theme::default(), &AppConfig::default())
    }

    pub fn new_with_config(events: Sender<AppEvent>, theme: Theme, app_config: &AppConfig) -> App {
        App {
            events,
            theme,
            options: DashboardOptions {
                top_n: app_config.analysis.top_n,
                tie_break: app_config.analysis.tie_break,
            },
            open_options: OpenOptions::new(),
            path: None,
            dataset_cache: DatasetCache::new(),
            dataset: None,
            dashboard: None,
            nav: NavState::Overview,
            selection: WineFilter::All,
            pending_selection: None,
            filter_cursor: 0,
            focus: SidebarFocus::default(),
            fatal: None,
            status: None,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn send_event(&mut self, event: AppEvent) -> color_eyre::Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    pub fn set_options(&mut self, options: DashboardOptions) {
        self.options = options;
    }

    pub fn set_nav(&mut self, nav: NavState) {
        self.nav = nav;
    }

    /// Wine to select once the dataset is open; an unknown value is fatal.
    pub fn set_initial_wine(&mut self, wine: Option<String>) {
        self.pending_selection = wine;
    }

    pub fn set_export_dir(&mut self, dir: PathBuf) {
        self.export_dir = dir;
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn dashboard(&self) -> Option<&DashboardView> {
        self.dashboard.as_ref()
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn selection(&self) -> &WineFilter {
        &self.selection
    }

    pub fn focus(&self) -> SidebarFocus {
        self.focus
    }

    pub fn filter_cursor(&self) -> usize {
        self.filter_cursor
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn dataset_cache(&self) -> &DatasetCache {
        &self.dataset_cache
    }

    fn fail(&mut self, message: String) {
        warn!(%message, "dashboard halted");
        self.fatal = Some(message);
        self.dashboard = None;
    }

    fn open(&mut self, path: PathBuf, options: OpenOptions) -> Option<AppEvent> {
        match self.dataset_cache.load(&path, &options) {
            Ok(dataset) => {
                self.path = Some(path);
                self.open_options = options;
                self.fatal = None;
                self.dataset = Some(dataset);
                self.apply_pending_selection()
            }
            Err(e) => {
                self.path = Some(path);
                self.fail(user_message_from_pairing(&e));
                None
            }
        }
    }

    fn apply_pending_selection(&mut self) -> Option<AppEvent> {
        let dataset = self.dataset.clone()?;
        if let Some(label) = self.pending_selection.take() {
            match dataset.resolve_selection(&label) {
                Ok(filter) => self.selection = filter,
                Err(e) => {
                    self.fail(user_message_from_pairing(&e));
                    return None;
                }
            }
        } else if let WineFilter::Wine(w) = &self.selection {
            // A reload may drop the selected wine from the data.
            if dataset.resolve_selection(w).is_err() {
                self.selection = WineFilter::All;
            }
        }
        Some(AppEvent::Update)
    }

    fn refresh(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        match dashboard::render(&dataset, &self.selection, self.nav, self.options) {
            Ok(view) => {
                self.filter_cursor = view
                    .wine_options
                    .iter()
                    .position(|w| w == self.selection.label())
                    .unwrap_or(0);
                debug!(
                    nav = self.nav.label(),
                    selection = self.selection.label(),
                    rows = view.total_count,
                    "dashboard updated"
                );
                self.dashboard = Some(view);
            }
            Err(e) => self.fail(user_message_from_pairing(&e)),
        }
    }

    fn export(&mut self, dir: &Path) {
        let Some(view) = &self.dashboard else {
            return;
        };
        self.status = Some(
            match chart_export::export_dashboard_charts(dir, view, &self.theme) {
                Ok(files) if files.is_empty() => "Nothing to export".to_string(),
                Ok(files) => format!("Exported {} chart(s) to {}", files.len(), dir.display()),
                Err(e) => format!("Export failed: {}", user_message_from_report(&e)),
            },
        );
    }

    fn wine_option_count(&self) -> usize {
        self.dashboard
            .as_ref()
            .map(|v| v.wine_options.len())
            .unwrap_or(0)
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Exit);
        }
        if self.fatal.is_some() {
            return match event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Exit),
                _ => None,
            };
        }
        self.status = None;

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Exit),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                None
            }
            KeyCode::Char('1') => Some(AppEvent::Navigate(NavState::Overview)),
            KeyCode::Char('2') => Some(AppEvent::Navigate(NavState::PairingExplorer)),
            KeyCode::Char('a') => Some(AppEvent::Select(WineFilter::All)),
            KeyCode::Char('e') => Some(AppEvent::ExportCharts(self.export_dir.clone())),
            KeyCode::Char('r') => Some(AppEvent::Reload),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.apply_cursor(),
            _ => None,
        }
    }

    fn move_cursor(&mut self, delta: isize) -> Option<AppEvent> {
        match self.focus {
            SidebarFocus::Navigation => {
                let count = NavState::ALL.len() as isize;
                let idx = (self.nav.index() as isize + delta).rem_euclid(count);
                Some(AppEvent::Navigate(NavState::from_index(idx as usize)))
            }
            SidebarFocus::Filter => {
                let count = self.wine_option_count();
                if count > 0 {
                    let idx = (self.filter_cursor as isize + delta).clamp(0, count as isize - 1);
                    self.filter_cursor = idx as usize;
                }
                None
            }
        }
    }

    fn apply_cursor(&mut self) -> Option<AppEvent> {
        if self.focus != SidebarFocus::Filter {
            return None;
        }
        let view = self.dashboard.as_ref()?;
        let label = view.wine_options.get(self.filter_cursor)?;
        let domain = &view.wine_options[1..];
        WineFilter::parse(label, domain).map(AppEvent::Select)
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open(path, options) => {
                info!(path = %path.display(), "opening dataset");
                self.open(path.clone(), options.clone())
            }
            AppEvent::Reload => {
                let path = self.path.clone()?;
                self.open(path, self.open_options.clone())
            }
            AppEvent::Navigate(nav) => {
                self.nav = *nav;
                Some(AppEvent::Update)
            }
            AppEvent::Select(filter) => {
                info!(selection = filter.label(), "wine filter changed");
                self.selection = filter.clone();
                Some(AppEvent::Update)
            }
            AppEvent::ExportCharts(dir) => {
                self.export(dir);
                None
            }
            AppEvent::Update => {
                self.refresh();
                None
            }
            AppEvent::Resize(_, _) => None,
            AppEvent::Exit => None,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        use crate::render::dashboard_panel::render_dashboard;
        use crate::render::error_page::render_error_page;
        use crate::render::layout::app_layout;

        Clear.render(area, buf);

        if let Some(message) = &self.fatal {
            render_error_page(area, buf, message, &self.theme);
            return;
        }

        let layout = app_layout(area);
        let (wine_options, total) = match &self.dashboard {
            Some(view) => (view.wine_options.as_slice(), Some(view.total_count)),
            None => (&[][..], None),
        };
        let applied = wine_options
            .iter()
            .position(|w| w == self.selection.label())
            .unwrap_or(0);

        Sidebar {
            nav: self.nav,
            wine_options,
            cursor: self.filter_cursor,
            applied,
            focus: self.focus,
            theme: &self.theme,
        }
        .render(layout.sidebar, buf);

        let main = layout.main_view.inner(Margin {
            horizontal: 1,
            vertical: 0,
        });
        match &self.dashboard {
            Some(view) => render_dashboard(main, buf, view, self.options.top_n, &self.theme),
            None => Paragraph::new("Loading…")
                .style(Style::default().fg(self.theme.get("dimmed")))
                .render(main, buf),
        }

        let mut controls = Controls::new()
            .with_status(self.status.clone())
            .with_background(self.theme.get("controls_bg"));
        if let Some(total) = total {
            controls = controls.with_row_count(total);
        }
        (&controls).render(layout.control_bar, buf);
    }
}

/// Load, select and aggregate in one pass for the non-interactive modes.
pub fn dashboard_for_args(args: &Args, config: &AppConfig) -> PairingResult<DashboardView> {
    let path = loader::data_path(args, config);
    let dataset = loader::load(&path, &OpenOptions::from_args_and_config(args, config))?;
    let selection = match &args.wine {
        Some(wine) => dataset.resolve_selection(wine)?,
        None => WineFilter::All,
    };
    let nav = args.view.map(NavState::from).unwrap_or(NavState::Overview);
    dashboard::render(
        &dataset,
        &selection,
        nav,
        DashboardOptions::from_args_and_config(args, config),
    )
}
