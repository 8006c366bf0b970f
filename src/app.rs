//! Application state and logic.

use std::path::{Path, PathBuf};

use crate::data::PetabDataset;
use crate::error::Result;
use crate::file_browser::FileBrowserState;
use crate::navigator::{LoadReport, NavigatorConfig, PlotGroup, PlotNavigator, SearchState};
use crate::util::layout_config::LayoutConfig;
use crate::util::{self, SeriesPalette, WarningLog};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// How the current plot group is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Raw rows of the group.
    Table,
    /// Every measurement as a point, simulations as lines.
    #[default]
    Series,
    /// Replicate mean with standard deviation bars.
    MeanSd,
    /// Replicate mean with standard error bars.
    MeanSem,
    /// Measured against simulated values.
    Correlation,
}

impl ViewMode {
    /// Get the next view mode in cycle.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Series,
            ViewMode::Series => ViewMode::MeanSd,
            ViewMode::MeanSd => ViewMode::MeanSem,
            ViewMode::MeanSem => ViewMode::Correlation,
            ViewMode::Correlation => ViewMode::Table,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Series => "Series",
            ViewMode::MeanSd => "Mean ± SD",
            ViewMode::MeanSem => "Mean ± SEM",
            ViewMode::Correlation => "Correlation",
        }
    }
}

/// Which table the file browser is picking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserStage {
    /// Picking the measurement table.
    Measurement,
    /// Picking an optional simulation table for the chosen measurement table.
    Simulation(PathBuf),
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Plot groups and cursor.
    pub navigator: PlotNavigator,
    /// Tables behind the current groups.
    pub dataset: Option<PetabDataset>,
    /// Jump-to-plot search.
    pub search: SearchState,
    /// Digits typed for a go-to-page jump.
    pub goto_buffer: Option<String>,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// File browser mode.
    pub file_browser_mode: bool,
    /// What the file browser is selecting.
    pub browser_stage: BrowserStage,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// First visible row of the table view.
    pub table_scroll: usize,
    /// Line colors.
    pub palette: SeriesPalette,
    /// Current theme.
    pub theme: Theme,
    /// Warnings raised while loading.
    pub warnings: WarningLog,
    /// Whether the warning panel is open.
    pub show_warnings: bool,
    /// Status message.
    pub status: String,
    /// Error message from the last failed load.
    pub error_message: Option<String>,
    /// Layout constants for the views.
    pub layout: LayoutConfig,
}

impl App {
    /// Create an application with nothing loaded; the file browser opens.
    pub fn new(config: NavigatorConfig) -> Self {
        let mut app = Self::blank(config);
        app.open_file_browser();
        app
    }

    /// Create an application showing an already-read dataset. The working
    /// directory is not listed until the browser is opened.
    pub fn with_dataset(config: NavigatorConfig, dataset: PetabDataset) -> Result<Self> {
        let mut app = Self::blank(config);
        app.apply_dataset(dataset)?;
        Ok(app)
    }

    fn blank(config: NavigatorConfig) -> Self {
        Self {
            navigator: PlotNavigator::new(config),
            dataset: None,
            search: SearchState::new(),
            goto_buffer: None,
            file_browser: FileBrowserState::new(),
            file_browser_mode: false,
            browser_stage: BrowserStage::Measurement,
            view_mode: ViewMode::default(),
            table_scroll: 0,
            palette: SeriesPalette::default(),
            theme: Theme::GruvboxDark,
            warnings: WarningLog::new(),
            show_warnings: false,
            status: "Ready".to_string(),
            error_message: None,
            layout: LayoutConfig::default(),
        }
    }

    /// Read tables from disk and show them. On failure the previous
    /// dataset stays on screen and the error is reported in the status line.
    pub fn load(&mut self, measurement: &Path, simulation: Option<&Path>) {
        self.status = format!("Loading {}...", measurement.display());

        let result = PetabDataset::load(measurement, simulation).and_then(|ds| self.apply_dataset(ds));
        if let Err(e) = result {
            tracing::error!("Error loading {}: {}", measurement.display(), e);
            self.error_message = Some(e.to_string());
            self.status = format!("Error: {}", e);
        }
    }

    /// Group a dataset and make it current.
    pub fn apply_dataset(&mut self, dataset: PetabDataset) -> Result<()> {
        let previous_id = self.current_group().map(|g| g.plot_id.clone());
        let report = self
            .navigator
            .load(&dataset.measurements, dataset.simulations.as_deref())?;

        // Stay on the same page across reloads when it still exists.
        if let Some(index) = previous_id.and_then(|id| self.navigator.find(&id)) {
            self.navigator.go_to(index)?;
        }

        let headline = format!(
            "{} loaded: {} plots by {}",
            dataset.display_name(),
            report.group_count,
            self.navigator.config().group_by.name()
        );
        self.record_load(report, dataset.simulations.is_some(), headline);

        if let Some(parent) = dataset.measurement_path.parent() {
            self.file_browser.current_dir = parent.to_path_buf();
        }
        self.dataset = Some(dataset);
        self.table_scroll = 0;
        self.error_message = None;
        self.search.cancel();
        self.file_browser_mode = false;
        tracing::info!("Dataset applied");
        Ok(())
    }

    /// Replace the warning log with the warnings of `report` and set the
    /// status line to `headline` plus the number of dropped rows.
    fn record_load(&mut self, report: LoadReport, simulations_loaded: bool, headline: String) {
        self.warnings.clear();
        if !simulations_loaded {
            self.warnings.add("No simulation table loaded (measurements only)");
        }
        for warning in report.warnings {
            self.warnings.add(warning);
        }

        self.status = headline;
        if report.dropped > 0 {
            self.status
                .push_str(&format!(" ({} unmatched simulation rows dropped)", report.dropped));
        }
    }

    /// Group under the cursor, if anything is loaded.
    pub fn current_group(&self) -> Option<&PlotGroup> {
        self.navigator.current_group().ok()
    }

    /// Show the next plot.
    pub fn next_plot(&mut self) {
        let result = self.navigator.next().map(|_| ());
        self.report_navigation(result);
    }

    /// Show the previous plot.
    pub fn previous_plot(&mut self) {
        let result = self.navigator.previous().map(|_| ());
        self.report_navigation(result);
    }

    /// Show the first plot.
    pub fn first_plot(&mut self) {
        let result = self.navigator.go_to_first().map(|_| ());
        self.report_navigation(result);
    }

    /// Show the last plot.
    pub fn last_plot(&mut self) {
        let result = self.navigator.go_to_last().map(|_| ());
        self.report_navigation(result);
    }

    /// Start or extend a go-to-page number.
    pub fn goto_input(&mut self, digit: char) {
        self.goto_buffer.get_or_insert_with(String::new).push(digit);
    }

    /// Remove the last digit of the go-to-page number.
    pub fn goto_backspace(&mut self) {
        if let Some(buffer) = self.goto_buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Abandon the go-to-page number.
    pub fn goto_cancel(&mut self) {
        self.goto_buffer = None;
    }

    /// Jump to the typed page. Pages are shown 1-based.
    pub fn goto_submit(&mut self) {
        let Some(buffer) = self.goto_buffer.take() else {
            return;
        };
        match buffer.parse::<usize>() {
            Ok(page) if page >= 1 => {
                let result = self.navigator.go_to(page - 1).map(|_| ());
                self.report_navigation(result);
            },
            _ => self.status = format!("Invalid page number: '{}'", buffer),
        }
    }

    /// Run the submitted search and jump to its current match.
    pub fn search_submit(&mut self) {
        self.search.submit();
        self.search.perform_search(self.navigator.groups());
        self.jump_to_match();
    }

    /// Jump to the next search match.
    pub fn search_next(&mut self) {
        self.search.next_match();
        self.jump_to_match();
    }

    /// Jump to the previous search match.
    pub fn search_prev(&mut self) {
        self.search.prev_match();
        self.jump_to_match();
    }

    fn jump_to_match(&mut self) {
        match self.search.current_match_index() {
            Some(index) => {
                let result = self.navigator.go_to(index).map(|_| ());
                self.report_navigation(result);
                if self.search.match_count() > 1 {
                    self.status.push_str(&format!(
                        " (match {}/{})",
                        self.search.current_match_position() + 1,
                        self.search.match_count()
                    ));
                }
            },
            None if !self.search.query().is_empty() => {
                self.status = format!("No plot matches '{}'", self.search.query());
            },
            None => {},
        }
    }

    fn report_navigation(&mut self, result: Result<()>) {
        self.table_scroll = 0;
        self.status = match result {
            Ok(()) => match self.navigator.current_group() {
                Ok(group) => format!(
                    "Plot {}/{}: {}",
                    self.navigator.current_index() + 1,
                    self.navigator.group_count(),
                    group.title()
                ),
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };
    }

    /// Regroup the current dataset by the next grouping key. If the data
    /// cannot be grouped that way the previous grouping stays.
    pub fn cycle_group_by(&mut self) {
        let previous = self.navigator.config();
        let mut config = previous;
        config.group_by = previous.group_by.next();
        self.navigator.set_config(config);

        let Some(dataset) = self.dataset.as_ref() else {
            self.status = format!("Group by: {}", config.group_by.name());
            return;
        };

        match self
            .navigator
            .load(&dataset.measurements, dataset.simulations.as_deref())
        {
            Ok(report) => {
                let simulations_loaded = dataset.simulations.is_some();
                let headline = format!("Grouped by {}: {} plots", config.group_by.name(), report.group_count);
                self.search.cancel();
                self.table_scroll = 0;
                self.record_load(report, simulations_loaded, headline);
            },
            Err(e) => {
                self.navigator.set_config(previous);
                self.status = format!("Cannot group by {}: {}", config.group_by.name(), e);
            },
        }
    }

    /// Cycle the view mode.
    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
        self.status = format!("View: {}", self.view_mode.name());
    }

    /// Scroll the table view down, stopping at the last row.
    pub fn scroll_table_down(&mut self, amount: usize) {
        let rows = self.current_group().map(|g| g.len()).unwrap_or(0);
        self.table_scroll = (self.table_scroll + amount).min(rows.saturating_sub(1));
    }

    /// Scroll the table view up.
    pub fn scroll_table_up(&mut self, amount: usize) {
        self.table_scroll = self.table_scroll.saturating_sub(amount);
    }

    /// Cycle the line palette.
    pub fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.status = format!("Palette: {}", self.palette.name());
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Toggle the warning panel.
    pub fn toggle_warnings(&mut self) {
        self.show_warnings = !self.show_warnings;
    }

    /// Copy the current group to the clipboard.
    pub fn copy_current(&mut self) {
        let Some(group) = self.current_group() else {
            self.status = "No plot loaded".to_string();
            return;
        };
        let title = group.title();
        self.status = match util::copy_group(group) {
            Ok(()) => format!("Copied {}!", title),
            Err(e) => format!("Copy failed: {}", e),
        };
    }

    /// Open the file browser to pick a new measurement table.
    pub fn open_file_browser(&mut self) {
        self.browser_stage = BrowserStage::Measurement;
        self.file_browser.load_directory();
        self.file_browser_mode = true;
        self.status = "Select a measurement table".to_string();
    }

    /// Close the file browser. In the simulation stage this loads the
    /// chosen measurement table without simulations.
    pub fn browser_cancel(&mut self) {
        match std::mem::replace(&mut self.browser_stage, BrowserStage::Measurement) {
            BrowserStage::Simulation(measurement) => {
                self.load(&measurement, None);
            },
            BrowserStage::Measurement if self.dataset.is_some() => {
                self.file_browser_mode = false;
                self.status = "File browser closed".to_string();
            },
            BrowserStage::Measurement => {},
        }
    }

    /// Enter the selected directory, or take the selected file.
    pub fn browser_select(&mut self) {
        let Some(path) = self.file_browser.select_current() else {
            return;
        };

        match std::mem::replace(&mut self.browser_stage, BrowserStage::Measurement) {
            BrowserStage::Measurement => {
                self.status = format!(
                    "Measurement: {} | select a simulation table or press Esc to skip",
                    path.display()
                );
                self.browser_stage = BrowserStage::Simulation(path);
            },
            BrowserStage::Simulation(measurement) => {
                self.load(&measurement, Some(&path));
            },
        }

        if self.error_message.is_some() {
            self.file_browser_mode = true;
        }
    }

    /// Navigate to parent directory in file browser.
    pub fn browser_parent(&mut self) {
        self.file_browser.go_to_parent();
        self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
    }

    /// Move cursor up in file browser.
    pub fn browser_up(&mut self) {
        self.file_browser.cursor_up();
    }

    /// Move cursor down in file browser.
    pub fn browser_down(&mut self) {
        self.file_browser.cursor_down();
    }

    /// Toggle show hidden files.
    pub fn toggle_hidden(&mut self) {
        self.file_browser.toggle_hidden();
        self.status = format!(
            "Show hidden: {}",
            if self.file_browser.show_hidden {
                "ON"
            } else {
                "OFF"
            }
        );
    }
}
