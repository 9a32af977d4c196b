use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset as ChartDataset, Gauge,
    GraphType, Paragraph,
};

use scout_terminal::cohort::{CohortFilter, REFERENCE_COMPETITIONS, select_cohort};
use scout_terminal::dataset::load_bundle;
use scout_terminal::export;
use scout_terminal::percentile::ordinal_rank;
use scout_terminal::persist;
use scout_terminal::position::PositionGroup;
use scout_terminal::rankings::{LeaderboardEntry, build_radar, compute_leaderboard};
use scout_terminal::record::{PlayerRecord, dataset_label};
use scout_terminal::scatter::{MAX_LABELS, build_scatter};
use scout_terminal::score_index::composite_index;
use scout_terminal::state::{AppState, Screen};
use scout_terminal::thresholds::{index_kinds_for, index_label};

struct App {
    state: AppState,
    rng: StdRng,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            rng: StdRng::from_entropy(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay && key.code != KeyCode::Char('?') {
            self.state.help_overlay = false;
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Players,
            KeyCode::Char('2') => self.state.screen = Screen::Scatter,
            KeyCode::Char('3') => self.state.screen = Screen::Rankings,
            KeyCode::Enter => {
                if self.state.selected_record().is_some() {
                    self.state.screen = Screen::PlayerDetail;
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Players,
            KeyCode::Char('j') | KeyCode::Down => match self.state.screen {
                Screen::Rankings => self.state.rankings_selected += 1,
                _ => self.state.select_next(),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.state.screen {
                Screen::Rankings => {
                    self.state.rankings_selected = self.state.rankings_selected.saturating_sub(1);
                }
                _ => self.state.select_prev(),
            },
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('d') => {
                self.state.cycle_dataset();
                let label = dataset_label(self.state.dataset_kind);
                self.state.push_log(format!("[INFO] Dataset: {label}"));
            }
            KeyCode::Char('p') => self.state.cycle_position_filter(),
            KeyCode::Char('c') => self.state.cycle_competition_filter(),
            KeyCode::Char('n') => self.state.cycle_season_filter(),
            KeyCode::Char('m') => self.state.cycle_minutes(),
            KeyCode::Char('a') => self.state.cycle_age(),
            KeyCode::Char('x') => self.state.cycle_x_metric(),
            KeyCode::Char('y') => self.state.cycle_y_metric(),
            KeyCode::Char('h') => self.state.toggle_highlight(),
            KeyCode::Char('H') => self.state.toggle_pin(),
            KeyCode::Char('r') => self.state.cycle_rankings_position(),
            KeyCode::Char('i') => self.state.cycle_rankings_index(),
            KeyCode::Char('e') => self.export_current_view(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn export_current_view(&mut self) {
        let indices = self.state.filtered_indices();
        let leaderboard = self.current_leaderboard().unwrap_or_default();

        let xlsx = PathBuf::from("scout_export.xlsx");
        let result = export::export_workbook(&xlsx, self.state.active(), &indices, &leaderboard);
        match result {
            Ok(report) => {
                self.state.push_log(format!(
                    "[INFO] Exported {} players, {} ranked rows to {}",
                    report.player_rows,
                    report.ranking_rows,
                    xlsx.display()
                ));
                for err in report.errors {
                    self.state.push_log(format!("[WARN] Export: {err}"));
                }
            }
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }

        let csv_path = PathBuf::from("scout_players.csv");
        let result = export::export_players_csv(&csv_path, self.state.active(), &indices);
        match result {
            Ok(rows) => self
                .state
                .push_log(format!("[INFO] Wrote {rows} rows to {}", csv_path.display())),
            Err(err) => self.state.push_log(format!("[WARN] CSV export failed: {err:#}")),
        }
    }

    fn current_leaderboard(&self) -> Option<Vec<LeaderboardEntry>> {
        let season = self.state.rankings_season()?;
        let competitions: Vec<String> = REFERENCE_COMPETITIONS
            .iter()
            .map(|c| c.to_string())
            .collect();
        compute_leaderboard(
            &self.state.scoring,
            &self.state.catalog,
            self.state.active(),
            self.state.rankings_position,
            &season,
            &competitions,
            self.state.min_minutes(),
            self.state.rankings_index_kind(),
        )
        .ok()
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let bundle = load_bundle()?;
    let mut state = AppState::new(bundle);
    persist::load_into_state(&mut state);
    state.push_log("[INFO] Datasets loaded");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    persist::save_from_state(&app.state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(6),
        ])
        .split(frame.size());

    render_filter_bar(frame, rows[0], &app.state);

    match app.state.screen {
        Screen::Players => render_players(frame, rows[1], &app.state),
        Screen::Scatter => render_scatter(frame, rows[1], app),
        Screen::PlayerDetail => render_player_detail(frame, rows[1], &app.state),
        Screen::Rankings => render_rankings(frame, rows[1], app),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[2]);

    if app.state.help_overlay {
        render_help(frame);
    }
}

fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let position = state
        .position_filter
        .map(|p| p.physical_label())
        .unwrap_or("All positions");
    let competition = state.competition_filter.as_deref().unwrap_or("All competitions");
    let season = state.season_filter.as_deref().unwrap_or("All seasons");
    let minutes = state
        .min_minutes()
        .map(|m| format!(">= {m:.0} min"))
        .unwrap_or_else(|| "Any minutes".to_string());

    let line = format!(
        "[{}] {position} | {competition} | {season} | {} | {minutes} | {} filtered",
        dataset_label(state.dataset_kind),
        state.age_label(),
        state.filtered_indices().len(),
    );
    let bar = Paragraph::new(line).block(
        Block::default()
            .title("Scout Terminal  (? for help)")
            .borders(Borders::ALL),
    );
    frame.render_widget(bar, area);
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let dataset = state.active();
    let indices = state.filtered_indices();
    if indices.is_empty() {
        let empty = Paragraph::new("No players match the current filters")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Players").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let start = state.selected.saturating_sub(visible.saturating_sub(1));
    let mut lines = Vec::new();
    for (row, idx) in indices.iter().enumerate().skip(start).take(visible) {
        let rec = &dataset.rows[*idx];
        let prefix = if row == state.selected { "> " } else { "  " };
        let mark = if state.highlights.contains(rec.display_name()) {
            "*"
        } else if state.pinned.iter().any(|p| p == rec.display_name()) {
            "+"
        } else {
            " "
        };
        lines.push(format!(
            "{prefix}{mark} {:<24} {:<20} {:<16} {:>3} {:>6}  {}",
            truncate(rec.display_name(), 24),
            truncate(&rec.team, 20),
            truncate(&rec.competition, 16),
            rec.age.map(|a| a.to_string()).unwrap_or_else(|| "—".to_string()),
            rec.minutes
                .map(|m| format!("{m:.0}"))
                .unwrap_or_else(|| "—".to_string()),
            rec.position_label,
        ));
    }

    let list = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .title(format!("Players ({})", indices.len()))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, app: &mut App) {
    let state = &app.state;
    let dataset = state.active();
    let (Some(x_metric), Some(y_metric)) = (state.x_metric_name(), state.y_metric_name()) else {
        let empty = Paragraph::new("This dataset exposes no metric columns")
            .block(Block::default().title("Scatter").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };
    let x_metric = x_metric.to_string();
    let y_metric = y_metric.to_string();

    let indices = state.filtered_indices();
    let records: Vec<&PlayerRecord> = indices.iter().map(|i| &dataset.rows[*i]).collect();

    let data = match build_scatter(
        &state.catalog,
        &dataset.columns,
        &records,
        &x_metric,
        &y_metric,
        &state.highlights,
        &mut app.rng,
    ) {
        Ok(data) => data,
        Err(err) => {
            let msg = Paragraph::new(format!("{err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("Scatter").borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }
    };

    if data.points.is_empty() {
        let empty = Paragraph::new("No rows carry both selected metrics")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Scatter").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let base: Vec<(f64, f64)> = data
        .points
        .iter()
        .filter(|p| !p.highlighted)
        .map(|p| (p.x, p.y))
        .collect();
    let marked: Vec<(f64, f64)> = data
        .points
        .iter()
        .filter(|p| p.highlighted)
        .map(|p| (p.x, p.y))
        .collect();

    let (x_lo, x_hi) = padded_bounds(data.points.iter().map(|p| p.x));
    let (y_lo, y_hi) = padded_bounds(data.points.iter().map(|p| p.y));

    // Mean reference lines, drawn as dense point runs.
    let mean_v: Vec<(f64, f64)> = steps(y_lo, y_hi).map(|y| (data.mean_x, y)).collect();
    let mean_h: Vec<(f64, f64)> = steps(x_lo, x_hi).map(|x| (x, data.mean_y)).collect();

    let datasets = vec![
        ChartDataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&mean_v),
        ChartDataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&mean_h),
        ChartDataset::default()
            .name("players")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Blue))
            .data(&base),
        ChartDataset::default()
            .name("highlighted")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&marked),
    ];

    let title = format!(
        "{} vs {} — {} points (labels capped at {MAX_LABELS})",
        data.x_column,
        data.y_column,
        data.points.len()
    );
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(data.x_column.clone())
                .bounds([x_lo, x_hi])
                .labels(vec![
                    Span::raw(format!("{x_lo:.1}")),
                    Span::raw(format!("{:.1}", data.mean_x)),
                    Span::raw(format!("{x_hi:.1}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(data.y_column.clone())
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::raw(format!("{y_lo:.1}")),
                    Span::raw(format!("{:.1}", data.mean_y)),
                    Span::raw(format!("{y_hi:.1}")),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(record) = state.selected_record() else {
        let empty = Paragraph::new("No player selected")
            .block(Block::default().title("Player").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };
    let Some(position) = record.position else {
        let msg = Paragraph::new(format!(
            "No position group for `{}` — cannot score or rank",
            record.position_label
        ))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("Player").borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    };

    let dataset = state.active();
    let competitions: Vec<String> = REFERENCE_COMPETITIONS
        .iter()
        .map(|c| c.to_string())
        .collect();
    let cohort_filter = CohortFilter {
        position,
        season: &record.season,
        competitions: &competitions,
        min_minutes: state.min_minutes(),
    };
    let cohort = select_cohort(&dataset.rows, &cohort_filter);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(area);

    render_detail_identity(frame, columns[0], state, record, position, cohort.len());
    render_detail_radar(frame, columns[1], state, record, position, &cohort);
}

fn render_detail_identity(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    record: &PlayerRecord,
    position: PositionGroup,
    cohort_size: usize,
) {
    let block = Block::default()
        .title(record.display_name().to_string())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let kinds = index_kinds_for(position);
    let mut constraints = vec![Constraint::Length(7)];
    constraints.extend(kinds.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let id_text = vec![
        format!("Team: {}", record.team),
        format!("Season: {}  {}", record.season, record.competition),
        format!("Position: {}", position.physical_label()),
        format!(
            "Age: {}  Minutes: {}",
            record.age.map(|a| a.to_string()).unwrap_or_else(|| "—".to_string()),
            record
                .minutes
                .map(|m| format!("{m:.0}"))
                .unwrap_or_else(|| "—".to_string()),
        ),
        format!("Peers: {cohort_size}"),
        export::transfermarkt_search_url(record.display_name()),
    ];
    frame.render_widget(Paragraph::new(id_text.join("\n")), slots[0]);

    let dataset = state.active();
    for (i, kind) in kinds.iter().enumerate() {
        match composite_index(
            &state.scoring,
            &state.catalog,
            &dataset.columns,
            record,
            *kind,
            position,
        ) {
            Ok(breakdown) => {
                let gauge = Gauge::default()
                    .block(Block::default().title(format!(
                        "{} {}/{}",
                        index_label(*kind),
                        breakdown.total,
                        breakdown.max
                    )))
                    .gauge_style(Style::default().fg(Color::Cyan))
                    .percent(breakdown.index.min(100) as u16);
                frame.render_widget(gauge, slots[i + 1]);
            }
            Err(err) => {
                let msg = Paragraph::new(format!("{err}")).style(Style::default().fg(Color::Red));
                frame.render_widget(msg, slots[i + 1]);
            }
        }
    }
}

fn render_detail_radar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    record: &PlayerRecord,
    position: PositionGroup,
    cohort: &[&PlayerRecord],
) {
    let dataset = state.active();
    let metrics = radar_metrics(state, position);
    let axes = build_radar(&state.catalog, &dataset.columns, cohort, record, &metrics);

    let rank_line = axes
        .iter()
        .find_map(|axis| {
            let column = state.catalog.resolve(&dataset.columns, &axis.metric).ok()?;
            ordinal_rank(cohort, column, record)
                .map(|(rank, of)| format!("{}: rank {rank}/{of}", axis.metric))
        })
        .unwrap_or_else(|| "rank —".to_string());

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(rank_line), sections[0]);

    let bars: Vec<Bar> = axes
        .iter()
        .map(|axis| {
            let pct = axis.percentile.map(|p| p.round() as u64);
            Bar::default()
                .label(Line::from(short_label(&axis.metric)))
                .value(pct.unwrap_or(0))
                .text_value(match (pct, axis.value) {
                    (Some(p), _) => format!("{p}"),
                    (None, _) => "NA".to_string(),
                })
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Percentile vs peers")
                .borders(Borders::ALL),
        )
        .bar_width(7)
        .bar_gap(1)
        .max(100)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, sections[1]);
}

fn radar_metrics(state: &AppState, position: PositionGroup) -> Vec<String> {
    let mut metrics: Vec<String> = Vec::new();
    for kind in index_kinds_for(position) {
        if let Ok(group) = state.scoring.group(*kind, position) {
            for metric in group {
                if !metrics.contains(metric) {
                    metrics.push(metric.clone());
                }
            }
        }
    }
    metrics.truncate(10);
    metrics
}

fn render_rankings(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let title = format!(
        "Rankings — {} by {} (r: position, i: index)",
        state.rankings_position.physical_label(),
        index_label(state.rankings_index_kind()),
    );

    let Some(season) = state.rankings_season() else {
        let empty = Paragraph::new("No seasons in the active dataset")
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let competitions: Vec<String> = REFERENCE_COMPETITIONS
        .iter()
        .map(|c| c.to_string())
        .collect();
    let leaderboard = compute_leaderboard(
        &state.scoring,
        &state.catalog,
        state.active(),
        state.rankings_position,
        &season,
        &competitions,
        state.min_minutes(),
        state.rankings_index_kind(),
    );

    let entries = match leaderboard {
        Ok(entries) => entries,
        Err(err) => {
            let msg = Paragraph::new(format!("{err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }
    };

    if entries.is_empty() {
        let empty = Paragraph::new(format!("No {season} cohort for this position"))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let selected = state.rankings_selected.min(entries.len() - 1);
    let visible = area.height.saturating_sub(2) as usize;
    let start = selected.saturating_sub(visible.saturating_sub(1));
    let mut lines = Vec::new();
    for (row, entry) in entries.iter().enumerate().skip(start).take(visible) {
        let prefix = if row == selected { "> " } else { "  " };
        let indexes = entry
            .indexes
            .iter()
            .map(|(kind, v)| format!("{} {v:>3}", index_label(*kind)))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!(
            "{prefix}{:>3}/{:<3} {:<24} {:<18} {indexes}",
            entry.rank,
            entry.of,
            truncate(&entry.display_name, 24),
            truncate(&entry.team, 18),
        ));
    }

    let list = Paragraph::new(lines.join("\n"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_help(frame: &mut Frame) {
    let text = "\
1/2/3   Players / Scatter / Rankings
Enter   Player detail     b/Esc  back
j/k     move selection    s      cycle sort
d       cycle dataset     p      cycle position filter
c       competition       n      season
m       minutes floor     a      age bracket
x/y     scatter axes      h/H    highlight / pin player
e       export xlsx+csv   q      quit";

    let area = centered_rect(52, 12, frame.size());
    frame.render_widget(Clear, area);
    let help = Paragraph::new(text).block(Block::default().title("Keys").borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn console_text(state: &AppState) -> String {
    if state.log.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.log.len().saturating_sub(4);
    state
        .log
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}

fn steps(lo: f64, hi: f64) -> impl Iterator<Item = f64> {
    const N: usize = 48;
    let span = hi - lo;
    (0..=N).map(move |i| lo + span * (i as f64) / (N as f64))
}

/// Compact axis label for bar charts: initials of each word, e.g.
/// "Deep Progressions P90" -> "DPP90".
fn short_label(metric: &str) -> String {
    metric
        .split_whitespace()
        .map(|word| {
            if word.chars().any(|c| c.is_ascii_digit()) {
                word.to_string()
            } else {
                word.chars().take(1).collect()
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
