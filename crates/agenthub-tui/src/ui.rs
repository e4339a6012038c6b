use agenthub_session::SessionView;
use agenthub_types::{Agent, AgentClassifier, AgentStatus, AgentType, Locale, Market, MarketStatus};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::app::{App, Tab};

fn tr(locale: Locale, zh: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Zh => zh,
        Locale::En => en,
    }
}

fn type_color(agent_type: &AgentType) -> Color {
    let (r, g, b) = AgentClassifier::color(agent_type).rgb();
    Color::Rgb(r, g, b)
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Running => Color::Green,
        AgentStatus::Idle => Color::Gray,
        AgentStatus::Paused => Color::Yellow,
        AgentStatus::Error => Color::Red,
        AgentStatus::Unknown => Color::DarkGray,
    }
}

/// Rows in the list shown by `tab`
pub fn row_count(view: &SessionView, tab: Tab) -> usize {
    match tab {
        Tab::Agents => view.status.as_ref().map(|s| s.agents().count()).unwrap_or(0),
        Tab::Markets => view.markets.len(),
        Tab::Log => view.log.len(),
    }
}

pub fn draw(frame: &mut Frame<'_>, view: &SessionView, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, vertical[0], view);
    render_tabs(frame, vertical[1], view.locale, app.tab);
    match app.tab {
        Tab::Agents => render_agents(frame, vertical[2], view, app.selected()),
        Tab::Markets => render_markets(frame, vertical[2], view, app.selected()),
        Tab::Log => render_log(frame, vertical[2], view, app.selected()),
    }
    render_footer(frame, vertical[3], view.locale, app.hint.as_deref());
}

fn render_header(frame: &mut Frame<'_>, area: Rect, view: &SessionView) {
    let locale = view.locale;
    let mut spans = vec![Span::styled(
        concat!(" AgentHub v", env!("CARGO_PKG_VERSION"), " "),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    match &view.status {
        Some(status) => {
            let (state, color) = if status.running {
                (tr(locale, "运行中", "running"), Color::Green)
            } else {
                (tr(locale, "已停止", "stopped"), Color::Red)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(state, Style::default().fg(color)));
            spans.push(Span::raw(format!(
                " | {} {} | {} {} | {} {} | {} {}",
                tr(locale, "周期", "cycle"),
                status.cycle_count,
                tr(locale, "市场", "markets"),
                status.market_count,
                tr(locale, "智能体", "agents"),
                status.total_agents(),
                tr(locale, "队列", "queue"),
                status.message_queue_size,
            )));
        }
        None => spans.push(Span::styled(
            tr(locale, " 正在连接后端...", " waiting for backend..."),
            Style::default().fg(Color::DarkGray),
        )),
    }

    spans.push(Span::raw("   "));
    if view.is_busy() {
        spans.push(Span::styled(
            tr(locale, "⏳ 周期运行中...", "⏳ running cycle..."),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            tr(locale, "▶ [c] 运行周期", "▶ [c] run cycle"),
            Style::default().fg(Color::Green),
        ));
    }
    if !view.polling {
        spans.push(Span::styled(
            tr(locale, "  (轮询已停止)", "  (polling stopped)"),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, locale: Locale, active: Tab) {
    let titles = Tab::ALL.iter().map(|tab| match tab {
        Tab::Agents => tr(locale, "智能体", "Agents"),
        Tab::Markets => tr(locale, "市场", "Markets"),
        Tab::Log => tr(locale, "日志", "Log"),
    });
    let tabs = Tabs::new(titles)
        .select(active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, area);
}

fn render_agents(frame: &mut Frame<'_>, area: Rect, view: &SessionView, selected: usize) {
    let locale = view.locale;
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    let agents: Vec<(&AgentType, &Agent)> = view
        .status
        .as_ref()
        .map(|status| status.agents().collect())
        .unwrap_or_default();

    let items: Vec<ListItem<'_>> = agents
        .iter()
        .map(|(agent_type, agent)| {
            let label = AgentClassifier::label(agent_type, locale);
            let glyph = AgentClassifier::icon(agent_type).glyph();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} {:<10}", glyph, label),
                    Style::default().fg(type_color(agent_type)),
                ),
                Span::styled(
                    format!(" {} ", agent.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    AgentClassifier::status_label(agent.status, locale),
                    Style::default().fg(status_color(agent.status)),
                ),
                Span::raw(format!(
                    " | {} {}",
                    tr(locale, "动作", "actions"),
                    agent.performance.total_actions
                )),
            ]))
        })
        .collect();

    let title = format!(
        "{} ({})",
        tr(locale, "智能体", "Agents"),
        view.status.as_ref().map(|s| s.total_agents()).unwrap_or(0)
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected((!agents.is_empty()).then_some(selected));
    frame.render_stateful_widget(list, split[0], &mut state);

    let details = match agents.get(selected) {
        Some((agent_type, agent)) => agent_details(agent_type, agent, locale),
        None if view.status.is_none() => tr(locale, "等待状态...", "Waiting for status...").to_string(),
        None => tr(locale, "暂无智能体", "No agents").to_string(),
    };
    frame.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(tr(locale, "详情", "Detail"))),
        split[1],
    );
}

fn agent_details(agent_type: &AgentType, agent: &Agent, locale: Locale) -> String {
    let perf = &agent.performance;
    let rate = perf
        .success_rate()
        .map(|rate| format!("{:.1}%", rate * 100.0))
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        agent.name.clone(),
        format!(
            "{}: {} ({})",
            tr(locale, "类型", "type"),
            AgentClassifier::label(agent_type, locale),
            agent_type
        ),
        format!(
            "{}: {}",
            tr(locale, "状态", "status"),
            AgentClassifier::status_label(agent.status, locale)
        ),
        format!(
            "{}: {} / {} / {}",
            tr(locale, "动作 总/成功/失败", "actions total/ok/failed"),
            perf.total_actions,
            perf.successful_actions,
            perf.failed_actions
        ),
        format!("{}: {}", tr(locale, "成功率", "success rate"), rate),
        format!("{}: {:.2}", tr(locale, "收益", "profit"), perf.total_profit),
    ];
    if let Some(memory) = agent.memory_size {
        lines.push(format!("{}: {}", tr(locale, "记忆", "memory"), memory));
    }
    lines.push(format!(
        "{}: {}",
        tr(locale, "最近动作", "recent actions"),
        agent.recent_actions.len()
    ));
    if !agent.description.is_empty() {
        lines.push(String::new());
        lines.push(agent.description.clone());
    }
    lines.join("\n")
}

fn render_markets(frame: &mut Frame<'_>, area: Rect, view: &SessionView, selected: usize) {
    let locale = view.locale;
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    let items: Vec<ListItem<'_>> = view
        .markets
        .iter()
        .map(|market| {
            let status_style = match market.status {
                MarketStatus::Active => Style::default().fg(Color::Green),
                MarketStatus::Pending => Style::default().fg(Color::Yellow),
                MarketStatus::Other => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8}", AgentClassifier::market_status_label(market.status, locale)),
                    status_style,
                ),
                Span::styled(
                    market.market_title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " | {} | {:.0}%",
                    market.category,
                    market.probability_percent()
                )),
            ]))
        })
        .collect();

    let title = format!("{} ({})", tr(locale, "市场", "Markets"), view.markets.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state =
        ListState::default().with_selected((!view.markets.is_empty()).then_some(selected));
    frame.render_stateful_widget(list, split[0], &mut state);

    let details = view
        .markets
        .get(selected)
        .map(|market| market_details(market, locale))
        .unwrap_or_else(|| tr(locale, "暂无市场", "No markets yet").to_string());
    frame.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(tr(locale, "详情", "Detail"))),
        split[1],
    );
}

fn market_details(market: &Market, locale: Locale) -> String {
    let mut lines = vec![
        market.market_title.clone(),
        format!("id: {}", market.id),
        format!("{}: {}", tr(locale, "分类", "category"), market.category),
        format!(
            "{}: {:.1}%",
            tr(locale, "初始概率", "initial probability"),
            market.probability_percent()
        ),
        format!(
            "{}: {}",
            tr(locale, "初始流动性", "initial liquidity"),
            market
                .initial_liquidity
                .map(|l| format!("{:.2}", l))
                .unwrap_or_else(|| "-".to_string())
        ),
        format!("{}: {:.2}%", tr(locale, "手续费", "trading fee"), market.fee_percent()),
        format!("{}: {}", tr(locale, "结果", "outcomes"), market.outcomes.join(" / ")),
    ];
    if let Some(creator) = &market.creator {
        lines.push(format!("{}: {}", tr(locale, "创建者", "creator"), creator));
    }
    if let Some(created_at) = &market.created_at {
        lines.push(format!("{}: {}", tr(locale, "创建时间", "created"), created_at));
    }
    if !market.description.is_empty() {
        lines.push(String::new());
        lines.push(market.description.clone());
    }
    lines.join("\n")
}

fn render_log(frame: &mut Frame<'_>, area: Rect, view: &SessionView, selected: usize) {
    let locale = view.locale;
    let items: Vec<ListItem<'_>> = view
        .log
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.timestamp()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(entry.message()),
            ]))
        })
        .collect();

    let title = format!("{} ({})", tr(locale, "运行日志", "Run log"), view.log.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected((!view.log.is_empty()).then_some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, locale: Locale, hint: Option<&str>) {
    let keys = tr(
        locale,
        "c 运行周期 | 1-6 单阶段 | Tab/←/→ 切换 | ↑/↓ 选择 | r 刷新市场 | q 退出",
        "c run cycle | 1-6 run phase | Tab/←/→ switch | ↑/↓ select | r refresh markets | q quit",
    );
    let text = match hint {
        Some(hint) => format!("{}   {}", keys, hint),
        None => keys.to_string(),
    };
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(tr(locale, "快捷键", "Hotkeys")),
        ),
        area,
    );
}
