//! Display utilities for the CLI

use agenthub_session::LogEntry;
use agenthub_types::{AgentClassifier, AgentStatus, Locale, Market, MarketStatus, SystemStatus};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

fn tr(locale: Locale, zh: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Zh => zh,
        Locale::En => en,
    }
}

fn status_dot(status: AgentStatus) -> ColoredString {
    match status {
        AgentStatus::Running => "●".bright_green(),
        AgentStatus::Idle => "○".bright_black(),
        AgentStatus::Paused => "◐".yellow(),
        AgentStatus::Error => "●".bright_red(),
        AgentStatus::Unknown => "?".bright_black(),
    }
}

pub fn print_status(status: &SystemStatus, locale: Locale) {
    section(tr(locale, "系统状态", "System Status"));

    let running = if status.running {
        format!("● {}", tr(locale, "运行中", "running")).bright_green()
    } else {
        format!("○ {}", tr(locale, "已停止", "stopped")).bright_red()
    };
    println!("  {}: {}", tr(locale, "模拟", "Simulation").bright_white(), running);
    labeled(tr(locale, "周期", "Cycle"), &status.cycle_count.to_string());
    labeled(tr(locale, "市场", "Markets"), &status.market_count.to_string());
    labeled(tr(locale, "消息队列", "Message queue"), &status.message_queue_size.to_string());

    println!();
    println!(
        "{} ({})",
        tr(locale, "智能体", "Agents").bright_white().bold(),
        status.total_agents()
    );
    for (agent_type, count) in &status.agent_counts {
        let (r, g, b) = AgentClassifier::color(agent_type).rgb();
        let label = AgentClassifier::label(agent_type, locale);
        println!(
            "  {} {:<14} {}",
            AgentClassifier::icon(agent_type).glyph(),
            label.truecolor(r, g, b),
            count.to_string().bright_cyan()
        );
    }

    let mut agents = status.agents().peekable();
    if agents.peek().is_none() {
        return;
    }
    println!();
    for (agent_type, agent) in agents {
        let (r, g, b) = AgentClassifier::color(agent_type).rgb();
        let perf = &agent.performance;
        let rate = perf
            .success_rate()
            .map(|rate| format!("{:.0}%", rate * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {:16} {:12} {:8} {:>5} {}  {:>5} {}",
            status_dot(agent.status),
            agent.name.bright_white(),
            AgentClassifier::label(agent_type, locale).truecolor(r, g, b),
            AgentClassifier::status_label(agent.status, locale),
            perf.total_actions,
            tr(locale, "动作", "actions"),
            rate.bright_green(),
            tr(locale, "成功", "ok"),
        );
    }
}

pub fn print_markets(markets: &[Market], locale: Locale) {
    section(&format!("{} ({})", tr(locale, "市场", "Markets"), markets.len()));

    if markets.is_empty() {
        println!("  {}", tr(locale, "暂无市场", "No markets yet").yellow());
        return;
    }

    for market in markets {
        let status = AgentClassifier::market_status_label(market.status, locale);
        let status = match market.status {
            MarketStatus::Active => status.bright_green(),
            MarketStatus::Pending => status.yellow(),
            MarketStatus::Other => status.bright_black(),
        };
        println!("  {} {}", status, market.market_title.bright_white().bold());
        println!(
            "      {} | {:.0}% | {} {:.1}% | {}",
            market.category.bright_cyan(),
            market.probability_percent(),
            tr(locale, "手续费", "fee"),
            market.fee_percent(),
            market.outcomes.join(" / ")
        );
        if let Some(liquidity) = market.initial_liquidity {
            println!(
                "      {}: {}",
                tr(locale, "流动性", "liquidity"),
                format!("{:.2}", liquidity).bright_green()
            );
        }
    }
}

/// Print the run log oldest first, the order it happened in
pub fn print_log(entries: &[LogEntry]) {
    for entry in entries.iter().rev() {
        println!("  {} {}", format!("[{}]", entry.timestamp()).bright_black(), entry.message());
    }
}
