//! Run-log lines, per display locale

use agenthub_types::{AgentClassifier, CyclePhase, CycleReport, Locale};

pub(crate) fn cycle_starting(locale: Locale) -> String {
    match locale {
        Locale::Zh => "🚀 开始运行完整周期...".to_string(),
        Locale::En => "🚀 Starting full cycle...".to_string(),
    }
}

pub(crate) fn cycle_completed(locale: Locale, report: &CycleReport) -> String {
    let s = &report.summary;
    let mut line = match locale {
        Locale::Zh => format!(
            "✅ 周期 {} 完成 | 发现: {}, 上架: {}, 审核: {}",
            report.cycle, s.discovery_count, s.listing_count, s.audit_count
        ),
        Locale::En => format!(
            "✅ Cycle {} complete | discovered: {}, listed: {}, audited: {}",
            report.cycle, s.discovery_count, s.listing_count, s.audit_count
        ),
    };

    if let Some((market_making, trading, governance)) = s.later_phases() {
        line.push_str(&match locale {
            Locale::Zh => format!(" | 做市: {}, 交易: {}, 治理: {}", market_making, trading, governance),
            Locale::En => format!(
                " | market making: {}, trading: {}, governance: {}",
                market_making, trading, governance
            ),
        });
    }
    line
}

pub(crate) fn cycle_failed(locale: Locale, reason: &str) -> String {
    match locale {
        Locale::Zh => format!("❌ 运行失败: {}", reason),
        Locale::En => format!("❌ Cycle failed: {}", reason),
    }
}

pub(crate) fn phase_starting(locale: Locale, phase: CyclePhase) -> String {
    let label = AgentClassifier::label(&phase.agent_type(), locale).into_owned();
    match locale {
        Locale::Zh => format!("🚀 开始运行{}阶段...", label),
        Locale::En => format!("🚀 Starting {} phase...", label),
    }
}

pub(crate) fn phase_completed(locale: Locale, phase: CyclePhase, results: usize) -> String {
    let label = AgentClassifier::label(&phase.agent_type(), locale).into_owned();
    match locale {
        Locale::Zh => format!("✅ {}阶段完成, 结果: {}", label, results),
        Locale::En => format!("✅ {} phase complete, results: {}", label, results),
    }
}

pub(crate) fn phase_failed(locale: Locale, phase: CyclePhase, reason: &str) -> String {
    let label = AgentClassifier::label(&phase.agent_type(), locale).into_owned();
    match locale {
        Locale::Zh => format!("❌ {}阶段失败: {}", label, reason),
        Locale::En => format!("❌ {} phase failed: {}", label, reason),
    }
}

pub(crate) fn status_refresh_failed(locale: Locale, reason: &str) -> String {
    match locale {
        Locale::Zh => format!("⚠️ 刷新状态失败: {}", reason),
        Locale::En => format!("⚠️ Status refresh failed: {}", reason),
    }
}

pub(crate) fn markets_refresh_failed(locale: Locale, reason: &str) -> String {
    match locale {
        Locale::Zh => format!("⚠️ 刷新市场失败: {}", reason),
        Locale::En => format!("⚠️ Market refresh failed: {}", reason),
    }
}
