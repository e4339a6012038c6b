//! Agent classifier - role to color, icon and label
//!
//! Every lookup here is total: the six known roles map to fixed values and
//! anything else gets the documented fallback (gray, generic bot icon, raw
//! role string as label). Nothing in this module can fail.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{AgentStatus, AgentType, MarketStatus, ParseError};

/// Display language for labels.
///
/// Parsed the same way from flags, config files and the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Self::Zh),
            "en" | "en-us" => Ok(Self::En),
            other => Err(ParseError::UnknownLocale(other.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zh => f.write_str("zh"),
            Self::En => f.write_str("en"),
        }
    }
}

/// Palette of role colors, independent of any rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentColor {
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Orange,
    /// Neutral fallback for unrecognized roles
    Gray,
}

impl AgentColor {
    /// 24-bit RGB value of this color
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Green => (0x22, 0xc5, 0x5e),
            Self::Yellow => (0xea, 0xb3, 0x08),
            Self::Purple => (0xa8, 0x55, 0xf7),
            Self::Pink => (0xec, 0x48, 0x99),
            Self::Orange => (0xf9, 0x73, 0x16),
            Self::Gray => (0x6b, 0x72, 0x80),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Icon shown next to an agent role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentIcon {
    Search,
    Plus,
    Shield,
    Activity,
    TrendingUp,
    Gavel,
    /// Generic fallback for unrecognized roles
    Bot,
}

impl AgentIcon {
    /// Single-cell terminal glyph
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Search => "⌕",
            Self::Plus => "+",
            Self::Shield => "⛨",
            Self::Activity => "∿",
            Self::TrendingUp => "↗",
            Self::Gavel => "⚖",
            Self::Bot => "◉",
        }
    }
}

/// Stateless role classifier used by all rendering surfaces
pub struct AgentClassifier;

impl AgentClassifier {
    pub fn color(agent_type: &AgentType) -> AgentColor {
        match agent_type {
            AgentType::Discovery => AgentColor::Blue,
            AgentType::Listing => AgentColor::Green,
            AgentType::Audit => AgentColor::Yellow,
            AgentType::MarketMaker => AgentColor::Purple,
            AgentType::Trading => AgentColor::Pink,
            AgentType::Governance => AgentColor::Orange,
            AgentType::Unknown(_) => AgentColor::Gray,
        }
    }

    pub fn icon(agent_type: &AgentType) -> AgentIcon {
        match agent_type {
            AgentType::Discovery => AgentIcon::Search,
            AgentType::Listing => AgentIcon::Plus,
            AgentType::Audit => AgentIcon::Shield,
            AgentType::MarketMaker => AgentIcon::Activity,
            AgentType::Trading => AgentIcon::TrendingUp,
            AgentType::Governance => AgentIcon::Gavel,
            AgentType::Unknown(_) => AgentIcon::Bot,
        }
    }

    /// Localized display label. Unknown roles echo their raw wire string.
    pub fn label(agent_type: &AgentType, locale: Locale) -> Cow<'_, str> {
        let known = match (agent_type, locale) {
            (AgentType::Discovery, Locale::Zh) => "发现",
            (AgentType::Listing, Locale::Zh) => "上架",
            (AgentType::Audit, Locale::Zh) => "审核",
            (AgentType::MarketMaker, Locale::Zh) => "做市",
            (AgentType::Trading, Locale::Zh) => "交易",
            (AgentType::Governance, Locale::Zh) => "治理",
            (AgentType::Discovery, Locale::En) => "Discovery",
            (AgentType::Listing, Locale::En) => "Listing",
            (AgentType::Audit, Locale::En) => "Audit",
            (AgentType::MarketMaker, Locale::En) => "Market Maker",
            (AgentType::Trading, Locale::En) => "Trading",
            (AgentType::Governance, Locale::En) => "Governance",
            (AgentType::Unknown(raw), _) => return Cow::Borrowed(raw.as_str()),
        };
        Cow::Borrowed(known)
    }

    pub fn status_label(status: AgentStatus, locale: Locale) -> &'static str {
        match (status, locale) {
            (AgentStatus::Idle, Locale::Zh) => "空闲",
            (AgentStatus::Running, Locale::Zh) => "运行中",
            (AgentStatus::Paused, Locale::Zh) => "暂停",
            (AgentStatus::Error, Locale::Zh) => "错误",
            (AgentStatus::Unknown, Locale::Zh) => "未知",
            (AgentStatus::Idle, Locale::En) => "idle",
            (AgentStatus::Running, Locale::En) => "running",
            (AgentStatus::Paused, Locale::En) => "paused",
            (AgentStatus::Error, Locale::En) => "error",
            (AgentStatus::Unknown, Locale::En) => "unknown",
        }
    }

    pub fn market_status_label(status: MarketStatus, locale: Locale) -> &'static str {
        match (status, locale) {
            (MarketStatus::Active, Locale::Zh) => "活跃",
            (MarketStatus::Pending, Locale::Zh) => "待定",
            (MarketStatus::Other, Locale::Zh) => "未知",
            (MarketStatus::Active, Locale::En) => "active",
            (MarketStatus::Pending, Locale::En) => "pending",
            (MarketStatus::Other, Locale::En) => "unknown",
        }
    }
}
