//! Dashboard state that lives outside the session: active tab, selection,
//! and the transient hint line. Key handling is pure so it can be tested
//! without a terminal.

use agenthub_types::CyclePhase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Agents,
    Markets,
    Log,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Agents, Tab::Markets, Tab::Log];

    pub fn index(self) -> usize {
        match self {
            Self::Agents => 0,
            Self::Markets => 1,
            Self::Log => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the event loop should ask of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    RunCycle,
    RunPhase(CyclePhase),
    RefreshMarkets,
}

#[derive(Debug, Default)]
pub struct App {
    pub tab: Tab,
    pub(crate) selected: [usize; 3],
    pub hint: Option<String>,
}

impl App {
    pub fn selected(&self) -> usize {
        self.selected[self.tab.index()]
    }

    /// Keep the selection inside a list of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        let slot = &mut self.selected[self.tab.index()];
        *slot = (*slot).min(len.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::RunCycle),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::RefreshMarkets),
            KeyCode::Char(digit @ '1'..='6') => {
                let index = digit as usize - '1' as usize;
                Some(Command::RunPhase(CyclePhase::ALL[index]))
            }
            KeyCode::Tab | KeyCode::Right => {
                self.tab = self.tab.next();
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.tab = self.tab.previous();
                None
            }
            KeyCode::Up => {
                let slot = &mut self.selected[self.tab.index()];
                *slot = slot.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.selected[self.tab.index()] += 1;
                None
            }
            _ => None,
        }
    }
}
