use crate::{data::datasets::FeedWindow, prelude::HashMap};
use serde::{Deserialize, Serialize};

/// A user trigger that asks for one full redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    ShowHour,
    ShowDay,
    ShowWeek,
    ShowMonth,
}

impl Action {
    /// The four triggers, in display order.
    pub fn all() -> [Action; 4] {
        [Self::ShowHour, Self::ShowDay, Self::ShowWeek, Self::ShowMonth]
    }

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShowHour => "Past Hour",
            Self::ShowDay => "Past Day",
            Self::ShowWeek => "Past 7 Days",
            Self::ShowMonth => "Past 30 Days",
        }
    }
}

/// Dispatch table from trigger to the dataset it shows.
///
/// Keeps UI controls unaware of the render logic: a control only emits an
/// [`Action`], and the table decides which event list the pass draws.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    table: HashMap<Action, FeedWindow>,
}

impl ActionDispatcher {
    /// An empty table; every action is unbound.
    pub fn empty() -> Self {
        Self {
            table: HashMap::default(),
        }
    }

    /// Binds `action` to `window`, returning the previous binding.
    pub fn bind(&mut self, action: Action, window: FeedWindow) -> Option<FeedWindow> {
        self.table.insert(action, window)
    }

    pub fn unbind(&mut self, action: Action) -> Option<FeedWindow> {
        self.table.remove(&action)
    }

    pub fn resolve(&self, action: Action) -> Option<FeedWindow> {
        self.table.get(&action).copied()
    }

    /// Bound actions in display order.
    pub fn actions(&self) -> Vec<Action> {
        Action::all()
            .into_iter()
            .filter(|action| self.table.contains_key(action))
            .collect()
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.bind(Action::ShowHour, FeedWindow::Hour);
        dispatcher.bind(Action::ShowDay, FeedWindow::Day);
        dispatcher.bind(Action::ShowWeek, FeedWindow::Week);
        dispatcher.bind(Action::ShowMonth, FeedWindow::Month);
        dispatcher
    }
}
