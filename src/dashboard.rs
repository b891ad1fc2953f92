//! An in-memory dashboard that hosts the onboarding flow.
//!
//! The CLI drives onboarding against this host, and the integration tests
//! use it too. It keeps the handful of dashboard states the flow touches
//! (clock, section, theme, search field, toasts) and a fixed anchor layout.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Anchor, Rect, Section, UserRecord, Viewport};
use crate::onboarding::{Host, NoticeLevel};
use crate::tour::AnchorLocator;

const HEADER_HEIGHT: f64 = 64.0;
const SIDEBAR_WIDTH: f64 = 240.0;
const NAV_ITEM_HEIGHT: f64 = 48.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// A toast the dashboard showed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

/// Where each anchor sits on screen.
#[derive(Debug, Clone)]
pub struct AnchorLayout {
    viewport: Viewport,
    anchors: BTreeMap<Anchor, Rect>,
}

impl AnchorLayout {
    /// Header across the top, sidebar down the left, content in the rest.
    pub fn standard(viewport: Viewport) -> Self {
        let w = viewport.width;
        let mut anchors = BTreeMap::new();
        anchors.insert(
            Anchor::GlobalSearch,
            Rect::new(SIDEBAR_WIDTH + 24.0, 12.0, 320.0, 40.0),
        );
        anchors.insert(Anchor::ThemeToggle, Rect::new(w - 120.0, 12.0, 40.0, 40.0));
        anchors.insert(
            Anchor::Dashboard,
            Rect::new(
                SIDEBAR_WIDTH,
                HEADER_HEIGHT,
                w - SIDEBAR_WIDTH,
                viewport.height - HEADER_HEIGHT,
            ),
        );
        anchors.insert(
            Anchor::ClockToggle,
            Rect::new(SIDEBAR_WIDTH + 32.0, HEADER_HEIGHT + 32.0, 200.0, 56.0),
        );
        let mut top = HEADER_HEIGHT + 16.0;
        for section in Section::ALL {
            anchors.insert(
                Anchor::NavLink(section),
                Rect::new(8.0, top, SIDEBAR_WIDTH - 16.0, NAV_ITEM_HEIGHT - 8.0),
            );
            top += NAV_ITEM_HEIGHT;
        }
        Self { viewport, anchors }
    }

    /// An empty layout: nothing is rendered.
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            anchors: BTreeMap::new(),
        }
    }

    /// Stops rendering `anchor`. Returns whether it was on screen.
    pub fn hide(&mut self, anchor: Anchor) -> bool {
        self.anchors.remove(&anchor).is_some()
    }

    pub fn place(&mut self, anchor: Anchor, rect: Rect) {
        self.anchors.insert(anchor, rect);
    }

    pub fn anchors(&self) -> impl Iterator<Item = (Anchor, Rect)> + '_ {
        self.anchors.iter().map(|(a, r)| (*a, *r))
    }
}

/// Dashboard state as the CLI prints it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user: Option<UserRecord>,
    pub clocked_in: bool,
    pub section: Section,
    pub theme: Theme,
    pub search: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    user: Option<UserRecord>,
    clocked_in: bool,
    section: Section,
    theme: Theme,
    search: String,
    search_focused: bool,
    notices: Vec<Notice>,
    layout: AnchorLayout,
}

impl Dashboard {
    pub fn new(layout: AnchorLayout) -> Self {
        Self {
            user: None,
            clocked_in: false,
            section: Section::Dashboard,
            theme: Theme::default(),
            search: String::new(),
            search_focused: false,
            notices: Vec::new(),
            layout,
        }
    }

    pub fn sign_in(&mut self, user: UserRecord) {
        self.user = Some(user);
    }

    /// Drops the user and returns them, so edits can be persisted.
    pub fn sign_out(&mut self) -> Option<UserRecord> {
        self.clocked_in = false;
        self.section = Section::Dashboard;
        self.search.clear();
        self.search_focused = false;
        self.user.take()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_clocked_in(&self) -> bool {
        self.clocked_in
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn layout_mut(&mut self) -> &mut AnchorLayout {
        &mut self.layout
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            user: self.user.clone(),
            clocked_in: self.clocked_in,
            section: self.section,
            theme: self.theme,
            search: self.search.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl AnchorLocator for Dashboard {
    fn locate(&self, anchor: Anchor) -> Option<Rect> {
        self.layout.anchors.get(&anchor).copied()
    }

    fn viewport(&self) -> Viewport {
        self.layout.viewport
    }
}

impl Host for Dashboard {
    fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    fn current_user_mut(&mut self) -> Option<&mut UserRecord> {
        self.user.as_mut()
    }

    fn toggle_clock(&mut self) {
        self.clocked_in = !self.clocked_in;
        tracing::debug!(clocked_in = self.clocked_in, "clock toggled");
    }

    fn navigate_to(&mut self, section: Section) {
        self.section = section;
        tracing::debug!(%section, "navigated");
    }

    fn focus_search(&mut self, text: &str) {
        self.search_focused = true;
        text.clone_into(&mut self.search);
    }

    fn clear_search(&mut self) {
        self.search.clear();
        self.search_focused = false;
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = ?self.theme, "theme toggled");
    }

    fn notify(&mut self, message: &str, level: NoticeLevel) {
        tracing::info!(?level, notice = message, "notice shown");
        self.notices.push(Notice {
            message: message.to_string(),
            level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Role, TooltipPosition};

    fn dashboard() -> Dashboard {
        Dashboard::new(AnchorLayout::standard(Viewport::new(1280.0, 800.0)))
    }

    #[test]
    fn standard_layout_renders_every_anchor_inside_the_viewport() {
        let layout = AnchorLayout::standard(Viewport::new(1280.0, 800.0));
        let anchors: Vec<_> = layout.anchors().collect();
        assert_eq!(anchors.len(), 4 + Section::ALL.len());
        for (anchor, rect) in anchors {
            assert!(rect.left >= 0.0 && rect.right() <= 1280.0, "{anchor}");
            assert!(rect.top >= 0.0 && rect.bottom() <= 800.0, "{anchor}");
        }
    }

    #[test]
    fn hidden_anchors_are_not_located() {
        let mut dash = dashboard();
        assert!(dash.layout_mut().hide(Anchor::GlobalSearch));
        assert!(!dash.layout_mut().hide(Anchor::GlobalSearch));
        assert_eq!(dash.locate(Anchor::GlobalSearch), None);
        assert!(dash.locate(Anchor::ThemeToggle).is_some());
    }

    #[test]
    fn moved_anchor_keeps_its_tooltip_on_screen() {
        let mut dash = dashboard();
        let corner = Rect::new(1250.0, 760.0, 24.0, 24.0);
        dash.layout_mut().place(Anchor::ThemeToggle, corner);
        assert_eq!(dash.locate(Anchor::ThemeToggle), Some(corner));

        let placed = crate::tour::place(corner, TooltipPosition::Bottom, dash.viewport());
        assert_eq!(placed.tooltip.left, 1280.0 - 340.0);
        assert_eq!(placed.tooltip.top, 800.0 - 200.0);
    }

    #[test]
    fn placing_a_hidden_anchor_brings_it_back() {
        let mut dash = dashboard();
        dash.layout_mut().hide(Anchor::GlobalSearch);
        let rect = Rect::new(300.0, 10.0, 200.0, 40.0);
        dash.layout_mut().place(Anchor::GlobalSearch, rect);
        assert_eq!(dash.locate(Anchor::GlobalSearch), Some(rect));
    }

    #[test]
    fn host_actions_change_state() {
        let mut dash = dashboard();
        dash.toggle_clock();
        dash.toggle_theme();
        dash.navigate_to(Section::Reports);
        dash.focus_search("Search demo");
        assert!(dash.is_clocked_in());
        assert_eq!(dash.theme(), Theme::Dark);
        assert_eq!(dash.section(), Section::Reports);
        assert_eq!(dash.search(), "Search demo");
        assert!(dash.is_search_focused());

        dash.clear_search();
        assert_eq!(dash.search(), "");
        assert!(!dash.is_search_focused());
    }

    #[test]
    fn sign_out_hands_back_the_user() {
        let mut dash = dashboard();
        dash.sign_in(UserRecord {
            name: "Lisa Chen".into(),
            role: Role::Employee,
            department: "Sales".into(),
            is_first_login: true,
        });
        dash.clear_first_login();
        let user = dash.sign_out().unwrap();
        assert!(!user.is_first_login);
        assert!(dash.user().is_none());
    }

    #[test]
    fn notices_are_recorded() {
        let mut dash = dashboard();
        dash.notify("hello", NoticeLevel::Success);
        assert_eq!(
            dash.snapshot().notices,
            vec![Notice {
                message: "hello".into(),
                level: NoticeLevel::Success,
            }]
        );
    }
}
