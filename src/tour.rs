//! Guided tour controller.
//!
//! Walks the tour script one stop at a time. Each stop is resolved against
//! the live layout through an [`AnchorLocator`]; stops whose anchor is not on
//! screen are skipped rather than dead-ending the tour. The controller holds
//! the rendered [`StopView`] for the current stop, so a renderer never has to
//! look anything up itself.

mod placement;

use serde::Serialize;

use crate::model::{Anchor, Demo, Point, Rect, TOUR_SCRIPT, TooltipPosition, TourStop, Viewport};

pub use placement::{
    Placement, SPOTLIGHT_MARGIN, TOOLTIP_CLEARANCE_X, TOOLTIP_CLEARANCE_Y, TOOLTIP_GAP,
    VIEWPORT_INSET, place,
};

/// Finds anchors in the host's current layout.
pub trait AnchorLocator {
    /// The anchor's bounding box, or `None` if it is not rendered.
    fn locate(&self, anchor: Anchor) -> Option<Rect>;

    fn viewport(&self) -> Viewport;
}

/// Outcome of moving the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourTransition {
    /// Now showing the stop at this index.
    Shown(usize),
    /// The tour ran off the end of the script.
    Finished,
    /// Not allowed from here; nothing changed.
    Rejected,
}

/// Everything a renderer needs for the current stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopView {
    pub index: usize,
    pub count: usize,
    pub counter: String,
    pub progress_percent: f64,
    pub title: &'static str,
    pub description: &'static str,
    pub position: TooltipPosition,
    /// The anchor carrying the highlight marker.
    pub highlighted: Anchor,
    pub spotlight: Rect,
    pub tooltip: Point,
    pub show_prev: bool,
    pub show_next: bool,
    pub show_try: bool,
}

#[derive(Debug, Clone)]
pub struct GuidedTour {
    stops: Vec<TourStop>,
    index: usize,
    current: Option<StopView>,
    demo_ran: bool,
}

impl Default for GuidedTour {
    fn default() -> Self {
        Self::new(TOUR_SCRIPT.to_vec())
    }
}

impl GuidedTour {
    pub fn new(stops: Vec<TourStop>) -> Self {
        Self {
            stops,
            index: 0,
            current: None,
            demo_ran: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[TourStop] {
        &self.stops
    }

    pub fn current_stop(&self) -> Option<&TourStop> {
        self.stops.get(self.index)
    }

    /// The stop on screen, if the tour is showing one.
    pub fn current(&self) -> Option<&StopView> {
        self.current.as_ref()
    }

    /// The anchor carrying the highlight marker, if any.
    pub fn highlighted(&self) -> Option<Anchor> {
        self.current.as_ref().map(|view| view.highlighted)
    }

    /// Drops the highlight marker and the per-visit state.
    pub fn clear_highlight(&mut self) {
        self.current = None;
        self.demo_ran = false;
    }

    /// Starts from the first stop.
    pub fn start(&mut self, locator: &impl AnchorLocator) -> TourTransition {
        self.show(0, locator)
    }

    /// Shows the stop at `index`, skipping forward past unresolvable anchors.
    pub fn show(&mut self, index: usize, locator: &impl AnchorLocator) -> TourTransition {
        self.clear_highlight();
        for i in index..self.stops.len() {
            self.index = i;
            let stop = self.stops[i];
            match locator.locate(stop.target) {
                Some(rect) => {
                    self.current = Some(self.render(i, &stop, rect, locator.viewport()));
                    tracing::debug!(index = i, anchor = %stop.target, "tour stop shown");
                    return TourTransition::Shown(i);
                }
                None => {
                    tracing::debug!(index = i, anchor = %stop.target, "anchor not on screen, skipping stop");
                }
            }
        }
        self.index = self.stops.len().saturating_sub(1);
        TourTransition::Finished
    }

    pub fn next(&mut self, locator: &impl AnchorLocator) -> TourTransition {
        if self.index + 1 < self.stops.len() {
            self.show(self.index + 1, locator)
        } else {
            self.clear_highlight();
            TourTransition::Finished
        }
    }

    /// Steps back to the nearest earlier stop that is on screen.
    ///
    /// At the first stop, or with nothing resolvable behind it, the current
    /// stop stays as it is.
    pub fn prev(&mut self, locator: &impl AnchorLocator) -> TourTransition {
        let Some(i) = (0..self.index)
            .rev()
            .find(|&i| locator.locate(self.stops[i].target).is_some())
        else {
            return TourTransition::Rejected;
        };
        self.show(i, locator)
    }

    /// Jumps straight to the end.
    pub fn skip(&mut self) -> TourTransition {
        self.clear_highlight();
        TourTransition::Finished
    }

    /// Claims the current stop's demo. Only once per visit.
    pub fn try_feature(&mut self) -> Option<Demo> {
        if self.current.is_none() || self.demo_ran {
            return None;
        }
        let demo = self.current_stop()?.demo()?;
        self.demo_ran = true;
        Some(demo)
    }

    fn render(&self, index: usize, stop: &TourStop, rect: Rect, viewport: Viewport) -> StopView {
        let count = self.stops.len();
        let placed = place(rect, stop.position, viewport);
        let interactive = stop.is_interactive();
        #[allow(clippy::cast_precision_loss)]
        let progress_percent = (index + 1) as f64 / count as f64 * 100.0;
        StopView {
            index,
            count,
            counter: format!("{} of {count}", index + 1),
            progress_percent,
            title: stop.title,
            description: stop.description,
            position: stop.position,
            highlighted: stop.target,
            spotlight: placed.spotlight,
            tooltip: placed.tooltip,
            show_prev: index > 0,
            show_next: !interactive,
            show_try: interactive,
        }
    }
}
