// Carousel controller module
// Owns the page sequence, the current index and the autoplay schedule, and
// drives the page surface and indicator strip in response to navigation

use crate::autoplay::{self, Autoplay};
use log::debug;
use std::time::{Duration, Instant};

/// Navigation intent, used to pick the slide orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Stay,
    Next,
}

impl Direction {
    /// Direction from the sign of `delta`
    pub fn from_delta(delta: isize) -> Self {
        match delta.signum() {
            -1 => Direction::Previous,
            1 => Direction::Next,
            _ => Direction::Stay,
        }
    }

    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Stay => 0,
            Direction::Next => 1,
        }
    }
}

/// Receives the pages to show and the transitions to play
pub trait PageSurface<P> {
    fn set_left(&mut self, page: &P);
    fn set_center(&mut self, page: &P);
    fn set_right(&mut self, page: &P);
    fn play_transition(&mut self, direction: Direction);
}

/// One marker per page, exactly one selected while pages exist
pub trait IndicatorStrip {
    fn add_marker(&mut self);
    fn select(&mut self, index: usize, selected: bool);
}

/// Pages shown side by side, center being the active one
#[derive(Debug, PartialEq, Eq)]
pub struct Triplet<'a, P> {
    pub left: &'a P,
    pub center: &'a P,
    pub right: &'a P,
}

/// Indices of the (left, center, right) pages around `index`
///
/// Returns `None` for an empty sequence or an out-of-range index. With a
/// single page all three slots resolve to it.
pub fn triplet_indices(count: usize, index: usize) -> Option<(usize, usize, usize)> {
    if index >= count {
        return None;
    }
    Some(((index + count - 1) % count, index, (index + 1) % count))
}

type Callback = Box<dyn FnMut(usize)>;

/// Rotating banner state machine
pub struct Carousel<P, S, I> {
    pages: Vec<P>,
    current: Option<usize>,
    autoplay: Autoplay,
    hovered: bool,
    surface: S,
    indicators: I,
    index_changed: Option<Callback>,
    page_activated: Option<Callback>,
}

impl<P, S, I> Carousel<P, S, I>
where
    S: PageSurface<P>,
    I: IndicatorStrip,
{
    pub fn new(surface: S, indicators: I) -> Self {
        Self {
            pages: Vec::new(),
            current: None,
            autoplay: Autoplay::default(),
            hovered: false,
            surface,
            indicators,
            index_changed: None,
            page_activated: None,
        }
    }

    /// Register the callback raised after every index change
    pub fn on_index_changed(&mut self, callback: impl FnMut(usize) + 'static) {
        self.index_changed = Some(Box::new(callback));
    }

    /// Register the callback raised when the current page is clicked
    pub fn on_page_activated(&mut self, callback: impl FnMut(usize) + 'static) {
        self.page_activated = Some(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    pub fn indicators_mut(&mut self) -> &mut I {
        &mut self.indicators
    }

    /// Append a page and its marker; the first page becomes current
    pub fn append(&mut self, page: P) {
        self.pages.push(page);
        self.indicators.add_marker();

        let index = match self.current {
            Some(index) => index,
            None => {
                self.indicators.select(0, true);
                self.current = Some(0);
                0
            }
        };

        self.show(index);
    }

    pub fn append_all(&mut self, pages: impl IntoIterator<Item = P>) {
        for page in pages {
            self.append(page);
        }
    }

    /// The pages surrounding `index`, if it is a valid position
    pub fn visible_triplet(&self, index: usize) -> Option<Triplet<'_, P>> {
        let (left, center, right) = triplet_indices(self.pages.len(), index)?;
        Some(Triplet {
            left: &self.pages[left],
            center: &self.pages[center],
            right: &self.pages[right],
        })
    }

    /// Step one page in `direction`, or activate the current page for `Stay`
    pub fn navigate(&mut self, direction: Direction) {
        self.autoplay.restart(Instant::now());

        let Some(current) = self.current else {
            debug!("Ignoring navigation on an empty banner");
            return;
        };

        if direction == Direction::Stay {
            debug!("Page {} activated", current);
            if let Some(callback) = self.page_activated.as_mut() {
                callback(current);
            }
            return;
        }

        let count = self.pages.len();
        if count < 2 {
            debug!("Ignoring navigation with {} page(s)", count);
            return;
        }

        let next = (current as isize + direction.offset()).rem_euclid(count as isize) as usize;
        self.move_to(current, next, direction);
    }

    /// Jump straight to `target`, animating a single step towards it
    pub fn select_index(&mut self, target: usize) {
        let Some(current) = self.current else {
            return;
        };
        if target >= self.pages.len() {
            debug!("Ignoring selection of missing page {}", target);
            return;
        }
        if target == current {
            return;
        }

        let direction = Direction::from_delta(target as isize - current as isize);
        self.move_to(current, target, direction);
    }

    /// Update the autoplay period; out-of-range values are ignored
    pub fn set_autoplay_interval(&mut self, msec: u64, start_immediately: bool) {
        if !autoplay::is_valid_interval(msec) {
            debug!("Ignoring autoplay interval of {} ms", msec);
            return;
        }

        self.autoplay.set_interval(Duration::from_millis(msec));
        if start_immediately {
            self.start_autoplay();
        }
    }

    pub fn start_autoplay(&mut self) {
        debug!("Autoplay started every {:?}", self.autoplay.interval());
        self.autoplay.start(Instant::now());
        if self.hovered {
            // Ticks begin once the pointer leaves
            self.autoplay.pause();
        }
    }

    pub fn stop_autoplay(&mut self) {
        debug!("Autoplay stopped");
        self.autoplay.stop();
    }

    pub fn on_timer_tick(&mut self) {
        self.navigate(Direction::Next);
    }

    /// Fire the autoplay tick if it is due; returns whether it fired
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.autoplay.fire_if_due(now) {
            self.on_timer_tick();
            true
        } else {
            false
        }
    }

    /// Pointer entered the banner: hold the autoplay tick
    pub fn hover_enter(&mut self) {
        self.hovered = true;
        self.autoplay.pause();
    }

    /// Pointer left the banner: resume autoplay with a fresh period
    pub fn hover_leave(&mut self) {
        self.hovered = false;
        self.autoplay.resume(Instant::now());
    }

    fn move_to(&mut self, from: usize, to: usize, direction: Direction) {
        debug!("Switching page {} -> {} ({:?})", from, to, direction);

        self.indicators.select(from, false);
        self.current = Some(to);
        self.indicators.select(to, true);

        self.show(to);
        self.surface.play_transition(direction);

        if let Some(callback) = self.index_changed.as_mut() {
            callback(to);
        }
    }

    fn show(&mut self, index: usize) {
        let Some((left, center, right)) = triplet_indices(self.pages.len(), index) else {
            return;
        };
        self.surface.set_left(&self.pages[left]);
        self.surface.set_center(&self.pages[center]);
        self.surface.set_right(&self.pages[right]);
    }
}
