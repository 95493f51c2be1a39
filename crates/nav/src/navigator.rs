//! The focus navigator component.
//!
//! Owns the cursor and the guard, reads rows from a shared [`RowGrid`], and
//! drives a [`ViewBinder`] for focus and scroll effects. The cursor is only
//! ever changed from here, in response to input.

use marquee_types::{Cursor, Direction, FocusTarget, MediaCard, NavLink};
use tracing::{debug, trace};

use crate::guard::GuardState;
use crate::{NavError, NavigationGuard, RowGrid, ViewBinder, movement, scroll};

/// What activating the focused item asks the surrounding application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Open the details view for a playable title.
    OpenDetails(MediaCard),
    /// Run the default action of a navbar link.
    FollowLink(NavLink),
}

/// Last item that received the focus effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FocusMark {
    at: Cursor,
    revision: u64,
}

#[derive(Debug)]
pub struct FocusNavigator {
    grid: RowGrid,
    cursor: Cursor,
    focused: Option<FocusMark>,
    guard: NavigationGuard,
}

impl FocusNavigator {
    /// Build a navigator over `grid` with the cursor at `start`, clamped to
    /// the grid as it is now. No focus or scroll effect is issued.
    pub fn initialize(grid: RowGrid, start: Cursor, guard: NavigationGuard) -> Self {
        let cursor = movement::clamp_cursor(start, &grid.row_lengths());
        debug!(%cursor, rows = grid.row_count(), "navigator initialized");
        Self {
            grid,
            cursor,
            focused: None,
            guard,
        }
    }

    pub fn grid(&self) -> &RowGrid {
        &self.grid
    }

    /// The cursor, clamped against the rows as they are right now.
    pub fn cursor(&self) -> Cursor {
        movement::clamp_cursor(self.cursor, &self.grid.row_lengths())
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    /// Position of the item that currently holds focus, if it still exists.
    pub fn focused(&self) -> Option<Cursor> {
        self.focused_item().map(|(at, _)| at)
    }

    fn focused_item(&self) -> Option<(Cursor, FocusTarget)> {
        let mark = self.focused?;
        // Replacing a row's items drops the focus it held.
        if self.grid.revision(mark.at.row)? != mark.revision {
            return None;
        }
        let item = self.grid.item_at(mark.at)?;
        Some((mark.at, item))
    }

    /// Handle a directional input.
    ///
    /// Returns `true` when the cursor moved. Input arriving while the guard is
    /// armed is dropped. Focus follows every move; horizontal moves also
    /// center the new item in its row.
    pub fn handle_direction(&mut self, direction: Direction, binder: &mut dyn ViewBinder) -> bool {
        if !self.guard.try_acquire() {
            return false;
        }

        let lengths = self.grid.row_lengths();
        let before = movement::clamp_cursor(self.cursor, &lengths);
        let after = movement::step(before, direction, &lengths);
        self.cursor = after;
        if after == before {
            trace!(?direction, cursor = %after, "move blocked at edge");
            return false;
        }
        debug!(?direction, from = %before, to = %after, "cursor moved");

        if let Err(error) = self.apply_focus(binder) {
            debug!(%error, "focus skipped");
        }
        if !direction.is_vertical()
            && let Err(error) = scroll::center_item(binder, after)
        {
            debug!(%error, "scroll skipped");
        }
        true
    }

    /// Handle the activate key on whatever holds focus.
    ///
    /// Returns `None` when nothing is focused or the guard is armed.
    pub fn handle_activate(&mut self) -> Option<Activation> {
        if !self.guard.try_acquire() {
            return None;
        }
        let Some((at, item)) = self.focused_item() else {
            trace!("activate with nothing focused");
            return None;
        };
        debug!(%at, label = item.label(), "activating item");
        Some(match item {
            FocusTarget::Card(card) => Activation::OpenDetails(card),
            FocusTarget::Link(link) => Activation::FollowLink(link),
        })
    }

    /// Apply the focus effect to the item under the cursor without moving.
    ///
    /// Used when content arrives for the row the cursor is already on.
    pub fn focus_current(&mut self, binder: &mut dyn ViewBinder) -> Result<(), NavError> {
        self.cursor = self.cursor();
        self.apply_focus(binder)
    }

    /// Move the cursor to the first item of `row` as the result of a link
    /// activation, focusing it. Rows outside the grid are clamped.
    pub fn jump_to_row(&mut self, row: usize, binder: &mut dyn ViewBinder) -> Result<(), NavError> {
        let lengths = self.grid.row_lengths();
        let target = movement::clamp_cursor(Cursor::new(row, 0), &lengths);
        debug!(from = %self.cursor, to = %target, "cursor jumped");
        self.cursor = target;
        self.apply_focus(binder)
    }

    fn apply_focus(&mut self, binder: &mut dyn ViewBinder) -> Result<(), NavError> {
        let at = self.cursor;
        let item = self.grid.item_at(at).ok_or(NavError::MissingTarget(at))?;
        let revision = self.grid.revision(at.row).ok_or(NavError::MissingTarget(at))?;
        binder.focus(at, &item);
        self.focused = Some(FocusMark { at, revision });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Row, ScheduledTask, Scheduler};
    use marquee_types::{BoundingBox, LinkAction, MediaKind, Section};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct ManualScheduler {
        queued: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    }

    impl ManualScheduler {
        fn fire_all(&self) {
            let tasks: Vec<_> = self.queued.lock().expect("queue lock").drain(..).collect();
            tasks.into_iter().for_each(|task| task());
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, _delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) -> ScheduledTask {
            self.queued.lock().expect("queue lock").push(task);
            ScheduledTask::new(|| {})
        }
    }

    #[derive(Default)]
    struct RecordingBinder {
        focused: Vec<Cursor>,
        scrolls: Vec<(usize, f64)>,
    }

    impl ViewBinder for RecordingBinder {
        fn item_bounds(&self, at: Cursor) -> Option<BoundingBox> {
            Some(BoundingBox::new(at.col as f64 * 10.0, 0.0, 10.0, 5.0))
        }
        fn row_bounds(&self, _row: usize) -> Option<BoundingBox> {
            Some(BoundingBox::new(0.0, 0.0, 40.0, 5.0))
        }
        fn viewport_width(&self) -> f64 {
            40.0
        }
        fn focus(&mut self, at: Cursor, _item: &FocusTarget) {
            self.focused.push(at);
        }
        fn scroll_row_by(&mut self, row: usize, offset: f64, _behavior: crate::ScrollBehavior) {
            self.scrolls.push((row, offset));
        }
    }

    fn card(id: u64) -> FocusTarget {
        FocusTarget::Card(MediaCard {
            id,
            kind: MediaKind::Movie,
            title: format!("title {id}"),
            poster_url: None,
            release_date: None,
            vote_average: None,
        })
    }

    fn navigator(lengths: &[usize], start: Cursor) -> (FocusNavigator, Arc<ManualScheduler>) {
        let rows = lengths
            .iter()
            .zip(Section::ALL)
            .map(|(&len, section)| Row::new(section, (0..len as u64).map(card).collect()))
            .collect();
        let scheduler = Arc::new(ManualScheduler::default());
        let guard = NavigationGuard::new(Duration::from_millis(200), scheduler.clone());
        (FocusNavigator::initialize(RowGrid::from_rows(rows), start, guard), scheduler)
    }

    #[test]
    fn initialize_clamps_start_and_issues_no_effects() {
        let (nav, _) = navigator(&[1, 3], Cursor::new(9, 9));
        assert_eq!(nav.cursor(), Cursor::new(1, 2));
        assert_eq!(nav.focused(), None);
        assert_eq!(nav.guard_state(), GuardState::Idle);
    }

    #[test]
    fn horizontal_move_focuses_and_centers() {
        let (mut nav, _) = navigator(&[4], Cursor::new(0, 0));
        let mut binder = RecordingBinder::default();
        assert!(nav.handle_direction(Direction::Right, &mut binder));
        assert_eq!(binder.focused, vec![Cursor::new(0, 1)]);
        // item 10..20 centered in a 40 wide row: 10 - 0 + 5 - 20
        assert_eq!(binder.scrolls, vec![(0, -5.0)]);
    }

    #[test]
    fn vertical_move_focuses_without_scrolling() {
        let (mut nav, _) = navigator(&[3, 3], Cursor::new(0, 2));
        let mut binder = RecordingBinder::default();
        assert!(nav.handle_direction(Direction::Down, &mut binder));
        assert_eq!(binder.focused, vec![Cursor::new(1, 2)]);
        assert!(binder.scrolls.is_empty());
    }

    #[test]
    fn blocked_move_arms_guard_without_effects() {
        let (mut nav, scheduler) = navigator(&[2], Cursor::new(0, 0));
        let mut binder = RecordingBinder::default();
        assert!(!nav.handle_direction(Direction::Left, &mut binder));
        assert_eq!(nav.guard_state(), GuardState::Guarded);
        assert!(binder.focused.is_empty());
        scheduler.fire_all();
        assert_eq!(nav.guard_state(), GuardState::Idle);
    }

    #[test]
    fn move_into_empty_row_skips_focus() {
        let (mut nav, _) = navigator(&[3, 0], Cursor::new(0, 2));
        let mut binder = RecordingBinder::default();
        assert!(nav.handle_direction(Direction::Down, &mut binder));
        assert_eq!(nav.cursor(), Cursor::new(1, 0));
        assert!(binder.focused.is_empty());
    }

    #[test]
    fn activate_maps_item_kind() {
        let grid = RowGrid::from_rows(vec![
            Row::new(Section::Navbar, vec![FocusTarget::Link(NavLink::new("Search", LinkAction::Search))]),
            Row::new(Section::Trending, vec![card(42)]),
        ]);
        let scheduler = Arc::new(ManualScheduler::default());
        let guard = NavigationGuard::new(Duration::from_millis(200), scheduler.clone());
        let mut nav = FocusNavigator::initialize(grid, Cursor::new(0, 0), guard);
        let mut binder = RecordingBinder::default();

        nav.focus_current(&mut binder).expect("focus navbar");
        assert_eq!(
            nav.handle_activate(),
            Some(Activation::FollowLink(NavLink::new("Search", LinkAction::Search)))
        );

        scheduler.fire_all();
        assert!(nav.handle_direction(Direction::Down, &mut binder));
        scheduler.fire_all();
        match nav.handle_activate() {
            Some(Activation::OpenDetails(card)) => assert_eq!(card.id, 42),
            other => panic!("unexpected activation: {other:?}"),
        }
    }

    #[test]
    fn replacing_focused_row_drops_focus() {
        let (mut nav, scheduler) = navigator(&[3], Cursor::new(0, 1));
        let mut binder = RecordingBinder::default();
        nav.focus_current(&mut binder).expect("focus");
        assert_eq!(nav.focused(), Some(Cursor::new(0, 1)));

        nav.grid().replace_row(0, vec![card(7), card(8)]);
        assert_eq!(nav.focused(), None);
        assert_eq!(nav.handle_activate(), None);
        scheduler.fire_all();
    }

    #[test]
    fn jump_to_row_focuses_first_item() {
        let (mut nav, _) = navigator(&[2, 0, 5], Cursor::new(0, 1));
        let mut binder = RecordingBinder::default();
        nav.jump_to_row(2, &mut binder).expect("jump");
        assert_eq!(nav.cursor(), Cursor::new(2, 0));
        assert_eq!(binder.focused, vec![Cursor::new(2, 0)]);

        let error = nav.jump_to_row(1, &mut binder).unwrap_err();
        assert_eq!(error, NavError::MissingTarget(Cursor::new(1, 0)));
    }
}
