//! Application state and the message/effect loop.
//!
//! [`App::update`] is the single place state changes. It consumes a [`Msg`]
//! (input, ticks, finished background work) and returns the [`Effect`]s the
//! runtime should carry out. Effects never touch state directly; their
//! results come back as new messages.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use marquee_api::EpisodeRef;
use marquee_api::models::{Credits, Episode, MediaDetails, Season, Videos};
use marquee_nav::{Activation, FocusNavigator, NavigationGuard, RowGrid};
use marquee_types::{Cursor, Direction, FocusTarget, LinkAction, MediaCard, MediaKind, NavLink, Section};
use marquee_util::Settings;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::ui::binder::TerminalBinder;

/// How long the "Currently in" indicator stays up after a row change.
pub const INDICATOR_DURATION: Duration = Duration::from_secs(2);

/// Cards kept in the continue-watching row.
const RECENT_LIMIT: usize = 20;

/// Sections filled from the catalog when the app starts.
pub const REMOTE_SECTIONS: [Section; 3] = [Section::Trending, Section::Movies, Section::Tv];

/// Input and completions delivered to [`App::update`].
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    SectionLoaded {
        section: Section,
        count: usize,
    },
    SearchCompleted {
        query: String,
        generation: u64,
        result: Result<Vec<MediaCard>, String>,
    },
    /// A debounced search was overtaken by a newer keystroke.
    SearchSuperseded { generation: u64 },
    DetailsLoaded {
        id: u64,
        result: Result<Box<DetailsPayload>, String>,
    },
    SeasonLoaded {
        show_id: u64,
        season: u32,
        result: Result<Season, String>,
    },
    StreamResolved {
        id: u64,
        episode: Option<EpisodeRef>,
        result: Result<String, String>,
    },
}

/// Side effects requested by [`App::update`].
#[derive(Debug)]
pub enum Effect {
    LoadSection(Section),
    /// Run a search once `delay` has passed, unless `latest` moved on.
    Search {
        query: String,
        generation: u64,
        latest: Arc<AtomicU64>,
        delay: Duration,
    },
    FetchDetails(MediaCard),
    FetchSeason {
        show_id: u64,
        season: u32,
    },
    ResolveStream {
        id: u64,
        kind: MediaKind,
        episode: Option<EpisodeRef>,
    },
    Play(String),
}

/// Everything the details overlay shows about a title.
#[derive(Debug, Clone, Default)]
pub struct DetailsPayload {
    pub details: MediaDetails,
    pub credits: Credits,
    pub videos: Videos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// The search box has keyboard input.
    Search,
    Details,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub loading: bool,
    pub message: Option<String>,
    generation: Arc<AtomicU64>,
}

impl SearchState {
    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Resolving,
    Ready(String),
    Failed(String),
}

#[derive(Debug)]
pub struct DetailsState {
    pub card: MediaCard,
    pub payload: Option<DetailsPayload>,
    pub error: Option<String>,
    pub season: u32,
    pub episodes: Vec<Episode>,
    pub selected_episode: usize,
    pub stream: StreamState,
    pub stream_episode: Option<EpisodeRef>,
}

impl DetailsState {
    fn new(card: MediaCard) -> Self {
        Self {
            card,
            payload: None,
            error: None,
            season: 1,
            episodes: Vec::new(),
            selected_episode: 0,
            stream: StreamState::Idle,
            stream_episode: None,
        }
    }

    fn season_count(&self) -> u32 {
        self.payload
            .as_ref()
            .and_then(|payload| payload.details.number_of_seasons)
            .unwrap_or(1)
    }
}

pub struct App {
    pub settings: Settings,
    pub navigator: FocusNavigator,
    pub binder: TerminalBinder,
    pub mode: Mode,
    pub search: SearchState,
    pub details: Option<DetailsState>,
    /// Section announced by the indicator and when it was shown.
    pub indicator: Option<(Section, Instant)>,
    pub status: Option<String>,
    pub should_quit: bool,
    recent: Vec<MediaCard>,
    favorites: HashSet<(MediaKind, u64)>,
}

impl App {
    pub fn new(settings: Settings, grid: RowGrid, guard: NavigationGuard) -> Self {
        let start_row = grid.index_of(settings.start_section).unwrap_or(0);
        let navigator = FocusNavigator::initialize(grid.clone(), Cursor::new(start_row, 0), guard);
        let binder = TerminalBinder::new(grid, settings.card_width);
        Self {
            settings,
            navigator,
            binder,
            mode: Mode::Browse,
            search: SearchState::default(),
            details: None,
            indicator: None,
            status: None,
            should_quit: false,
            recent: Vec::new(),
            favorites: HashSet::new(),
        }
    }

    pub fn grid(&self) -> &RowGrid {
        self.navigator.grid()
    }

    /// Effects to run once the event loop is up.
    pub fn initial_effects(&self) -> Vec<Effect> {
        REMOTE_SECTIONS.into_iter().map(Effect::LoadSection).collect()
    }

    pub fn is_favorite(&self, card: &MediaCard) -> bool {
        self.favorites.contains(&(card.kind, card.id))
    }

    /// Whether ticks should run at animation speed.
    pub fn is_animating(&self) -> bool {
        self.binder.is_animating() || self.indicator.is_some() || self.search.loading
    }

    fn start_row(&self) -> usize {
        self.grid().index_of(self.settings.start_section).unwrap_or(0)
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Key(key) if key.kind == KeyEventKind::Release => Vec::new(),
            Msg::Key(key) => match self.mode {
                Mode::Browse => self.handle_browse_key(key),
                Mode::Search => self.handle_search_key(key),
                Mode::Details => self.handle_details_key(key),
            },
            Msg::Tick => {
                self.binder.animate();
                if let Some((_, shown_at)) = self.indicator
                    && shown_at.elapsed() >= INDICATOR_DURATION
                {
                    self.indicator = None;
                }
                Vec::new()
            }
            Msg::Resize(width, _) => {
                self.binder.set_viewport_width(width);
                Vec::new()
            }
            Msg::SectionLoaded { section, count } => {
                debug!(%section, count, "section ready");
                self.refocus_if_on(section);
                Vec::new()
            }
            Msg::SearchCompleted {
                query,
                generation,
                result,
            } => {
                self.finish_search(query, generation, result);
                Vec::new()
            }
            Msg::SearchSuperseded { generation } => {
                debug!(generation, "search superseded");
                Vec::new()
            }
            Msg::DetailsLoaded { id, result } => {
                if let Some(details) = self.details.as_mut().filter(|details| details.card.id == id) {
                    match result {
                        Ok(payload) => details.payload = Some(*payload),
                        Err(error) => details.error = Some(error),
                    }
                }
                Vec::new()
            }
            Msg::SeasonLoaded {
                show_id,
                season,
                result,
            } => {
                if let Some(details) = self
                    .details
                    .as_mut()
                    .filter(|details| details.card.id == show_id && details.season == season)
                {
                    match result {
                        Ok(season) => {
                            details.episodes = season.episodes;
                            details.selected_episode = 0;
                        }
                        Err(error) => details.error = Some(error),
                    }
                }
                Vec::new()
            }
            Msg::StreamResolved { id, episode, result } => {
                if let Some(details) = self
                    .details
                    .as_mut()
                    .filter(|details| details.card.id == id && details.stream_episode == episode)
                {
                    details.stream = match result {
                        Ok(url) => StreamState::Ready(url),
                        Err(error) => StreamState::Failed(error),
                    };
                }
                Vec::new()
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => self.move_focus(Direction::Up),
            KeyCode::Down => self.move_focus(Direction::Down),
            KeyCode::Left => self.move_focus(Direction::Left),
            KeyCode::Right => self.move_focus(Direction::Right),
            KeyCode::Enter => return self.activate(),
            KeyCode::PageUp => self.binder.scroll_page(self.navigator.cursor().row, false),
            KeyCode::PageDown => self.binder.scroll_page(self.navigator.cursor().row, true),
            KeyCode::Char('/') => self.enter_search(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Vec::new()
    }

    fn move_focus(&mut self, direction: Direction) {
        let moved = self.navigator.handle_direction(direction, &mut self.binder);
        if moved && direction.is_vertical() {
            self.announce_row();
        }
    }

    fn announce_row(&mut self) {
        if let Some(section) = self.grid().section(self.navigator.cursor().row) {
            self.indicator = Some((section, Instant::now()));
        }
    }

    fn jump_to(&mut self, row: usize) {
        if let Err(error) = self.navigator.jump_to_row(row, &mut self.binder) {
            debug!(%error, "jump left nothing focused");
        }
        self.announce_row();
    }

    fn refocus_if_on(&mut self, section: Section) {
        let Some(row) = self.grid().index_of(section) else {
            return;
        };
        if self.navigator.cursor().row == row
            && self.navigator.focused().is_none()
            && let Err(error) = self.navigator.focus_current(&mut self.binder)
        {
            debug!(%error, %section, "row has nothing to focus");
        }
    }

    fn activate(&mut self) -> Vec<Effect> {
        match self.navigator.handle_activate() {
            Some(Activation::OpenDetails(card)) => self.open_details(card),
            Some(Activation::FollowLink(link)) => {
                self.follow_link(&link);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn follow_link(&mut self, link: &NavLink) {
        debug!(label = %link.label, "following link");
        match link.action {
            LinkAction::Home => self.jump_to(self.start_row()),
            LinkAction::Search => self.enter_search(),
            LinkAction::Movies | LinkAction::Tv => {
                let section = if link.action == LinkAction::Movies {
                    Section::Movies
                } else {
                    Section::Tv
                };
                if let Some(row) = self.grid().index_of(section) {
                    self.jump_to(row);
                }
            }
        }
    }

    fn enter_search(&mut self) {
        self.mode = Mode::Search;
        if let Some(row) = self.grid().index_of(Section::Search) {
            self.jump_to(row);
        }
    }

    fn leave_search(&mut self) {
        self.mode = Mode::Browse;
        self.search.query.clear();
        self.search.loading = false;
        self.search.message = None;
        self.search.bump();
        self.grid().clear_section(Section::Search);
        self.binder.clear_focus();
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.leave_search();
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                // Hand the keyboard back to the grid, keeping the results.
                self.mode = Mode::Browse;
                self.refocus_if_on(Section::Search);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.search.query.pop();
                self.schedule_search()
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.search.query.push(ch);
                self.schedule_search()
            }
            _ => Vec::new(),
        }
    }

    fn schedule_search(&mut self) -> Vec<Effect> {
        let generation = self.search.bump();
        let query = self.search.query.trim().to_string();
        if query.chars().count() < self.settings.search_min_chars {
            self.search.loading = false;
            self.search.message = None;
            self.grid().clear_section(Section::Search);
            return Vec::new();
        }
        self.search.loading = true;
        vec![Effect::Search {
            query,
            generation,
            latest: Arc::clone(&self.search.generation),
            delay: self.settings.search_debounce(),
        }]
    }

    fn finish_search(&mut self, query: String, generation: u64, result: Result<Vec<MediaCard>, String>) {
        if generation != self.search.current() {
            debug!(%query, generation, "dropping stale search results");
            return;
        }
        self.search.loading = false;
        match result {
            Ok(cards) => {
                self.search.message = cards.is_empty().then(|| format!("No results for \"{query}\""));
                let items = cards.into_iter().map(FocusTarget::Card).collect();
                self.grid().replace_section(Section::Search, items);
                if self.mode == Mode::Browse {
                    self.refocus_if_on(Section::Search);
                }
            }
            Err(error) => {
                warn!(%query, %error, "search failed");
                self.search.message = Some(format!("Search failed: {error}"));
            }
        }
    }

    fn open_details(&mut self, card: MediaCard) -> Vec<Effect> {
        info!(id = card.id, kind = %card.kind, title = %card.title, "opening details");
        self.remember_recent(card.clone());
        self.mode = Mode::Details;

        let mut state = DetailsState::new(card.clone());
        let mut effects = vec![Effect::FetchDetails(card.clone())];
        match card.kind {
            MediaKind::Movie => {
                state.stream = StreamState::Resolving;
                effects.push(Effect::ResolveStream {
                    id: card.id,
                    kind: card.kind,
                    episode: None,
                });
            }
            MediaKind::Tv => effects.push(Effect::FetchSeason {
                show_id: card.id,
                season: state.season,
            }),
        }
        self.details = Some(state);
        effects
    }

    fn close_details(&mut self) {
        self.mode = Mode::Browse;
        self.details = None;
        if let Err(error) = self.navigator.focus_current(&mut self.binder) {
            debug!(%error, "nothing to refocus after details");
        }
    }

    /// Continue-watching is newest first and holds each title once.
    fn remember_recent(&mut self, card: MediaCard) {
        self.recent
            .retain(|existing| (existing.kind, existing.id) != (card.kind, card.id));
        self.recent.insert(0, card);
        self.recent.truncate(RECENT_LIMIT);
        let items = self.recent.iter().cloned().map(FocusTarget::Card).collect();
        self.grid().replace_section(Section::Continue, items);
    }

    fn handle_details_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(details) = self.details.as_mut() else {
            self.mode = Mode::Browse;
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.close_details(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('[') | KeyCode::Char(']') if details.card.kind == MediaKind::Tv => {
                let next = if key.code == KeyCode::Char(']') {
                    details.season + 1
                } else {
                    details.season.saturating_sub(1)
                };
                if next >= 1 && next <= details.season_count() && next != details.season {
                    details.season = next;
                    details.episodes.clear();
                    details.selected_episode = 0;
                    return vec![Effect::FetchSeason {
                        show_id: details.card.id,
                        season: next,
                    }];
                }
            }
            KeyCode::Up => details.selected_episode = details.selected_episode.saturating_sub(1),
            KeyCode::Down => {
                if details.selected_episode + 1 < details.episodes.len() {
                    details.selected_episode += 1;
                }
            }
            KeyCode::Enter if details.card.kind == MediaKind::Tv => {
                if let Some(episode) = details.episodes.get(details.selected_episode) {
                    let episode = EpisodeRef::new(details.season, episode.episode_number);
                    details.stream = StreamState::Resolving;
                    details.stream_episode = Some(episode);
                    return vec![Effect::ResolveStream {
                        id: details.card.id,
                        kind: details.card.kind,
                        episode: Some(episode),
                    }];
                }
            }
            KeyCode::Char('p') => {
                if let StreamState::Ready(url) = &details.stream {
                    self.status = Some(format!("Playing {}", details.card.title));
                    return vec![Effect::Play(url.clone())];
                }
                self.status = Some("No stream available yet".to_string());
            }
            KeyCode::Char('f') => {
                let title = (details.card.kind, details.card.id);
                let favorite = if self.favorites.remove(&title) {
                    false
                } else {
                    self.favorites.insert(title);
                    true
                };
                info!(id = details.card.id, favorite, "favorite toggled");
                let verb = if favorite { "Added to" } else { "Removed from" };
                self.status = Some(format!("{verb} favorites: {}", details.card.title));
            }
            _ => {}
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn card(id: u64, kind: MediaKind) -> MediaCard {
        MediaCard {
            id,
            kind,
            title: format!("Title {id}"),
            poster_url: None,
            release_date: None,
            vote_average: None,
        }
    }

    fn press(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        let guard = NavigationGuard::on_current_runtime(Duration::from_millis(200)).expect("runtime");
        let grid = RowGrid::home();
        let settings = Settings {
            start_section: Section::Trending,
            ..Settings::default()
        };
        let mut app = App::new(settings, grid, guard);
        app.update(Msg::Resize(80, 40));
        app
    }

    fn fill(app: &App, section: Section, cards: Vec<MediaCard>) {
        app.grid()
            .replace_section(section, cards.into_iter().map(FocusTarget::Card).collect());
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn loading_the_current_row_focuses_it() {
        let mut app = app();
        assert!(app.navigator.focused().is_none());
        fill(&app, Section::Trending, vec![card(1, MediaKind::Movie)]);
        app.update(Msg::SectionLoaded {
            section: Section::Trending,
            count: 1,
        });
        assert_eq!(app.binder.focused(), Some(Cursor::new(Section::Trending.index(), 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn vertical_move_shows_indicator_until_it_expires() {
        let mut app = app();
        fill(&app, Section::Movies, vec![card(2, MediaKind::Movie)]);
        app.update(press(KeyCode::Down));
        assert_eq!(app.indicator.map(|(section, _)| section), Some(Section::Movies));

        tokio::time::sleep(Duration::from_secs(1)).await;
        app.update(Msg::Tick);
        assert!(app.indicator.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        app.update(Msg::Tick);
        assert!(app.indicator.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn opening_a_film_fetches_details_and_stream() {
        let mut app = app();
        fill(&app, Section::Trending, vec![card(7, MediaKind::Movie)]);
        app.update(Msg::SectionLoaded {
            section: Section::Trending,
            count: 1,
        });

        let effects = app.update(press(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Details);
        assert!(matches!(effects[0], Effect::FetchDetails(ref c) if c.id == 7));
        assert!(matches!(
            effects[1],
            Effect::ResolveStream {
                id: 7,
                episode: None,
                ..
            }
        ));

        let continue_row = app.grid().index_of(Section::Continue).expect("row");
        assert_eq!(app.grid().row_len(continue_row), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_a_title_keeps_one_recent_entry() {
        let mut app = app();
        fill(&app, Section::Trending, vec![card(7, MediaKind::Movie)]);
        app.update(Msg::SectionLoaded {
            section: Section::Trending,
            count: 1,
        });
        app.update(press(KeyCode::Enter));
        app.update(press(KeyCode::Esc));
        settle().await;
        app.update(press(KeyCode::Enter));

        let continue_row = app.grid().index_of(Section::Continue).expect("row");
        assert_eq!(app.grid().row_len(continue_row), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_result_for_another_episode_is_ignored() {
        let mut app = app();
        fill(&app, Section::Trending, vec![card(9, MediaKind::Tv)]);
        app.update(Msg::SectionLoaded {
            section: Section::Trending,
            count: 1,
        });
        let effects = app.update(press(KeyCode::Enter));
        assert!(matches!(effects[1], Effect::FetchSeason { show_id: 9, season: 1 }));

        app.update(Msg::SeasonLoaded {
            show_id: 9,
            season: 1,
            result: Ok(Season {
                season_number: 1,
                episodes: vec![
                    Episode {
                        episode_number: 1,
                        ..Episode::default()
                    },
                    Episode {
                        episode_number: 2,
                        ..Episode::default()
                    },
                ],
            }),
        });
        app.update(press(KeyCode::Down));
        let effects = app.update(press(KeyCode::Enter));
        let wanted = EpisodeRef::new(1, 2);
        assert!(matches!(effects[0], Effect::ResolveStream { episode: Some(e), .. } if e == wanted));

        app.update(Msg::StreamResolved {
            id: 9,
            episode: Some(EpisodeRef::new(1, 1)),
            result: Ok("https://stale".into()),
        });
        assert_eq!(app.details.as_ref().map(|d| d.stream.clone()), Some(StreamState::Resolving));

        app.update(Msg::StreamResolved {
            id: 9,
            episode: Some(wanted),
            result: Ok("https://cdn/e2.m3u8".into()),
        });
        let effects = app.update(press(KeyCode::Char('p')));
        assert!(matches!(effects[0], Effect::Play(ref url) if url == "https://cdn/e2.m3u8"));
    }

    #[tokio::test(start_paused = true)]
    async fn favorite_toggles() {
        let mut app = app();
        let film = card(3, MediaKind::Movie);
        fill(&app, Section::Trending, vec![film.clone()]);
        app.update(Msg::SectionLoaded {
            section: Section::Trending,
            count: 1,
        });
        app.update(press(KeyCode::Enter));
        app.update(press(KeyCode::Char('f')));
        assert!(app.is_favorite(&film));
        app.update(press(KeyCode::Char('f')));
        assert!(!app.is_favorite(&film));
    }

    #[tokio::test(start_paused = true)]
    async fn short_queries_do_not_search() {
        let mut app = app();
        app.update(press(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        assert!(app.update(press(KeyCode::Char('a'))).is_empty());
        assert!(app.update(press(KeyCode::Char('b'))).is_empty());
        let effects = app.update(press(KeyCode::Char('c')));
        assert!(matches!(effects[0], Effect::Search { ref query, .. } if query == "abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn surrounding_spaces_do_not_count_towards_minimum() {
        let mut app = app();
        app.update(press(KeyCode::Char('/')));
        for ch in "  ab".chars() {
            assert!(app.update(press(KeyCode::Char(ch))).is_empty());
        }
        let effects = app.update(press(KeyCode::Char('c')));
        assert!(matches!(effects[0], Effect::Search { ref query, .. } if query == "abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_search_results_are_dropped() {
        let mut app = app();
        app.update(press(KeyCode::Char('/')));
        for ch in "heat".chars() {
            app.update(press(KeyCode::Char(ch)));
        }
        let current = app.search.current();
        app.update(Msg::SearchCompleted {
            query: "hea".into(),
            generation: current - 1,
            result: Ok(vec![card(1, MediaKind::Movie)]),
        });
        let search_row = app.grid().index_of(Section::Search).expect("row");
        assert_eq!(app.grid().row_len(search_row), 0);

        app.update(Msg::SearchCompleted {
            query: "heat".into(),
            generation: current,
            result: Ok(vec![card(1, MediaKind::Movie), card(2, MediaKind::Movie)]),
        });
        assert_eq!(app.grid().row_len(search_row), 2);
        assert!(!app.search.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn escape_clears_search() {
        let mut app = app();
        app.update(press(KeyCode::Char('/')));
        fill(&app, Section::Search, vec![card(1, MediaKind::Movie)]);
        app.update(press(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Browse);
        let search_row = app.grid().index_of(Section::Search).expect("row");
        assert_eq!(app.grid().row_len(search_row), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn navbar_links_jump_to_rows() {
        let mut app = app();
        fill(&app, Section::Tv, vec![card(4, MediaKind::Tv)]);
        // Trending -> Continue -> Search -> Navbar.
        for _ in 0..3 {
            app.update(press(KeyCode::Up));
            settle().await;
        }
        assert_eq!(app.navigator.cursor().row, Section::Navbar.index());
        for _ in 0..3 {
            app.update(press(KeyCode::Right));
            settle().await;
        }
        app.update(press(KeyCode::Enter));
        assert_eq!(app.navigator.cursor(), Cursor::new(Section::Tv.index(), 0));
        assert_eq!(app.indicator.map(|(section, _)| section), Some(Section::Tv));
    }

    #[tokio::test(start_paused = true)]
    async fn page_keys_scroll_without_moving() {
        let mut app = app();
        fill(&app, Section::Trending, (0..20).map(|id| card(id, MediaKind::Movie)).collect());
        let before = app.navigator.cursor();
        app.update(press(KeyCode::PageDown));
        assert_eq!(app.navigator.cursor(), before);
        assert_eq!(app.binder.target_offset(before.row), 80.0);
    }
}
