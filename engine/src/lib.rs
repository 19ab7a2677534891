//! Core engine for Brochure - state machine and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies.
//! The renderer measures the document every frame and reports geometry
//! back here; everything that decides *what* is on screen lives in [`App`].

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;

mod config;
mod page;
mod session;
mod site;
mod watch;

pub use config::{AppConfig, BrochureConfig, ConfigError, config_path, expand_env_vars};
pub use page::{Page, PageSection};
pub use session::{SESSION_FILE, Session};
pub use site::{LocalizedText, NoticeContent, PageEntry, Site, SiteError, SiteInfo, SiteManifest};
pub use watch::SiteWatcher;

// Re-export from types for public API
pub use brochure_types::ui::{
    AnimPhase, ModalEffect, PanelEffect, PanelEffectKind, UiOptions, ViewState,
};
pub use brochure_types::{
    DocScroll, DocumentLayout, INDEX_SLUG, Locale, NavLink, NavMenu, NoticeModal, PagePath,
    PanelState, SectionBounds, SectionId, toggle_locale_path,
};

const NAV_SLIDE_DURATION: Duration = Duration::from_millis(150);
const MODAL_POP_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataDirSource {
    System,
    Fallback,
}

#[derive(Debug, Clone)]
struct DataDir {
    path: PathBuf,
    source: DataDirSource,
}

impl DataDir {
    fn join(&self, child: &str) -> PathBuf {
        self.path.join(child)
    }
}

/// Where the site to display comes from.
#[derive(Debug)]
pub enum SiteSource {
    /// Explicit directory named on the command line or in the environment.
    Dir(PathBuf),
    /// Built-in demo content, used when nothing else is named.
    Embedded(Site),
}

/// Split an optional `#fragment` off a page path.
fn split_fragment(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('#') {
        Some((path, fragment)) if !fragment.is_empty() => (path, Some(fragment)),
        Some((path, _)) => (path, None),
        None => (raw, None),
    }
}

pub struct App {
    site: Site,
    path: PagePath,
    nav: NavMenu,
    scroll: DocScroll,
    layout: DocumentLayout,
    notice: NoticeModal,
    view: ViewState,
    /// Section to jump to once the next layout pass has measured it.
    pending_section: Option<SectionId>,
    status_message: Option<String>,
    should_quit: bool,
    tick: usize,
    data_dir: DataDir,
    watcher: Option<SiteWatcher>,
    /// Config/session writes are skipped for in-memory apps (tests).
    persist_state: bool,
}

impl App {
    /// Full ambient construction: config, session restore, file watcher.
    pub fn new(source: SiteSource) -> anyhow::Result<Self> {
        let config = match BrochureConfig::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring unusable config: {err}");
                None
            }
        };

        let mut startup_note: Option<String> = None;
        let site = match source {
            SiteSource::Dir(path) => Site::load_dir(&path)
                .with_context(|| format!("failed to load site from {}", path.display()))?,
            SiteSource::Embedded(embedded) => {
                match config.as_ref().and_then(BrochureConfig::site_dir) {
                    Some(dir) => match Site::load_dir(&dir) {
                        Ok(site) => site,
                        Err(err) => {
                            tracing::warn!("Configured site_dir unusable: {err}");
                            startup_note = Some(format!(
                                "Configured site failed to load ({err}); showing the built-in demo"
                            ));
                            embedded
                        }
                    },
                    None => embedded,
                }
            }
        };

        let mut app = Self::with_site(site);
        app.persist_state = true;

        if let Some(config) = config.as_ref() {
            app.view.ui_options = config.ui_options();
        }

        // Last session's page wins over the configured locale preference.
        let session = Session::load(&app.data_dir.join(SESSION_FILE));
        let restored = session
            .as_ref()
            .and_then(|session| session.last_path.as_deref())
            .is_some_and(|raw| app.try_open(raw));
        if !restored
            && let Some(locale) = config.as_ref().and_then(BrochureConfig::preferred_locale)
        {
            let index = PagePath::index(locale);
            if app.site.has_page(&index) {
                app.open_path(&index.to_string());
            }
        }

        let watch = config.as_ref().is_none_or(BrochureConfig::watch_enabled);
        if watch && let Some(root) = app.site.root() {
            match SiteWatcher::new(root) {
                Ok(watcher) => app.watcher = Some(watcher),
                Err(err) => tracing::warn!("File watching unavailable: {err}"),
            }
        }

        // Pop the notice in, unless the reader asked for no motion.
        if app.notice.is_visible() && !app.view.ui_options.reduced_motion {
            app.view.modal_effect = Some(ModalEffect::pop_scale(MODAL_POP_DURATION));
        }

        if let Some(note) = startup_note {
            app.set_status(note);
        } else if matches!(app.data_dir.source, DataDirSource::Fallback) {
            app.set_status(format!(
                "Using fallback data dir: {}",
                app.data_dir.path.display()
            ));
        }

        Ok(app)
    }

    /// In-memory construction: no config, no session, no watcher.
    #[must_use]
    pub fn with_site(site: Site) -> Self {
        let path = initial_path(&site);
        let mut notice = NoticeModal::new();
        if site.notice().is_some() {
            notice.show();
        }

        let mut app = Self {
            site,
            path,
            nav: NavMenu::new(),
            scroll: DocScroll::default(),
            layout: DocumentLayout::default(),
            notice,
            view: ViewState::new(),
            pending_section: None,
            status_message: None,
            should_quit: false,
            tick: 0,
            data_dir: Self::data_dir(),
            watcher: None,
            persist_state: false,
        };
        app.rebuild_nav();
        app
    }

    /// Get the base data directory for brochure.
    fn data_dir() -> DataDir {
        match dirs::data_local_dir() {
            Some(path) => DataDir {
                path: path.join("brochure"),
                source: DataDirSource::System,
            },
            None => DataDir {
                path: PathBuf::from(".").join("brochure"),
                source: DataDirSource::Fallback,
            },
        }
    }

    // ------------------------------------------------------------------
    // Navigation between pages
    // ------------------------------------------------------------------

    /// Open a page by raw path (`/es/about`, `/`, `/en/about#bio`).
    ///
    /// Unknown paths leave the current page in place and surface a status
    /// message; this never fails.
    pub fn open_path(&mut self, raw: &str) {
        if !self.try_open(raw) {
            self.set_status(format!("No page at {raw}"));
        }
    }

    fn try_open(&mut self, raw: &str) -> bool {
        let (path_part, fragment) = split_fragment(raw);
        let Some(path) = PagePath::resolve(path_part, self.site.default_locale()) else {
            return false;
        };
        if !self.site.has_page(&path) {
            return false;
        }

        self.path = path;
        self.rebuild_nav();
        self.scroll.reset();
        // Stale geometry belongs to the previous page; drop it so the spy
        // stays quiet until the next measure pass.
        self.layout.sections.clear();
        self.layout.content_height = 0;
        self.pending_section = fragment.map(SectionId::new);
        self.recompute_active();
        self.autosave_session();
        true
    }

    /// Swap the locale segment of the current path and navigate there.
    pub fn toggle_language(&mut self) {
        let before = self.path.locale();
        let target = self.path.toggled();
        self.open_path(&target);

        let after = self.path.locale();
        if after != before {
            self.set_status(after.display_name());
            if self.persist_state
                && let Err(err) = BrochureConfig::persist_locale(after)
            {
                tracing::warn!("Failed to persist locale: {err}");
            }
        }
    }

    /// Open the n-th page (manifest order) in the current locale.
    pub fn open_page_at(&mut self, index: usize) {
        let Some(slug) = self
            .site
            .page_slugs()
            .get(index)
            .map(|slug| (*slug).to_string())
        else {
            return;
        };
        let target = PagePath::new(self.path.locale(), slug);
        self.open_path(&target.to_string());
    }

    pub fn next_page(&mut self) {
        self.cycle_page(1);
    }

    pub fn prev_page(&mut self) {
        self.cycle_page(-1);
    }

    fn cycle_page(&mut self, step: isize) {
        let count = self.site.page_count();
        if count == 0 {
            return;
        }
        let current = self.site.page_position(self.path.slug()).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(count as isize) as usize;
        self.open_page_at(next);
    }

    fn rebuild_nav(&mut self) {
        let links = match self.site.page(&self.path) {
            Some(page) => page
                .sections()
                .iter()
                .map(|section| {
                    let label = match section.heading() {
                        Some(heading) => heading.to_string(),
                        None => self
                            .site
                            .page_title(self.path.slug(), self.path.locale())
                            .unwrap_or(self.path.slug())
                            .to_string(),
                    };
                    NavLink::to_section(label, section.id().clone())
                })
                .collect(),
            None => Vec::new(),
        };
        self.nav.set_links(links);
    }

    // ------------------------------------------------------------------
    // Navigation panel
    // ------------------------------------------------------------------

    pub fn toggle_nav(&mut self) {
        self.nav.toggle_visibility();
        self.start_nav_effect();
    }

    /// Close the panel if open; reports whether anything happened.
    pub fn close_nav(&mut self) -> bool {
        if !self.nav.is_open() {
            return false;
        }
        self.nav.set_visibility(false);
        self.start_nav_effect();
        true
    }

    pub fn nav_select_next(&mut self) {
        self.nav.select_next();
    }

    pub fn nav_select_prev(&mut self) {
        self.nav.select_prev();
    }

    /// Activate the link under the cursor: jump to its section, then let
    /// the panel close itself.
    pub fn activate_selected_link(&mut self) {
        let index = self.nav.selected();
        if let Some(id) = self
            .nav
            .links()
            .get(index)
            .and_then(|link| link.fragment())
            .cloned()
        {
            self.jump_to_section(&id);
        }
        let was_open = self.nav.is_open();
        self.nav.on_link_activated();
        if was_open {
            self.start_nav_effect();
        }
    }

    fn start_nav_effect(&mut self) {
        if self.view.ui_options.reduced_motion {
            self.view.nav_effect = None;
            return;
        }
        self.view.nav_effect = Some(if self.nav.is_open() {
            PanelEffect::slide_in_left(NAV_SLIDE_DURATION)
        } else {
            PanelEffect::slide_out_left(NAV_SLIDE_DURATION)
        });
    }

    // ------------------------------------------------------------------
    // Scrolling and the scroll-spy
    // ------------------------------------------------------------------

    /// Adopt freshly measured geometry from the renderer. Runs once per
    /// frame, right before drawing, so the spy always judges the layout
    /// that is about to be shown.
    pub fn update_document_layout(&mut self, layout: DocumentLayout) {
        self.scroll
            .update_layout(layout.content_height, layout.viewport_height);
        self.layout = layout;
        if let Some(target) = self.pending_section.take() {
            self.jump_to_section(&target);
        }
        self.recompute_active();
    }

    /// Put `id`'s section at the reading line. Unknown ids are ignored.
    fn jump_to_section(&mut self, id: &SectionId) -> bool {
        let Some(top) = self
            .layout
            .sections
            .iter()
            .find(|bounds| bounds.id() == id)
            .map(SectionBounds::top)
        else {
            return false;
        };
        // Offset so the spy probe (offset + header + 1) lands just inside
        // the section, mirroring anchor jumps under a sticky header.
        self.scroll.scroll_to(top.saturating_sub(self.layout.header_height));
        self.recompute_active();
        true
    }

    pub fn scroll_lines(&mut self, delta: i16) {
        self.scroll.scroll_lines(delta);
        self.recompute_active();
    }

    pub fn scroll_pages(&mut self, delta: i16) {
        self.scroll.scroll_pages(delta);
        self.recompute_active();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
        self.recompute_active();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
        self.recompute_active();
    }

    fn recompute_active(&mut self) {
        self.nav.recompute_active_section(
            self.scroll.offset(),
            self.layout.header_height,
            &self.layout.sections,
        );
    }

    // ------------------------------------------------------------------
    // Notice modal
    // ------------------------------------------------------------------

    /// Hide the notice. True exactly once per showing.
    pub fn dismiss_modal(&mut self) -> bool {
        let dismissed = self.notice.dismiss();
        if dismissed {
            self.view.modal_effect = None;
        }
        dismissed
    }

    // ------------------------------------------------------------------
    // Site lifecycle
    // ------------------------------------------------------------------

    /// Re-read the site from disk (watcher hit or manual refresh).
    pub fn reload_site(&mut self) {
        let Some(root) = self.site.root().map(Path::to_path_buf) else {
            self.set_status("Built-in demo site has nothing to reload");
            return;
        };
        match Site::load_dir(&root) {
            Ok(site) => {
                self.site = site;
                if !self.site.has_page(&self.path) {
                    self.path = initial_path(&self.site);
                    self.scroll.reset();
                }
                self.rebuild_nav();
                self.layout.sections.clear();
                self.layout.content_height = 0;
                self.recompute_active();
                self.set_status("Site reloaded");
            }
            Err(err) => self.set_status(format!("Reload failed: {err}")),
        }
    }

    /// Shareable address of the current view, with the active section as
    /// its fragment when there is one.
    #[must_use]
    pub fn current_link(&self) -> String {
        match self.nav.active_section() {
            Some(active) => format!("{}#{active}", self.path),
            None => self.path.to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Frame tick and shutdown
    // ------------------------------------------------------------------

    /// Advance animations and poll the file watcher.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        let elapsed = self.frame_elapsed();

        if let Some(effect) = self.view.nav_effect.as_mut() {
            effect.advance(elapsed);
            if matches!(effect.phase(), AnimPhase::Completed) {
                self.view.nav_effect = None;
            }
        }
        if let Some(effect) = self.view.modal_effect.as_mut() {
            effect.advance(elapsed);
            if matches!(effect.phase(), AnimPhase::Completed) {
                self.view.modal_effect = None;
            }
        }

        if self
            .watcher
            .as_ref()
            .is_some_and(SiteWatcher::drain_dirty)
        {
            self.reload_site();
        }
    }

    /// Get elapsed time since last frame and update timing.
    fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.view.last_frame);
        self.view.last_frame = now;
        elapsed
    }

    pub fn save_session(&self) -> anyhow::Result<()> {
        if !self.persist_state {
            return Ok(());
        }
        let session = Session {
            last_path: Some(self.path.to_string()),
        };
        let path = self.data_dir.join(SESSION_FILE);
        session
            .save(&path)
            .with_context(|| format!("failed to save session to {}", path.display()))
    }

    /// Best-effort session save (errors logged, not propagated).
    fn autosave_session(&self) {
        if let Err(err) = self.save_session() {
            tracing::warn!("Autosave failed: {err}");
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    // ------------------------------------------------------------------
    // Accessors for rendering
    // ------------------------------------------------------------------

    #[must_use]
    pub fn site(&self) -> &Site {
        &self.site
    }

    #[must_use]
    pub fn path(&self) -> &PagePath {
        &self.path
    }

    #[must_use]
    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    #[must_use]
    pub fn scroll(&self) -> &DocScroll {
        &self.scroll
    }

    #[must_use]
    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    #[must_use]
    pub fn notice_visible(&self) -> bool {
        self.notice.is_visible()
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Override the UI options applied from config (used by embedders).
    pub fn set_ui_options(&mut self, options: UiOptions) {
        self.view.ui_options = options;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

/// Pick the page a fresh app starts on: the default locale's index when it
/// exists, otherwise the first page the manifest declares.
fn initial_path(site: &Site) -> PagePath {
    let index = PagePath::index(site.default_locale());
    if site.has_page(&index) {
        return index;
    }
    let slug = site.page_slugs().first().map_or(INDEX_SLUG, |slug| *slug);
    PagePath::new(site.default_locale(), slug)
}
