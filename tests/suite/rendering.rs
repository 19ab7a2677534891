//! Full-stack rendering: disk site -> engine -> ratatui buffer.

use brochure_engine::{App, Site, UiOptions};
use brochure_tui::draw;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::tempdir;

use crate::common;

fn disk_app(root: &std::path::Path) -> App {
    common::write_site(root);
    let mut app = App::with_site(Site::load_dir(root).unwrap());
    // Animations are driven by wall-clock frames; keep tests still.
    app.set_ui_options(UiOptions {
        reduced_motion: true,
        ..UiOptions::default()
    });
    app
}

fn draw_sized(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    terminal
}

#[test]
fn draws_a_disk_site_end_to_end() {
    let dir = tempdir().unwrap();
    let mut app = disk_app(dir.path());

    let terminal = draw_sized(&mut app, 80, 24);
    let text = common::buffer_text(&terminal);
    assert!(text.contains("Casa Azul"));
    assert!(text.contains("Work"));
    assert!(text.contains("Contact"));

    // The draw measured real geometry and reported it back.
    assert_eq!(app.layout().sections.len(), 3);
    assert!(app.layout().content_height > 0);
}

#[test]
fn language_toggle_redraws_in_spanish() {
    let dir = tempdir().unwrap();
    let mut app = disk_app(dir.path());

    app.toggle_language();
    let terminal = draw_sized(&mut app, 80, 24);
    let text = common::buffer_text(&terminal);
    assert!(text.contains("Trabajo"));
    assert!(text.contains("Contacto"));
    assert!(!text.contains("## "), "headings render styled, not raw");
}

#[test]
fn scroll_spy_follows_real_measured_sections() {
    let dir = tempdir().unwrap();
    let mut app = disk_app(dir.path());

    // A short terminal forces scrolling even on the small fixture page.
    draw_sized(&mut app, 80, 10);
    assert!(app.scroll().is_scrollable());

    app.scroll_to_bottom();
    draw_sized(&mut app, 80, 10);
    let last = app.layout().sections.len() - 1;
    assert_eq!(app.nav().highlighted_link(), Some(last));
}

#[test]
fn menu_overlay_renders_over_the_document() {
    let dir = tempdir().unwrap();
    let mut app = disk_app(dir.path());

    app.toggle_nav();
    let terminal = draw_sized(&mut app, 80, 24);
    let text = common::buffer_text(&terminal);
    assert!(text.contains("Contents"));

    app.close_nav();
    let terminal = draw_sized(&mut app, 80, 24);
    assert!(!common::buffer_text(&terminal).contains("Contents"));
}
