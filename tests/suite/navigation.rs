//! Reader journeys over a site loaded from disk.

use brochure_engine::{App, DocumentLayout, Site};
use brochure_types::{SectionBounds, SectionId};
use tempfile::tempdir;

use crate::common;

/// Fixed geometry standing in for a measure pass: three sections at
/// rows 0/100/300 with heights 100/200/150 under a 50-row header.
fn measured_layout(viewport_height: u16) -> DocumentLayout {
    DocumentLayout {
        header_height: 50,
        viewport_height,
        content_height: 450,
        sections: vec![
            SectionBounds::new(SectionId::new("index"), 0, 100),
            SectionBounds::new(SectionId::new("work"), 100, 200),
            SectionBounds::new(SectionId::new("contact"), 300, 150),
        ],
    }
}

#[test]
fn reader_journey_across_pages_and_languages() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());

    assert_eq!(app.path().to_string(), "/en/");
    app.next_page();
    assert_eq!(app.path().to_string(), "/en/about");

    app.toggle_language();
    assert_eq!(app.path().to_string(), "/es/about");
    let labels: Vec<&str> = app.nav().links().iter().map(|l| l.label()).collect();
    assert!(labels.contains(&"Biografía"));

    app.toggle_language();
    app.prev_page();
    assert_eq!(app.path().to_string(), "/en/");
}

#[test]
fn fragment_navigation_waits_for_measurement() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());

    app.open_path("/en/#contact");
    assert_eq!(app.scroll().offset(), 0);

    // The measure pass arrives; the deferred jump puts the probe row
    // (offset + header + 1 = 301) just inside Contact.
    app.update_document_layout(measured_layout(100));
    assert_eq!(app.scroll().offset(), 250);
    assert_eq!(app.nav().highlighted_link(), Some(2));
}

#[test]
fn menu_journey_jumps_and_closes() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());
    app.update_document_layout(measured_layout(100));

    app.toggle_nav();
    app.nav_select_next();
    app.nav_select_next();
    app.activate_selected_link();

    assert!(!app.nav().is_open(), "activating a link closes the menu");
    assert_eq!(app.scroll().offset(), 250);
}

#[test]
fn editing_disk_content_shows_after_reload() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());

    common::write_file(
        dir.path(),
        "en/index.md",
        "Fresh copy.\n\n## News\n\nBig news.\n\n## Contact\n\nSame address.\n",
    );
    common::write_file(
        dir.path(),
        "es/index.md",
        "Texto nuevo.\n\n## Noticias\n\nGrandes noticias.\n\n## Contacto\n\nLa misma dirección.\n",
    );
    app.reload_site();

    assert_eq!(app.status_message(), Some("Site reloaded"));
    let labels: Vec<&str> = app.nav().links().iter().map(|l| l.label()).collect();
    assert!(labels.contains(&"News"));
}

#[test]
fn reload_falls_back_when_the_open_page_disappears() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());
    app.open_path("/en/projects");
    assert_eq!(app.path().to_string(), "/en/projects");

    // Rewrite the manifest without the projects page.
    common::write_file(
        dir.path(),
        "site.toml",
        r#"
[site]
name = "Casa Azul"
default_locale = "en"
locales = ["en", "es"]

[[pages]]
slug = "index"
title = { en = "Home", es = "Inicio" }

[[pages]]
slug = "about"
title = { en = "About", es = "Acerca" }
"#,
    );
    app.reload_site();

    assert_eq!(app.path().to_string(), "/en/");
    assert_eq!(app.site().page_count(), 2);
}

#[test]
fn broken_edit_keeps_the_old_site() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let mut app = App::with_site(Site::load_dir(dir.path()).unwrap());

    common::write_file(dir.path(), "site.toml", "[site\nbroken");
    app.reload_site();

    // The previous content stays up; the failure lands in the status bar.
    assert_eq!(app.site().page_count(), 3);
    assert!(
        app.status_message()
            .is_some_and(|msg| msg.starts_with("Reload failed"))
    );
}
