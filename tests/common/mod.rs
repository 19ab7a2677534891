//! Shared test fixtures
//!
//! A small bilingual site, materialized on disk so tests exercise the
//! same loading path as a real `brochure <dir>` invocation.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use ratatui::{Terminal, backend::TestBackend};

pub const MANIFEST: &str = r#"
[site]
name = "Casa Azul"
tagline = { en = "Design studio", es = "Estudio de diseño" }
default_locale = "en"
locales = ["en", "es"]

[[pages]]
slug = "index"
title = { en = "Home", es = "Inicio" }

[[pages]]
slug = "about"
title = { en = "About", es = "Acerca" }

[[pages]]
slug = "projects"
title = { en = "Projects", es = "Proyectos" }
"#;

/// Write the fixture site under `root`.
pub fn write_site(root: &Path) {
    write_file(root, "site.toml", MANIFEST);
    write_file(
        root,
        "en/index.md",
        "Welcome to the studio.\n\n## Work\n\nSelected projects and clients.\n\n## Contact\n\nWrite to hola@example.com.\n",
    );
    write_file(
        root,
        "es/index.md",
        "Bienvenido al estudio.\n\n## Trabajo\n\nProyectos y clientes.\n\n## Contacto\n\nEscribe a hola@example.com.\n",
    );
    write_file(root, "en/about.md", "## Bio\n\nFounded in 2019.\n");
    write_file(root, "es/about.md", "## Biografía\n\nFundado en 2019.\n");
    write_file(root, "en/projects.md", "## Tools\n\nSmall, sharp ones.\n");
    write_file(root, "es/projects.md", "## Herramientas\n\nPequeñas y afiladas.\n");
}

pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Flatten the rendered buffer into a newline-joined string for
/// contains-style assertions.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
