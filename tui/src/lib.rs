//! TUI rendering for Brochure using ratatui.
//!
//! The draw path measures before it paints: every frame the current page
//! is laid out at the present width, the measured geometry goes to the
//! app (re-clamping scroll and refreshing the active section), and only
//! then are widgets rendered. Spy state and pixels therefore always come
//! from the same measurement.

mod effects;
mod input;
pub mod markdown;
mod theme;

pub use effects::{apply_modal_effect, panel_rail_width};
pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, BorderType, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use brochure_engine::{App, DocumentLayout, Locale, SectionBounds};

use self::markdown::render_markdown;

/// Rows for the site header: name/tagline, page tabs, divider.
const HEADER_HEIGHT: u16 = 3;
/// Resting width of the nav rail overlay.
const NAV_RAIL_WIDTH: u16 = 28;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.view().ui_options;
    let palette = palette(options);
    let glyphs = glyphs(options);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Site header + page tabs
            Constraint::Min(1),                // Document
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    // Document first: it reports fresh geometry to the app, and the header,
    // status bar, and rail all read state derived from that measurement.
    draw_document(frame, app, chunks[1], &palette, &glyphs);
    draw_header(frame, app, chunks[0], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette);
    draw_nav_rail(frame, app, chunks[1], &palette, &glyphs);
    draw_notice(frame, app, &palette, &glyphs);
}

fn draw_document(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let inner = area.inner(Margin {
        vertical: 0,
        horizontal: 2,
    });
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let (lines, layout) = layout_document(app, inner.width, inner.height, palette, glyphs);
    app.update_document_layout(layout);

    let document = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll().offset(), 0));
    frame.render_widget(document, inner);

    // Only render the scrollbar when content exceeds the viewport.
    if app.scroll().is_scrollable() {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));

        // content_length = scrollable range, so the thumb bottoms out
        // exactly when the offset does.
        let mut scrollbar_state = ScrollbarState::new(usize::from(app.scroll().max_offset()))
            .position(usize::from(app.scroll().offset()));

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Renders the current page into lines and measures where each section
/// lands when wrapped at `width`.
///
/// Wrapping is per source line, so per-section counts sum to the whole
/// document's count and tops can be accumulated without a second pass.
/// The blank row between sections is charged to the section below it,
/// keeping tops contiguous.
fn layout_document(
    app: &App,
    width: u16,
    viewport_height: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> (Vec<Line<'static>>, DocumentLayout) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut sections: Vec<SectionBounds> = Vec::new();
    let mut top: u16 = 0;

    if let Some(page) = app.site().page(app.path()) {
        for (i, section) in page.sections().iter().enumerate() {
            let mut section_lines: Vec<Line<'static>> = Vec::new();
            if i > 0 {
                section_lines.push(Line::from(""));
            }
            if let Some(heading) = section.heading() {
                let underline = heading.width().min(usize::from(width)).max(1);
                section_lines.push(Line::from(Span::styled(
                    heading.to_string(),
                    styles::heading(palette),
                )));
                section_lines.push(Line::from(Span::styled(
                    glyphs.rule.repeat(underline),
                    Style::default().fg(palette.bg_border),
                )));
                section_lines.push(Line::from(""));
            }
            section_lines.extend(render_markdown(section.markdown(), palette, glyphs));

            let height = measure_lines(&section_lines, width);
            sections.push(SectionBounds::new(section.id().clone(), top, height));
            top = top.saturating_add(height);
            lines.extend(section_lines);
        }
    }

    let layout = DocumentLayout {
        header_height: HEADER_HEIGHT,
        viewport_height,
        content_height: top,
        sections,
    };
    (lines, layout)
}

/// Exact wrapped height of `lines` at `width`, measured the same way the
/// document paragraph will wrap them.
fn measure_lines(lines: &[Line<'static>], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let paragraph = Paragraph::new(Text::from(lines.to_vec())).wrap(Wrap { trim: false });
    u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX)
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let site = app.site();
    let locale = app.path().locale();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.bg_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner.inner(Margin {
            vertical: 0,
            horizontal: 1,
        }));

    let mut title_spans = vec![Span::styled(
        site.name().to_string(),
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(tagline) = site.tagline(locale) {
        title_spans.push(Span::styled(
            format!("  {tagline}"),
            Style::default().fg(palette.text_secondary),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(title_spans)), rows[0]);
    frame.render_widget(
        Paragraph::new(Line::from(locale_indicator(locale, palette, glyphs)))
            .alignment(Alignment::Right),
        rows[0],
    );

    let mut tab_spans: Vec<Span> = Vec::new();
    for (i, slug) in site.page_slugs().into_iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::styled(
                format!(" {} ", glyphs.separator),
                Style::default().fg(palette.bg_border),
            ));
        }
        let title = site.page_title(slug, locale).unwrap_or(slug);
        let style = if app.path().slug() == slug {
            styles::tab_active(palette)
        } else {
            styles::tab_inactive(palette)
        };
        tab_spans.push(Span::styled(format!("{} {title}", i + 1), style));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), rows[1]);
}

fn locale_indicator(current: Locale, palette: &Palette, glyphs: &Glyphs) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, locale) in [Locale::En, Locale::Es].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                glyphs.separator.to_string(),
                Style::default().fg(palette.bg_border),
            ));
        }
        let style = if locale == current {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_muted)
        };
        spans.push(Span::styled(locale.as_str().to_uppercase(), style));
    }
    spans
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let left = if let Some(msg) = app.status_message() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(msg.to_string(), Style::default().fg(palette.text_secondary)),
        ])
    } else {
        key_hints(palette)
    };

    let right_text = if app.scroll().is_scrollable() {
        let percent = (app.scroll().progress() * 100.0).round() as u16;
        format!("{}  {percent}% ", app.current_link())
    } else {
        format!("{} ", app.current_link())
    };
    let right_width = u16::try_from(right_text.width()).unwrap_or(u16::MAX);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(palette.text_muted),
        )))
        .alignment(Alignment::Right),
        columns[1],
    );
}

fn key_hints(palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled("m", styles::key_highlight(palette)),
        Span::styled(" menu  ", styles::key_hint(palette)),
        Span::styled("l", styles::key_highlight(palette)),
        Span::styled(" language  ", styles::key_hint(palette)),
        Span::styled("y", styles::key_highlight(palette)),
        Span::styled(" link  ", styles::key_hint(palette)),
        Span::styled("[ ]", styles::key_highlight(palette)),
        Span::styled(" pages  ", styles::key_hint(palette)),
        Span::styled("q", styles::key_highlight(palette)),
        Span::styled(" quit", styles::key_hint(palette)),
    ])
}

/// Nav rail overlay on the left edge of the document pane. Drawn while
/// open and while the closing slide is still running.
fn draw_nav_rail(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let width = panel_rail_width(
        app.view().nav_effect.as_ref(),
        app.nav().is_open(),
        NAV_RAIL_WIDTH.min(area.width),
    );
    if width == 0 {
        return;
    }
    let rail = Rect { width, ..area };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        " Contents",
        Style::default()
            .fg(palette.text_muted)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let highlighted = app.nav().highlighted_link();
    for (i, link) in app.nav().links().iter().enumerate() {
        let cursor = if i == app.nav().selected() {
            glyphs.selected
        } else {
            " "
        };
        let marker = if highlighted == Some(i) {
            glyphs.active
        } else {
            " "
        };
        let label_style = if i == app.nav().selected() {
            Style::default()
                .fg(palette.text_primary)
                .bg(palette.bg_highlight)
                .add_modifier(Modifier::BOLD)
        } else if highlighted == Some(i) {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {cursor} "), Style::default().fg(palette.primary)),
            Span::styled(format!("{marker} "), Style::default().fg(palette.accent)),
            Span::styled(link.label().to_string(), label_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter", styles::key_highlight(palette)),
        Span::styled(" go  ", styles::key_hint(palette)),
        Span::styled("Esc", styles::key_highlight(palette)),
        Span::styled(" close", styles::key_hint(palette)),
    ]));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));

    frame.render_widget(Clear, rail);
    frame.render_widget(Paragraph::new(lines).block(block), rail);
}

fn draw_notice(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs) {
    if !app.notice_visible() {
        return;
    }
    let Some(notice) = app.site().notice() else {
        return;
    };
    let locale = app.path().locale();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        notice.title.resolve(locale).to_string(),
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.extend(render_markdown(notice.body.resolve(locale), palette, glyphs));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", styles::key_highlight(palette)),
        Span::styled(" dismiss", styles::key_hint(palette)),
    ]));

    let content_width = lines.iter().map(Line::width).max().unwrap_or(10) as u16;
    let content_width = content_width.min(frame.area().width.saturating_sub(4));
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::uniform(1));

    let area = frame.area();
    let height = content_height.saturating_add(4).min(area.height);
    let width = content_width.saturating_add(4).min(area.width);
    let mut rect = Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width,
        height,
    };
    if let Some(effect) = app.view().modal_effect.as_ref() {
        rect = apply_modal_effect(effect, rect);
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        rect,
    );
}
