//! Markdown to ratatui lines for page bodies.
//!
//! Level-2 headings never reach this renderer (the page parser owns
//! sectioning); what arrives here is one section's worth of prose. Pages
//! are short, so rendering runs every frame without caching.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::{Glyphs, Palette};

/// Render one section's markdown to styled lines.
pub fn render_markdown(content: &str, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    MarkdownRenderer::new(palette, glyphs).render(content)
}

struct MarkdownRenderer<'a> {
    palette: &'a Palette,
    glyphs: &'a Glyphs,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,

    // Style stack as counters, not booleans, so nesting unwinds correctly:
    // `### head with **bold**` stays bold after the `**` closes.
    heading: usize,
    bold: usize,
    italic: usize,
    strike: usize,
    link: usize,

    // Block state
    in_code_block: bool,
    code_lines: Vec<String>,
    quote_depth: usize,
    list_stack: Vec<Option<u64>>,
    link_dest: Option<String>,
    image_alt: Option<String>,
}

impl<'a> MarkdownRenderer<'a> {
    fn new(palette: &'a Palette, glyphs: &'a Glyphs) -> Self {
        Self {
            palette,
            glyphs,
            lines: Vec::new(),
            current_spans: Vec::new(),
            heading: 0,
            bold: 0,
            italic: 0,
            strike: 0,
            link: 0,
            in_code_block: false,
            code_lines: Vec::new(),
            quote_depth: 0,
            list_stack: Vec::new(),
            link_dest: None,
            image_alt: None,
        }
    }

    fn render(mut self, content: &str) -> Vec<Line<'static>> {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        for event in Parser::new_ext(content, options) {
            self.handle_event(event);
        }
        self.flush_line();
        self.lines
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.handle_text(&text),
            Event::Code(code) => self.handle_inline_code(&code),
            Event::SoftBreak => self.handle_soft_break(),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from(Span::styled(
                    self.glyphs.rule.repeat(24),
                    Style::default().fg(self.palette.bg_border),
                )));
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.current_spans.push(Span::styled(
                    marker.to_string(),
                    Style::default().fg(self.palette.text_muted),
                ));
            }
            // Raw HTML has no terminal rendering; show it as text rather
            // than dropping content on the floor.
            Event::Html(html) | Event::InlineHtml(html) => self.handle_text(&html),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.flush_line();
                if !self.lines.is_empty() {
                    self.lines.push(Line::from(""));
                }
                self.heading += 1;
            }
            Tag::Strong => self.bold += 1,
            Tag::Emphasis => self.italic += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } => {
                self.link += 1;
                self.link_dest = Some(dest_url.to_string());
            }
            Tag::Image { .. } => {
                self.image_alt = Some(String::new());
            }
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
                self.code_lines.clear();
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(index)) => {
                        let marker = format!("{indent}{index}. ");
                        *index += 1;
                        marker
                    }
                    _ => format!("{indent}{} ", self.glyphs.bullet),
                };
                self.current_spans.push(Span::styled(
                    marker,
                    Style::default().fg(self.palette.primary_dim),
                ));
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::Paragraph => {
                if !self.lines.is_empty() && self.list_stack.is_empty() && self.quote_depth == 0 {
                    self.lines.push(Line::from(""));
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.heading = self.heading.saturating_sub(1);
                self.flush_line();
                self.lines.push(Line::from(""));
            }
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link => {
                self.link = self.link.saturating_sub(1);
                // External links keep their address visible; pure anchors
                // within the document do not need one.
                if let Some(dest) = self.link_dest.take()
                    && !dest.starts_with('#')
                {
                    self.current_spans.push(Span::styled(
                        format!(" ({dest})"),
                        Style::default().fg(self.palette.text_muted),
                    ));
                }
            }
            TagEnd::Image => {
                if let Some(alt) = self.image_alt.take() {
                    let label = if alt.trim().is_empty() {
                        "[image]".to_string()
                    } else {
                        format!("[{}]", alt.trim())
                    };
                    self.current_spans.push(Span::styled(
                        label,
                        Style::default().fg(self.palette.text_muted),
                    ));
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.render_code_block();
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::Paragraph => self.flush_line(),
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
            return;
        }
        if self.in_code_block {
            for line in text.lines() {
                self.code_lines.push(line.to_string());
            }
            return;
        }
        let style = self.current_style();
        self.current_spans
            .push(Span::styled(text.to_string(), style));
    }

    fn handle_inline_code(&mut self, code: &str) {
        self.current_spans.push(Span::styled(
            code.to_string(),
            Style::default().fg(self.palette.accent),
        ));
    }

    fn handle_soft_break(&mut self) {
        if !self.in_code_block {
            self.current_spans.push(Span::raw(" "));
        }
    }

    fn current_style(&self) -> Style {
        let mut style = Style::default().fg(self.palette.text_primary);
        if self.heading > 0 {
            style = style.fg(self.palette.primary).add_modifier(Modifier::BOLD);
        }
        if self.link > 0 {
            style = style
                .fg(self.palette.accent)
                .add_modifier(Modifier::UNDERLINED);
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strike > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        style
    }

    fn flush_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current_spans.len() + 1);
        if self.quote_depth > 0 {
            let gutter = format!("{} ", self.glyphs.quote).repeat(self.quote_depth);
            spans.push(Span::styled(
                gutter,
                Style::default().fg(self.palette.bg_border),
            ));
        }
        spans.append(&mut self.current_spans);
        self.lines.push(Line::from(spans));
    }

    fn render_code_block(&mut self) {
        let style = Style::default()
            .fg(self.palette.text_secondary)
            .bg(self.palette.bg_panel);
        for line in self.code_lines.drain(..) {
            self.lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(line, style),
            ]));
        }
        self.lines.push(Line::from(""));
    }
}

#[cfg(test)]
mod tests {
    use brochure_types::ui::UiOptions;
    use ratatui::style::Modifier;
    use ratatui::text::Line;

    use crate::theme::{Glyphs, Palette, glyphs, palette};

    use super::render_markdown;

    fn theme() -> (Palette, Glyphs) {
        let options = UiOptions::default();
        (palette(options), glyphs(options))
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line]) -> String {
        lines.iter().map(|line| text_of(line) + "\n").collect()
    }

    #[test]
    fn plain_paragraphs_are_separated_by_blanks() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("First.\n\nSecond.", &palette, &glyphs);
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, ["First.", "", "Second."]);
    }

    #[test]
    fn links_keep_their_address_visible() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("See [the code](https://example.com/repo).", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains("the code"));
        assert!(text.contains("(https://example.com/repo)"));
    }

    #[test]
    fn anchor_links_stay_clean() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("Jump to [contact](#contact).", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains("contact"));
        assert!(!text.contains("(#contact)"));
    }

    #[test]
    fn nested_emphasis_unwinds_with_counters() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("**outer _inner_ still bold**", &palette, &glyphs);
        let span = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .find(|span| span.content.contains("still bold"))
            .expect("span present");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert!(!span.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn bullet_lists_use_the_theme_glyph() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("- one\n- two", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains(&format!("{} one", glyphs.bullet)));
        assert!(text.contains(&format!("{} two", glyphs.bullet)));
    }

    #[test]
    fn ordered_lists_count_up() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("1. uno\n2. dos", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains("1. uno"));
        assert!(text.contains("2. dos"));
    }

    #[test]
    fn code_blocks_come_out_indented() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("```\nlet x = 1;\n```", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains("  let x = 1;"));
    }

    #[test]
    fn blockquotes_carry_a_gutter() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("> quoted words", &palette, &glyphs);
        let text = all_text(&lines);
        assert!(text.contains(&format!("{} quoted words", glyphs.quote)));
    }

    #[test]
    fn images_become_alt_placeholders() {
        let (palette, glyphs) = theme();
        let lines = render_markdown("![a photo](photo.png)", &palette, &glyphs);
        assert!(all_text(&lines).contains("[a photo]"));
    }

    #[test]
    fn ascii_mode_emits_only_ascii_markers() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let (palette, glyphs) = (palette(options), glyphs(options));
        let lines = render_markdown("- item\n\n> quote\n\n---\n", &palette, &glyphs);
        assert!(all_text(&lines).is_ascii());
    }
}
