//! Markdown page sectioning.
//!
//! A page body splits into sections at `## ` headings; whatever precedes
//! the first heading becomes the lead section. Section ids are heading
//! slugs, so nav links and the scroll-spy agree on names by construction.

use brochure_types::SectionId;

/// One parsed page of the site, in a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    sections: Vec<PageSection>,
}

/// One section of a page: the heading (absent for the lead) and the raw
/// markdown beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    id: SectionId,
    heading: Option<String>,
    markdown: String,
}

impl PageSection {
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.markdown
    }
}

impl Page {
    /// Split `source` into sections.
    ///
    /// `lead_id` names the section formed by content before the first
    /// `## ` heading (conventionally the page slug). Headings inside
    /// fenced code blocks do not split.
    #[must_use]
    pub fn parse(lead_id: SectionId, source: &str) -> Self {
        let mut sections = Vec::new();
        let mut heading: Option<String> = None;
        let mut id = lead_id;
        let mut buffer = String::new();
        let mut in_fence = false;

        let mut flush =
            |sections: &mut Vec<PageSection>, id: SectionId, heading: Option<String>, body: &str| {
                // A lead with no content at all is dropped; named sections
                // survive even when empty so their anchors keep working.
                if heading.is_none() && body.trim().is_empty() {
                    return;
                }
                sections.push(PageSection {
                    id,
                    heading,
                    markdown: body.trim_end().to_string(),
                });
            };

        for line in source.lines() {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
            }
            if !in_fence
                && let Some(text) = line.strip_prefix("## ")
            {
                flush(&mut sections, id, heading.take(), &buffer);
                buffer.clear();
                let text = text.trim();
                heading = Some(text.to_string());
                id = SectionId::from_heading(text);
                continue;
            }
            buffer.push_str(line);
            buffer.push('\n');
        }
        flush(&mut sections, id, heading, &buffer);

        Self { sections }
    }

    #[must_use]
    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    #[must_use]
    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|section| section.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
