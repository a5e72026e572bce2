//! Lyrics extraction from Genius song pages
//!
//! The REST API has no lyric bodies, so they are read from the song page:
//! current pages split the text over several
//! `div[data-lyrics-container="true"]` blocks, older ones use one `div.lyrics`.

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

fn section_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]\n]*\]").expect("valid section header regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank line regex"))
}

fn container_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| {
        Selector::parse(r#"div[data-lyrics-container="true"]"#).expect("valid lyrics container selector")
    })
}

fn legacy_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("div.lyrics").expect("valid legacy lyrics selector"))
}

pub struct LyricsExtractor {
    remove_section_headers: bool,
}

impl LyricsExtractor {
    pub fn new(remove_section_headers: bool) -> Self {
        Self { remove_section_headers }
    }

    /// Returns the lyric text of a song page, empty when the page has none.
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        let mut raw = String::new();
        for container in document.select(container_selector()) {
            collect_text(container, &mut raw);
            raw.push('\n');
        }

        if raw.trim().is_empty() {
            if let Some(block) = document.select(legacy_selector()).next() {
                collect_text(block, &mut raw);
            }
        }

        self.clean(&raw)
    }

    fn clean(&self, raw: &str) -> String {
        let text = if self.remove_section_headers {
            section_header_re().replace_all(raw, "").into_owned()
        } else {
            raw.to_string()
        };

        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let joined = lines.join("\n");
        blank_lines_re()
            .replace_all(joined.trim(), "\n\n")
            .into_owned()
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if el.name() == "br" {
                    out.push('\n');
                } else if el.attr("data-exclude-from-selection") == Some("true") {
                    // Page chrome (contributors, translations) inside the container
                } else if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}
