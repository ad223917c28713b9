//! Rendered README markup to plain terminal text.

use scraper::{ElementRef, Html, Selector};

const BLOCK_TAGS: [&str; 10] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote"];

/// Flattens the block-level elements of an HTML fragment into lines.
///
/// Nested blocks (a `<p>` inside an `<li>`) are emitted once, through the
/// outermost block. Fragments without any block element fall back to their
/// collapsed text content.
pub fn html_to_text(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let Ok(blocks) = Selector::parse(&BLOCK_TAGS.join(", ")) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for element in fragment.select(&blocks) {
        if has_block_ancestor(&element) {
            continue;
        }
        let name = element.value().name();
        match name {
            "pre" => {
                let raw: String = element.text().collect();
                lines.extend(raw.trim_end().lines().map(|line| format!("    {line}")));
            }
            "li" => lines.push(format!("  • {}", collapse(&element))),
            "blockquote" => lines.push(format!("  | {}", collapse(&element))),
            heading if heading.starts_with('h') => {
                let level = heading[1..].parse::<usize>().unwrap_or(1);
                lines.push(format!("{} {}", "#".repeat(level), collapse(&element)));
            }
            _ => lines.push(collapse(&element)),
        }
    }

    if lines.is_empty() {
        let text = collapse_text(fragment.root_element().text());
        if !text.is_empty() {
            lines.push(text);
        }
    }
    lines
}

fn has_block_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BLOCK_TAGS.contains(&ancestor.value().name()))
}

fn collapse(element: &ElementRef<'_>) -> String {
    collapse_text(element.text())
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
