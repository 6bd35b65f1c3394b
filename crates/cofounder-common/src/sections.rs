/// Splitter for the generated markdown.
///
/// The model is asked to answer with level-2 headings, optionally numbered:
/// - `## Impact & Vision`
/// - `## 1. Idea Clarity`
///
/// Each `##` heading opens a section that runs until the next `##` heading or EOF.
/// `###` and deeper headings are ordinary content. Text before the first heading is
/// dropped.
use regex::Regex;

use crate::api::Section;

/// Split `markdown` into sections in order of appearance.
///
/// Total and pure: any input yields a (possibly empty) list, and the same input always
/// yields the same list.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let heading_re = Regex::new(r"^##\s+(?:\d+\.\s*)?(.+)").expect("valid regex");

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in markdown.split('\n') {
        if let Some(caps) = heading_re.captures(line) {
            if let Some(open) = current.take() {
                sections.push(close(open));
            }
            current = Some(Section {
                title: caps[1].trim().to_string(),
                content: String::new(),
            });
            continue;
        }

        if let Some(open) = current.as_mut() {
            open.content.push_str(line);
            open.content.push('\n');
        }
    }

    if let Some(open) = current {
        sections.push(close(open));
    }

    sections
}

fn close(mut section: Section) -> Section {
    section.content = section.content.trim().to_string();
    section
}
