//! The nine-element description format.
//!
//! A description is a sequence of sections separated by blank lines. Each
//! section starts with a bracketed marker line followed by the section text:
//!
//! ```text
//! 【场景描述】
//! Field engineers file reports offline.
//!
//! 【目标】
//! Reports sync within a minute of reconnecting.
//! ```

use crate::model::NineElements;

pub const SCENARIO: &str = "【场景描述】";
pub const PROBLEM: &str = "【解决的问题】";
pub const CURRENT_SOLUTION: &str = "【当前解决方案】";
pub const GOAL: &str = "【目标】";
pub const EXPECTED_SOLUTION: &str = "【预期解决方案】";
pub const VALUE: &str = "【价值】";
pub const OTHER_INFO: &str = "【其他信息】";

fn sections(e: &NineElements) -> [(&'static str, &String); 7] {
    [
        (SCENARIO, &e.scenario),
        (PROBLEM, &e.problem),
        (CURRENT_SOLUTION, &e.current_solution),
        (GOAL, &e.goal),
        (EXPECTED_SOLUTION, &e.expected_solution),
        (VALUE, &e.value),
        (OTHER_INFO, &e.other_info),
    ]
}

fn slot<'a>(e: &'a mut NineElements, marker: &str) -> Option<&'a mut String> {
    match marker {
        SCENARIO => Some(&mut e.scenario),
        PROBLEM => Some(&mut e.problem),
        CURRENT_SOLUTION => Some(&mut e.current_solution),
        GOAL => Some(&mut e.goal),
        EXPECTED_SOLUTION => Some(&mut e.expected_solution),
        VALUE => Some(&mut e.value),
        OTHER_INFO => Some(&mut e.other_info),
        _ => None,
    }
}

const MARKERS: [&str; 7] = [
    SCENARIO,
    PROBLEM,
    CURRENT_SOLUTION,
    GOAL,
    EXPECTED_SOLUTION,
    VALUE,
    OTHER_INFO,
];

/// Render every non-empty field as `marker\nvalue\n\n`, in template order.
pub fn render_description(elements: &NineElements) -> String {
    let mut out = String::new();
    for (marker, value) in sections(elements) {
        if value.is_empty() {
            continue;
        }
        out.push_str(marker);
        out.push('\n');
        out.push_str(value);
        out.push_str("\n\n");
    }
    out
}

/// Split a rendered description back into its fields.
///
/// Sections without a known marker are ignored. A field whose text itself
/// contained a blank line only keeps the part before it.
pub fn parse_description(description: &str) -> NineElements {
    let mut elements = NineElements::default();
    for section in split_sections(description) {
        let Some(marker) = MARKERS.iter().find(|m| section.starts_with(**m)) else {
            continue;
        };
        if let Some(field) = slot(&mut elements, marker) {
            *field = section[marker.len()..].trim().to_string();
        }
    }
    elements
}

/// Groups of consecutive lines, split wherever a line is empty or whitespace.
fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current.join("\n"));
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NineElements {
        NineElements {
            scenario: "Warehouse staff scan parcels".into(),
            problem: "Scanners drop offline".into(),
            goal: "No lost scans".into(),
            other_info: "Pilot in Q3\nsecond line".into(),
            ..Default::default()
        }
    }

    #[test]
    fn render_skips_empty_fields_and_keeps_order() {
        let text = render_description(&sample());
        assert_eq!(
            text,
            "【场景描述】\nWarehouse staff scan parcels\n\n\
             【解决的问题】\nScanners drop offline\n\n\
             【目标】\nNo lost scans\n\n\
             【其他信息】\nPilot in Q3\nsecond line\n\n"
        );
    }

    #[test]
    fn render_of_empty_elements_is_empty() {
        assert_eq!(render_description(&NineElements::default()), "");
    }

    #[test]
    fn parse_recovers_rendered_fields() {
        let original = sample();
        assert_eq!(parse_description(&render_description(&original)), original);
    }

    #[test]
    fn parse_ignores_unknown_sections_and_tolerates_whitespace_lines() {
        let text = "intro text\n\n【目标】\n  ship it  \n \t\n【备注】\nignored\n\n\
                    【价值】\nsaves time";
        let parsed = parse_description(text);
        assert_eq!(parsed.goal, "ship it");
        assert_eq!(parsed.value, "saves time");
        assert_eq!(parsed.scenario, "");
    }

    #[test]
    fn parse_of_empty_input_is_all_empty() {
        assert_eq!(parse_description(""), NineElements::default());
    }
}
