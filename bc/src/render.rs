//! Plain-text rendering
//!
//! Produces the copy/export form of a [`Plan`]. Section numbers are assigned
//! while walking [`Plan::sections`], so an absent crisis plan shifts the
//! closing sections down without any special casing.

use tracing::debug;

use crate::plan::{CrisisEntry, Plan, SectionBody};

/// Prefix of every numbered section heading
pub const SECTION_MARKER: char = '§';

const TITLE: &str = "FUNCTIONAL BEHAVIOR ASSESSMENT & BEHAVIOR INTERVENTION PLAN";
const BULLET: &str = "• ";
const EMPTY_FIELD: &str = "—";
const FOOTER: [&str; 2] = [
    "Generated by Behavior School — behaviorschool.com/fba-to-bip",
    "This BIP should be reviewed and customized by the student's behavior support team.",
];

fn rule() -> String {
    "─".repeat(60)
}

/// Indent applied to continuation lines of multi-line free text
const CONTINUATION: &str = "  ";

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { EMPTY_FIELD } else { value }
}

/// Push one logical line; embedded line breaks become indented continuation
/// lines so user text can never start a column-0 heading.
fn push_line(lines: &mut Vec<String>, line: String) {
    let mut parts = line.lines();
    lines.push(parts.next().unwrap_or_default().to_string());
    lines.extend(parts.map(|part| format!("{CONTINUATION}{part}")));
}

/// Render the plan as a single linear text document
pub fn render_text(plan: &Plan) -> String {
    let hr = rule();
    let mut lines: Vec<String> = Vec::new();

    lines.push(TITLE.to_string());
    lines.push(hr.clone());
    lines.push(String::new());

    let s = &plan.student;
    push_line(&mut lines, format!("Student: {}", s.name));
    push_line(
        &mut lines,
        format!("Age: {}  |  Grade: {}  |  School: {}", s.age, s.grade, s.school),
    );
    push_line(
        &mut lines,
        format!("Date of FBA: {}  |  Date of BIP: {}", s.assessment_date, s.plan_date),
    );
    push_line(&mut lines, format!("Team: {}", s.team));
    lines.push(String::new());

    for (index, section) in plan.sections().iter().enumerate() {
        let number = index + 1;
        debug!(number, id = ?section.id, "render_text: section");

        lines.push(hr.clone());
        lines.push(format!("{SECTION_MARKER}{number}. {}", section.id.title()));
        lines.push(hr.clone());

        match section.body {
            SectionBody::Definitions(definitions) => {
                for b in definitions {
                    push_line(&mut lines, format!("{BULLET}{}: {}", b.name, b.definition));
                    push_line(
                        &mut lines,
                        format!(
                            "  Frequency: {} | Duration: {} | Intensity: {}",
                            or_dash(&b.frequency),
                            or_dash(&b.duration),
                            b.intensity
                        ),
                    );
                }
            }
            SectionBody::Paragraph(text) => push_line(&mut lines, text.to_string()),
            SectionBody::Bullets(items) => {
                for item in items {
                    push_line(&mut lines, format!("{BULLET}{item}"));
                }
            }
            SectionBody::Crisis(crisis) => {
                for entry in &crisis.entries {
                    match entry {
                        CrisisEntry::Header(text) | CrisisEntry::Note(text) => {
                            push_line(&mut lines, format!("{BULLET}{text}"))
                        }
                        CrisisEntry::Step { number, text } => push_line(&mut lines, format!("  {number}. {text}")),
                    }
                }
            }
        }
        lines.push(String::new());
    }

    lines.push(hr);
    lines.extend(FOOTER.iter().map(|l| l.to_string()));
    lines.join("\n")
}

/// Number of numbered section headings in a rendered document
pub fn section_count(text: &str) -> usize {
    text.lines().filter(|l| l.starts_with(SECTION_MARKER)).count()
}
