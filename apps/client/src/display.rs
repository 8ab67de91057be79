use std::fmt::{self, Write};

use colored::Colorize;
use shared::RoadmapSuggestion;

use crate::intake::{IntakeAnswers, IntakeKey};

const PROFILE_LABELS: [(IntakeKey, &str); 4] = [
    (IntakeKey::Goals, "Goals"),
    (IntakeKey::Background, "Background"),
    (IntakeKey::Skills, "Current Skills"),
    (IntakeKey::Time, "Time Commitment"),
];

/// "Step N of M" plus a bar with one cell per question.
pub fn render_progress(step: usize, total: usize) -> String {
    let bar: String = (1..=total)
        .map(|i| {
            if i <= step {
                "■".purple().to_string()
            } else {
                "□".dimmed().to_string()
            }
        })
        .collect();
    format!("{bar}  Step {step} of {total}")
}

/// Renders a roadmap with the user's answers echoed back.
pub fn render_roadmap(roadmap: &RoadmapSuggestion, answers: &IntakeAnswers) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_roadmap(&mut out, roadmap, answers);
    out
}

fn write_roadmap(
    out: &mut String,
    roadmap: &RoadmapSuggestion,
    answers: &IntakeAnswers,
) -> fmt::Result {
    writeln!(out, "✨ {}", roadmap.title.bold().purple())?;
    writeln!(out)?;

    writeln!(out, "{}", "Your Profile".bold())?;
    for (key, label) in PROFILE_LABELS {
        writeln!(out, "  {}: {}", label.purple(), answers.get(key))?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "Learning Path".bold())?;
    writeln!(out, "  {}", roadmap.description)?;
    for (index, step) in roadmap.steps.iter().enumerate() {
        writeln!(out, "  {}. {step}", (index + 1).to_string().purple().bold())?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "Recommended Resources".bold())?;
    for resource in &roadmap.resources {
        write!(
            out,
            "  • {} [{}]",
            resource.name.bold(),
            resource.resource_type.purple()
        )?;
        if let Some(url) = &resource.url {
            write!(out, " {}", url.underline())?;
        }
        writeln!(out)?;
    }
    Ok(())
}
