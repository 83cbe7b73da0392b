//! Plain-text rendering of catalog records for the terminal

use std::fmt::Write;

use unicompare_core::{ComparisonTable, Program, SeedOutcome, University};
use unicompare_predict::Prediction;

const COLUMN_WIDTH: usize = 34;

/// One line per university: id, name and location.
pub fn summary_line(university: &University) -> String {
    format!(
        "{:<10} {:<40} {}",
        university.id, university.name, university.location
    )
}

fn section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// Full multi-line profile of a university.
pub fn university_detail(university: &University) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", university.name, university.id);
    let _ = writeln!(out, "{}", university.location);

    if let Some(mission) = university.mission_text() {
        let _ = writeln!(out, "\nMission:\n  {mission}");
    }
    if let Some(history) = university.history.as_deref().filter(|h| !h.trim().is_empty()) {
        let _ = writeln!(out, "\nHistory:\n  {history}");
    }

    section(&mut out, "Achievements", &university.achievements);
    section(&mut out, "Requirements", &university.admissions.requirements);
    section(&mut out, "Deadlines", &university.admissions.deadlines);
    section(&mut out, "Scholarships", &university.admissions.scholarships);
    section(&mut out, "Partners", &university.cooperation.partners);
    section(&mut out, "Exchange programs", &university.cooperation.exchange_programs);

    if !university.cooperation.foreign_student_info.is_empty() {
        let _ = writeln!(
            out,
            "\nInternational students:\n  {}",
            university.cooperation.foreign_student_info
        );
    }

    if !university.programs.is_empty() {
        let _ = writeln!(out, "\nPrograms:");
        for program in &university.programs {
            let _ = writeln!(
                out,
                "  {:<12} {} ({})",
                program.id, program.title, program.tuition_fee
            );
        }
    }

    if let Some(tour) = university.tour_3d_url.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "\n3D tour: {tour}");
    }
    out
}

/// Program page: title, owning university, fee, duration, description.
pub fn program_detail(university: &University, program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", program.title);
    let _ = writeln!(out, "{} - {}", university.name, university.location);
    if let Some(faculty) = program.faculty.as_deref().filter(|f| !f.is_empty()) {
        let _ = writeln!(out, "Faculty:  {faculty}");
    }
    let _ = writeln!(out, "Duration: {}", program.duration);
    let _ = writeln!(out, "Tuition:  {}", program.tuition_fee);
    if !program.description.is_empty() {
        let _ = writeln!(out, "\n{}", program.description);
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// Side-by-side table, one column per compared university.
pub fn comparison_table(table: &ComparisonTable) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<14}", "");
    for university in &table.universities {
        let _ = write!(out, "{:<width$}", truncate(&university.name, COLUMN_WIDTH - 2), width = COLUMN_WIDTH);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{:-<1$}", "", 14 + COLUMN_WIDTH * table.universities.len());

    for row in &table.rows {
        let _ = write!(out, "{:<14}", row.label);
        for value in &row.values {
            let _ = write!(out, "{:<width$}", truncate(value, COLUMN_WIDTH - 2), width = COLUMN_WIDTH);
        }
        let _ = writeln!(out);
    }
    out
}

/// What a seed request did.
pub fn seed_report(outcome: &SeedOutcome) -> String {
    if !outcome.seeded {
        return "Remote collection already populated, nothing seeded.".to_string();
    }
    let mut out = format!("Seeded {} universities:", outcome.universities.len());
    for university in &outcome.universities {
        let _ = write!(out, "\n{}", summary_line(university));
    }
    out
}

/// Prediction summary with the provider that produced it.
pub fn prediction(prediction: &Prediction) -> String {
    format!(
        "Admission chance: {:.0}%\n\n{}\n\n(estimated by {})\n",
        prediction.chance, prediction.explanation, prediction.provider
    )
}
