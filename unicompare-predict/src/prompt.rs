//! Prompt construction for admission estimates.

use unicompare_core::University;

use crate::types::AdmissionProfile;

const NOT_SPECIFIED: &str = "Not specified";

/// Builds the counselor prompt for `profile` applying to `university`.
///
/// The program's tuition is looked up by title among the university's
/// programs; unknown programs read as "Not specified".
pub fn build_prompt(university: &University, profile: &AdmissionProfile) -> String {
    let program = profile
        .program
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty());

    let tuition = program
        .and_then(|title| university.programs.iter().find(|p| p.title == title))
        .map(|p| p.tuition_fee.as_str())
        .filter(|fee| !fee.is_empty())
        .unwrap_or(NOT_SPECIFIED);

    format!(
        "You are an expert university admissions counselor. Analyze the following student \
profile and university information to predict the admission chance as a percentage (0-100).

University: {university}
Program: {program}
University Requirements: {requirements}
Deadlines: {deadlines}
Program Tuition: {tuition}

Student Profile:
- GPA: {gpa}
- UNT Score: {unt}
- IELTS: {ielts}
- SAT: {sat}
- Budget: {budget}

Provide your analysis in the following JSON format:
{{
  \"chance\": <number between 0-100>,
  \"explanation\": \"<detailed explanation of why this percentage, considering all factors \
including academic performance, test scores, financial capacity, and how they align with \
university requirements>\"
}}

Only return valid JSON, no additional text.",
        university = university.name,
        program = program.unwrap_or(NOT_SPECIFIED),
        requirements = university.admissions.requirements.join(", "),
        deadlines = university.admissions.deadlines.join(", "),
        gpa = profile.gpa,
        unt = profile.unt_score,
        ielts = profile.ielts,
        sat = profile.sat,
        budget = profile.budget,
    )
}
