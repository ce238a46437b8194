//! Deterministic keyword matcher used when the scoring service is unavailable.

use crate::matching::scorer::MatchAnalysis;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;

/// Scores a resume against a job by skill-list overlap. Pure and infallible.
///
/// A job skill counts as matched when any resume skill is a case-insensitive
/// substring of it or vice versa — permissive on purpose, so "React" still
/// catches "ReactJS". A job with no skills listed scores 0.
pub fn fallback_match(job: &JobRow, resume: &ResumeRow) -> MatchAnalysis {
    let job_skills = normalize_skills(&job.skills);
    let resume_skills = normalize_skills(&resume.skills);

    let mut matched_skills: Vec<String> = Vec::new();
    for job_skill in &job_skills {
        let hit = resume_skills
            .iter()
            .find(|rs| rs.contains(job_skill.as_str()) || job_skill.contains(rs.as_str()));
        if let Some(resume_skill) = hit {
            matched_skills.push(resume_skill.clone());
        }
    }

    let match_count = matched_skills.len();
    let total_skills = job_skills.len().max(1);
    let match_percentage =
        (((match_count as f64 / total_skills as f64) * 100.0).round() as i32).min(100);

    let matched_list = if matched_skills.is_empty() {
        "None".to_string()
    } else {
        matched_skills.join(", ")
    };
    let explanation = format!(
        "This is an automated match using AI service. Based on keyword matching, \
         found {match_count} skill matches out of {total_skills} required skills. \
         Matched skills: {matched_list}."
    );

    MatchAnalysis {
        match_percentage,
        explanation,
    }
}

/// Trims, lowercases, and comma-splits every entry, dropping empties. A skills
/// field stored as one delimited string comes out the same as a proper list.
fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
