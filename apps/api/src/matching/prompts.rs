//! Prompt assembly for the resume scoring call.
//!
//! The job half of the prompt is built once per orchestration run; the resume
//! half is appended per candidate.

use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;

/// Builds the job-posting half of the scoring prompt, shared by every resume
/// in a run.
pub fn build_base_prompt(job: &JobRow) -> String {
    let skills = job.skills.join(", ");
    let job_description = format!(
        "Job Title: {}\nDescription: {}\nRequirements: {}\nSkills Required: {}",
        or_not_specified(&job.title),
        or_not_specified(&job.description),
        or_not_specified(&job.requirements),
        or_not_specified(&skills),
    );

    format!(
        "You are an expert AI recruiter assistant comparing a job posting with a candidate's resume.\n\
         Based on the skills, experience, and requirements, provide a percentage match score (0-100) with a detailed explanation.\n\
         \n\
         Consider these factors in your evaluation:\n\
         1. Exact skill matches: Direct matches between resume skills and job requirements\n\
         2. Related skills: Skills that are not exact matches but related to the job requirements\n\
         3. Experience level: Whether the candidate's experience aligns with the job\n\
         4. Education: How relevant the candidate's education is for the position\n\
         5. Overall suitability: An overall assessment of how well the candidate fits\n\
         \n\
         JOB POSTING:\n{job_description}\n\
         \n\
         Please respond with ONLY a JSON object in this format:\n\
         {{\n  \"matchPercentage\": 75,\n  \"explanation\": \"Detailed explanation of the match score with specific points that match or don't match\"\n}}"
    )
}

/// Appends one resume's details to the shared base prompt.
pub fn build_scoring_prompt(base_prompt: &str, resume: &ResumeRow) -> String {
    let skills = resume.skills.join(", ");
    format!(
        "{base_prompt}\n\nRESUME:\nFull Name: {}\nEmail: {}\nSkills: {}\nExperience: {}\nEducation: {}",
        or_not_specified(&resume.full_name),
        or_not_specified(&resume.email),
        or_not_specified(&skills),
        or_not_specified(&resume.experience),
        or_not_specified(&resume.education),
    )
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::testing::{job_with_skills, resume_with_skills};

    #[test]
    fn test_base_prompt_carries_job_fields() {
        let mut job = job_with_skills(&["Rust", "Tokio"]);
        job.title = "Backend Engineer".to_string();
        job.description = "Own the matching service".to_string();

        let prompt = build_base_prompt(&job);
        assert!(prompt.contains("JOB POSTING:"));
        assert!(prompt.contains("Job Title: Backend Engineer"));
        assert!(prompt.contains("Skills Required: Rust, Tokio"));
        assert!(prompt.contains("\"matchPercentage\": 75"));
    }

    #[test]
    fn test_empty_fields_become_not_specified() {
        let job = job_with_skills(&[]);
        let prompt = build_base_prompt(&job);
        assert!(prompt.contains("Skills Required: Not specified"));

        let mut resume = resume_with_skills(&["rust"]);
        resume.education = String::new();
        let prompt = build_scoring_prompt("BASE", &resume);
        assert!(prompt.contains("Education: Not specified"));
    }

    #[test]
    fn test_scoring_prompt_appends_resume_after_base() {
        let resume = resume_with_skills(&["rust"]);
        let prompt = build_scoring_prompt("BASE", &resume);
        assert!(prompt.starts_with("BASE"));
        assert!(prompt.contains("RESUME:"));
        assert!(prompt.contains("Skills: rust"));
    }
}
