//! Resume tailoring against a job description.
//!
//! Fields this module does not know about are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tailoring::skills::{capitalize_first, clean_skills};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: ResumeContent,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Senior,
    Mid,
    Junior,
}

impl Seniority {
    pub fn detect(jd: &JobSignals) -> Self {
        if jd.mentions("senior") || jd.mentions("lead") {
            Seniority::Senior
        } else if jd.mentions("junior") || jd.mentions("entry") {
            Seniority::Junior
        } else {
            Seniority::Mid
        }
    }

    fn label(self) -> &'static str {
        match self {
            Seniority::Senior => "Senior-level",
            Seniority::Mid => "Mid-level",
            Seniority::Junior => "Junior-level",
        }
    }
}

/// Lower-cased job description with substring probes.
pub struct JobSignals(String);

impl JobSignals {
    pub fn new(job_description: &str) -> Self {
        Self(job_description.to_lowercase())
    }

    pub fn mentions(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }
}

/// (job description trigger, marker already present in the resume, skill to add)
const TECHNICAL_ADDITIONS: &[(&str, &str, &str)] = &[
    ("react", "react", "React.js"),
    ("next", "next", "Next.js"),
    ("typescript", "typescript", "TypeScript"),
    ("full stack", "full stack", "Full Stack Development"),
    ("senior", "leadership", "Technical Leadership"),
    ("frontend", "frontend", "Frontend Development"),
    ("backend", "backend", "Backend Development"),
];

const SOFT_ADDITIONS: &[(&str, &[&str])] = &[
    ("senior", &["Leadership", "Team Management"]),
    ("communication", &["Communication", "Collaboration"]),
    ("team", &["Team Collaboration"]),
];

const ALWAYS_SOFT: &[&str] = &["Problem Solving", "Adaptability"];

const SUMMARY_HIGHLIGHTS: &[(&str, &str)] = &[
    ("react", "Specializes in building responsive React applications"),
    ("next", "Experienced with Next.js and modern web development"),
    (
        "full stack",
        "Full-stack developer with end-to-end project experience",
    ),
    (
        "senior",
        "Proven leadership in technical projects and team mentoring",
    ),
];

const SUMMARY_CLOSING: &str =
    "Strong problem-solving abilities and commitment to delivering high-quality solutions.";

const RESPONSIBILITY_ADDITIONS: &[(&str, &str)] = &[
    (
        "react",
        "Developed responsive React applications with modern JavaScript and TypeScript.",
    ),
    (
        "next",
        "Built scalable applications using Next.js framework with server-side rendering.",
    ),
    (
        "frontend",
        "Created responsive user interfaces and optimized frontend performance.",
    ),
    (
        "backend",
        "Developed robust backend APIs and database solutions.",
    ),
];

const ACHIEVEMENT_ADDITIONS: &[(&str, &str)] = &[
    (
        "react",
        "Improved application performance by 40% through React optimization.",
    ),
    (
        "next",
        "Reduced page load times by 60% using Next.js optimization techniques.",
    ),
];

const DEFAULT_RESPONSIBILITIES: &str =
    "Developed and maintained high-quality applications using modern technologies.";

/// Tailors `resume` to `job_description`.
pub fn tailor_resume(resume: &ResumeData, job_description: &str) -> ResumeData {
    let jd = JobSignals::new(job_description);
    let seniority = Seniority::detect(&jd);
    let content = &resume.content;

    let original_technical = clean_skills(&content.skills.technical);
    let summary = build_summary(seniority, &original_technical, content.experience.len(), &jd);

    let has_marker = |marker: &str| {
        content
            .skills
            .technical
            .iter()
            .any(|s| s.to_lowercase().contains(marker))
    };
    let technical_additions = TECHNICAL_ADDITIONS
        .iter()
        .filter(|(trigger, marker, _)| jd.mentions(trigger) && !has_marker(*marker))
        .map(|(_, _, skill)| *skill);
    let technical = clean_skills(
        content
            .skills
            .technical
            .iter()
            .map(String::as_str)
            .chain(technical_additions),
    );

    let soft_additions = SOFT_ADDITIONS
        .iter()
        .filter(|(trigger, _)| jd.mentions(trigger))
        .flat_map(|(_, skills)| skills.iter().copied());
    let soft = clean_skills(
        content
            .skills
            .soft
            .iter()
            .map(String::as_str)
            .chain(soft_additions)
            .chain(ALWAYS_SOFT.iter().copied()),
    );

    let mut tailored = resume.clone();
    tailored.content.summary = Some(summary);
    tailored.content.skills = Skills {
        technical,
        soft,
        languages: clean_skills(&content.skills.languages),
        certifications: clean_skills(&content.skills.certifications),
        extra: content.skills.extra.clone(),
    };
    tailored.content.experience = content
        .experience
        .iter()
        .map(|exp| tailor_experience(exp, seniority, &jd))
        .collect();
    tailored.content.education = content.education.iter().map(tailor_education).collect();
    tailored
}

fn build_summary(
    seniority: Seniority,
    technical: &[String],
    experience_count: usize,
    jd: &JobSignals,
) -> String {
    let mut summary = format!("{} developer", seniority.label());
    if !technical.is_empty() {
        let primary: Vec<&str> = technical.iter().take(3).map(String::as_str).collect();
        summary.push_str(&format!(" with expertise in {}", primary.join(", ")));
    }
    if experience_count > 0 {
        let plural = if experience_count > 1 { "s" } else { "" };
        summary.push_str(&format!(
            " and {experience_count} year{plural} of professional experience"
        ));
    }
    for (trigger, highlight) in SUMMARY_HIGHLIGHTS {
        if jd.mentions(trigger) {
            summary.push_str(". ");
            summary.push_str(highlight);
        }
    }
    summary.push_str(". ");
    summary.push_str(SUMMARY_CLOSING);
    summary
}

fn tailor_experience(exp: &Experience, seniority: Seniority, jd: &JobSignals) -> Experience {
    let mut responsibilities = exp.responsibilities.clone().unwrap_or_default();
    for (trigger, sentence) in RESPONSIBILITY_ADDITIONS {
        if jd.mentions(trigger) {
            append_sentence(&mut responsibilities, sentence);
        }
    }
    if responsibilities.trim().is_empty() {
        responsibilities = DEFAULT_RESPONSIBILITIES.to_string();
    }

    let mut achievements = exp.achievements.clone().unwrap_or_default();
    append_sentence(
        &mut achievements,
        match seniority {
            Seniority::Senior => {
                "Led development team of 3+ developers and mentored junior developers."
            }
            Seniority::Junior => {
                "Successfully completed projects ahead of schedule with high code quality."
            }
            Seniority::Mid => "Delivered projects within deadlines with positive stakeholder feedback.",
        },
    );
    for (trigger, sentence) in ACHIEVEMENT_ADDITIONS {
        if jd.mentions(trigger) {
            append_sentence(&mut achievements, sentence);
        }
    }

    Experience {
        role: exp.role.as_deref().map(capitalize_first),
        company: exp.company.as_deref().map(capitalize_first),
        responsibilities: Some(responsibilities),
        achievements: Some(achievements),
        extra: exp.extra.clone(),
    }
}

fn tailor_education(edu: &Education) -> Education {
    Education {
        degree: edu.degree.as_deref().map(capitalize_first),
        institution: edu.institution.as_deref().map(capitalize_first),
        extra: edu.extra.clone(),
    }
}

/// Appends a full sentence, inserting the missing terminator and space.
fn append_sentence(buf: &mut String, sentence: &str) {
    let trimmed_len = buf.trim_end().len();
    buf.truncate(trimmed_len);
    if !buf.is_empty() {
        if !buf.ends_with(&['.', '!', '?'][..]) {
            buf.push('.');
        }
        buf.push(' ');
    }
    buf.push_str(sentence);
}
