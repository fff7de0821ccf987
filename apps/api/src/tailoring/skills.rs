//! Skill normalisation: canonical spellings and de-duplication.

/// Lower-cased spellings mapped to their canonical form.
const CANONICAL_SKILLS: &[(&[&str], &str)] = &[
    (&["next", "nextjs", "next.js"], "Next.js"),
    (&["react", "reactjs", "react.js"], "React.js"),
    (
        &["js", "javascript", "javascriptjs", "javascript.js"],
        "JavaScript",
    ),
    (&["ts", "typescript"], "TypeScript"),
    (
        &["communication", "commination", "communiction"],
        "Communication",
    ),
    (&["leadership"], "Leadership"),
    (&["teamwork"], "Team Collaboration"),
    (&["aws"], "AWS"),
    (&["c#"], "C#"),
    (&["tailwind", "tailwindcss"], "Tailwind CSS"),
    (&["node", "nodejs", "node.js"], "Node.js"),
    (&["mongodb", "mongo"], "MongoDB"),
    (&["sql"], "SQL"),
    (&["html"], "HTML"),
    (&["css"], "CSS"),
    (&["git"], "Git"),
    (&["docker"], "Docker"),
    (&["kubernetes", "k8s"], "Kubernetes"),
    (&["jenkins"], "Jenkins"),
    (&["jira"], "Jira"),
    (&["agile"], "Agile"),
    (&["scrum"], "Scrum"),
];

/// Returns the canonical spelling of a skill, or the skill with its first letter upper-cased.
pub fn normalize_skill(skill: &str) -> String {
    let trimmed = skill.trim();
    let lower = trimmed.to_lowercase();
    CANONICAL_SKILLS
        .iter()
        .find(|(aliases, _)| aliases.contains(&lower.as_str()))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| capitalize_first(trimmed))
}

/// Normalises every skill and drops blanks and case-insensitive duplicates,
/// keeping the first occurrence.
pub fn clean_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut cleaned = Vec::new();
    for skill in skills {
        if skill.as_ref().trim().is_empty() {
            continue;
        }
        let normalized = normalize_skill(skill.as_ref());
        let key = normalized.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            cleaned.push(normalized);
        }
    }
    cleaned
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
