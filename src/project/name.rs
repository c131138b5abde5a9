//! Default project name suggestions.

use chrono::Utc;

const ADJECTIVES: &[&str] = &[
    "fluffy", "lunar", "bright", "quiet", "rapid", "stellar", "cosmic", "gentle", "crisp",
    "vivid", "bold", "silver",
];

const NOUNS: &[&str] = &[
    "flare", "orbit", "nebula", "comet", "aurora", "harbor", "meadow", "pixel", "summit",
    "tide", "canyon", "galaxy",
];

/// Generate a `<adjective>-<noun>` directory name.
pub fn generate_project_name() -> String {
    let seed = Utc::now().timestamp_subsec_nanos() as usize;
    project_name_from_seed(seed)
}

/// Deterministic variant of [`generate_project_name`].
pub fn project_name_from_seed(seed: usize) -> String {
    let adjective = ADJECTIVES[seed % ADJECTIVES.len()];
    let noun = NOUNS[(seed / ADJECTIVES.len()) % NOUNS.len()];
    format!("{adjective}-{noun}")
}
