//! First-party templates offered by the template prompt.

use crate::ui::PromptOption;

/// A template listed in the interactive picker.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TEMPLATES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "basics",
        title: "A basic, minimal starter",
        description: "recommended",
    },
    CatalogEntry {
        id: "minimal",
        title: "Empty",
        description: "only the essentials",
    },
    CatalogEntry {
        id: "blog",
        title: "Blog",
        description: "posts, tags and an RSS feed",
    },
    CatalogEntry {
        id: "portfolio",
        title: "Portfolio",
        description: "showcase pages and a contact form",
    },
];

/// Catalog entries as select options.
pub fn template_options() -> Vec<PromptOption> {
    TEMPLATES
        .iter()
        .map(|t| PromptOption::new(format!("{} ({})", t.title, t.description), t.id))
        .collect()
}

/// Identifier preselected in the picker.
pub fn default_template() -> &'static str {
    TEMPLATES[0].id
}
