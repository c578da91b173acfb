//! Outreach message templates.

use crate::models::Lead;

/// Longest message accepted for sending, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub id: &'static str,
    pub name: &'static str,
    /// Body with `{{name}}`, `{{company}}` and `{{industry}}` placeholders.
    pub content: &'static str,
}

pub static TEMPLATES: [MessageTemplate; 3] = [
    MessageTemplate {
        id: "1",
        name: "Initial Outreach",
        content: "Hi {{name}},\n\n\
I came across your profile and was impressed by your work at {{company}}. I'd love to connect and share some insights on how we've helped similar companies in {{industry}}.\n\n\
Would you be open to a quick chat this week?\n\n\
Best regards",
    },
    MessageTemplate {
        id: "2",
        name: "Follow Up",
        content: "Hi {{name}},\n\n\
I wanted to follow up on my previous message. I believe we could really help {{company}} with some of the challenges you might be facing.\n\n\
Let me know if you'd like to learn more!",
    },
    MessageTemplate {
        id: "3",
        name: "Value Proposition",
        content: "Hi {{name}},\n\n\
Quick question - are you looking to improve your {{industry}} workflow efficiency?\n\n\
We've helped companies like yours increase productivity by 40%. I'd love to show you how.\n\n\
Interested in a quick 15-min demo?",
    },
];

/// Look up a template by id or case-insensitive name.
pub fn find(key: &str) -> Option<&'static MessageTemplate> {
    TEMPLATES
        .iter()
        .find(|t| t.id == key || t.name.eq_ignore_ascii_case(key))
}

impl MessageTemplate {
    /// Fill the placeholders from a lead. `{{name}}` is the first name.
    pub fn render(&self, lead: &Lead) -> String {
        let first_name = lead.name.split_whitespace().next().unwrap_or(&lead.name);
        self.content
            .replace("{{name}}", first_name)
            .replace("{{company}}", &lead.company_name)
            .replace("{{industry}}", &lead.industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_placeholders() {
        let lead = crate::demo::leads().remove(0);
        let body = find("Initial Outreach").unwrap().render(&lead);
        assert!(body.starts_with("Hi Sarah,\n\n"));
        assert!(body.contains("your work at TechCorp"));
        assert!(body.contains("similar companies in Technology"));
        assert!(!body.contains("{{"));
    }

    #[test]
    fn test_find_by_id_or_name() {
        assert_eq!(find("2").map(|t| t.name), Some("Follow Up"));
        assert_eq!(find("value proposition").map(|t| t.id), Some("3"));
        assert!(find("Cold Call").is_none());
    }

    #[test]
    fn test_templates_fit_limit() {
        for template in &TEMPLATES {
            assert!(template.content.chars().count() < MAX_MESSAGE_LENGTH);
        }
    }
}
