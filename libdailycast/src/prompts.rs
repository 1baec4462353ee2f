//! Built-in prompt templates
//!
//! Each template pairs a persona (sent as the system message) with an
//! instruction body containing a `{date}` placeholder, plus the sampling
//! parameters and default destination used when none is given on the
//! command line.

use chrono::NaiveDate;

use crate::error::{DailycastError, Result};
use crate::types::{Destination, GenerationRequest};

const DATE_PLACEHOLDER: &str = "{date}";

#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub persona: &'static str,
    pub body: &'static str,
    /// `chrono` strftime format used for the `{date}` placeholder
    pub date_format: &'static str,
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub default_destination: Destination,
}

pub const TECH_NEWS: PromptTemplate = PromptTemplate {
    name: "tech-news",
    description: "Daily technology news summary sized for Twitter",
    persona: include_str!("../prompts/tech-news.persona.txt"),
    body: include_str!("../prompts/tech-news.txt"),
    date_format: "%B %d, %Y",
    model: "gpt-4",
    max_tokens: 500,
    temperature: 0.7,
    default_destination: Destination::Both,
};

pub const AI_NEWS: PromptTemplate = PromptTemplate {
    name: "ai-news",
    description: "Enthusiastic AI/ML news roundup for LinkedIn",
    persona: include_str!("../prompts/ai-news.persona.txt"),
    body: include_str!("../prompts/ai-news.txt"),
    date_format: "%B %d, %Y",
    model: "gpt-4",
    max_tokens: 800,
    temperature: 0.8,
    default_destination: Destination::LinkedIn,
};

pub const MOTIVATIONAL: PromptTemplate = PromptTemplate {
    name: "motivational",
    description: "Motivational quote with reflection for LinkedIn",
    persona: include_str!("../prompts/motivational.persona.txt"),
    body: include_str!("../prompts/motivational.txt"),
    date_format: "%A, %B %d, %Y",
    model: "gpt-4",
    max_tokens: 600,
    temperature: 0.9,
    default_destination: Destination::LinkedIn,
};

pub const HINDI_NEWS: PromptTemplate = PromptTemplate {
    name: "hindi-news",
    description: "Daily news summary in Hindi for a Facebook Page",
    persona: include_str!("../prompts/hindi-news.persona.txt"),
    body: include_str!("../prompts/hindi-news.txt"),
    date_format: "%d %B %Y",
    model: "gpt-4",
    max_tokens: 800,
    temperature: 0.7,
    default_destination: Destination::Facebook,
};

pub const INDIAN_MOTIVATIONAL: PromptTemplate = PromptTemplate {
    name: "indian-motivational",
    description: "Motivational post rooted in Indian philosophy for a Facebook Page",
    persona: include_str!("../prompts/indian-motivational.persona.txt"),
    body: include_str!("../prompts/indian-motivational.txt"),
    date_format: "%A, %B %d, %Y",
    model: "gpt-4",
    max_tokens: 700,
    temperature: 0.9,
    default_destination: Destination::Facebook,
};

pub const BUILTIN: [&PromptTemplate; 5] = [
    &TECH_NEWS,
    &AI_NEWS,
    &MOTIVATIONAL,
    &HINDI_NEWS,
    &INDIAN_MOTIVATIONAL,
];

/// Look up a built-in template by name
pub fn find(name: &str) -> Result<&'static PromptTemplate> {
    BUILTIN
        .iter()
        .copied()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let names: Vec<&str> = BUILTIN.iter().map(|t| t.name).collect();
            DailycastError::InvalidInput(format!(
                "Unknown prompt '{}'. Available prompts: {}",
                name,
                names.join(", ")
            ))
        })
}

impl PromptTemplate {
    /// Human-readable date as it appears in the prompt
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }

    /// Instruction body with the date filled in
    pub fn render(&self, date: NaiveDate) -> String {
        self.body
            .trim()
            .replace(DATE_PLACEHOLDER, &self.format_date(date))
    }

    /// Build the completion request for `date`.
    ///
    /// `model_override` replaces the template's model when set.
    pub fn to_request(&self, date: NaiveDate, model_override: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            system_instruction: self.persona.trim().to_string(),
            instruction_text: self.render(date),
            model_name: model_override.unwrap_or(self.model).to_string(),
            max_output_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_every_template_has_a_date_placeholder() {
        for template in BUILTIN {
            assert!(
                template.body.contains(DATE_PLACEHOLDER),
                "{} is missing the date placeholder",
                template.name
            );
            assert!(!template.persona.trim().is_empty());
        }
    }

    #[test]
    fn test_temperatures_stay_in_range() {
        for template in BUILTIN {
            assert!((0.7..=0.9).contains(&template.temperature), "{}", template.name);
        }
    }

    #[test]
    fn test_render_interpolates_date() {
        let rendered = TECH_NEWS.render(date());
        assert!(rendered.contains("(March 05, 2024)"));
        assert!(!rendered.contains(DATE_PLACEHOLDER));
    }

    #[test]
    fn test_weekday_date_format() {
        assert_eq!(MOTIVATIONAL.format_date(date()), "Tuesday, March 05, 2024");
        assert_eq!(HINDI_NEWS.format_date(date()), "05 March 2024");
    }

    #[test]
    fn test_to_request_uses_template_parameters() {
        let request = AI_NEWS.to_request(date(), None);
        assert_eq!(request.model_name, "gpt-4");
        assert_eq!(request.max_output_tokens, 800);
        assert_eq!(request.temperature, 0.8);
        assert!(request.system_instruction.starts_with("You are an enthusiastic AI/ML expert"));
        assert!(request.instruction_text.contains("March 05, 2024"));
    }

    #[test]
    fn test_to_request_model_override() {
        let request = TECH_NEWS.to_request(date(), Some("gpt-4o"));
        assert_eq!(request.model_name, "gpt-4o");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Hindi-News").unwrap().name, "hindi-news");
    }

    #[test]
    fn test_find_unknown_lists_available() {
        let err = find("poetry").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("tech-news"));
    }

    #[test]
    fn test_default_destinations() {
        assert_eq!(TECH_NEWS.default_destination, Destination::Both);
        assert_eq!(AI_NEWS.default_destination, Destination::LinkedIn);
        assert_eq!(INDIAN_MOTIVATIONAL.default_destination, Destination::Facebook);
    }
}
