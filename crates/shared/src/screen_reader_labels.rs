use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Small `{{name}}` template used for accessible names of gallery elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenReaderLabel {
    pub template: String,
    pub variables: HashMap<String, String>,
}

impl ScreenReaderLabel {
    pub const PHOTO: &'static str = "Photo {{position}} of {{total}}: {{label}}";
    pub const INDICATOR: &'static str = "Go to photo {{position}}";
    pub const POSITION: &'static str = "{{position}} / {{total}}";
    pub const UNAVAILABLE: &'static str = "Photo {{position}} unavailable";

    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
            variables: HashMap::new(),
        }
    }

    pub fn with_variable<S: Into<String>>(mut self, key: &str, value: S) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }

    /// Positions are shown one-based.
    pub fn add_position_variables(self, index: usize, total: usize) -> Self {
        self.with_variable("position", (index + 1).to_string())
            .with_variable("total", total.to_string())
    }

    pub fn render(&self) -> String {
        let mut rendered = self.template.clone();

        for (key, value) in &self.variables {
            rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
        }

        rendered
    }
}

/// "Photo 3 of 6: label"
pub fn photo_label(index: usize, total: usize, label: &str) -> String {
    ScreenReaderLabel::new(ScreenReaderLabel::PHOTO)
        .add_position_variables(index, total)
        .with_variable("label", label)
        .render()
}

/// "Go to photo 4"
pub fn indicator_label(index: usize) -> String {
    ScreenReaderLabel::new(ScreenReaderLabel::INDICATOR)
        .add_position_variables(index, 0)
        .render()
}

/// "3 / 6"
pub fn position_text(index: usize, total: usize) -> String {
    ScreenReaderLabel::new(ScreenReaderLabel::POSITION)
        .add_position_variables(index, total)
        .render()
}

pub fn unavailable_label(index: usize) -> String {
    ScreenReaderLabel::new(ScreenReaderLabel::UNAVAILABLE)
        .add_position_variables(index, 0)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_reader_label_creation() {
        let label = ScreenReaderLabel::new("Test image");
        assert_eq!(label.template, "Test image");
        assert!(label.variables.is_empty());
        assert_eq!(label.render(), "Test image");
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let label = ScreenReaderLabel::new("{{position}} {{missing}}").with_variable("position", "1");
        assert_eq!(label.render(), "1 {{missing}}");
    }

    #[test]
    fn test_photo_label_is_one_based() {
        assert_eq!(photo_label(2, 6, "Garden"), "Photo 3 of 6: Garden");
    }

    #[test]
    fn test_indicator_and_position() {
        assert_eq!(indicator_label(3), "Go to photo 4");
        assert_eq!(position_text(0, 6), "1 / 6");
        assert_eq!(unavailable_label(5), "Photo 6 unavailable");
    }
}
