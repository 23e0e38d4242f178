#[cfg(test)]
use crate::api::ModelEntry;
#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::ui::theme::Theme;

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new("http://test.invalid:5000", Theme::dark_default(), None)
        .expect("test app construction failed")
}

#[cfg(test)]
pub fn sample_catalog() -> Vec<ModelEntry> {
    vec![
        ModelEntry {
            id: "gpt-3.5-turbo".to_string(),
            name: "GPT-3.5 Turbo".to_string(),
            provider: "OpenAI".to_string(),
        },
        ModelEntry {
            id: "claude-3".to_string(),
            name: "Claude 3".to_string(),
            provider: "Anthropic".to_string(),
        },
    ]
}
