use crate::clipboard::CopyFeedback;
use crate::error::{FormError, GenerateError};
use crate::models::{
    option_index, AppConfig, BackendStatus, GenerationRequest, GenerationResponse, AUDIENCES,
    BLOG_TYPES, TONES,
};
use crate::stats::Stats;

use std::time::{Duration, Instant};

pub const GENERATE_LABEL: &str = "Generate Blog Post";
pub const GENERATING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Topic,
    BlogType,
    WordCount,
    Tone,
    Audience,
    GenerateButton,
    CopyButton,
}

impl Field {
    const fn next_raw(self) -> Self {
        match self {
            Self::Topic => Self::BlogType,
            Self::BlogType => Self::WordCount,
            Self::WordCount => Self::Tone,
            Self::Tone => Self::Audience,
            Self::Audience => Self::GenerateButton,
            Self::GenerateButton => Self::CopyButton,
            Self::CopyButton => Self::Topic,
        }
    }

    const fn prev_raw(self) -> Self {
        match self {
            Self::Topic => Self::CopyButton,
            Self::BlogType => Self::Topic,
            Self::WordCount => Self::BlogType,
            Self::Tone => Self::WordCount,
            Self::Audience => Self::Tone,
            Self::GenerateButton => Self::Audience,
            Self::CopyButton => Self::GenerateButton,
        }
    }
}

/// What the output area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Placeholder,
    Loading,
    Content(String),
    Error(String),
}

impl Output {
    /// The literal text of the output area, as the copy action sees it.
    pub fn text(&self) -> &str {
        match self {
            Self::Content(text) | Self::Error(text) => text,
            Self::Placeholder | Self::Loading => "",
        }
    }
}

/// In-flight guard and start time for the one outstanding request.
#[derive(Debug, Default)]
pub struct GenerationState {
    in_flight: bool,
    started_at: Option<Instant>,
}

impl GenerationState {
    /// Returns false when a request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.started_at = Some(Instant::now());
        true
    }

    pub const fn finish(&mut self) {
        self.in_flight = false;
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.map_or(Duration::ZERO, |start| start.elapsed())
    }
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub exit_pending: bool,
    pub alert: Option<String>,

    // Form
    pub focus: Field,
    pub topic: String,
    pub blog_type: usize,
    pub word_count: String,
    pub tone: usize,
    pub audience: usize,

    // Output
    pub output: Output,
    pub output_scroll: usize,
    pub copy_visible: bool,
    pub copy: CopyFeedback,
    pub stats: Stats,
    pub generation: GenerationState,

    pub backend: BackendStatus,
    pub last_model: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            should_quit: false,
            show_help: false,
            exit_pending: false,
            alert: None,
            focus: Field::Topic,
            topic: String::new(),
            blog_type: option_index(BLOG_TYPES, &defaults.blog_type),
            word_count: defaults.word_count.to_string(),
            tone: option_index(TONES, &defaults.tone),
            audience: option_index(AUDIENCES, &defaults.audience),
            output: Output::Placeholder,
            output_scroll: 0,
            copy_visible: false,
            copy: CopyFeedback::new(),
            stats: Stats::default(),
            generation: GenerationState::default(),
            backend: BackendStatus::Unknown,
            last_model: None,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn blog_type(&self) -> &'static str {
        BLOG_TYPES[self.blog_type % BLOG_TYPES.len()]
    }

    pub fn tone(&self) -> &'static str {
        TONES[self.tone % TONES.len()]
    }

    pub fn audience(&self) -> &'static str {
        AUDIENCES[self.audience % AUDIENCES.len()]
    }

    pub const fn generate_label(&self) -> &'static str {
        if self.generation.is_in_flight() {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_raw();
        if self.focus == Field::CopyButton && !self.copy_visible {
            self.focus = self.focus.next_raw();
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_raw();
        if self.focus == Field::CopyButton && !self.copy_visible {
            self.focus = self.focus.prev_raw();
        }
    }

    /// Step the focused choice field forward or back, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let (index, len) = match self.focus {
            Field::BlogType => (&mut self.blog_type, BLOG_TYPES.len()),
            Field::Tone => (&mut self.tone, TONES.len()),
            Field::Audience => (&mut self.audience, AUDIENCES.len()),
            _ => return,
        };
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    /// Text buffer behind the focused field, if it takes typed input.
    pub fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Topic => Some(&mut self.topic),
            Field::WordCount => Some(&mut self.word_count),
            _ => None,
        }
    }

    pub fn read_form(&self) -> Result<GenerationRequest, FormError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(FormError::EmptyTopic);
        }

        let word_count = self
            .word_count
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidWordCount)?;

        Ok(GenerationRequest {
            topic: topic.to_string(),
            blog_type: self.blog_type().to_string(),
            word_count,
            tone: self.tone().to_string(),
            audience: self.audience().to_string(),
        })
    }

    /// Validate the form and enter busy state.
    ///
    /// Returns `None` without touching any state when a request is already
    /// outstanding, and raises an alert when the form is invalid.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if self.generation.is_in_flight() {
            tracing::debug!("generation already in flight, ignoring trigger");
            return None;
        }

        let request = match self.read_form() {
            Ok(request) => request,
            Err(err) => {
                self.alert = Some(err.to_string());
                return None;
            }
        };

        self.generation.begin();
        self.output = Output::Loading;
        self.output_scroll = 0;
        self.copy_visible = false;
        if self.focus == Field::CopyButton {
            self.focus = Field::GenerateButton;
        }

        Some(request)
    }

    pub fn finish_generation(&mut self, outcome: Result<GenerationResponse, GenerateError>) {
        match outcome {
            Ok(response) => {
                self.stats = Stats::compute(&response.content, self.generation.elapsed());
                tracing::info!(
                    words = self.stats.words,
                    seconds = self.stats.generation_secs,
                    "blog post generated"
                );
                self.output = Output::Content(response.content);
                self.copy_visible = true;
                if response.model_used.is_some() {
                    self.last_model = response.model_used;
                }
            }
            Err(err) => {
                match &err {
                    GenerateError::Server { status, detail } => {
                        tracing::warn!(status, detail = %detail, "backend rejected generation");
                    }
                    GenerateError::Transport { reason } => {
                        tracing::error!(error = %reason, "generation request failed");
                    }
                }
                self.output = Output::Error(err.to_string());
            }
        }
        self.output_scroll = 0;
        self.generation.finish();
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.output_scroll = self.output_scroll.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.output_scroll = self.output_scroll.saturating_add(amount);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_topic(topic: &str) -> App {
        let mut app = App::default();
        app.topic = topic.to_string();
        app
    }

    #[test]
    fn test_app_new_uses_config_defaults() {
        let mut config = AppConfig::default();
        config.defaults.tone = "casual".to_string();
        config.defaults.word_count = 800;
        config.defaults.audience = "nobody".to_string();

        let app = App::new(&config);
        assert_eq!(app.tone(), "casual");
        assert_eq!(app.word_count, "800");
        assert_eq!(app.audience(), "general");
        assert_eq!(app.blog_type(), "general");
        assert_eq!(app.focus, Field::Topic);
        assert_eq!(app.output, Output::Placeholder);
    }

    #[test]
    fn test_read_form_trims_topic() {
        let app = app_with_topic("   rust async   ");
        let request = app.read_form().unwrap();
        assert_eq!(request.topic, "rust async");
        assert_eq!(request.word_count, 500);
        assert_eq!(request.blog_type, "general");
        assert_eq!(request.tone, "professional");
    }

    #[test]
    fn test_read_form_rejects_blank_topic() {
        let app = app_with_topic(" \t ");
        assert_eq!(app.read_form(), Err(FormError::EmptyTopic));
    }

    #[test]
    fn test_read_form_rejects_non_numeric_word_count() {
        let mut app = app_with_topic("rust");
        app.word_count = "lots".to_string();
        assert_eq!(
            app.read_form(),
            Err(FormError::InvalidWordCount)
        );

        app.word_count = " 750 ".to_string();
        assert_eq!(app.read_form().unwrap().word_count, 750);
    }

    #[test]
    fn test_begin_generation_with_empty_topic_alerts_only() {
        let mut app = app_with_topic("");
        assert!(app.begin_generation().is_none());
        assert_eq!(app.alert.as_deref(), Some("Please enter a blog topic!"));
        assert!(!app.generation.is_in_flight());
        assert_eq!(app.output, Output::Placeholder);
        assert_eq!(app.generate_label(), GENERATE_LABEL);
    }

    #[test]
    fn test_begin_generation_enters_busy_state() {
        let mut app = app_with_topic("rust");
        app.output = Output::Content("old".to_string());
        app.copy_visible = true;

        let request = app.begin_generation();
        assert!(request.is_some());
        assert!(app.generation.is_in_flight());
        assert_eq!(app.generate_label(), GENERATING_LABEL);
        assert_eq!(app.output, Output::Loading);
        assert!(!app.copy_visible);
    }

    #[test]
    fn test_begin_generation_guard_blocks_reentry() {
        let mut app = app_with_topic("rust");
        assert!(app.begin_generation().is_some());
        assert!(app.begin_generation().is_none());
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_finish_generation_success() {
        let mut app = app_with_topic("rust");
        app.begin_generation();
        app.finish_generation(Ok(GenerationResponse {
            content: "one two three".to_string(),
            word_count: None,
            generation_time: None,
            model_used: Some("llama3.2:1b".to_string()),
        }));

        assert_eq!(app.output, Output::Content("one two three".to_string()));
        assert!(app.copy_visible);
        assert_eq!(app.stats.words, 3);
        assert_eq!(app.stats.characters, 13);
        assert_eq!(app.stats.read_time, 1);
        assert_eq!(app.last_model.as_deref(), Some("llama3.2:1b"));
        assert!(!app.generation.is_in_flight());
        assert_eq!(app.generate_label(), GENERATE_LABEL);
    }

    #[test]
    fn test_finish_generation_server_error() {
        let mut app = app_with_topic("rust");
        app.begin_generation();
        app.finish_generation(Err(GenerateError::Server {
            status: 400,
            detail: "bad topic".to_string(),
        }));

        assert_eq!(app.output, Output::Error("Error: bad topic".to_string()));
        assert!(!app.copy_visible);
        assert!(!app.generation.is_in_flight());
        assert_eq!(app.stats, Stats::default());
    }

    #[test]
    fn test_finish_generation_transport_error() {
        let mut app = app_with_topic("rust");
        app.begin_generation();
        app.finish_generation(Err(GenerateError::transport("connection refused")));

        assert_eq!(
            app.output.text(),
            "Error: Cannot connect to the API server. Please ensure the backend is running."
        );
        assert!(!app.generation.is_in_flight());
        assert_eq!(app.generate_label(), GENERATE_LABEL);
    }

    #[test]
    fn test_focus_skips_hidden_copy_button() {
        let mut app = App::default();
        app.focus = Field::GenerateButton;
        app.focus_next();
        assert_eq!(app.focus, Field::Topic);
        app.focus_prev();
        assert_eq!(app.focus, Field::GenerateButton);

        app.copy_visible = true;
        app.focus_next();
        assert_eq!(app.focus, Field::CopyButton);
        app.focus_next();
        assert_eq!(app.focus, Field::Topic);
        app.focus_prev();
        assert_eq!(app.focus, Field::CopyButton);
    }

    #[test]
    fn test_focus_prev_reverses_focus_next() {
        let mut app = App::default();
        app.copy_visible = true;

        let mut forward = vec![app.focus];
        for _ in 0..6 {
            app.focus_next();
            forward.push(app.focus);
        }
        assert_eq!(forward.last(), Some(&Field::CopyButton));

        let mut backward = vec![app.focus];
        for _ in 0..6 {
            app.focus_prev();
            backward.push(app.focus);
        }
        backward.reverse();
        assert_eq!(forward, backward);

        app.focus_prev();
        assert_eq!(app.focus, Field::CopyButton);
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let mut app = App::default();
        app.focus = Field::Tone;
        app.cycle_choice(false);
        assert_eq!(app.tone(), "persuasive");
        app.cycle_choice(true);
        assert_eq!(app.tone(), "professional");

        app.focus = Field::Topic;
        app.cycle_choice(true);
        assert_eq!(app.tone(), "professional");
    }

    #[test]
    fn test_output_text() {
        assert_eq!(Output::Loading.text(), "");
        assert_eq!(Output::Content("post".to_string()).text(), "post");
        assert_eq!(Output::Error("Error: x".to_string()).text(), "Error: x");
    }

    #[test]
    fn test_scroll() {
        let mut app = App::default();
        app.scroll_down(5);
        app.scroll_up(2);
        assert_eq!(app.output_scroll, 3);
        app.scroll_up(10);
        assert_eq!(app.output_scroll, 0);
    }
}
