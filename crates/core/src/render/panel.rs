use chrono::Local;

use super::format::{escape_html, format_rich};
use super::{IconRenderer, LucideIcons, Surface, View};
use crate::conversation::{Message, Role};
use crate::session::{SessionEvent, SessionStage};

const SUGGESTIONS_ID: &str = "aiSuggestions";
const TYPING_ID: &str = "typingIndicator";

const WELCOME_LINES: [&str; 2] = [
    "Hello! I'm Resezy AI Assistant. How can I help you today?",
    "I can answer questions about our restaurant management platform, \
     pricing, features, and help you get started.",
];

const SUGGESTIONS: [&str; 3] = [
    "What features does Resezy offer?",
    "Tell me about pricing plans",
    "How do I get started?",
];

/// The full-page chat panel.
///
/// Messages get avatars, a local `HH:MM` time stamp and rich formatting.
/// The welcome suggestions disappear as soon as the first message is
/// rendered, and come back after a reset.
pub struct PanelView<S, I = LucideIcons> {
    surface: S,
    icons: I,
    suggestions_shown: bool,
}

impl<S: Surface> PanelView<S> {
    /// Creates a view drawing into the surface with Lucide icons.
    #[inline]
    pub fn new(surface: S) -> Self {
        Self::with_icons(surface, LucideIcons)
    }
}

impl<S: Surface, I: IconRenderer> PanelView<S, I> {
    /// Creates a view with a custom icon renderer.
    #[inline]
    pub fn with_icons(surface: S, icons: I) -> Self {
        Self {
            surface,
            icons,
            suggestions_shown: false,
        }
    }

    fn avatar(&self, role: Role) -> String {
        let icon = match role {
            Role::User => "user",
            Role::Assistant => "bot",
        };
        format!(
            r#"<div class="ai-message-avatar">{}</div>"#,
            self.icons.render(icon)
        )
    }

    fn render_message(&self, message: &Message) -> String {
        let class = match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        format!(
            r#"<div class="ai-message {class}">{avatar}<div class="ai-message-content">{content}<div class="ai-message-time">{time}</div></div></div>"#,
            avatar = self.avatar(message.role),
            content = format_rich(&message.content),
        )
    }

    fn render_typing(&self) -> String {
        format!(
            r#"<div class="ai-message assistant typing-indicator-wrapper" id="{TYPING_ID}">{avatar}<div class="ai-message-content"><div class="typing-indicator"><span></span><span></span><span></span></div></div></div>"#,
            avatar = self.avatar(Role::Assistant),
        )
    }
}

impl<S: Surface, I: IconRenderer> View for PanelView<S, I> {
    fn render_welcome(&mut self) {
        let paragraphs: String = WELCOME_LINES
            .iter()
            .map(|line| format!("<p>{}</p>", escape_html(line)))
            .collect();
        let buttons: String = SUGGESTIONS
            .iter()
            .map(|question| {
                let question = escape_html(question);
                format!(
                    r#"<button class="ai-suggestion-btn" data-question="{question}">{question}</button>"#
                )
            })
            .collect();
        let html = format!(
            r#"<div class="ai-message assistant">{avatar}<div class="ai-message-content">{paragraphs}<div class="ai-suggestions" id="{SUGGESTIONS_ID}">{buttons}</div></div></div>"#,
            avatar = self.avatar(Role::Assistant),
        );
        self.surface.append(&html);
        self.suggestions_shown = true;
    }

    fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Message(message) => {
                if self.suggestions_shown {
                    self.surface.remove(SUGGESTIONS_ID);
                    self.suggestions_shown = false;
                }
                let html = self.render_message(message);
                self.surface.append(&html);
            }
            SessionEvent::StageChanged(SessionStage::AwaitingReply) => {
                let html = self.render_typing();
                self.surface.append(&html);
                self.surface.set_typing(true);
            }
            SessionEvent::StageChanged(SessionStage::Idle) => {
                self.surface.remove(TYPING_ID);
                self.surface.set_typing(false);
            }
            SessionEvent::Cleared => {
                self.surface.clear();
                self.render_welcome();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;
    use crate::render::testing::MemorySurface;

    fn view() -> (PanelView<MemorySurface>, MemorySurface) {
        let surface = MemorySurface::default();
        (PanelView::new(surface.clone()), surface)
    }

    #[test]
    fn test_welcome() {
        let (mut view, surface) = view();
        view.render_welcome();
        let html = surface.html();
        assert!(html.contains("Hello! I&#39;m Resezy AI Assistant."));
        assert!(html.contains(r#"<i data-lucide="bot"></i>"#));
        for question in SUGGESTIONS {
            assert!(html.contains(question), "{question}");
        }
    }

    #[test]
    fn test_first_message_removes_suggestions() {
        let (mut view, surface) = view();
        view.render_welcome();
        view.handle_event(&SessionEvent::Message(Message::user("hi")));

        let html = surface.html();
        assert!(!html.contains(SUGGESTIONS_ID));
        assert!(html.contains("I can answer questions"));
        assert!(html.contains(r#"<div class="ai-message user">"#));
        assert!(html.contains(r#"<i data-lucide="user"></i>"#));
        assert!(html.contains("<p>hi</p>"));
        let time = Regex::new(r#"<div class="ai-message-time">\d{2}:\d{2}</div>"#)
            .unwrap();
        assert!(time.is_match(&html));
    }

    #[test]
    fn test_typing_indicator() {
        let (mut view, surface) = view();
        view.handle_event(&SessionEvent::StageChanged(
            SessionStage::AwaitingReply,
        ));
        assert!(surface.is_typing());
        assert!(surface.html().contains(TYPING_ID));

        view.handle_event(&SessionEvent::StageChanged(SessionStage::Idle));
        assert!(!surface.is_typing());
        assert!(surface.html().is_empty());
    }

    #[test]
    fn test_rich_assistant_message() {
        let (mut view, surface) = view();
        view.handle_event(&SessionEvent::Message(Message::assistant(
            "Plans:\n- **Free**\n- Basic",
        )));
        assert!(surface.html().contains(
            "<p>Plans:</p><ul><li><strong>Free</strong></li><li>Basic</li></ul>"
        ));
    }

    #[test]
    fn test_cleared_restores_welcome() {
        let (mut view, surface) = view();
        view.render_welcome();
        view.handle_event(&SessionEvent::Message(Message::user("hi")));
        view.handle_event(&SessionEvent::Cleared);

        let fragments = surface.fragments();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains(SUGGESTIONS_ID));
    }
}
