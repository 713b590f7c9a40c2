use super::format::{escape_html, format_compact};
use super::{IconRenderer, LucideIcons, Surface, View};
use crate::conversation::Role;
use crate::session::{SessionEvent, SessionStage};

const SUGGESTIONS_ID: &str = "floatingSuggestions";
const TYPING_ID: &str = "floatingTyping";

const WELCOME: &str =
    "Hi there! I'm Resezy AI Assistant. How can I help you today?";
const SUGGESTIONS: [&str; 3] = ["What is Resezy?", "Pricing plans", "Features"];

/// The floating chat bubble shown on every page.
pub struct BubbleView<S, I = LucideIcons> {
    surface: S,
    icons: I,
    suggestions_shown: bool,
}

impl<S: Surface> BubbleView<S> {
    /// Creates a view drawing into the surface with Lucide icons.
    #[inline]
    pub fn new(surface: S) -> Self {
        Self::with_icons(surface, LucideIcons)
    }
}

impl<S: Surface, I: IconRenderer> BubbleView<S, I> {
    /// Creates a view with a custom icon renderer.
    #[inline]
    pub fn with_icons(surface: S, icons: I) -> Self {
        Self {
            surface,
            icons,
            suggestions_shown: false,
        }
    }

    fn bot_message(&self, body: &str, id: Option<&str>) -> String {
        let id = id.map(|id| format!(r#" id="{id}""#)).unwrap_or_default();
        format!(
            r#"<div class="floating-message bot"{id}><div class="floating-message-avatar">{}</div><div class="floating-message-content">{body}</div></div>"#,
            self.icons.render("bot"),
        )
    }
}

impl<S: Surface, I: IconRenderer> View for BubbleView<S, I> {
    fn render_welcome(&mut self) {
        let buttons: String = SUGGESTIONS
            .iter()
            .map(|question| {
                let question = escape_html(question);
                format!(r#"<button data-question="{question}">{question}</button>"#)
            })
            .collect();
        let body = format!(
            r#"<p>{}</p><div class="floating-suggestions" id="{SUGGESTIONS_ID}">{buttons}</div>"#,
            escape_html(WELCOME),
        );
        let html = self.bot_message(&body, None);
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
                let html = match message.role {
                    Role::User => format!(
                        r#"<div class="floating-message user"><div class="floating-message-avatar">{}</div><div class="floating-message-content"><p>{}</p></div></div>"#,
                        self.icons.render("user"),
                        escape_html(&message.content),
                    ),
                    Role::Assistant => {
                        let body = format!(
                            "<p>{}</p>",
                            format_compact(&message.content)
                        );
                        self.bot_message(&body, None)
                    }
                };
                self.surface.append(&html);
            }
            SessionEvent::StageChanged(SessionStage::AwaitingReply) => {
                let html = self.bot_message(
                    r#"<div class="floating-typing"><span></span><span></span><span></span></div>"#,
                    Some(TYPING_ID),
                );
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
