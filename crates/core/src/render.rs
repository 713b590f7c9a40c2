//! Rendering adapters that turn session events into HTML fragments.
//!
//! A view owns a [`Surface`], which is whatever actually displays the
//! fragments, and an [`IconRenderer`]. Views never touch the transcript
//! themselves; they only react to [`SessionEvent`]s, so several views can be
//! attached to the same session.

mod bubble;
mod format;
mod panel;

use std::sync::{Mutex, PoisonError};

pub use bubble::BubbleView;
pub use format::{escape_html, format_compact, format_rich};
pub use panel::PanelView;

use crate::session::{
    Session, SessionClosedError, SessionEvent, SubscriptionId,
};

/// The display a view draws into.
pub trait Surface: Send {
    /// Appends an HTML fragment at the end.
    fn append(&mut self, html: &str);

    /// Shows or hides the "assistant is typing" state, e.g. by disabling
    /// the send button.
    fn set_typing(&mut self, typing: bool);

    /// Removes the element with the given id, if present.
    fn remove(&mut self, id: &str);

    /// Removes everything.
    fn clear(&mut self);
}

/// Produces the markup of a named icon.
pub trait IconRenderer: Send {
    /// Returns the HTML for the icon.
    fn render(&self, name: &str) -> String;
}

/// Icons rendered as Lucide placeholders, which the Lucide script replaces
/// with inline SVGs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LucideIcons;

impl IconRenderer for LucideIcons {
    #[inline]
    fn render(&self, name: &str) -> String {
        format!(r#"<i data-lucide="{}"></i>"#, escape_html(name))
    }
}

/// Something that can present a session.
pub trait View: Send {
    /// Renders the initial greeting.
    fn render_welcome(&mut self);

    /// Reacts to a session event.
    fn handle_event(&mut self, event: &SessionEvent);
}

/// Renders the welcome message and subscribes the view to the session.
///
/// Pass the returned id to [`Session::unsubscribe`] to detach the view.
pub fn attach<V: View + 'static>(
    session: &Session,
    mut view: V,
) -> Result<SubscriptionId, SessionClosedError> {
    view.render_welcome();
    let view = Mutex::new(view);
    session.subscribe(move |event| {
        view.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle_event(event);
    })
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::testing::MemorySurface;
    use super::*;
    use crate::SessionBuilder;

    #[test]
    fn test_lucide_icons() {
        assert_eq!(LucideIcons.render("bot"), r#"<i data-lucide="bot"></i>"#);
    }

    #[test]
    fn test_memory_surface_remove() {
        let mut surface = MemorySurface::default();
        surface.append(
            r#"<div class="a"><p>x</p><div id="s"><div>y</div></div></div>"#,
        );
        surface.append(r#"<div id="t"><span></span></div>"#);
        surface.remove("s");
        surface.remove("t");
        assert_eq!(surface.html(), r#"<div class="a"><p>x</p></div>"#);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_both_views() {
        let session = SessionBuilder::offline().build();
        let panel_surface = MemorySurface::default();
        let bubble_surface = MemorySurface::default();
        attach(&session, PanelView::new(panel_surface.clone())).unwrap();
        attach(&session, BubbleView::new(bubble_surface.clone())).unwrap();

        session.submit("<b>hello</b>").unwrap();
        session.stage().await.unwrap();
        assert!(panel_surface.is_typing());
        assert!(bubble_surface.is_typing());

        sleep(Duration::from_secs(5)).await;
        session.stage().await.unwrap();
        assert!(!panel_surface.is_typing());
        for html in [panel_surface.html(), bubble_surface.html()] {
            assert!(html.contains("&lt;b&gt;hello&lt;/b&gt;"));
            assert!(!html.contains("<b>hello</b>"));
            assert!(html.contains("Welcome to Resezy"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_view_stops_rendering() {
        let session = SessionBuilder::offline().build();
        let surface = MemorySurface::default();
        let id = attach(&session, BubbleView::new(surface.clone())).unwrap();
        session.unsubscribe(id).unwrap();

        session.submit("hello").unwrap();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(session.transcript().await.unwrap().len(), 2);
        assert!(!surface.html().contains("hello"));
        assert!(!surface.is_typing());
    }
}
