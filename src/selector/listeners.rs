//! Bookkeeping for document-level listeners.
//!
//! The widget never touches the document directly; it asks a
//! [`ListenerHost`] to attach or detach and remembers what it asked for, so
//! teardown can release everything it ever attached.

use serde::Serialize;
use std::collections::BTreeSet;

/// Document-level listener groups the widget can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerKind {
    /// Pointer move while dragging the seeker.
    DragMove,
    /// Pointer release/cancel while dragging the seeker.
    DragEnd,
    /// Keyboard shortcuts.
    KeyDown,
}

impl ListenerKind {
    /// DOM event names covered by the group.
    pub fn dom_events(self) -> &'static [&'static str] {
        match self {
            ListenerKind::DragMove => &["mousemove", "touchmove"],
            ListenerKind::DragEnd => &["mouseup", "touchend", "touchcancel"],
            ListenerKind::KeyDown => &["keydown"],
        }
    }
}

/// Host side of listener management.
pub trait ListenerHost {
    fn attach_listener(&mut self, kind: ListenerKind);
    fn detach_listener(&mut self, kind: ListenerKind);
}

#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    attached: BTreeSet<ListenerKind>,
    ever_attached: BTreeSet<ListenerKind>,
}

impl ListenerRegistry {
    /// Attach unless already attached. Returns true if the host was asked.
    pub fn attach(&mut self, host: &mut impl ListenerHost, kind: ListenerKind) -> bool {
        if !self.attached.insert(kind) {
            return false;
        }
        self.ever_attached.insert(kind);
        host.attach_listener(kind);
        true
    }

    /// Detach if attached. Returns true if the host was asked.
    pub fn detach(&mut self, host: &mut impl ListenerHost, kind: ListenerKind) -> bool {
        if !self.attached.remove(&kind) {
            return false;
        }
        host.detach_listener(kind);
        true
    }

    /// Detach every group ever attached, active or not.
    pub fn detach_all(&mut self, host: &mut impl ListenerHost) {
        for kind in std::mem::take(&mut self.ever_attached) {
            host.detach_listener(kind);
        }
        self.attached.clear();
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    pub fn attached(&self) -> impl Iterator<Item = ListenerKind> + '_ {
        self.attached.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SpyHost {
        calls: Vec<(&'static str, ListenerKind)>,
    }

    impl ListenerHost for SpyHost {
        fn attach_listener(&mut self, kind: ListenerKind) {
            self.calls.push(("attach", kind));
        }

        fn detach_listener(&mut self, kind: ListenerKind) {
            self.calls.push(("detach", kind));
        }
    }

    #[test]
    fn test_attach_is_not_duplicated() {
        let mut host = SpyHost::default();
        let mut registry = ListenerRegistry::default();
        assert!(registry.attach(&mut host, ListenerKind::KeyDown));
        assert!(!registry.attach(&mut host, ListenerKind::KeyDown));
        assert_eq!(host.calls, vec![("attach", ListenerKind::KeyDown)]);
    }

    #[test]
    fn test_detach_only_when_attached() {
        let mut host = SpyHost::default();
        let mut registry = ListenerRegistry::default();
        assert!(!registry.detach(&mut host, ListenerKind::DragMove));
        registry.attach(&mut host, ListenerKind::DragMove);
        assert!(registry.detach(&mut host, ListenerKind::DragMove));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_detach_all_covers_inactive_groups() {
        let mut host = SpyHost::default();
        let mut registry = ListenerRegistry::default();
        registry.attach(&mut host, ListenerKind::DragMove);
        registry.attach(&mut host, ListenerKind::DragEnd);
        registry.detach(&mut host, ListenerKind::DragMove);
        registry.detach(&mut host, ListenerKind::DragEnd);
        registry.attach(&mut host, ListenerKind::KeyDown);
        host.calls.clear();

        registry.detach_all(&mut host);
        assert_eq!(
            host.calls,
            vec![
                ("detach", ListenerKind::DragMove),
                ("detach", ListenerKind::DragEnd),
                ("detach", ListenerKind::KeyDown),
            ]
        );
        assert_eq!(registry.attached().count(), 0);

        host.calls.clear();
        registry.detach_all(&mut host);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_dom_event_groups() {
        assert!(ListenerKind::DragEnd.dom_events().contains(&"touchcancel"));
        assert_eq!(ListenerKind::KeyDown.dom_events(), &["keydown"]);
    }
}
