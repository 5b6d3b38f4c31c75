//! Toast notifications for mutation outcomes.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

const TOAST_LIFETIME_MS: u32 = 5_000;
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Newest last; the oldest is dropped once `MAX_VISIBLE` is exceeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue(Vec<Toast>);

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        self.0.push(toast);
        if self.0.len() > MAX_VISIBLE {
            self.0.remove(0);
        }
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.0.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = Uuid::new_v4();
        self.queue.update(|q| {
            q.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });
        let queue = self.queue;
        Timeout::new(TOAST_LIFETIME_MS, move || {
            queue.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastKind::Info, message);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast-host">
            <For
                each=move || notifier.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let intent = match toast.kind {
                        ToastKind::Success => MessageBarIntent::Success,
                        ToastKind::Error => MessageBarIntent::Error,
                        ToastKind::Info => MessageBarIntent::Info,
                    };
                    let id = toast.id;
                    view! {
                        <div class="toast" on:click=move |_| notifier.dismiss(id)>
                            <MessageBar intent=intent>
                                <MessageBarBody>{toast.message.clone()}</MessageBarBody>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(message: &str) -> Toast {
        Toast {
            id: Uuid::new_v4(),
            kind: ToastKind::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_queue_caps_and_dismisses() {
        let mut q = ToastQueue::default();
        let first = toast("1");
        let first_id = first.id;
        q.push(first);
        for i in 2..=MAX_VISIBLE + 1 {
            q.push(toast(&i.to_string()));
        }
        assert_eq!(q.items().len(), MAX_VISIBLE);
        assert!(q.items().iter().all(|t| t.id != first_id));

        let id = q.items()[0].id;
        q.dismiss(id);
        assert_eq!(q.items().len(), MAX_VISIBLE - 1);
        assert_eq!(q.items()[0].message, "3");
    }
}
