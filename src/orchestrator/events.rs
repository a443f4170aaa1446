use crate::config::field::ResizePolicy;
use crate::foundation::core::Viewport;

/// Host page events the orchestrator reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    /// Initial mount at the given viewport size.
    Mount(Viewport),
    /// The viewport changed size.
    Resize(Viewport),
    /// The host page is going away; the surface is released.
    Unmount,
}

/// Apply `policy` to a batch of events, preserving order.
///
/// Under [`ResizePolicy::CoalesceBursts`], every run of consecutive `Resize` events is replaced
/// by its last element. Mount and unmount events are never dropped.
pub fn coalesce(
    events: impl IntoIterator<Item = ViewportEvent>,
    policy: ResizePolicy,
) -> Vec<ViewportEvent> {
    let events = events.into_iter();
    match policy {
        ResizePolicy::EveryEvent => events.collect(),
        ResizePolicy::CoalesceBursts => {
            let mut out: Vec<ViewportEvent> = Vec::new();
            for ev in events {
                let burst = matches!(ev, ViewportEvent::Resize(_))
                    && matches!(out.last(), Some(ViewportEvent::Resize(_)));
                if burst {
                    out.pop();
                }
                out.push(ev);
            }
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/events.rs"]
mod tests;
