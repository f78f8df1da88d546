//! Live paginated session: a view, its sink and its lifetime.

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::sink::{DeliveryError, Frame, PageSink};
use super::view::{Navigation, PageView, Transition};

/// One paginated message bound to its invoking user.
///
/// Navigation holds the view lock across the render, so presses on the same
/// session are applied one at a time and in arrival order.
pub struct PageSession<S: PageSink> {
    id: u64,
    view: Mutex<PageView<S::Page>>,
    sink: S,
    stop: CancellationToken,
}

impl<S: PageSink> PageSession<S> {
    pub fn new(id: u64, view: PageView<S::Page>, sink: S) -> Self {
        Self {
            id,
            view: Mutex::new(view),
            sink,
            stop: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn cursor(&self) -> usize {
        self.view.lock().await.cursor()
    }

    pub async fn is_closed(&self) -> bool {
        self.view.lock().await.is_closed()
    }

    /// Deliver the first render.
    pub async fn present(&self) -> Result<(), DeliveryError> {
        let view = self.view.lock().await;
        self.sink.present(active_frame(self.id, &view)).await
    }

    /// Apply a button press and answer it.
    ///
    /// Rejected presses are acknowledged through the sink and reported as
    /// [`Transition::Rejected`]; only delivery failures are errors.
    pub async fn navigate(
        &self,
        actor_user_id: u64,
        navigation: Navigation,
        event: &S::Event,
    ) -> Result<Transition, DeliveryError> {
        let mut view = self.view.lock().await;
        let transition = view.navigate(actor_user_id, navigation);

        match transition {
            Transition::Moved { cursor } => {
                debug!(session_id = self.id, cursor, ?navigation, "page changed");
                self.sink
                    .replace(event, active_frame(self.id, &view))
                    .await?;
            }
            Transition::Rejected(reason) => {
                debug!(session_id = self.id, actor_user_id, ?reason, "navigation rejected");
                self.sink.refuse(event, reason).await?;
            }
        }

        Ok(transition)
    }

    /// Check a pick from the current page's select menu.
    ///
    /// Returns `Ok(true)` when the owner picked on an active view and the
    /// caller should answer it; refusals are acknowledged through the sink.
    pub async fn select(&self, actor_user_id: u64, event: &S::Event) -> Result<bool, DeliveryError> {
        let view = self.view.lock().await;

        match view.authorize(actor_user_id) {
            Ok(()) => Ok(true),
            Err(reason) => {
                debug!(session_id = self.id, actor_user_id, ?reason, "selection rejected");
                self.sink.refuse(event, reason).await?;
                Ok(false)
            }
        }
    }

    /// Wait for the deadline or an explicit stop, then close.
    pub async fn run_until_closed(&self) {
        let deadline = self.view.lock().await.deadline();

        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {}
            () = self.stop.cancelled() => {}
        }

        self.close().await;
    }

    /// Close immediately. Returns `false` if the session was already closed.
    pub async fn stop(&self) -> bool {
        self.stop.cancel();
        self.close().await
    }

    async fn close(&self) -> bool {
        let mut view = self.view.lock().await;
        if !view.close() {
            return false;
        }

        info!(session_id = self.id, cursor = view.cursor(), "pagination session closed");

        let frame = Frame {
            page: view.current_page(),
            status: None,
            session_id: None,
            page_label: None,
        };
        if let Err(source) = self.sink.detach(frame).await {
            warn!(session_id = self.id, error = %source, "failed to remove pagination controls");
        }

        true
    }
}

fn active_frame<P>(session_id: u64, view: &PageView<P>) -> Frame<'_, P> {
    Frame {
        page: view.current_page(),
        status: Some(view.status_line()),
        session_id: Some(session_id),
        page_label: view.is_navigable().then(|| view.page_label()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::testing::{Call, RecordingSink};
    use super::super::view::Rejection;
    use super::*;

    const OWNER: u64 = 1;
    const TIMEOUT: Duration = Duration::from_secs(600);

    fn session(pages: &[&str], sink: RecordingSink) -> PageSession<RecordingSink> {
        let pages = pages.iter().map(|page| (*page).to_owned()).collect();
        let view = PageView::new(pages, OWNER, TIMEOUT).expect("pages");
        PageSession::new(9, view, sink)
    }

    #[tokio::test]
    async fn present_renders_first_page_with_controls() {
        let sink = RecordingSink::default();
        let session = session(&["a", "b"], sink.clone());

        session.present().await.expect("present");

        assert_eq!(
            sink.calls(),
            [Call::Present {
                page: "a".to_owned(),
                label: Some("1/2".to_owned()),
                has_status: true,
            }]
        );
    }

    #[tokio::test]
    async fn single_page_renders_without_controls() {
        let sink = RecordingSink::default();
        let session = session(&["only"], sink.clone());

        session.present().await.expect("present");
        let transition = session.navigate(OWNER, Navigation::Next, &()).await.expect("nav");

        assert_eq!(transition, Transition::Rejected(Rejection::Static));
        assert_eq!(
            sink.calls(),
            [
                Call::Present {
                    page: "only".to_owned(),
                    label: None,
                    has_status: true,
                },
                Call::Refuse(Rejection::Static),
            ]
        );
    }

    #[tokio::test]
    async fn navigation_replaces_the_render() {
        let sink = RecordingSink::default();
        let session = session(&["a", "b", "c"], sink.clone());

        for _ in 0..3 {
            session.navigate(OWNER, Navigation::Next, &()).await.expect("nav");
        }

        let pages: Vec<(String, Option<String>)> = sink
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Replace { page, label } => Some((page, label)),
                _ => None,
            })
            .collect();
        assert_eq!(
            pages,
            [
                ("b".to_owned(), Some("2/3".to_owned())),
                ("c".to_owned(), Some("3/3".to_owned())),
                ("a".to_owned(), Some("1/3".to_owned())),
            ]
        );
    }

    #[tokio::test]
    async fn foreign_actor_is_refused() {
        let sink = RecordingSink::default();
        let session = session(&["a", "b"], sink.clone());

        let transition = session.navigate(2, Navigation::Last, &()).await.expect("nav");

        assert_eq!(transition, Transition::Rejected(Rejection::Unauthorized));
        assert_eq!(session.cursor().await, 0);
        assert_eq!(sink.calls(), [Call::Refuse(Rejection::Unauthorized)]);
    }

    #[tokio::test]
    async fn replace_failures_propagate() {
        let sink = RecordingSink::failing_replace();
        let session = session(&["a", "b"], sink);

        let result = session.navigate(OWNER, Navigation::Next, &()).await;
        assert!(matches!(result, Err(DeliveryError::Unavailable(_))));
    }

    #[tokio::test]
    async fn stop_detaches_once() {
        let sink = RecordingSink::default();
        let session = session(&["a", "b", "c"], sink.clone());
        session.navigate(OWNER, Navigation::Last, &()).await.expect("nav");

        assert!(session.stop().await);
        assert!(!session.stop().await);
        assert!(session.is_closed().await);

        let transition = session.navigate(OWNER, Navigation::First, &()).await.expect("nav");
        assert_eq!(transition, Transition::Rejected(Rejection::Closed));
        assert_eq!(session.cursor().await, 2);

        let detaches = sink
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Detach { .. }))
            .collect::<Vec<_>>();
        assert_eq!(detaches, [Call::Detach { page: "c".to_owned() }]);
    }

    #[tokio::test]
    async fn detach_failures_are_swallowed() {
        let sink = RecordingSink::failing_detach();
        let session = session(&["a", "b"], sink);

        assert!(session.stop().await);
        assert!(session.is_closed().await);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_the_absolute_deadline() {
        let sink = RecordingSink::default();
        let session = std::sync::Arc::new(session(&["a", "b"], sink.clone()));

        let waiter = tokio::spawn({
            let session = std::sync::Arc::clone(&session);
            async move { session.run_until_closed().await }
        });

        tokio::time::sleep(TIMEOUT / 2).await;
        session.navigate(OWNER, Navigation::Next, &()).await.expect("nav");
        assert!(!session.is_closed().await);

        // Activity does not push the deadline back.
        tokio::time::sleep(TIMEOUT / 2 + Duration::from_secs(1)).await;
        waiter.await.expect("waiter");

        assert!(session.is_closed().await);
        assert_eq!(sink.calls().last(), Some(&Call::Detach { page: "b".to_owned() }));
    }

    #[tokio::test(start_paused = true)]
    async fn single_page_still_gets_its_final_render() {
        let sink = RecordingSink::default();
        let session = session(&["only"], sink.clone());

        session.present().await.expect("present");
        session.run_until_closed().await;

        assert!(session.is_closed().await);
        assert_eq!(
            sink.calls(),
            [
                Call::Present {
                    page: "only".to_owned(),
                    label: None,
                    has_status: true,
                },
                Call::Detach {
                    page: "only".to_owned(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn only_the_owner_may_pick_while_active() {
        let sink = RecordingSink::default();
        let session = session(&["only"], sink.clone());

        assert!(session.select(OWNER, &()).await.expect("select"));
        assert!(!session.select(2, &()).await.expect("select"));

        session.stop().await;
        assert!(!session.select(OWNER, &()).await.expect("select"));

        let refusals: Vec<Call> = sink
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Refuse(_)))
            .collect();
        assert_eq!(
            refusals,
            [
                Call::Refuse(Rejection::Unauthorized),
                Call::Refuse(Rejection::Closed),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_pending_wait() {
        let sink = RecordingSink::default();
        let session = std::sync::Arc::new(session(&["a", "b"], sink.clone()));

        let waiter = tokio::spawn({
            let session = std::sync::Arc::clone(&session);
            async move { session.run_until_closed().await }
        });

        tokio::task::yield_now().await;
        assert!(session.stop().await);
        waiter.await.expect("waiter");

        let detaches = sink
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Detach { .. }))
            .count();
        assert_eq!(detaches, 1);
    }
}
