//! Id-keyed table of live paginated sessions.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::RwLock;
use tracing::info;

use super::session::PageSession;
use super::sink::{DeliveryError, PageSink};
use super::view::{Navigation, PageView, Transition};

/// Live sessions, keyed by the id carried in their button custom IDs.
///
/// Every view is registered, single pages included, so each one reaches its
/// final render. Sessions remove themselves once closed.
pub struct SessionRegistry<S: PageSink> {
    next_id: AtomicU64,
    sessions: RwLock<HashMap<u64, Arc<PageSession<S>>>>,
}

impl<S: PageSink> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<S: PageSink> SessionRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present `view` through `sink` and keep it alive until it closes.
    pub async fn open(
        self: &Arc<Self>,
        view: PageView<S::Page>,
        sink: S,
    ) -> Result<u64, DeliveryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let owner_user_id = view.owner_user_id();
        let pages = view.len();

        let session = Arc::new(PageSession::new(id, view, sink));

        // Registered before the first render so an early press finds it.
        self.sessions
            .write()
            .await
            .insert(id, Arc::clone(&session));

        if let Err(source) = session.present().await {
            self.sessions.write().await.remove(&id);
            return Err(source);
        }
        info!(session_id = id, owner_user_id, pages, "pagination session opened");

        let registry = Arc::clone(self);
        tokio::spawn(async move {
            session.run_until_closed().await;
            registry.sessions.write().await.remove(&id);
        });

        Ok(id)
    }

    /// Route a button press. `Ok(None)` means the session no longer exists.
    pub async fn dispatch(
        &self,
        session_id: u64,
        actor_user_id: u64,
        navigation: Navigation,
        event: &S::Event,
    ) -> Result<Option<Transition>, DeliveryError> {
        let Some(session) = self.get(session_id).await else {
            return Ok(None);
        };

        session
            .navigate(actor_user_id, navigation, event)
            .await
            .map(Some)
    }

    /// Check a select-menu pick. `Ok(None)` means the session no longer exists.
    pub async fn select(
        &self,
        session_id: u64,
        actor_user_id: u64,
        event: &S::Event,
    ) -> Result<Option<bool>, DeliveryError> {
        let Some(session) = self.get(session_id).await else {
            return Ok(None);
        };

        session.select(actor_user_id, event).await.map(Some)
    }

    /// Stop a session now. Returns `false` when it is unknown or already closed.
    pub async fn stop(&self, session_id: u64) -> bool {
        let Some(session) = self.get(session_id).await else {
            return false;
        };
        session.stop().await
    }

    pub async fn get(&self, session_id: u64) -> Option<Arc<PageSession<S>>> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::testing::{Call, RecordingSink};
    use super::super::view::Rejection;
    use super::*;

    const OWNER: u64 = 5;
    const TIMEOUT: Duration = Duration::from_secs(120);

    fn view(pages: &[&str]) -> PageView<String> {
        let pages = pages.iter().map(|page| (*page).to_owned()).collect();
        PageView::new(pages, OWNER, TIMEOUT).expect("pages")
    }

    #[tokio::test]
    async fn routes_presses_to_the_right_session() {
        let registry = Arc::new(SessionRegistry::new());
        let first_sink = RecordingSink::default();
        let second_sink = RecordingSink::default();

        let first = registry.open(view(&["a", "b"]), first_sink.clone()).await.expect("open");
        let second = registry.open(view(&["x", "y", "z"]), second_sink.clone()).await.expect("open");
        assert_ne!(first, second);
        assert_eq!(registry.len().await, 2);

        let transition = registry
            .dispatch(second, OWNER, Navigation::Last, &())
            .await
            .expect("dispatch");
        assert_eq!(transition, Some(Transition::Moved { cursor: 2 }));

        assert_eq!(registry.get(first).await.expect("first").cursor().await, 0);
        assert_eq!(first_sink.calls().len(), 1);
        assert_eq!(
            second_sink.calls().last(),
            Some(&Call::Replace {
                page: "z".to_owned(),
                label: Some("3/3".to_owned()),
            })
        );
    }

    #[tokio::test]
    async fn unknown_sessions_dispatch_to_nothing() {
        let registry: Arc<SessionRegistry<RecordingSink>> = Arc::new(SessionRegistry::new());
        let transition = registry
            .dispatch(404, OWNER, Navigation::Next, &())
            .await
            .expect("dispatch");
        assert_eq!(transition, None);
        assert!(!registry.stop(404).await);
    }

    #[tokio::test(start_paused = true)]
    async fn single_page_views_live_until_their_deadline() {
        let registry = Arc::new(SessionRegistry::new());
        let sink = RecordingSink::default();

        let id = registry.open(view(&["only"]), sink.clone()).await.expect("open");
        assert_eq!(registry.len().await, 1);
        assert_eq!(
            registry.dispatch(id, OWNER, Navigation::Next, &()).await.expect("dispatch"),
            Some(Transition::Rejected(Rejection::Static))
        );

        tokio::time::sleep(TIMEOUT + Duration::from_secs(1)).await;

        assert!(registry.is_empty().await);
        assert_eq!(sink.calls().last(), Some(&Call::Detach { page: "only".to_owned() }));
    }

    #[tokio::test]
    async fn picks_are_checked_against_the_owner() {
        let registry = Arc::new(SessionRegistry::new());
        let sink = RecordingSink::default();
        let id = registry.open(view(&["a", "b"]), sink.clone()).await.expect("open");

        assert_eq!(registry.select(id, OWNER, &()).await.expect("select"), Some(true));
        assert_eq!(registry.select(id, OWNER + 1, &()).await.expect("select"), Some(false));
        assert_eq!(registry.select(404, OWNER, &()).await.expect("select"), None);
        assert_eq!(sink.calls().last(), Some(&Call::Refuse(Rejection::Unauthorized)));
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_leave_the_table_after_timing_out() {
        let registry = Arc::new(SessionRegistry::new());
        let sink = RecordingSink::default();
        let id = registry.open(view(&["a", "b"]), sink.clone()).await.expect("open");

        tokio::time::sleep(TIMEOUT + Duration::from_secs(1)).await;

        assert!(registry.get(id).await.is_none());
        assert_eq!(sink.calls().last(), Some(&Call::Detach { page: "a".to_owned() }));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_closes_and_unregisters() {
        let registry = Arc::new(SessionRegistry::new());
        let sink = RecordingSink::default();
        let id = registry.open(view(&["a", "b"]), sink.clone()).await.expect("open");

        let session = registry.get(id).await.expect("session");
        assert!(registry.stop(id).await);
        assert!(session.is_closed().await);

        let transition = session.navigate(OWNER, Navigation::Next, &()).await.expect("nav");
        assert_eq!(transition, Transition::Rejected(Rejection::Closed));

        // Let the lifetime task observe the stop and clean up.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(registry.is_empty().await);
    }
}
