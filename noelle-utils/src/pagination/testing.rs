//! In-memory sink recording every render, for session and registry tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::sink::{DeliveryError, Frame, PageSink};
use super::view::Rejection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Present {
        page: String,
        label: Option<String>,
        has_status: bool,
    },
    Replace {
        page: String,
        label: Option<String>,
    },
    Detach {
        page: String,
    },
    Refuse(Rejection),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_replace: bool,
    fail_detach: bool,
}

impl RecordingSink {
    pub fn failing_replace() -> Self {
        Self {
            fail_replace: true,
            ..Self::default()
        }
    }

    pub fn failing_detach() -> Self {
        Self {
            fail_detach: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl PageSink for RecordingSink {
    type Page = String;
    type Event = ();

    async fn present(&self, frame: Frame<'_, String>) -> Result<(), DeliveryError> {
        self.record(Call::Present {
            page: frame.page.clone(),
            label: frame.page_label,
            has_status: frame.status.is_some(),
        });
        Ok(())
    }

    async fn replace(&self, _event: &(), frame: Frame<'_, String>) -> Result<(), DeliveryError> {
        if self.fail_replace {
            return Err(DeliveryError::Unavailable("message deleted".to_owned()));
        }
        self.record(Call::Replace {
            page: frame.page.clone(),
            label: frame.page_label,
        });
        Ok(())
    }

    async fn detach(&self, frame: Frame<'_, String>) -> Result<(), DeliveryError> {
        if self.fail_detach {
            return Err(DeliveryError::Unavailable("message deleted".to_owned()));
        }
        self.record(Call::Detach {
            page: frame.page.clone(),
        });
        Ok(())
    }

    async fn refuse(&self, _event: &(), reason: Rejection) -> Result<(), DeliveryError> {
        self.record(Call::Refuse(reason));
        Ok(())
    }
}
