use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    backoff::DelayFn, executor::DEFAULT_BACKOFF_MAX_TRIES, jobs::PollLimits, transport::Transport,
};

pub(crate) struct BuilderState {
    pub(crate) url: Option<String>,
    pub(crate) token: Option<SecretString>,
    pub(crate) timeout_seconds: Option<u64>,
    pub(crate) user_agent: Option<String>,
    pub(crate) run_id: Option<String>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
    pub(crate) backoff_max_tries: u32,
    pub(crate) retry_delay: Option<Arc<DelayFn>>,
    pub(crate) job_poll_delay: Option<Arc<DelayFn>>,
    pub(crate) poll_limits: PollLimits,
}

impl BuilderState {
    pub(crate) fn new() -> Self {
        Self {
            url: None,
            token: None,
            timeout_seconds: None,
            user_agent: None,
            run_id: None,
            transport: None,
            backoff_max_tries: DEFAULT_BACKOFF_MAX_TRIES,
            retry_delay: None,
            job_poll_delay: None,
            poll_limits: PollLimits::defaults(),
        }
    }
}
