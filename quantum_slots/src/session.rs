use std::{sync::Arc, time::Duration};

use qs_core::{
    api::{FlagParam, GameApi, HttpGameApi},
    poller::PollSettings,
    RequestError,
};

use crate::{config::SlotsConfig, GlobalArgs};

/// Everything a front end needs to talk to the game server,
/// resolved from the command line and the config file
/// (command line wins).
#[derive(Clone)]
pub struct Session {
    pub api: Arc<dyn GameApi>,
    pub base_url: String,
    pub flag_param: FlagParam,
    /// Initial state of the toggle.
    pub flag: bool,
    pub poll: PollSettings,
}

impl Session {
    pub fn resolve(args: &GlobalArgs, config: &SlotsConfig) -> Result<Self, RequestError> {
        let base_url = args.base_url.as_deref().unwrap_or(config.c_base_url());
        let flag_param = args.flag_param.unwrap_or(config.c_flag_param());
        let timeout = match args.timeout_ms {
            Some(0) => None,
            Some(n) => Some(Duration::from_millis(n)),
            None => config.c_request_timeout(),
        };

        let api = HttpGameApi::new(base_url, flag_param)?.with_timeout(timeout);
        Ok(Self {
            base_url: api.base_url().to_owned(),
            api: Arc::new(api),
            flag_param,
            flag: config.c_flag_default(),
            poll: PollSettings {
                interval: config.c_poll_interval(),
                timeout,
            },
        })
    }

    /// A session around any [`GameApi`], with default settings.
    pub fn with_api(api: Arc<dyn GameApi>) -> Self {
        Self {
            api,
            base_url: qs_core::DEFAULT_BASE_URL.to_owned(),
            flag_param: FlagParam::default(),
            flag: false,
            poll: PollSettings::default(),
        }
    }
}
