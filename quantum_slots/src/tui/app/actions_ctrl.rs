// Spin/attack/console requests started from the TUI

use std::{future::Future, sync::Arc};

use qs_core::{actions, api::GameApi, view::ViewUpdate, RequestError};

use super::{App, AppEvent, Source};

impl App {
    pub fn spin(&mut self) {
        self.view = self.view.clear_message();
        let flag = self.view.flag;
        self.spawn_request(Source::Spin, move |api| async move {
            actions::spin(api.as_ref(), flag).await
        });
    }

    pub fn attack(&mut self) {
        self.view = self.view.clear_message();
        let flag = self.view.flag;
        self.spawn_request(Source::Attack, move |api| async move {
            actions::attack(api.as_ref(), flag).await
        });
    }

    pub fn toggle_flag(&mut self) {
        self.view = self.view.toggle_flag();
        self.status_message = format!(
            "{} is now {}",
            self.flag_param.label(),
            if self.view.flag { "on" } else { "off" }
        );
    }

    /// Fetch the console right away, outside the poll schedule.
    pub fn refresh_console(&mut self) {
        self.spawn_request(Source::Console, |api| async move {
            actions::poll_logs(api.as_ref()).await
        });
    }

    /// Runs `request` in the background. The result comes back
    /// through the event channel, see [`App::handle_event`].
    fn spawn_request<F, Fut>(&mut self, source: Source, request: F)
    where
        F: FnOnce(Arc<dyn GameApi>) -> Fut,
        Fut: Future<Output = Result<ViewUpdate, RequestError>> + Send + 'static,
    {
        if source != Source::Console {
            self.pending += 1;
            self.status_message = format!("{source}: waiting for {}...", self.base_url);
        }
        let events = self.events.clone();
        let request = request(self.api.clone());
        self.runtime.spawn(async move {
            // Receiver gone means the TUI closed, nothing to do.
            _ = events.send(AppEvent::Response {
                source,
                result: request.await,
            });
        });
    }
}
