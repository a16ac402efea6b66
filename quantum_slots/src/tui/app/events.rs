// Key presses and server responses, applied to the App

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use qs_core::err;

use super::{App, AppEvent, Source, IDLE_HINT};

impl App {
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Response { source, result } => {
                if source != Source::Console {
                    self.pending = self.pending.saturating_sub(1);
                }
                match result {
                    // Whatever arrives last wins, even if it was sent first.
                    Ok(update) => {
                        self.view = self.view.apply(&update);
                        if source != Source::Console {
                            self.status_message = format!(
                                "{source} done at {}",
                                chrono::Local::now().format("%H:%M:%S")
                            );
                        }
                    }
                    // Failures only go to the log, the screen stays as it was.
                    Err(error) => {
                        err!("{source} failed: {error}");
                        if source != Source::Console && self.pending == 0 {
                            self.status_message = IDLE_HINT.to_owned();
                        }
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help_popup {
            if let KeyCode::Char('q' | '?') | KeyCode::Esc = key.code {
                self.toggle_help_popup();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Enter => self.spin(),
            KeyCode::Char('a') => self.attack(),
            KeyCode::Char(' ' | 't') => self.toggle_flag(),
            KeyCode::Char('r') | KeyCode::F(5) => self.refresh_console(),
            KeyCode::Char('?') => self.toggle_help_popup(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use crossterm::event::{KeyEventState, KeyModifiers};
    use qs_core::{
        json::{AttackResponse, AttackStatus, SpinResponse},
        view::ViewUpdate,
        RequestError,
    };

    use super::*;
    use crate::tui::app::test_support::{app, Scripted};

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn symbols(s: &[&str]) -> Vec<String> {
        s.iter().map(|n| (*n).to_owned()).collect()
    }

    #[tokio::test]
    async fn spin_sends_current_flag_and_updates_reels() {
        let api = Arc::new(Scripted::default());
        api.spins.lock().unwrap().push(Ok(SpinResponse {
            result: symbols(&["🍒", "🍋", "🔔"]),
            entangled: None,
        }));
        let (mut app, mut rx) = app(api.clone());

        app.handle_event(press(KeyCode::Char(' ')));
        assert!(app.view.flag);
        app.handle_event(press(KeyCode::Char('s')));
        assert_eq!(app.pending, 1);

        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view.reels, "🍒 🍋 🔔");
        assert_eq!(app.pending, 0);
        assert_eq!(*api.flags.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn pressing_spin_clears_message_before_the_answer() {
        let api = Arc::new(Scripted::default());
        api.spins.lock().unwrap().push(Ok(SpinResponse {
            result: symbols(&["a"]),
            entangled: None,
        }));
        let (mut app, mut rx) = app(api);
        app.view.message = "Jackpot!".to_owned();
        app.view.blink = true;

        app.handle_event(press(KeyCode::Enter));
        assert_eq!(app.view.message, "");
        assert!(!app.view.blink);

        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view.reels, "a");
    }

    #[tokio::test]
    async fn attack_outcomes() {
        let api = Arc::new(Scripted::default());
        api.attacks.lock().unwrap().extend([
            Ok(AttackResponse {
                status: AttackStatus::Failure("failure".to_owned()),
                result: Some(symbols(&["x", "x", "x"])),
                message: "No luck".to_owned(),
            }),
            Ok(AttackResponse {
                status: AttackStatus::Success,
                result: Some(symbols(&["7", "7", "7"])),
                message: "Jackpot!".to_owned(),
            }),
        ]);
        let (mut app, mut rx) = app(api);
        app.view.reels = "🍒 🍒 🍒".to_owned();

        app.handle_event(press(KeyCode::Char('a')));
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view.reels, "🍒 🍒 🍒");
        assert_eq!(app.view.message, "No luck");
        assert!(!app.view.blink);

        app.handle_event(press(KeyCode::Char('a')));
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view.reels, "7 7 7");
        assert_eq!(app.view.message, "Jackpot!");
        assert!(app.view.blink);
    }

    #[tokio::test]
    async fn errors_leave_the_view_alone() {
        let api = Arc::new(Scripted::default());
        api.spins
            .lock()
            .unwrap()
            .push(Err(RequestError::Timeout(Duration::from_secs(1))));
        let (mut app, mut rx) = app(api);
        app.view.reels = "1 2 3".to_owned();
        let before = app.view.clone();

        app.handle_event(press(KeyCode::Char('s')));
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view, before);
        assert_eq!(app.pending, 0);
        assert_eq!(app.status_message, IDLE_HINT);
        assert!(!app.status_message.to_lowercase().contains("fail"));
    }

    #[tokio::test]
    async fn late_response_overwrites_newer_one() {
        let api = Arc::new(Scripted::default());
        let (mut app, _rx) = app(api);
        let spin = |s: &str| AppEvent::Response {
            source: Source::Spin,
            result: Ok(ViewUpdate::Spin(SpinResponse {
                result: symbols(&[s]),
                entangled: None,
            })),
        };

        // Second request answered first, first request answered last.
        app.handle_event(spin("second"));
        app.handle_event(spin("first"));
        assert_eq!(app.view.reels, "first");
    }

    #[tokio::test]
    async fn refresh_goes_through_the_channel() {
        let api = Arc::new(Scripted::default());
        let (mut app, mut rx) = app(api);

        app.handle_event(press(KeyCode::Char('r')));
        assert_eq!(app.pending, 0);
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert_eq!(app.view.console, "refresh 0");
    }

    #[tokio::test]
    async fn help_popup_swallows_keys() {
        let (mut app, _rx) = app(Arc::new(Scripted::default()));

        app.handle_event(press(KeyCode::Char('?')));
        assert!(app.show_help_popup);
        app.handle_event(press(KeyCode::Char('s')));
        assert_eq!(app.pending, 0);
        app.handle_event(press(KeyCode::Esc));
        assert!(!app.show_help_popup);
        assert!(!app.should_quit());

        app.handle_event(press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn key_release_is_ignored() {
        let (mut app, _rx) = app(Arc::new(Scripted::default()));
        app.handle_key(KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!app.view.flag);
    }
}
