//! One-shot commands, for scripts and quick checks.

use std::{path::Path, time::Duration};

use owo_colors::OwoColorize;
use qs_core::{
    actions, err,
    poller::{ConsolePoller, PollSettings},
    pt,
    view::ViewState,
};
use tokio::sync::mpsc;

use crate::{config::SlotsConfig, session::Session, tui::AppResult, ConfigCommand, GlobalArgs};

pub async fn spin(session: &Session, flag: Option<bool>) -> AppResult<()> {
    let flag = flag.unwrap_or(session.flag);
    pt!(no_log, "Spinning ({}={flag})", session.flag_param);

    let update = actions::spin(session.api.as_ref(), flag).await?;
    let view = ViewState::with_flag(flag).apply(&update);
    println!("{}", view.reels.bold());
    Ok(())
}

pub async fn attack(session: &Session, flag: Option<bool>) -> AppResult<()> {
    let flag = flag.unwrap_or(session.flag);
    pt!(no_log, "Attacking ({}={flag})", session.flag_param);

    let update = actions::attack(session.api.as_ref(), flag).await?;
    let view = ViewState::with_flag(flag).clear_message().apply(&update);
    print!("{}", render_attack(&view));
    Ok(())
}

fn render_attack(view: &ViewState) -> String {
    if view.blink {
        format!(
            "{}\n{}\n",
            view.reels.bold(),
            view.message.yellow().bold().blink()
        )
    } else {
        format!("{}\n", view.message)
    }
}

pub async fn console(session: &Session) -> AppResult<()> {
    let update = actions::poll_logs(session.api.as_ref()).await?;
    println!("{}", ViewState::default().apply(&update).console);
    Ok(())
}

/// Polls the console until `count` results came in
/// (or forever). Failed polls are logged and skipped.
pub async fn watch(session: &Session, interval_ms: Option<u64>, count: Option<u64>) -> AppResult<()> {
    if count == Some(0) {
        return Ok(());
    }
    let settings = PollSettings {
        interval: interval_ms
            .filter(|n| *n > 0)
            .map_or(session.poll.interval, Duration::from_millis),
        timeout: session.poll.timeout,
    };
    pt!(
        no_log,
        "Watching {} every {}ms",
        session.base_url,
        settings.interval.as_millis()
    );

    let (sender, mut receiver) = mpsc::unbounded_channel();
    let poller = ConsolePoller::spawn(session.api.clone(), settings, move |result| {
        _ = sender.send(result);
    });

    let mut view = ViewState::default();
    let mut seen = 0;
    while let Some(result) = receiver.recv().await {
        match result {
            Ok(logs) => {
                view = view.apply_console(&logs);
                println!(
                    "{}",
                    format!("--- {} ---", chrono::Local::now().format("%H:%M:%S")).dimmed()
                );
                println!("{}", view.console);
            }
            Err(error) => err!(no_log, "{error}"),
        }
        seen += 1;
        if count.is_some_and(|n| seen >= n) {
            break;
        }
    }

    poller.stop().await;
    Ok(())
}

pub async fn config(
    action: ConfigCommand,
    args: &GlobalArgs,
    mut config: SlotsConfig,
    path: Option<&Path>,
) -> AppResult<()> {
    match action {
        ConfigCommand::Show => {
            let session = Session::resolve(args, &config)?;
            println!("base_url:         {}", session.base_url);
            println!("flag_param:       {}", session.flag_param);
            println!("flag_default:     {}", session.flag);
            println!("poll_interval_ms: {}", session.poll.interval.as_millis());
            match session.poll.timeout {
                Some(t) => println!("request_timeout:  {}ms", t.as_millis()),
                None => println!("request_timeout:  none"),
            }
        }
        ConfigCommand::Path => match path {
            Some(path) => println!("{}", path.display()),
            None => return Err("no config directory on this platform".into()),
        },
        ConfigCommand::Save {
            flag_default,
            poll_interval_ms,
        } => {
            let Some(path) = path else {
                return Err("no config directory on this platform, pass --config".into());
            };
            merge_args(&mut config, args, flag_default, poll_interval_ms);
            // Make sure what gets written actually works.
            Session::resolve(args, &config)?;
            config.save(path).await?;
            pt!(no_log, "Saved {}", path.display());
        }
    }
    Ok(())
}

fn merge_args(
    config: &mut SlotsConfig,
    args: &GlobalArgs,
    flag_default: Option<bool>,
    poll_interval_ms: Option<u64>,
) {
    if let Some(base_url) = &args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if args.flag_param.is_some() {
        config.flag_param = args.flag_param;
    }
    if args.timeout_ms.is_some() {
        config.request_timeout_ms = args.timeout_ms;
    }
    if flag_default.is_some() {
        config.flag_default = flag_default;
    }
    if poll_interval_ms.is_some() {
        config.poll_interval_ms = poll_interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use qs_core::{
        api::{FlagParam, GameApi},
        json::{AttackResponse, AttackStatus, ConsoleResponse, SpinResponse},
        RequestError,
    };

    use super::*;

    struct Losing;

    #[async_trait]
    impl GameApi for Losing {
        async fn spin(&self, flag: bool) -> Result<SpinResponse, RequestError> {
            Ok(SpinResponse {
                result: vec![flag.to_string()],
                entangled: None,
            })
        }

        async fn attack(&self, _flag: bool) -> Result<AttackResponse, RequestError> {
            Ok(AttackResponse {
                status: AttackStatus::Failure("failure".to_owned()),
                result: Some(vec!["7".to_owned(), "7".to_owned(), "7".to_owned()]),
                message: "Nice try".to_owned(),
            })
        }

        async fn console(&self) -> Result<ConsoleResponse, RequestError> {
            Ok(ConsoleResponse {
                logs: vec!["one".to_owned(), "two".to_owned()],
            })
        }
    }

    #[test]
    fn failed_attack_prints_only_the_message() {
        let view = ViewState {
            reels: "🍒 🍒 🍒".to_owned(),
            message: "Nice try".to_owned(),
            ..Default::default()
        };
        assert_eq!(render_attack(&view), "Nice try\n");
    }

    #[test]
    fn winning_attack_prints_reels_and_message() {
        let view = ViewState {
            reels: "7 7 7".to_owned(),
            message: "Jackpot!".to_owned(),
            blink: true,
            ..Default::default()
        };
        let out = render_attack(&view);
        assert!(out.contains("7 7 7"));
        assert!(out.contains("Jackpot!"));
    }

    #[tokio::test]
    async fn one_shot_commands_succeed_against_a_fake() {
        let session = Session::with_api(Arc::new(Losing));
        spin(&session, Some(true)).await.unwrap();
        attack(&session, None).await.unwrap();
        console(&session).await.unwrap();
        watch(&session, Some(10), Some(2)).await.unwrap();
    }

    struct CountingConsole(std::sync::atomic::AtomicUsize);

    #[async_trait]
    impl GameApi for CountingConsole {
        async fn spin(&self, _flag: bool) -> Result<SpinResponse, RequestError> {
            unreachable!()
        }

        async fn attack(&self, _flag: bool) -> Result<AttackResponse, RequestError> {
            unreachable!()
        }

        async fn console(&self) -> Result<ConsoleResponse, RequestError> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(ConsoleResponse::default())
        }
    }

    #[tokio::test]
    async fn watch_count_zero_fetches_nothing() {
        let api = Arc::new(CountingConsole(std::sync::atomic::AtomicUsize::new(0)));
        let session = Session::with_api(api.clone());
        watch(&session, Some(10), Some(0)).await.unwrap();
        assert_eq!(api.0.load(std::sync::atomic::Ordering::SeqCst), 0);

        watch(&session, Some(10), Some(1)).await.unwrap();
        assert_eq!(api.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn save_merges_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let args = GlobalArgs {
            base_url: Some("http://10.0.0.2:8000".to_owned()),
            flag_param: Some(FlagParam::Entangled),
            ..Default::default()
        };

        config(
            ConfigCommand::Save {
                flag_default: Some(true),
                poll_interval_ms: None,
            },
            &args,
            SlotsConfig::default(),
            Some(path.as_path()),
        )
        .await
        .unwrap();

        let saved = SlotsConfig::load_s(&path).unwrap();
        assert_eq!(saved.c_base_url(), "http://10.0.0.2:8000");
        assert_eq!(saved.c_flag_param(), FlagParam::Entangled);
        assert!(saved.c_flag_default());
        assert_eq!(saved.poll_interval_ms, None);
    }

    #[tokio::test]
    async fn save_refuses_broken_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let args = GlobalArgs {
            base_url: Some("not a url".to_owned()),
            ..Default::default()
        };
        let result = config(
            ConfigCommand::Save {
                flag_default: None,
                poll_interval_ms: None,
            },
            &args,
            SlotsConfig::default(),
            Some(path.as_path()),
        )
        .await;
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
