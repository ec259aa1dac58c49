//! Kitchen Timer - a fruit-shaped 3D countdown dial
//!
//! This is the main entry point for the GUI application. It:
//! 1. Loads preferences from ~/.config/kitchen-timer/config.yaml
//! 2. Starts the tokio runtime that drives the countdown task
//! 3. Launches the iced GUI application
//!
//! ## Command line flags
//!
//! - `--debug-guides`: Draw layout guide lines over the dial
//! - `--hour-mode`: One turn of the dial is an hour instead of a minute
//! - `--fruit <tomato|orange|lemon>`: Start with the given skin

mod config;
mod ui;

use iced::{Size, Task};

use kitchen_widgets::FruitSkin;
use ui::{KitchenApp, Message, StartupOptions};

fn main() -> iced::Result {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("kitchen-timer starting up");
    if options.debug_guides {
        log::info!("Debug guides enabled via --debug-guides flag");
    }

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    // The countdown task runs here so it never waits on the UI thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("countdown")
        .enable_time()
        .build()
        .expect("Failed to start countdown runtime");
    let handle = runtime.handle().clone();

    let window = config.display.dial_size + 160.0;
    let result = iced::application(
        move || {
            let app = KitchenApp::new(
                config.clone(),
                config_path.clone(),
                options.clone(),
                handle.clone(),
            );
            (app, Task::none())
        },
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("Kitchen Timer")
    .window_size(Size::new(window, window + 200.0))
    .run();

    runtime.shutdown_background();
    log::info!("kitchen-timer stopped");

    result
}

/// Parse command line flags (unknown arguments are ignored)
fn parse_args(args: &[String]) -> StartupOptions {
    let fruit = args
        .iter()
        .position(|arg| arg == "--fruit")
        .and_then(|i| args.get(i + 1))
        .and_then(|name| {
            let skin = FruitSkin::from_name(name);
            if skin.is_none() {
                eprintln!("Unknown fruit '{}', expected tomato, orange or lemon", name);
            }
            skin
        });

    StartupOptions {
        debug_guides: args.iter().any(|arg| arg == "--debug-guides"),
        hour_mode: args.iter().any(|arg| arg == "--hour-mode"),
        fruit,
    }
}

/// Update function for iced
fn update(app: &mut KitchenApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &KitchenApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &KitchenApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &KitchenApp) -> iced::Theme {
    app.theme()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("kitchen-timer")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_flags() {
        let options = parse_args(&args(&[]));
        assert!(!options.debug_guides);
        assert!(!options.hour_mode);
        assert_eq!(options.fruit, None);
    }

    #[test]
    fn test_all_flags() {
        let options = parse_args(&args(&["--hour-mode", "--fruit", "orange", "--debug-guides"]));
        assert!(options.debug_guides);
        assert!(options.hour_mode);
        assert_eq!(options.fruit, Some(FruitSkin::Orange));
    }

    #[test]
    fn test_bad_fruit_is_ignored() {
        assert_eq!(parse_args(&args(&["--fruit", "kiwi"])).fruit, None);
        assert_eq!(parse_args(&args(&["--fruit"])).fruit, None);
    }
}
