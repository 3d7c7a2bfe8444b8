mod cli;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::{select, tick, unbounded};

use joybridge_gamepad::{
    ControlEvent, ControlKind, EventHandler, JoyPoller, Notifier, Sdl2Backend,
};

struct LogHandler;

impl EventHandler for LogHandler {
    fn dispatch(&mut self, event: &ControlEvent) -> bool {
        let kind = match event.kind {
            ControlKind::Button => "button",
            ControlKind::Axis => "axis",
        };
        print_info!(
            "device {0} {kind} {1}: {2} -> {3}",
            event.device,
            event.index,
            event.previous,
            event.value
        );
        true
    }
}

struct ScreenNotifier;

impl Notifier for ScreenNotifier {
    fn show_message(&mut self, text: &str) {
        print_info!("{text}");
    }
}

fn main() {
    let args = cli::Cli::parse();
    logging::setup(args.verbose, args.no_color);

    // Handle Ctrl+C to exit cleanly
    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .expect("failed to set Ctrl+C handler");

    let backend = match Sdl2Backend::new() {
        Ok(backend) => backend,
        Err(err) => {
            print_error!("failed to start SDL backend: {err}");
            return;
        }
    };
    let mut poller = JoyPoller::new(backend);
    poller.attach(Some(Box::new(LogHandler)));
    poller.set_notifier(Some(Box::new(ScreenNotifier)));
    poller.add_all();

    print_info!(
        "joybridged started. Tracking {0} device(s).",
        poller.device_count()
    );

    let ticker = tick(Duration::from_millis(args.tick_ms.max(1)));
    loop {
        select! {
            recv(stop_rx) -> _ => {
                break;
            }
            recv(ticker) -> _ => {
                poller.poll();
            }
        }
    }

    poller.remove_all();
    print_info!("joybridged stopped.");
}
