mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_shooter::background::Background;
use space_shooter::compute::{init_state, snapshot, step};
use space_shooter::constants::{BACKGROUND_FRAMES, SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT, TICK};
use space_shooter::input::{fold, InputTracker};
use space_shooter::services::{Clock, FramePacer, LoggedCues, MonotonicClock, Renderer};

use display::TerminalRenderer;

/// Environment variable naming the log file.  Logging is off when unset,
/// since the terminal itself is taken over by the game.
const LOG_FILE_VAR: &str = "SPACE_SHOOTER_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() {
    let Ok(path) = std::env::var(LOG_FILE_VAR) else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  `release_events` says whether the terminal
/// reports key releases (see `space_shooter::input`).
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    release_events: bool,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let clock = MonotonicClock::new();
    let mut pacer = FramePacer::new(TICK);
    let mut cues = LoggedCues;
    let mut input = InputTracker::new(release_events);

    let background =
        Background::starfield(&mut rng, SCREEN_WIDTH, SCREEN_HEIGHT, STAR_COUNT, BACKGROUND_FRAMES);
    let mut renderer = TerminalRenderer::new(out, background);
    let mut state = init_state(SCREEN_WIDTH, SCREEN_HEIGHT);

    // Loop frames keep counting on the title and game-over screens, unlike
    // `state.frame`, so key hold windows stay meaningful there too.
    let mut frame: u64 = 0;

    loop {
        frame += 1;

        let tick_input = fold(&input.poll(rx, frame));
        if tick_input.quit {
            log::info!("quit requested at frame {}", frame);
            return Ok(());
        }

        step(&mut state, &tick_input, clock.now_ms(), &mut rng, &mut cues);
        renderer.present(&snapshot(&state))?;

        pacer.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    log::info!("space shooter starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release (and key-repeat) events.  kitty-protocol terminals
    // support this; everything else falls back to hold windows.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        log::warn!("terminal does not report key releases; using hold windows");
    }

    // Dedicate a thread to blocking event reads so the game loop only ever
    // drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::error!("terminal event read failed: {}", err);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, keyboard_enhanced);
    if let Err(err) = &result {
        log::error!("game loop aborted: {}", err);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
