extern crate almanac as lib;

use chrono::Local;
use flexi_logger::{FileSpec, Logger};
use lib::calendar::{CalendarEngine, Cursor, GridState, WEEKDAY_NAMES};
use lib::events::Dispatcher;
use lib::ui::App;
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "alma",
    about = "Almanac - an interactive month calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show the current month non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn show_current_month() {
    let now = Local::now();

    let engine = CalendarEngine::new(Cursor::from(now.date_naive()));
    let mut grid = GridState::new();
    engine.render(&mut grid, now.date_naive());

    println!("{}", engine.cursor());
    for name in WEEKDAY_NAMES.iter() {
        print!("{:>4}", name);
    }
    println!();

    for row in grid.rows() {
        for cell in row {
            let mark = if cell.today { '*' } else { ' ' };
            print!(" {}{:>2}", mark, cell.day);
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    if args.show {
        show_current_month();
        return Ok(());
    }

    const TTY_FD: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(
        termios::tcgetattr(TTY_FD).expect("Failed to get terminal attributes"),
    );

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        let _ = termios::tcsetattr(TTY_FD, termios::SetArg::TCSANOW, &orig_attr.lock().unwrap());

        println!("Almanac ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config);

    app.run(dispatcher, term)
}
