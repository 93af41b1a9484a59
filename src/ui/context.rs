use chrono::{DateTime, Local};

use crate::calendar::{CalendarEngine, Cursor, GridState};
use crate::clock::ClockTicker;

use unsegen::base::style::*;

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub day_text_style: TextFormatModifier,
    pub faded_day_style: StyleModifier,
    pub faded_day_text_style: TextFormatModifier,
    pub today_day_style: StyleModifier,
    pub today_day_text_style: TextFormatModifier,
    pub today_day_char: Option<char>,
    pub weekday_header_style: StyleModifier,
    pub weekday_header_text_style: TextFormatModifier,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub time_style: StyleModifier,
    pub time_text_style: TextFormatModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            day_text_style: TextFormatModifier::default(),
            faded_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            faded_day_text_style: TextFormatModifier::default(),
            today_day_style: StyleModifier::default().invert(true),
            today_day_text_style: TextFormatModifier::default().italic(true),
            today_day_char: Some('*'),
            weekday_header_style: StyleModifier::default().fg_color(Color::Yellow),
            weekday_header_text_style: TextFormatModifier::default(),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default().bold(true),
            time_style: StyleModifier::default(),
            time_text_style: TextFormatModifier::default().bold(true),
        }
    }
}

pub struct Context {
    pub theme: Theme,
    engine: CalendarEngine,
    grid: GridState,
    ticker: ClockTicker,
    now: DateTime<Local>,
}

impl Context {
    pub fn new() -> Self {
        let ticker = ClockTicker::new();
        let now = Local::now();

        let engine = CalendarEngine::new(Cursor::from(now.date_naive()));
        let mut grid = GridState::new();
        engine.render(&mut grid, now.date_naive());

        Context {
            theme: Theme::default(),
            engine,
            grid,
            ticker,
            now,
        }
    }

    // Runs once per tick: republish the clock line and re-evaluate the
    // today mark so a midnight rollover moves it without navigation.
    pub fn update(&mut self) {
        self.now = self.ticker.tick();
        self.engine
            .highlight_today(&mut self.grid, self.now.date_naive());
    }

    pub fn advance(&mut self) {
        self.engine.advance(&mut self.grid, self.now.date_naive());
    }

    pub fn retreat(&mut self) {
        self.engine.retreat(&mut self.grid, self.now.date_naive());
    }

    pub fn cursor(&self) -> Cursor {
        self.engine.cursor()
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn time_line(&self) -> &str {
        self.ticker.line()
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
