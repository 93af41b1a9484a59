use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::fmt;

pub const GRID_COLUMNS: usize = 7;
pub const GRID_BASE_ROWS: usize = 5;
pub const GRID_MAX_ROWS: usize = 6;

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: Month, year: i32) -> u32 {
    if month == Month::February && is_leap_year(year) {
        29
    } else {
        MONTH_LENGTHS[month.number_from_month() as usize - 1]
    }
}

// Weekday index of the 1st of the month, Sunday-first (0 = Sun .. 6 = Sat).
pub fn first_weekday(month: Month, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .expect("first of month is a valid date")
        .weekday()
        .num_days_from_sunday()
}

// A 7x5 grid holds 35 slots; a month starting late enough in the week
// overflows into a 6th row.
pub fn rows_for_month(month: Month, year: i32, first_weekday: u32) -> usize {
    let days = days_of_month(month, year);

    if (days == 30 && first_weekday == 6) || (days == 31 && first_weekday >= 5) {
        GRID_MAX_ROWS
    } else {
        GRID_BASE_ROWS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    month: Month,
    year: i32,
}

impl Cursor {
    pub fn new(month: Month, year: i32) -> Self {
        Cursor { month, year }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next(&self) -> Self {
        let next_month = self.month.succ();

        Cursor {
            month: next_month,
            year: if next_month == Month::January {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        let prev_month = self.month.pred();

        Cursor {
            month: prev_month,
            year: if prev_month == Month::December {
                self.year - 1
            } else {
                self.year
            },
        }
    }
}

impl<T: Datelike> From<T> for Cursor {
    fn from(date: T) -> Self {
        Cursor::new(Month::from_u32(date.month()).unwrap(), date.year())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

/// Rendering surface the engine writes into. Slot indices are row-major.
pub trait GridSurface {
    fn row_count(&self) -> usize;
    fn set_row_count(&mut self, rows: usize);
    fn write_cell(&mut self, index: usize, day: u32, faded: bool);
    fn mark_today(&mut self, index: Option<usize>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellSlot {
    pub day: u32,
    pub faded: bool,
    pub today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    rows: Vec<[CellSlot; GRID_COLUMNS]>,
}

impl GridState {
    pub fn new() -> Self {
        GridState {
            rows: vec![[CellSlot::default(); GRID_COLUMNS]; GRID_BASE_ROWS],
        }
    }

    pub fn rows(&self) -> &[[CellSlot; GRID_COLUMNS]] {
        &self.rows
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellSlot> {
        self.rows.iter().flatten()
    }
}

impl Default for GridState {
    fn default() -> Self {
        GridState::new()
    }
}

impl GridSurface for GridState {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn set_row_count(&mut self, rows: usize) {
        debug_assert!((GRID_BASE_ROWS..=GRID_MAX_ROWS).contains(&rows));

        while self.rows.len() < rows {
            self.rows.push([CellSlot::default(); GRID_COLUMNS]);
        }
        self.rows.truncate(rows);
    }

    fn write_cell(&mut self, index: usize, day: u32, faded: bool) {
        self.rows[index / GRID_COLUMNS][index % GRID_COLUMNS] = CellSlot {
            day,
            faded,
            today: false,
        };
    }

    fn mark_today(&mut self, index: Option<usize>) {
        for cell in self.rows.iter_mut().flatten() {
            cell.today = false;
        }

        if let Some(index) = index {
            self.rows[index / GRID_COLUMNS][index % GRID_COLUMNS].today = true;
        }
    }
}

pub struct CalendarEngine {
    cursor: Cursor,
}

impl CalendarEngine {
    pub fn new(cursor: Cursor) -> Self {
        CalendarEngine { cursor }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn render(&self, surface: &mut impl GridSurface, today: NaiveDate) {
        let first = first_weekday(self.cursor.month(), self.cursor.year());
        let days = days_of_month(self.cursor.month(), self.cursor.year());

        surface.set_row_count(rows_for_month(self.cursor.month(), self.cursor.year(), first));
        let slots = surface.row_count() * GRID_COLUMNS;

        let prev = self.cursor.prev();
        let prev_days = days_of_month(prev.month(), prev.year());
        for i in 0..first as usize {
            surface.write_cell(i, prev_days - first + i as u32 + 1, true);
        }

        for day in 1..=days {
            surface.write_cell((first + day - 1) as usize, day, false);
        }

        for (offset, index) in ((first + days) as usize..slots).enumerate() {
            surface.write_cell(index, offset as u32 + 1, true);
        }

        self.highlight_today(surface, today);
    }

    pub fn highlight_today(&self, surface: &mut impl GridSurface, today: NaiveDate) {
        let index = if self.cursor == Cursor::from(today) {
            let first = first_weekday(self.cursor.month(), self.cursor.year());
            Some((first + today.day() - 1) as usize)
        } else {
            None
        };

        surface.mark_today(index);
    }

    pub fn advance(&mut self, surface: &mut impl GridSurface, today: NaiveDate) {
        self.cursor = self.cursor.next();
        log::debug!("calendar cursor moved to {}", self.cursor);
        self.render(surface, today);
    }

    pub fn retreat(&mut self, surface: &mut impl GridSurface, today: NaiveDate) {
        self.cursor = self.cursor.prev();
        log::debug!("calendar cursor moved to {}", self.cursor);
        self.render(surface, today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn rendered(month: Month, year: i32, today: NaiveDate) -> (CalendarEngine, GridState) {
        let engine = CalendarEngine::new(Cursor::new(month, year));
        let mut grid = GridState::new();
        engine.render(&mut grid, today);
        (engine, grid)
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));

        assert_eq!(days_of_month(Month::February, 2000), 29);
        assert_eq!(days_of_month(Month::February, 1900), 28);
        assert_eq!(days_of_month(Month::February, 2024), 29);
        assert_eq!(days_of_month(Month::February, 2023), 28);
    }

    #[test]
    fn month_lengths_match_chrono() {
        for year in 1899..=2101 {
            for number in 1..=12u32 {
                let month = Month::from_u32(number).unwrap();
                let next_first = if number == 12 {
                    date(year + 1, 1, 1)
                } else {
                    date(year, number + 1, 1)
                };
                let days = next_first
                    .signed_duration_since(date(year, number, 1))
                    .num_days() as u32;

                assert_eq!(days_of_month(month, year), days, "{} {}", month.name(), year);
            }
        }
    }

    #[test]
    fn first_weekday_is_sunday_based() {
        // 2024-01-01 was a Monday, 2024-02-01 a Thursday.
        assert_eq!(first_weekday(Month::January, 2024), 1);
        assert_eq!(first_weekday(Month::February, 2024), 4);
        // 2023-01-01 was a Sunday.
        assert_eq!(first_weekday(Month::January, 2023), 0);
    }

    #[test]
    fn row_count_rule() {
        // 31 days starting Friday and Saturday, 30 days starting Saturday.
        assert_eq!(first_weekday(Month::May, 2026), 5);
        assert_eq!(rows_for_month(Month::May, 2026, 5), GRID_MAX_ROWS);
        assert_eq!(first_weekday(Month::August, 2026), 6);
        assert_eq!(rows_for_month(Month::August, 2026, 6), GRID_MAX_ROWS);
        assert_eq!(first_weekday(Month::November, 2025), 6);
        assert_eq!(rows_for_month(Month::November, 2025, 6), GRID_MAX_ROWS);

        // Monday-start January needs no overflow row.
        assert_eq!(rows_for_month(Month::January, 2024, 1), GRID_BASE_ROWS);

        // The named rule is exactly the slot-overflow condition.
        for year in 2020..=2030 {
            for number in 1..=12u32 {
                let month = Month::from_u32(number).unwrap();
                let first = first_weekday(month, year);
                let expected = if first + days_of_month(month, year) > 35 {
                    GRID_MAX_ROWS
                } else {
                    GRID_BASE_ROWS
                };

                assert_eq!(rows_for_month(month, year, first), expected);
            }
        }
    }

    #[test]
    fn render_fills_every_cell() {
        for year in 2023..=2026 {
            for number in 1..=12u32 {
                let month = Month::from_u32(number).unwrap();
                let (_, grid) = rendered(month, year, date(1970, 1, 1));

                assert!(grid.cells().all(|cell| cell.day >= 1));
                assert_eq!(
                    grid.cells().filter(|cell| !cell.faded).count() as u32,
                    days_of_month(month, year)
                );
            }
        }
    }

    #[test]
    fn faded_cells_form_prefix_and_suffix_runs() {
        for year in 2023..=2026 {
            for number in 1..=12u32 {
                let month = Month::from_u32(number).unwrap();
                let (_, grid) = rendered(month, year, date(1970, 1, 1));

                let flags: Vec<bool> = grid.cells().map(|cell| cell.faded).collect();
                let prefix = flags.iter().take_while(|&&faded| faded).count();
                let suffix = flags.iter().rev().take_while(|&&faded| faded).count();

                assert!(
                    flags[prefix..flags.len() - suffix].iter().all(|&faded| !faded),
                    "interior faded cell in {} {}",
                    month.name(),
                    year
                );
            }
        }
    }

    #[test]
    fn january_2024_layout() {
        let (_, grid) = rendered(Month::January, 2024, date(1970, 1, 1));

        // Monday start: one leading cell showing Dec 31, then 1..=31,
        // then Feb 1-3 filling the remaining three slots of five rows.
        assert_eq!(grid.row_count(), 5);
        let cells: Vec<CellSlot> = grid.cells().copied().collect();
        assert_eq!((cells[0].day, cells[0].faded), (31, true));
        assert_eq!((cells[1].day, cells[1].faded), (1, false));
        assert_eq!((cells[31].day, cells[31].faded), (31, false));
        assert_eq!((cells[32].day, cells[32].faded), (1, true));
        assert_eq!((cells[34].day, cells[34].faded), (3, true));
    }

    #[test]
    fn february_2024_layout() {
        let (_, grid) = rendered(Month::February, 2024, date(1970, 1, 1));

        // Thursday start, 29 days: four leading January cells, five rows.
        assert_eq!(grid.row_count(), 5);
        let cells: Vec<CellSlot> = grid.cells().copied().collect();
        assert_eq!((cells[0].day, cells[0].faded), (28, true));
        assert_eq!((cells[3].day, cells[3].faded), (31, true));
        assert_eq!((cells[4].day, cells[4].faded), (1, false));
        assert_eq!((cells[32].day, cells[32].faded), (29, false));
        assert_eq!((cells[33].day, cells[33].faded), (1, true));
    }

    #[test]
    fn sixth_row_added_and_removed() {
        let today = date(1970, 1, 1);
        let mut engine = CalendarEngine::new(Cursor::new(Month::May, 2026));
        let mut grid = GridState::new();

        engine.render(&mut grid, today);
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.cells().count(), 42);

        // Re-rendering the same month leaves the row count untouched.
        engine.render(&mut grid, today);
        assert_eq!(grid.row_count(), 6);

        // June 2026 starts on a Monday and fits in five rows again.
        engine.advance(&mut grid, today);
        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.cells().count(), 35);
    }

    #[test]
    fn cursor_wraps_at_year_boundaries() {
        let cursor = Cursor::new(Month::December, 2023);
        assert_eq!(cursor.next(), Cursor::new(Month::January, 2024));
        assert_eq!(cursor.next().prev(), cursor);

        let cursor = Cursor::new(Month::January, 2024);
        assert_eq!(cursor.prev(), Cursor::new(Month::December, 2023));
        assert_eq!(cursor.prev().next(), cursor);
    }

    #[test]
    fn advance_then_retreat_restores_cursor_and_grid() {
        let today = date(2024, 1, 15);

        for start in [
            Cursor::new(Month::January, 2024),
            Cursor::new(Month::December, 2023),
            Cursor::new(Month::June, 2025),
        ] {
            let mut engine = CalendarEngine::new(start);
            let mut grid = GridState::new();
            engine.render(&mut grid, today);
            let original = grid.clone();

            engine.advance(&mut grid, today);
            engine.retreat(&mut grid, today);
            assert_eq!(engine.cursor(), start);
            assert_eq!(grid, original);

            engine.retreat(&mut grid, today);
            engine.advance(&mut grid, today);
            assert_eq!(engine.cursor(), start);
            assert_eq!(grid, original);
        }
    }

    #[test]
    fn today_marked_only_under_matching_cursor() {
        let (_, grid) = rendered(Month::January, 2024, date(2024, 1, 15));
        let marked: Vec<&CellSlot> = grid.cells().filter(|cell| cell.today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day, 15);
        assert!(!marked[0].faded);

        // Cursor on a different month: no mark, even though "15" appears
        // among the visible day numbers.
        let (_, grid) = rendered(Month::February, 2024, date(2024, 1, 15));
        assert_eq!(grid.cells().filter(|cell| cell.today).count(), 0);
    }

    #[test]
    fn today_mark_follows_date_change() {
        let engine = CalendarEngine::new(Cursor::new(Month::February, 2024));
        let mut grid = GridState::new();
        engine.render(&mut grid, date(2024, 2, 28));

        // Midnight rollover onto leap day: the mark moves, never duplicates.
        engine.highlight_today(&mut grid, date(2024, 2, 29));
        let marked: Vec<&CellSlot> = grid.cells().filter(|cell| cell.today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day, 29);

        // Rolling into March clears the mark entirely.
        engine.highlight_today(&mut grid, date(2024, 3, 1));
        assert_eq!(grid.cells().filter(|cell| cell.today).count(), 0);
    }
}
