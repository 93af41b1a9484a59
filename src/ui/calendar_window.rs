use std::fmt::{self, Display, Write as _};

use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{CellSlot, GRID_COLUMNS, WEEKDAY_NAMES};

use super::{Context, Theme};

pub struct DayCell<'a> {
    slot: &'a CellSlot,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    pub(crate) const CELL_WIDTH: usize = 4;

    fn new(slot: &'a CellSlot, theme: &'a Theme) -> Self {
        DayCell { slot, theme }
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.slot.today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, " {}{:>2}", mark, self.slot.day)
    }
}

pub struct MonthPane<'a> {
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    pub(crate) const WIDTH: usize = GRID_COLUMNS * DayCell::CELL_WIDTH;
    const HEADER_ROWS: usize = 1;

    pub fn new(context: &'a Context) -> Self {
        MonthPane { context }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + self.context.grid().rows().len()),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(
                theme
                    .weekday_header_style
                    .format(theme.weekday_header_text_style),
            );

        // print header first
        for &name in WEEKDAY_NAMES.iter() {
            write!(
                &mut cursor,
                "{:>width$}",
                name,
                width = DayCell::CELL_WIDTH
            )
            .unwrap();
        }

        // cells wrap into grid rows at the pane width
        for slot in self.context.grid().cells() {
            let style = if slot.today {
                theme.today_day_style.format(theme.today_day_text_style)
            } else if slot.faded {
                theme.faded_day_style.format(theme.faded_day_text_style)
            } else {
                theme.day_style.format(theme.day_text_style)
            };

            cursor.set_style_modifier(style);
            write!(&mut cursor, "{}", DayCell::new(slot, theme)).unwrap();
        }
    }
}
