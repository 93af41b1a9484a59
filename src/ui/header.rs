use std::fmt::Write as _;

use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, MonthPane};

pub struct HeaderPane<'a> {
    context: &'a Context,
}

impl<'a> HeaderPane<'a> {
    pub fn new(context: &'a Context) -> Self {
        HeaderPane { context }
    }
}

impl Widget for HeaderPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(MonthPane::WIDTH),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let label = self.context.cursor().to_string();
        let time = self.context.time_line();

        let mut cursor = Cursor::new(&mut window);

        cursor.set_style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );
        write!(&mut cursor, "{}", label).unwrap();

        let padding = MonthPane::WIDTH.saturating_sub(label.len() + time.len());
        cursor.set_style_modifier(StyleModifier::new());
        write!(&mut cursor, "{:width$}", "", width = padding).unwrap();

        cursor.set_style_modifier(theme.time_style.format(theme.time_text_style));
        write!(&mut cursor, "{}", time).unwrap();
    }
}
