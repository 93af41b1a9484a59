use crate::cmds::Cmd;
use crate::config::{Config, KeyMap};
use crate::events::{Dispatcher, Event};

use super::{Context, HeaderPane, MonthPane};

use termion::event::Event as TermEvent;
use unsegen::base::Terminal;
use unsegen::widget::*;

pub struct App {
    key_map: KeyMap,
    hint: String,
    context: Context,
}

impl App {
    pub fn new(config: &Config) -> App {
        let keys = &config.keys;
        let hint = format!(
            "{}/{}: change month  {}: quit",
            keys.prev_month, keys.next_month, keys.quit
        );

        App {
            key_map: config.key_map(),
            hint,
            context: Context::new(),
        }
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(HeaderPane::new(&self.context))
            .widget(MonthPane::new(&self.context))
            .widget(self.hint.as_str())
    }

    fn draw(&self, term: &mut Terminal) {
        let root = term.create_root_window();
        self.as_widget().draw(root, RenderingHints::new());
        term.present();
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            self.draw(&mut term);

            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Signal(_) => {}
                Event::Input(input) => {
                    if let TermEvent::Key(key) = input.event {
                        let cmd = self.key_map.get(&key).copied().unwrap_or(Cmd::Noop);

                        log::debug!("key {:?} -> {}", key, cmd.name());

                        match cmd {
                            Cmd::PrevMonth => self.context.retreat(),
                            Cmd::NextMonth => self.context.advance(),
                            Cmd::Exit => run = false,
                            Cmd::Noop => {}
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
