use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::WeatherWidget;

use crate::render;

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    /// Empty line: search for the current text.
    Submit,
    /// `#N`, 1-based.
    Select(usize),
    Text(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches('\r');
        match line {
            ":q" | ":quit" => return Self::Quit,
            "" => return Self::Submit,
            _ => {}
        }

        line.strip_prefix('#')
            .and_then(|n| n.trim().parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .map(Self::Select)
            .unwrap_or_else(|| Self::Text(line.to_owned()))
    }
}

/// Read lines from stdin and render lookups as they complete, until `:q` or EOF.
pub async fn run(mut widget: WeatherWidget) -> anyhow::Result<()> {
    println!("{}", render::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Submit => {
                        if let Err(notice) = widget.submit() {
                            println!("{}", render::notice(&notice));
                        }
                    }
                    Input::Select(n) => match widget.select_suggestion(n - 1) {
                        Ok(true) => {}
                        Ok(false) => println!("No suggestion #{n}"),
                        Err(notice) => println!("{}", render::notice(&notice)),
                    },
                    Input::Text(text) => {
                        widget.set_search_text(text);
                    }
                }
            }
            Some(update) = widget.next_update() => {
                print!("{}", render::update(&update, widget.state()));
            }
        }
    }

    Ok(())
}
