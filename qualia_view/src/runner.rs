//! ═══════════════════════════════════════════════════════════════════════════════
//! RUNNER — Interactive Slider Loop
//! ═══════════════════════════════════════════════════════════════════════════════
//! Each input line is either a slash command or a change notification
//! `<complex> <element> <level>`. Changes go straight into the registry and
//! the affected point is recomputed and echoed.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::io::{self, BufRead, Write};

use qualia_space::{ComplexRegistry, ElementId};

use crate::config::ViewConfig;
use crate::display;
use crate::plot::plot_views;

/// Parsed REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Show,
    Plot,
    Reset,
    Help,
    Quit,
    Set {
        complex: String,
        element: ElementId,
        level: f64,
    },
}

/// Parse one line of user input
pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    if line.starts_with('/') {
        return match line {
            "/quit" | "/exit" | "/q" => Ok(Input::Quit),
            "/show" | "/s" => Ok(Input::Show),
            "/plot" | "/p" => Ok(Input::Plot),
            "/reset" => Ok(Input::Reset),
            "/help" | "/h" | "/?" => Ok(Input::Help),
            _ => Err(format!("Unknown command '{}'. Type /help for available commands.", line)),
        };
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let [complex, element, level] = parts.as_slice() else {
        return Err("Expected: <complex> <element> <level>".to_string());
    };
    let element = element
        .parse::<u8>()
        .map_err(|_| format!("Element id '{}' is not a number", element))?;
    let level = level
        .parse::<f64>()
        .map_err(|_| format!("Level '{}' is not a number", level))?;

    Ok(Input::Set {
        complex: complex.to_string(),
        element: ElementId(element),
        level,
    })
}

/// Owns the registry for one interactive session
pub struct ViewRunner {
    config: ViewConfig,
    registry: ComplexRegistry,
}

impl ViewRunner {
    pub fn new(config: ViewConfig, registry: ComplexRegistry) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &ComplexRegistry {
        &self.registry
    }

    /// Main loop over stdin
    pub fn run(&mut self) -> anyhow::Result<()> {
        display::welcome();
        display::views(&self.registry.views());

        let stdin = io::stdin();
        let mut lines = stdin.lock();
        loop {
            print!("{}", display::prompt());
            io::stdout().flush()?;

            let mut line = String::new();
            if lines.read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            if !self.handle_line(&line) {
                break;
            }
        }
        Ok(())
    }

    /// Apply one line. Returns false when the session should end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Ok(Input::Quit) => false,
            Ok(input) => {
                self.apply(input);
                true
            }
            Err(message) => {
                display::error(&message);
                true
            }
        }
    }

    fn apply(&mut self, input: Input) {
        match input {
            Input::Empty | Input::Quit => {}
            Input::Show => display::views(&self.registry.views()),
            Input::Plot => self.plot(),
            Input::Reset => {
                self.registry.reset();
                println!("Activities reset.");
            }
            Input::Help => display::help(),
            Input::Set {
                complex,
                element,
                level,
            } => {
                if !(0.0..=1.0).contains(&level) {
                    display::warning(&format!("level {} will be clamped into [0, 1]", level));
                }
                self.set(&complex, element, level);
            }
        }
    }

    /// Apply one activity change by complex name; unknown targets are ignored
    pub fn set(&mut self, complex: &str, element: ElementId, level: f64) {
        let Some(change) = self.registry.update_activity_by_name(complex, element, level) else {
            display::warning(&format!("no change: '{}' element {} not found", complex, element));
            return;
        };
        if let Some(view) = self.registry.view(change.complex) {
            display::change(&view.name, &change, &view.point);
        }
    }

    pub fn plot(&self) {
        let grid = plot_views(
            &self.registry.views(),
            self.config.plot_width,
            self.config.plot_height,
        );
        display::plot(&grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("  "), Ok(Input::Empty));
        assert_eq!(parse_line("/q"), Ok(Input::Quit));
        assert_eq!(parse_line("/plot\n"), Ok(Input::Plot));
        assert!(parse_line("/dance").is_err());
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_line("chain 2 0.75"),
            Ok(Input::Set {
                complex: "chain".to_string(),
                element: ElementId(2),
                level: 0.75,
            })
        );
        assert!(parse_line("chain two 0.75").is_err());
        assert!(parse_line("chain 2").is_err());
        assert!(parse_line("chain 2 high").is_err());
    }

    #[test]
    fn test_handle_line_updates_registry() {
        let mut runner = ViewRunner::new(ViewConfig::default(), ComplexRegistry::builtin());
        assert!(runner.handle_line("Divergent 1 1.0"));
        assert!(runner.handle_line("ghost 1 1.0"));
        assert!(runner.handle_line("chain 9 1.0"));

        let divergent = runner.registry().find_by_name("divergent").unwrap();
        assert_eq!(divergent.activities(), vec![1.0, 0.5, 0.5, 0.5]);
        assert_eq!(runner.registry().revision(), 1);

        assert!(!runner.handle_line("/quit"));
    }
}
