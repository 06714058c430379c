/// A line typed by the user while `watch` is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Refresh,
    ToggleDarkMode,
    Currency(String),
    Empty,
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Input::Empty,
        "q" | "quit" | "exit" => Input::Quit,
        "r" | "refresh" => Input::Refresh,
        "d" | "dark" => Input::ToggleDarkMode,
        _ => Input::Currency(trimmed.to_uppercase()),
    }
}
