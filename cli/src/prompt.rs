use std::io::{self, BufRead};

/// A line typed at any prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Quit,
    Retry,
    /// 1-based position
    Pick(usize),
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" => Self::Quit,
            "r" | "retry" => Self::Retry,
            other => other.parse().map(Self::Pick).unwrap_or(Self::Unknown),
        }
    }
}

/// Next input, `None` once the input is exhausted.
pub(crate) fn next_input(input: &mut impl BufRead) -> io::Result<Option<Input>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(Input::parse(&line)))
}
