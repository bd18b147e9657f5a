//! Validated console input.
//!
//! Input is consumed token by token, so several numbers may be typed on one
//! line (`1 2 5` for an edge). A token that is not a number, or a number
//! outside the requested range, discards the rest of its line and the prompt
//! is shown again. Nothing is returned until a valid value arrives or the
//! input ends.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Reads validated values from `input`, writing prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Where prompts and reports are written.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for an integer in `min..=max` until one is given.
    /// `Ok(None)` means the input ended.
    pub fn read_int(&mut self, prompt: &str, min: u64, max: u64) -> io::Result<Option<u64>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match token.parse::<u64>() {
                Err(_) => {
                    self.pending.clear();
                    writeln!(self.output, "Invalid input. Please enter a valid number.")?;
                }
                Ok(value) if value < min || value > max => {
                    self.pending.clear();
                    writeln!(
                        self.output,
                        "Input out of range. Please enter a number between {} and {}.",
                        min, max
                    )?;
                }
                Ok(value) => return Ok(Some(value)),
            }
        }
    }

    /// `read_int` for a count or 1-based index that fits `usize`.
    pub fn read_usize(&mut self, prompt: &str, min: usize, max: usize) -> io::Result<Option<usize>> {
        let value = self.read_int(prompt, min as u64, max as u64)?;
        Ok(value.map(|v| usize::try_from(v).unwrap_or(max)))
    }

    /// `read_int` for a resource count or distance.
    pub fn read_u32(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<Option<u32>> {
        let value = self.read_int(prompt, u64::from(min), u64::from(max))?;
        Ok(value.map(|v| u32::try_from(v).unwrap_or(max)))
    }

    /// Ask for a free-text value: whatever is left on the current line, or
    /// the next non-blank line. `Ok(None)` means the input ended.
    pub fn read_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        if !self.pending.is_empty() {
            let rest: Vec<String> = self.pending.drain(..).collect();
            return Ok(Some(rest.join(" ")));
        }
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// Read a menu choice without range checking. Anything that is not a
    /// number comes back as `Some(None)` so the caller can report an
    /// invalid option; `None` means the input ended.
    pub fn read_choice(&mut self, prompt: &str) -> io::Result<Option<Option<u32>>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        let choice = token.parse::<u32>().ok();
        if choice.is_none() {
            self.pending.clear();
        }
        Ok(Some(choice))
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn test_reads_valid_int() {
        let mut p = prompter("42\n");
        assert_eq!(p.read_int("n: ", 1, 100).unwrap(), Some(42));
        assert_eq!(written(&p), "n: ");
    }

    #[test]
    fn test_reprompts_on_garbage_and_range() {
        let mut p = prompter("abc\n0\n101\n7\n");
        assert_eq!(p.read_int("n: ", 1, 100).unwrap(), Some(7));
        let out = written(&p);
        assert_eq!(out.matches("n: ").count(), 4);
        assert!(out.contains("Invalid input. Please enter a valid number."));
        assert!(out.contains("Input out of range. Please enter a number between 1 and 100."));
    }

    #[test]
    fn test_garbage_discards_rest_of_line() {
        let mut p = prompter("x 5\n6\n");
        assert_eq!(p.read_int("n: ", 1, 10).unwrap(), Some(6));
    }

    #[test]
    fn test_several_numbers_per_line() {
        let mut p = prompter("1 2 5\n");
        assert_eq!(p.read_int("u: ", 1, 3).unwrap(), Some(1));
        assert_eq!(p.read_int("v: ", 1, 3).unwrap(), Some(2));
        assert_eq!(p.read_int("w: ", 1, 10).unwrap(), Some(5));
    }

    #[test]
    fn test_negative_is_invalid() {
        let mut p = prompter("-3\n3\n");
        assert_eq!(p.read_u32("beds: ", 0, u32::MAX).unwrap(), Some(3));
        assert!(written(&p).contains("Invalid input"));
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("oops\n");
        assert_eq!(p.read_int("n: ", 1, 10).unwrap(), None);
        let mut p = prompter("");
        assert_eq!(p.read_text("name: ").unwrap(), None);
        assert_eq!(p.read_choice("choice: ").unwrap(), None);
    }

    #[test]
    fn test_read_text_takes_rest_of_line() {
        let mut p = prompter("3 Mary Ann\n\n  Bob  \n");
        assert_eq!(p.read_choice("c: ").unwrap(), Some(Some(3)));
        assert_eq!(p.read_text("name: ").unwrap().as_deref(), Some("Mary Ann"));
        assert_eq!(p.read_text("name: ").unwrap().as_deref(), Some("Bob"));
    }

    #[test]
    fn test_read_choice_non_numeric() {
        let mut p = prompter("menu 4\n2\n");
        assert_eq!(p.read_choice("c: ").unwrap(), Some(None));
        assert_eq!(p.read_choice("c: ").unwrap(), Some(Some(2)));
    }
}
