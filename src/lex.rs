use std::fmt;

/// A recoverable problem found while parsing, tied to the line it was found on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParseError {
  pub(crate) line_number: usize,
  pub(crate) message: String,
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: {}", self.line_number, self.message)
  }
}

fn strip_comment(line: &str) -> &str {
  match line.find('#') {
    Some(at) => &line[..at],
    None => line,
  }
}

/// Splits a whole input block into `(line_number, line)` pairs, 1-based,
/// dropping comments and lines with nothing left on them.
pub(crate) fn lines(input: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
  input.lines().enumerate().filter_map(|(i, line)| {
    let line = strip_comment(line).trim();
    if line.is_empty() {
      None
    } else {
      Some((i + 1, line))
    }
  })
}

/// A cursor over the tokens of a single line.
///
/// Running out of tokens is an ordinary outcome, reported as `None`.
#[derive(Clone, Debug)]
pub(crate) struct Scanner<'a> {
  rest: &'a str,
}

impl<'a> Scanner<'a> {
  pub(crate) fn new(line: &'a str) -> Scanner<'a> {
    Scanner {
      rest: strip_comment(line),
    }
  }

  pub(crate) fn is_at_end(&self) -> bool {
    self.rest.trim_start().is_empty()
  }

  /// The next whitespace delimited word on the line.
  pub(crate) fn scan_word(&mut self) -> Option<&'a str> {
    let trimmed = self.rest.trim_start();
    if trimmed.is_empty() {
      self.rest = trimmed;
      return None;
    }

    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (word, rest) = trimmed.split_at(end);
    self.rest = rest;
    Some(word)
  }

  /// Everything left on the line with surrounding whitespace trimmed. Used for
  /// names and paths, which may contain spaces.
  pub(crate) fn remainder(&mut self) -> Option<&'a str> {
    let rest = self.rest.trim();
    self.rest = "";
    if rest.is_empty() {
      None
    } else {
      Some(rest)
    }
  }

  /// Accepts `on`/`off` (any case) or `1`/`0`. Nothing is consumed if the
  /// next word is something else.
  pub(crate) fn scan_on_off(&mut self) -> Option<bool> {
    let saved = self.rest;
    let answer = match self.scan_word() {
      Some(w) if w.eq_ignore_ascii_case("on") || w == "1" => Some(true),
      Some(w) if w.eq_ignore_ascii_case("off") || w == "0" => Some(false),
      _ => None,
    };
    if answer.is_none() {
      self.rest = saved;
    }
    answer
  }

  /// Like `expect_double`, but leaves the cursor untouched when the next word
  /// is missing or not a number.
  pub(crate) fn scan_double(&mut self) -> Option<f64> {
    let saved = self.rest;
    let value = self.expect_double().ok();
    if value.is_none() {
      self.rest = saved;
    }
    value
  }

  pub(crate) fn expect_double(&mut self) -> Result<f64, String> {
    match self.scan_word() {
      None => Err("expected a number but got end of line".to_owned()),
      Some(word) => {
        lexical::parse(word).map_err(|_| format!("expected a number but got `{}`", word))
      }
    }
  }

  /// Fails with the first leftover word, if there is one.
  pub(crate) fn expect_end(&mut self) -> Result<(), String> {
    match self.scan_word() {
      None => Ok(()),
      Some(word) => Err(format!("unexpected `{}` at end of directive", word)),
    }
  }
}
