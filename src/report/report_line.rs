use std::fmt;

pub const REPORT_LINE_CAPACITY: usize = 256;

/// A text buffer that never grows past its capacity.
///
/// Remaining space is derived from the current length on every append.  An append that does not
/// fit is cut at the last character boundary that does, and the line is marked truncated.  Once
/// truncated, further appends are dropped so the result is always a prefix of the untruncated
/// line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportLine {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl ReportLine {
    pub fn new() -> Self {
        ReportLine::with_capacity(REPORT_LINE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ReportLine {
            text: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Append `s`, returning false if any of it was dropped.
    pub fn push_str(&mut self, s: &str) -> bool {
        if self.truncated {
            return s.is_empty();
        }

        let remaining = self.remaining();

        if s.len() <= remaining {
            self.text.push_str(s);

            return true;
        }

        let mut end = remaining;

        while !s.is_char_boundary(end) {
            end -= 1;
        }

        self.text.push_str(&s[..end]);
        self.truncated = true;

        false
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.text.len())
    }
}

impl Default for ReportLine {
    fn default() -> Self {
        ReportLine::new()
    }
}

impl fmt::Write for ReportLine {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // truncation is recorded on the line, not reported as a formatting error
        self.push_str(s);

        Ok(())
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
